/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

use crate::config::ConnectionConfig;
use crate::stream::EventStream;
use async_trait::async_trait;
use std::sync::Arc;

/// Constructs streaming-connection handles for a target address.
///
/// Construction is pure at this layer: no network I/O beyond what the
/// returned handle's implementation performs on its own, and no error
/// contract. Transport failures surface later as handle-level error events.
///
/// A factory may be shared across multiple
/// [`SubscriptionListener`][crate::SubscriptionListener] instances; each
/// `start` asks for a fresh handle.
#[async_trait]
pub trait EventStreamFactory: Send + Sync {
    async fn create(&self, url: &str, config: &ConnectionConfig) -> Arc<dyn EventStream>;
}
