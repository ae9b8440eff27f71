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

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Maximum allowed silence interval before the underlying transport
/// considers the connection dead.
pub const DEFAULT_HEARTBEAT_TIMEOUT: Duration = Duration::from_millis(360_000);

/// Per-connection configuration handed to the
/// [`EventStreamFactory`][crate::EventStreamFactory].
///
/// Immutable once constructed; the listener builds a fresh value on every
/// `start` so the provider's current headers are always used.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ConnectionConfig {
    #[serde(rename = "heartbeat_timeout_ms", with = "duration_millis")]
    pub heartbeat_timeout: Duration,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ConnectionConfig {
    /// Builds a config carrying `headers` and the fixed
    /// [`DEFAULT_HEARTBEAT_TIMEOUT`].
    pub fn new(headers: HashMap<String, String>) -> Self {
        Self {
            heartbeat_timeout: DEFAULT_HEARTBEAT_TIMEOUT,
            headers,
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
