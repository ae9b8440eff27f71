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

//! # sse-listener
//!
//! `sse-listener` manages the lifecycle of a single long-lived, server-pushed
//! event stream ("Server-Sent-Events"-style connection): opening it with the
//! authentication provider's current headers, fanning inbound payloads out to
//! a registered callback, and tearing the connection down on transport errors
//! instead of leaving it in an undefined state.
//!
//! Typical usage is API-first and centered on [`SubscriptionListener`]. The
//! listener is constructed once from an [`EventStreamFactory`] and an
//! [`AuthenticationProvider`] and reused across start/stop cycles; each
//! `start` asks the provider for fresh headers and the factory for a fresh
//! handle.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use sse_listener::{
//!     AnonymousAuthentication, MemoryStreamFactory, StreamEvent, SubscriptionListener,
//! };
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let factory = Arc::new(MemoryStreamFactory::new());
//! let listener = SubscriptionListener::new(factory.clone(), Arc::new(AnonymousAuthentication));
//!
//! listener.on_event(|event| println!("payload: {}", event.data)).await;
//! listener.on_error(|error| eprintln!("stream failed: {error}")).await;
//!
//! listener.start("memory://updates").await.unwrap();
//! assert!(listener.started().await);
//!
//! // The handle built for this start is available for in-process publishing.
//! let stream = factory.last_stream().await.unwrap();
//! stream.emit_event(StreamEvent::new("hello")).await;
//!
//! listener.stop().await;
//! assert!(!listener.started().await);
//! # });
//! ```
//!
//! ## Lifecycle contract
//!
//! ```
//! use std::sync::Arc;
//! use sse_listener::{AnonymousAuthentication, MemoryStreamFactory, SubscriptionListener};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let factory = Arc::new(MemoryStreamFactory::new());
//! let listener = SubscriptionListener::new(factory, Arc::new(AnonymousAuthentication));
//!
//! // Double-start is a misuse error; stop on a stopped listener is ignored.
//! listener.start("memory://a").await.unwrap();
//! assert!(listener.start("memory://b").await.is_err());
//! listener.stop().await;
//! listener.stop().await;
//!
//! // The listener is cycle-reentrant.
//! listener.start("memory://c").await.unwrap();
//! # });
//! ```
//!
//! ## Transport seams
//!
//! Real transports plug in behind two traits: [`EventStream`] (the handle
//! capability set: register/unregister observers by identity, close) and
//! [`EventStreamFactory`] (pure handle construction). [`MemoryEventStream`]
//! ships as an in-process implementation for embedding and tests.
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events. Library code emits events and
//! does not unconditionally initialize a global subscriber; binaries and
//! tests are responsible for one-time `tracing_subscriber` initialization at
//! process boundaries.

mod auth;
pub use auth::{
    AnonymousAuthentication, AuthenticationProvider, BasicAuthentication, AUTHORIZATION_HEADER,
};

mod config;
pub use config::{ConnectionConfig, DEFAULT_HEARTBEAT_TIMEOUT};

mod factory;
pub use factory::EventStreamFactory;

mod listener;
pub use listener::{ListenerError, SubscriptionListener};

mod memory;
pub use memory::{MemoryEventStream, MemoryStreamFactory};

#[doc(hidden)]
pub mod observability;

mod observer_identity;

mod stream;
pub use stream::{EventStream, StreamError, StreamEvent, StreamEventKind, StreamObserver};
