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

//! Subscription listener: lifecycle orchestration for one streaming
//! connection and fan-out to user callbacks.

use crate::auth::AuthenticationProvider;
use crate::config::ConnectionConfig;
use crate::factory::EventStreamFactory;
use crate::observability::{events, fields};
use crate::stream::{EventStream, StreamError, StreamEvent, StreamEventKind, StreamObserver};
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Weak};
use tokio::sync::Mutex;
use tracing::{debug, warn};

const COMPONENT: &str = "subscription_listener";

/// Misuse failures surfaced synchronously to the caller.
#[derive(Debug)]
pub enum ListenerError {
    AlreadyStarted,
}

impl Display for ListenerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::AlreadyStarted => write!(f, "listener already started"),
        }
    }
}

impl Error for ListenerError {}

type EventCallback = Arc<dyn Fn(StreamEvent) + Send + Sync>;
type ErrorCallback = Arc<dyn Fn(StreamError) + Send + Sync>;

/// Handle plus the exact observer reference registered on it. Teardown must
/// unregister with that same reference for the removal to match.
struct ActiveConnection {
    stream: Arc<dyn EventStream>,
    forwarder: Arc<StreamForwarder>,
}

impl ActiveConnection {
    async fn detach_and_close(self) {
        let observer: Arc<dyn StreamObserver> = self.forwarder.clone();
        self.stream
            .unregister_observer(StreamEventKind::Event, observer.clone())
            .await;
        self.stream
            .unregister_observer(StreamEventKind::Error, observer)
            .await;
        self.stream.close().await;
    }
}

#[derive(Default)]
struct ListenerState {
    connection: Option<ActiveConnection>,
    on_event: Option<EventCallback>,
    on_error: Option<ErrorCallback>,
}

struct ListenerShared {
    state: Mutex<ListenerState>,
}

/// Manages the open/close lifecycle of a single server-pushed event stream.
///
/// The listener is constructed once from a factory and an authentication
/// provider and reused across start/stop cycles; every `start` performs a
/// fresh header lookup and asks the factory for a fresh handle. It owns at
/// most one handle at a time: the handle is present exactly while the
/// listener is started.
///
/// On a transport error the listener forwards the raw error to the
/// registered error callback and then tears the connection down on its own,
/// so it never stays started on a broken stream. No reconnection is
/// attempted; resuming requires an explicit `start`.
pub struct SubscriptionListener {
    factory: Arc<dyn EventStreamFactory>,
    auth: Arc<dyn AuthenticationProvider>,
    shared: Arc<ListenerShared>,
}

impl SubscriptionListener {
    pub fn new(
        factory: Arc<dyn EventStreamFactory>,
        auth: Arc<dyn AuthenticationProvider>,
    ) -> Self {
        Self {
            factory,
            auth,
            shared: Arc::new(ListenerShared {
                state: Mutex::new(ListenerState::default()),
            }),
        }
    }

    /// Opens the stream for `url`.
    ///
    /// Looks up the provider's current headers, builds a fresh
    /// [`ConnectionConfig`] with the fixed heartbeat timeout, creates a
    /// handle through the factory and registers one event-kind and one
    /// error-kind observer on it.
    ///
    /// Fails with [`ListenerError::AlreadyStarted`] and no side effects when
    /// the listener is already started.
    pub async fn start(&self, url: &str) -> Result<(), ListenerError> {
        let mut state = self.shared.state.lock().await;

        if state.connection.is_some() {
            warn!(
                event = events::SUBSCRIPTION_START_REJECTED,
                component = COMPONENT,
                url,
                reason = fields::REASON_ALREADY_STARTED,
                "rejecting start on running listener"
            );
            return Err(ListenerError::AlreadyStarted);
        }

        let headers = self.auth.connection_headers();
        let header_names = fields::format_header_names(&headers);
        let config = ConnectionConfig::new(headers);
        let stream = self.factory.create(url, &config).await;

        let forwarder = Arc::new(StreamForwarder {
            shared: Arc::downgrade(&self.shared),
        });
        let observer: Arc<dyn StreamObserver> = forwarder.clone();
        stream
            .register_observer(StreamEventKind::Event, observer.clone())
            .await;
        stream
            .register_observer(StreamEventKind::Error, observer)
            .await;

        state.connection = Some(ActiveConnection { stream, forwarder });

        debug!(
            event = events::SUBSCRIPTION_START_OK,
            component = COMPONENT,
            url,
            headers = %header_names,
            "subscription stream started"
        );
        Ok(())
    }

    /// Closes the stream and resets to stopped.
    ///
    /// Unregisters the two observers registered at start (same references),
    /// closes the handle and discards it. Calling `stop` while already
    /// stopped is ignored.
    pub async fn stop(&self) {
        let connection = { self.shared.state.lock().await.connection.take() };

        match connection {
            Some(connection) => {
                connection.detach_and_close().await;
                debug!(
                    event = events::SUBSCRIPTION_STOP_OK,
                    component = COMPONENT,
                    "subscription stream stopped"
                );
            }
            None => {
                debug!(
                    event = events::SUBSCRIPTION_STOP_IGNORED,
                    component = COMPONENT,
                    reason = fields::REASON_NOT_STARTED,
                    "stop on stopped listener ignored"
                );
            }
        }
    }

    /// True iff a stream is currently open.
    pub async fn started(&self) -> bool {
        self.shared.state.lock().await.connection.is_some()
    }

    /// Registers (replaces) the event callback. Payloads are forwarded
    /// verbatim and in delivery order. Independent of the start/stop state
    /// and persists across stops.
    pub async fn on_event<F>(&self, callback: F)
    where
        F: Fn(StreamEvent) + Send + Sync + 'static,
    {
        self.shared.state.lock().await.on_event = Some(Arc::new(callback));
    }

    /// Registers (replaces) the error callback.
    pub async fn on_error<F>(&self, callback: F)
    where
        F: Fn(StreamError) + Send + Sync + 'static,
    {
        self.shared.state.lock().await.on_error = Some(Arc::new(callback));
    }
}

/// Internal observer registered on the handle for both notification kinds.
///
/// Holds the listener state weakly: a forwarder outliving its listener only
/// drops late deliveries.
struct StreamForwarder {
    shared: Weak<ListenerShared>,
}

#[async_trait]
impl StreamObserver for StreamForwarder {
    async fn on_event(&self, event: StreamEvent) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };

        let callback = { shared.state.lock().await.on_event.clone() };
        match callback {
            Some(callback) => {
                debug!(
                    event = events::STREAM_EVENT_FORWARDED,
                    component = COMPONENT,
                    bytes = event.data.len(),
                    "forwarding stream event"
                );
                callback(event);
            }
            None => {
                debug!(
                    event = events::STREAM_EVENT_DROPPED,
                    component = COMPONENT,
                    reason = fields::REASON_NO_CALLBACK,
                    "dropping stream event without registered callback"
                );
            }
        }
    }

    async fn on_error(&self, error: StreamError) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };

        // Taking the connection out first guarantees at most one error
        // notification per failed stream: any further delivery finds the
        // listener already stopped.
        let (connection, callback) = {
            let mut state = shared.state.lock().await;
            (state.connection.take(), state.on_error.clone())
        };

        let Some(connection) = connection else {
            warn!(
                event = events::STREAM_ERROR_AFTER_STOP,
                component = COMPONENT,
                err = %error,
                reason = fields::REASON_NOT_STARTED,
                "ignoring error delivery on stopped listener"
            );
            return;
        };

        let detail = error.to_string();
        if let Some(callback) = callback {
            callback(error);
        }

        connection.detach_and_close().await;
        debug!(
            event = events::STREAM_ERROR_TEARDOWN,
            component = COMPONENT,
            err = %detail,
            "stream error forwarded and connection torn down"
        );
    }
}
