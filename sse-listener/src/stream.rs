//! Streaming-connection seam: the handle capability set and the observer
//! delivery contract.

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Registration kind for observers on an [`EventStream`].
///
/// A stream delivers two named notification channels: generic inbound
/// events and transport errors.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StreamEventKind {
    Event,
    Error,
}

impl StreamEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamEventKind::Event => "event",
            StreamEventKind::Error => "error",
        }
    }
}

/// Raw payload delivered on the event channel, forwarded verbatim to the
/// consumer. No parsing or deserialization happens at this layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StreamEvent {
    pub data: String,
}

impl StreamEvent {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

/// Raw transport-error value delivered on the error channel.
///
/// Never thrown back to a caller; only reported through the error callback
/// registered on the listener.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StreamError {
    pub message: String,
}

impl StreamError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for StreamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StreamError {}

/// Delivery seam for asynchronous stream notifications.
///
/// Observers are registered per [`StreamEventKind`]; an observer registered
/// for the `Event` kind only receives `on_event` calls from that stream, and
/// likewise for `Error`/`on_error`.
#[async_trait]
pub trait StreamObserver: Send + Sync {
    async fn on_event(&self, event: StreamEvent);

    async fn on_error(&self, error: StreamError);
}

/// Opaque handle to one long-lived, server-pushed connection.
///
/// Removal is identity-based: `unregister_observer` must be called with the
/// exact `Arc` passed to `register_observer`. A recreated observer value is
/// not equal to the registered one.
///
/// Registration and close have no error contract at this layer; transport
/// failures surface asynchronously as error-kind deliveries.
#[async_trait]
pub trait EventStream: Send + Sync {
    async fn register_observer(&self, kind: StreamEventKind, observer: Arc<dyn StreamObserver>);

    async fn unregister_observer(&self, kind: StreamEventKind, observer: Arc<dyn StreamObserver>);

    /// Closes the connection. After close returns no further notifications
    /// are delivered from this handle.
    async fn close(&self);
}
