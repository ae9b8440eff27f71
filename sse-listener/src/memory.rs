//! In-memory stream transport for single-process embedding and tests.

use crate::config::ConnectionConfig;
use crate::factory::EventStreamFactory;
use crate::observability::{events, fields};
use crate::observer_identity::ObserverIdentityKey;
use crate::stream::{EventStream, StreamError, StreamEvent, StreamEventKind, StreamObserver};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

const COMPONENT: &str = "memory_stream";

#[derive(Default)]
struct MemoryStreamState {
    observers: Vec<(StreamEventKind, ObserverIdentityKey)>,
    closed: bool,
}

/// A streaming-connection handle fed by in-process emitters instead of a
/// network transport.
///
/// Observers registered for a kind receive emissions of that kind in emit
/// order. After [`close`][EventStream::close] all further emissions are
/// dropped.
#[derive(Default)]
pub struct MemoryEventStream {
    state: Mutex<MemoryStreamState>,
}

impl MemoryEventStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` to every event-kind observer, in registration order.
    pub async fn emit_event(&self, event: StreamEvent) {
        let Some(observers) = self.observers_for(StreamEventKind::Event).await else {
            return;
        };

        for observer in observers {
            observer.on_event(event.clone()).await;
        }
    }

    /// Delivers `error` to every error-kind observer, in registration order.
    pub async fn emit_error(&self, error: StreamError) {
        let Some(observers) = self.observers_for(StreamEventKind::Error).await else {
            return;
        };

        for observer in observers {
            observer.on_error(error.clone()).await;
        }
    }

    pub async fn is_closed(&self) -> bool {
        self.state.lock().await.closed
    }

    pub async fn observer_count(&self) -> usize {
        self.state.lock().await.observers.len()
    }

    /// Snapshot of the observers for `kind`, or `None` when the stream is
    /// closed. Dispatch happens outside the state lock.
    async fn observers_for(&self, kind: StreamEventKind) -> Option<Vec<Arc<dyn StreamObserver>>> {
        let state = self.state.lock().await;

        if state.closed {
            warn!(
                event = events::MEMORY_EMIT_AFTER_CLOSE,
                component = COMPONENT,
                kind = kind.as_str(),
                reason = fields::REASON_STREAM_CLOSED,
                "dropping emission on closed stream"
            );
            return None;
        }

        Some(
            state
                .observers
                .iter()
                .filter(|(registered_kind, _)| *registered_kind == kind)
                .map(|(_, key)| key.observer())
                .collect(),
        )
    }
}

#[async_trait]
impl EventStream for MemoryEventStream {
    async fn register_observer(&self, kind: StreamEventKind, observer: Arc<dyn StreamObserver>) {
        let mut state = self.state.lock().await;

        if state.closed {
            warn!(
                event = events::MEMORY_REGISTER_AFTER_CLOSE,
                component = COMPONENT,
                kind = kind.as_str(),
                reason = fields::REASON_STREAM_CLOSED,
                "ignoring observer registration on closed stream"
            );
            return;
        }

        state
            .observers
            .push((kind, ObserverIdentityKey::new(observer)));
    }

    async fn unregister_observer(&self, kind: StreamEventKind, observer: Arc<dyn StreamObserver>) {
        let mut state = self.state.lock().await;
        let key = ObserverIdentityKey::new(observer);

        let position = state
            .observers
            .iter()
            .position(|(registered_kind, registered_key)| {
                *registered_kind == kind && *registered_key == key
            });

        match position {
            Some(position) => {
                state.observers.remove(position);
            }
            None => {
                warn!(
                    event = events::MEMORY_UNREGISTER_MISSING,
                    component = COMPONENT,
                    kind = kind.as_str(),
                    "unable to unregister observer that was never registered"
                );
            }
        }
    }

    async fn close(&self) {
        self.state.lock().await.closed = true;
    }
}

struct CreatedStream {
    url: String,
    config: ConnectionConfig,
    stream: Arc<MemoryEventStream>,
}

/// Factory vending fresh [`MemoryEventStream`] handles.
///
/// Keeps a record of every created handle so the embedder can drive
/// emissions on the stream a listener is currently attached to.
#[derive(Default)]
pub struct MemoryStreamFactory {
    created: Mutex<Vec<CreatedStream>>,
}

impl MemoryStreamFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn created_count(&self) -> usize {
        self.created.lock().await.len()
    }

    /// The handle built for the most recent `create` call.
    pub async fn last_stream(&self) -> Option<Arc<MemoryEventStream>> {
        self.created
            .lock()
            .await
            .last()
            .map(|created| created.stream.clone())
    }

    /// The `(url, config)` arguments of the most recent `create` call.
    pub async fn last_request(&self) -> Option<(String, ConnectionConfig)> {
        self.created
            .lock()
            .await
            .last()
            .map(|created| (created.url.clone(), created.config.clone()))
    }
}

#[async_trait]
impl EventStreamFactory for MemoryStreamFactory {
    async fn create(&self, url: &str, config: &ConnectionConfig) -> Arc<dyn EventStream> {
        let stream = Arc::new(MemoryEventStream::new());

        debug!(
            event = events::MEMORY_STREAM_CREATE,
            component = COMPONENT,
            url,
            "created in-memory stream"
        );

        self.created.lock().await.push(CreatedStream {
            url: url.to_string(),
            config: config.clone(),
            stream: stream.clone(),
        });
        stream
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryEventStream, MemoryStreamFactory};
    use crate::config::ConnectionConfig;
    use crate::factory::EventStreamFactory;
    use crate::stream::{EventStream, StreamError, StreamEvent, StreamEventKind, StreamObserver};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex as StdMutex};

    #[derive(Default)]
    struct CollectingObserver {
        events: StdMutex<Vec<String>>,
        errors: StdMutex<Vec<String>>,
    }

    impl CollectingObserver {
        fn events(&self) -> Vec<String> {
            self.events.lock().expect("lock events").clone()
        }

        fn errors(&self) -> Vec<String> {
            self.errors.lock().expect("lock errors").clone()
        }
    }

    #[async_trait]
    impl StreamObserver for CollectingObserver {
        async fn on_event(&self, event: StreamEvent) {
            self.events.lock().expect("lock events").push(event.data);
        }

        async fn on_error(&self, error: StreamError) {
            self.errors.lock().expect("lock errors").push(error.message);
        }
    }

    #[tokio::test]
    async fn emissions_dispatch_only_to_matching_kind() {
        let stream = MemoryEventStream::new();
        let event_observer = Arc::new(CollectingObserver::default());
        let error_observer = Arc::new(CollectingObserver::default());
        stream
            .register_observer(StreamEventKind::Event, event_observer.clone())
            .await;
        stream
            .register_observer(StreamEventKind::Error, error_observer.clone())
            .await;

        stream.emit_event(StreamEvent::new("payload")).await;
        stream.emit_error(StreamError::new("boom")).await;

        assert_eq!(event_observer.events(), vec!["payload"]);
        assert!(event_observer.errors().is_empty());
        assert_eq!(error_observer.errors(), vec!["boom"]);
        assert!(error_observer.events().is_empty());
    }

    #[tokio::test]
    async fn events_are_delivered_in_emit_order() {
        let stream = MemoryEventStream::new();
        let observer = Arc::new(CollectingObserver::default());
        stream
            .register_observer(StreamEventKind::Event, observer.clone())
            .await;

        stream.emit_event(StreamEvent::new("one")).await;
        stream.emit_event(StreamEvent::new("two")).await;
        stream.emit_event(StreamEvent::new("three")).await;

        assert_eq!(observer.events(), vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn unregister_removes_only_the_exact_registered_reference() {
        let stream = MemoryEventStream::new();
        let kept = Arc::new(CollectingObserver::default());
        let removed = Arc::new(CollectingObserver::default());
        stream
            .register_observer(StreamEventKind::Event, kept.clone())
            .await;
        stream
            .register_observer(StreamEventKind::Event, removed.clone())
            .await;

        stream
            .unregister_observer(StreamEventKind::Event, removed.clone())
            .await;
        stream.emit_event(StreamEvent::new("payload")).await;

        assert_eq!(kept.events(), vec!["payload"]);
        assert!(removed.events().is_empty());
    }

    #[tokio::test]
    async fn unregister_with_a_different_instance_does_not_match() {
        let stream = MemoryEventStream::new();
        let registered = Arc::new(CollectingObserver::default());
        stream
            .register_observer(StreamEventKind::Event, registered.clone())
            .await;

        // Recreated value, different identity: removal must not match.
        let lookalike = Arc::new(CollectingObserver::default());
        stream
            .unregister_observer(StreamEventKind::Event, lookalike)
            .await;
        stream.emit_event(StreamEvent::new("payload")).await;

        assert_eq!(registered.events(), vec!["payload"]);
        assert_eq!(stream.observer_count().await, 1);
    }

    #[tokio::test]
    async fn close_stops_all_further_delivery() {
        let stream = MemoryEventStream::new();
        let observer = Arc::new(CollectingObserver::default());
        stream
            .register_observer(StreamEventKind::Event, observer.clone())
            .await;
        stream
            .register_observer(StreamEventKind::Error, observer.clone())
            .await;

        stream.close().await;
        stream.emit_event(StreamEvent::new("late")).await;
        stream.emit_error(StreamError::new("late")).await;

        assert!(stream.is_closed().await);
        assert!(observer.events().is_empty());
        assert!(observer.errors().is_empty());
    }

    #[tokio::test]
    async fn registration_after_close_is_ignored() {
        let stream = MemoryEventStream::new();
        stream.close().await;

        stream
            .register_observer(
                StreamEventKind::Event,
                Arc::new(CollectingObserver::default()),
            )
            .await;

        assert_eq!(stream.observer_count().await, 0);
    }

    #[tokio::test]
    async fn factory_vends_fresh_streams_and_records_requests() {
        let factory = MemoryStreamFactory::new();
        let config = ConnectionConfig::default();

        let first = factory.create("memory://a", &config).await;
        let second = factory.create("memory://b", &config).await;

        assert_eq!(factory.created_count().await, 2);
        assert!(!Arc::ptr_eq(&first, &second));
        let (url, recorded_config) = factory.last_request().await.expect("request recorded");
        assert_eq!(url, "memory://b");
        assert_eq!(recorded_config, config);
    }
}
