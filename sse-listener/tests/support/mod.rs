use sse_listener::SubscriptionListener;
use std::sync::{Arc, Mutex};

/// Captures everything the listener forwards to its user callbacks.
#[derive(Default)]
pub(crate) struct CallbackSink {
    events: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl CallbackSink {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().expect("lock events").clone()
    }

    #[allow(dead_code)]
    pub(crate) fn errors(&self) -> Vec<String> {
        self.errors.lock().expect("lock errors").clone()
    }
}

pub(crate) async fn attach_sink(listener: &SubscriptionListener) -> Arc<CallbackSink> {
    let sink = Arc::new(CallbackSink::default());

    let events = sink.clone();
    listener
        .on_event(move |event| {
            events.events.lock().expect("lock events").push(event.data);
        })
        .await;

    let errors = sink.clone();
    listener
        .on_error(move |error| {
            errors
                .errors
                .lock()
                .expect("lock errors")
                .push(error.message);
        })
        .await;

    sink
}
