//! Observer identity keying used for identity-based unregistration.

use crate::stream::StreamObserver;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct ObserverIdentityKey {
    observer: Arc<dyn StreamObserver>,
}

impl ObserverIdentityKey {
    pub(crate) fn new(observer: Arc<dyn StreamObserver>) -> Self {
        Self { observer }
    }

    pub(crate) fn observer(&self) -> Arc<dyn StreamObserver> {
        self.observer.clone()
    }
}

impl Hash for ObserverIdentityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.observer).hash(state);
    }
}

impl PartialEq for ObserverIdentityKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.observer, &other.observer)
    }
}

impl Eq for ObserverIdentityKey {}

impl Debug for ObserverIdentityKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverIdentityKey").finish_non_exhaustive()
    }
}
