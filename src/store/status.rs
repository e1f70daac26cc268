//! Reactive store status: the loading flag and a cache revision counter.

use std::sync::Arc;

use tokio::sync::watch;

/// What pages observe to decide whether to show a spinner and when to re-read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStatus {
    /// True while at least one operation of the store is in flight.
    pub loading: bool,
    /// Number of operations currently in flight.
    pub in_flight: usize,
    /// Incremented on every cache mutation.
    pub revision: u64,
}

/// Shared status channel of one store instance.
#[derive(Debug)]
pub(crate) struct Activity {
    status: watch::Sender<StoreStatus>,
}

impl Activity {
    pub(crate) fn new() -> Self {
        let (status, _) = watch::channel(StoreStatus::default());
        Self { status }
    }

    pub(crate) fn current(&self) -> StoreStatus {
        *self.status.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<StoreStatus> {
        self.status.subscribe()
    }

    /// Record a cache mutation.
    pub(crate) fn touch(&self) {
        self.status.send_modify(|status| status.revision += 1);
    }

    /// Mark one operation as started. Loading stays true until the returned
    /// guard is dropped, whichever way the operation ends.
    pub(crate) fn enter(self: &Arc<Self>) -> InFlight {
        self.status.send_modify(|status| {
            status.in_flight += 1;
            status.loading = true;
        });
        InFlight {
            activity: Arc::clone(self),
        }
    }
}

/// Guard for one in-flight operation.
#[derive(Debug)]
pub(crate) struct InFlight {
    activity: Arc<Activity>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.activity.status.send_modify(|status| {
            status.in_flight = status.in_flight.saturating_sub(1);
            status.loading = status.in_flight > 0;
        });
    }
}
