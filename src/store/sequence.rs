//! Request-sequence tokens.
//!
//! Every tracked call takes a ticket for its operation key. When it settles,
//! the response may touch the cache only if no newer ticket was issued for
//! the same key in the meantime.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Latest = Arc<Mutex<HashMap<String, u64>>>;

fn lock(latest: &Latest) -> MutexGuard<'_, HashMap<String, u64>> {
    latest.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Ticket for one issued call.
///
/// Dropping a ticket without settling it retires its key if it is still the
/// latest, so cancelled calls leave nothing behind.
#[derive(Debug)]
pub(crate) struct Ticket {
    key: String,
    seq: u64,
    latest: Latest,
}

impl Ticket {
    /// Settle the ticket. Returns `true` if it is still the latest for its key.
    ///
    /// Settling the latest ticket retires the key, so any older ticket that
    /// settles afterwards is stale as well.
    pub(crate) fn settle(self) -> bool {
        self.retire()
    }

    fn retire(&self) -> bool {
        let mut latest = lock(&self.latest);
        match latest.get(&self.key) {
            Some(&seq) if seq == self.seq => {
                latest.remove(&self.key);
                true
            }
            _ => false,
        }
    }
}

impl Drop for Ticket {
    fn drop(&mut self) {
        // no-op after settle: the key is gone or owned by a newer ticket
        self.retire();
    }
}

#[derive(Debug, Default)]
pub(crate) struct Sequencer {
    next: AtomicU64,
    latest: Latest,
}

impl Sequencer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket that supersedes every earlier ticket for `key`.
    pub(crate) fn issue(&self, key: impl Into<String>) -> Ticket {
        let key = key.into();
        let seq = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        lock(&self.latest).insert(key.clone(), seq);
        Ticket {
            key,
            seq,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Number of keys with an unsettled latest ticket.
    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        lock(&self.latest).len()
    }
}
