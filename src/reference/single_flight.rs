use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Per-key async locks collapsing concurrent cache misses into one fetch.
///
/// A caller holding the [`FlightGuard`] for a key is the only one fetching
/// it; everyone else queues on the same lock and re-checks the cache once
/// they get through. A slot is removed as soon as nobody holds or waits on
/// it, including waiters whose future was dropped while queued.
#[derive(Default)]
pub struct SingleFlight {
    slots: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

pub struct FlightGuard<'a> {
    // field order matters: the permit's slot reference goes first
    _permit: OwnedMutexGuard<()>,
    _release: SlotRelease<'a>,
}

/// Prunes the key's slot on drop if the table holds the only reference.
/// Created before queueing, so it also runs for cancelled waiters.
struct SlotRelease<'a> {
    flights: &'a SingleFlight,
    key: String,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: &str) -> FlightGuard<'_> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|poisoned| {
                tracing::error!("Single-flight table poisoned, recovering");
                poisoned.into_inner()
            });
            Arc::clone(slots.entry(key.to_string()).or_default())
        };

        let release = SlotRelease {
            flights: self,
            key: key.to_string(),
        };
        let permit = slot.lock_owned().await;

        FlightGuard {
            _permit: permit,
            _release: release,
        }
    }

    /// Number of keys with a fetch in progress or queued.
    pub fn in_flight(&self) -> usize {
        self.slots.lock().map_or(0, |slots| slots.len())
    }
}

impl Drop for SlotRelease<'_> {
    fn drop(&mut self) {
        let Ok(mut slots) = self.flights.slots.lock() else {
            return;
        };
        // clones are only taken under this lock, so a count of 1 is final
        if slots
            .get(&self.key)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            slots.remove(&self.key);
        }
    }
}
