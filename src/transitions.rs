// Transitions: the two delayed, cosmetic effects of the task list
// - the "just created" highlight is cleared after a short delay
// - a task marked "deleting" is removed for good after a short delay
//
// Each pending effect is a tokio task keyed by (task id, kind). Scheduling the
// same key again cancels the older timer, and scheduling a removal cancels the
// task's pending highlight clear. A timer that fires for a task that is
// already gone does nothing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::models::TaskId;
use crate::store::SharedStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    ClearNewFlag,
    Remove,
}

struct Pending {
    generation: u64,
    token: CancellationToken,
}

#[derive(Default)]
struct PendingTable {
    nextGeneration: u64,
    entries: HashMap<(TaskId, TransitionKind), Pending>,
}

pub struct Transitions {
    store: SharedStore,
    newFlagDelay: Duration,
    removalDelay: Duration,
    pending: Arc<Mutex<PendingTable>>,
}

impl Transitions {
    pub fn new(store: SharedStore, newFlagDelay: Duration, removalDelay: Duration) -> Self {
        Self {
            store,
            newFlagDelay,
            removalDelay,
            pending: Arc::new(Mutex::new(PendingTable::default())),
        }
    }

    /// Clear the "just created" flag of `id` once the highlight delay elapses
    pub fn scheduleNewFlagClear(&self, id: TaskId) {
        self.schedule(id, TransitionKind::ClearNewFlag, self.newFlagDelay);
    }

    /// Remove `id` from the store once the delete delay elapses
    pub fn scheduleRemoval(&self, id: TaskId) {
        self.cancel(id, TransitionKind::ClearNewFlag);
        self.schedule(id, TransitionKind::Remove, self.removalDelay);
    }

    pub fn isPending(&self, id: TaskId, kind: TransitionKind) -> bool {
        self.pending.lock().entries.contains_key(&(id, kind))
    }

    pub fn pendingCount(&self) -> usize {
        self.pending.lock().entries.len()
    }

    pub fn cancel(&self, id: TaskId, kind: TransitionKind) -> bool {
        match self.pending.lock().entries.remove(&(id, kind)) {
            Some(previous) => {
                previous.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel every pending timer (shutdown)
    pub fn cancelAll(&self) {
        let mut table = self.pending.lock();
        let count = table.entries.len();
        for (_, pending) in table.entries.drain() {
            pending.token.cancel();
        }
        if count > 0 {
            debug!(count, "cancelled pending transitions");
        }
    }

    /// Must be called from within a tokio runtime
    fn schedule(&self, id: TaskId, kind: TransitionKind, delay: Duration) {
        let token = CancellationToken::new();
        let generation = {
            let mut table = self.pending.lock();
            table.nextGeneration += 1;
            let generation = table.nextGeneration;
            let previous = table.entries.insert(
                (id, kind),
                Pending {
                    generation,
                    token: token.clone(),
                },
            );
            if let Some(previous) = previous {
                previous.token.cancel();
                debug!(id, ?kind, "superseded pending transition");
            }
            generation
        };

        let store = self.store.clone();
        let pending = self.pending.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }

            {
                let mut table = pending.lock();
                let current = table
                    .entries
                    .get(&(id, kind))
                    .map(|p| p.generation == generation)
                    .unwrap_or(false);
                if !current {
                    return;
                }
                table.entries.remove(&(id, kind));
            }

            let mut store = store.write();
            match kind {
                TransitionKind::ClearNewFlag => {
                    store.clearNewFlag(id);
                }
                TransitionKind::Remove => {
                    if store.remove(id).is_none() {
                        debug!(id, "removal fired for a task that is already gone");
                    }
                }
            }
        });
    }
}
