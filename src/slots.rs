use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::AbortHandle;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
#[error("request superseded by a newer request on slot {0}")]
pub struct Superseded(pub String);

/// In-flight work keyed by caller-chosen slot; the newest request wins.
#[derive(Clone, Default)]
pub struct RequestSlots {
    tasks: Arc<DashMap<String, (Uuid, AbortHandle)>>,
}

impl RequestSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `work` on `slot`, aborting whatever was running there before.
    ///
    /// Returns [`Superseded`] if a later call on the same slot aborted this one.
    pub async fn run<F, T>(&self, slot: &str, work: F) -> Result<T, Superseded>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let id = Uuid::new_v4();
        let handle = tokio::spawn(work);

        if let Some((previous_id, previous)) = self
            .tasks
            .insert(slot.to_string(), (id, handle.abort_handle()))
        {
            debug!("Slot {}: {} supersedes {}", slot, id, previous_id);
            previous.abort();
        }

        let guard = SlotGuard {
            tasks: &self.tasks,
            slot,
            id,
            task: handle.abort_handle(),
        };
        let outcome = handle.await;
        drop(guard);

        match outcome {
            Ok(value) => Ok(value),
            Err(e) if e.is_cancelled() => Err(Superseded(slot.to_string())),
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }
}

/// Releases a slot entry when its caller finishes or is dropped mid-await.
struct SlotGuard<'a> {
    tasks: &'a DashMap<String, (Uuid, AbortHandle)>,
    slot: &'a str,
    id: Uuid,
    task: AbortHandle,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        // no-op once the task has finished
        self.task.abort();
        self.tasks
            .remove_if(self.slot, |_, (current, _)| *current == self.id);
    }
}
