use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;

use super::events::JobEvent;
use super::pipeline::{BatchPipeline, JobOutcome};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobError {
    #[error("a batch job is already running")]
    AlreadyRunning,
}

/// Cooperative cancellation flag, polled once per chunk.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Admits at most one running batch job.
#[derive(Debug, Clone, Default)]
pub struct JobSlot(Arc<AtomicBool>);

impl JobSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn try_acquire(&self) -> Result<SlotGuard, JobError> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| SlotGuard(Arc::clone(&self.0)))
            .map_err(|_| JobError::AlreadyRunning)
    }
}

/// Frees the slot when dropped.
struct SlotGuard(Arc<AtomicBool>);

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// A batch job running on a background task.
pub struct JobHandle {
    cancel: CancelFlag,
    events: UnboundedReceiver<JobEvent>,
    task: JoinHandle<()>,
}

impl JobHandle {
    /// Requests cancellation. Takes effect at the next chunk boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Next event from the job; `None` once the job has finished and all
    /// events were received.
    pub async fn recv(&mut self) -> Option<JobEvent> {
        self.events.recv().await
    }

    /// Waits for the background task to exit.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "batch job task panicked");
        }
    }
}

pub struct BatchJob;

impl BatchJob {
    /// Starts `pipeline` on a background task.
    ///
    /// Fails with [`JobError::AlreadyRunning`] while another job holds
    /// `slot`. The job always ends with exactly one terminal event
    /// (`Completed`, `Cancelled` or `Failed`); the slot is released before
    /// that event is sent.
    pub fn spawn(
        pipeline: BatchPipeline,
        input: PathBuf,
        output: PathBuf,
        slot: &JobSlot,
    ) -> Result<JobHandle, JobError> {
        let guard = slot.try_acquire()?;
        let cancel = CancelFlag::new();
        let (tx, rx) = mpsc::unbounded_channel();

        let task_cancel = cancel.clone();
        let task = tokio::spawn(async move {
            let result = pipeline.run(&input, &output, &task_cancel, &tx).await;

            let event = match result {
                Ok(JobOutcome::Completed(report)) => JobEvent::Completed(report),
                Ok(JobOutcome::Cancelled) => JobEvent::Cancelled,
                Err(e) => {
                    tracing::error!(error = %format!("{e:#}"), "batch job failed");
                    JobEvent::Failed(format!("{e:#}"))
                }
            };

            drop(guard);
            let _ = tx.send(event);
        });

        Ok(JobHandle {
            cancel,
            events: rx,
            task,
        })
    }
}
