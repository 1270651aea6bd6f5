//! Audit Worker Pool
//!
//! Moves API call records off the request path. Requests hand records to a
//! bounded queue; a fixed set of tokio tasks drains it into the repository.
//!
//! Submission never waits: a full queue drops the record. Failed writes are
//! logged and not retried.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::AuditSettings;
use crate::domain::{ApiCallRecord, ApiCallRepository};
use crate::infrastructure::metrics::{
    AUDIT_RECORDS_DROPPED, AUDIT_RECORDS_PERSISTED, AUDIT_WRITE_FAILURES,
};

/// Sending half of the audit queue. Cheap to clone.
#[derive(Clone)]
pub struct AuditQueue {
    sender: mpsc::Sender<ApiCallRecord>,
}

/// Receiving half, shared by all workers.
pub type AuditReceiver = Arc<Mutex<mpsc::Receiver<ApiCallRecord>>>;

impl AuditQueue {
    /// Bounded queue with no workers attached.
    pub fn channel(capacity: usize) -> (Self, AuditReceiver) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, Arc::new(Mutex::new(receiver)))
    }

    /// Queue plus `settings.workers` workers writing to `repo`.
    pub fn start(
        repo: Arc<dyn ApiCallRepository>,
        settings: &AuditSettings,
    ) -> (Self, AuditWorkers) {
        let (queue, receiver) = Self::channel(settings.queue_capacity);
        let workers = AuditWorkers::spawn(receiver, repo, settings.workers);
        (queue, workers)
    }

    /// Enqueue without waiting. Returns false when the record was dropped.
    pub fn submit(&self, record: ApiCallRecord) -> bool {
        match self.sender.try_send(record) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(record)) => {
                AUDIT_RECORDS_DROPPED.inc();
                warn!(
                    endpoint = %record.api_endpoint,
                    method = %record.http_method,
                    "Audit queue full, dropping API call record"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                AUDIT_RECORDS_DROPPED.inc();
                warn!("Audit queue closed, dropping API call record");
                false
            }
        }
    }
}

/// Handle to the running workers.
pub struct AuditWorkers {
    handles: Vec<JoinHandle<()>>,
}

impl AuditWorkers {
    pub fn spawn(
        receiver: AuditReceiver,
        repo: Arc<dyn ApiCallRepository>,
        workers: usize,
    ) -> Self {
        let handles = (0..workers.max(1))
            .map(|id| {
                let receiver = receiver.clone();
                let repo = repo.clone();
                tokio::spawn(run_worker(id, receiver, repo))
            })
            .collect();

        info!(workers, "Audit workers started");
        Self { handles }
    }

    /// Wait for every worker to exit. Workers exit once all queue senders are
    /// dropped and the queue is drained.
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Audit worker panicked");
            }
        }
    }
}

async fn run_worker(id: usize, receiver: AuditReceiver, repo: Arc<dyn ApiCallRepository>) {
    loop {
        // Hold the lock only while waiting for the next record.
        let next = receiver.lock().await.recv().await;
        let Some(record) = next else {
            break;
        };

        match repo.insert(&record).await {
            Ok(()) => {
                AUDIT_RECORDS_PERSISTED.inc();
                debug!(worker = id, record_id = %record.id, "API call record saved");
            }
            Err(e) => {
                AUDIT_WRITE_FAILURES.inc();
                error!(
                    worker = id,
                    endpoint = %record.api_endpoint,
                    error = %e,
                    "Failed to save API call record"
                );
            }
        }
    }

    debug!(worker = id, "Audit worker stopped");
}
