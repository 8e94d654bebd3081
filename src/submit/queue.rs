//! In-memory submission queue.
//!
//! Automatic reporting defers network traffic through jobs so posting an
//! invoice never blocks on the agency. The queue only tracks state; the
//! dispatcher drains it. Hosts wanting persistence can mirror jobs into
//! their own store via [`SubmissionQueue::jobs`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{JobId, SiiError};

/// Lifecycle of a submission job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    /// Waiting to be picked up.
    Queued,
    /// A drain pass is working on it.
    Started,
    /// The attempt produced an agency verdict.
    Done,
    /// The attempt produced no verdict; the result record has details.
    Failed,
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Queued => "queued",
            Self::Started => "started",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// One deferred submission for one invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionJob {
    pub id: JobId,
    /// Number of the invoice to submit.
    pub invoice_number: String,
    pub state: JobState,
    pub created_at: DateTime<Utc>,
    /// Drain passes that have picked this job up.
    pub attempts: u32,
    /// Failure detail of the last attempt, if it failed.
    pub last_error: Option<String>,
}

/// FIFO queue of submission jobs.
#[derive(Debug, Clone, Default)]
pub struct SubmissionQueue {
    jobs: Vec<SubmissionJob>,
    next_id: u64,
}

impl SubmissionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a submission for an invoice and return the job id.
    pub fn enqueue(&mut self, invoice_number: impl Into<String>) -> JobId {
        self.next_id += 1;
        let id = JobId(self.next_id);
        let invoice_number = invoice_number.into();
        debug!(%id, invoice = %invoice_number, "submission queued");
        self.jobs.push(SubmissionJob {
            id,
            invoice_number,
            state: JobState::Queued,
            created_at: Utc::now(),
            attempts: 0,
            last_error: None,
        });
        id
    }

    /// All jobs, oldest first.
    pub fn jobs(&self) -> &[SubmissionJob] {
        &self.jobs
    }

    /// Look up one job.
    pub fn job(&self, id: JobId) -> Option<&SubmissionJob> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Ids of jobs still waiting to be picked up, oldest first.
    pub fn queued_ids(&self) -> Vec<JobId> {
        self.jobs
            .iter()
            .filter(|j| j.state == JobState::Queued)
            .map(|j| j.id)
            .collect()
    }

    /// True when any of `ids` is currently being worked on.
    pub fn any_started(&self, ids: &[JobId]) -> bool {
        self.jobs
            .iter()
            .any(|j| j.state == JobState::Started && ids.contains(&j.id))
    }

    /// Move a job to a new state.
    pub fn set_state(&mut self, id: JobId, state: JobState) -> Result<(), SiiError> {
        let job = self
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| SiiError::Workflow(format!("unknown job {id}")))?;
        debug!(%id, from = %job.state, to = %state, "job state change");
        job.state = state;
        Ok(())
    }

    pub(crate) fn job_mut(&mut self, id: JobId) -> Option<&mut SubmissionJob> {
        self.jobs.iter_mut().find(|j| j.id == id)
    }
}
