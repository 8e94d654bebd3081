//! Posting workflow and batch submission.

use tracing::{debug, info, warn};

use crate::core::{
    Invoice, InvoiceSeries, InvoiceState, JobId, SiiConfig, SiiError, SubmissionMethod,
    SubmissionResult,
};
use crate::payload::{CommunicationType, build_batch_header, build_invoice_record};

use super::queue::{JobState, SubmissionQueue};
use super::transport::{SiiResponse, SiiTransport, SubmissionRequest};

/// What the caller should do after posting an invoice.
///
/// Posting itself never performs network traffic; reporting is either
/// deferred to the queue or handed back to the caller as a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    /// A queue job was created; drain the queue when convenient.
    Queued(JobId),
    /// Inline reporting is configured; call `send_batch` now.
    SubmitNow,
    /// Reporting is disabled or manual; nothing to do.
    NoSubmission,
}

/// Drives invoices through posting, queueing and submission, and records
/// one result per invoice per attempt.
pub struct SiiDispatcher<T> {
    config: SiiConfig,
    transport: T,
    queue: SubmissionQueue,
    series: Option<InvoiceSeries>,
}

impl<T: SiiTransport> SiiDispatcher<T> {
    pub fn new(config: SiiConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            queue: SubmissionQueue::new(),
            series: None,
        }
    }

    /// Assign numbers to unnumbered drafts from this series on posting.
    pub fn with_series(mut self, series: InvoiceSeries) -> Self {
        self.series = Some(series);
        self
    }

    pub fn config(&self) -> &SiiConfig {
        &self.config
    }

    pub fn queue(&self) -> &SubmissionQueue {
        &self.queue
    }

    /// Mutable queue access, for hosts that manage job states themselves.
    pub fn queue_mut(&mut self) -> &mut SubmissionQueue {
        &mut self.queue
    }

    /// Post a draft invoice: assign a number if needed, open it, and
    /// queue it for reporting when automatic submission is configured.
    pub fn post_invoice(&mut self, invoice: &mut Invoice) -> Result<PostAction, SiiError> {
        if invoice.state != InvoiceState::Draft {
            return Err(SiiError::Workflow(format!(
                "only draft invoices can be posted; '{}' is {}",
                invoice.number, invoice.state
            )));
        }

        if invoice.number.is_empty() {
            let series = self.series.as_mut().ok_or_else(|| {
                SiiError::Workflow("invoice has no number and no series is configured".into())
            })?;
            invoice.number = series.next_number(invoice.issue_date);
        }
        invoice.state = InvoiceState::Open;

        if !self.config.enabled || self.config.method == SubmissionMethod::Manual {
            debug!(invoice = %invoice.number, "posted without reporting");
            return Ok(PostAction::NoSubmission);
        }

        if self.config.use_queue {
            let id = self.queue.enqueue(&invoice.number);
            invoice.sii.jobs.push(id);
            info!(invoice = %invoice.number, job = %id, "queued for reporting");
            Ok(PostAction::Queued(id))
        } else {
            Ok(PostAction::SubmitNow)
        }
    }

    /// Cancel an invoice, unless a submission job is mid-flight for it.
    ///
    /// A started job means the registro may already be on its way to the
    /// agency; cancelling underneath it would let the books and the
    /// register drift apart.
    pub fn cancel_invoice(&mut self, invoice: &mut Invoice) -> Result<(), SiiError> {
        if self.queue.any_started(&invoice.sii.jobs) {
            return Err(SiiError::Workflow(format!(
                "invoice '{}' has a submission job in progress and cannot be cancelled",
                invoice.number
            )));
        }
        invoice.state = InvoiceState::Cancelled;
        Ok(())
    }

    /// Submit each invoice and record one result on it, whatever the
    /// outcome. A failure for one invoice never stops the rest.
    pub async fn send_batch(&self, invoices: &mut [Invoice]) {
        for invoice in invoices.iter_mut() {
            self.send_one(invoice).await;
        }
    }

    /// Drain queued jobs, submitting the matching invoice for each.
    pub async fn process_queue(&mut self, invoices: &mut [Invoice]) {
        for id in self.queue.queued_ids() {
            let Some(number) = self.queue.job(id).map(|j| j.invoice_number.clone()) else {
                continue;
            };
            if let Some(job) = self.queue.job_mut(id) {
                job.state = JobState::Started;
                job.attempts += 1;
            }

            let Some(index) = invoices.iter().position(|i| i.number == number) else {
                warn!(job = %id, invoice = %number, "queued invoice no longer exists");
                if let Some(job) = self.queue.job_mut(id) {
                    job.state = JobState::Failed;
                    job.last_error = Some("invoice no longer exists".into());
                }
                continue;
            };

            self.send_one(&mut invoices[index]).await;

            let verdict = invoices[index].sii.results.last().cloned();
            if let Some(job) = self.queue.job_mut(id) {
                match verdict {
                    Some(result) if result.state.is_some() => {
                        job.state = JobState::Done;
                        job.last_error = None;
                    }
                    Some(result) => {
                        job.state = JobState::Failed;
                        job.last_error = result.message;
                    }
                    None => {
                        job.state = JobState::Failed;
                        job.last_error = Some("no result recorded".into());
                    }
                }
            }
        }
    }

    async fn send_one(&self, invoice: &mut Invoice) {
        let result = match self.submit(invoice).await {
            Ok(response) => match response.state {
                Some(state) if state.is_accepted() => {
                    invoice.sii.sent = true;
                    invoice.sii.csv = response.csv.clone();
                    info!(
                        invoice = %invoice.series_number(),
                        state = state.code(),
                        csv = response.csv.as_deref().unwrap_or(""),
                        "registro accepted"
                    );
                    SubmissionResult::accepted(state, response.csv)
                }
                Some(state) => {
                    invoice.sii.sent = false;
                    let (code, description) = response.first_error();
                    warn!(
                        invoice = %invoice.series_number(),
                        code = code.unwrap_or(0),
                        "registro rejected"
                    );
                    SubmissionResult::rejected(state, code, description)
                }
                None => {
                    warn!(invoice = %invoice.series_number(), "response carried no verdict");
                    SubmissionResult::failure("response carried no verdict")
                }
            },
            Err(message) => {
                warn!(invoice = %invoice.series_number(), error = %message, "submission failed");
                SubmissionResult::failure(message)
            }
        };
        invoice.sii.results.push(result);
    }

    async fn submit(&self, invoice: &Invoice) -> Result<SiiResponse, String> {
        let record = build_invoice_record(invoice, &self.config).map_err(|e| e.to_string())?;
        let header = build_batch_header(&self.config, CommunicationType::Registration)
            .map_err(|e| e.to_string())?;
        let request = SubmissionRequest {
            side: invoice.side,
            environment: self.config.environment,
            header,
            records: vec![record],
        };
        self.transport
            .send(&request)
            .await
            .map_err(|e| e.to_string())
    }
}
