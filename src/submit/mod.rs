//! Submission workflow: transport seam, job queue and dispatcher.
//!
//! The dispatcher owns the posting and cancellation rules, routes
//! automatic reporting through the in-memory queue, and appends exactly
//! one [`crate::core::SubmissionResult`] per invoice per attempt. The
//! agency is reached through the [`SiiTransport`] trait so tests can
//! answer with canned responses.

mod dispatcher;
mod queue;
mod transport;

pub use dispatcher::*;
pub use queue::*;
pub use transport::*;
