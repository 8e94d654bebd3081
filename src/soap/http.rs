use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::submit::{SiiResponse, SiiTransport, SubmissionRequest, TransportError};

use super::{build_submission_envelope, endpoint_for, parse_submission_response};

/// [`SiiTransport`] that posts envelopes to the agency over HTTPS.
///
/// The agency authenticates callers by client certificate; build the
/// transport with [`HttpTransport::with_identity_pem`] for anything beyond
/// local experiments.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Transport without a client certificate.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    /// Transport authenticating with the given PEM bundle (certificate plus
    /// private key).
    pub fn with_identity_pem(pem: &[u8]) -> Result<Self, TransportError> {
        let identity = reqwest::Identity::from_pem(pem)
            .map_err(|e| TransportError::Network(format!("client certificate: {e}")))?;
        let client = reqwest::Client::builder()
            .identity(identity)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SiiTransport for HttpTransport {
    async fn send(&self, request: &SubmissionRequest) -> Result<SiiResponse, TransportError> {
        let endpoint = endpoint_for(request.side, request.environment, request.header.version);
        let envelope = build_submission_envelope(&request.header, &request.records, request.side)
            .map_err(|e| TransportError::Envelope(e.to_string()))?;

        debug!(
            url = endpoint.url.as_str(),
            operation = endpoint.operation,
            records = request.records.len(),
            "posting supply batch"
        );

        let resp = self
            .client
            .post(endpoint.url.as_str())
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", "")
            .body(envelope)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            // Faults ride on non-2xx statuses with a fault body.
            return match parse_submission_response(&body) {
                Err(TransportError::Fault(f)) => Err(TransportError::Fault(f)),
                _ => Err(TransportError::Network(format!("HTTP {status}"))),
            };
        }
        parse_submission_response(&body)
    }
}
