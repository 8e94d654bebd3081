//! Transport seam between the dispatcher and the agency's web service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{Environment, InvoiceSide, SubmissionState};
use crate::payload::{BatchHeader, InvoiceRecord};

/// Everything one supply call needs: where it goes and what it carries.
///
/// The concrete endpoint (WSDL, port, operation, URL) is derived from
/// the side, environment and header version by the transport; canned
/// transports used in tests ignore it entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    /// Which register book the records belong to.
    pub side: InvoiceSide,
    /// Production or testing.
    pub environment: Environment,
    /// `Cabecera`.
    pub header: BatchHeader,
    /// The registros of the batch.
    pub records: Vec<InvoiceRecord>,
}

/// Parsed agency response to a supply call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiiResponse {
    /// `EstadoEnvio`; `None` when the response carried no verdict.
    pub state: Option<SubmissionState>,
    /// Batch-level secure verification code.
    pub csv: Option<String>,
    /// One `RespuestaLinea` per registro sent.
    pub lines: Vec<LineResponse>,
}

impl SiiResponse {
    /// True when the agency registered the batch.
    pub fn is_accepted(&self) -> bool {
        self.state.is_some_and(|s| s.is_accepted())
    }

    /// Error code and description of the first rejected line, if any.
    pub fn first_error(&self) -> (Option<u32>, Option<String>) {
        self.lines
            .iter()
            .find(|l| l.error_code.is_some())
            .map(|l| (l.error_code, l.error_description.clone()))
            .unwrap_or((None, None))
    }
}

/// One `RespuestaLinea`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineResponse {
    /// `EstadoRegistro` for this registro.
    pub register_state: Option<RegisterState>,
    /// `CodigoErrorRegistro`.
    pub error_code: Option<u32>,
    /// `DescripcionErrorRegistro`.
    pub error_description: Option<String>,
}

/// Per-registro verdict (`EstadoRegistro`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegisterState {
    /// The registro is on file.
    Accepted,
    /// On file, but carrying errors the titular should amend.
    AcceptedWithErrors,
    /// Not registered.
    Rejected,
}

impl RegisterState {
    /// Schema code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Accepted => "Correcto",
            Self::AcceptedWithErrors => "AceptadoConErrores",
            Self::Rejected => "Incorrecto",
        }
    }

    /// Parse from the schema code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Correcto" => Some(Self::Accepted),
            "AceptadoConErrores" => Some(Self::AcceptedWithErrors),
            "Incorrecto" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Error from the transport layer.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum TransportError {
    /// Network or HTTP error.
    Network(String),
    /// The request envelope could not be generated.
    Envelope(String),
    /// The service answered with a SOAP fault.
    Fault(String),
    /// Failed to parse the response.
    ParseError(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "SII network error: {e}"),
            Self::Envelope(e) => write!(f, "SII envelope error: {e}"),
            Self::Fault(e) => write!(f, "SII service fault: {e}"),
            Self::ParseError(e) => write!(f, "SII parse error: {e}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// How submission requests reach the agency.
///
/// The HTTP implementation lives behind the `soap` feature; tests use
/// canned implementations that answer without touching the network.
#[async_trait]
pub trait SiiTransport: Send + Sync {
    /// Submit one batch of registros and return the parsed response.
    async fn send(&self, request: &SubmissionRequest) -> Result<SiiResponse, TransportError>;
}
