use thiserror::Error;

/// Errors that can occur while preparing invoices or reporting them to
/// the tax agency.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SiiError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// A settlement period code could not be interpreted.
    #[error("period error: {0}")]
    Period(String),

    /// An invoice state transition was rejected.
    #[error("workflow error: {0}")]
    Workflow(String),

    /// XML generation or parsing error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "counterparty.tax_id").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Schema element the rule guards if applicable (e.g. "NumSerieFacturaEmisor").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a schema element reference.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error tied to a schema element.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}
