use thiserror::Error;

/// Errors that can occur during payload construction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FiscalError {
    /// One or more validation checks failed under hard enforcement.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The invoice has no line items to fiscalize.
    #[error("invoice '{0}' has no line items")]
    EmptyInvoice(String),

    /// A refund could not resolve the original sale's authority
    /// confirmation code (CUIN).
    #[error("no recorded confirmation for refund of invoice '{0}'")]
    MissingConfirmation(String),
}

/// A single validation issue with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dot-separated path to the offending field (e.g. "data[2].quantity").
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
