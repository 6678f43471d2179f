//! Structured warning channel for recoverable data anomalies.
//!
//! A single bad line item must never block invoice submission, so the
//! pipeline defaults and keeps going — but every defaulting decision is
//! recorded here and returned to the caller.

/// What kind of anomaly was encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A line item has no tax template linked at all; classified zero-rated.
    MissingTaxTemplate,
    /// The item's stored tax-rate map could not be parsed.
    RateParse,
    /// A non-empty tax-template label matched no bucket rule.
    UnmappedTemplate,
    /// A non-empty customer PIN failed the KRA format check.
    CustomerPin,
}

/// One recorded anomaly.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// What the anomaly is about — a product code, template label, or PIN.
    pub context: String,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} [{}]: {}", self.kind, self.context, self.message)
    }
}

/// Ordered collection of diagnostics gathered over one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        kind: DiagnosticKind,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.entries.push(Diagnostic {
            kind,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry of the given kind was recorded.
    pub fn contains_kind(&self, kind: DiagnosticKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_query() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());

        diags.push(DiagnosticKind::RateParse, "ITM-001", "unparseable rate map");
        assert_eq!(diags.len(), 1);
        assert!(diags.contains_kind(DiagnosticKind::RateParse));
        assert!(!diags.contains_kind(DiagnosticKind::CustomerPin));
    }

    #[test]
    fn display_names_context() {
        let mut diags = Diagnostics::new();
        diags.push(DiagnosticKind::UnmappedTemplate, "VAT 99%", "no rule matched");
        let text = diags.iter().next().unwrap().to_string();
        assert!(text.contains("VAT 99%"));
    }
}
