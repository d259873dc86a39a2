use paper_types::{Diagnostic, DiagnosticSink, EmailSource};

/// Forwards extraction diagnostics to `tracing`.
///
/// Missing-field warnings are logged at WARN; everything else is DEBUG detail that only
/// shows up when the subscriber is configured for verbose output.
#[derive(Debug, Default)]
pub struct TracingSink {
    warnings: usize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }
}

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_warning() {
            self.warnings += 1;
        }

        match diagnostic {
            Diagnostic::IdentifiersRetrieved { ids } => {
                tracing::debug!(count = ids.len(), ?ids, "Retrieved PubMed IDs");
            }
            Diagnostic::AuthorInspected {
                pubmed_id,
                last_name,
                affiliation,
                matched_keyword,
            } => {
                tracing::debug!(
                    %pubmed_id,
                    %last_name,
                    %affiliation,
                    industry = matched_keyword.is_some(),
                    matched_keyword = matched_keyword.as_deref().unwrap_or(""),
                    "Inspected author affiliation"
                );
            }
            Diagnostic::EmailFound {
                pubmed_id,
                email,
                source,
            } => {
                let source = match source {
                    EmailSource::AffiliationText => "affiliation text",
                    EmailSource::AuthorEmail => "author email element",
                };
                tracing::debug!(%pubmed_id, %email, source, "Found corresponding author email");
            }
            Diagnostic::EmailNotFound { pubmed_id } => {
                tracing::debug!(%pubmed_id, "No corresponding author email");
            }
            Diagnostic::MissingField(warning) => {
                tracing::warn!(
                    field = %warning.field,
                    pubmed_id = %warning.pubmed_id,
                    position = warning.position,
                    "{}",
                    warning
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paper_types::{MissingFieldWarning, RecordField};

    #[test]
    fn test_counts_only_warnings() {
        let mut sink = TracingSink::new();
        sink.emit(Diagnostic::IdentifiersRetrieved {
            ids: vec!["1".to_string()],
        });
        sink.emit(Diagnostic::MissingField(MissingFieldWarning {
            field: RecordField::Title,
            pubmed_id: "1".to_string(),
            position: 0,
        }));
        sink.emit(Diagnostic::EmailNotFound {
            pubmed_id: "1".to_string(),
        });

        assert_eq!(sink.warning_count(), 1);
    }
}
