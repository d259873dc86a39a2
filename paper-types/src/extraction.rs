use crate::PaperRecord;
use std::fmt;

/// Core trait that all document-batch extractors must implement
pub trait Extractor {
    /// Parse a raw document batch into records, reporting diagnostics to `diagnostics`
    fn extract(
        &self,
        input: &str,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<Vec<PaperRecord>, ExtractionError>;

    /// Get extractor version for tracking
    fn version(&self) -> String {
        "1.0.0".to_string()
    }
}

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Scalar fields that are looked up per document and defaulted when absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    PubmedId,
    Title,
    PublicationDate,
}

impl RecordField {
    pub fn header(&self) -> &'static str {
        match self {
            RecordField::PubmedId => PaperRecord::HEADERS[0],
            RecordField::Title => PaperRecord::HEADERS[1],
            RecordField::PublicationDate => PaperRecord::HEADERS[2],
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// A required scalar field was absent on one document and has been defaulted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFieldWarning {
    pub field: RecordField,
    /// Identifier of the affected document, "N/A" when the identifier itself is missing
    pub pubmed_id: String,
    /// Position of the document within the batch
    pub position: usize,
}

impl fmt::Display for MissingFieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Missing {} for article #{} (PubMed ID {})",
            self.field, self.position, self.pubmed_id
        )
    }
}

/// Where the corresponding author email was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailSource {
    AffiliationText,
    AuthorEmail,
}

/// Structured diagnostic events produced while fetching and extracting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    IdentifiersRetrieved {
        ids: Vec<String>,
    },
    AuthorInspected {
        pubmed_id: String,
        last_name: String,
        affiliation: String,
        /// Industry keyword found in the affiliation; `None` for academic affiliations
        matched_keyword: Option<String>,
    },
    EmailFound {
        pubmed_id: String,
        email: String,
        source: EmailSource,
    },
    EmailNotFound {
        pubmed_id: String,
    },
    MissingField(MissingFieldWarning),
}

impl Diagnostic {
    pub fn is_warning(&self) -> bool {
        matches!(self, Diagnostic::MissingField(_))
    }
}

/// Receiver for diagnostics; keeps extraction logic free of direct I/O
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
