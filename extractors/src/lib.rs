//! Extractors Crate
//!
//! This crate turns raw PubMed E-utilities document batches into flat
//! [`PaperRecord`](paper_types::PaperRecord) rows.
//!
//! # Architecture
//!
//! - **Types**: Records, traits and diagnostics are defined in the `paper-types` crate
//! - **Implementations**: Concrete extractors and heuristics are implemented in this crate
//!
//! # Available Extractors
//!
//! - `PubMedXmlExtractor`: Extracts bibliographic fields, industry-affiliated authors
//!   and a corresponding author email from `efetch` XML
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::{PubMedXmlExtractor, TracingSink};
//! use paper_types::Extractor;
//!
//! let extractor = PubMedXmlExtractor::new();
//! let records = extractor.extract(&xml, &mut TracingSink::default())?;
//! ```

pub mod diagnostics;
pub mod pubmed_xml;

// Re-export commonly used types
pub use diagnostics::TracingSink;
pub use pubmed_xml::{EmailFinder, IndustryAuthors, IndustryClassifier, PubMedXmlExtractor};

// Re-export the Extractor trait from paper-types for convenience
pub use paper_types::Extractor;
