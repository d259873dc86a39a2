use serde::{Deserialize, Serialize};

/// Sentinel written to any column that could not be derived from the source document
pub const NOT_AVAILABLE: &str = "N/A";

/// One output row, one per PubMed article.
///
/// Field order is the column order of the tabular output; the serde names are the header names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Publication Date")]
    pub publication_date: String,
    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_author_email: String,
}

impl PaperRecord {
    pub const HEADERS: [&'static str; 6] = [
        "PubmedID",
        "Title",
        "Publication Date",
        "Non-academic Author(s)",
        "Company Affiliation(s)",
        "Corresponding Author Email",
    ];
}

impl Default for PaperRecord {
    fn default() -> Self {
        Self {
            pubmed_id: NOT_AVAILABLE.to_string(),
            title: NOT_AVAILABLE.to_string(),
            publication_date: NOT_AVAILABLE.to_string(),
            non_academic_authors: NOT_AVAILABLE.to_string(),
            company_affiliations: NOT_AVAILABLE.to_string(),
            corresponding_author_email: NOT_AVAILABLE.to_string(),
        }
    }
}
