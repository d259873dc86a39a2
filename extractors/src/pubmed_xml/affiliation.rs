use regex::Regex;

/// Keywords that mark an affiliation as industry rather than academic.
///
/// Matched case-insensitively as substrings, so "Co" also hits "College" and "Computer".
/// Kept as-is so output stays comparable with earlier runs.
pub const INDUSTRY_KEYWORDS: [&str; 10] = [
    "Inc",
    "Ltd",
    "Pharma",
    "Biotech",
    "Corporation",
    "Company",
    "Industry",
    "Labs",
    "LLC",
    r"Co\.?",
];

const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,4}";

pub struct IndustryClassifier {
    regex: Regex,
}

impl IndustryClassifier {
    pub fn new() -> Self {
        let pattern = format!("(?i)({})", INDUSTRY_KEYWORDS.join("|"));
        Self {
            regex: Regex::new(&pattern).unwrap(),
        }
    }

    /// The keyword text that marks `affiliation` as industry, if any
    pub fn matched_keyword<'t>(&self, affiliation: &'t str) -> Option<&'t str> {
        self.regex.find(affiliation).map(|m| m.as_str())
    }
}

impl Default for IndustryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

pub struct EmailFinder {
    regex: Regex,
}

impl EmailFinder {
    pub fn new() -> Self {
        Self {
            regex: Regex::new(EMAIL_PATTERN).unwrap(),
        }
    }

    /// First email-looking substring of `text`
    pub fn find_in<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex.find(text).map(|m| m.as_str())
    }
}

impl Default for EmailFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Industry-affiliated authors of one article, as two parallel lists.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IndustryAuthors {
    last_names: Vec<String>,
    affiliations: Vec<String>,
}

impl IndustryAuthors {
    pub fn push(&mut self, last_name: String, affiliation: String) {
        self.last_names.push(last_name);
        self.affiliations.push(affiliation);
    }

    pub fn is_empty(&self) -> bool {
        self.last_names.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.last_names.len()
    }

    #[cfg(test)]
    pub(crate) fn last_names(&self) -> &[String] {
        &self.last_names
    }

    #[cfg(test)]
    pub(crate) fn affiliations(&self) -> &[String] {
        &self.affiliations
    }

    /// Joined `(authors, affiliations)` columns, "N/A" for both when empty
    pub fn into_columns(self) -> (String, String) {
        if self.is_empty() {
            return (
                paper_types::NOT_AVAILABLE.to_string(),
                paper_types::NOT_AVAILABLE.to_string(),
            );
        }

        (self.last_names.join(", "), self.affiliations.join(", "))
    }
}
