mod affiliation;
mod xml_lookup;

pub use affiliation::{EmailFinder, IndustryAuthors, IndustryClassifier, INDUSTRY_KEYWORDS};

use paper_types::{
    Diagnostic, DiagnosticSink, EmailSource, ExtractionError, Extractor, MissingFieldWarning,
    PaperRecord, RecordField, NOT_AVAILABLE,
};
use regex::Regex;
use roxmltree::{Document, Node, ParsingOptions};
use xml_lookup::{descendants_named, element_text, find_child, find_descendant};

const ARTICLE_TAG: &str = "PubmedArticle";
const UNKNOWN_AUTHOR: &str = "Unknown";
const NO_AFFILIATION: &str = "None";

/// Extracts one [`PaperRecord`] per `PubmedArticle` from an `efetch` XML batch
pub struct PubMedXmlExtractor {
    classifier: IndustryClassifier,
    email_finder: EmailFinder,
    year_regex: Regex,
}

impl PubMedXmlExtractor {
    pub fn new() -> Self {
        Self {
            classifier: IndustryClassifier::new(),
            email_finder: EmailFinder::new(),
            year_regex: Regex::new(r"\d{4}").unwrap(),
        }
    }

    fn extract_article(
        &self,
        article: Node,
        position: usize,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> PaperRecord {
        let pubmed_id = find_descendant(article, "PMID").and_then(element_text);
        let title = find_descendant(article, "ArticleTitle").and_then(element_text);
        let publication_date = self.publication_year(article);

        let id_label = pubmed_id
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        for (field, value) in [
            (RecordField::PubmedId, &pubmed_id),
            (RecordField::Title, &title),
            (RecordField::PublicationDate, &publication_date),
        ] {
            if value.is_none() {
                diagnostics.emit(Diagnostic::MissingField(MissingFieldWarning {
                    field,
                    pubmed_id: id_label.clone(),
                    position,
                }));
            }
        }

        let authors: Vec<Node> = descendants_named(article, "Author").collect();
        let mut industry = IndustryAuthors::default();

        for author in &authors {
            let last_name = find_child(*author, "LastName")
                .and_then(element_text)
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
            let affiliation = find_descendant(*author, "Affiliation")
                .and_then(element_text)
                .unwrap_or_else(|| NO_AFFILIATION.to_string());
            let matched_keyword = self
                .classifier
                .matched_keyword(&affiliation)
                .map(str::to_string);
            let is_industry = matched_keyword.is_some();

            diagnostics.emit(Diagnostic::AuthorInspected {
                pubmed_id: id_label.clone(),
                last_name: last_name.clone(),
                affiliation: affiliation.clone(),
                matched_keyword,
            });

            if is_industry {
                industry.push(last_name, affiliation);
            }
        }

        let email = match self.corresponding_email(article, &authors) {
            Some((email, source)) => {
                diagnostics.emit(Diagnostic::EmailFound {
                    pubmed_id: id_label.clone(),
                    email: email.clone(),
                    source,
                });
                email
            }
            None => {
                diagnostics.emit(Diagnostic::EmailNotFound {
                    pubmed_id: id_label.clone(),
                });
                NOT_AVAILABLE.to_string()
            }
        };

        let (non_academic_authors, company_affiliations) = industry.into_columns();

        PaperRecord {
            pubmed_id: id_label,
            title: title.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            publication_date: publication_date.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            non_academic_authors,
            company_affiliations,
            corresponding_author_email: email,
        }
    }

    /// `PubDate/Year`, falling back to the first year inside `PubDate/MedlineDate`
    fn publication_year(&self, article: Node) -> Option<String> {
        let pub_dates: Vec<Node> = descendants_named(article, "PubDate").collect();

        pub_dates
            .iter()
            .find_map(|date| find_child(*date, "Year").and_then(element_text))
            .or_else(|| {
                pub_dates.iter().find_map(|date| {
                    let medline = find_child(*date, "MedlineDate").and_then(element_text)?;
                    self.year_regex
                        .find(&medline)
                        .map(|m| m.as_str().to_string())
                })
            })
    }

    /// Address embedded in any `AffiliationInfo/Affiliation` text, else the first author `Email`
    fn corresponding_email(&self, article: Node, authors: &[Node]) -> Option<(String, EmailSource)> {
        let from_affiliation = descendants_named(article, "AffiliationInfo")
            .flat_map(|info| info.children().filter(|n| n.has_tag_name("Affiliation")))
            .filter_map(element_text)
            .find_map(|text| self.email_finder.find_in(&text).map(str::to_string));

        if let Some(email) = from_affiliation {
            return Some((email, EmailSource::AffiliationText));
        }

        authors
            .iter()
            .filter_map(|author| find_child(*author, "Email"))
            .find_map(element_text)
            .map(|email| (email, EmailSource::AuthorEmail))
    }
}

impl Default for PubMedXmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for PubMedXmlExtractor {
    fn extract(
        &self,
        input: &str,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<Vec<PaperRecord>, ExtractionError> {
        // efetch output always starts with a DOCTYPE declaration
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let document = Document::parse_with_options(input, options)
            .map_err(|e| ExtractionError::ParseError(e.to_string()))?;

        let mut records = Vec::new();
        for (position, article) in document
            .descendants()
            .filter(|n| n.has_tag_name(ARTICLE_TAG))
            .enumerate()
        {
            records.push(self.extract_article(article, position, diagnostics));
        }

        Ok(records)
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}
