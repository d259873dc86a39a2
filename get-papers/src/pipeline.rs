use paper_types::{
    Diagnostic, DiagnosticSink, ExtractionError, Extractor, NetworkError, PaperRecord,
    PaperSource,
};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Parse(#[from] ExtractionError),
}

/// Search, fetch and extract: the whole run short of writing output.
///
/// When the search matches nothing the detail request is skipped and an empty sequence is
/// returned.
pub fn collect_papers(
    source: &dyn PaperSource,
    extractor: &dyn Extractor,
    query: &str,
    diagnostics: &mut dyn DiagnosticSink,
) -> Result<Vec<PaperRecord>, PipelineError> {
    tracing::debug!(%query, "Fetching papers");

    let ids = source.search(query)?;
    diagnostics.emit(Diagnostic::IdentifiersRetrieved { ids: ids.clone() });

    if ids.is_empty() {
        tracing::info!(%query, "Search returned no PubMed IDs");
        return Ok(Vec::new());
    }

    let batch = source.fetch_details(&ids)?;

    tracing::debug!(extractor_version = %extractor.version(), "Parsing document batch");
    let records = extractor.extract(&batch, diagnostics)?;
    tracing::debug!(count = records.len(), "Parsed papers");

    Ok(records)
}
