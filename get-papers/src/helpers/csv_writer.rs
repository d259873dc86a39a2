use paper_types::PaperRecord;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Saved { path: PathBuf, rows: usize },
    /// The record sequence was empty; no file was created
    NothingToSave,
}

/// Write a header row followed by one row per record; returns the number of rows written.
///
/// Nothing at all is written for an empty slice, since the header comes from the first record.
pub fn write_csv<W: Write>(records: &[PaperRecord], writer: W) -> Result<usize, csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;

    Ok(records.len())
}

pub fn save_to_csv(records: &[PaperRecord], path: &Path) -> Result<WriteOutcome, csv::Error> {
    if records.is_empty() {
        tracing::info!(path = %path.display(), "No records, skipping output file");
        return Ok(WriteOutcome::NothingToSave);
    }

    let file = File::create(path)?;
    let rows = write_csv(records, file)?;
    tracing::debug!(path = %path.display(), rows, "Saved results");

    Ok(WriteOutcome::Saved {
        path: path.to_path_buf(),
        rows,
    })
}
