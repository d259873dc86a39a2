use anyhow::{Context, Result};
use clap::Parser;
use extractors::{PubMedXmlExtractor, TracingSink};
use get_papers::config::AppConfig;
use get_papers::helpers::csv_writer::{save_to_csv, write_csv, WriteOutcome};
use get_papers::{collect_papers, PubMedClient};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

/// Filter used by `--debug`: verbose for this workspace, quiet for HTTP internals
const DEBUG_FILTER: &str = "get_papers=debug,extractors=debug,paper_types=debug,warn";

#[derive(Parser, Debug)]
#[command(name = "get-papers", author, version, about, long_about = None)]
struct Cli {
    /// PubMed search query (full PubMed query syntax is supported)
    query: String,

    /// Print debug information during execution
    #[arg(short, long)]
    debug: bool,

    /// CSV file to save the results to; printed to stdout when omitted
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file_path: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.debug, cli.log_file_path.as_deref());

    let (config, config_path) =
        AppConfig::load(cli.config.as_deref()).context("Failed to load get-papers config")?;
    tracing::debug!(?config_path, "Loaded configuration");

    let client = PubMedClient::new(config.pubmed).context("Failed to build PubMed client")?;
    let extractor = PubMedXmlExtractor::new();
    let mut diagnostics = TracingSink::new();

    let records = collect_papers(&client, &extractor, &cli.query, &mut diagnostics)
        .with_context(|| format!("Failed to fetch papers for query {:?}", cli.query))?;

    if diagnostics.warning_count() > 0 {
        tracing::info!(
            warnings = diagnostics.warning_count(),
            "Some papers had missing fields, defaulted to N/A"
        );
    }

    match cli.file {
        Some(path) => {
            let outcome = save_to_csv(&records, &path)
                .with_context(|| format!("Failed to write results to {:?}", path))?;
            match outcome {
                WriteOutcome::Saved { path, rows } => {
                    eprintln!("Results saved to {} ({} papers)", path.display(), rows)
                }
                WriteOutcome::NothingToSave => eprintln!("No data to save."),
            }
        }
        None if records.is_empty() => eprintln!("No data to save."),
        None => {
            let stdout = std::io::stdout();
            write_csv(&records, stdout.lock()).context("Failed to write results to stdout")?;
        }
    }

    Ok(())
}

/// Filter used when `RUST_LOG` is not set
fn default_filter(debug: bool) -> &'static str {
    if debug {
        DEBUG_FILTER
    } else {
        "warn"
    }
}

/// Logs go to stderr so they never mix with CSV on stdout
fn init_tracing(debug: bool, log_file_path: Option<&str>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter(debug)));

    match log_file_path {
        Some(log_path) => {
            let log_path = Path::new(log_path);
            let file_appender = tracing_appender::rolling::never(
                log_path.parent().unwrap_or(Path::new(".")),
                log_path
                    .file_name()
                    .unwrap_or(std::ffi::OsStr::new("get-papers.log")),
            );
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(non_blocking),
                )
                .init();

            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();

            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "get-papers",
            "cancer AND immunotherapy",
            "-d",
            "-f",
            "out.csv",
        ])
        .unwrap();

        assert_eq!(cli.query, "cancer AND immunotherapy");
        assert!(cli.debug);
        assert_eq!(cli.file, Some(PathBuf::from("out.csv")));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_default_filter_follows_debug_flag() {
        assert_eq!(default_filter(true), DEBUG_FILTER);
        assert_eq!(default_filter(false), "warn");
        assert!(tracing_subscriber::EnvFilter::try_new(DEBUG_FILTER).is_ok());
    }

    #[test]
    fn test_query_is_required() {
        assert!(Cli::try_parse_from(["get-papers"]).is_err());
    }
}
