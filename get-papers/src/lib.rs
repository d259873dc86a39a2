pub mod config;
pub mod helpers;
pub mod integrations;
pub mod pipeline;

pub use integrations::pubmed::PubMedClient;
pub use pipeline::{collect_papers, PipelineError};
