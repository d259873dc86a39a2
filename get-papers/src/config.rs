use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
pub const DEFAULT_RETMAX: u32 = 100;

/// Prefix for environment overrides, e.g. `GET_PAPERS_PUBMED__API_KEY`
const ENV_PREFIX: &str = "GET_PAPERS";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub pubmed: PubMedConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PubMedConfig {
    /// E-utilities base URL, without the trailing endpoint name
    pub base_url: String,
    /// Maximum number of identifiers requested from the search endpoint, at most 100
    pub retmax: u32,
    /// Per-request timeout; the HTTP client default applies when unset
    pub timeout_secs: Option<u64>,
    /// NCBI API key, raises the rate limit from 3 to 10 requests per second
    pub api_key: Option<String>,
    pub tool: Option<String>,
    pub email: Option<String>,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            retmax: DEFAULT_RETMAX,
            timeout_secs: None,
            api_key: None,
            tool: None,
            email: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `explicit_path` (must exist) or the default config location
    /// (optional), then apply `GET_PAPERS_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let (config_path, required) = match explicit_path {
            Some(path) => (path.to_path_buf(), true),
            None => (get_config_path(), false),
        };

        let builder = Config::builder()
            .add_source(
                File::from(config_path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = builder.try_deserialize()?;

        if config.pubmed.retmax == 0 || config.pubmed.retmax > DEFAULT_RETMAX {
            return Err(ConfigError::Message(format!(
                "pubmed.retmax must be between 1 and {}, got {}",
                DEFAULT_RETMAX, config.pubmed.retmax
            )));
        }

        Ok((config, config_path))
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("get-papers").join("config.toml")
    } else {
        PathBuf::from("get-papers.toml")
    }
}
