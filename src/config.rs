use crate::search::{DEFAULT_ALPHA, DEFAULT_CERTAINTY, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use crate::types::{SpyError, SpyResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Basename of the optional config file looked up in the working directory
const CONFIG_FILE: &str = "spy";

const ENV_PREFIX: &str = "SPY";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the REST facade
    pub api_url: String,
    pub page_size: usize,
    /// Initial semantic certainty threshold
    pub certainty: f64,
    /// Initial hybrid alpha
    pub alpha: f64,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Overrides the default tracing filter (RUST_LOG still wins)
    #[serde(default)]
    pub log_filter: Option<String>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            certainty: DEFAULT_CERTAINTY,
            alpha: DEFAULT_ALPHA,
            request_timeout_secs: None,
            log_filter: None,
            log_dir: None,
        }
    }
}

impl Config {
    /// Defaults, then `spy.toml` (or `file`), then `SPY_*` environment variables
    pub fn load(file: Option<&Path>) -> SpyResult<Self> {
        dotenvy::dotenv().ok();

        let file_source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(CONFIG_FILE).required(false),
        };

        let config: Config = config::Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("page_size", DEFAULT_PAGE_SIZE as i64)?
            .set_default("certainty", DEFAULT_CERTAINTY)?
            .set_default("alpha", DEFAULT_ALPHA)?
            .add_source(file_source)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> SpyResult<Self> {
        Self::load(None)
    }

    pub fn validate(&self) -> SpyResult<()> {
        if self.api_url.trim().is_empty() {
            return Err(SpyError::Config("api_url must not be empty".to_string()));
        }
        if !PAGE_SIZE_OPTIONS.contains(&self.page_size) {
            return Err(SpyError::Config(format!(
                "page_size must be one of {:?}, got {}",
                PAGE_SIZE_OPTIONS, self.page_size
            )));
        }
        if !(0.0..=1.0).contains(&self.certainty) {
            return Err(SpyError::Config(format!(
                "certainty must be within [0, 1], got {}",
                self.certainty
            )));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(SpyError::Config(format!(
                "alpha must be within [0, 1], got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.page_size, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let file = toml_file(
            r#"
            api_url = "http://spy.internal:9000"
            page_size = 50
            alpha = 0.25
            request_timeout_secs = 30
            "#,
        );
        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.api_url, "http://spy.internal:9000");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.alpha, 0.25);
        assert_eq!(config.certainty, 0.65);
        assert_eq!(config.request_timeout_secs, Some(30));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_invalid_page_size_is_rejected() {
        let file = toml_file("page_size = 15\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, SpyError::Config(_)));
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn test_out_of_range_parameters_are_rejected() {
        let config = Config {
            certainty: 1.2,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            alpha: -0.1,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/spy-config.toml"))).unwrap_err();
        assert!(matches!(err, SpyError::Config(_)));
    }
}
