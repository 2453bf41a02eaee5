//! Settings for the `wikispan` tool, read from an optional TOML file.
//! Command-line flags override whatever the file sets.
//!
//! ```toml
//! orchestrator = "time-periods"
//! page_year = 1500
//! page_is_bc = true
//! output_dir = "output"
//! log_filter = "wikispan=debug"
//! threads = 4
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::orchestrator::OrchestratorKind;

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub orchestrator: OrchestratorKind,
    /// Page year for `parse` when no `--page-year` is given.
    pub page_year: Option<u32>,
    pub page_is_bc: Option<bool>,
    pub output_dir: PathBuf,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Worker threads for `batch`; rayon's default when unset.
    pub threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            orchestrator: OrchestratorKind::default(),
            page_year: None,
            page_is_bc: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            threads: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&contents).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The file at `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.orchestrator, OrchestratorKind::Years);
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.page_year, None);
        assert_eq!(Config::load_or_default(None).unwrap(), config);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let file = write_config("orchestrator = \"food-timeline\"\npage_year = 1500\n");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.orchestrator, OrchestratorKind::FoodTimeline);
        assert_eq!(config.page_year, Some(1500));
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            r#"
orchestrator = "time-periods-no-fallback"
page_year = 3000
page_is_bc = true
output_dir = "spans"
log_filter = "wikispan=trace"
threads = 2
"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.orchestrator, OrchestratorKind::TimePeriodsNoFallback);
        assert_eq!(config.page_is_bc, Some(true));
        assert_eq!(config.output_dir, PathBuf::from("spans"));
        assert_eq!(config.threads, Some(2));
    }

    #[test]
    fn test_load_rejects_unknown_keys_and_bad_values() {
        let file = write_config("orchestrater = \"years\"\n");
        assert!(matches!(Config::load(file.path()), Err(Error::Config { .. })));
        let file = write_config("orchestrator = \"decades\"\n");
        assert!(matches!(Config::load(file.path()), Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Config::load(Path::new("/nonexistent/wikispan.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
