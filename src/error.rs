//! Errors from the tooling around the engine: fragment files, config and
//! identifiers given on the command line. The engine itself never fails;
//! an unmatched fragment is `None`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("cannot write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// One line of a fragment file is not a valid fragment record.
    #[error("{}:{line}: invalid fragment: {source}", file.display())]
    InvalidFragment {
        file: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),

    #[error("unknown orchestrator '{0}'")]
    UnknownOrchestrator(String),

    #[error("no page year: pass --page-year or set page_year in the config")]
    MissingPageYear,

    #[error("cannot set up logging: {0}")]
    LogFilter(String),

    #[error("cannot start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_fragment_message_names_file_and_line() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::InvalidFragment {
            file: PathBuf::from("data/years.jsonl"),
            line: 7,
            source,
        };
        assert!(err.to_string().starts_with("data/years.jsonl:7: invalid fragment"));
    }

    #[test]
    fn test_unknown_strategy_message() {
        let err = Error::UnknownStrategy("centuries".into());
        assert_eq!(err.to_string(), "unknown strategy 'centuries'");
    }
}
