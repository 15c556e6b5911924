//! Error taxonomy shared by the sync, render and validate pipelines.
//!
//! Library modules return [`RoadmapError`]; the CLI layer wraps it in
//! `anyhow` and turns it into an exit status.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RoadmapError {
    /// Missing credentials, missing or malformed display config.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport failure or timeout talking to a remote endpoint.
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered with a non-success status.
    #[error("API request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to parse {what}: {message}")]
    Parse { what: String, message: String },

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Render-side structural check failed.
    #[error("{0}")]
    Invalid(String),

    /// First violation reported by the validator.
    #[error("{0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, RoadmapError>;

impl RoadmapError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn parse(what: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            what: what.into(),
            message: err.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code_and_body() {
        let err = RoadmapError::Status {
            url: "https://app.asana.com/api/1.0/projects/1/tasks".into(),
            status: 401,
            body: "Not Authorized".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Not Authorized"));
    }

    #[test]
    fn validation_error_is_bare_message() {
        let err = RoadmapError::validation("\"lastUpdated\" field is missing or invalid.");
        assert_eq!(err.to_string(), "\"lastUpdated\" field is missing or invalid.");
    }

    #[test]
    fn parse_error_carries_subject() {
        let err = RoadmapError::parse("config.json", "expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "failed to parse config.json: expected value at line 1 column 1"
        );
    }
}
