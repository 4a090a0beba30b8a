//! Boundary errors raised while collecting inputs for grading.
//!
//! The engine itself never fails; these cover file and stdin reads, config
//! parsing, and include pattern expansion.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Invalid config {path}: {message}")]
    Config { path: String, message: String },

    #[error("Invalid include pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("No input files found. Pass paths or set `include` in uigrade.toml.")]
    NoInputs,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_input() {
        let err = Error::Read {
            path: "components/card.tsx".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Failed to read components/card.tsx: missing");
        assert!(std::error::Error::source(&err).is_some());

        let err = Error::Pattern {
            pattern: "src/[".into(),
            message: "invalid range".into(),
        };
        assert!(err.to_string().contains("'src/['"));
    }
}
