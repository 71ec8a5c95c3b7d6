//! Error types for fusion-domains
//!
//! The core mapping/classification/coloring functions are total: missing
//! data yields empty results and degenerate ranges are dropped, never
//! raised. Errors exist only at the edges, where annotation JSON is
//! deserialized, a curated color table is loaded from disk, or the CLI
//! touches the filesystem.

use thiserror::Error;

/// Main error type for fusion-domains operations
#[derive(Error, Debug)]
pub enum FusionError {
    /// Annotation input could not be used
    #[error("invalid annotation input: {0}")]
    InvalidAnnotation(String),

    /// A curated color table failed to load or validate
    #[error("invalid color table: {msg}")]
    InvalidColorTable { msg: String },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = FusionError::InvalidAnnotation("gene_a missing".to_string());
        assert_eq!(e.to_string(), "invalid annotation input: gene_a missing");

        let e = FusionError::InvalidColorTable {
            msg: "empty pattern".to_string(),
        };
        assert_eq!(e.to_string(), "invalid color table: empty pattern");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e: FusionError = io.into();
        assert!(matches!(e, FusionError::Io(_)));
    }
}
