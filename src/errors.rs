//! Error types for deduplication
//!
//! Only fatal conditions live here. Unknown UMIs and duplicates are
//! ordinary outcomes and are reported through [`crate::dedup::Decision`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, DedupError>;

#[derive(Error, Debug)]
pub enum DedupError {
    /// A required input or output path could not be opened
    #[error("cannot open {role} '{}': {source}", .path.display())]
    Config {
        /// What the path was for ("input SAM", "UMI whitelist", ...)
        role: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    /// A CIGAR string that does not fully decompose into (length, operator) pairs
    #[error("malformed CIGAR string '{cigar}': {reason}")]
    MalformedCigar { cigar: String, reason: String },

    /// An alignment line missing columns or carrying unparsable fields
    #[error("malformed alignment record: {reason}")]
    MalformedRecord { reason: String },
}

impl DedupError {
    pub(crate) fn cigar(cigar: &str, reason: impl Into<String>) -> Self {
        Self::MalformedCigar {
            cigar: cigar.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn record(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_message_names_path() {
        let err = DedupError::Config {
            role: "UMI whitelist",
            path: PathBuf::from("/missing/umis.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("UMI whitelist"));
        assert!(msg.contains("/missing/umis.txt"));
    }

    #[test]
    fn test_malformed_cigar_message() {
        let msg = DedupError::cigar("10Q", "unknown operator 'Q'").to_string();
        assert_eq!(msg, "malformed CIGAR string '10Q': unknown operator 'Q'");
    }
}
