//! Parse errors for the SIE format.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SieError {
    /// A structurally malformed line. Parsing stops at the first one so the
    /// caller can report the exact defect location.
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

impl SieError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }

    /// 1-based line number of the defect.
    pub fn line(&self) -> usize {
        match self {
            Self::Malformed { line, .. } => *line,
        }
    }
}
