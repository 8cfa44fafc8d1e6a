/// Page outcome definitions for a single processing pass
use std::fmt;

/// Represents what the engine did with a fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    // ===== Success =====
    /// Page was fingerprinted as unique and its links were filtered
    Processed,

    // ===== Suppressed =====
    /// Page is a near-duplicate of earlier content; links were not extracted
    Duplicate,

    // ===== Skipped (counted as fetched) =====
    /// Declared or actual body size exceeds the configured limit
    Oversized,

    /// Body or headers could not be read
    Unreadable,

    // ===== Ignored (no state touched) =====
    /// Non-200 status or no body
    Unprocessable,
}

impl PageOutcome {
    /// Returns true if the page's links were considered
    pub fn is_processed(&self) -> bool {
        matches!(self, Self::Processed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Duplicate => "duplicate",
            Self::Oversized => "oversized",
            Self::Unreadable => "unreadable",
            Self::Unprocessable => "unprocessable",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
