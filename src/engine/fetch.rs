//! Fetch results handed to the engine and the gate they must pass
//!
//! The fetch layer is outside this crate; a [`FetchResult`] is whatever it
//! managed to retrieve for one URL. [`gate`] decides whether the result is
//! worth analyzing at all.

use crate::state::PageOutcome;
use std::collections::HashMap;
use thiserror::Error;

/// Result of fetching one URL
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    /// HTTP status code
    pub status: u16,

    /// Raw response body, if one was received
    pub body: Option<Vec<u8>>,

    /// Response headers; names are matched case-insensitively
    pub headers: HashMap<String, String>,
}

impl FetchResult {
    /// A status-200 result with the given body and no headers
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: Some(body.into()),
            headers: HashMap::new(),
        }
    }

    /// A result with the given status and no body
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Adds a header, replacing any previous value under the same name
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Looks a header up ignoring ASCII case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Why a fetch result was not analyzed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageSkip {
    #[error("status {0}")]
    Status(u16),

    #[error("no body")]
    MissingBody,

    #[error("body of {size} bytes exceeds the {limit} byte limit")]
    Oversized { size: usize, limit: usize },

    #[error("unreadable response: {0}")]
    Unreadable(String),
}

impl PageSkip {
    /// Returns true if the page still counts as fetched
    ///
    /// Non-200 results and results without a body never reach the engine's
    /// state; oversized and unreadable pages are counted and skipped.
    pub fn counts_as_fetched(&self) -> bool {
        matches!(self, Self::Oversized { .. } | Self::Unreadable(_))
    }

    /// The outcome recorded for a page skipped for this reason
    pub fn outcome(&self) -> PageOutcome {
        match self {
            Self::Status(_) | Self::MissingBody => PageOutcome::Unprocessable,
            Self::Oversized { .. } => PageOutcome::Oversized,
            Self::Unreadable(_) => PageOutcome::Unreadable,
        }
    }
}

/// Checks status, size and encoding, and returns the page text
///
/// # Gate Order
///
/// 1. Status must be 200
/// 2. A body must be present
/// 3. A declared `Content-Length` must parse and stay within `max_body_bytes`
/// 4. The actual body must stay within `max_body_bytes`
/// 5. The body must be valid UTF-8
pub fn gate(fetch: &FetchResult, max_body_bytes: usize) -> Result<&str, PageSkip> {
    if fetch.status != 200 {
        return Err(PageSkip::Status(fetch.status));
    }

    let body = fetch.body.as_deref().ok_or(PageSkip::MissingBody)?;

    if let Some(declared) = fetch.header("content-length") {
        let size: usize = declared.trim().parse().map_err(|_| {
            PageSkip::Unreadable(format!("invalid Content-Length '{}'", declared))
        })?;
        if size > max_body_bytes {
            return Err(PageSkip::Oversized {
                size,
                limit: max_body_bytes,
            });
        }
    }

    if body.len() > max_body_bytes {
        return Err(PageSkip::Oversized {
            size: body.len(),
            limit: max_body_bytes,
        });
    }

    std::str::from_utf8(body).map_err(|e| PageSkip::Unreadable(e.to_string()))
}
