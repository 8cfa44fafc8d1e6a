//! Admission filter for discovered links
//!
//! A link is admitted to the frontier only if it passes every rule in a fixed
//! chain. Rules run in this order, which only affects the reported reason:
//!
//! 1. Scheme is `http` or `https`
//! 2. Path does not name a blacklisted file type
//! 3. Host matches an allowed parent domain
//! 4. Query is short and carries no diff/revision markers
//! 5. Path is shallow and avoids calendar, admin and repository views
//! 6. Path is not dominated by `/` or `=` characters
//!
//! A URL that fails to parse is rejected, never propagated as an error.

mod rules;

use crate::config::AdmissionConfig;
use crate::url::{extract_host, parse_link};
use crate::UrlError;
use thiserror::Error;

/// The reason a link was not admitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("malformed URL: {0}")]
    Malformed(UrlError),

    #[error("unsupported scheme '{0}'")]
    Scheme(String),

    #[error("blacklisted file type '.{0}'")]
    FileType(String),

    #[error("host '{0}' is outside the allowed domains")]
    Domain(String),

    #[error("{0} query parameters exceed the limit")]
    TooManyQueryParams(usize),

    #[error("query carries a diff or revision marker")]
    TrapQuery,

    #[error("wiki action view")]
    WikiAction,

    #[error("path has {0} segments")]
    PathTooDeep(usize),

    #[error("calendar or date listing")]
    CalendarTrap,

    #[error("administrative or upload path")]
    RestrictedPath,

    #[error("version control browsing path")]
    VersionControl,

    #[error("noisy path ({slashes} '/', {equals} '=')")]
    NoisyPath { slashes: usize, equals: usize },
}

impl Rejection {
    /// Returns a stable short label for diagnostic counters
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed",
            Self::Scheme(_) => "scheme",
            Self::FileType(_) => "file-type",
            Self::Domain(_) => "domain",
            Self::TooManyQueryParams(_) => "query-params",
            Self::TrapQuery => "trap-query",
            Self::WikiAction => "wiki-action",
            Self::PathTooDeep(_) => "path-depth",
            Self::CalendarTrap => "calendar",
            Self::RestrictedPath => "restricted-path",
            Self::VersionControl => "version-control",
            Self::NoisyPath { .. } => "noisy-path",
        }
    }
}

/// Decides whether normalized URLs are worth crawling
///
/// The filter is a pure function of the URL and its configuration, so it can
/// be shared freely between threads.
#[derive(Debug, Clone)]
pub struct AdmissionFilter {
    config: AdmissionConfig,
}

impl AdmissionFilter {
    /// Creates a filter from admission settings
    pub fn new(config: AdmissionConfig) -> Self {
        Self { config }
    }

    /// Returns the settings this filter applies
    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }

    /// Runs the rule chain and reports the first rejection
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The URL should be crawled
    /// * `Err(Rejection)` - The first rule that rejected it
    pub fn check(&self, url_str: &str) -> Result<(), Rejection> {
        let url = parse_link(url_str).map_err(Rejection::Malformed)?;

        rules::check_scheme(url.scheme())?;

        let host = extract_host(&url).ok_or(Rejection::Malformed(UrlError::MissingHost))?;
        let path = url.path().to_lowercase();
        let query = url.query().unwrap_or("").to_lowercase();

        rules::check_file_type(&path)?;
        rules::check_domain(&host, &self.config)?;
        rules::check_query(&path, &query, &self.config)?;
        rules::check_path_traps(&path, &query, &self.config)?;
        rules::check_structure(&path, &self.config)?;

        Ok(())
    }

    /// Returns true if the URL should be crawled, logging the reason otherwise
    pub fn admit(&self, url_str: &str) -> bool {
        match self.check(url_str) {
            Ok(()) => true,
            Err(rejection) => {
                log_rejection(url_str, &rejection);
                false
            }
        }
    }
}

/// Logs a rejected link; malformed URLs are worth a warning, the rest are routine
pub fn log_rejection(url_str: &str, rejection: &Rejection) {
    match rejection {
        Rejection::Malformed(_) => tracing::warn!("Rejected {}: {}", url_str, rejection),
        _ => tracing::debug!("Rejected {}: {}", url_str, rejection),
    }
}

impl Default for AdmissionFilter {
    fn default() -> Self {
        Self::new(AdmissionConfig::default())
    }
}
