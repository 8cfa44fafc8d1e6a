//! Individual admission predicates
//!
//! Each rule inspects one aspect of a parsed URL and either passes or names
//! the reason it rejects. Rules are pure and share no state.

use super::Rejection;
use crate::config::AdmissionConfig;
use crate::url::host_matches;
use regex::Regex;
use std::sync::LazyLock;

/// Non-HTML resources that are never worth crawling
static FILE_TYPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\.(css|js|bmp|gif|jpe?g|ico",
        r"|png|tiff?|mid|mp2|mp3|mp4",
        r"|wav|avi|mov|mpeg|ram|m4v|mkv|ogg|ogv|pdf",
        r"|ps|eps|tex|ppt|pptx|doc|docx|xls|xlsx|names",
        r"|data|dat|exe|bz2|tar|msi|bin|7z|psd|dmg|iso",
        r"|epub|dll|cnf|tgz|sha1",
        r"|thmx|mso|arff|rtf|jar|csv",
        r"|rm|smil|wmv|swf|wma|zip|rar|gz)$"
    ))
    .expect("file type pattern is valid")
});

/// Query markers for diff, revision and media views that replicate content
static TRAP_QUERY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(tab_details|do=media|tab_files|do=diff|rev|version|difftype)")
        .expect("trap query pattern is valid")
});

/// Wiki actions that only make sense on doku.php pages
static WIKI_ACTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(idx|do=|rev|difftype|media|edit|diff)").expect("wiki action pattern is valid")
});

static CALENDAR_PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(calendar|year|week|month|events|reply|share|download|attachment)")
        .expect("calendar path pattern is valid")
});

static CALENDAR_QUERY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(calendar|ical|events?)\b|(^|&)(date|day|week|month|year)=")
        .expect("calendar query pattern is valid")
});

/// Dates like 2019-05-12 or 2019/05/12
static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}[-/]\d{1,2}[-/]\d{1,2}").expect("date pattern is valid")
});

static RESTRICTED_PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(/wp-content|/upload|/cgi-bin|/admin|/trackback)")
        .expect("restricted path pattern is valid")
});

/// Repository browsing views (GitLab, GitHub, Gitea style)
static VERSION_CONTROL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(commit|commits|tree|blame|compare|tags|branches|raw|blob)(/|$)")
        .expect("version control pattern is valid")
});

/// Only web pages are crawled
pub(super) fn check_scheme(scheme: &str) -> Result<(), Rejection> {
    match scheme {
        "http" | "https" => Ok(()),
        other => Err(Rejection::Scheme(other.to_string())),
    }
}

/// `path` must already be lowercase
pub(super) fn check_file_type(path: &str) -> Result<(), Rejection> {
    match FILE_TYPE_REGEX.captures(path).and_then(|c| c.get(1)) {
        Some(ext) => Err(Rejection::FileType(ext.as_str().to_string())),
        None => Ok(()),
    }
}

pub(super) fn check_domain(host: &str, config: &AdmissionConfig) -> Result<(), Rejection> {
    let allowed = config
        .allowed_domains
        .iter()
        .any(|domain| host_matches(domain, host, config.domain_match));

    if allowed {
        Ok(())
    } else {
        Err(Rejection::Domain(host.to_string()))
    }
}

pub(super) fn check_query(
    path: &str,
    query: &str,
    config: &AdmissionConfig,
) -> Result<(), Rejection> {
    let params = query.split('&').count();
    if params > config.max_query_params {
        return Err(Rejection::TooManyQueryParams(params));
    }

    if TRAP_QUERY_REGEX.is_match(query) {
        return Err(Rejection::TrapQuery);
    }

    if path.contains("doku.php") && WIKI_ACTION_REGEX.is_match(query) {
        return Err(Rejection::WikiAction);
    }

    Ok(())
}

pub(super) fn check_path_traps(
    path: &str,
    query: &str,
    config: &AdmissionConfig,
) -> Result<(), Rejection> {
    let segments = path.split('/').filter(|s| !s.is_empty()).count();
    if segments > config.max_path_segments {
        return Err(Rejection::PathTooDeep(segments));
    }

    if CALENDAR_PATH_REGEX.is_match(path)
        || CALENDAR_QUERY_REGEX.is_match(query)
        || DATE_REGEX.is_match(path)
        || DATE_REGEX.is_match(query)
    {
        return Err(Rejection::CalendarTrap);
    }

    if RESTRICTED_PATH_REGEX.is_match(path) {
        return Err(Rejection::RestrictedPath);
    }

    if VERSION_CONTROL_REGEX.is_match(path) {
        return Err(Rejection::VersionControl);
    }

    Ok(())
}

pub(super) fn check_structure(path: &str, config: &AdmissionConfig) -> Result<(), Rejection> {
    let slashes = path.matches('/').count();
    let equals = path.matches('=').count();

    if slashes > config.max_path_slashes || equals > config.max_path_equals {
        return Err(Rejection::NoisyPath { slashes, equals });
    }

    Ok(())
}
