use crate::config::DomainMatch;

/// Checks whether a host belongs to a parent domain under the given policy
///
/// Two policies are supported:
/// 1. `Substring`: the host contains the domain anywhere. Permissive, so
///    "evilics.uci.edu.attacker.com" matches "ics.uci.edu".
/// 2. `Suffix`: the host is the domain itself or a subdomain of it.
///
/// Both arguments are expected to be lowercase.
///
/// # Examples
///
/// ```
/// use sumi_sieve::config::DomainMatch;
/// use sumi_sieve::url::host_matches;
///
/// assert!(host_matches("ics.uci.edu", "vision.ics.uci.edu", DomainMatch::Suffix));
/// assert!(!host_matches("ics.uci.edu", "ics.uci.edu.attacker.com", DomainMatch::Suffix));
/// assert!(host_matches("ics.uci.edu", "ics.uci.edu.attacker.com", DomainMatch::Substring));
/// ```
pub fn host_matches(domain: &str, host: &str, policy: DomainMatch) -> bool {
    if domain.is_empty() {
        return false;
    }

    match policy {
        DomainMatch::Substring => host.contains(domain),
        DomainMatch::Suffix => {
            host == domain
                || host
                    .strip_suffix(domain)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        }
    }
}
