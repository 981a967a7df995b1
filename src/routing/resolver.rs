//! Subdomain → root page resolution.
//!
//! # Responsibilities
//! - Decide whether a host is on the production domain
//! - Extract the subdomain label (first dot-delimited segment)
//! - Map the label to a page, or fall back to the default page
//!
//! # Design Decisions
//! - Pure and synchronous: same inputs always give the same page
//! - Label matching is exact and case-sensitive; hosts are lowercased first
//! - Unknown labels and non-production hosts are not errors
//! - Generic over the page identifier; ids are never interpreted here

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::hash::Hash;

/// Lookup from subdomain label to page identifier.
pub trait LabelMap<P> {
    fn lookup(&self, label: &str) -> Option<P>;
}

impl<P: Copy> LabelMap<P> for BTreeMap<String, P> {
    fn lookup(&self, label: &str) -> Option<P> {
        self.get(label).copied()
    }
}

impl<K, P, S> LabelMap<P> for std::collections::HashMap<K, P, S>
where
    K: Borrow<str> + Eq + Hash,
    P: Copy,
    S: std::hash::BuildHasher,
{
    fn lookup(&self, label: &str) -> Option<P> {
        self.get(label).copied()
    }
}

/// First dot-delimited segment of `hostname`.
pub fn subdomain_label(hostname: &str) -> &str {
    hostname.split('.').next().unwrap_or(hostname)
}

/// Select the page mounted at `/` for `hostname`.
///
/// Hosts that do not contain `production_domain` get `default`. Otherwise the
/// subdomain label is looked up in `labels`, falling back to `default`.
pub fn resolve_root_component<P: Copy>(
    hostname: &str,
    production_domain: &str,
    labels: &impl LabelMap<P>,
    default: P,
) -> P {
    if !hostname.contains(production_domain) {
        return default;
    }

    labels.lookup(subdomain_label(hostname)).unwrap_or(default)
}

/// Hostname of a `Host` header value: optional `:port` stripped, ASCII
/// lowercased.
pub fn normalize_host(host: &str) -> String {
    // Bracketed IPv6 literal, e.g. "[::1]:3000"
    let name = if let Some(rest) = host.strip_prefix('[') {
        rest.split(']').next().unwrap_or(rest)
    } else {
        match host.rsplit_once(':') {
            Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
            _ => host,
        }
    };
    name.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoutingConfig;
    use crate::pages::PageId;
    use std::collections::HashMap;

    fn labels() -> BTreeMap<String, PageId> {
        RoutingConfig::default().labels
    }

    #[test]
    fn test_off_production_domain_is_default() {
        for host in ["localhost", "127.0.0.1", "social.other.org", ""] {
            assert_eq!(
                resolve_root_component(host, "example.com", &labels(), PageId::Info),
                PageId::Info,
                "host {host:?}"
            );
        }
    }

    #[test]
    fn test_known_labels() {
        let cases = [
            ("social.example.com", PageId::Social),
            ("account.example.com", PageId::Account),
            ("manage.example.com", PageId::Account),
            ("profiles.example.com", PageId::Profile),
            ("users.example.com", PageId::Profile),
            ("www.example.com", PageId::Info),
        ];
        for (host, expected) in cases {
            assert_eq!(
                resolve_root_component(host, "example.com", &labels(), PageId::Info),
                expected,
                "host {host}"
            );
        }
    }

    #[test]
    fn test_every_label_of_the_map_resolves_to_its_page() {
        let labels = labels();
        for (label, page) in &labels {
            let host = format!("{label}.example.com");
            assert_eq!(
                resolve_root_component(&host, "example.com", &labels, PageId::PublicProfile),
                *page
            );
        }
    }

    #[test]
    fn test_unknown_label_is_default() {
        assert_eq!(
            resolve_root_component("unknownlabel.example.com", "example.com", &labels(), PageId::Info),
            PageId::Info
        );
    }

    #[test]
    fn test_bare_domain_uses_first_segment() {
        // "example" is not a label, so the apex falls through to default
        assert_eq!(
            resolve_root_component("example.com", "example.com", &labels(), PageId::Info),
            PageId::Info
        );
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        assert_eq!(
            resolve_root_component("SOCIAL.example.com", "example.com", &labels(), PageId::Info),
            PageId::Info
        );
    }

    #[test]
    fn test_opaque_identifiers() {
        let mut map: HashMap<&str, u8> = HashMap::new();
        map.insert("signup", 1);
        map.insert("login", 2);
        assert_eq!(resolve_root_component("login.site.dev", "site.dev", &map, 0), 2);
        assert_eq!(resolve_root_component("localhost", "site.dev", &map, 0), 0);
    }

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("social.example.com:8080"), "social.example.com");
        assert_eq!(normalize_host("localhost"), "localhost");
        assert_eq!(normalize_host("[::1]:3000"), "::1");
        assert_eq!(normalize_host("SOCIAL.Example.com:443"), "social.example.com");
    }
}
