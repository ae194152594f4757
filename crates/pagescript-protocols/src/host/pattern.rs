//! URL match patterns (`<scheme>://<host>/<path>`), as used to key
//! persistent script registrations.

use std::fmt;

use regex::RegexBuilder;

use crate::error::ProtocolError;

const ALL_URLS: &str = "<all_urls>";
const VALID_SCHEMES: &[&str] = &["*", "http", "https", "file", "ws", "wss"];

/// A parsed URL match pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPattern {
    raw: String,
    kind: PatternKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternKind {
    AllUrls,
    Parts {
        scheme: String,
        host: String,
        path: String,
    },
}

impl MatchPattern {
    /// Parse a pattern such as `https://*.example.com/*` or `<all_urls>`.
    pub fn parse(pattern: &str) -> Result<Self, ProtocolError> {
        let invalid = |reason: &str| ProtocolError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if pattern == ALL_URLS {
            return Ok(Self {
                raw: pattern.to_string(),
                kind: PatternKind::AllUrls,
            });
        }

        let (scheme, rest) = pattern
            .split_once("://")
            .ok_or_else(|| invalid("missing scheme separator"))?;
        if !VALID_SCHEMES.contains(&scheme) {
            return Err(invalid("unsupported scheme"));
        }

        let slash = rest.find('/').ok_or_else(|| invalid("missing path"))?;
        let (host, path) = rest.split_at(slash);

        if host.is_empty() && scheme != "file" {
            return Err(invalid("missing host"));
        }
        if host != "*" && host.contains('*') && !(host.starts_with("*.") && !host[2..].contains('*')) {
            return Err(invalid("wildcard is only allowed as the first host label"));
        }

        Ok(Self {
            raw: pattern.to_string(),
            kind: PatternKind::Parts {
                scheme: scheme.to_string(),
                host: host.to_ascii_lowercase(),
                path: path.to_string(),
            },
        })
    }

    /// Pattern covering every page of the URL's origin (`<scheme>://<host>/*`).
    pub fn for_origin(url: &str) -> Result<Self, ProtocolError> {
        let parsed = url::Url::parse(url).map_err(|e| ProtocolError::InvalidPattern {
            pattern: url.to_string(),
            reason: e.to_string(),
        })?;
        let host = parsed.host_str().unwrap_or("");
        Self::parse(&format!("{}://{}/*", parsed.scheme(), host))
    }

    /// The pattern as originally written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Regular expression source equivalent to this pattern. The source uses
    /// only syntax shared by Rust `regex` and JavaScript `RegExp`; match it
    /// case-insensitively.
    pub fn to_regex(&self) -> String {
        match &self.kind {
            PatternKind::AllUrls => r"^(?:https?|wss?|file)://.*$".to_string(),
            PatternKind::Parts { scheme, host, path } => {
                let scheme_re = if scheme == "*" {
                    "https?".to_string()
                } else {
                    regex::escape(scheme)
                };
                let host_re = if host == "*" {
                    "[^/]*".to_string()
                } else if let Some(domain) = host.strip_prefix("*.") {
                    format!(r"(?:[^/]*\.)?{}", regex::escape(domain))
                } else {
                    regex::escape(host)
                };
                let path_re = path
                    .split('*')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(".*");
                format!(r"^{}://{}(?::\d+)?{}$", scheme_re, host_re, path_re)
            }
        }
    }

    /// Whether the URL (fragment ignored) matches this pattern.
    pub fn matches(&self, url: &str) -> bool {
        let url = url.split('#').next().unwrap_or(url);
        RegexBuilder::new(&self.to_regex())
            .case_insensitive(true)
            .build()
            .map(|re| re.is_match(url))
            .unwrap_or(false)
    }
}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_urls() {
        let pattern = MatchPattern::parse("<all_urls>").unwrap();
        assert!(pattern.matches("https://example.com/a"));
        assert!(pattern.matches("http://localhost:8080/"));
        assert!(!pattern.matches("chrome://settings"));
    }

    #[test]
    fn test_parse_rejects_missing_scheme() {
        assert!(MatchPattern::parse("example.com/*").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_scheme() {
        assert!(MatchPattern::parse("chrome://settings/*").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_path() {
        assert!(MatchPattern::parse("https://example.com").is_err());
    }

    #[test]
    fn test_parse_rejects_inner_wildcard() {
        assert!(MatchPattern::parse("https://www.*.com/*").is_err());
    }

    #[test]
    fn test_for_origin() {
        let pattern = MatchPattern::for_origin("https://example.com:8443/path/page?q=1#top").unwrap();
        assert_eq!(pattern.as_str(), "https://example.com/*");
        assert!(pattern.matches("https://example.com/other"));
        assert!(pattern.matches("https://example.com:8443/path/page?q=1"));
        assert!(!pattern.matches("https://evil.com/https://example.com/"));
        assert!(!pattern.matches("http://example.com/"));
    }

    #[test]
    fn test_for_origin_invalid_url() {
        assert!(MatchPattern::for_origin("not a url").is_err());
    }

    #[test]
    fn test_subdomain_wildcard() {
        let pattern = MatchPattern::parse("https://*.example.com/*").unwrap();
        assert!(pattern.matches("https://example.com/"));
        assert!(pattern.matches("https://docs.example.com/guide"));
        assert!(!pattern.matches("https://example.org/"));
    }

    #[test]
    fn test_scheme_wildcard() {
        let pattern = MatchPattern::parse("*://example.com/*").unwrap();
        assert!(pattern.matches("http://example.com/"));
        assert!(pattern.matches("https://example.com/"));
        assert!(!pattern.matches("file:///example.com/"));
    }

    #[test]
    fn test_path_glob() {
        let pattern = MatchPattern::parse("https://example.com/docs/*.html").unwrap();
        assert!(pattern.matches("https://example.com/docs/a.html"));
        assert!(!pattern.matches("https://example.com/blog/a.html"));
    }

    #[test]
    fn test_host_is_case_insensitive() {
        let pattern = MatchPattern::parse("https://Example.COM/*").unwrap();
        assert!(pattern.matches("https://example.com/"));
        assert!(pattern.matches("https://EXAMPLE.com/"));
    }

    #[test]
    fn test_display_is_raw() {
        let pattern = MatchPattern::parse("https://example.com/*").unwrap();
        assert_eq!(pattern.to_string(), "https://example.com/*");
    }
}
