//! Response header fields as seen by the registration parser.
//!
//! Field names are matched case-insensitively. Repeated fields keep their
//! order so that list-valued headers can be recombined (RFC 9110 §5.3).

use std::collections::HashMap;

/// Lookup capability the registration parser needs from a response.
pub trait HeaderSource {
    /// All values of `name` joined with `", "`, or `None` if the field is absent.
    fn normalized_header(&self, name: &str) -> Option<String>;
}

/// Ordered, case-insensitive multimap of response header fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    fields: Vec<(String, String)>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds headers from raw response lines (as delivered by curl).
    ///
    /// A status line (`HTTP/...`) starts a new response and discards fields
    /// collected so far, so after a redirect chain or `100 Continue` only the
    /// final response remains. Folded continuation lines are joined to the
    /// previous value with a single space. Lines without `:` are ignored.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut headers = Self::new();
        for line in lines {
            let raw = line.as_ref().trim_end_matches(['\r', '\n']);
            if raw.starts_with("HTTP/") {
                headers.fields.clear();
                continue;
            }
            if raw.starts_with([' ', '\t']) {
                if let Some((_, value)) = headers.fields.last_mut() {
                    let folded = raw.trim();
                    if !folded.is_empty() {
                        if !value.is_empty() {
                            value.push(' ');
                        }
                        value.push_str(folded);
                    }
                }
                continue;
            }
            if let Some((name, value)) = raw.split_once(':') {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                headers.insert(name, value.trim());
            }
        }
        headers
    }

    /// Appends a field; existing fields with the same name are kept.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn get_normalized(&self, name: &str) -> Option<String> {
        let mut values = self.get_all(name).peekable();
        values.peek()?;
        Some(values.collect::<Vec<_>>().join(", "))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResponseHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl HeaderSource for ResponseHeaders {
    fn normalized_header(&self, name: &str) -> Option<String> {
        self.get_normalized(name)
    }
}

/// Header maps keyed by field name, e.g. custom headers carried on a request spec.
///
/// Keys differing only in case are all matched. Their values are joined in
/// key order, since the map itself has no stable iteration order.
impl HeaderSource for HashMap<String, String> {
    fn normalized_header(&self, name: &str) -> Option<String> {
        let mut matches: Vec<(&String, &String)> = self
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .collect();
        if matches.is_empty() {
            return None;
        }
        matches.sort_unstable_by(|a, b| a.0.cmp(b.0));
        Some(
            matches
                .into_iter()
                .map(|(_, v)| v.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lines_skips_status_and_blank_lines() {
        let lines = [
            "HTTP/1.1 200 OK",
            "Content-Length: 12345",
            "",
            "Sec-Session-Registration: (ES256);path=\"r\";challenge=\"c\"",
        ];
        let h = ResponseHeaders::from_lines(&lines);
        assert_eq!(h.len(), 2);
        assert_eq!(
            h.get_normalized("content-length").as_deref(),
            Some("12345")
        );
        assert_eq!(
            h.get_normalized("sec-session-registration").as_deref(),
            Some("(ES256);path=\"r\";challenge=\"c\"")
        );
    }

    #[test]
    fn from_lines_keeps_only_final_response() {
        let lines = [
            "HTTP/1.1 302 Found",
            "Location: https://example.com/next",
            "Sec-Session-Registration: (RS256);path=\"old\";challenge=\"x\"",
            "",
            "HTTP/1.1 200 OK",
            "Content-Type: text/html",
        ];
        let h = ResponseHeaders::from_lines(&lines);
        assert!(h.get_normalized("Sec-Session-Registration").is_none());
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn from_lines_joins_folded_values() {
        let lines = ["X-Long: first", "  second", "\tthird", "Other: 1"];
        let h = ResponseHeaders::from_lines(&lines);
        assert_eq!(
            h.get_normalized("x-long").as_deref(),
            Some("first second third")
        );
    }

    #[test]
    fn repeated_fields_are_combined_in_order() {
        let h: ResponseHeaders = [
            ("Sec-Session-Registration", "(ES256);path=\"a\";challenge=\"1\""),
            ("Vary", "Accept"),
            ("sec-session-registration", "(RS256);path=\"b\";challenge=\"2\""),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            h.get_normalized("Sec-Session-Registration").as_deref(),
            Some("(ES256);path=\"a\";challenge=\"1\", (RS256);path=\"b\";challenge=\"2\"")
        );
        assert_eq!(h.get_all("SEC-SESSION-REGISTRATION").count(), 2);
    }

    #[test]
    fn absent_field_is_none() {
        let h = ResponseHeaders::from_lines(&["Content-Length: 1"]);
        assert!(h.get_normalized("Sec-Session-Registration").is_none());
        assert!(ResponseHeaders::new().is_empty());
    }

    #[test]
    fn hash_map_source_is_case_insensitive() {
        let mut map = HashMap::new();
        map.insert("sec-session-registration".to_string(), "(ES256)".to_string());
        assert_eq!(
            map.normalized_header("Sec-Session-Registration").as_deref(),
            Some("(ES256)")
        );
        assert!(map.normalized_header("Cookie").is_none());
    }

    #[test]
    fn hash_map_source_combines_case_variant_keys() {
        for _ in 0..32 {
            let map: HashMap<String, String> = [
                ("sec-session-registration", "(RS256)"),
                ("Sec-Session-Registration", "(ES256)"),
                ("Vary", "Accept"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
            assert_eq!(
                map.normalized_header("SEC-SESSION-REGISTRATION").as_deref(),
                Some("(ES256), (RS256)")
            );
        }
    }
}
