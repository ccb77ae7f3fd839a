//! Registration endpoint resolution and the policy deciding which endpoints
//! a server may point the client at.

use serde::{Deserialize, Serialize};
use url::{Host, Url};

/// How far the registration endpoint may be from the request URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointScope {
    /// Scheme, host and port must match the request URL.
    #[default]
    SameOrigin,
    /// Host must match; scheme and port may differ.
    SameHost,
    /// Any secure endpoint.
    AnySecure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointPolicy {
    pub scope: EndpointScope,
    /// Treat `http://localhost` and loopback addresses as secure.
    pub allow_localhost_http: bool,
}

impl Default for EndpointPolicy {
    fn default() -> Self {
        Self {
            scope: EndpointScope::SameOrigin,
            allow_localhost_http: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("path does not resolve against the request URL: {0}")]
    Unresolvable(#[from] url::ParseError),
    #[error("endpoint scheme `{scheme}` is not secure")]
    Insecure { scheme: String },
    #[error("endpoint {endpoint} is outside the allowed scope")]
    OutOfScope { endpoint: String },
}

impl EndpointPolicy {
    /// Resolves the `path` parameter against `request_url` and checks the
    /// result against this policy.
    ///
    /// Percent-escapes for printable ASCII other than `%` are decoded first, so
    /// `%2Fregister` and `/register` name the same endpoint.
    pub fn resolve(&self, request_url: &Url, path: &str) -> Result<Url, EndpointError> {
        let endpoint = request_url.join(&unescape_path(path))?;

        if !is_potentially_trustworthy(&endpoint, self.allow_localhost_http) {
            return Err(EndpointError::Insecure {
                scheme: endpoint.scheme().to_string(),
            });
        }

        let in_scope = match self.scope {
            EndpointScope::SameOrigin => endpoint.origin() == request_url.origin(),
            EndpointScope::SameHost => endpoint.host() == request_url.host(),
            EndpointScope::AnySecure => true,
        };
        if !in_scope {
            return Err(EndpointError::OutOfScope {
                endpoint: endpoint.to_string(),
            });
        }

        Ok(endpoint)
    }
}

fn is_potentially_trustworthy(url: &Url, allow_localhost_http: bool) -> bool {
    match url.scheme() {
        "https" | "wss" => true,
        "http" | "ws" => allow_localhost_http && is_loopback(url.host()),
        _ => false,
    }
}

fn is_loopback(host: Option<Host<&str>>) -> bool {
    match host {
        Some(Host::Domain(domain)) => domain == "localhost" || domain.ends_with(".localhost"),
        Some(Host::Ipv4(addr)) => addr.is_loopback(),
        Some(Host::Ipv6(addr)) => addr.is_loopback(),
        None => false,
    }
}

/// Decodes `%XX` escapes that stand for printable, non-space ASCII other than `%`.
/// Everything else (`%25`, spaces, controls, non-ASCII, malformed escapes) stays as written.
fn unescape_path(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(high), Some(low)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                let decoded = high << 4 | low;
                if (0x21..=0x7e).contains(&decoded) && decoded != b'%' {
                    out.push(decoded as char);
                    i += 3;
                    continue;
                }
            }
        }
        // Copy one full UTF-8 character.
        let ch_len = input[i..].chars().next().map_or(1, char::len_utf8);
        out.push_str(&input[i..i + ch_len]);
        i += ch_len;
    }
    out
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
