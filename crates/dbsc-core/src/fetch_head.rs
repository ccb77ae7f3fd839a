//! Response header fetch for inspecting live servers.
//!
//! Uses the curl crate (libcurl) to GET a URL, discard the body and keep the
//! response header lines. Redirects are not followed: a registration header
//! belongs to the response of the URL that produced it, and resolving its
//! `path` against a different URL would be wrong.

use anyhow::{Context, Result};
use std::str;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::response_headers::ResponseHeaders;

/// Status and headers of a fetched response.
#[derive(Debug, Clone)]
pub struct FetchedHeaders {
    pub status: u32,
    pub headers: ResponseHeaders,
}

/// Performs a GET request and returns the final response's headers.
///
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn fetch_headers(url: &str, cfg: &FetchConfig) -> Result<FetchedHeaders> {
    let mut lines: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.get(true)?;
    easy.follow_location(false)?;
    easy.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))?;
    easy.timeout(Duration::from_secs(cfg.timeout_secs))?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| Ok(data.len()))?;
        transfer
            .perform()
            .with_context(|| format!("GET {url} failed"))?;
    }

    let status = easy.response_code().context("no response code")?;
    let headers = ResponseHeaders::from_lines(&lines);
    tracing::debug!(url, status, fields = headers.len(), "fetched response headers");

    Ok(FetchedHeaders { status, headers })
}
