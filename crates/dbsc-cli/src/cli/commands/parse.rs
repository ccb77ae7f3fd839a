//! `dbsc parse --url <url> --header <value>` – validate header values offline.

use anyhow::{Context, Result};
use dbsc_core::config::DbscConfig;
use dbsc_core::{JoseAlgorithms, RegistrationParams, ResponseHeaders, REGISTRATION_HEADER};
use std::path::Path;
use url::Url;

use super::output::render;

pub fn run_parse(
    cfg: &DbscConfig,
    url: &str,
    header_values: &[String],
    headers_file: Option<&Path>,
    json: bool,
) -> Result<()> {
    let request_url = Url::parse(url).with_context(|| format!("invalid request URL: {url}"))?;
    let headers = collect_headers(header_values, headers_file)?;
    let params = RegistrationParams::create_if_valid_with(
        &request_url,
        &headers,
        &cfg.endpoint,
        &JoseAlgorithms,
    );
    tracing::info!(url = %request_url, valid = params.len(), "parsed registration headers");
    print!("{}", render(params, json)?);
    Ok(())
}

/// Header lines from `headers_file` (if any), then each `--header` value as
/// its own `Sec-Session-Registration` field.
pub(super) fn collect_headers(
    header_values: &[String],
    headers_file: Option<&Path>,
) -> Result<ResponseHeaders> {
    let mut headers = match headers_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read headers file: {}", path.display()))?;
            let lines: Vec<&str> = text.lines().collect();
            ResponseHeaders::from_lines(&lines)
        }
        None => ResponseHeaders::new(),
    };
    for value in header_values {
        headers.insert(REGISTRATION_HEADER, value.trim());
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn collect_headers_from_values() {
        let values = vec!["(ES256);path=\"a\";challenge=\"1\"".to_string()];
        let headers = collect_headers(&values, None).unwrap();
        assert_eq!(headers.get_all(REGISTRATION_HEADER).count(), 1);
    }

    #[test]
    fn collect_headers_from_file_then_values() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nSec-Session-Registration: (RS256);path=\"f\";challenge=\"file\"\r\n\r\n"
        )
        .unwrap();
        f.flush().unwrap();
        let values = vec!["(ES256);path=\"a\";challenge=\"arg\"".to_string()];
        let headers = collect_headers(&values, Some(f.path())).unwrap();

        let url = Url::parse("https://example.com/").unwrap();
        let params = RegistrationParams::create_if_valid(&url, &headers);
        let challenges: Vec<_> = params.iter().map(|p| p.challenge()).collect();
        assert_eq!(challenges, ["file", "arg"]);
    }

    #[test]
    fn collect_headers_missing_file_errs() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        assert!(collect_headers(&[], Some(missing.as_path())).is_err());
    }
}
