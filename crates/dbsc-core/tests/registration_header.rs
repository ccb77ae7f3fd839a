//! Integration test: raw response header lines through to registration requests.

use dbsc_core::{RegistrationParams, ResponseHeaders, SignatureAlgorithm};
use url::Url;

fn extract(request: &str, lines: &[&str]) -> Vec<RegistrationParams> {
    let request_url = Url::parse(request).unwrap();
    let headers = ResponseHeaders::from_lines(lines);
    RegistrationParams::create_if_valid(&request_url, &headers)
}

#[test]
fn single_member_from_response() {
    let params = extract(
        "https://example.com/start",
        &[
            "HTTP/2 200",
            "content-type: text/html",
            "sec-session-registration: (RS256 ES256);path=\"register\";challenge=\"abc\"",
        ],
    );
    assert_eq!(params.len(), 1);
    let (endpoint, algorithms, challenge) = params.into_iter().next().unwrap().into_parts();
    assert_eq!(endpoint.as_str(), "https://example.com/register");
    assert_eq!(
        algorithms,
        vec![
            SignatureAlgorithm::RsaPkcs1Sha256,
            SignatureAlgorithm::EcdsaSha256
        ]
    );
    assert_eq!(challenge, "abc");
}

#[test]
fn unrecognized_algorithm_yields_nothing() {
    let params = extract(
        "https://example.com/start",
        &["Sec-Session-Registration: (BOGUS);path=\"register\";challenge=\"abc\""],
    );
    assert!(params.is_empty());
}

#[test]
fn valid_member_survives_sibling_missing_challenge() {
    let params = extract(
        "https://example.com/start",
        &["Sec-Session-Registration: (ES256);path=\"register\", (RS256);path=\"login/register\";challenge=\"ok\""],
    );
    assert_eq!(params.len(), 1);
    assert_eq!(
        params[0].registration_endpoint().as_str(),
        "https://example.com/login/register"
    );
    assert_eq!(params[0].challenge(), "ok");
}

#[test]
fn header_absent_yields_nothing() {
    let params = extract(
        "https://example.com/start",
        &["HTTP/1.1 204 No Content", "Cache-Control: no-store"],
    );
    assert!(params.is_empty());
}

#[test]
fn split_across_field_lines() {
    let params = extract(
        "https://example.com/app/",
        &[
            "Sec-Session-Registration: (ES256);path=\"one\";challenge=\"1\"",
            "Set-Cookie: a=b",
            "Sec-Session-Registration: (RS256);path=\"/two\";challenge=\"2\"",
        ],
    );
    let endpoints: Vec<_> = params
        .iter()
        .map(|p| p.registration_endpoint().as_str())
        .collect();
    assert_eq!(
        endpoints,
        ["https://example.com/app/one", "https://example.com/two"]
    );
}

#[test]
fn malformed_field_line_drops_whole_header() {
    // Combined value fails to parse, so nothing is returned at all.
    let params = extract(
        "https://example.com/",
        &[
            "Sec-Session-Registration: (ES256);path=\"one\";challenge=\"1\"",
            "Sec-Session-Registration: (RS256",
        ],
    );
    assert!(params.is_empty());
}

#[test]
fn localhost_development_server() {
    let params = extract(
        "http://localhost:3000/login",
        &["Sec-Session-Registration: (ES256);path=\"/dbsc/start\";challenge=\"dev\""],
    );
    assert_eq!(
        params[0].registration_endpoint().as_str(),
        "http://localhost:3000/dbsc/start"
    );
}
