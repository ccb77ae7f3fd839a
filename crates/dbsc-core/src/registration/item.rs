//! Validation of a single `Sec-Session-Registration` list member.

use url::Url;

use crate::algorithm::{AlgorithmMapper, SignatureAlgorithm};
use crate::endpoint::EndpointPolicy;
use crate::structured_header::{ListEntry, Parameters};

use super::error::Rejection;
use super::RegistrationParams;

const PATH_PARAM: &str = "path";
const CHALLENGE_PARAM: &str = "challenge";

/// Checks one member and builds its parameters, or says why it is unusable.
///
/// Order of checks: algorithms, `challenge`, `path`. Any failure rejects the
/// whole member; nothing partial is returned.
pub(crate) fn validate_member(
    request_url: &Url,
    member: &ListEntry,
    policy: &EndpointPolicy,
    algorithms: &dyn AlgorithmMapper,
) -> Result<RegistrationParams, Rejection> {
    let ListEntry::InnerList(inner) = member else {
        return Err(Rejection::NotInnerList);
    };

    // Non-token entries and unknown tokens are skipped, order kept.
    let supported_algorithms: Vec<SignatureAlgorithm> = inner
        .items
        .iter()
        .filter_map(|item| item.bare_item.as_token())
        .filter_map(|token| algorithms.map_token(token))
        .collect();
    if supported_algorithms.is_empty() {
        return Err(Rejection::NoRecognizedAlgorithm);
    }

    let challenge = string_param(&inner.params, CHALLENGE_PARAM)?;
    if challenge.is_empty() {
        return Err(Rejection::EmptyChallenge);
    }

    // A blank path would point back at the request URL itself.
    let path = string_param(&inner.params, PATH_PARAM)?;
    if path.trim().is_empty() {
        return Err(Rejection::BlankPath);
    }
    let registration_endpoint = policy.resolve(request_url, path)?;

    Ok(RegistrationParams {
        registration_endpoint,
        supported_algorithms,
        challenge: challenge.to_string(),
    })
}

fn string_param<'a>(params: &'a Parameters, key: &'static str) -> Result<&'a str, Rejection> {
    params
        .get(key)
        .ok_or(Rejection::MissingParameter(key))?
        .as_string()
        .ok_or(Rejection::NotAString(key))
}
