//! `Sec-Session-Registration` header: turns a response into device-bound
//! session registration requests.
//!
//! Header format (a structured-header List):
//!
//! ```text
//! Sec-Session-Registration: (RS256 ES256);path="start";challenge="code"
//! ```
//!
//! Each member names the signature algorithms the server accepts, the
//! endpoint to register with, and a challenge to sign. Members that fail
//! validation are dropped without affecting their siblings; callers only
//! ever see the valid ones.

mod error;
mod item;

use url::Url;

use crate::algorithm::{AlgorithmMapper, JoseAlgorithms, SignatureAlgorithm};
use crate::endpoint::EndpointPolicy;
use crate::response_headers::HeaderSource;
use crate::structured_header::{self, ListEntry};

/// Response header that requests a device-bound session.
pub const REGISTRATION_HEADER: &str = "Sec-Session-Registration";

/// One validated registration request.
///
/// Deliberately not `Clone`: each request is handed to exactly one consumer,
/// which takes it apart with [`RegistrationParams::into_parts`].
#[derive(Debug, PartialEq, Eq)]
pub struct RegistrationParams {
    registration_endpoint: Url,
    supported_algorithms: Vec<SignatureAlgorithm>,
    challenge: String,
}

impl RegistrationParams {
    /// Returns every valid registration request in `headers`, in header order.
    ///
    /// Uses the default [`EndpointPolicy`] and the standard algorithm tokens.
    /// That policy is same-origin, so members whose `path` resolves to another
    /// origin are dropped; use [`create_if_valid_with`](Self::create_if_valid_with)
    /// to relax it. An absent or unparseable header yields an empty vec.
    pub fn create_if_valid<H>(request_url: &Url, headers: &H) -> Vec<Self>
    where
        H: HeaderSource + ?Sized,
    {
        Self::create_if_valid_with(
            request_url,
            headers,
            &EndpointPolicy::default(),
            &JoseAlgorithms,
        )
    }

    /// Like [`create_if_valid`](Self::create_if_valid) with an explicit
    /// endpoint policy and algorithm mapping.
    pub fn create_if_valid_with<H>(
        request_url: &Url,
        headers: &H,
        policy: &EndpointPolicy,
        algorithms: &dyn AlgorithmMapper,
    ) -> Vec<Self>
    where
        H: HeaderSource + ?Sized,
    {
        if request_url.cannot_be_a_base() {
            tracing::debug!(%request_url, "request URL cannot anchor a registration endpoint");
            return Vec::new();
        }

        let Some(value) = headers.normalized_header(REGISTRATION_HEADER) else {
            return Vec::new();
        };

        let list = match structured_header::parse_list(&value) {
            Ok(list) => list,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unparseable {}", REGISTRATION_HEADER);
                return Vec::new();
            }
        };

        list.iter()
            .enumerate()
            .filter_map(|(index, member)| {
                match item::validate_member(request_url, member, policy, algorithms) {
                    Ok(params) => Some(params),
                    Err(reason) => {
                        tracing::debug!(index, %reason, "dropping registration member");
                        None
                    }
                }
            })
            .collect()
    }

    /// Validates a single parsed list member against `request_url`.
    pub fn from_member(
        request_url: &Url,
        member: &ListEntry,
        policy: &EndpointPolicy,
        algorithms: &dyn AlgorithmMapper,
    ) -> Option<Self> {
        item::validate_member(request_url, member, policy, algorithms).ok()
    }

    /// Builds a request directly, bypassing header parsing. For tests of
    /// code that consumes registration requests.
    pub fn create_for_testing(
        registration_endpoint: Url,
        supported_algorithms: Vec<SignatureAlgorithm>,
        challenge: impl Into<String>,
    ) -> Self {
        Self {
            registration_endpoint,
            supported_algorithms,
            challenge: challenge.into(),
        }
    }

    pub fn registration_endpoint(&self) -> &Url {
        &self.registration_endpoint
    }

    /// Algorithms in the server's order of preference. Never empty for
    /// parsed requests.
    pub fn supported_algorithms(&self) -> &[SignatureAlgorithm] {
        &self.supported_algorithms
    }

    pub fn challenge(&self) -> &str {
        &self.challenge
    }

    /// Consumes the request: `(endpoint, algorithms, challenge)`.
    pub fn into_parts(self) -> (Url, Vec<SignatureAlgorithm>, String) {
        (
            self.registration_endpoint,
            self.supported_algorithms,
            self.challenge,
        )
    }
}
