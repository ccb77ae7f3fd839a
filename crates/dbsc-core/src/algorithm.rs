//! Signature algorithm identifiers and the header-token mapping.

use serde::Serialize;
use std::fmt;

/// Signature schemes a client may use to prove possession of the session key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureAlgorithm {
    RsaPkcs1Sha1,
    RsaPkcs1Sha256,
    EcdsaSha256,
    RsaPssSha256,
}

impl SignatureAlgorithm {
    /// Maps a registration-header token to an algorithm. Case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ES256" => Some(SignatureAlgorithm::EcdsaSha256),
            "RS256" => Some(SignatureAlgorithm::RsaPkcs1Sha256),
            _ => None,
        }
    }

    /// JOSE (RFC 7518) name, if the scheme has one.
    pub fn jose_name(self) -> Option<&'static str> {
        match self {
            SignatureAlgorithm::RsaPkcs1Sha256 => Some("RS256"),
            SignatureAlgorithm::EcdsaSha256 => Some("ES256"),
            SignatureAlgorithm::RsaPssSha256 => Some("PS256"),
            SignatureAlgorithm::RsaPkcs1Sha1 => None,
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.jose_name() {
            Some(name) => f.write_str(name),
            None => f.write_str("RSA-PKCS1-SHA1"),
        }
    }
}

/// Token-to-algorithm seam used by the item validator.
pub trait AlgorithmMapper {
    fn map_token(&self, token: &str) -> Option<SignatureAlgorithm>;
}

/// The token spellings servers send today (`ES256`, `RS256`).
#[derive(Debug, Clone, Copy, Default)]
pub struct JoseAlgorithms;

impl AlgorithmMapper for JoseAlgorithms {
    fn map_token(&self, token: &str) -> Option<SignatureAlgorithm> {
        SignatureAlgorithm::from_token(token)
    }
}
