//! Reasons a registration member is dropped.
//!
//! These only reach the debug log. Callers see a dropped member as absent.

use crate::endpoint::EndpointError;

#[derive(Debug, thiserror::Error)]
pub(crate) enum Rejection {
    #[error("member is not an inner list of algorithms")]
    NotInnerList,
    #[error("no recognized signature algorithm")]
    NoRecognizedAlgorithm,
    #[error("missing `{0}` parameter")]
    MissingParameter(&'static str),
    #[error("`{0}` parameter is not a string")]
    NotAString(&'static str),
    #[error("empty challenge")]
    EmptyChallenge,
    #[error("blank path")]
    BlankPath,
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}
