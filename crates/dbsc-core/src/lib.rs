pub mod config;
pub mod logging;

pub mod algorithm;
pub mod endpoint;
pub mod fetch_head;
pub mod registration;
pub mod response_headers;
pub mod structured_header;

pub use algorithm::{AlgorithmMapper, JoseAlgorithms, SignatureAlgorithm};
pub use endpoint::{EndpointPolicy, EndpointScope};
pub use registration::{RegistrationParams, REGISTRATION_HEADER};
pub use response_headers::{HeaderSource, ResponseHeaders};
