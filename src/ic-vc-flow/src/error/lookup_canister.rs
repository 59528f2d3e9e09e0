use crate::error::reqwest::WrappedReqwestError;
use reqwest::header::ToStrError;
use reqwest::StatusCode;
use thiserror::Error;

/// Reasons an origin could not be resolved to a canister id.
///
/// Every variant means "not found" to the flow; they are kept apart for the logs.
#[derive(Error, Debug)]
pub enum LookupCanisterError {
    #[error("Invalid origin '{0}'")]
    InvalidOrigin(String, #[source] url::ParseError),

    #[error("HEAD request to origin {0} failed")]
    HeadRequestFailed(String, #[source] WrappedReqwestError),

    #[error("Bad response when looking for canister ID on origin {origin}: {status}")]
    BadStatus { origin: String, status: StatusCode },

    #[error("Canister ID header '{header}' was not set on origin {origin}")]
    MissingHeader {
        origin: String,
        header: &'static str,
    },

    #[error("Canister ID header set by origin {0} is not valid text")]
    InvalidHeader(String, #[source] ToStrError),
}

#[derive(Error, Debug)]
#[error("Failed to build HTTP client for canister lookup")]
pub struct BuildLocatorError(#[source] pub WrappedReqwestError);
