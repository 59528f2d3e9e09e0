//! Canister discovery: which canister serves a given web origin.
use crate::error::{BuildLocatorError, LookupCanisterError, WrappedReqwestError};
use crate::provider::CanisterLookup;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use slog::{error, info, Logger};
use std::time::Duration;
use url::Url;

/// Header set by the boundary nodes on responses served by a canister.
pub const CANISTER_ID_HEADER: &str = "x-ic-canister-id";

/// Looks up canister ids by sending a `HEAD` request to an origin.
///
/// The request never follows redirects and carries no cookies or other
/// credentials. A single failed request is final: nothing is retried.
#[derive(Debug)]
pub struct CanisterLocator {
    client: reqwest::Client,
    logger: Logger,
}

impl CanisterLocator {
    pub fn new(timeout: Duration, logger: &Logger) -> Result<Self, BuildLocatorError> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| BuildLocatorError(WrappedReqwestError(e)))?;
        Ok(Self {
            client,
            logger: logger.clone(),
        })
    }

    /// Returns the canister id announced by `origin`, verbatim.
    pub async fn locate(&self, origin: &str) -> Result<String, LookupCanisterError> {
        let url = Url::parse(origin)
            .map_err(|e| LookupCanisterError::InvalidOrigin(origin.to_string(), e))?;

        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| {
                LookupCanisterError::HeadRequestFailed(origin.to_string(), WrappedReqwestError(e))
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LookupCanisterError::BadStatus {
                origin: origin.to_string(),
                status,
            });
        }

        let canister_id = response
            .headers()
            .get(CANISTER_ID_HEADER)
            .ok_or_else(|| LookupCanisterError::MissingHeader {
                origin: origin.to_string(),
                header: CANISTER_ID_HEADER,
            })?
            .to_str()
            .map_err(|e| LookupCanisterError::InvalidHeader(origin.to_string(), e))?;

        Ok(canister_id.to_string())
    }
}

impl CanisterLookup for CanisterLocator {
    async fn lookup_canister(&self, origin: &str) -> Result<String, LookupCanisterError> {
        match self.locate(origin).await {
            Ok(canister_id) => {
                info!(self.logger, "Origin is served by a canister";
                    "origin" => origin, "canister_id" => &canister_id);
                Ok(canister_id)
            }
            Err(e) => {
                error!(self.logger, "Could not look up canister ID: {}", e; "origin" => origin);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator() -> CanisterLocator {
        let logger = Logger::root(slog::Discard, slog::o!());
        CanisterLocator::new(Duration::from_secs(5), &logger).unwrap()
    }

    #[tokio::test]
    async fn returns_canister_id_from_header() {
        let _m = mockito::mock("HEAD", "/issuer-ok")
            .with_status(200)
            .with_header(CANISTER_ID_HEADER, "abcde-aaaaa")
            .create();

        let origin = format!("{}/issuer-ok", mockito::server_url());
        let canister_id = locator().locate(&origin).await.unwrap();
        assert_eq!(canister_id, "abcde-aaaaa");
    }

    #[tokio::test]
    async fn not_found_status_is_not_found() {
        let _m = mockito::mock("HEAD", "/issuer-404")
            .with_status(404)
            .with_header(CANISTER_ID_HEADER, "abcde-aaaaa")
            .create();

        let origin = format!("{}/issuer-404", mockito::server_url());
        let result = locator().locate(&origin).await;
        assert!(matches!(
            result,
            Err(LookupCanisterError::BadStatus { status, .. }) if status == StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn missing_header_is_not_found() {
        let _m = mockito::mock("HEAD", "/issuer-no-header")
            .with_status(200)
            .create();

        let origin = format!("{}/issuer-no-header", mockito::server_url());
        let result = locator().locate(&origin).await;
        assert!(matches!(
            result,
            Err(LookupCanisterError::MissingHeader { header: CANISTER_ID_HEADER, .. })
        ));
    }

    #[tokio::test]
    async fn redirects_are_not_followed() {
        let target = format!("{}/issuer-redirect-target", mockito::server_url());
        let _redirect = mockito::mock("HEAD", "/issuer-redirect")
            .with_status(302)
            .with_header("location", &target)
            .create();
        let _target = mockito::mock("HEAD", "/issuer-redirect-target")
            .with_status(200)
            .with_header(CANISTER_ID_HEADER, "abcde-aaaaa")
            .expect(0)
            .create();

        let origin = format!("{}/issuer-redirect", mockito::server_url());
        let result = locator().locate(&origin).await;
        assert!(matches!(
            result,
            Err(LookupCanisterError::BadStatus { status, .. }) if status == StatusCode::FOUND
        ));
        _target.assert();
    }

    #[tokio::test]
    async fn invalid_origin_is_rejected_without_a_request() {
        let result = locator().locate("not an origin").await;
        assert!(matches!(result, Err(LookupCanisterError::InvalidOrigin(..))));
    }
}
