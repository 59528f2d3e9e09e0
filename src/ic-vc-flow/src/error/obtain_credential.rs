use crate::canister_api::types::issuer::IssueCredentialError;
use crate::error::canister_call::CanisterCallError;
use crate::error::fetch_delegation::FetchDelegationError;
use thiserror::Error;

/// Errors encountered while obtaining a credential from the issuer.
#[derive(Error, Debug)]
pub enum ObtainCredentialError {
    #[error("Could not authenticate to the issuer")]
    AuthenticateFailed(#[from] FetchDelegationError),

    #[error("Failed to call prepare_credential")]
    PrepareCallFailed(#[source] CanisterCallError),

    #[error("Issuer refused to prepare the credential: {0:?}")]
    PrepareRejected(IssueCredentialError),

    #[error("Failed to call get_credential")]
    GetCallFailed(#[source] CanisterCallError),

    #[error("Issuer refused to issue the credential: {0:?}")]
    GetRejected(IssueCredentialError),
}
