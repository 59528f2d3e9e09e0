use crate::error::canister_call::CanisterCallError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequestAliasesError {
    #[error("Could not prepare ID alias: authentication failed: {0}")]
    PrepareAuthenticationFailed(String),

    #[error("Could not prepare ID alias")]
    PrepareFailed(#[source] CanisterCallError),

    #[error("Could not get ID alias: authentication failed: {0}")]
    GetAuthenticationFailed(String),

    #[error("Could not get ID alias: no such credentials: {0}")]
    NoSuchCredentials(String),

    #[error("Could not get ID alias")]
    GetFailed(#[source] CanisterCallError),
}

impl RequestAliasesError {
    /// Whether the identity provider rejected the session, as opposed to an
    /// internal failure.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            RequestAliasesError::PrepareAuthenticationFailed(_)
                | RequestAliasesError::GetAuthenticationFailed(_)
        )
    }
}
