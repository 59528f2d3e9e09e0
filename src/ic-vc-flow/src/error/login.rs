use crate::canister_api::types::internet_identity::IdentityNumber;
use crate::error::canister_call::CanisterCallError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Failed to reach the identity provider")]
    ConnectFailed(#[source] CanisterCallError),

    #[error("Not authenticated for identity {0}")]
    NotAuthenticated(IdentityNumber, #[source] CanisterCallError),
}
