use crate::canister_api::types::issuer::Icrc21Error;
use crate::error::canister_call::CanisterCallError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GetConsentMessageError {
    #[error("Failed to call vc_consent_message")]
    CallFailed(#[source] CanisterCallError),

    #[error("Issuer returned no consent message: {0:?}")]
    Rejected(Icrc21Error),
}
