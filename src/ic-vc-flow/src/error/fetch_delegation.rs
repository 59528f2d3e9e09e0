use crate::error::canister_call::CanisterCallError;
use crate::error::delegation_chain::DelegationChainError;
use crate::error::generate_key::GenerateKeyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchDelegationError {
    #[error(transparent)]
    GenerateKey(#[from] GenerateKeyError),

    #[error("Failed to prepare delegation for {0}")]
    PrepareDelegationFailed(String, #[source] CanisterCallError),

    #[error("Failed to get delegation for {0}")]
    GetDelegationFailed(String, #[source] CanisterCallError),

    #[error("No delegation was prepared for {0}")]
    NoSuchDelegation(String),

    #[error("Invalid delegation chain")]
    InvalidChain(#[from] DelegationChainError),
}
