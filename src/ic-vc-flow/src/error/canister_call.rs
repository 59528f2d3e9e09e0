use candid::types::principal::PrincipalError;
use ic_agent::AgentError;
use ic_utils::canister::CanisterBuilderError;
use thiserror::Error;

/// Errors encountered while talking to a canister, before its reply could be
/// interpreted.
#[derive(Error, Debug)]
pub enum CanisterCallError {
    #[error("Failed to build agent")]
    BuildAgentFailed(#[source] AgentError),

    #[error("Failed to fetch root key")]
    FetchRootKeyFailed(#[source] AgentError),

    #[error("Invalid canister id '{0}'")]
    InvalidCanisterId(String, #[source] PrincipalError),

    #[error("Failed to construct canister caller")]
    BuildCanisterFailed(#[from] CanisterBuilderError),

    #[error("Failed to call '{method}'")]
    CallFailed {
        method: &'static str,
        source: AgentError,
    },
}
