//! Error types

mod canister_call;
mod delegation_chain;
mod fetch_delegation;
mod generate_key;
mod get_consent_message;
mod load_config;
mod login;
mod lookup_canister;
mod obtain_credential;
mod reqwest;
mod request_aliases;
mod respond;

pub use canister_call::CanisterCallError;
pub use delegation_chain::DelegationChainError;
pub use fetch_delegation::FetchDelegationError;
pub use generate_key::GenerateKeyError;
pub use get_consent_message::GetConsentMessageError;
pub use load_config::LoadConfigError;
pub use login::LoginError;
pub use lookup_canister::{BuildLocatorError, LookupCanisterError};
pub use obtain_credential::ObtainCredentialError;
pub use reqwest::WrappedReqwestError;
pub use request_aliases::RequestAliasesError;
pub use respond::RespondError;
