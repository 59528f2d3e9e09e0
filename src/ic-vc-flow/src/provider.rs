//! # Provider
//!
//! The traits in this module are the seams between the presentation flow and
//! the parties it talks to: the identity provider, the issuer, the user and the
//! relying party's request channel. The canister-backed implementations live in
//! [`crate::canister_api`]; tests and embedders can substitute their own.
use crate::canister_api::types::internet_identity::{
    GetDelegationResponse, GetIdAliasError, GetIdAliasRequest, IdAliasCredentials,
    IdentityNumber, PrepareIdAliasError, PrepareIdAliasRequest, PreparedIdAlias, SessionKey,
    Timestamp, UserKey,
};
use crate::canister_api::types::issuer::{
    GetCredentialRequest, Icrc21ConsentInfo, Icrc21Error, Icrc21VcConsentMessageRequest,
    IssueCredentialError, IssuedCredentialData, PrepareCredentialRequest, PreparedCredentialData,
};
use crate::error::{CanisterCallError, LoginError, LookupCanisterError};
use candid::Principal;
use ic_agent::Identity;
use std::future::Future;
use std::sync::Arc;

/// Resolves a web origin to the id of the canister serving it.
pub trait CanisterLookup: Send + Sync {
    /// Returns the canister id exactly as announced by the origin.
    fn lookup_canister(
        &self,
        origin: &str,
    ) -> impl Future<Output = Result<String, LookupCanisterError>> + Send;
}

/// Authenticates the user to the identity provider for a given anchor.
pub trait Authenticator: Send + Sync {
    type Connection: IdentityProviderConnection;

    /// Log in as `identity_number`. If an error is returned, the flow aborts.
    fn login(
        &self,
        identity_number: IdentityNumber,
    ) -> impl Future<Output = Result<Self::Connection, LoginError>> + Send;
}

/// A session with the identity provider, authenticated for one anchor.
pub trait IdentityProviderConnection: Send + Sync {
    fn identity_number(&self) -> IdentityNumber;

    /// The principal of the user on `origin`.
    fn get_principal(
        &self,
        origin: &str,
    ) -> impl Future<Output = Result<Principal, CanisterCallError>> + Send;

    fn prepare_id_alias(
        &self,
        request: PrepareIdAliasRequest,
    ) -> impl Future<
        Output = Result<Result<PreparedIdAlias, PrepareIdAliasError>, CanisterCallError>,
    > + Send;

    fn get_id_alias(
        &self,
        request: GetIdAliasRequest,
    ) -> impl Future<
        Output = Result<Result<IdAliasCredentials, GetIdAliasError>, CanisterCallError>,
    > + Send;

    fn prepare_delegation(
        &self,
        origin: &str,
        session_key: SessionKey,
        max_time_to_live: Option<u64>,
    ) -> impl Future<Output = Result<(UserKey, Timestamp), CanisterCallError>> + Send;

    fn get_delegation(
        &self,
        origin: &str,
        session_key: SessionKey,
        expiration: Timestamp,
    ) -> impl Future<Output = Result<GetDelegationResponse, CanisterCallError>> + Send;
}

/// Calls on a verifiable credential issuer canister.
///
/// The issuer canister is named by the id its origin announced, unparsed.
/// Credential calls take the identity to sign with: the flow always passes a
/// delegated identity scoped to the issuer origin.
pub trait VcIssuerClient: Send + Sync {
    fn consent_message(
        &self,
        issuer: &str,
        request: Icrc21VcConsentMessageRequest,
    ) -> impl Future<Output = Result<Result<Icrc21ConsentInfo, Icrc21Error>, CanisterCallError>>
           + Send;

    fn prepare_credential(
        &self,
        issuer: &str,
        identity: Arc<dyn Identity>,
        request: PrepareCredentialRequest,
    ) -> impl Future<
        Output = Result<Result<PreparedCredentialData, IssueCredentialError>, CanisterCallError>,
    > + Send;

    fn get_credential(
        &self,
        issuer: &str,
        identity: Arc<dyn Identity>,
        request: GetCredentialRequest,
    ) -> impl Future<
        Output = Result<Result<IssuedCredentialData, IssueCredentialError>, CanisterCallError>,
    > + Send;
}
