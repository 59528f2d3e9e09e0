//! The issuer side of a flow: consent message and credential issuance.
use crate::canister_api::types::internet_identity::SignedIdAlias;
use crate::canister_api::types::issuer::{
    CredentialSpec, GetCredentialRequest, Icrc21ConsentInfo, Icrc21ConsentPreferences,
    Icrc21VcConsentMessageRequest, IssuedCredentialData, IssuerSignedIdAlias,
    PrepareCredentialRequest, PreparedCredentialData,
};
use crate::delegation::delegated_identity;
use crate::error::{GetConsentMessageError, ObtainCredentialError};
use crate::provider::{IdentityProviderConnection, VcIssuerClient};
use ic_agent::Identity;
use slog::{error, info, Logger};
use std::sync::Arc;

pub async fn get_consent_message<I: VcIssuerClient>(
    issuer: &I,
    issuer_canister_id: &str,
    credential_spec: &CredentialSpec,
    language: &str,
    logger: &Logger,
) -> Result<Icrc21ConsentInfo, GetConsentMessageError> {
    let request = Icrc21VcConsentMessageRequest {
        preferences: Icrc21ConsentPreferences {
            language: language.to_string(),
        },
        credential_spec: credential_spec.clone(),
    };
    issuer
        .consent_message(issuer_canister_id, request)
        .await
        .map_err(GetConsentMessageError::CallFailed)
        .and_then(|result| result.map_err(GetConsentMessageError::Rejected))
        .inspect_err(|e| error!(logger, "{}", e; "issuer" => issuer_canister_id))
}

pub async fn prepare_credential<I: VcIssuerClient>(
    issuer: &I,
    issuer_canister_id: &str,
    identity: Arc<dyn Identity>,
    issuer_alias_credential: &SignedIdAlias,
    credential_spec: &CredentialSpec,
) -> Result<PreparedCredentialData, ObtainCredentialError> {
    let request = PrepareCredentialRequest {
        signed_id_alias: IssuerSignedIdAlias {
            credential_jws: issuer_alias_credential.credential_jws.clone(),
        },
        credential_spec: credential_spec.clone(),
    };
    issuer
        .prepare_credential(issuer_canister_id, identity, request)
        .await
        .map_err(ObtainCredentialError::PrepareCallFailed)?
        .map_err(ObtainCredentialError::PrepareRejected)
}

pub async fn get_credential<I: VcIssuerClient>(
    issuer: &I,
    issuer_canister_id: &str,
    identity: Arc<dyn Identity>,
    prepared: PreparedCredentialData,
    issuer_alias_credential: &SignedIdAlias,
    credential_spec: &CredentialSpec,
) -> Result<IssuedCredentialData, ObtainCredentialError> {
    let request = GetCredentialRequest {
        signed_id_alias: IssuerSignedIdAlias {
            credential_jws: issuer_alias_credential.credential_jws.clone(),
        },
        credential_spec: credential_spec.clone(),
        prepared_context: prepared.prepared_context,
    };
    issuer
        .get_credential(issuer_canister_id, identity, request)
        .await
        .map_err(ObtainCredentialError::GetCallFailed)?
        .map_err(ObtainCredentialError::GetRejected)
}

/// Arguments for [`issue_credential`].
#[derive(Clone, Copy, Debug)]
pub struct IssueCredentialArgs<'a> {
    pub issuer_canister_id: &'a str,
    pub issuer_origin: &'a str,
    pub issuer_alias_credential: &'a SignedIdAlias,
    pub credential_spec: &'a CredentialSpec,
    /// Lifetime of the delegation used to talk to the issuer, in nanoseconds.
    pub max_time_to_live: u64,
}

/// Get a credential issued, talking to the issuer as a delegated identity
/// derived for the issuer origin rather than with the user's own session.
pub async fn issue_credential<C, I>(
    connection: &C,
    issuer: &I,
    args: IssueCredentialArgs<'_>,
    logger: &Logger,
) -> Result<IssuedCredentialData, ObtainCredentialError>
where
    C: IdentityProviderConnection,
    I: VcIssuerClient,
{
    let identity: Arc<dyn Identity> = Arc::new(
        delegated_identity(connection, args.issuer_origin, args.max_time_to_live, logger)
            .await
            .inspect_err(|e| error!(logger, "Could not fetch delegation: {}", e))?,
    );

    let prepared = prepare_credential(
        issuer,
        args.issuer_canister_id,
        identity.clone(),
        args.issuer_alias_credential,
        args.credential_spec,
    )
    .await
    .inspect_err(|e| error!(logger, "{}", e))?;

    let issued = get_credential(
        issuer,
        args.issuer_canister_id,
        identity,
        prepared,
        args.issuer_alias_credential,
        args.credential_spec,
    )
    .await
    .inspect_err(|e| error!(logger, "{}", e))?;

    info!(logger, "Credential issued"; "issuer" => args.issuer_canister_id);
    Ok(issued)
}
