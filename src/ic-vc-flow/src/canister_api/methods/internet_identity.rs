use crate::canister_api::methods::method_names::{
    GET_DELEGATION, GET_ID_ALIAS, GET_PRINCIPAL, PREPARE_DELEGATION, PREPARE_ID_ALIAS,
};
use crate::canister_api::types::internet_identity::{
    FrontendHostname, GetDelegationResponse, GetIdAliasError, GetIdAliasRequest,
    IdAliasCredentials, IdentityNumber, PrepareIdAliasError, PrepareIdAliasRequest,
    PreparedIdAlias, SessionKey, Timestamp, UserKey,
};
use candid::Principal;
use ic_agent::AgentError;
use ic_utils::call::SyncCall;
use ic_utils::Canister;

pub(crate) async fn get_principal(
    canister: &Canister<'_>,
    identity_number: IdentityNumber,
    frontend: &str,
) -> Result<Principal, AgentError> {
    let (principal,): (Principal,) = canister
        .query(GET_PRINCIPAL)
        .with_arg(identity_number)
        .with_arg(frontend.to_string())
        .build()
        .call()
        .await?;
    Ok(principal)
}

pub(crate) async fn prepare_id_alias(
    canister: &Canister<'_>,
    request: PrepareIdAliasRequest,
) -> Result<Result<PreparedIdAlias, PrepareIdAliasError>, AgentError> {
    let (result,): (Result<PreparedIdAlias, PrepareIdAliasError>,) = canister
        .update(PREPARE_ID_ALIAS)
        .with_arg(request)
        .build()
        .call_and_wait()
        .await?;
    Ok(result)
}

pub(crate) async fn get_id_alias(
    canister: &Canister<'_>,
    request: GetIdAliasRequest,
) -> Result<Result<IdAliasCredentials, GetIdAliasError>, AgentError> {
    let (result,): (Result<IdAliasCredentials, GetIdAliasError>,) = canister
        .query(GET_ID_ALIAS)
        .with_arg(request)
        .build()
        .call()
        .await?;
    Ok(result)
}

pub(crate) async fn prepare_delegation(
    canister: &Canister<'_>,
    identity_number: IdentityNumber,
    frontend: FrontendHostname,
    session_key: SessionKey,
    max_time_to_live: Option<u64>,
) -> Result<(UserKey, Timestamp), AgentError> {
    canister
        .update(PREPARE_DELEGATION)
        .with_arg(identity_number)
        .with_arg(frontend)
        .with_arg(session_key)
        .with_arg(max_time_to_live)
        .build()
        .call_and_wait()
        .await
}

pub(crate) async fn get_delegation(
    canister: &Canister<'_>,
    identity_number: IdentityNumber,
    frontend: FrontendHostname,
    session_key: SessionKey,
    expiration: Timestamp,
) -> Result<GetDelegationResponse, AgentError> {
    let (response,): (GetDelegationResponse,) = canister
        .query(GET_DELEGATION)
        .with_arg(identity_number)
        .with_arg(frontend)
        .with_arg(session_key)
        .with_arg(expiration)
        .build()
        .call()
        .await?;
    Ok(response)
}
