use crate::canister_api::methods::method_names::{
    GET_CREDENTIAL, PREPARE_CREDENTIAL, VC_CONSENT_MESSAGE,
};
use crate::canister_api::types::issuer::{
    GetCredentialRequest, Icrc21ConsentInfo, Icrc21Error, Icrc21VcConsentMessageRequest,
    IssueCredentialError, IssuedCredentialData, PrepareCredentialRequest, PreparedCredentialData,
};
use ic_agent::AgentError;
use ic_utils::call::SyncCall;
use ic_utils::Canister;

pub(crate) async fn vc_consent_message(
    canister: &Canister<'_>,
    request: Icrc21VcConsentMessageRequest,
) -> Result<Result<Icrc21ConsentInfo, Icrc21Error>, AgentError> {
    let (result,): (Result<Icrc21ConsentInfo, Icrc21Error>,) = canister
        .update(VC_CONSENT_MESSAGE)
        .with_arg(request)
        .build()
        .call_and_wait()
        .await?;
    Ok(result)
}

pub(crate) async fn prepare_credential(
    canister: &Canister<'_>,
    request: PrepareCredentialRequest,
) -> Result<Result<PreparedCredentialData, IssueCredentialError>, AgentError> {
    let (result,): (Result<PreparedCredentialData, IssueCredentialError>,) = canister
        .update(PREPARE_CREDENTIAL)
        .with_arg(request)
        .build()
        .call_and_wait()
        .await?;
    Ok(result)
}

pub(crate) async fn get_credential(
    canister: &Canister<'_>,
    request: GetCredentialRequest,
) -> Result<Result<IssuedCredentialData, IssueCredentialError>, AgentError> {
    let (result,): (Result<IssuedCredentialData, IssueCredentialError>,) = canister
        .query(GET_CREDENTIAL)
        .with_arg(request)
        .build()
        .call()
        .await?;
    Ok(result)
}
