use crate::canister_api::methods::issuer as vc;
use crate::canister_api::methods::method_names::{
    GET_CREDENTIAL, PREPARE_CREDENTIAL, VC_CONSENT_MESSAGE,
};
use crate::canister_api::types::issuer::{
    GetCredentialRequest, Icrc21ConsentInfo, Icrc21Error, Icrc21VcConsentMessageRequest,
    IssueCredentialError, IssuedCredentialData, PrepareCredentialRequest, PreparedCredentialData,
};
use crate::error::CanisterCallError;
use crate::provider::VcIssuerClient;
use candid::Principal;
use ic_agent::{Agent, Identity};
use ic_utils::Canister;
use std::sync::Arc;

/// Talks to issuer canisters through an IC gateway.
///
/// Consent messages are requested anonymously. Credential calls get an agent of
/// their own, signing with the identity handed in by the flow.
pub struct IssuerCanisterClient {
    url: String,
    fetch_root_key: bool,
    anonymous: Agent,
}

impl IssuerCanisterClient {
    pub async fn new(url: &str, fetch_root_key: bool) -> Result<Self, CanisterCallError> {
        let anonymous = Agent::builder()
            .with_url(url)
            .build()
            .map_err(CanisterCallError::BuildAgentFailed)?;
        if fetch_root_key {
            anonymous
                .fetch_root_key()
                .await
                .map_err(CanisterCallError::FetchRootKeyFailed)?;
        }
        Ok(Self {
            url: url.to_string(),
            fetch_root_key,
            anonymous,
        })
    }

    async fn agent_for(&self, identity: Arc<dyn Identity>) -> Result<Agent, CanisterCallError> {
        let agent = Agent::builder()
            .with_url(&self.url)
            .with_arc_identity(identity)
            .build()
            .map_err(CanisterCallError::BuildAgentFailed)?;
        if self.fetch_root_key {
            agent
                .fetch_root_key()
                .await
                .map_err(CanisterCallError::FetchRootKeyFailed)?;
        }
        Ok(agent)
    }
}

fn issuer_canister<'agent>(
    agent: &'agent Agent,
    issuer: &str,
) -> Result<Canister<'agent>, CanisterCallError> {
    let canister_id = Principal::from_text(issuer)
        .map_err(|e| CanisterCallError::InvalidCanisterId(issuer.to_string(), e))?;
    Ok(Canister::builder()
        .with_agent(agent)
        .with_canister_id(canister_id)
        .build()?)
}

impl VcIssuerClient for IssuerCanisterClient {
    async fn consent_message(
        &self,
        issuer: &str,
        request: Icrc21VcConsentMessageRequest,
    ) -> Result<Result<Icrc21ConsentInfo, Icrc21Error>, CanisterCallError> {
        let canister = issuer_canister(&self.anonymous, issuer)?;
        vc::vc_consent_message(&canister, request)
            .await
            .map_err(|source| CanisterCallError::CallFailed {
                method: VC_CONSENT_MESSAGE,
                source,
            })
    }

    async fn prepare_credential(
        &self,
        issuer: &str,
        identity: Arc<dyn Identity>,
        request: PrepareCredentialRequest,
    ) -> Result<Result<PreparedCredentialData, IssueCredentialError>, CanisterCallError> {
        let agent = self.agent_for(identity).await?;
        let canister = issuer_canister(&agent, issuer)?;
        vc::prepare_credential(&canister, request)
            .await
            .map_err(|source| CanisterCallError::CallFailed {
                method: PREPARE_CREDENTIAL,
                source,
            })
    }

    async fn get_credential(
        &self,
        issuer: &str,
        identity: Arc<dyn Identity>,
        request: GetCredentialRequest,
    ) -> Result<Result<IssuedCredentialData, IssueCredentialError>, CanisterCallError> {
        let agent = self.agent_for(identity).await?;
        let canister = issuer_canister(&agent, issuer)?;
        vc::get_credential(&canister, request)
            .await
            .map_err(|source| CanisterCallError::CallFailed {
                method: GET_CREDENTIAL,
                source,
            })
    }
}
