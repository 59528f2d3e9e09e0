//! In-memory stand-ins for the parties of a flow, recording every call.
use crate::canister_api::types::internet_identity::{
    Delegation, GetDelegationResponse, GetIdAliasError, GetIdAliasRequest, IdAliasCredentials,
    IdentityNumber, PrepareIdAliasError, PrepareIdAliasRequest, PreparedIdAlias, SessionKey,
    SignedDelegation, SignedIdAlias, Timestamp, UserKey,
};
use crate::canister_api::types::issuer::{
    GetCredentialRequest, Icrc21ConsentInfo, Icrc21Error, Icrc21ErrorInfo,
    Icrc21VcConsentMessageRequest, IssueCredentialError, IssuedCredentialData,
    PrepareCredentialRequest, PreparedCredentialData,
};
use crate::consent::{Consent, ConsentGate, ConsentRequest};
use crate::error::{CanisterCallError, LoginError, LookupCanisterError};
use crate::locator::CANISTER_ID_HEADER;
use crate::provider::{
    Authenticator, CanisterLookup, IdentityProviderConnection, VcIssuerClient,
};
use candid::Principal;
use ic_agent::{AgentError, Identity};
use serde_bytes::ByteBuf;
use slog::{Drain, Logger};
use std::sync::{Arc, Mutex};

pub const RP_ALIAS_JWS: &str = "rp-alias-jws";
pub const ISSUER_ALIAS_JWS: &str = "issuer-alias-jws";
pub const VC_JWS: &str = "vc-jws";

/// Method names in call order, shared by all mocks of one flow.
#[derive(Debug, Default)]
pub struct CallLog(Mutex<Vec<&'static str>>);

impl CallLog {
    pub fn record(&self, method: &'static str) {
        self.0.lock().unwrap().push(method);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }

    pub fn called(&self, method: &str) -> bool {
        self.calls().iter().any(|call| *call == method)
    }
}

/// Messages of every record logged through it, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordedLogs(Arc<Mutex<Vec<String>>>);

impl RecordedLogs {
    pub fn logger(&self) -> Logger {
        Logger::root(self.clone().fuse(), slog::o!())
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Drain for RecordedLogs {
    type Ok = ();
    type Err = slog::Never;

    fn log(&self, record: &slog::Record<'_>, _: &slog::OwnedKVList) -> Result<(), slog::Never> {
        self.0.lock().unwrap().push(record.msg().to_string());
        Ok(())
    }
}

/// The origins an identity provider call was scoped to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopedCall {
    GetPrincipal { origin: String },
    PrepareIdAlias { relying_party: String, issuer: String },
    GetIdAlias { relying_party: String, issuer: String },
    PrepareDelegation { origin: String },
    GetDelegation { origin: String },
}

pub fn call_failed(method: &'static str) -> CanisterCallError {
    CanisterCallError::CallFailed {
        method,
        source: AgentError::MessageError("canister unreachable".to_string()),
    }
}

fn alias(credential_jws: &str) -> SignedIdAlias {
    SignedIdAlias {
        credential_jws: credential_jws.to_string(),
        id_alias: Principal::self_authenticating(b"id-alias"),
        id_dapp: Principal::self_authenticating(b"id-dapp"),
    }
}

pub struct MockLookup {
    pub canister_id: Option<String>,
    pub log: Arc<CallLog>,
}

impl CanisterLookup for MockLookup {
    async fn lookup_canister(&self, origin: &str) -> Result<String, LookupCanisterError> {
        self.log.record("lookup_canister");
        self.canister_id
            .clone()
            .ok_or_else(|| LookupCanisterError::MissingHeader {
                origin: origin.to_string(),
                header: CANISTER_ID_HEADER,
            })
    }
}

#[derive(Clone)]
pub struct MockIdentityProvider {
    pub principal: Principal,
    pub user_key: Vec<u8>,
    pub login_fails: bool,
    pub prepare_id_alias_error: Option<PrepareIdAliasError>,
    pub get_id_alias_error: Option<GetIdAliasError>,
    pub no_such_delegation: bool,
    pub session_keys: Arc<Mutex<Vec<Vec<u8>>>>,
    pub scoped_calls: Arc<Mutex<Vec<ScopedCall>>>,
    pub log: Arc<CallLog>,
}

impl MockIdentityProvider {
    pub fn new(principal: Principal, log: Arc<CallLog>) -> Self {
        Self {
            principal,
            user_key: b"mock-user-key".to_vec(),
            login_fails: false,
            prepare_id_alias_error: None,
            get_id_alias_error: None,
            no_such_delegation: false,
            session_keys: Arc::default(),
            scoped_calls: Arc::default(),
            log,
        }
    }

    pub fn session_keys(&self) -> Vec<Vec<u8>> {
        self.session_keys.lock().unwrap().clone()
    }

    pub fn scoped_calls(&self) -> Vec<ScopedCall> {
        self.scoped_calls.lock().unwrap().clone()
    }

    fn record_scope(&self, call: ScopedCall) {
        self.scoped_calls.lock().unwrap().push(call);
    }
}

impl Authenticator for MockIdentityProvider {
    type Connection = MockConnection;

    async fn login(&self, identity_number: IdentityNumber) -> Result<MockConnection, LoginError> {
        self.log.record("login");
        if self.login_fails {
            return Err(LoginError::NotAuthenticated(
                identity_number,
                call_failed("get_principal"),
            ));
        }
        Ok(MockConnection {
            identity_number,
            provider: self.clone(),
        })
    }
}

pub struct MockConnection {
    identity_number: IdentityNumber,
    provider: MockIdentityProvider,
}

impl IdentityProviderConnection for MockConnection {
    fn identity_number(&self) -> IdentityNumber {
        self.identity_number
    }

    async fn get_principal(&self, origin: &str) -> Result<Principal, CanisterCallError> {
        self.provider.log.record("get_principal");
        self.provider.record_scope(ScopedCall::GetPrincipal {
            origin: origin.to_string(),
        });
        Ok(self.provider.principal)
    }

    async fn prepare_id_alias(
        &self,
        request: PrepareIdAliasRequest,
    ) -> Result<Result<PreparedIdAlias, PrepareIdAliasError>, CanisterCallError> {
        self.provider.log.record("prepare_id_alias");
        self.provider.record_scope(ScopedCall::PrepareIdAlias {
            relying_party: request.relying_party,
            issuer: request.issuer,
        });
        Ok(match &self.provider.prepare_id_alias_error {
            Some(e) => Err(e.clone()),
            None => Ok(PreparedIdAlias {
                rp_id_alias_jwt: "rp-jwt".to_string(),
                issuer_id_alias_jwt: "issuer-jwt".to_string(),
                canister_sig_pk_der: ByteBuf::from(self.provider.user_key.clone()),
            }),
        })
    }

    async fn get_id_alias(
        &self,
        request: GetIdAliasRequest,
    ) -> Result<Result<IdAliasCredentials, GetIdAliasError>, CanisterCallError> {
        self.provider.log.record("get_id_alias");
        self.provider.record_scope(ScopedCall::GetIdAlias {
            relying_party: request.relying_party,
            issuer: request.issuer,
        });
        Ok(match &self.provider.get_id_alias_error {
            Some(e) => Err(e.clone()),
            None => Ok(IdAliasCredentials {
                rp_id_alias_credential: alias(RP_ALIAS_JWS),
                issuer_id_alias_credential: alias(ISSUER_ALIAS_JWS),
            }),
        })
    }

    async fn prepare_delegation(
        &self,
        origin: &str,
        session_key: SessionKey,
        _max_time_to_live: Option<u64>,
    ) -> Result<(UserKey, Timestamp), CanisterCallError> {
        self.provider.log.record("prepare_delegation");
        self.provider.record_scope(ScopedCall::PrepareDelegation {
            origin: origin.to_string(),
        });
        self.provider
            .session_keys
            .lock()
            .unwrap()
            .push(session_key.into_vec());
        Ok((ByteBuf::from(self.provider.user_key.clone()), u64::MAX))
    }

    async fn get_delegation(
        &self,
        origin: &str,
        session_key: SessionKey,
        expiration: Timestamp,
    ) -> Result<GetDelegationResponse, CanisterCallError> {
        self.provider.log.record("get_delegation");
        self.provider.record_scope(ScopedCall::GetDelegation {
            origin: origin.to_string(),
        });
        if self.provider.no_such_delegation {
            return Ok(GetDelegationResponse::NoSuchDelegation);
        }
        Ok(GetDelegationResponse::SignedDelegation(SignedDelegation {
            delegation: Delegation {
                pubkey: session_key,
                expiration,
                targets: None,
            },
            signature: ByteBuf::from(vec![0xca, 0xfe]),
        }))
    }
}

#[derive(Default)]
pub struct MockIssuer {
    pub consent_call_fails: bool,
    pub consent_unavailable: bool,
    /// Issuer canister id named by every call.
    pub issuer_ids: Mutex<Vec<String>>,
    pub prepare_error: Option<IssueCredentialError>,
    /// Sender and alias credential seen by each credential call.
    pub credential_calls: Mutex<Vec<(Principal, String)>>,
    pub log: Arc<CallLog>,
}

impl MockIssuer {
    pub fn new(log: Arc<CallLog>) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    pub fn issuer_ids(&self) -> Vec<String> {
        self.issuer_ids.lock().unwrap().clone()
    }

    fn record_issuer(&self, issuer: &str) {
        self.issuer_ids.lock().unwrap().push(issuer.to_string());
    }

    pub fn credential_calls(&self) -> Vec<(Principal, String)> {
        self.credential_calls.lock().unwrap().clone()
    }

    fn record_caller(&self, identity: &Arc<dyn Identity>, credential_jws: &str) {
        let sender = identity.sender().unwrap();
        self.credential_calls
            .lock()
            .unwrap()
            .push((sender, credential_jws.to_string()));
    }
}

impl VcIssuerClient for MockIssuer {
    async fn consent_message(
        &self,
        issuer: &str,
        request: Icrc21VcConsentMessageRequest,
    ) -> Result<Result<Icrc21ConsentInfo, Icrc21Error>, CanisterCallError> {
        self.log.record("vc_consent_message");
        self.record_issuer(issuer);
        if self.consent_call_fails {
            return Err(call_failed("vc_consent_message"));
        }
        if self.consent_unavailable {
            return Ok(Err(Icrc21Error::ConsentMessageUnavailable(Icrc21ErrorInfo {
                description: "no consent message".to_string(),
            })));
        }
        Ok(Ok(Icrc21ConsentInfo {
            consent_message: format!(
                "Share your {} credential?",
                request.credential_spec.credential_type
            ),
            language: request.preferences.language,
        }))
    }

    async fn prepare_credential(
        &self,
        issuer: &str,
        identity: Arc<dyn Identity>,
        request: PrepareCredentialRequest,
    ) -> Result<Result<PreparedCredentialData, IssueCredentialError>, CanisterCallError> {
        self.log.record("prepare_credential");
        self.record_issuer(issuer);
        self.record_caller(&identity, &request.signed_id_alias.credential_jws);
        Ok(match &self.prepare_error {
            Some(e) => Err(e.clone()),
            None => Ok(PreparedCredentialData {
                prepared_context: Some(ByteBuf::from(b"context".to_vec())),
            }),
        })
    }

    async fn get_credential(
        &self,
        issuer: &str,
        identity: Arc<dyn Identity>,
        request: GetCredentialRequest,
    ) -> Result<Result<IssuedCredentialData, IssueCredentialError>, CanisterCallError> {
        self.log.record("get_credential");
        self.record_issuer(issuer);
        self.record_caller(&identity, &request.signed_id_alias.credential_jws);
        Ok(Ok(IssuedCredentialData {
            vc_jws: VC_JWS.to_string(),
        }))
    }
}

pub struct MockConsent {
    pub decision: Consent,
    pub messages: Mutex<Vec<String>>,
    pub log: Arc<CallLog>,
}

impl MockConsent {
    pub fn new(decision: Consent, log: Arc<CallLog>) -> Self {
        Self {
            decision,
            messages: Mutex::default(),
            log,
        }
    }
}

impl ConsentGate for MockConsent {
    async fn confirm(&self, request: ConsentRequest<'_>) -> Consent {
        self.log.record("confirm");
        self.messages
            .lock()
            .unwrap()
            .push(request.consent_message.to_string());
        self.decision
    }
}
