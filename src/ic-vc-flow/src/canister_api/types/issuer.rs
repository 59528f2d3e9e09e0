use candid::{CandidType, Deserialize, Nat};
use serde_bytes::ByteBuf;

/// Describes the credential requested from an issuer.
#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CredentialSpec {
    pub credential_type: String,
    pub arguments: Option<Vec<(String, ArgumentValue)>>,
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub enum ArgumentValue {
    Int(i32),
    String(String),
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Icrc21ConsentPreferences {
    pub language: String,
}

/// Argument of `vc_consent_message`.
#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Icrc21VcConsentMessageRequest {
    pub preferences: Icrc21ConsentPreferences,
    pub credential_spec: CredentialSpec,
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Icrc21ConsentInfo {
    pub consent_message: String,
    pub language: String,
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Icrc21ErrorInfo {
    pub description: String,
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub enum Icrc21Error {
    UnsupportedCanisterCall(Icrc21ErrorInfo),
    ConsentMessageUnavailable(Icrc21ErrorInfo),
    GenericError { error_code: Nat, description: String },
}

/// The issuer-facing view of an id alias credential: only the JWS is sent.
#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct IssuerSignedIdAlias {
    pub credential_jws: String,
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PrepareCredentialRequest {
    pub signed_id_alias: IssuerSignedIdAlias,
    pub credential_spec: CredentialSpec,
}

/// Handle returned by `prepare_credential`.
#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PreparedCredentialData {
    pub prepared_context: Option<ByteBuf>,
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GetCredentialRequest {
    pub signed_id_alias: IssuerSignedIdAlias,
    pub credential_spec: CredentialSpec,
    pub prepared_context: Option<ByteBuf>,
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct IssuedCredentialData {
    pub vc_jws: String,
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub enum IssueCredentialError {
    UnknownSubject(String),
    UnauthorizedSubject(String),
    InvalidIdAlias(String),
    SignatureNotFound(String),
    Internal(String),
    UnsupportedCredentialSpec(String),
}
