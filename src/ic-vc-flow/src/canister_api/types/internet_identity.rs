use candid::{CandidType, Deserialize, Principal};
use serde_bytes::ByteBuf;

pub type IdentityNumber = u64;
pub type FrontendHostname = String;
pub type PublicKey = ByteBuf;
pub type SessionKey = PublicKey;
pub type UserKey = PublicKey;
pub type Timestamp = u64;

/// Argument of `prepare_id_alias`.
#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PrepareIdAliasRequest {
    pub identity_number: IdentityNumber,
    pub relying_party: FrontendHostname,
    pub issuer: FrontendHostname,
}

/// Handle returned by `prepare_id_alias`, to be passed back to `get_id_alias`.
#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PreparedIdAlias {
    pub rp_id_alias_jwt: String,
    pub issuer_id_alias_jwt: String,
    /// The canister signature public key the alias credentials are signed with.
    pub canister_sig_pk_der: PublicKey,
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub enum PrepareIdAliasError {
    AuthenticationFailed(String),
}

/// Argument of `get_id_alias`.
#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GetIdAliasRequest {
    pub identity_number: IdentityNumber,
    pub relying_party: FrontendHostname,
    pub issuer: FrontendHostname,
    pub rp_id_alias_jwt: String,
    pub issuer_id_alias_jwt: String,
}

/// A credential asserting that `id_alias` and `id_dapp` belong to the same
/// identity anchor.
#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SignedIdAlias {
    pub credential_jws: String,
    pub id_alias: Principal,
    pub id_dapp: Principal,
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct IdAliasCredentials {
    pub rp_id_alias_credential: SignedIdAlias,
    pub issuer_id_alias_credential: SignedIdAlias,
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub enum GetIdAliasError {
    AuthenticationFailed(String),
    NoSuchCredentials(String),
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Delegation {
    pub pubkey: PublicKey,
    pub expiration: Timestamp,
    pub targets: Option<Vec<Principal>>,
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SignedDelegation {
    pub delegation: Delegation,
    pub signature: ByteBuf,
}

impl From<SignedDelegation> for ic_agent::identity::SignedDelegation {
    fn from(signed: SignedDelegation) -> Self {
        ic_agent::identity::SignedDelegation {
            delegation: ic_agent::identity::Delegation {
                pubkey: signed.delegation.pubkey.into_vec(),
                expiration: signed.delegation.expiration,
                targets: signed.delegation.targets,
            },
            signature: signed.signature.into_vec(),
        }
    }
}

#[derive(CandidType, Clone, Debug, Deserialize, PartialEq, Eq)]
pub enum GetDelegationResponse {
    #[serde(rename = "signed_delegation")]
    SignedDelegation(SignedDelegation),
    #[serde(rename = "no_such_delegation")]
    NoSuchDelegation,
}
