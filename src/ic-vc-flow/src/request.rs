//! The credential request a relying party sends to start a flow.
use crate::canister_api::types::issuer::{ArgumentValue, CredentialSpec};
use candid::Principal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VcRequest {
    /// The principal the relying party knows the user by.
    pub credential_subject: Principal,
    pub issuer: IssuerData,
    pub credential_spec: RequestedCredentialSpec,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IssuerData {
    pub origin: String,
    /// If set, the canister the origin must resolve to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canister_id: Option<Principal>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequestedCredentialSpec {
    pub credential_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<BTreeMap<String, RequestedArgument>>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RequestedArgument {
    Int(i32),
    String(String),
}

impl From<&RequestedCredentialSpec> for CredentialSpec {
    fn from(spec: &RequestedCredentialSpec) -> Self {
        CredentialSpec {
            credential_type: spec.credential_type.clone(),
            arguments: spec.arguments.as_ref().map(|arguments| {
                arguments
                    .iter()
                    .map(|(name, value)| {
                        let value = match value {
                            RequestedArgument::Int(i) => ArgumentValue::Int(*i),
                            RequestedArgument::String(s) => ArgumentValue::String(s.clone()),
                        };
                        (name.clone(), value)
                    })
                    .collect()
            }),
        }
    }
}

/// Everything a single verification needs: the request and who sent it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyCredentialsArgs {
    pub request: VcRequest,
    pub rp_origin: String,
}
