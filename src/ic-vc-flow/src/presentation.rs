//! Assembly of the verifiable presentation handed to the relying party.
use crate::canister_api::types::internet_identity::SignedIdAlias;
use crate::canister_api::types::issuer::IssuedCredentialData;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const VC_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// An unsigned JWT whose payload carries the id alias credential and the
/// issued credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiablePresentation {
    pub verifiable_presentation: String,
}

/// Field order is kept on the wire: `{"typ":"JWT","alg":"none"}`.
#[derive(Serialize)]
struct JwtHeader {
    typ: &'static str,
    alg: &'static str,
}

const UNSIGNED_HEADER: JwtHeader = JwtHeader {
    typ: "JWT",
    alg: "none",
};

/// The presentation is not signed: trust derives from the two embedded JWTs.
/// The alias credential always comes first.
pub fn create_presentation(
    issuer_canister_id: &str,
    rp_alias_credential: &SignedIdAlias,
    issued_credential: &IssuedCredentialData,
) -> VerifiablePresentation {
    let payload = json!({
        "iss": format!("did:icp:{issuer_canister_id}"),
        "vp": {
            "@context": VC_CONTEXT,
            "type": "VerifiablePresentation",
            "verifiableCredential": [
                rp_alias_credential.credential_jws,
                issued_credential.vc_jws,
            ],
        },
    });

    let header = base64::encode_config(header_json(), base64::URL_SAFE_NO_PAD);
    let payload = base64::encode_config(payload.to_string(), base64::URL_SAFE_NO_PAD);
    let signature = "";

    VerifiablePresentation {
        verifiable_presentation: [header.as_str(), payload.as_str(), signature].join("."),
    }
}

fn header_json() -> String {
    // a struct of two static strings always serializes
    serde_json::to_string(&UNSIGNED_HEADER).unwrap_or_default()
}
