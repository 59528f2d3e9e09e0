//! What a flow reports back to the relying party.
use crate::presentation::VerifiablePresentation;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Why a flow was aborted. This closed set is all the relying party learns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    NoCanisterId,
    BadCanisterId,
    AuthFailedIssuer,
    AuthFailedIi,
    BadPrincipalRp,
    InternalError,
    IssuerApiError,
}

impl AbortReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbortReason::NoCanisterId => "no_canister_id",
            AbortReason::BadCanisterId => "bad_canister_id",
            AbortReason::AuthFailedIssuer => "auth_failed_issuer",
            AbortReason::AuthFailedIi => "auth_failed_ii",
            AbortReason::BadPrincipalRp => "bad_principal_rp",
            AbortReason::InternalError => "internal_error",
            AbortReason::IssuerApiError => "issuer_api_error",
        }
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The final result of a flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VcOutcome {
    /// `{"verifiablePresentation": "<header>.<payload>.<signature>"}`
    Presentation(VerifiablePresentation),

    /// `"aborted"`: the user canceled. No reason is disclosed.
    Aborted,

    /// `{"error": {"reason": "<reason>"}}`
    Failed(AbortReason),
}

impl Serialize for VcOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Reason {
            reason: AbortReason,
        }

        match self {
            VcOutcome::Presentation(presentation) => presentation.serialize(serializer),
            VcOutcome::Aborted => serializer.serialize_str("aborted"),
            VcOutcome::Failed(reason) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", &Reason { reason: *reason })?;
                map.end()
            }
        }
    }
}
