//! States of a presentation flow and the transitions out of each of them.
//!
//! Every transition is a plain function of the result of the step's remote
//! call, so each abort path can be exercised without a network.
use crate::alias::AliasCredentials;
use crate::canister_api::types::internet_identity::{IdentityNumber, SignedIdAlias};
use crate::canister_api::types::issuer::{Icrc21ConsentInfo, IssuedCredentialData};
use crate::consent::Consent;
use crate::error::{
    CanisterCallError, GetConsentMessageError, LoginError, LookupCanisterError,
    ObtainCredentialError, RequestAliasesError,
};
use crate::outcome::{AbortReason, VcOutcome};
use crate::presentation::{create_presentation, VerifiablePresentation};
use candid::Principal;
use slog::{error, info, warn, Logger};

/// `C` is the authenticated identity provider connection, owned by the flow
/// from login onwards.
pub enum FlowState<C> {
    Start,
    LocatingIssuer,
    AwaitingConsent {
        issuer_canister_id: String,
        consent_message: String,
    },
    Authenticating {
        issuer_canister_id: String,
        identity_number: IdentityNumber,
    },
    VerifyingPrincipal {
        issuer_canister_id: String,
        connection: C,
    },
    RequestingAliases {
        issuer_canister_id: String,
        connection: C,
    },
    ContactingIssuer {
        issuer_canister_id: String,
        connection: C,
        aliases: AliasCredentials,
    },
    Assembling {
        issuer_canister_id: String,
        rp_alias_credential: SignedIdAlias,
        issued_credential: IssuedCredentialData,
    },
    Done(VerifiablePresentation),
    /// The user canceled at the consent gate.
    Canceled,
    Aborted(AbortReason),
}

impl<C> FlowState<C> {
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::Start => "start",
            FlowState::LocatingIssuer => "locating_issuer",
            FlowState::AwaitingConsent { .. } => "awaiting_consent",
            FlowState::Authenticating { .. } => "authenticating",
            FlowState::VerifyingPrincipal { .. } => "verifying_principal",
            FlowState::RequestingAliases { .. } => "requesting_aliases",
            FlowState::ContactingIssuer { .. } => "contacting_issuer",
            FlowState::Assembling { .. } => "assembling",
            FlowState::Done(_) => "done",
            FlowState::Canceled => "canceled",
            FlowState::Aborted(_) => "aborted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FlowState::Done(_) | FlowState::Canceled | FlowState::Aborted(_)
        )
    }

    /// The outcome of a terminal state; any other state is handed back.
    pub fn into_outcome(self) -> Result<VcOutcome, Self> {
        match self {
            FlowState::Done(presentation) => Ok(VcOutcome::Presentation(presentation)),
            FlowState::Canceled => Ok(VcOutcome::Aborted),
            FlowState::Aborted(reason) => Ok(VcOutcome::Failed(reason)),
            other => Err(other),
        }
    }
}

/// Accept the located canister id, enforcing the id pinned by the relying party.
///
/// The id is kept as announced; it is first interpreted when the issuer is
/// contacted.
pub fn check_issuer_canister(
    located: Result<String, LookupCanisterError>,
    expected: Option<&Principal>,
    logger: &Logger,
) -> Result<String, AbortReason> {
    let located = located.map_err(|_| AbortReason::NoCanisterId)?;

    match expected {
        Some(expected) if expected.to_text() != located => {
            warn!(logger, "Issuer canister ID does not match the one expected by the relying party";
                "security" => "possible_attack",
                "expected" => expected.to_text(),
                "located" => &located);
            Err(AbortReason::BadCanisterId)
        }
        _ => Ok(located),
    }
}

pub fn on_consent_message<C>(
    issuer_canister_id: String,
    consent_info: Result<Icrc21ConsentInfo, GetConsentMessageError>,
) -> FlowState<C> {
    match consent_info {
        Ok(info) => FlowState::AwaitingConsent {
            issuer_canister_id,
            consent_message: info.consent_message,
        },
        Err(_) => FlowState::Aborted(AbortReason::AuthFailedIssuer),
    }
}

pub fn on_consent<C>(issuer_canister_id: String, consent: Consent) -> FlowState<C> {
    match consent {
        Consent::Allowed { identity_number } => FlowState::Authenticating {
            issuer_canister_id,
            identity_number,
        },
        Consent::Canceled => FlowState::Canceled,
    }
}

pub fn on_login<C>(
    issuer_canister_id: String,
    login: Result<C, LoginError>,
    logger: &Logger,
) -> FlowState<C> {
    match login {
        Ok(connection) => FlowState::VerifyingPrincipal {
            issuer_canister_id,
            connection,
        },
        Err(e) => {
            error!(logger, "Authentication failed: {}", e);
            FlowState::Aborted(AbortReason::AuthFailedIi)
        }
    }
}

/// The principal computed for the relying party must be the one it declared,
/// otherwise the relying party would be shown credentials of another user.
pub fn on_principal_computed<C>(
    issuer_canister_id: String,
    connection: C,
    computed: Result<Principal, CanisterCallError>,
    declared: &Principal,
    logger: &Logger,
) -> FlowState<C> {
    match computed {
        Ok(computed) if computed == *declared => FlowState::RequestingAliases {
            issuer_canister_id,
            connection,
        },
        Ok(computed) => {
            warn!(logger, "Principal did not match that expected by RP";
                "security" => "possible_attack",
                "declared" => declared.to_text(),
                "computed" => computed.to_text());
            FlowState::Aborted(AbortReason::BadPrincipalRp)
        }
        Err(e) => {
            error!(logger, "Could not compute principal for the relying party: {}", e);
            FlowState::Aborted(AbortReason::InternalError)
        }
    }
}

pub fn on_aliases<C>(
    issuer_canister_id: String,
    connection: C,
    aliases: Result<AliasCredentials, RequestAliasesError>,
) -> FlowState<C> {
    match aliases {
        Ok(aliases) => FlowState::ContactingIssuer {
            issuer_canister_id,
            connection,
            aliases,
        },
        Err(e) if e.is_authentication_failure() => FlowState::Aborted(AbortReason::AuthFailedIi),
        Err(_) => FlowState::Aborted(AbortReason::InternalError),
    }
}

/// Delegation failures are issuer-bound and fold into the same reason.
pub fn on_credential_issued<C>(
    issuer_canister_id: String,
    aliases: AliasCredentials,
    issued: Result<IssuedCredentialData, ObtainCredentialError>,
) -> FlowState<C> {
    match issued {
        Ok(issued_credential) => FlowState::Assembling {
            issuer_canister_id,
            rp_alias_credential: aliases.rp_alias_credential,
            issued_credential,
        },
        Err(_) => FlowState::Aborted(AbortReason::IssuerApiError),
    }
}

pub fn assemble<C>(
    issuer_canister_id: &str,
    rp_alias_credential: &SignedIdAlias,
    issued_credential: &IssuedCredentialData,
    logger: &Logger,
) -> FlowState<C> {
    let presentation =
        create_presentation(issuer_canister_id, rp_alias_credential, issued_credential);
    info!(logger, "Created verifiable presentation"; "issuer" => issuer_canister_id);
    FlowState::Done(presentation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canister_api::types::issuer::IssueCredentialError;
    use crate::error::FetchDelegationError;
    use ic_agent::AgentError;
    use reqwest::StatusCode;

    type State = FlowState<()>;

    const ISSUER: &str = "rdmx6-jaaaa-aaaaa-aaadq-cai";

    fn logger() -> Logger {
        Logger::root(slog::Discard, slog::o!())
    }

    fn issuer() -> String {
        ISSUER.to_string()
    }

    fn call_failed(method: &'static str) -> CanisterCallError {
        CanisterCallError::CallFailed {
            method,
            source: AgentError::MessageError("unreachable".to_string()),
        }
    }

    fn aliases() -> AliasCredentials {
        let alias = |jws: &str| SignedIdAlias {
            credential_jws: jws.to_string(),
            id_alias: Principal::anonymous(),
            id_dapp: Principal::anonymous(),
        };
        AliasCredentials {
            rp_alias_credential: alias("rp"),
            issuer_alias_credential: alias("issuer"),
        }
    }

    #[test]
    fn unlocatable_issuer_aborts_with_no_canister_id() {
        let located = Err(LookupCanisterError::BadStatus {
            origin: "https://issuer.example".to_string(),
            status: StatusCode::NOT_FOUND,
        });
        assert_eq!(
            check_issuer_canister(located, None, &logger()),
            Err(AbortReason::NoCanisterId)
        );
    }

    #[test]
    fn pinned_canister_id_must_match() {
        let pinned = Principal::management_canister();
        assert_eq!(
            check_issuer_canister(Ok(issuer()), Some(&pinned), &logger()),
            Err(AbortReason::BadCanisterId)
        );
        let pinned = Principal::from_text(ISSUER).unwrap();
        assert_eq!(
            check_issuer_canister(Ok(issuer()), Some(&pinned), &logger()),
            Ok(issuer())
        );
    }

    #[test]
    fn unpinned_canister_id_is_accepted() {
        assert_eq!(
            check_issuer_canister(Ok(issuer()), None, &logger()),
            Ok(issuer())
        );
    }

    #[test]
    fn announced_canister_id_is_kept_verbatim() {
        assert_eq!(
            check_issuer_canister(Ok("abcde-aaaaa".to_string()), None, &logger()),
            Ok("abcde-aaaaa".to_string())
        );
    }

    #[test]
    fn consent_message_failure_aborts_with_auth_failed_issuer() {
        let state: State = on_consent_message(
            issuer(),
            Err(GetConsentMessageError::CallFailed(call_failed("vc_consent_message"))),
        );
        assert!(matches!(state, FlowState::Aborted(AbortReason::AuthFailedIssuer)));
    }

    #[test]
    fn consent_message_leads_to_consent_gate() {
        let state: State = on_consent_message(
            issuer(),
            Ok(Icrc21ConsentInfo {
                consent_message: "Share your age?".to_string(),
                language: "en".to_string(),
            }),
        );
        assert!(matches!(
            state,
            FlowState::AwaitingConsent { consent_message, .. }
                if consent_message == "Share your age?"
        ));
    }

    #[test]
    fn canceling_consent_is_not_an_abort_reason() {
        let state: State = on_consent(issuer(), Consent::Canceled);
        assert!(matches!(state.into_outcome(), Ok(VcOutcome::Aborted)));
    }

    #[test]
    fn allowing_consent_authenticates_chosen_anchor() {
        let state: State = on_consent(
            issuer(),
            Consent::Allowed {
                identity_number: 10_000,
            },
        );
        assert!(matches!(
            state,
            FlowState::Authenticating {
                identity_number: 10_000,
                ..
            }
        ));
    }

    #[test]
    fn failed_login_aborts_with_auth_failed_ii() {
        let state: State = on_login(
            issuer(),
            Err(LoginError::NotAuthenticated(10_000, call_failed("get_principal"))),
            &logger(),
        );
        assert!(matches!(state, FlowState::Aborted(AbortReason::AuthFailedIi)));
    }

    #[test]
    fn principal_mismatch_aborts_with_bad_principal_rp() {
        let state: State = on_principal_computed(
            issuer(),
            (),
            Ok(Principal::management_canister()),
            &Principal::anonymous(),
            &logger(),
        );
        assert!(matches!(state, FlowState::Aborted(AbortReason::BadPrincipalRp)));

        let state: State = on_principal_computed(
            issuer(),
            (),
            Ok(Principal::anonymous()),
            &Principal::anonymous(),
            &logger(),
        );
        assert!(matches!(state, FlowState::RequestingAliases { .. }));
    }

    #[test]
    fn alias_errors_map_to_their_reasons() {
        let state: State = on_aliases(
            issuer(),
            (),
            Err(RequestAliasesError::PrepareAuthenticationFailed("nope".to_string())),
        );
        assert!(matches!(state, FlowState::Aborted(AbortReason::AuthFailedIi)));

        let state: State = on_aliases(
            issuer(),
            (),
            Err(RequestAliasesError::GetAuthenticationFailed("nope".to_string())),
        );
        assert!(matches!(state, FlowState::Aborted(AbortReason::AuthFailedIi)));

        let state: State = on_aliases(
            issuer(),
            (),
            Err(RequestAliasesError::NoSuchCredentials("gone".to_string())),
        );
        assert!(matches!(state, FlowState::Aborted(AbortReason::InternalError)));

        let state: State = on_aliases(
            issuer(),
            (),
            Err(RequestAliasesError::PrepareFailed(call_failed("prepare_id_alias"))),
        );
        assert!(matches!(state, FlowState::Aborted(AbortReason::InternalError)));
    }

    #[test]
    fn issuer_and_delegation_errors_map_to_issuer_api_error() {
        let state: State = on_credential_issued(
            issuer(),
            aliases(),
            Err(ObtainCredentialError::AuthenticateFailed(
                FetchDelegationError::NoSuchDelegation("https://issuer.example".to_string()),
            )),
        );
        assert!(matches!(state, FlowState::Aborted(AbortReason::IssuerApiError)));

        let state: State = on_credential_issued(
            issuer(),
            aliases(),
            Err(ObtainCredentialError::GetRejected(IssueCredentialError::Internal(
                "boom".to_string(),
            ))),
        );
        assert!(matches!(state, FlowState::Aborted(AbortReason::IssuerApiError)));
    }

    #[test]
    fn issued_credential_is_assembled_with_rp_alias() {
        let state: State = on_credential_issued(
            issuer(),
            aliases(),
            Ok(IssuedCredentialData {
                vc_jws: "vc".to_string(),
            }),
        );
        let FlowState::Assembling {
            issuer_canister_id,
            rp_alias_credential,
            issued_credential,
        } = state
        else {
            panic!("expected assembling state");
        };
        assert_eq!(rp_alias_credential.credential_jws, "rp");

        let done: State = assemble(
            &issuer_canister_id,
            &rp_alias_credential,
            &issued_credential,
            &logger(),
        );
        assert!(done.is_terminal());
        assert!(matches!(done.into_outcome(), Ok(VcOutcome::Presentation(_))));
    }
}
