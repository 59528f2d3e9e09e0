//! # Flow
//!
//! Drives one verification from a relying party's request to its outcome.
//!
//! The flow is an explicit state machine: each [`FlowState`] performs at most one
//! kind of remote interaction and then moves on through one of the transition
//! functions in [`state`]. Any failure moves to a terminal state carrying an
//! [`AbortReason`](crate::outcome::AbortReason), so every verification ends with
//! exactly one [`VcOutcome`].
use crate::alias::request_aliases;
use crate::canister_api::types::issuer::CredentialSpec;
use crate::config::VcFlowConfig;
use crate::consent::{ConsentGate, ConsentRequest};
use crate::issuer::{get_consent_message, issue_credential, IssueCredentialArgs};
use crate::outcome::VcOutcome;
use crate::provider::{Authenticator, CanisterLookup, IdentityProviderConnection, VcIssuerClient};
use crate::request::VerifyCredentialsArgs;
use slog::{debug, info, o, Logger};

pub mod state;

pub use state::FlowState;
use state::{
    assemble, check_issuer_canister, on_aliases, on_consent, on_consent_message,
    on_credential_issued, on_login, on_principal_computed,
};

/// The parties a verification talks to.
pub struct VcFlow<'a, L, A, I, G> {
    lookup: &'a L,
    authenticator: &'a A,
    issuer: &'a I,
    consent: &'a G,
    config: &'a VcFlowConfig,
    logger: Logger,
}

impl<'a, L, A, I, G> VcFlow<'a, L, A, I, G>
where
    L: CanisterLookup,
    A: Authenticator,
    I: VcIssuerClient,
    G: ConsentGate,
{
    pub fn new(
        lookup: &'a L,
        authenticator: &'a A,
        issuer: &'a I,
        consent: &'a G,
        config: &'a VcFlowConfig,
        logger: &Logger,
    ) -> Self {
        Self {
            lookup,
            authenticator,
            issuer,
            consent,
            config,
            logger: logger.new(o!("component" => "vc_flow")),
        }
    }

    /// Run a verification to completion.
    pub async fn verify_credentials(&self, args: &VerifyCredentialsArgs) -> VcOutcome {
        let logger = self.logger.new(o!(
            "relying_party" => args.rp_origin.clone(),
            "issuer_origin" => args.request.issuer.origin.clone(),
        ));
        info!(logger, "Verifying credentials";
            "credential_type" => &args.request.credential_spec.credential_type);

        let mut state = FlowState::Start;
        loop {
            state = match state.into_outcome() {
                Ok(outcome) => {
                    info!(logger, "Flow finished"; "outcome" => outcome_label(&outcome));
                    return outcome;
                }
                Err(state) => {
                    debug!(logger, "Entering state"; "state" => state.name());
                    self.step(state, args, &logger).await
                }
            };
        }
    }

    /// Perform the work of a non-terminal state. Terminal states are returned as is.
    pub async fn step(
        &self,
        state: FlowState<A::Connection>,
        args: &VerifyCredentialsArgs,
        logger: &Logger,
    ) -> FlowState<A::Connection> {
        let request = &args.request;
        match state {
            FlowState::Start => FlowState::LocatingIssuer,

            FlowState::LocatingIssuer => {
                let located = self.lookup.lookup_canister(&request.issuer.origin).await;
                let issuer_canister_id = match check_issuer_canister(
                    located,
                    request.issuer.canister_id.as_ref(),
                    logger,
                ) {
                    Ok(id) => id,
                    Err(reason) => return FlowState::Aborted(reason),
                };
                let consent_info = get_consent_message(
                    self.issuer,
                    &issuer_canister_id,
                    &CredentialSpec::from(&request.credential_spec),
                    &self.config.consent_language,
                    logger,
                )
                .await;
                on_consent_message(issuer_canister_id, consent_info)
            }

            FlowState::AwaitingConsent {
                issuer_canister_id,
                consent_message,
            } => {
                let consent = self
                    .consent
                    .confirm(ConsentRequest {
                        relying_origin: &args.rp_origin,
                        provider_origin: &request.issuer.origin,
                        consent_message: &consent_message,
                    })
                    .await;
                on_consent(issuer_canister_id, consent)
            }

            FlowState::Authenticating {
                issuer_canister_id,
                identity_number,
            } => {
                let login = self.authenticator.login(identity_number).await;
                on_login(issuer_canister_id, login, logger)
            }

            FlowState::VerifyingPrincipal {
                issuer_canister_id,
                connection,
            } => {
                let computed = connection.get_principal(&args.rp_origin).await;
                on_principal_computed(
                    issuer_canister_id,
                    connection,
                    computed,
                    &request.credential_subject,
                    logger,
                )
            }

            FlowState::RequestingAliases {
                issuer_canister_id,
                connection,
            } => {
                let aliases =
                    request_aliases(&connection, &args.rp_origin, &request.issuer.origin, logger)
                        .await;
                on_aliases(issuer_canister_id, connection, aliases)
            }

            FlowState::ContactingIssuer {
                issuer_canister_id,
                connection,
                aliases,
            } => {
                let credential_spec = CredentialSpec::from(&request.credential_spec);
                let issued = issue_credential(
                    &connection,
                    self.issuer,
                    IssueCredentialArgs {
                        issuer_canister_id: &issuer_canister_id,
                        issuer_origin: &request.issuer.origin,
                        issuer_alias_credential: &aliases.issuer_alias_credential,
                        credential_spec: &credential_spec,
                        max_time_to_live: self.config.delegation_max_time_to_live_ns(),
                    },
                    logger,
                )
                .await;
                on_credential_issued(issuer_canister_id, aliases, issued)
            }

            FlowState::Assembling {
                issuer_canister_id,
                rp_alias_credential,
                issued_credential,
            } => assemble(
                &issuer_canister_id,
                &rp_alias_credential,
                &issued_credential,
                logger,
            ),

            terminal => terminal,
        }
    }
}

fn outcome_label(outcome: &VcOutcome) -> &'static str {
    match outcome {
        VcOutcome::Presentation(_) => "presentation",
        VcOutcome::Aborted => "aborted",
        VcOutcome::Failed(reason) => reason.as_str(),
    }
}
