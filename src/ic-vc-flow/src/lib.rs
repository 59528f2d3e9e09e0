//! A client-side engine for presenting verifiable credentials through
//! Internet Identity.
//!
//! A relying party asks for a credential about one of its users. The flow
//! locates the issuer canister behind the issuer's origin, asks the user to
//! consent, obtains id alias credentials from the identity provider, gets the
//! issuer to issue the credential to a delegated identity and hands back an
//! unsigned presentation wrapping both.
//!
//! # Example
//!
//! ```rust,no_run
//! use ic_agent::Agent;
//! use ic_vc_flow::canister_api::{InternetIdentityAuthenticator, IssuerCanisterClient};
//! use ic_vc_flow::config::VcFlowConfig;
//! use ic_vc_flow::consent::{Consent, ConsentGate, ConsentRequest};
//! use ic_vc_flow::flow::VcFlow;
//! use ic_vc_flow::locator::CanisterLocator;
//! # use ic_vc_flow::request::VerifyCredentialsArgs;
//! # struct AlwaysAllow;
//! # impl ConsentGate for AlwaysAllow {
//! #     async fn confirm(&self, _: ConsentRequest<'_>) -> Consent {
//! #         Consent::Allowed { identity_number: 10_000 }
//! #     }
//! # }
//! # async fn not_main(args: VerifyCredentialsArgs) -> Result<(), Box<dyn std::error::Error>> {
//! # let logger = slog::Logger::root(slog::Discard, slog::o!());
//! let config = VcFlowConfig::default();
//! let agent = Agent::builder().with_url("https://icp-api.io").build()?;
//! let authenticator = InternetIdentityAuthenticator::new(
//!     &agent,
//!     config.identity_provider_canister_id,
//!     "https://identity.ic0.app",
//! );
//! let issuer = IssuerCanisterClient::new("https://icp-api.io", false).await?;
//! let locator = CanisterLocator::new(config.lookup_timeout, &logger)?;
//! let flow = VcFlow::new(&locator, &authenticator, &issuer, &AlwaysAllow, &config, &logger);
//! let outcome = flow.verify_credentials(&args).await;
//! println!("{}", serde_json::to_string(&outcome)?);
//! # Ok(())
//! # }
//! ```

pub mod alias;
pub mod canister_api;
pub mod config;
pub mod consent;
pub mod delegation;
pub mod error;
pub mod flow;
pub mod issuer;
pub mod locator;
pub mod outcome;
pub mod presentation;
pub mod protocol;
pub mod provider;
pub mod request;

#[cfg(test)]
mod test_support;

pub use flow::VcFlow;
pub use outcome::{AbortReason, VcOutcome};
pub use protocol::{vc_flow, vc_protocol};
