//! The human-in-the-loop step: nothing leaves the identity provider before the
//! user has seen the issuer's consent message and approved it.
use crate::canister_api::types::internet_identity::IdentityNumber;
use std::future::Future;

/// What the user is asked to approve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsentRequest<'a> {
    pub relying_origin: &'a str,
    pub provider_origin: &'a str,
    pub consent_message: &'a str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Consent {
    /// Approved, choosing the anchor to present credentials for.
    Allowed { identity_number: IdentityNumber },
    Canceled,
}

pub trait ConsentGate: Send + Sync {
    /// Blocks until the user decides.
    fn confirm(&self, request: ConsentRequest<'_>) -> impl Future<Output = Consent> + Send;
}
