//! Argument and result types of the canister methods called during a flow.
pub mod internet_identity;
pub mod issuer;
