//! Candid interfaces of the canisters taking part in a presentation flow,
//! and `ic-utils` based clients for them.
pub(crate) mod methods;
pub mod types;

mod internet_identity;
mod issuer;

pub use internet_identity::{InternetIdentityAuthenticator, InternetIdentityConnection};
pub use issuer::IssuerCanisterClient;
