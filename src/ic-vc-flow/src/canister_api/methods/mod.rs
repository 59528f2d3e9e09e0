//! This module contains the methods that are exposed by the Internet Identity
//! and issuer canisters.
pub mod internet_identity;
pub mod issuer;
pub mod method_names;
