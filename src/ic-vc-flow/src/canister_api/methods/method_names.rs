//! This module contains the names of the methods called on the canisters.
pub const GET_DELEGATION: &str = "get_delegation";
pub const GET_ID_ALIAS: &str = "get_id_alias";
pub const GET_PRINCIPAL: &str = "get_principal";
pub const PREPARE_DELEGATION: &str = "prepare_delegation";
pub const PREPARE_ID_ALIAS: &str = "prepare_id_alias";

pub const GET_CREDENTIAL: &str = "get_credential";
pub const PREPARE_CREDENTIAL: &str = "prepare_credential";
pub const VC_CONSENT_MESSAGE: &str = "vc_consent_message";
