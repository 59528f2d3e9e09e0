use thiserror::Error;

// Not a #[source]: reqwest already prints its whole source chain on Display.
#[derive(Error, Debug)]
#[error("{}", .0)]
pub struct WrappedReqwestError(pub reqwest::Error);
