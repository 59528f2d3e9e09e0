use ic_agent::identity::PemError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateKeyError {
    #[error("Failed to generate session key pair")]
    GenerateKeyPairFailed(#[source] ring::error::Unspecified),

    #[error("Failed to load generated session key pair: {0:#}")]
    LoadKeyPairFailed(Box<PemError>),

    #[error("Session identity did not provide a public key")]
    MissingPublicKey,
}
