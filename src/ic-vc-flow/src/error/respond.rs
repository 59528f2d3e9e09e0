use thiserror::Error;

#[derive(Error, Debug)]
pub enum RespondError {
    #[error("Failed to encode response")]
    EncodeFailed(#[source] serde_json::Error),

    #[error("Failed to deliver response to the relying party")]
    DeliverFailed(#[source] std::io::Error),
}
