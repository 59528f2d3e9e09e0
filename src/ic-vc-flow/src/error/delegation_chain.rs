use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DelegationChainError {
    #[error("A delegation chain must contain at least one delegation")]
    Empty,

    #[error("The last delegation does not delegate to the session key")]
    SessionKeyMismatch,

    #[error("Delegation {index} expired at {expiration} (now: {now})")]
    Expired {
        index: usize,
        expiration: u64,
        now: u64,
    },
}
