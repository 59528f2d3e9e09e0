//! Delegations from the identity provider to a per-flow session key.
use crate::canister_api::types::internet_identity::{GetDelegationResponse, UserKey};
use crate::error::{DelegationChainError, FetchDelegationError, GenerateKeyError};
use crate::provider::IdentityProviderConnection;
use ic_agent::identity::{BasicIdentity, DelegatedIdentity, SignedDelegation};
use ic_agent::Identity;
use ring::signature::Ed25519KeyPair;
use serde_bytes::ByteBuf;
use slog::{debug, Logger};
use std::time::{SystemTime, UNIX_EPOCH};

/// A key pair generated for a single flow and never persisted.
pub struct EphemeralKey {
    identity: BasicIdentity,
    public_key: Vec<u8>,
}

impl EphemeralKey {
    pub fn generate() -> Result<Self, GenerateKeyError> {
        let rng = ring::rand::SystemRandom::new();
        let pkcs8_bytes =
            Ed25519KeyPair::generate_pkcs8(&rng).map_err(GenerateKeyError::GenerateKeyPairFailed)?;
        let pem = pem::encode(&pem::Pem {
            tag: "PRIVATE KEY".to_owned(),
            contents: pkcs8_bytes.as_ref().to_vec(),
        });
        let identity = BasicIdentity::from_pem(pem.as_bytes())
            .map_err(|e| GenerateKeyError::LoadKeyPairFailed(Box::new(e)))?;
        let public_key = identity
            .public_key()
            .ok_or(GenerateKeyError::MissingPublicKey)?;
        Ok(Self {
            identity,
            public_key,
        })
    }

    /// DER encoded public key.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }
}

/// A non-empty chain of delegations from `public_key` down to a session key.
#[derive(Clone, Debug)]
pub struct DelegationChain {
    public_key: Vec<u8>,
    delegations: Vec<SignedDelegation>,
}

impl DelegationChain {
    pub fn from_delegations(
        delegations: Vec<SignedDelegation>,
        public_key: Vec<u8>,
    ) -> Result<Self, DelegationChainError> {
        if delegations.is_empty() {
            return Err(DelegationChainError::Empty);
        }
        Ok(Self {
            public_key,
            delegations,
        })
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn delegations(&self) -> &[SignedDelegation] {
        &self.delegations
    }

    /// The chain is valid only as long as its shortest-lived link.
    pub fn expiration(&self) -> u64 {
        self.delegations
            .iter()
            .map(|d| d.delegation.expiration)
            .min()
            .unwrap_or(0)
    }

    /// Checks that the chain ends at `session_key` and that no link has expired at `now`.
    pub fn validate(&self, session_key: &[u8], now: u64) -> Result<(), DelegationChainError> {
        for (index, signed) in self.delegations.iter().enumerate() {
            if signed.delegation.expiration < now {
                return Err(DelegationChainError::Expired {
                    index,
                    expiration: signed.delegation.expiration,
                    now,
                });
            }
        }
        match self.delegations.last() {
            Some(last) if last.delegation.pubkey == session_key => Ok(()),
            Some(_) => Err(DelegationChainError::SessionKeyMismatch),
            None => Err(DelegationChainError::Empty),
        }
    }

    /// An identity that signs with `key` on behalf of the chain's root key.
    pub fn into_identity(
        self,
        key: EphemeralKey,
    ) -> Result<DelegatedIdentity, DelegationChainError> {
        self.validate(key.public_key(), now_ns())?;
        // Canister signatures on the chain cannot be checked locally; the
        // receiving canister verifies them.
        Ok(DelegatedIdentity::new_unchecked(
            self.public_key,
            Box::new(key.identity),
            self.delegations,
        ))
    }
}

/// Obtain a delegation for `public_key` on `derivation_origin`.
pub async fn fetch_delegation<C: IdentityProviderConnection>(
    connection: &C,
    derivation_origin: &str,
    public_key: &[u8],
    max_time_to_live: u64,
) -> Result<(UserKey, SignedDelegation), FetchDelegationError> {
    let session_key = ByteBuf::from(public_key.to_vec());
    let (user_key, expiration) = connection
        .prepare_delegation(derivation_origin, session_key.clone(), Some(max_time_to_live))
        .await
        .map_err(|e| {
            FetchDelegationError::PrepareDelegationFailed(derivation_origin.to_string(), e)
        })?;

    match connection
        .get_delegation(derivation_origin, session_key, expiration)
        .await
        .map_err(|e| FetchDelegationError::GetDelegationFailed(derivation_origin.to_string(), e))?
    {
        GetDelegationResponse::SignedDelegation(signed) => Ok((user_key, signed.into())),
        GetDelegationResponse::NoSuchDelegation => Err(FetchDelegationError::NoSuchDelegation(
            derivation_origin.to_string(),
        )),
    }
}

/// Authenticate as the user on `origin` without handing out the user's own
/// session: a fresh key is generated and the identity provider delegates to it.
pub async fn delegated_identity<C: IdentityProviderConnection>(
    connection: &C,
    origin: &str,
    max_time_to_live: u64,
    logger: &Logger,
) -> Result<DelegatedIdentity, FetchDelegationError> {
    let key = EphemeralKey::generate()?;
    debug!(logger, "Generated session key";
        "origin" => origin, "session_key" => hex::encode(key.public_key()));

    let (user_key, signed_delegation) =
        fetch_delegation(connection, origin, key.public_key(), max_time_to_live).await?;
    let chain = DelegationChain::from_delegations(vec![signed_delegation], user_key.into_vec())?;
    debug!(logger, "Fetched delegation"; "origin" => origin, "expiration" => chain.expiration());

    Ok(chain.into_identity(key)?)
}

fn now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
