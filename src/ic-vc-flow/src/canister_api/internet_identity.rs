use crate::canister_api::methods::internet_identity as ii;
use crate::canister_api::methods::method_names::{
    GET_DELEGATION, GET_ID_ALIAS, GET_PRINCIPAL, PREPARE_DELEGATION, PREPARE_ID_ALIAS,
};
use crate::canister_api::types::internet_identity::{
    GetDelegationResponse, GetIdAliasError, GetIdAliasRequest, IdAliasCredentials,
    IdentityNumber, PrepareIdAliasError, PrepareIdAliasRequest, PreparedIdAlias, SessionKey,
    Timestamp, UserKey,
};
use crate::error::{CanisterCallError, LoginError};
use crate::provider::{Authenticator, IdentityProviderConnection};
use candid::Principal;
use ic_agent::Agent;
use ic_utils::Canister;

/// Logs in to an Internet Identity canister with the identity installed on an
/// agent, which must be a device (or session) of the anchor.
pub struct InternetIdentityAuthenticator<'agent> {
    agent: &'agent Agent,
    canister_id: Principal,
    login_origin: String,
}

impl<'agent> InternetIdentityAuthenticator<'agent> {
    /// `login_origin` is the frontend origin whose principal is requested to
    /// confirm the agent's identity is authorized for the anchor.
    pub fn new(agent: &'agent Agent, canister_id: Principal, login_origin: &str) -> Self {
        Self {
            agent,
            canister_id,
            login_origin: login_origin.to_string(),
        }
    }
}

impl<'agent> Authenticator for InternetIdentityAuthenticator<'agent> {
    type Connection = InternetIdentityConnection<'agent>;

    async fn login(
        &self,
        identity_number: IdentityNumber,
    ) -> Result<Self::Connection, LoginError> {
        let canister = Canister::builder()
            .with_agent(self.agent)
            .with_canister_id(self.canister_id)
            .build()
            .map_err(|e| LoginError::ConnectFailed(e.into()))?;
        let connection = InternetIdentityConnection {
            canister,
            identity_number,
        };

        // get_principal traps unless the caller is authenticated for the anchor
        connection
            .get_principal(&self.login_origin)
            .await
            .map_err(|e| LoginError::NotAuthenticated(identity_number, e))?;
        Ok(connection)
    }
}

/// An authenticated session with an Internet Identity canister.
pub struct InternetIdentityConnection<'agent> {
    canister: Canister<'agent>,
    identity_number: IdentityNumber,
}

impl IdentityProviderConnection for InternetIdentityConnection<'_> {
    fn identity_number(&self) -> IdentityNumber {
        self.identity_number
    }

    async fn get_principal(&self, origin: &str) -> Result<Principal, CanisterCallError> {
        ii::get_principal(&self.canister, self.identity_number, origin)
            .await
            .map_err(|source| CanisterCallError::CallFailed {
                method: GET_PRINCIPAL,
                source,
            })
    }

    async fn prepare_id_alias(
        &self,
        request: PrepareIdAliasRequest,
    ) -> Result<Result<PreparedIdAlias, PrepareIdAliasError>, CanisterCallError> {
        ii::prepare_id_alias(&self.canister, request)
            .await
            .map_err(|source| CanisterCallError::CallFailed {
                method: PREPARE_ID_ALIAS,
                source,
            })
    }

    async fn get_id_alias(
        &self,
        request: GetIdAliasRequest,
    ) -> Result<Result<IdAliasCredentials, GetIdAliasError>, CanisterCallError> {
        ii::get_id_alias(&self.canister, request)
            .await
            .map_err(|source| CanisterCallError::CallFailed {
                method: GET_ID_ALIAS,
                source,
            })
    }

    async fn prepare_delegation(
        &self,
        origin: &str,
        session_key: SessionKey,
        max_time_to_live: Option<u64>,
    ) -> Result<(UserKey, Timestamp), CanisterCallError> {
        ii::prepare_delegation(
            &self.canister,
            self.identity_number,
            origin.to_string(),
            session_key,
            max_time_to_live,
        )
        .await
        .map_err(|source| CanisterCallError::CallFailed {
            method: PREPARE_DELEGATION,
            source,
        })
    }

    async fn get_delegation(
        &self,
        origin: &str,
        session_key: SessionKey,
        expiration: Timestamp,
    ) -> Result<GetDelegationResponse, CanisterCallError> {
        ii::get_delegation(
            &self.canister,
            self.identity_number,
            origin.to_string(),
            session_key,
            expiration,
        )
        .await
        .map_err(|source| CanisterCallError::CallFailed {
            method: GET_DELEGATION,
            source,
        })
    }
}
