//! The identity provider's two-step id alias protocol.
use crate::canister_api::types::internet_identity::{
    GetIdAliasError, GetIdAliasRequest, PrepareIdAliasError, PrepareIdAliasRequest,
    SignedIdAlias,
};
use crate::error::RequestAliasesError;
use crate::provider::IdentityProviderConnection;
use slog::{error, info, Logger};

/// The pair of alias credentials produced for one flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasCredentials {
    /// Scoped to the relying party; ends up in the presentation.
    pub rp_alias_credential: SignedIdAlias,
    /// Scoped to the issuer; only ever sent to the issuer.
    pub issuer_alias_credential: SignedIdAlias,
}

/// Prepare, then get, the id alias credentials linking the user's principals on
/// `rp_origin` and `issuer_origin`.
pub async fn request_aliases<C: IdentityProviderConnection>(
    connection: &C,
    rp_origin: &str,
    issuer_origin: &str,
    logger: &Logger,
) -> Result<AliasCredentials, RequestAliasesError> {
    let identity_number = connection.identity_number();

    let prepared = connection
        .prepare_id_alias(PrepareIdAliasRequest {
            identity_number,
            relying_party: rp_origin.to_string(),
            issuer: issuer_origin.to_string(),
        })
        .await
        .map_err(RequestAliasesError::PrepareFailed)
        .and_then(|result| {
            result.map_err(|PrepareIdAliasError::AuthenticationFailed(msg)| {
                RequestAliasesError::PrepareAuthenticationFailed(msg)
            })
        })
        .inspect_err(|e| error!(logger, "{}", e))?;

    let credentials = connection
        .get_id_alias(GetIdAliasRequest {
            identity_number,
            relying_party: rp_origin.to_string(),
            issuer: issuer_origin.to_string(),
            rp_id_alias_jwt: prepared.rp_id_alias_jwt,
            issuer_id_alias_jwt: prepared.issuer_id_alias_jwt,
        })
        .await
        .map_err(RequestAliasesError::GetFailed)
        .and_then(|result| {
            result.map_err(|e| match e {
                GetIdAliasError::AuthenticationFailed(msg) => {
                    RequestAliasesError::GetAuthenticationFailed(msg)
                }
                GetIdAliasError::NoSuchCredentials(msg) => {
                    RequestAliasesError::NoSuchCredentials(msg)
                }
            })
        })
        .inspect_err(|e| error!(logger, "{}", e))?;

    info!(logger, "Obtained id alias credentials";
        "relying_party" => rp_origin, "issuer" => issuer_origin);
    Ok(AliasCredentials {
        rp_alias_credential: credentials.rp_id_alias_credential,
        issuer_alias_credential: credentials.issuer_id_alias_credential,
    })
}
