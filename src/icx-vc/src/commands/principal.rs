use crate::PrincipalOpts;
use ic_agent::Agent;
use ic_vc_flow::canister_api::InternetIdentityAuthenticator;
use ic_vc_flow::config::VcFlowConfig;
use ic_vc_flow::provider::{Authenticator, IdentityProviderConnection};

pub(crate) async fn principal(
    agent: &Agent,
    config: &VcFlowConfig,
    o: &PrincipalOpts,
) -> anyhow::Result<()> {
    let authenticator = InternetIdentityAuthenticator::new(
        agent,
        config.identity_provider_canister_id,
        &o.ii_origin,
    );
    let connection = authenticator.login(o.anchor).await?;
    let principal = connection.get_principal(&o.origin).await?;
    println!("{}", principal);
    Ok(())
}
