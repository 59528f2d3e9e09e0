use crate::LookupOpts;
use ic_vc_flow::config::VcFlowConfig;
use ic_vc_flow::locator::CanisterLocator;
use ic_vc_flow::provider::CanisterLookup;
use slog::Logger;

pub(crate) async fn lookup(
    config: &VcFlowConfig,
    o: &LookupOpts,
    logger: &Logger,
) -> anyhow::Result<()> {
    let locator = CanisterLocator::new(config.lookup_timeout, logger)?;
    let canister_id = locator.lookup_canister(&o.origin).await?;
    println!("{}", canister_id);
    Ok(())
}
