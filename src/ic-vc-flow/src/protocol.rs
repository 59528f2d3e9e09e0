//! The request/response exchange with the relying party around a flow.
use crate::consent::ConsentGate;
use crate::error::RespondError;
use crate::flow::VcFlow;
use crate::outcome::VcOutcome;
use crate::provider::{Authenticator, CanisterLookup, VcIssuerClient};
use crate::request::{VcRequest, VerifyCredentialsArgs};
use serde::{Deserialize, Serialize};
use slog::{error, info, warn, Logger};
use std::convert::Infallible;
use std::future::Future;

/// Correlates a response with the request it answers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(u64),
    Text(String),
}

/// A credential request, as delivered by the relying party's channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundRequest {
    pub id: RequestId,
    /// Origin of the sender, as established by the transport.
    pub rp_origin: String,
    pub request: VcRequest,
}

/// The transport between the relying party and the flow.
pub trait RequestChannel: Send {
    /// Waits for the relying party's request. `None` if the channel closed first.
    fn receive(&mut self) -> impl Future<Output = Option<InboundRequest>> + Send;

    fn respond(
        &mut self,
        id: RequestId,
        outcome: &VcOutcome,
    ) -> impl Future<Output = Result<(), RespondError>> + Send;
}

/// Stages of a flow, as shown to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VcFlowProgress {
    /// Waiting for the relying party to send its request
    Waiting,

    /// Running the verification
    Verifying,
}

/// Display progress of a flow
pub trait VcFlowProgressRenderer: Send + Sync {
    /// Set the current state of the flow
    fn set_state(&self, state: VcFlowProgress);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProtocolResult {
    /// The channel closed before any request arrived.
    Orphan,
    Replied(VcOutcome),
}

/// Wait for one request, verify it with `verify` and send the outcome back.
pub async fn vc_protocol<Ch, P, F, Fut>(
    channel: &mut Ch,
    progress: &P,
    verify: F,
) -> Result<ProtocolResult, RespondError>
where
    Ch: RequestChannel,
    P: VcFlowProgressRenderer + ?Sized,
    F: FnOnce(VerifyCredentialsArgs) -> Fut,
    Fut: Future<Output = VcOutcome>,
{
    progress.set_state(VcFlowProgress::Waiting);
    let Some(inbound) = channel.receive().await else {
        return Ok(ProtocolResult::Orphan);
    };

    progress.set_state(VcFlowProgress::Verifying);
    let outcome = verify(VerifyCredentialsArgs {
        request: inbound.request,
        rp_origin: inbound.rp_origin,
    })
    .await;

    channel.respond(inbound.id, &outcome).await?;
    Ok(ProtocolResult::Replied(outcome))
}

/// Serve a single flow over `channel`, then park: the flow has no way to end
/// but for its host to tear it down.
pub async fn vc_flow<Ch, P, L, A, I, G>(
    channel: &mut Ch,
    progress: &P,
    flow: &VcFlow<'_, L, A, I, G>,
    logger: &Logger,
) -> Infallible
where
    Ch: RequestChannel,
    P: VcFlowProgressRenderer + ?Sized,
    L: CanisterLookup,
    A: Authenticator,
    I: VcIssuerClient,
    G: ConsentGate,
{
    let result = vc_protocol(channel, progress, |args| async move {
        flow.verify_credentials(&args).await
    })
    .await;

    match result {
        Ok(ProtocolResult::Orphan) => warn!(logger, "No credentials data provided! Wrong URL?"),
        Ok(ProtocolResult::Replied(_)) => info!(logger, "Replied to relying party"),
        Err(e) => error!(logger, "{}", e),
    }

    std::future::pending().await
}
