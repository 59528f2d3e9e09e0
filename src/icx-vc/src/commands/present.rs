use crate::{Opts, PresentOpts};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use ic_agent::Agent;
use ic_vc_flow::canister_api::{InternetIdentityAuthenticator, IssuerCanisterClient};
use ic_vc_flow::config::VcFlowConfig;
use ic_vc_flow::consent::{Consent, ConsentGate, ConsentRequest};
use ic_vc_flow::error::RespondError;
use ic_vc_flow::locator::CanisterLocator;
use ic_vc_flow::protocol::{
    vc_protocol, InboundRequest, ProtocolResult, RequestChannel, RequestId, VcFlowProgress,
    VcFlowProgressRenderer,
};
use ic_vc_flow::request::VcRequest;
use ic_vc_flow::{VcFlow, VcOutcome};
use serde::{Deserialize, Serialize};
use slog::{error, info, warn, Logger};
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const JSONRPC_VERSION: &str = "2.0";
const REQUEST_CREDENTIAL: &str = "request_credential";

pub(crate) async fn present(
    agent: &Agent,
    opts: &Opts,
    config: &VcFlowConfig,
    o: &PresentOpts,
    logger: &Logger,
) -> anyhow::Result<()> {
    let locator = CanisterLocator::new(config.lookup_timeout, logger)?;
    let authenticator = InternetIdentityAuthenticator::new(
        agent,
        config.identity_provider_canister_id,
        &o.ii_origin,
    );
    let issuer = IssuerCanisterClient::new(&opts.replica, opts.fetch_root_key).await?;
    let consent = TerminalConsent {
        anchor: o.anchor,
        assume_yes: o.yes,
        logger: logger.clone(),
    };
    let flow = VcFlow::new(&locator, &authenticator, &issuer, &consent, config, logger);

    let mut channel = JsonRpcChannel {
        source: Some(o.request.clone()),
        rp_origin: o.rp_origin.clone(),
        logger: logger.clone(),
    };
    let progress = LogProgress(logger.clone());

    let result = vc_protocol(&mut channel, &progress, |args| async move {
        flow.verify_credentials(&args).await
    })
    .await?;

    if result == ProtocolResult::Orphan {
        warn!(logger, "No credentials data provided! Wrong URL?");
    }
    Ok(())
}

/// `{"jsonrpc": "2.0", "id": .., "method": "request_credential", "params": ..}`
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    id: RequestId,
    method: String,
    params: VcRequest,
}

#[derive(Debug, Serialize)]
struct JsonRpcResponse<'a> {
    jsonrpc: &'static str,
    id: RequestId,
    result: &'a VcOutcome,
}

/// Reads one request from a file or stdin and writes the reply to stdout.
struct JsonRpcChannel {
    /// `Some(None)` is stdin; taken once read.
    source: Option<Option<PathBuf>>,
    rp_origin: String,
    logger: Logger,
}

impl JsonRpcChannel {
    fn parse(&self, text: &str) -> Option<InboundRequest> {
        if text.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<JsonRpcRequest>(text) {
            Ok(request) if request.method == REQUEST_CREDENTIAL => Some(InboundRequest {
                id: request.id,
                rp_origin: self.rp_origin.clone(),
                request: request.params,
            }),
            Ok(request) => {
                warn!(self.logger, "Ignoring unsupported method '{}'", request.method);
                None
            }
            Err(e) => {
                error!(self.logger, "Malformed credential request: {}", e);
                None
            }
        }
    }
}

impl RequestChannel for JsonRpcChannel {
    async fn receive(&mut self) -> Option<InboundRequest> {
        let source = self.source.take()?;
        let read = match &source {
            Some(path) => tokio::fs::read_to_string(path).await,
            None => {
                let mut text = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut text)
                    .await
                    .map(|_| text)
            }
        };
        match read {
            Ok(text) => self.parse(&text),
            Err(e) => {
                error!(self.logger, "Failed to read credential request: {}", e);
                None
            }
        }
    }

    async fn respond(&mut self, id: RequestId, outcome: &VcOutcome) -> Result<(), RespondError> {
        let response = JsonRpcResponse {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: outcome,
        };
        let mut body = serde_json::to_vec(&response).map_err(RespondError::EncodeFailed)?;
        body.push(b'\n');

        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(&body)
            .await
            .map_err(RespondError::DeliverFailed)?;
        stdout.flush().await.map_err(RespondError::DeliverFailed)
    }
}

/// Asks on the terminal, with the anchor fixed on the command line.
struct TerminalConsent {
    anchor: u64,
    assume_yes: bool,
    logger: Logger,
}

impl ConsentGate for TerminalConsent {
    async fn confirm(&self, request: ConsentRequest<'_>) -> Consent {
        eprintln!(
            "{} requests a credential from {}:",
            request.relying_origin, request.provider_origin
        );
        eprintln!("{}", request.consent_message);

        let allowed = if self.assume_yes {
            true
        } else {
            let prompt = format!("Share this credential for identity {}?", self.anchor);
            let answer = tokio::task::spawn_blocking(move || {
                Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(prompt)
                    .default(false)
                    .interact_opt()
            })
            .await;
            match answer {
                Ok(Ok(answer)) => answer.unwrap_or(false),
                Ok(Err(e)) => {
                    error!(self.logger, "Could not read consent: {}", e);
                    false
                }
                Err(e) => {
                    error!(self.logger, "Consent prompt failed: {}", e);
                    false
                }
            }
        };

        if allowed {
            Consent::Allowed {
                identity_number: self.anchor,
            }
        } else {
            info!(self.logger, "User canceled");
            Consent::Canceled
        }
    }
}

struct LogProgress(Logger);

impl VcFlowProgressRenderer for LogProgress {
    fn set_state(&self, state: VcFlowProgress) {
        match state {
            VcFlowProgress::Waiting => info!(self.0, "Waiting for credential request"),
            VcFlowProgress::Verifying => info!(self.0, "Verifying credentials"),
        }
    }
}
