mod commands;
mod support;
use crate::commands::lookup::lookup;
use crate::commands::present::present;
use crate::commands::principal::principal;
use crate::commands::schema::schema;
use anstyle::{AnsiColor, Style};
use anyhow::Context;
use clap::builder::Styles;
use clap::{crate_authors, crate_version, ArgAction, Parser};
use ic_agent::identity::{AnonymousIdentity, BasicIdentity, Secp256k1Identity};
use ic_agent::{Agent, Identity};
use ic_vc_flow::config::VcFlowConfig;
use std::path::{Path, PathBuf};

const DEFAULT_IC_GATEWAY: &str = "https://icp0.io";
const DEFAULT_II_ORIGIN: &str = "https://identity.ic0.app";

#[derive(Parser)]
#[command(
    version = crate_version!(),
    author = crate_authors!(),
    propagate_version = true,
    styles = style(),
)]
struct Opts {
    /// URL of the IC gateway or replica to talk to.
    #[arg(long, default_value = DEFAULT_IC_GATEWAY)]
    replica: String,

    /// A PEM file holding a device key of the anchor. Without one, calls are
    /// made anonymously and logging in to the identity provider fails.
    #[arg(long)]
    pem: Option<PathBuf>,

    /// A JSON file overriding the default flow configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fetch the root key from the replica. Only use this with a local replica.
    #[arg(long)]
    fetch_root_key: bool,

    /// Increase log verbosity. Repeat for more.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease log verbosity. Repeat for less.
    #[arg(short, long, action = ArgAction::Count, global = true, conflicts_with = "verbose")]
    quiet: u8,

    #[command(subcommand)]
    subcommand: SubCommand,
}

#[derive(Parser)]
enum SubCommand {
    /// Print the id of the canister serving an origin.
    Lookup(LookupOpts),

    /// Print the principal of an anchor on an origin.
    Principal(PrincipalOpts),

    /// Answer a relying party's credential request.
    Present(PresentOpts),

    /// Print the JSON schema of the configuration file.
    Schema(SchemaOpts),
}

#[derive(Parser)]
struct LookupOpts {
    /// The origin, e.g. `https://issuer.example`.
    origin: String,
}

#[derive(Parser)]
struct PrincipalOpts {
    /// The anchor (identity number).
    #[arg(long)]
    anchor: u64,

    /// The frontend origin to get the principal for.
    origin: String,

    /// Origin of the identity provider frontend, used to check the device is
    /// registered on the anchor.
    #[arg(long, default_value = DEFAULT_II_ORIGIN)]
    ii_origin: String,
}

#[derive(Parser)]
struct PresentOpts {
    /// The anchor to present credentials for.
    #[arg(long)]
    anchor: u64,

    /// Origin of the relying party that sent the request.
    #[arg(long)]
    rp_origin: String,

    /// A file holding the JSON-RPC `request_credential` message. Read from
    /// stdin if omitted.
    request: Option<PathBuf>,

    /// Origin of the identity provider frontend.
    #[arg(long, default_value = DEFAULT_II_ORIGIN)]
    ii_origin: String,

    /// Consent without prompting.
    #[arg(long)]
    yes: bool,

    /// Overrides the configured lifetime of the delegation handed to the
    /// issuer. Can be a human readable time (like `90s`) or a number of seconds.
    #[arg(long)]
    delegation_ttl: Option<humantime::Duration>,
}

#[derive(Parser)]
struct SchemaOpts {
    /// Outputs the schema to the specified file.
    #[arg(long)]
    outfile: Option<PathBuf>,
}

fn create_identity(maybe_pem: Option<&Path>) -> anyhow::Result<Box<dyn Identity + Sync + Send>> {
    let Some(pem_path) = maybe_pem else {
        return Ok(Box::new(AnonymousIdentity));
    };
    if let Ok(secp256k_identity) = Secp256k1Identity::from_pem_file(pem_path) {
        Ok(Box::new(secp256k_identity))
    } else {
        let identity = BasicIdentity::from_pem_file(pem_path)
            .with_context(|| format!("Could not read the key pair in {}", pem_path.display()))?;
        Ok(Box::new(identity))
    }
}

fn style() -> Styles {
    let green = Style::new().fg_color(Some(AnsiColor::Green.into()));
    let yellow = Style::new().fg_color(Some(AnsiColor::Yellow.into()));
    let red = Style::new()
        .fg_color(Some(AnsiColor::BrightRed.into()))
        .bold();
    Styles::styled()
        .literal(green)
        .placeholder(green)
        .error(red)
        .header(yellow)
        .invalid(yellow)
        .valid(green)
}

#[tokio::main(flavor = "multi_thread", worker_threads = 10)]
async fn main() -> anyhow::Result<()> {
    let opts: Opts = Opts::parse();

    let logger = support::new_logger(support::log_level(opts.verbose, opts.quiet));

    let mut config = match &opts.config {
        Some(path) => VcFlowConfig::load(path)?,
        None => VcFlowConfig::default(),
    };

    match &opts.subcommand {
        SubCommand::Schema(o) => {
            schema(o)?;
        }
        SubCommand::Lookup(o) => {
            lookup(&config, o, &logger).await?;
        }
        SubCommand::Principal(o) => {
            let agent = build_agent(&opts).await?;
            principal(&agent, &config, o).await?;
        }
        SubCommand::Present(o) => {
            if let Some(ttl) = o.delegation_ttl {
                config.delegation_max_time_to_live = ttl.into();
            }
            let agent = build_agent(&opts).await?;
            present(&agent, &opts, &config, o, &logger).await?;
        }
    }

    Ok(())
}

async fn build_agent(opts: &Opts) -> anyhow::Result<Agent> {
    let agent = Agent::builder()
        .with_url(&opts.replica)
        .with_boxed_identity(create_identity(opts.pem.as_deref())?)
        .build()?;

    if opts.fetch_root_key {
        agent.fetch_root_key().await?;
    }
    Ok(agent)
}
