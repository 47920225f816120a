use access_core::{
    encode_actions, load_settings,
    processors::script::process_script_file,
    registry_address, simulate_actions,
    types::{
        function_id::{FunctionId, selector_from_signature},
        registry_settings::RegistrySettings,
    },
    write_transactions,
};
use alloy::primitives::Address;
use clap::{Args, Parser, Subcommand};
use eyre::{Result, eyre};
use log::info;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RegistryArgs {
    /// Path to the admin script JSON file
    #[arg(long = "script", short = 's')]
    script: String,

    /// Path to config.toml
    #[arg(long = "config", short = 'c')]
    config: Option<String>,

    /// Network ID selecting the config section
    #[arg(long = "network", short = 'n', default_value_t = 1)]
    network_id: u32,

    /// Registry owner, overrides the configured one
    #[arg(long = "owner", short = 'o')]
    owner: Option<Address>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply an admin script to a fresh registry and print the emitted events
    Simulate {
        #[command(flatten)]
        registry: RegistryArgs,

        /// Dump the resulting registry state to output/snapshot.json
        #[arg(long = "snapshot")]
        snapshot: bool,
    },
    /// Encode an admin script into one transaction file per action
    Encode {
        #[command(flatten)]
        registry: RegistryArgs,
    },
    /// Simulate a script, then check whether a caller may invoke a function
    Check {
        #[command(flatten)]
        registry: RegistryArgs,

        /// Account attempting the call
        #[arg(long = "caller")]
        caller: Address,

        /// Protected contract
        #[arg(long = "target", short = 't')]
        target: Address,

        /// Function signature, e.g. "transfer(address,uint256)"
        #[arg(long = "signature")]
        signature: String,
    },
    /// Print the selector and packed function id of a function
    FunctionId {
        /// Protected contract
        #[arg(long = "target", short = 't')]
        target: Address,

        /// Function signature, e.g. "transfer(address,uint256)"
        #[arg(long = "signature")]
        signature: String,
    },
}

fn settings(args: &RegistryArgs) -> Result<RegistrySettings> {
    let has_config = args.config.is_some() || Path::new("config.toml").exists();
    let mut settings = match (has_config, args.owner) {
        (true, _) => load_settings(args.config.as_deref(), args.network_id)?,
        (false, Some(owner)) => RegistrySettings::new(owner),
        (false, None) => return Err(eyre!("No config.toml found, --owner is required")),
    };
    if let Some(owner) = args.owner {
        settings.owner = owner;
    }
    Ok(settings)
}

fn reset_output_dir() -> Result<()> {
    // Remove output directory if it exists, then create it fresh
    if Path::new("output").exists() {
        fs::remove_dir_all("output")?;
    }
    fs::create_dir_all("output")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Simulate { registry, snapshot } => {
            let settings = settings(registry)?;
            let actions = process_script_file(&registry.script, registry_address(&settings))?;
            let (state, events) = simulate_actions(&settings, &actions).await?;

            for event in &events {
                println!("{}", event.describe());
            }
            println!("{} action(s), {} event(s)", actions.len(), events.len());

            if *snapshot {
                reset_output_dir()?;
                let json = serde_json::to_string_pretty(&state.snapshot())?;
                fs::write("output/snapshot.json", json)?;
                println!("Saved snapshot to: output/snapshot.json");
            }
        }
        Commands::Encode { registry } => {
            let settings = settings(registry)?;
            if settings.address.is_none() {
                info!("no registry address configured, encoding with the zero address as target");
            }
            let actions = process_script_file(&registry.script, registry_address(&settings))?;

            // Dry run first so a failing script never produces files
            simulate_actions(&settings, &actions).await?;

            reset_output_dir()?;
            let txs = encode_actions(&actions, registry.network_id);
            for path in write_transactions(Path::new("output"), &txs)? {
                println!("Saved transaction to: {}", path);
            }
        }
        Commands::Check {
            registry,
            caller,
            target,
            signature,
        } => {
            let settings = settings(registry)?;
            let actions = process_script_file(&registry.script, registry_address(&settings))?;
            let (state, _) = simulate_actions(&settings, &actions).await?;

            let selector = selector_from_signature(signature);
            match state.require_access(*caller, *target, selector) {
                Ok(()) => println!("hasAccess: true"),
                Err(e) => {
                    println!("hasAccess: false");
                    println!("Revert: {} ({})", e.error_code(), e.revert_data());
                }
            }
        }
        Commands::FunctionId { target, signature } => {
            let func_id = FunctionId::from_signature(*target, signature);
            println!("Selector: {}", func_id.selector());
            println!("Function ID: {}", func_id);
        }
    }

    Ok(())
}
