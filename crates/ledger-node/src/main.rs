//! # Ledger Node
//!
//! Command-line host for the asset ledger.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, then environment, then flags)
//! 2. Validate it
//! 3. Install the log subscriber
//! 4. Open the file-backed store
//! 5. Run the requested command

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ledger_node::config::parse_roles;
use ledger_node::{Entry, Invocation, LedgerHost, NodeConfig, Outcome};

/// Ledger Node: drive an asset ledger from the command line
#[derive(Parser, Debug)]
#[command(name = "ledger-node")]
#[command(about = "Reference host for the asset ledger state machine")]
struct Cli {
    /// Store file (overrides LEDGER_DATA_FILE)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Log filter directive (overrides LEDGER_LOG)
    #[arg(long, global = true)]
    log: Option<String>,

    /// Comma-separated roles allowed to create assets (overrides LEDGER_CREATE_ROLES)
    #[arg(long, global = true)]
    create_roles: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bootstrap the ledger with (name, credential) pairs
    Init {
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Call the mutating entry
    Invoke(CallArgs),
    /// Call the read-only entry
    Query(CallArgs),
    /// Apply a JSON-lines invocation log in order
    Replay { file: PathBuf },
    /// Print catalog ids in creation order
    Catalog,
}

#[derive(Args, Debug)]
struct CallArgs {
    /// Caller username attribute
    #[arg(long)]
    user: Option<String>,

    /// Caller role attribute
    #[arg(long)]
    role: Option<String>,

    /// Operation name
    operation: String,

    /// Operation arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

impl CallArgs {
    fn into_invocation(self, entry: Entry) -> Invocation {
        Invocation {
            entry,
            user: self.user,
            role: self.role,
            operation: self.operation,
            args: self.args,
        }
    }
}

fn load_config(cli: &Cli) -> Result<NodeConfig> {
    let mut config = NodeConfig::from_env().context("invalid environment configuration")?;

    if let Some(path) = &cli.data_file {
        config = config.with_data_file(path.clone());
    }
    if let Some(filter) = &cli.log {
        config = config.with_log_filter(filter.clone());
    }
    if let Some(roles) = &cli.create_roles {
        config = config.with_create_roles(parse_roles("--create-roles", roles)?);
    }

    config.validate()?;
    Ok(config)
}

fn print_payload(bytes: &[u8]) {
    if !bytes.is_empty() {
        println!("{}", String::from_utf8_lossy(bytes));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = load_config(&cli)?;

    // Initialize logging
    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter '{}'", config.log_filter))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let host = LedgerHost::open(&config)
        .with_context(|| format!("cannot open {}", config.data_file.display()))?;

    match cli.command {
        Command::Init { args } => {
            host.execute(&Invocation::init(args))
                .context("bootstrap failed")?;
            info!("Ledger bootstrapped");
        }
        Command::Invoke(call) => {
            let invocation = call.into_invocation(Entry::Invoke);
            let out = host
                .execute(&invocation)
                .with_context(|| format!("invoke {} failed", invocation.operation))?;
            print_payload(&out);
        }
        Command::Query(call) => {
            let invocation = call.into_invocation(Entry::Query);
            let out = host
                .execute(&invocation)
                .with_context(|| format!("query {} failed", invocation.operation))?;
            print_payload(&out);
        }
        Command::Replay { file } => {
            let log = File::open(&file)
                .with_context(|| format!("cannot open invocation log {}", file.display()))?;
            let records = host.replay(BufReader::new(log))?;

            for record in records {
                match record.outcome {
                    Outcome::Succeeded(bytes) => {
                        println!("{}: ok {}", record.line, String::from_utf8_lossy(&bytes))
                    }
                    Outcome::Failed(e) => println!("{}: error {}", record.line, e),
                    Outcome::Malformed(reason) => {
                        println!("{}: malformed {}", record.line, reason)
                    }
                }
            }
        }
        Command::Catalog => {
            for id in host.catalog().context("cannot read catalog")? {
                println!("{id}");
            }
        }
    }

    Ok(())
}
