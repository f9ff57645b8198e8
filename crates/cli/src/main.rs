mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eventlog::EventLog;

use config::Config;
use error::Result;

const CONFIG_FILE: &str = "tally.toml";

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Fan-out analytics event logger", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one event from the taxonomy
    Send {
        /// Event category (e.g. device)
        category: String,
        /// Event action (e.g. restart)
        action: String,
        /// JSON payload attached to the event
        #[arg(short, long)]
        json: Option<String>,
        /// Application id
        #[arg(short, long)]
        application: Option<String>,
        /// Device id
        #[arg(short, long)]
        device: Option<String>,
    },
    /// List the generated event methods
    Events,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let registry = adaptors::from_config(&config.adaptors);
    let log = EventLog::builder(config.prefix)
        .debug(config.debug)
        .adaptors(registry)
        .build()?;

    match cli.command {
        Commands::Send {
            category,
            action,
            json,
            application,
            device,
        } => {
            let json_data = json.as_deref().map(serde_json::from_str).transpose()?;
            let method = log.event(&category, &action)?;
            method.log(json_data, application, device).await?;
            println!("Sent \"{}\"", method.name());
        }
        Commands::Events => {
            println!("{:<28}  {:<24}  NAME", "CATEGORY", "ACTION");
            println!("{}", "-".repeat(80));
            for (category, action, name) in log.events() {
                println!("{category:<28}  {action:<24}  {name}");
            }
        }
    }

    Ok(())
}
