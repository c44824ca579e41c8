//! Rental Desk CLI
//!
//! Lists the rental desk tools and invokes them against a live backend, the
//! same way an agent runtime would.
//!
//! ## Usage
//!
//! Point the tools at a backend:
//! ```bash
//! export RENTAL_DESK_ENDPOINT="http://localhost:8000"
//! ```
//!
//! Then:
//! ```bash
//! cargo run -p desk-cli -- list
//! cargo run -p desk-cli -- schema get_data
//! cargo run -p desk-cli -- call get_data '{"query": "car_prices"}'
//! ```

use clap::{Parser, Subcommand};
use rental_desk_tools::{BackendClient, BackendConfig, ToolRegistry};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "desk-cli", about = "List and invoke the rental desk agent tools")]
struct Cli {
    /// Backend base URL (overrides RENTAL_DESK_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered tools in registration order
    List,
    /// Print capability descriptors as JSON
    Schema {
        /// Only this tool
        name: Option<String>,
    },
    /// Invoke a tool with a JSON argument payload
    Call {
        /// Tool name
        name: String,
        /// JSON object with the tool's arguments
        #[arg(default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    let config = match cli.endpoint {
        Some(endpoint) => BackendConfig::new(endpoint)?,
        None => BackendConfig::from_env()?,
    };
    info!(endpoint = config.endpoint(), "Using backend");

    let registry = ToolRegistry::rental_desk(&BackendClient::new(&config))?;

    match cli.command {
        Command::List => {
            for descriptor in registry.list_tools() {
                println!("{:<16} {}", descriptor.name(), descriptor.description());
            }
        }
        Command::Schema { name } => {
            let tools = match name {
                Some(name) => vec![registry.get_tool(&name)?.tool().clone()],
                None => registry.get_tools(),
            };
            println!("{}", serde_json::to_string_pretty(&tools)?);
        }
        Command::Call { name, args } => {
            let output = registry.execute(&name, args).await?;
            println!("{output}");
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "desk_cli=info,rental_desk_tools=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
