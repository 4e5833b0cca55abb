mod commands;
mod config;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;

use crate::commands::{cmd_add, cmd_list, cmd_update};
use crate::config::Config;
use pantry_core::service::PantryService;

#[derive(Parser)]
#[command(
    name = "pantry",
    version,
    about = "A simple pantry inventory CLI",
    long_about = "\n\n  ██████╗  █████╗ ███╗   ██╗████████╗██████╗ ██╗   ██╗
  ██╔══██╗██╔══██╗████╗  ██║╚══██╔══╝██╔══██╗╚██╗ ██╔╝
  ██████╔╝███████║██╔██╗ ██║   ██║   ██████╔╝ ╚████╔╝
  ██╔═══╝ ██╔══██║██║╚██╗██║   ██║   ██╔══██╗  ╚██╔╝
  ██║     ██║  ██║██║ ╚████║   ██║   ██║  ██║   ██║
  ╚═╝     ╚═╝  ╚═╝╚═╝  ╚═══╝   ╚═╝   ╚═╝  ╚═╝   ╚═╝
               know what's on your shelf.
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an item (merges into an existing item with the same name)
    Add {
        /// Item name
        name: String,
        /// Quantity to add
        #[arg(short, long)]
        quantity: i64,
        /// Unit (e.g. "count", "liters", "loaf")
        #[arg(short, long)]
        unit: String,
        /// Expiry date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        expiry: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List pantry items
    List {
        /// Filter by name substring (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a pantry item by ID
    Update {
        /// Item ID to update
        id: i64,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New quantity
        #[arg(short, long)]
        quantity: Option<i64>,
        /// New unit
        #[arg(short, long)]
        unit: Option<String>,
        /// Replace the expiry dates (repeat for multiple dates)
        #[arg(long = "expiry", value_name = "DATE")]
        expiry_dates: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start the REST API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,
        /// Address to bind to (default: 127.0.0.1, use 0.0.0.0 to expose to network)
        #[arg(short, long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let service = PantryService::new(&config.db_path);

    match cli.command {
        Commands::Add {
            name,
            quantity,
            unit,
            expiry,
            json,
        } => cmd_add(&service, &name, quantity, &unit, expiry, json),
        Commands::List { search, json } => cmd_list(&service, search.as_deref(), json),
        Commands::Update {
            id,
            name,
            quantity,
            unit,
            expiry_dates,
            json,
        } => cmd_update(&service, id, name, quantity, unit, expiry_dates, json),
        Commands::Serve { port, bind } => server::start_server(service, port, &bind).await,
    }
}
