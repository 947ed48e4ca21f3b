//! Maa's Pickles CLI - migrations and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! maas-cli migrate
//!
//! # List the catalog, optionally by category
//! maas-cli catalog --category non-veg
//!
//! # Print a WhatsApp link for a message
//! maas-cli handoff --mobile "Hi, I'd like to order"
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "maas-cli")]
#[command(author, version, about = "Maa's Pickles CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// List the product catalog
    Catalog {
        /// Category slug (`veg`, `non-veg`, `special`, ...)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Print the WhatsApp link for a message
    Handoff {
        /// The message to pre-fill
        message: String,

        /// Destination phone number (defaults to the shop's)
        #[arg(short, long)]
        to: Option<String>,

        /// Build the mobile (`wa.me`) link instead of WhatsApp Web
        #[arg(short, long)]
        mobile: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Catalog { category } => commands::catalog::list(category.as_deref()),
        Commands::Handoff {
            message,
            to,
            mobile,
        } => commands::handoff::print_link(to.as_deref(), &message, mobile),
    }
    Ok(())
}
