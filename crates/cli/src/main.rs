//! shopcart CLI - drive the storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Put things in the cart
//! shopcart add Widget 9.99
//! shopcart add Gadget 4.50
//!
//! # Look at it
//! shopcart show
//! shopcart show --summary --html
//!
//! # Check out
//! shopcart contact --email me@example.com --city Austin --zip 78701
//! shopcart purchase
//!
//! # Emit the purchase record, as the confirmation page would
//! shopcart confirm
//! ```
//!
//! Configuration comes from the environment (see `shopcart_storefront::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "shopcart")]
#[command(author, version, about = "shopcart storefront tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of an item to the cart
    Add {
        /// Item name
        name: String,
        /// Unit price, e.g. 9.99
        price: String,
    },
    /// Remove an item's whole line from the cart
    Remove {
        /// Item name
        name: String,
    },
    /// Show the cart
    Show {
        /// Show the checkout summary instead of the full table
        #[arg(short, long)]
        summary: bool,
        /// Print the rendered HTML rows
        #[arg(long)]
        html: bool,
    },
    /// Record contact details
    Contact {
        #[command(flatten)]
        contact: commands::ContactArgs,
    },
    /// Go to checkout
    Checkout,
    /// Complete the purchase and empty the cart
    Purchase {
        #[command(flatten)]
        contact: commands::ContactArgs,
    },
    /// Load the confirmation page and push the purchase record
    Confirm,
}

fn main() {
    // Initialize tracing with EnvFilter
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopcart_storefront=info,shopcart_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = shopcart_storefront::config::StorefrontConfig::from_env()?;
    let mut shop = commands::open_storefront(&config)?;

    match cli.command {
        Commands::Add { name, price } => commands::cart::add(&mut shop, &name, &price)?,
        Commands::Remove { name } => commands::cart::remove(&mut shop, &name)?,
        Commands::Show { summary, html } => commands::cart::show(&shop, summary, html)?,
        Commands::Contact { contact } => commands::checkout::contact(&mut shop, &contact)?,
        Commands::Checkout => commands::checkout::checkout(&shop)?,
        Commands::Purchase { contact } => commands::checkout::purchase(&mut shop, &contact)?,
        Commands::Confirm => commands::checkout::confirm(&mut shop, &config)?,
    }
    Ok(())
}
