//! Marketplace CLI - inspect and edit the locally persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Print the saved cart
//! market-cli cart show
//!
//! # Add a product (bumps quantity if the id is already in the cart)
//! market-cli cart add --id p1 --title "Shirt" --image-url https://cdn.example.com/shirt.png --price 10
//!
//! # Change quantities
//! market-cli cart increment p1
//! market-cli cart decrement p1
//!
//! # Delete the saved cart blob
//! market-cli cart clear
//! ```
//!
//! # Environment Variables
//!
//! - `MARKETPLACE_DATA_DIR` - Directory for the local store (default: `.marketplace`)
//! - `MARKETPLACE_CART_KEY` - Storage key for the cart blob

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "market-cli")]
#[command(author, version, about = "Marketplace CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit the locally persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the saved cart
    Show,
    /// Add a product, or bump its quantity if already in the cart
    Add {
        /// Product id
        #[arg(long)]
        id: String,

        /// Product display title
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Unit price
        #[arg(long)]
        price: f64,
    },
    /// Increase an item's quantity by one
    Increment {
        /// Product id
        id: String,
    },
    /// Decrease an item's quantity by one (never below 1)
    Decrement {
        /// Product id
        id: String,
    },
    /// Delete the saved cart blob
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show().await?,
            CartAction::Add {
                id,
                title,
                image_url,
                price,
            } => commands::cart::add(id, title, image_url, price).await?,
            CartAction::Increment { id } => commands::cart::increment(&id).await?,
            CartAction::Decrement { id } => commands::cart::decrement(&id).await?,
            CartAction::Clear => commands::cart::clear().await?,
        },
    }

    Ok(())
}
