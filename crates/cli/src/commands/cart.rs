//! Cart inspection and editing commands.
//!
//! Each command loads the saved cart from the configured data directory,
//! applies the change, flushes, and prints the resulting list. The CLI
//! exits right after a command, so it always flushes explicitly instead
//! of relying on the store's fire-and-forget mirror.

#![allow(clippy::print_stdout)]

use marketplace_cart::{CartConfig, CartStore, LocalStore};
use marketplace_core::{CartItem, NewCartItem, ProductId};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Print the saved cart.
pub async fn show() -> CliResult {
    let cart = open_cart().await?;
    print_cart(&cart.products());
    Ok(())
}

/// Add a product to the cart, or bump its quantity if already present.
pub async fn add(id: String, title: String, image_url: String, price: f64) -> CliResult {
    let cart = open_cart().await?;
    cart.add_to_cart(NewCartItem {
        id: ProductId::new(id),
        title,
        image_url,
        price,
    });
    cart.flush().await?;
    print_cart(&cart.products());
    Ok(())
}

/// Increase an item's quantity by one.
pub async fn increment(id: &str) -> CliResult {
    let cart = open_cart().await?;
    cart.increment(&ProductId::new(id));
    cart.flush().await?;
    print_cart(&cart.products());
    Ok(())
}

/// Decrease an item's quantity by one, never below 1.
pub async fn decrement(id: &str) -> CliResult {
    let cart = open_cart().await?;
    cart.decrement(&ProductId::new(id));
    cart.flush().await?;
    print_cart(&cart.products());
    Ok(())
}

/// Delete the saved cart blob.
pub async fn clear() -> CliResult {
    let config = CartConfig::from_env()?;
    let store = LocalStore::new(&config.data_dir);
    store.remove_item(&config.storage_key).await?;
    tracing::info!("Cleared saved cart under {}", store.root().display());
    Ok(())
}

async fn open_cart() -> Result<CartStore, Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let cart = CartStore::from_config(&config);
    cart.load().await?;
    Ok(cart)
}

fn print_cart(items: &[CartItem]) {
    if items.is_empty() {
        println!("(cart is empty)");
        return;
    }

    for item in items {
        println!(
            "{:>3} x {} [{}] @ {:.2}",
            item.quantity, item.title, item.id, item.price
        );
    }
}
