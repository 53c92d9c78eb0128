#![forbid(unsafe_code)]
//! Inspect and edit the locally persisted wallet configuration.

use clap::{Parser, Subcommand};
use colored::*;
use emberwallet::settings::load_settings;
use emberwallet::storage::FileStore;
use emberwallet::store::AppStore;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ember-wallet", about = "Emberwallet state inspector")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the reconciled configuration and custom tokens
    Show,
    /// Validate and add a custom token
    AddToken {
        /// Token contract address (0x-prefixed, 40 hex characters)
        address: String,
        /// Token symbol
        symbol: String,
        /// Token decimals (non-negative integer)
        decimal: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = load_settings()?;
    let storage = Arc::new(FileStore::open(&settings.storage.path));
    let store = AppStore::bootstrap(storage);

    match cli.command {
        Command::Show => show(&store),
        Command::AddToken {
            address,
            symbol,
            decimal,
        } => add_token(&store, &address, &symbol, &decimal)?,
    }

    Ok(())
}

fn show(store: &AppStore) {
    let config = store.config();

    println!("{}", "Networks".bold());
    println!(
        "  selected: {}",
        config.networks.selected_network.bright_green()
    );
    for id in config.networks.static_networks.keys() {
        println!("  static:   {}", id);
    }
    for (id, network) in &config.networks.custom_networks {
        println!("  custom:   {} ({})", id.bright_yellow(), network.name);
    }

    println!("{}", "Nodes".bold());
    match config.nodes.selected.node_id() {
        Some(id) => println!("  selected: {}", id.bright_green()),
        None => println!("  selected: {}", "disconnected".red()),
    }
    for (id, node) in &config.nodes.custom_nodes {
        println!("  custom:   {} -> {} [{}]", id.bright_yellow(), node.url, node.network);
    }

    println!("{}", "Custom tokens".bold());
    for token in store.custom_tokens() {
        println!(
            "  {} ({} decimals) at {}",
            token.symbol.bright_cyan(),
            token.decimal,
            token.address
        );
    }
}

fn add_token(
    store: &AppStore,
    address: &str,
    symbol: &str,
    decimal: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut form = store.token_form();
    form.set_address(address);
    form.set_symbol(symbol);
    form.set_decimal(decimal);

    let errors = form.errors();
    if let Some(error) = errors.address {
        eprintln!("{} {}", "address:".red().bold(), error);
    }
    if let Some(error) = errors.symbol {
        eprintln!("{} {}", "symbol:".red().bold(), error);
    }
    if let Some(error) = errors.decimal {
        eprintln!("{} {}", "decimal:".red().bold(), error);
    }

    let token = form
        .submit()
        .ok_or("Token was not added: fix the fields above and retry")?;
    let symbol = token.symbol.clone();
    store.add_custom_token(token)?;

    println!("{} {}", "Added".green().bold(), symbol.bright_cyan());
    Ok(())
}
