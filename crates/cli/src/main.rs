//! Shopfront CLI - browse the catalog, manage a cart, and check out.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! shop products --search smart --category electronics --max-price 300
//! shop product 4
//!
//! # Cart
//! shop add 4 --quantity 2
//! shop set-quantity 4 1
//! shop cart
//!
//! # Checkout
//! shop login Ada
//! shop checkout --name Ada --email ada@example.com --address "1 Main St" \
//!     --city Springfield --zip 12345 --card 4242424242424242 --expiry 12/30 --cvv 123
//! shop orders
//! ```
//!
//! State lives in `SHOPFRONT_DATA_DIR` (see [`config`]).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::cell::Cell;
use std::process::ExitCode;
use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopfront_core::{Category, Price, ProductId};
use shopfront_store::{CartStore, CheckoutForm, FileStore};

use commands::CommandError;
use config::{LogFormat, ShopConfig};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about = "Shopfront storefront in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Match title or description, case-insensitive
        #[arg(short, long)]
        search: Option<String>,

        /// Only these categories (repeatable)
        #[arg(short, long)]
        category: Vec<Category>,

        /// Lowest price to include
        #[arg(long)]
        min_price: Option<Price>,

        /// Highest price to include
        #[arg(long)]
        max_price: Option<Price>,
    },
    /// Show one product
    Product { id: ProductId },
    /// Add a product to the cart
    Add {
        id: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove { id: ProductId },
    /// Set a cart item's quantity (zero or less removes it)
    SetQuantity {
        id: ProductId,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Show the cart
    Cart,
    /// Pay and place an order
    Checkout(CheckoutArgs),
    /// Show order history
    Orders,
    /// Sign in
    Login { name: String },
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
}

/// Payment form fields. Left blank unless given so validation can name the
/// first missing one.
#[derive(Args)]
struct CheckoutArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, default_value = "")]
    zip: String,
    #[arg(long, default_value = "")]
    card: String,
    #[arg(long, default_value = "")]
    expiry: String,
    #[arg(long, default_value = "")]
    cvv: String,
}

impl From<CheckoutArgs> for CheckoutForm {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            address: args.address,
            city: args.city,
            zip_code: args.zip,
            card_number: args.card,
            expiry_date: args.expiry,
            cvv: args.cvv,
        }
    }
}

#[allow(clippy::print_stdout, clippy::print_stderr)]
fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ShopConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_format);

    match run(cli, &config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(format: LogFormat) {
    // Logs go to stderr so command output stays clean.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_cli=warn,shopfront_store=warn".into());

    let json = format == LogFormat::Json;
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn run(cli: Cli, config: &ShopConfig) -> Result<String, CommandError> {
    let files = FileStore::open(&config.data_dir)?;

    match cli.command {
        Commands::Products {
            search,
            category,
            min_price,
            max_price,
        } => {
            let catalog = config.catalog()?;
            let filter = commands::catalog::filter_from_args(
                search,
                category,
                min_price,
                max_price,
                config.max_price,
            );
            Ok(commands::catalog::list(&catalog, &filter))
        }
        Commands::Product { id } => commands::catalog::show(&config.catalog()?, id),
        Commands::Login { name } => commands::session::login(&files, &name),
        Commands::Logout => commands::session::logout(&files),
        Commands::Whoami => Ok(commands::session::whoami(&files)),
        command => {
            let mut store = CartStore::load(&files);

            let changed = Rc::new(Cell::new(false));
            let flag = Rc::clone(&changed);
            store.subscribe(move |_| flag.set(true));

            let output = run_store_command(command, &mut store, &files, config)?;

            // Commands only log write failures; surface them here.
            if changed.get() {
                store.sync()?;
            }
            Ok(output)
        }
    }
}

fn run_store_command(
    command: Commands,
    store: &mut CartStore<&FileStore>,
    files: &FileStore,
    config: &ShopConfig,
) -> Result<String, CommandError> {
    match command {
        Commands::Add { id, quantity } => {
            commands::cart::add(store, &config.catalog()?, id, quantity)
        }
        Commands::Remove { id } => Ok(commands::cart::remove(store, id)),
        Commands::SetQuantity { id, quantity } => {
            commands::cart::set_quantity(store, id, quantity)
        }
        Commands::Clear => Ok(commands::cart::clear(store)),
        Commands::Cart => Ok(commands::cart::show(store)),
        Commands::Checkout(args) => {
            let identity = commands::session::load_identity(files);
            Ok(commands::checkout::pay(store, &identity, &args.into())?)
        }
        Commands::Orders => Ok(commands::orders::list(store)),
        Commands::Products { .. }
        | Commands::Product { .. }
        | Commands::Login { .. }
        | Commands::Logout
        | Commands::Whoami => Err("not a cart command".into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use shopfront_core::Identity;

    fn config(dir: &std::path::Path) -> ShopConfig {
        ShopConfig {
            data_dir: dir.to_path_buf(),
            catalog_path: None,
            max_price: Price::from_whole(1000),
            log_format: LogFormat::Text,
        }
    }

    fn shop(config: &ShopConfig, args: &[&str]) -> Result<String, CommandError> {
        let cli = Cli::try_parse_from(std::iter::once("shop").chain(args.iter().copied()))?;
        run(cli, config)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_negative_quantity() {
        let cli = Cli::try_parse_from(["shop", "set-quantity", "3", "-2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::SetQuantity { quantity: -2, .. }
        ));
    }

    #[test]
    fn test_parses_filters() {
        let cli = Cli::try_parse_from([
            "shop",
            "products",
            "--category",
            "Electronics",
            "--category",
            "clothing",
            "--max-price",
            "$300",
        ])
        .unwrap();
        let Commands::Products {
            category,
            max_price,
            ..
        } = cli.command
        else {
            panic!("expected products command");
        };
        assert_eq!(category, vec![Category::Electronics, Category::Clothing]);
        assert_eq!(max_price, Some(Price::from_whole(300)));
    }

    #[test]
    fn test_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        shop(&config, &["login", "Ada"]).unwrap();
        assert_eq!(shop(&config, &["whoami"]).unwrap(), "Signed in as Ada.");
        shop(&config, &["logout"]).unwrap();
        assert_eq!(shop(&config, &["whoami"]).unwrap(), "Not signed in.");
    }

    #[test]
    fn test_shopping_session_survives_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        shop(&config, &["add", "1", "--quantity", "2"]).unwrap();
        shop(&config, &["add", "7"]).unwrap();
        let cart = shop(&config, &["cart"]).unwrap();
        assert!(cart.ends_with("Total: $227.00"));

        let refused = shop(
            &config,
            &[
                "checkout", "--name", "Ada", "--email", "ada@example.com", "--address",
                "1 Main St", "--city", "Springfield", "--zip", "12345", "--card", "4242",
                "--expiry", "12/30", "--cvv", "123",
            ],
        );
        assert!(refused.is_err());

        shop(&config, &["login", "Ada"]).unwrap();
        let receipt = shop(
            &config,
            &[
                "checkout", "--name", "Ada", "--email", "ada@example.com", "--address",
                "1 Main St", "--city", "Springfield", "--zip", "12345", "--card", "4242",
                "--expiry", "12/30", "--cvv", "123",
            ],
        )
        .unwrap();
        assert!(receipt.contains("$227.00 (3 items)"));

        assert_eq!(shop(&config, &["cart"]).unwrap(), "Your cart is empty.");
        assert!(shop(&config, &["orders"]).unwrap().contains("Pending  $227.00"));
    }

    #[test]
    fn test_checkout_reports_missing_field() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let files = FileStore::open(dir.path()).unwrap();
        commands::session::login(&files, "Ada").unwrap();
        assert_eq!(
            commands::session::load_identity(&files),
            Identity::signed_in("Ada")
        );

        shop(&config, &["add", "2"]).unwrap();
        let err = shop(&config, &["checkout", "--name", "Ada"]).unwrap_err();
        assert!(err.to_string().contains("missing email"));
    }
}
