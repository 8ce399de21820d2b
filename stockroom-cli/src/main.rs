//! Stockroom CLI
//!
//! Command-line inventory shell over the PostgreSQL catalog store. Each
//! invocation performs one action, re-fetches the catalog, and prints the
//! result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use stockroom::connection::redact_connection_string;
use stockroom::{
    connect, InventoryShell, MayPostgresExecutor, NewCategory, NewProduct, Notice, PostgresCatalogStore, RowId,
    StockStatus, StockroomConfig, ViewModel,
};

type Shell = InventoryShell<PostgresCatalogStore<MayPostgresExecutor>>;

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(about = "Inventory shell for the Stockroom catalog")]
#[command(version = "0.1.0")]
struct Cli {
    /// Database connection URL (overrides configuration)
    #[arg(long)]
    database_url: Option<String>,

    /// Configuration file
    #[arg(long, default_value = stockroom::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Print Prometheus metrics for this run on exit
    #[arg(long)]
    metrics: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the catalog tables if they don't exist
    Init,

    /// Summary, product table and reorder list
    Report {
        /// Only show products whose name contains this text
        #[arg(long, default_value = "")]
        filter: String,

        /// Print the view model as JSON
        #[arg(long, conflicts_with = "csv")]
        json: bool,

        /// Print the product table as CSV
        #[arg(long)]
        csv: bool,
    },

    /// Products that need reordering
    Reorder,

    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Manage products
    #[command(subcommand)]
    Product(ProductCommand),
}

#[derive(Subcommand)]
enum CategoryCommand {
    /// List categories
    List,

    /// Add a category
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a category (its products become uncategorized)
    Delete { id: RowId },
}

#[derive(Subcommand)]
enum ProductCommand {
    /// List products
    List {
        #[arg(long, default_value = "")]
        filter: String,
    },

    /// Add a product
    Add {
        name: String,

        /// Unit price, e.g. 4.20
        #[arg(long)]
        price: Decimal,

        #[arg(long, default_value = "0")]
        quantity: u32,

        /// Category name; created when it doesn't exist yet
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a product
    Delete { id: RowId },

    /// Increase quantity by one
    Inc { id: RowId },

    /// Decrease quantity by one (stops at zero)
    Dec { id: RowId },

    /// Set an absolute quantity
    Set { id: RowId, quantity: u32 },
}

fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let code = match run(&cli) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            1
        }
    };

    if cli.metrics {
        print!("{}", stockroom::metrics::render_prometheus());
    }
    io::stdout().flush().ok();
    process::exit(code);
}

/// Returns `Ok(false)` when the action was rejected and reported as a notice
fn run(cli: &Cli) -> Result<bool> {
    let config = StockroomConfig::load_from(&cli.config).context("loading configuration")?;

    // --database-url, then STOCKROOM_DATABASE__URL, then DATABASE_URL, then the config file
    let database_url = cli
        .database_url
        .clone()
        .or_else(|| std::env::var("STOCKROOM_DATABASE__URL").ok())
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| config.database.url.clone());
    log::info!("connecting to {}", redact_connection_string(&database_url));

    let client = connect(&database_url).context("connecting to the catalog database")?;
    let store = PostgresCatalogStore::new(MayPostgresExecutor::new(client));

    if config.database.ensure_schema || matches!(cli.command, Commands::Init) {
        store.ensure_schema().context("creating catalog tables")?;
    }

    let mut shell = InventoryShell::new(store, config.inventory, config.palette);
    if !shell.refresh() {
        return Ok(report_notice(&shell, cli.quiet));
    }

    let applied = match &cli.command {
        Commands::Init => {
            if !cli.quiet {
                println!("{} catalog tables are ready", "✓".green());
            }
            return Ok(true);
        }
        Commands::Report { filter, json, csv } => {
            if !filter.is_empty() && !shell.set_filter(filter.as_str()) {
                return Ok(report_notice(&shell, cli.quiet));
            }
            let view = current_view(&shell)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(view)?);
            } else if *csv {
                view.write_csv(io::stdout().lock())?;
            } else {
                print_report(view);
            }
            return Ok(true);
        }
        Commands::Reorder => {
            print_reorder(current_view(&shell)?);
            return Ok(true);
        }
        Commands::Category(CategoryCommand::List) => {
            print_categories(current_view(&shell)?);
            return Ok(true);
        }
        Commands::Product(ProductCommand::List { filter }) => {
            if !filter.is_empty() && !shell.set_filter(filter.as_str()) {
                return Ok(report_notice(&shell, cli.quiet));
            }
            print_products(current_view(&shell)?);
            return Ok(true);
        }
        Commands::Category(CategoryCommand::Add { name, description }) => {
            let mut category = NewCategory::new(name.as_str());
            category.description = description.clone();
            shell.add_category(category)
        }
        Commands::Category(CategoryCommand::Delete { id }) => shell.delete_category(*id),
        Commands::Product(ProductCommand::Add {
            name,
            price,
            quantity,
            category,
            description,
        }) => add_product(&mut shell, name, *price, *quantity, category.as_deref(), description.clone()),
        Commands::Product(ProductCommand::Delete { id }) => shell.delete_product(*id),
        Commands::Product(ProductCommand::Inc { id }) => shell.increment(*id),
        Commands::Product(ProductCommand::Dec { id }) => shell.decrement(*id),
        Commands::Product(ProductCommand::Set { id, quantity }) => shell.set_quantity(*id, *quantity),
    };

    let ok = report_notice(&shell, cli.quiet);
    if applied && !cli.quiet {
        print_summary(current_view(&shell)?);
    }
    Ok(ok)
}

fn add_product(
    shell: &mut Shell,
    name: &str,
    price: Decimal,
    quantity: u32,
    category: Option<&str>,
    description: Option<String>,
) -> bool {
    let mut product = NewProduct::new(name, price, quantity);
    product.description = description;
    match category {
        Some(category) => shell.add_product_in_category(product, category),
        None => shell.add_product(product),
    }
}

fn current_view(shell: &Shell) -> Result<&ViewModel> {
    shell.view().context("no catalog view available")
}

fn report_notice(shell: &Shell, quiet: bool) -> bool {
    match shell.notice() {
        Some(Notice::Error(message)) => {
            eprintln!("{} {message}", "✗".red());
            false
        }
        Some(Notice::Success(message)) => {
            if !quiet {
                println!("{} {message}", "✓".green());
            }
            true
        }
        None => true,
    }
}

fn status_cell(status: StockStatus) -> String {
    let label = format!("{:<12}", status.label());
    match status {
        StockStatus::OutOfStock => label.red().bold().to_string(),
        StockStatus::LowStock => label.yellow().to_string(),
        StockStatus::InStock => label.green().to_string(),
    }
}

fn print_summary(view: &ViewModel) {
    let summary = &view.summary;
    println!(
        "{} {}   {} {}   {} {:.1}%",
        "items:".bold(),
        summary.total_quantity,
        "value:".bold(),
        summary.total_value.round_dp(2),
        "fill:".bold(),
        summary.fill_percent * 100.0
    );
}

fn print_products(view: &ViewModel) {
    println!(
        "{:>5}  {:<28} {:<18} {:>10} {:>8}  {:<12} {}",
        "id", "name", "category", "price", "qty", "status", "tag"
    );
    for row in &view.rows {
        println!(
            "{:>5}  {:<28} {:<18} {:>10} {:>8}  {} {}",
            row.id,
            row.name,
            row.category,
            row.unit_price.round_dp(2),
            row.quantity,
            status_cell(row.status),
            row.color
        );
    }
    if view.rows.is_empty() {
        println!("{}", "(no products)".dimmed());
    }
}

fn print_categories(view: &ViewModel) {
    println!("{:>5}  {:<24} {}", "id", "name", "description");
    for category in &view.categories {
        println!(
            "{:>5}  {:<24} {}",
            category.id,
            category.name,
            category.description.as_deref().unwrap_or("")
        );
    }
    if view.categories.is_empty() {
        println!("{}", "(no categories)".dimmed());
    }
}

fn print_reorder(view: &ViewModel) {
    if view.low_stock.is_empty() {
        println!("{} nothing to reorder", "✓".green());
        return;
    }
    println!("{}", "Reorder list".bold());
    for name in &view.low_stock {
        println!("  - {name}");
    }
}

fn print_report(view: &ViewModel) {
    print_summary(view);
    println!();
    print_products(view);
    println!();
    print_reorder(view);
}
