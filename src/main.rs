use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use billing::config::{
    config_dir, load_config, load_draft, save_draft, Config, CONFIG_FILE, CONFIG_TEMPLATE,
    INVENTORY_FILE, INVENTORY_TEMPLATE,
};
use billing::error::{BillingError, Result};
use billing::inventory::{Catalog, FileLedger, StockLedgerClient, Track};
use billing::invoice::{
    amount_in_words, commit_invoice, deduct_all, deduct_line, ensure_unrecorded, render_receipt,
    FileInvoiceStore, InvoiceIdGenerator, InvoiceModel, InvoiceStore, LineUpdate,
};

#[derive(Parser)]
#[command(name = "billing")]
#[command(version, about = "Counter billing with stock deduction and PDF receipts", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.billing or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// List products with price and stock
    Products,

    /// Discard the current bill and start a new one
    New,

    /// Set customer details on the current bill
    Customer {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        phone: Option<String>,

        #[arg(short, long)]
        address: Option<String>,
    },

    /// Add a line to the current bill
    Add {
        /// Product from inventory.toml (fills in price)
        #[arg(short, long)]
        product: Option<String>,

        #[arg(short, long)]
        qty: Option<String>,

        /// Override the catalog price
        #[arg(long)]
        price: Option<String>,
    },

    /// Change a line on the current bill
    Set {
        /// Line number from 'show' (starting at 1)
        line: usize,

        #[arg(short, long)]
        product: Option<String>,

        #[arg(short, long)]
        qty: Option<String>,

        #[arg(long)]
        price: Option<String>,
    },

    /// Remove a line from the current bill
    Remove {
        /// Line number from 'show' (starting at 1)
        line: usize,
    },

    /// Show the current bill
    Show,

    /// Deduct a line's quantity from inventory
    Deduct {
        /// Line number from 'show' (starting at 1)
        line: usize,

        /// Deduct from godown stock instead of on-hand stock
        #[arg(long)]
        godown: bool,
    },

    /// Generate the receipt PDF for the current bill
    Pdf {
        /// Custom output file path (default: output_dir/<bill id>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open generated PDF with system default viewer
        #[arg(long)]
        open: bool,
    },

    /// Save the current bill and start a new one.
///
/// An id that is already recorded is refused before any stock moves, so a
/// bill kept with `--keep` cannot be deducted twice.
    Save {
        /// Deduct every line from inventory before saving
        #[arg(long)]
        deduct: bool,

        /// With --deduct, take stock from the godown
        #[arg(long, requires = "deduct")]
        godown: bool,

        /// Keep the bill open after saving
        #[arg(long)]
        keep: bool,
    },

    /// List saved invoices
    List {
        /// Number of invoices to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Spell out an amount as printed on receipts
    Words {
        amount: f64,
    },

    /// Show config and current bill summary
    Status,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Products => cmd_products(&cfg_dir),
        Commands::New => cmd_new(&cfg_dir),
        Commands::Customer {
            name,
            phone,
            address,
        } => cmd_customer(&cfg_dir, name, phone, address),
        Commands::Add { product, qty, price } => cmd_add(&cfg_dir, product, qty, price),
        Commands::Set {
            line,
            product,
            qty,
            price,
        } => cmd_set(&cfg_dir, line, product, qty, price),
        Commands::Remove { line } => cmd_remove(&cfg_dir, line),
        Commands::Show => cmd_show(&cfg_dir),
        Commands::Deduct { line, godown } => cmd_deduct(&cfg_dir, line, track(godown)),
        Commands::Pdf { output, open } => cmd_pdf(&cfg_dir, output, open),
        Commands::Save {
            deduct,
            godown,
            keep,
        } => cmd_save(&cfg_dir, deduct.then(|| track(godown)), keep),
        Commands::List { limit } => cmd_list(&cfg_dir, limit),
        Commands::Words { amount } => cmd_words(amount),
        Commands::Status => cmd_status(&cfg_dir),
    }
}

fn track(godown: bool) -> Track {
    if godown {
        Track::Godown
    } else {
        Track::OnHand
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(BillingError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;

    fs::write(cfg_dir.join(CONFIG_FILE), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join(INVENTORY_FILE), INVENTORY_TEMPLATE)?;

    println!("Initialized billing config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your shop details:  $EDITOR {}/{}",
        cfg_dir.display(),
        CONFIG_FILE
    );
    println!(
        "  2. Stock your inventory:    $EDITOR {}/{}",
        cfg_dir.display(),
        INVENTORY_FILE
    );
    println!();
    println!("Then start billing:");
    println!("  billing customer --name <name>");
    println!("  billing add --product <product> --qty <quantity>");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "PRODUCT")]
    product: String,
    #[tabled(rename = "PRICE")]
    price: String,
    #[tabled(rename = "ON HAND")]
    on_hand: f64,
    #[tabled(rename = "GODOWN")]
    godown: f64,
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "PRODUCT")]
    product: String,
    #[tabled(rename = "QTY")]
    quantity: f64,
    #[tabled(rename = "PRICE")]
    price: String,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "GODOWN")]
    godown: f64,
}

#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "CUSTOMER")]
    customer: String,
    #[tabled(rename = "LINES")]
    lines: usize,
    #[tabled(rename = "TOTAL")]
    total: String,
}

fn money(value: f64, currency_symbol: &str) -> String {
    format!("{}{:.2}", currency_symbol, value)
}

/// Load config.toml, failing early if 'billing init' was never run
fn load_initialized(cfg_dir: &Path) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(BillingError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    load_config(cfg_dir)
}

fn id_generator(config: &Config) -> InvoiceIdGenerator {
    InvoiceIdGenerator::new(config.invoice.id_prefix.clone())
}

/// Load the bill in progress, starting a fresh one if there is none
fn open_draft(cfg_dir: &Path, config: &Config) -> Result<InvoiceModel> {
    match load_draft(cfg_dir)? {
        Some(draft) => Ok(draft),
        None => Ok(InvoiceModel::new(&id_generator(config))),
    }
}

fn load_catalog(cfg_dir: &Path) -> Result<Catalog> {
    Ok(Catalog::new(FileLedger::new(cfg_dir).list_products()?))
}

/// Convert a 1-based line number from the CLI to a model index
fn line_index(line: usize, draft: &InvoiceModel) -> Result<usize> {
    if line == 0 || line > draft.len() {
        return Err(BillingError::LineOutOfRange {
            line,
            len: draft.len(),
        });
    }
    Ok(line - 1)
}

/// List products with price and stock
fn cmd_products(cfg_dir: &Path) -> Result<()> {
    let config = load_initialized(cfg_dir)?;
    let catalog = load_catalog(cfg_dir)?;

    if catalog.is_empty() {
        println!("No products in inventory.");
        println!("Add products to: {}/{}", cfg_dir.display(), INVENTORY_FILE);
        return Ok(());
    }

    let rows: Vec<ProductRow> = catalog
        .records()
        .iter()
        .map(|r| ProductRow {
            product: r.product_key.clone(),
            price: money(r.unit_price, &config.invoice.currency_symbol),
            on_hand: r.on_hand_quantity,
            godown: r.godown_quantity,
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Discard the current bill and start a new one
fn cmd_new(cfg_dir: &Path) -> Result<()> {
    let config = load_initialized(cfg_dir)?;
    let mut draft = open_draft(cfg_dir, &config)?;
    draft.reset(&id_generator(&config));
    save_draft(cfg_dir, &draft)?;

    println!("Started bill {}", draft.invoice_id());
    Ok(())
}

/// Set customer details on the current bill
fn cmd_customer(
    cfg_dir: &Path,
    name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
) -> Result<()> {
    let config = load_initialized(cfg_dir)?;
    let mut draft = open_draft(cfg_dir, &config)?;

    if let Some(name) = name {
        draft.customer.name = name;
    }
    if let Some(phone) = phone {
        draft.customer.phone_number = phone;
    }
    if let Some(address) = address {
        draft.customer.address = address;
    }
    save_draft(cfg_dir, &draft)?;

    println!("Customer for {}", draft.invoice_id());
    println!("  Name:    {}", draft.customer.name);
    println!("  Phone:   {}", draft.customer.phone_number);
    println!("  Address: {}", draft.customer.address);
    Ok(())
}

fn apply_updates(
    draft: &mut InvoiceModel,
    index: usize,
    product: Option<String>,
    qty: Option<String>,
    price: Option<String>,
    catalog: &Catalog,
) -> Result<()> {
    // Product first so an explicit price overrides the catalog price
    let updates = [
        product.map(LineUpdate::Product),
        qty.map(LineUpdate::Quantity),
        price.map(LineUpdate::Price),
    ];
    for update in updates.into_iter().flatten() {
        draft.update_line_item(index, update, catalog)?;
    }
    Ok(())
}

fn print_line(draft: &InvoiceModel, index: usize, config: &Config) -> Result<()> {
    let line = draft.line(index)?;
    let product = if line.product_key.is_empty() {
        "(no product)"
    } else {
        line.product_key.as_str()
    };
    println!(
        "Line {}: {} x {} @ {} = {}",
        index + 1,
        product,
        line.quantity,
        money(line.unit_price, &config.invoice.currency_symbol),
        money(line.line_total(), &config.invoice.currency_symbol)
    );
    println!(
        "Total: {}",
        money(draft.grand_total(), &config.invoice.currency_symbol)
    );
    Ok(())
}

/// Add a line to the current bill
fn cmd_add(
    cfg_dir: &Path,
    product: Option<String>,
    qty: Option<String>,
    price: Option<String>,
) -> Result<()> {
    let config = load_initialized(cfg_dir)?;
    let catalog = load_catalog(cfg_dir)?;
    let mut draft = open_draft(cfg_dir, &config)?;

    if let Some(key) = product.as_deref() {
        if catalog.find(key).is_none() {
            eprintln!("Warning: '{key}' is not in inventory; price not filled in");
        }
    }

    let index = draft.add_line_item();
    apply_updates(&mut draft, index, product, qty, price, &catalog)?;
    save_draft(cfg_dir, &draft)?;

    print_line(&draft, index, &config)
}

/// Change a line on the current bill
fn cmd_set(
    cfg_dir: &Path,
    line: usize,
    product: Option<String>,
    qty: Option<String>,
    price: Option<String>,
) -> Result<()> {
    let config = load_initialized(cfg_dir)?;
    let catalog = load_catalog(cfg_dir)?;
    let mut draft = open_draft(cfg_dir, &config)?;

    let index = line_index(line, &draft)?;
    apply_updates(&mut draft, index, product, qty, price, &catalog)?;
    save_draft(cfg_dir, &draft)?;

    print_line(&draft, index, &config)
}

/// Remove a line from the current bill
fn cmd_remove(cfg_dir: &Path, line: usize) -> Result<()> {
    let config = load_initialized(cfg_dir)?;
    let mut draft = open_draft(cfg_dir, &config)?;

    let index = line_index(line, &draft)?;
    let removed = draft.remove_line_item(index)?;
    save_draft(cfg_dir, &draft)?;

    println!("Removed line {} ({})", line, removed.product_key);
    println!(
        "Total: {}",
        money(draft.grand_total(), &config.invoice.currency_symbol)
    );
    Ok(())
}

/// Show the current bill
fn cmd_show(cfg_dir: &Path) -> Result<()> {
    let config = load_initialized(cfg_dir)?;
    let draft = open_draft(cfg_dir, &config)?;
    let symbol = &config.invoice.currency_symbol;

    println!("Bill ID:  {}", draft.invoice_id());
    println!("Date:     {}", draft.issue_date().format("%d/%m/%Y"));
    println!("Customer: {}", draft.customer.name);
    println!("Phone:    {}", draft.customer.phone_number);
    println!("Address:  {}", draft.customer.address);
    println!();

    if draft.is_empty() {
        println!("No lines yet. Use 'billing add' to add one.");
        return Ok(());
    }

    let rows: Vec<LineRow> = draft
        .lines()
        .iter()
        .enumerate()
        .map(|(idx, line)| LineRow {
            index: idx + 1,
            product: line.product_key.clone(),
            quantity: line.quantity,
            price: money(line.unit_price, symbol),
            total: money(line.line_total(), symbol),
            godown: line.godown_quantity,
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("ALL TOTAL: {}", money(draft.grand_total(), symbol));
    println!(
        "IN WORDS:  {} {} only.",
        amount_in_words(draft.grand_total()),
        config.invoice.currency_word
    );

    Ok(())
}

/// Deduct a line's quantity from inventory
fn cmd_deduct(cfg_dir: &Path, line: usize, track: Track) -> Result<()> {
    let config = load_initialized(cfg_dir)?;
    let mut catalog = load_catalog(cfg_dir)?;
    let draft = open_draft(cfg_dir, &config)?;
    let mut ledger = FileLedger::new(cfg_dir);

    let index = line_index(line, &draft)?;
    let record = deduct_line(&draft, index, track, &mut ledger, &mut catalog)?;

    println!(
        "Deducted {} {} from {} stock ({} left)",
        draft.lines()[index].quantity,
        record.product_key,
        track,
        record.quantity(track)
    );
    Ok(())
}

/// Generate the receipt PDF for the current bill
fn cmd_pdf(cfg_dir: &Path, output: Option<PathBuf>, open: bool) -> Result<()> {
    let config = load_initialized(cfg_dir)?;
    let draft = open_draft(cfg_dir, &config)?;

    let pdf_path = render_receipt(cfg_dir, &config, &draft, output)?;

    println!("Generated receipt {}", draft.invoice_id());
    println!(
        "  Total: {}",
        money(draft.grand_total(), &config.invoice.currency_symbol)
    );
    println!("  Saved: {}", pdf_path.display());

    if open {
        open_path(&pdf_path)?;
    }
    Ok(())
}

/// Save the current bill and start a new one.
///
/// An id that is already recorded is refused before any stock moves, so a
/// bill kept with `--keep` cannot be deducted twice.
fn cmd_save(cfg_dir: &Path, deduct: Option<Track>, keep: bool) -> Result<()> {
    let config = load_initialized(cfg_dir)?;
    let mut draft = open_draft(cfg_dir, &config)?;
    draft.ensure_ready()?;

    let mut store = FileInvoiceStore::new(cfg_dir);
    ensure_unrecorded(&draft, &store)?;

    if let Some(track) = deduct {
        let mut catalog = load_catalog(cfg_dir)?;
        let mut ledger = FileLedger::new(cfg_dir);
        let records = deduct_all(&draft, track, &mut ledger, &mut catalog)?;
        for record in &records {
            println!(
                "  Deducted {} ({} left in {} stock)",
                record.product_key,
                record.quantity(track),
                track
            );
        }
    }

    let record = commit_invoice(&draft, &mut store)?;

    println!("Saved {}", record.id);
    println!("  Customer: {}", record.customer_name);
    println!(
        "  Total:    {}",
        money(record.total_amount, &config.invoice.currency_symbol)
    );

    if keep {
        save_draft(cfg_dir, &draft)?;
    } else {
        draft.reset(&id_generator(&config));
        save_draft(cfg_dir, &draft)?;
        println!("Started bill {}", draft.invoice_id());
    }
    Ok(())
}

/// List saved invoices, newest first
fn cmd_list(cfg_dir: &Path, limit: Option<usize>) -> Result<()> {
    let config = load_initialized(cfg_dir)?;
    let invoices = FileInvoiceStore::new(cfg_dir).list()?;

    if invoices.is_empty() {
        println!("No invoices saved yet.");
        return Ok(());
    }

    let shown = limit.unwrap_or(invoices.len());
    let rows = invoices
        .iter()
        .rev()
        .take(shown)
        .map(|r| -> Result<InvoiceRow> {
            Ok(InvoiceRow {
                id: r.id.clone(),
                date: r.date.to_string(),
                customer: r.customer_name.clone(),
                lines: r.lines()?.len(),
                total: money(r.total_amount, &config.invoice.currency_symbol),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("Total: {} invoices", invoices.len());

    Ok(())
}

fn cmd_words(amount: f64) -> Result<()> {
    println!("{}", amount_in_words(amount));
    Ok(())
}

/// Show config and current bill summary
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    let config = load_initialized(cfg_dir)?;
    let catalog = load_catalog(cfg_dir)?;
    let draft = open_draft(cfg_dir, &config)?;
    let saved = FileInvoiceStore::new(cfg_dir).list()?;

    println!("Billing Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Shop:             {}", config.shop.name);
    println!("Products:         {}", catalog.len());
    println!("Saved invoices:   {}", saved.len());
    println!("Current bill:     {}", draft.invoice_id());
    println!("  Lines:          {}", draft.len());
    println!(
        "  Total:          {}",
        money(draft.grand_total(), &config.invoice.currency_symbol)
    );

    Ok(())
}

fn open_path(pdf_path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(pdf_path)
            .spawn()?;
    }
    Ok(())
}
