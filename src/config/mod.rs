mod product;
mod shop;

pub use product::ProductEntry;
pub use shop::{Config, InvoiceSettings, PdfSettings, Shop};

use crate::error::{BillingError, Result};
use crate::invoice::{InvoiceBook, InvoiceModel};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const INVENTORY_FILE: &str = "inventory.toml";
pub const INVOICES_FILE: &str = "invoices.toml";
pub const DRAFT_FILE: &str = "draft.toml";

/// Get the config directory path (~/.billing/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "billing") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        BillingError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".billing"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the PDF output directory; relative paths are taken from the config dir
pub fn resolve_output_dir(output_dir: &str, cfg_dir: &Path) -> PathBuf {
    let expanded = expand_path(output_dir);
    if expanded.is_absolute() {
        expanded
    } else {
        cfg_dir.join(expanded)
    }
}

fn load_toml<T: DeserializeOwned>(path: PathBuf) -> Result<T> {
    if !path.exists() {
        return Err(BillingError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| BillingError::ConfigParse { path, source: e })
}

fn save_toml<T: Serialize>(path: PathBuf, value: &T) -> Result<()> {
    let content = toml::to_string_pretty(value).map_err(|e| {
        BillingError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })?;
    fs::write(path, content)?;
    Ok(())
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    load_toml(config_dir.join(CONFIG_FILE))
}

/// Load inventory.toml, keyed by product name
pub fn load_inventory(config_dir: &Path) -> Result<BTreeMap<String, ProductEntry>> {
    load_toml(config_dir.join(INVENTORY_FILE))
}

/// Save inventory.toml
pub fn save_inventory(config_dir: &Path, inventory: &BTreeMap<String, ProductEntry>) -> Result<()> {
    save_toml(config_dir.join(INVENTORY_FILE), inventory)
}

/// Load invoices.toml (empty book if missing)
pub fn load_invoice_book(config_dir: &Path) -> Result<InvoiceBook> {
    let path = config_dir.join(INVOICES_FILE);
    if !path.exists() {
        return Ok(InvoiceBook::default());
    }
    load_toml(path)
}

/// Save invoices.toml
pub fn save_invoice_book(config_dir: &Path, book: &InvoiceBook) -> Result<()> {
    save_toml(config_dir.join(INVOICES_FILE), book)
}

/// Load the invoice in progress, if any
pub fn load_draft(config_dir: &Path) -> Result<Option<InvoiceModel>> {
    let path = config_dir.join(DRAFT_FILE);
    if !path.exists() {
        return Ok(None);
    }
    load_toml(path).map(Some)
}

/// Save the invoice in progress
pub fn save_draft(config_dir: &Path, draft: &InvoiceModel) -> Result<()> {
    save_toml(config_dir.join(DRAFT_FILE), draft)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[shop]
name = "Your Shop Name"
address = "Market Road, Your Town 700001"
# phone = "98765 43210 / 91234 56789"   # optional, printed top right

[invoice]
id_prefix = "INV"           # bill ids look like INV/2026/10/042
currency_symbol = "Rs."
currency_word = "Rupees"    # "IN WORDS: ... Rupees only."
footer = ["THANK YOU", "VISIT AGAIN"]
disclaimer = "P.S - This is an estimated bill"

[pdf]
output_dir = "output"       # relative to this directory, or an absolute/~ path
"#;

/// Template content for inventory.toml
pub const INVENTORY_TEMPLATE: &str = r#"# Products available for billing. The table name (e.g., [Rice]) is the
# product key used by the add/set commands.
#
# quantity        - on-hand stock at the counter
# godown_quantity - stock held in the godown (warehouse)
#
# Example:
#   billing add --product Rice --qty 5

[Rice]
price = 40.0
quantity = 100.0
godown_quantity = 500.0

[Oil]
price = 150.0
quantity = 20.0
godown_quantity = 60.0

[Sugar]
price = 45.0
quantity = 50.0
godown_quantity = 0.0
"#;
