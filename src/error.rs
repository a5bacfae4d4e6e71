use std::path::PathBuf;
use thiserror::Error;

use crate::inventory::Track;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Config directory not found at {0}. Run 'billing init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Line index {index} is out of range (invoice has {len} line(s))")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Line {line} is out of range (invoice has {len} line(s))")]
    LineOutOfRange { line: usize, len: usize },

    #[error("Product '{0}' not found in inventory")]
    ProductNotFound(String),

    #[error("Insufficient {track} quantity for '{product}' (available {available}, requested {requested})")]
    InsufficientStock {
        product: String,
        track: Track,
        available: f64,
        requested: f64,
    },

    #[error("Invalid stock quantity {0}: must be a finite, non-negative number")]
    InvalidQuantity(f64),

    #[error("Line {0} has no product selected")]
    NoProductSelected(usize),

    #[error("Customer name is required. Use 'billing customer --name <NAME>'.")]
    MissingCustomerName,

    #[error("Invoice has no line items. Use 'billing add' to add one.")]
    EmptyInvoice,

    #[error("Failed to save invoice: {0}")]
    Persistence(String),

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BillingError>;
