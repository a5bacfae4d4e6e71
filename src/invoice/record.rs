use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::model::{InvoiceModel, LineItem};
use crate::config::{load_invoice_book, save_invoice_book};
use crate::error::{BillingError, Result};

/// A saved invoice, written once and never updated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: String,
    pub date: NaiveDate,
    pub customer_name: String,
    pub phone_number: String,
    pub address: String,
    pub total_amount: f64,
    /// Line items as a JSON array
    pub line_items: String,
}

impl InvoiceRecord {
    pub fn from_model(model: &InvoiceModel) -> Result<Self> {
        let line_items = serde_json::to_string(model.lines())
            .map_err(|e| BillingError::Persistence(e.to_string()))?;

        Ok(Self {
            id: model.invoice_id().to_string(),
            date: model.issue_date(),
            customer_name: model.customer.name.clone(),
            phone_number: model.customer.phone_number.clone(),
            address: model.customer.address.clone(),
            total_amount: model.grand_total(),
            line_items,
        })
    }

    pub fn lines(&self) -> Result<Vec<LineItem>> {
        serde_json::from_str(&self.line_items)
            .map_err(|e| BillingError::Persistence(format!("{}: {}", self.id, e)))
    }
}

/// Contents of invoices.toml
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InvoiceBook {
    #[serde(default)]
    pub invoices: Vec<InvoiceRecord>,
}

/// Where committed invoices go
pub trait InvoiceStore {
    /// Persist a new record. Any failure, including a missing
    /// acknowledgement, is a `Persistence` error.
    fn save(&mut self, record: &InvoiceRecord) -> Result<()>;

    fn list(&self) -> Result<Vec<InvoiceRecord>>;

    fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|r| r.id == id))
    }
}

/// Invoice store backed by invoices.toml in the config directory
#[derive(Debug, Clone)]
pub struct FileInvoiceStore {
    cfg_dir: PathBuf,
}

impl FileInvoiceStore {
    pub fn new(cfg_dir: &Path) -> Self {
        Self {
            cfg_dir: cfg_dir.to_path_buf(),
        }
    }
}

impl InvoiceStore for FileInvoiceStore {
    fn save(&mut self, record: &InvoiceRecord) -> Result<()> {
        let mut book = load_invoice_book(&self.cfg_dir).map_err(persistence)?;

        if book.invoices.iter().any(|r| r.id == record.id) {
            return Err(BillingError::Persistence(format!(
                "invoice {} is already recorded",
                record.id
            )));
        }

        book.invoices.push(record.clone());
        save_invoice_book(&self.cfg_dir, &book).map_err(persistence)?;

        // Read back to confirm the write landed
        let saved = load_invoice_book(&self.cfg_dir).map_err(persistence)?;
        if !saved.invoices.iter().any(|r| r.id == record.id) {
            return Err(BillingError::Persistence(format!(
                "invoice {} was not found after writing",
                record.id
            )));
        }

        Ok(())
    }

    fn list(&self) -> Result<Vec<InvoiceRecord>> {
        Ok(load_invoice_book(&self.cfg_dir)?.invoices)
    }
}

fn persistence(err: BillingError) -> BillingError {
    match err {
        BillingError::Persistence(_) => err,
        other => BillingError::Persistence(other.to_string()),
    }
}
