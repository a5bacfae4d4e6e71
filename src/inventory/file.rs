use std::path::{Path, PathBuf};

use super::{StockLedgerClient, StockRecord, Track};
use crate::config::{load_inventory, save_inventory};
use crate::error::{BillingError, Result};

/// Ledger backed by inventory.toml in the config directory.
///
/// Every call re-reads the file; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct FileLedger {
    cfg_dir: PathBuf,
}

impl FileLedger {
    pub fn new(cfg_dir: &Path) -> Self {
        Self {
            cfg_dir: cfg_dir.to_path_buf(),
        }
    }
}

impl StockLedgerClient for FileLedger {
    fn find_by_product_key(&self, product_key: &str) -> Result<Option<StockRecord>> {
        let inventory = load_inventory(&self.cfg_dir)?;
        Ok(inventory
            .get(product_key)
            .map(|entry| StockRecord::from_entry(product_key, entry)))
    }

    fn list_products(&self) -> Result<Vec<StockRecord>> {
        let inventory = load_inventory(&self.cfg_dir)?;
        Ok(inventory
            .iter()
            .map(|(key, entry)| StockRecord::from_entry(key, entry))
            .collect())
    }

    fn write_quantity(&mut self, product_key: &str, track: Track, quantity: f64) -> Result<()> {
        let mut inventory = load_inventory(&self.cfg_dir)?;
        let entry = inventory
            .get_mut(product_key)
            .ok_or_else(|| BillingError::ProductNotFound(product_key.to_string()))?;

        match track {
            Track::OnHand => entry.quantity = quantity,
            Track::Godown => entry.godown_quantity = quantity,
        }

        save_inventory(&self.cfg_dir, &inventory)
    }
}
