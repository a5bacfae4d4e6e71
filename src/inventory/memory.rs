use std::collections::BTreeMap;

use super::{StockLedgerClient, StockRecord, Track};
use crate::error::{BillingError, Result};

/// Ledger held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    records: BTreeMap<String, StockRecord>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = StockRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|r| (r.product_key.clone(), r))
                .collect(),
        }
    }

    pub fn insert(&mut self, record: StockRecord) {
        self.records.insert(record.product_key.clone(), record);
    }
}

impl StockLedgerClient for MemoryLedger {
    fn find_by_product_key(&self, product_key: &str) -> Result<Option<StockRecord>> {
        Ok(self.records.get(product_key).cloned())
    }

    fn list_products(&self) -> Result<Vec<StockRecord>> {
        Ok(self.records.values().cloned().collect())
    }

    fn write_quantity(&mut self, product_key: &str, track: Track, quantity: f64) -> Result<()> {
        let record = self
            .records
            .get_mut(product_key)
            .ok_or_else(|| BillingError::ProductNotFound(product_key.to_string()))?;
        record.set_quantity(track, quantity);
        Ok(())
    }
}
