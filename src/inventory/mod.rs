mod file;
mod ledger;
mod memory;

pub use file::FileLedger;
pub use ledger::StockLedgerClient;
pub use memory::MemoryLedger;

use serde::Serialize;
use std::fmt;

use crate::config::ProductEntry;

/// Which of the two independent stock counters an operation touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    OnHand,
    Godown,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::OnHand => write!(f, "on-hand"),
            Track::Godown => write!(f, "godown"),
        }
    }
}

/// A product's stock as last read from the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockRecord {
    pub product_key: String,
    pub on_hand_quantity: f64,
    pub godown_quantity: f64,
    pub unit_price: f64,
}

impl StockRecord {
    pub fn from_entry(product_key: &str, entry: &ProductEntry) -> Self {
        Self {
            product_key: product_key.to_string(),
            on_hand_quantity: entry.quantity,
            godown_quantity: entry.godown_quantity,
            unit_price: entry.price,
        }
    }

    pub fn quantity(&self, track: Track) -> f64 {
        match track {
            Track::OnHand => self.on_hand_quantity,
            Track::Godown => self.godown_quantity,
        }
    }

    pub fn set_quantity(&mut self, track: Track, quantity: f64) {
        match track {
            Track::OnHand => self.on_hand_quantity = quantity,
            Track::Godown => self.godown_quantity = quantity,
        }
    }
}

/// Session snapshot of the product list, used to autofill prices.
///
/// Not authoritative: decrements always re-read the store.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<StockRecord>,
}

impl Catalog {
    pub fn new(records: Vec<StockRecord>) -> Self {
        Self { records }
    }

    pub fn find(&self, product_key: &str) -> Option<&StockRecord> {
        self.records.iter().find(|r| r.product_key == product_key)
    }

    /// Replace the snapshot row for a record returned by the store
    pub fn refresh(&mut self, record: StockRecord) {
        match self
            .records
            .iter_mut()
            .find(|r| r.product_key == record.product_key)
        {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
