use serde::{Deserialize, Serialize};

/// One row of inventory.toml, keyed by product name
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProductEntry {
    pub price: f64,
    /// On-hand quantity
    pub quantity: f64,
    #[serde(default)]
    pub godown_quantity: f64,
}
