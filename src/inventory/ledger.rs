use tracing::{info, warn};

use super::{StockRecord, Track};
use crate::error::{BillingError, Result};

/// Access to the stock store.
///
/// Implementors provide keyed reads and raw quantity writes. The decrement
/// operations are built on top as read, compare, then write. That sequence
/// is not atomic: another session decrementing between the read and the
/// write is lost. A store with conditional writes should override
/// [`StockLedgerClient::decrement`] and pass the pre-read quantity as the
/// write precondition.
pub trait StockLedgerClient {
    /// Current record for a product, or `None` if the store has no such key
    fn find_by_product_key(&self, product_key: &str) -> Result<Option<StockRecord>>;

    /// Every product in the store, for populating the session catalog
    fn list_products(&self) -> Result<Vec<StockRecord>>;

    /// Overwrite one quantity track of an existing record
    fn write_quantity(&mut self, product_key: &str, track: Track, quantity: f64) -> Result<()>;

    /// Remove `amount` from one track, refusing to go below zero.
    ///
    /// Returns the record as written. `amount` must be finite and not
    /// negative.
    fn decrement(&mut self, product_key: &str, track: Track, amount: f64) -> Result<StockRecord> {
        if !amount.is_finite() || amount < 0.0 {
            warn!(product = product_key, %track, amount, "invalid decrement amount");
            return Err(BillingError::InvalidQuantity(amount));
        }

        let mut record = self
            .find_by_product_key(product_key)?
            .ok_or_else(|| {
                warn!(product = product_key, %track, "product not found in inventory");
                BillingError::ProductNotFound(product_key.to_string())
            })?;

        let current = record.quantity(track);
        if current < amount {
            warn!(
                product = product_key,
                %track,
                available = current,
                requested = amount,
                "insufficient stock"
            );
            return Err(BillingError::InsufficientStock {
                product: product_key.to_string(),
                track,
                available: current,
                requested: amount,
            });
        }

        let remaining = current - amount;
        self.write_quantity(product_key, track, remaining)?;
        record.set_quantity(track, remaining);

        info!(
            product = product_key,
            %track,
            before = current,
            after = remaining,
            "stock deducted"
        );
        Ok(record)
    }

    fn decrement_on_hand(&mut self, product_key: &str, amount: f64) -> Result<StockRecord> {
        self.decrement(product_key, Track::OnHand, amount)
    }

    fn decrement_godown(&mut self, product_key: &str, amount: f64) -> Result<StockRecord> {
        self.decrement(product_key, Track::Godown, amount)
    }
}
