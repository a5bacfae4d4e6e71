use tracing::{error, info, warn};

use super::model::InvoiceModel;
use super::record::{InvoiceRecord, InvoiceStore};
use crate::error::{BillingError, Result};
use crate::inventory::{Catalog, StockLedgerClient, StockRecord, Track};

/// Deduct one line's quantity from the store and refresh the snapshot.
pub fn deduct_line<L: StockLedgerClient + ?Sized>(
    model: &InvoiceModel,
    index: usize,
    track: Track,
    ledger: &mut L,
    catalog: &mut Catalog,
) -> Result<StockRecord> {
    let line = model.line(index)?;
    if line.product_key.is_empty() {
        return Err(BillingError::NoProductSelected(index));
    }

    let record = ledger.decrement(&line.product_key, track, line.quantity)?;
    catalog.refresh(record.clone());
    Ok(record)
}

/// Deduct every line in order, stopping at the first failure.
///
/// Lines deducted before a failure stay deducted.
pub fn deduct_all<L: StockLedgerClient + ?Sized>(
    model: &InvoiceModel,
    track: Track,
    ledger: &mut L,
    catalog: &mut Catalog,
) -> Result<Vec<StockRecord>> {
    (0..model.len())
        .map(|index| deduct_line(model, index, track, ledger, catalog))
        .collect()
}

/// Fail if the store already holds a record with this bill's id.
///
/// Callers that deduct stock before committing check this first, so a
/// save that is bound to be refused never moves stock.
pub fn ensure_unrecorded<S: InvoiceStore + ?Sized>(
    model: &InvoiceModel,
    store: &S,
) -> Result<()> {
    if store.contains(model.invoice_id())? {
        warn!(id = model.invoice_id(), "invoice id already recorded");
        return Err(BillingError::Persistence(format!(
            "invoice {} is already recorded",
            model.invoice_id()
        )));
    }
    Ok(())
}

/// Persist the invoice and report the real outcome.
///
/// The model is left untouched; resetting it is up to the caller.
pub fn commit_invoice<S: InvoiceStore + ?Sized>(
    model: &InvoiceModel,
    store: &mut S,
) -> Result<InvoiceRecord> {
    model.ensure_ready()?;
    let record = InvoiceRecord::from_model(model)?;

    match store.save(&record) {
        Ok(()) => {
            info!(id = %record.id, total = record.total_amount, "invoice saved");
            Ok(record)
        }
        Err(e) => {
            error!(id = %record.id, error = %e, "failed to save invoice");
            Err(e)
        }
    }
}
