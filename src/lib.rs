pub mod config;
pub mod error;
pub mod inventory;
pub mod invoice;
pub mod pdf;

pub use config::{Config, ProductEntry, Shop};
pub use error::{BillingError, Result};
pub use inventory::{Catalog, FileLedger, MemoryLedger, StockLedgerClient, StockRecord, Track};
pub use invoice::{
    amount_in_words, commit_invoice, deduct_all, deduct_line, to_words, FileInvoiceStore,
    InvoiceIdGenerator, InvoiceModel, InvoiceRecord, InvoiceStore, LineItem, LineUpdate,
};
