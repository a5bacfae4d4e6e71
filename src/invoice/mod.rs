mod commit;
mod id;
mod model;
mod receipt;
mod record;
mod words;

pub use commit::{commit_invoice, deduct_all, deduct_line, ensure_unrecorded};
pub use id::InvoiceIdGenerator;
pub use model::{parse_amount, Customer, InvoiceModel, LineItem, LineUpdate};
pub use receipt::{receipt_file_name, render_receipt, ReceiptData, ReceiptLine};
pub use record::{FileInvoiceStore, InvoiceBook, InvoiceRecord, InvoiceStore};
pub use words::{amount_in_words, to_words};
