use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use super::model::InvoiceModel;
use super::words::amount_in_words;
use crate::config::{resolve_output_dir, Config, Shop};
use crate::error::Result;
use crate::pdf::generate_pdf;

/// A row of the receipt table
#[derive(Debug, Serialize)]
pub struct ReceiptLine {
    pub product: String,
    pub quantity: String,
    pub price: String,
    pub total: String,
}

/// Complete receipt data for PDF generation
#[derive(Debug, Serialize)]
pub struct ReceiptData {
    pub shop: Shop,
    pub bill_id: String,
    pub date: String,
    pub customer_name: String,
    pub phone_number: String,
    pub address: String,
    pub items: Vec<ReceiptLine>,
    pub total: String,
    pub total_in_words: String,
    pub currency_word: String,
    pub footer: Vec<String>,
    pub disclaimer: Option<String>,
}

impl ReceiptData {
    pub fn new(model: &InvoiceModel, config: &Config) -> Self {
        let items = model
            .lines()
            .iter()
            .map(|line| ReceiptLine {
                product: line.product_key.clone(),
                quantity: line.quantity.to_string(),
                price: line.unit_price.to_string(),
                total: format!("{:.2}", line.line_total()),
            })
            .collect();

        let total = model.grand_total();

        Self {
            shop: config.shop.clone(),
            bill_id: model.invoice_id().to_string(),
            date: model.issue_date().format("%d/%m/%Y").to_string(),
            customer_name: model.customer.name.clone(),
            phone_number: model.customer.phone_number.clone(),
            address: model.customer.address.clone(),
            items,
            total: format!("{:.2}", total),
            total_in_words: amount_in_words(total),
            currency_word: config.invoice.currency_word.clone(),
            footer: config.invoice.footer.clone(),
            disclaimer: config.invoice.disclaimer.clone(),
        }
    }
}

/// File name for a bill id; path separators in the id become dashes
pub fn receipt_file_name(bill_id: &str) -> String {
    format!("{}.pdf", bill_id.replace(['/', '\\'], "-"))
}

/// Render the receipt PDF for the invoice in progress
pub fn render_receipt(
    cfg_dir: &Path,
    config: &Config,
    model: &InvoiceModel,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    model.ensure_ready()?;

    let pdf_path = match output_path {
        Some(path) => path,
        None => {
            let output_dir = resolve_output_dir(&config.pdf.output_dir, cfg_dir);
            std::fs::create_dir_all(&output_dir)?;
            output_dir.join(receipt_file_name(model.invoice_id()))
        }
    };

    let data = ReceiptData::new(model, config);
    generate_pdf(&data, &pdf_path)?;

    info!(id = model.invoice_id(), path = %pdf_path.display(), "receipt rendered");
    Ok(pdf_path)
}
