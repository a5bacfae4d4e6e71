use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::id::InvoiceIdGenerator;
use crate::error::{BillingError, Result};
use crate::inventory::Catalog;

/// One product row on an invoice
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineItem {
    pub product_key: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// Godown stock of the product when it was selected, for display only
    pub godown_quantity: f64,
}

impl LineItem {
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// A change to one field of a line item, carrying the raw clerk input
#[derive(Debug, Clone, PartialEq)]
pub enum LineUpdate {
    Product(String),
    Quantity(String),
    Price(String),
}

/// Customer details printed on the receipt
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
}

/// The invoice being built at the counter.
///
/// The grand total is never stored; it is always the sum of the line
/// totals, so it cannot drift from the lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceModel {
    invoice_id: String,
    issue_date: NaiveDate,
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    lines: Vec<LineItem>,
}

impl InvoiceModel {
    /// Empty invoice with a fresh id, dated today
    pub fn new(ids: &InvoiceIdGenerator) -> Self {
        let today = Local::now().date_naive();
        Self::with_id(ids.generate_for(today), today)
    }

    pub fn with_id(invoice_id: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            issue_date,
            customer: Customer::default(),
            lines: Vec::new(),
        }
    }

    pub fn invoice_id(&self) -> &str {
        &self.invoice_id
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Result<&LineItem> {
        let len = self.lines.len();
        self.lines
            .get(index)
            .ok_or(BillingError::IndexOutOfRange { index, len })
    }

    /// Append a zero-valued line and return its index
    pub fn add_line_item(&mut self) -> usize {
        self.lines.push(LineItem::default());
        self.lines.len() - 1
    }

    pub fn remove_line_item(&mut self, index: usize) -> Result<LineItem> {
        self.check_index(index)?;
        Ok(self.lines.remove(index))
    }

    /// Apply one field change to a line.
    ///
    /// Selecting a product copies its price and godown quantity from the
    /// catalog snapshot; an unknown product only sets the key. Quantity and
    /// price input that does not parse is taken as zero.
    pub fn update_line_item(
        &mut self,
        index: usize,
        update: LineUpdate,
        catalog: &Catalog,
    ) -> Result<&LineItem> {
        self.check_index(index)?;
        let line = &mut self.lines[index];

        match update {
            LineUpdate::Product(product_key) => {
                if let Some(record) = catalog.find(&product_key) {
                    line.unit_price = record.unit_price;
                    line.godown_quantity = record.godown_quantity;
                }
                line.product_key = product_key;
            }
            LineUpdate::Quantity(input) => line.quantity = parse_amount(&input),
            LineUpdate::Price(input) => line.unit_price = parse_amount(&input),
        }

        Ok(&self.lines[index])
    }

    pub fn grand_total(&self) -> f64 {
        self.lines.iter().map(LineItem::line_total).sum()
    }

    /// Start over with an empty invoice, new id and today's date
    pub fn reset(&mut self, ids: &InvoiceIdGenerator) {
        *self = Self::new(ids);
    }

    /// A receipt needs a customer name and at least one line
    pub fn ensure_ready(&self) -> Result<()> {
        if self.customer.name.trim().is_empty() {
            return Err(BillingError::MissingCustomerName);
        }
        if self.lines.is_empty() {
            return Err(BillingError::EmptyInvoice);
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.lines.len() {
            return Err(BillingError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(())
    }
}

/// Parse clerk input as a non-negative amount, falling back to zero
pub fn parse_amount(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}
