use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;

/// Bill ids of the form `PREFIX/YYYY/MM/NNN`.
///
/// The suffix is random and never checked against saved invoices, so two
/// bills in the same month can share an id. The invoice store rejects the
/// second save in that case.
#[derive(Debug, Clone)]
pub struct InvoiceIdGenerator {
    prefix: String,
}

impl InvoiceIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn generate(&self) -> String {
        self.generate_for(Local::now().date_naive())
    }

    pub fn generate_for(&self, date: NaiveDate) -> String {
        self.generate_with(date, &mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng>(&self, date: NaiveDate, rng: &mut R) -> String {
        let suffix: u32 = rng.gen_range(0..=999);
        format!(
            "{}/{}/{:02}/{:03}",
            self.prefix,
            date.year(),
            date.month(),
            suffix
        )
    }
}
