use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub shop: Shop,
    pub invoice: InvoiceSettings,
    pub pdf: PdfSettings,
}

/// Shop details printed in the receipt header
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Shop {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct InvoiceSettings {
    pub id_prefix: String,
    pub currency_symbol: String,
    /// Currency name used in the words line, e.g. "Rupees"
    pub currency_word: String,
    #[serde(default = "default_footer")]
    pub footer: Vec<String>,
    #[serde(default)]
    pub disclaimer: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PdfSettings {
    pub output_dir: String,
}

fn default_footer() -> Vec<String> {
    vec!["THANK YOU".to_string(), "VISIT AGAIN".to_string()]
}
