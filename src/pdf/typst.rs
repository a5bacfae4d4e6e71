use std::path::Path;
use std::process::Command;

use crate::error::{BillingError, Result};
use crate::invoice::ReceiptData;

/// Embedded Typst template for the counter receipt
/// Uses a placeholder that gets replaced with the actual JSON file path
const RECEIPT_TEMPLATE: &str = r##"// Receipt Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#let navy = rgb(0, 51, 102)
#let pale = rgb(240, 248, 255)

#set page(
  paper: "a4",
  fill: pale,
  margin: (top: 0.6in, bottom: 0.8in, left: 0.8in, right: 0.8in),
)

#set text(font: "Helvetica", size: 12pt)

// Bill id and shop phone on the top line
#grid(
  columns: (1fr, 1fr),
  align: (left, right),
  text(size: 14pt, fill: rgb(0, 102, 204))[Bill ID: #data.bill_id],
  if data.shop.phone != none { text(size: 10pt)[#data.shop.phone] } else { [] },
)

#v(0.5em)

#align(center)[
  #text(size: 22pt, fill: navy)[#data.shop.name]
  #v(0.2em)
  #data.shop.address
]

#v(1em)

Date: #data.date \
Customer Name: #data.customer_name \
Phone Number: #data.phone_number \
Address: #data.address

#v(1em)

// Line items table
#table(
  columns: (1fr, auto, auto, auto),
  align: (left, right, right, right),
  stroke: none,
  inset: 8pt,
  fill: (x, y) => if y == 0 { navy } else if calc.even(y) { pale } else { white },

  // Header
  ..([PRODUCT NAME], [QTY], [PRICE], [TOTAL]).map(h => text(fill: white, weight: "bold")[#h]),

  // Items
  ..data.items.map(item => (
    item.product,
    item.quantity,
    item.price,
    item.total,
  )).flatten()
)

#v(1em)

#text(size: 14pt, fill: rgb(0, 102, 0))[ALL TOTAL: #data.total /-]

#v(0.3em)

IN WORDS: #data.total_in_words #data.currency_word only.

#v(4em)

#align(center)[
  #for line in data.footer [
    #text(size: 14pt, fill: navy)[#line] \
  ]
  #if data.disclaimer != none [
    #v(0.5em)
    #text(size: 10pt, fill: gray)[#data.disclaimer]
  ]
]
"##;

/// Generate the receipt PDF using Typst CLI
pub fn generate_pdf(receipt: &ReceiptData, output_path: &Path) -> Result<()> {
    // Check if typst is available
    let typst_check = Command::new("typst").arg("--version").output();

    if typst_check.is_err() {
        return Err(BillingError::TypstNotFound);
    }

    let temp_dir = std::env::temp_dir().join("billing-cli");
    std::fs::create_dir_all(&temp_dir)?;

    let json_data = serde_json::to_string(receipt)
        .map_err(|e| BillingError::PdfGeneration(e.to_string()))?;

    let json_path = temp_dir.join("receipt.json");
    std::fs::write(&json_path, &json_data)?;

    // receipt.json sits next to the template, so the path stays relative
    let template_content = RECEIPT_TEMPLATE.replace("DATA_JSON_PATH", "receipt.json");
    let template_path = temp_dir.join("receipt.typ");
    std::fs::write(&template_path, &template_content)?;

    let output = Command::new("typst")
        .arg("compile")
        .arg("--root")
        .arg(&temp_dir)
        .arg(&template_path)
        .arg(output_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BillingError::PdfGeneration(stderr.to_string()));
    }

    let _ = std::fs::remove_file(&template_path);
    let _ = std::fs::remove_file(&json_path);

    Ok(())
}
