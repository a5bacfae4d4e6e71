use tracing::warn;

const UNITS: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];
const TEENS: [&str; 10] = [
    "Ten", "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen",
    "Eighteen", "Nineteen",
];
const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Scale labels applied to successive groups of three digits.
///
/// Groups are peeled uniformly by thousands, so "Lakh" labels the millions
/// group and "Crore" the billions group. Printed receipts depend on this.
const SCALES: [&str; 4] = ["", "Thousand", "Lakh", "Crore"];

/// Spell out a whole amount, e.g. `105` -> `"One Hundred and Five"`.
///
/// `u32` has at most four three-digit groups, one per scale label.
pub fn to_words(amount: u32) -> String {
    if amount == 0 {
        return "Zero".to_string();
    }

    let mut num = amount;
    let mut result = String::new();
    let mut scale = 0;

    while num > 0 {
        let group = num % 1000;
        if group != 0 {
            result = format!("{} {} {}", below_thousand(group), SCALES[scale], result);
        }
        num /= 1000;
        scale += 1;
    }

    result.trim().to_string()
}

/// Words for a currency total. The fractional part is dropped and
/// negative or out-of-range totals saturate, with a warning logged.
pub fn amount_in_words(total: f64) -> String {
    let whole = total.trunc();
    if !(0.0..=f64::from(u32::MAX)).contains(&whole) {
        warn!(total, "amount outside the spelled-out range, words are clamped");
    }
    to_words(whole as u32)
}

fn below_thousand(n: u32) -> String {
    let n = n as usize;
    match n {
        0 => String::new(),
        1..=9 => UNITS[n].to_string(),
        10..=19 => TEENS[n - 10].to_string(),
        20..=99 => {
            let mut words = TENS[n / 10].to_string();
            if n % 10 != 0 {
                words.push(' ');
                words.push_str(UNITS[n % 10]);
            }
            words
        }
        _ => {
            let mut words = format!("{} Hundred", UNITS[n / 100]);
            if n % 100 != 0 {
                words.push_str(" and ");
                words.push_str(&below_thousand((n % 100) as u32));
            }
            words
        }
    }
}
