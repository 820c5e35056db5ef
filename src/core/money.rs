// Amount formatting helpers for reports and error messages.

use crate::core::job::Currency;

pub fn currency_symbol(currency: Currency) -> &'static str {
    match currency {
        Currency::BDT => "৳",
        Currency::USD => "$",
        Currency::EUR => "€",
    }
}

/// Format an amount with its currency symbol and thousands separators, with
/// up to two fraction digits. Non-finite input renders as an em dash.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    if !amount.is_finite() {
        return "—".to_string();
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    let rounded = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let symbol = currency_symbol(currency);
    if frac.is_empty() {
        format!("{sign}{symbol}{grouped}")
    } else {
        format!("{sign}{symbol}{grouped}.{frac}")
    }
}
