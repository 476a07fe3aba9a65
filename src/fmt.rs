use rust_decimal::Decimal;

/// Format an amount with a currency symbol and thousands separators: ₹1,234.56
pub fn money(val: Decimal, symbol: &str) -> String {
    let negative = val.is_sign_negative() && !val.is_zero();
    let fixed = plain(val.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

/// Two fraction digits, no grouping. Used for the CSV columns.
pub fn plain(val: Decimal) -> String {
    format!("{:.2}", val.round_dp(2))
}
