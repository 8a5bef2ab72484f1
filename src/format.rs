//! Balance formatting for display

/// Significant digits shown for ZEC amounts
const ZEC_SIGNIFICANT_DIGITS: usize = 8;

pub fn token_name(testnet: bool) -> &'static str {
    if testnet {
        "TAZ"
    } else {
        "ZEC"
    }
}

/// Format `value` like printf's `%.Ng`: `precision` significant digits,
/// trailing zeros removed, scientific notation for very small or large values.
pub fn format_significant(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string().to_lowercase();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Two decimals with English thousands separators, e.g. `1,234.56`
pub fn format_grouped(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Balance in ZEC (or TAZ on testnet) with eight significant digits
pub fn zec_display(balance: f64, testnet: bool) -> String {
    format!(
        "{} {}",
        format_significant(balance, ZEC_SIGNIFICANT_DIGITS),
        token_name(testnet)
    )
}

/// Dollar value of a balance. Testnet coins have no price, and neither does
/// anything before a price has been fetched.
pub fn usd_display(balance: f64, price: f64, testnet: bool) -> Option<String> {
    if !testnet && price > 0.0 {
        Some(format!("${}", format_grouped(balance * price)))
    } else {
        None
    }
}

/// `"1.5 ZEC ($75.00)"`, or just the ZEC part when no dollar value is known
pub fn zec_usd_display(balance: f64, price: f64, testnet: bool) -> String {
    let zec = zec_display(balance, testnet);
    match usd_display(balance, price, testnet) {
        Some(usd) => format!("{} ({})", zec, usd),
        None => zec,
    }
}
