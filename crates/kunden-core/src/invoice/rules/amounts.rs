//! German amount parsing and formatting.

/// Parse a German-formatted amount (e.g. "1.234,50" or "500,00").
///
/// The period is the thousands separator and the comma the decimal
/// separator. Returns `None` when the cleaned numeral does not parse.
pub fn parse_german_amount(s: &str) -> Option<f64> {
    let normalized = s.trim().replace('.', "").replace(',', ".");
    normalized.parse::<f64>().ok()
}

/// Format an amount in German style ("1.234,50 €").
pub fn format_german_amount(amount: f64) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((&s, "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{},{} €", sign, formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_german_amount() {
        assert_eq!(parse_german_amount("1.234,50"), Some(1234.5));
        assert_eq!(parse_german_amount("500,00"), Some(500.0));
        assert_eq!(parse_german_amount("15255,80"), Some(15255.8));
        assert_eq!(parse_german_amount("12.345.678,90"), Some(12345678.9));
    }

    #[test]
    fn test_parse_german_amount_invalid() {
        assert_eq!(parse_german_amount(""), None);
        assert_eq!(parse_german_amount(",,"), None);
        assert_eq!(parse_german_amount("abc"), None);
    }

    #[test]
    fn test_format_german_amount() {
        assert_eq!(format_german_amount(1234.5), "1.234,50 €");
        assert_eq!(format_german_amount(500.0), "500,00 €");
        assert_eq!(format_german_amount(12345678.9), "12.345.678,90 €");
        assert_eq!(format_german_amount(-42.0), "-42,00 €");
    }
}
