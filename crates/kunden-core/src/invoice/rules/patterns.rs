//! Regex patterns for the German invoice template.
//!
//! The label strings are fixed to the one supplier layout this tool reads
//! ("Gesamtbetrag", "Ansprechpartner", the "KD Garten" footer). Supporting a
//! second layout means a second, separately configured pattern set, not a
//! loosening of these.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Recipient block contact lines. Longest alternative first so the whole
    // label is stripped, not just its prefix.
    pub static ref PHONE_LABEL: Regex = Regex::new(
        r"(?i)^(?:Telefon|Tel|Mobil)[:.]?\s*"
    ).unwrap();

    pub static ref EMAIL_LABEL: Regex = Regex::new(
        r"(?i)^E-?Mail[:.]?\s*"
    ).unwrap();

    pub static ref CONTACT_PERSON_LABEL: Regex = Regex::new(
        r"(?i)^Ansprechpartner[:.]?\s*"
    ).unwrap();

    // Stray total lines that bleed into the recipient block.
    pub static ref LEADING_AMOUNT: Regex = Regex::new(
        r"^\d+[.,]?\d*\s*€"
    ).unwrap();

    // German postal code + city ("12345 Musterstadt"). Marks the end of the
    // core address but does not terminate collection.
    pub static ref POSTAL_CODE_LINE: Regex = Regex::new(
        r"^\d{5}\s+\w+"
    ).unwrap();

    // Invoice metadata.
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)Rechnung\s*Nr\.?:?\s*(\S+)"
    ).unwrap();

    pub static ref INVOICE_DATE: Regex = Regex::new(
        r"(?i)Datum:?\s*(\d{1,2})\.(\d{1,2})\.(\d{4})"
    ).unwrap();

    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"(?i)Gesamtbetrag\s*([\d.,]+)\s*€"
    ).unwrap();

    // Line-item noise: ordinal numbering, approximate quantities, prices.
    pub static ref ITEM_ORDINAL: Regex = Regex::new(
        r"^\d+\.$"
    ).unwrap();

    pub static ref ITEM_QUANTITY: Regex = Regex::new(
        r"^Ca\.\s+\d+"
    ).unwrap();

    pub static ref ITEM_PRICE: Regex = Regex::new(
        r"^\d+[.,]\d+\s*€"
    ).unwrap();

    pub static ref ITEM_BARE_AMOUNT: Regex = Regex::new(
        r"^[\d.,]+\s*€$"
    ).unwrap();
}

/// Start anchor of the recipient block.
pub const RECIPIENT_START: &str = "Gesamtbetrag";

/// Fallback start anchor when no total line exists.
pub const RECIPIENT_START_FALLBACK: &str = "MwSt";

/// Footer markers ending the recipient block (sender info repeats there).
pub const RECIPIENT_END: &[&str] = &["KD Garten", "Inh.:", "Rechnung Nr"];

/// Tabular header opening the line-item section.
pub const ITEMS_HEADER: &str = "Pos Bezeichnung";

/// Markers closing the line-item section.
pub const ITEMS_END: &[&str] = &["Zwischensumme", "MwSt", "Gesamtbetrag"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_label_strips_full_word() {
        assert_eq!(PHONE_LABEL.replace("Telefon: 030-1234567", ""), "030-1234567");
        assert_eq!(PHONE_LABEL.replace("Tel: 030-1234567", ""), "030-1234567");
        assert_eq!(PHONE_LABEL.replace("Mobil 0171 2345678", ""), "0171 2345678");
    }

    #[test]
    fn email_label_matches_both_spellings() {
        assert!(EMAIL_LABEL.is_match("E-Mail: info@example.de"));
        assert!(EMAIL_LABEL.is_match("email info@example.de"));
    }

    #[test]
    fn leading_amount_detects_stray_totals() {
        assert!(LEADING_AMOUNT.is_match("45,00 €"));
        assert!(LEADING_AMOUNT.is_match("500 €"));
        // At most one separator: a thousands-and-decimal numeral is out of
        // range for this pattern.
        assert!(!LEADING_AMOUNT.is_match("1.234,50 €"));
        assert!(!LEADING_AMOUNT.is_match("Musterfirma GmbH"));
    }

    #[test]
    fn postal_code_line_matches_plz_city() {
        assert!(POSTAL_CODE_LINE.is_match("12345 Musterstadt"));
        assert!(!POSTAL_CODE_LINE.is_match("Musterstr. 1"));
    }

    #[test]
    fn invoice_number_captures_value() {
        let caps = INVOICE_NUMBER.captures("Rechnung Nr.:260109-01").unwrap();
        assert_eq!(&caps[1], "260109-01");
    }
}
