//! Positional text parser for the supplier invoice template.
//!
//! Works on the linearized text of one PDF. Line order is the only
//! structural signal: the layout is fixed as sender block, invoice body,
//! recipient block, footer. The recipient block is sliced out between two
//! content anchors instead of fixed offsets, which tolerates variable-length
//! sender and body sections.

use tracing::debug;

use crate::models::candidate::{CustomerCandidate, JobCandidate};

use super::rules::{
    amounts::parse_german_amount,
    dates::german_date_to_iso,
    patterns::*,
};

/// Address lines retained per recipient block. Bounds runaway collection
/// when the anchors are mis-detected.
const MAX_ADDRESS_LINES: usize = 4;

/// Customer and job candidates parsed from one invoice text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedInvoice {
    pub customer: CustomerCandidate,
    pub job: JobCandidate,
}

/// Rule-based parser for the known invoice layout.
///
/// Pure and synchronous: no I/O, no shared state, total over any input
/// string. A pattern that does not match leaves the field at its default.
#[derive(Debug, Clone, Default)]
pub struct InvoiceTextParser;

impl InvoiceTextParser {
    pub fn new() -> Self {
        Self
    }

    /// Run both extraction passes over one document text.
    pub fn parse(&self, text: &str) -> ParsedInvoice {
        ParsedInvoice {
            customer: self.extract_customer(text),
            job: self.extract_job(text),
        }
    }

    /// Locate the recipient block and read name, address, phone, email.
    ///
    /// The block starts after the first "Gesamtbetrag" line (fallback:
    /// first "MwSt" line) and ends at the first footer marker after it.
    /// Without a start anchor nothing is collected and every field stays
    /// empty; that is the expected degrade, not an error.
    pub fn extract_customer(&self, text: &str) -> CustomerCandidate {
        let lines = split_lines(text);

        let start = lines
            .iter()
            .position(|l| l.contains(RECIPIENT_START))
            .or_else(|| lines.iter().position(|l| l.contains(RECIPIENT_START_FALLBACK)));

        let Some(start) = start else {
            debug!("no recipient start anchor found, returning empty candidate");
            return CustomerCandidate::default();
        };

        let end = lines[start + 1..]
            .iter()
            .position(|l| RECIPIENT_END.iter().any(|m| l.contains(m)))
            .map(|i| start + 1 + i)
            .unwrap_or(lines.len());

        let mut address: Vec<&str> = Vec::new();
        let mut contact_person = String::new();
        let mut phone = String::new();
        let mut email = String::new();

        for &line in &lines[start + 1..end] {
            // Stray totals bleeding over from the amounts section.
            if LEADING_AMOUNT.is_match(line) || line.starts_with('€') {
                continue;
            }

            if PHONE_LABEL.is_match(line) {
                phone = PHONE_LABEL.replace(line, "").trim().to_string();
                continue;
            }

            if EMAIL_LABEL.is_match(line) {
                email = EMAIL_LABEL.replace(line, "").trim().to_string();
                continue;
            }

            if CONTACT_PERSON_LABEL.is_match(line) {
                contact_person = CONTACT_PERSON_LABEL.replace(line, "").trim().to_string();
                continue;
            }

            // The postal-code line does not terminate collection; a
            // contact-person line after it must still be captured. Lines
            // beyond the cap are silently dropped.
            if address.len() < MAX_ADDRESS_LINES {
                address.push(line);
            }
        }

        let mut name = address.first().map(|l| l.to_string()).unwrap_or_default();
        let location = address.get(1..).unwrap_or_default().join(", ");

        if !contact_person.is_empty() {
            name = format!("{} ({})", name, contact_person);
        }

        CustomerCandidate {
            name,
            location,
            phone,
            email,
        }
    }

    /// Read invoice number, date, total and line items in one forward pass.
    ///
    /// For number, date and total the first matching line wins; a repeated
    /// label later in the document (e.g. the footer) is ignored.
    pub fn extract_job(&self, text: &str) -> JobCandidate {
        let lines = split_lines(text);

        let mut invoice_number = String::new();
        let mut date = String::new();
        let mut price: Option<f64> = None;
        let mut price_matched = false;
        let mut items: Vec<&str> = Vec::new();
        let mut in_items = false;

        for &line in &lines {
            if invoice_number.is_empty() {
                if let Some(caps) = INVOICE_NUMBER.captures(line) {
                    invoice_number = caps[1].to_string();
                }
            }

            if date.is_empty() {
                if let Some(caps) = INVOICE_DATE.captures(line) {
                    date = german_date_to_iso(&caps[1], &caps[2], &caps[3]);
                }
            }

            if !price_matched {
                if let Some(caps) = TOTAL_AMOUNT.captures(line) {
                    price_matched = true;
                    // A numeral that fails to parse stays None.
                    price = parse_german_amount(&caps[1]);
                }
            }

            // Line-item section toggling, evaluated after the metadata
            // patterns so the "Gesamtbetrag ..." line both yields the total
            // and closes the section.
            if line.contains(ITEMS_HEADER)
                || (line.contains("Pos.") && line.contains("Bezeichnung"))
            {
                in_items = true;
                continue;
            }

            if in_items && ITEMS_END.iter().any(|m| line.contains(m)) {
                in_items = false;
                continue;
            }

            if in_items {
                if ITEM_ORDINAL.is_match(line)
                    || ITEM_QUANTITY.is_match(line)
                    || ITEM_PRICE.is_match(line)
                    || ITEM_BARE_AMOUNT.is_match(line)
                {
                    continue;
                }
                if line.chars().count() > 2 {
                    items.push(line);
                }
            }
        }

        let description = if !items.is_empty() {
            items.join("\n")
        } else if !invoice_number.is_empty() {
            format!("Rechnung {}", invoice_number)
        } else {
            "Importierte Rechnung".to_string()
        };

        JobCandidate {
            invoice_number,
            date,
            price,
            description,
        }
    }
}

/// Tokenize document text into ordered, trimmed, non-empty lines.
fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE_INVOICE: &str = "\
KD Garten
Inh.: Klaus Dieter
Musterweg 5
54321 Gartenstadt
Tel: 0151-9876543
E-Mail: info@kd-garten.de
Rechnung Nr.:260109-01
Datum:09.01.2026
Sehr geehrte Damen und Herren,
Pos Bezeichnung Menge Preis
1.
Rasenpflege und Heckenschnitt
Ca. 10 Std
45,00 \u{20ac}
2.
Entsorgung Gr\u{fc}nschnitt
120,00 \u{20ac}
Zwischensumme 570,00 \u{20ac}
MwSt 19% 108,30 \u{20ac}
Gesamtbetrag 678,30 \u{20ac}
Musterfirma GmbH
Musterstr. 1
12345 Musterstadt
Ansprechpartner: Frau M\u{fc}ller
KD Garten \u{b7} Inh.: Klaus Dieter \u{b7} Rechnung Nr: 260109-01
";

    #[test]
    fn customer_from_sample_invoice() {
        let parser = InvoiceTextParser::new();
        let customer = parser.extract_customer(SAMPLE_INVOICE);

        assert_eq!(customer.name, "Musterfirma GmbH (Frau M\u{fc}ller)");
        assert_eq!(customer.location, "Musterstr. 1, 12345 Musterstadt");
        // The sender's phone sits before the start anchor and must not leak
        // into the recipient candidate.
        assert_eq!(customer.phone, "");
        assert_eq!(customer.email, "");
    }

    #[test]
    fn job_from_sample_invoice() {
        let parser = InvoiceTextParser::new();
        let job = parser.extract_job(SAMPLE_INVOICE);

        assert_eq!(job.invoice_number, "260109-01");
        assert_eq!(job.date, "2026-01-09");
        assert_eq!(job.price, Some(678.30));
        assert_eq!(
            job.description,
            "Rasenpflege und Heckenschnitt\nEntsorgung Gr\u{fc}nschnitt"
        );
    }

    #[test]
    fn recipient_block_with_phone() {
        let text = "\
Gesamtbetrag 500,00 \u{20ac}
Musterfirma GmbH
Musterstr. 1
12345 Musterstadt
Tel: 030-1234567
Ansprechpartner: Frau M\u{fc}ller
KD Garten \u{b7} Inh.: Klaus Dieter
";
        let customer = InvoiceTextParser::new().extract_customer(text);

        assert_eq!(customer.name, "Musterfirma GmbH (Frau M\u{fc}ller)");
        assert_eq!(customer.location, "Musterstr. 1, 12345 Musterstadt");
        assert_eq!(customer.phone, "030-1234567");
        assert_eq!(customer.email, "");
    }

    #[test]
    fn address_lines_capped_at_four() {
        let text = "\
Gesamtbetrag 500,00 \u{20ac}
Zeile Eins
Zeile Zwei
Zeile Drei
Zeile Vier
Zeile F\u{fc}nf
Zeile Sechs
KD Garten
";
        let customer = InvoiceTextParser::new().extract_customer(text);

        assert_eq!(customer.name, "Zeile Eins");
        assert_eq!(customer.location, "Zeile Zwei, Zeile Drei, Zeile Vier");
    }

    #[test]
    fn mwst_fallback_start_anchor() {
        let text = "\
MwSt 19% 95,00 \u{20ac}
Beispiel AG
Beispielweg 2
KD Garten
";
        let customer = InvoiceTextParser::new().extract_customer(text);

        assert_eq!(customer.name, "Beispiel AG");
        assert_eq!(customer.location, "Beispielweg 2");
    }

    #[test]
    fn no_anchors_yields_empty_candidate() {
        let customer = InvoiceTextParser::new()
            .extract_customer("Irgendein Text\nohne Marker\n123 Zeilen");

        assert_eq!(customer, CustomerCandidate::default());
    }

    #[test]
    fn total_with_thousands_separator() {
        let job = InvoiceTextParser::new()
            .extract_job("Gesamtbetrag 1.234,50 \u{20ac}");

        assert_eq!(job.price, Some(1234.5));
    }

    #[test]
    fn date_reordered_to_iso() {
        let job = InvoiceTextParser::new().extract_job("Datum:09.01.2026");

        assert_eq!(job.date, "2026-01-09");
    }

    #[test]
    fn first_invoice_number_wins() {
        let text = "Rechnung Nr.:260109-01\nRechnung Nr.:999999-99";
        let job = InvoiceTextParser::new().extract_job(text);

        assert_eq!(job.invoice_number, "260109-01");
    }

    #[test]
    fn line_item_noise_is_filtered() {
        let text = "\
Pos Bezeichnung
1.
Rasenpflege
Ca. 10 Std
45,00 \u{20ac}
Zwischensumme
";
        let job = InvoiceTextParser::new().extract_job(text);

        assert_eq!(job.description, "Rasenpflege");
    }

    #[test]
    fn description_falls_back_to_invoice_number() {
        let job = InvoiceTextParser::new().extract_job("Rechnung Nr.:260109-01");

        assert_eq!(job.description, "Rechnung 260109-01");
    }

    #[test]
    fn empty_document_yields_defaults() {
        let parser = InvoiceTextParser::new();

        assert_eq!(parser.extract_customer(""), CustomerCandidate::default());

        let job = parser.extract_job("");
        assert_eq!(job.invoice_number, "");
        assert_eq!(job.date, "");
        assert_eq!(job.price, None);
        assert_eq!(job.description, "Importierte Rechnung");
    }

    #[test]
    fn unparseable_total_stays_none() {
        // The label matches but the numeral is separators only.
        let job = InvoiceTextParser::new().extract_job("Gesamtbetrag ,., \u{20ac}");

        assert_eq!(job.price, None);
    }

    #[test]
    fn extraction_is_total_and_idempotent() {
        let parser = InvoiceTextParser::new();
        let inputs = [
            "",
            "\n\n\n",
            "€€€",
            "Gesamtbetrag",
            "Pos Bezeichnung\nPos Bezeichnung",
            SAMPLE_INVOICE,
        ];

        for input in inputs {
            let first = parser.parse(input);
            let second = parser.parse(input);
            assert_eq!(first, second);
        }
    }
}
