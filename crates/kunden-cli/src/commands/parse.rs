//! Parse command - extract customer and job data from a single invoice PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use kunden_core::invoice::rules::amounts::format_german_amount;
use kunden_core::invoice::{InvoiceTextParser, ParsedInvoice};
use kunden_core::pdf::{PdfTextExtractor, PdfTextSource};

use super::load_config;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input invoice PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print the extracted raw text instead of parsed fields
    #[arg(long)]
    raw_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "pdf" {
        anyhow::bail!("Unsupported file format: {}", extension);
    }

    info!("Parsing invoice: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let mut extractor = PdfTextExtractor::from_config(&config.pdf);
    extractor.load(&data)?;
    debug!("PDF has {} pages", extractor.page_count());

    let text = extractor.extract_text()?;

    if args.raw_text {
        print_or_write(&args, text)?;
        return Ok(());
    }

    let parsed = InvoiceTextParser::new().parse(&text);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "customer": parsed.customer,
            "job": parsed.job,
        }))?,
        OutputFormat::Csv => format_csv(&args.input, &parsed)?,
        OutputFormat::Text => format_text(&parsed),
    };

    print_or_write(&args, output)?;

    debug!("Total parsing time: {:?}", start.elapsed());

    Ok(())
}

fn print_or_write(args: &ParseArgs, content: String) -> anyhow::Result<()> {
    if let Some(output_path) = &args.output {
        fs::write(output_path, &content)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn format_csv(input: &PathBuf, parsed: &ParsedInvoice) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "file",
        "name",
        "location",
        "phone",
        "email",
        "invoice_number",
        "date",
        "price",
        "description",
    ])?;

    wtr.write_record([
        &input.display().to_string(),
        &parsed.customer.name,
        &parsed.customer.location,
        &parsed.customer.phone,
        &parsed.customer.email,
        &parsed.job.invoice_number,
        &parsed.job.date,
        &parsed
            .job
            .price
            .map(|p| p.to_string())
            .unwrap_or_default(),
        &parsed.job.description.replace('\n', "; "),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(parsed: &ParsedInvoice) -> String {
    let mut output = String::new();

    output.push_str("Kunde:\n");
    output.push_str(&format!("  Name:    {}\n", display_or_dash(&parsed.customer.name)));
    output.push_str(&format!("  Ort:     {}\n", display_or_dash(&parsed.customer.location)));
    output.push_str(&format!("  Telefon: {}\n", display_or_dash(&parsed.customer.phone)));
    output.push_str(&format!("  E-Mail:  {}\n", display_or_dash(&parsed.customer.email)));
    output.push('\n');

    output.push_str("Auftrag:\n");
    output.push_str(&format!(
        "  Rechnung Nr: {}\n",
        display_or_dash(&parsed.job.invoice_number)
    ));
    output.push_str(&format!("  Datum:       {}\n", display_or_dash(&parsed.job.date)));
    output.push_str(&format!(
        "  Betrag:      {}\n",
        parsed
            .job
            .price
            .map(format_german_amount)
            .unwrap_or_else(|| "-".to_string())
    ));
    output.push_str("  Beschreibung:\n");
    for line in parsed.job.description.lines() {
        output.push_str(&format!("    {}\n", line));
    }

    output
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_format_shows_dash_for_missing_fields() {
        let parsed = ParsedInvoice::default();
        let output = format_text(&parsed);

        assert!(output.contains("Name:    -"));
        assert!(output.contains("Betrag:      -"));
    }

    #[test]
    fn csv_format_has_header_and_one_row() {
        let parsed = ParsedInvoice::default();
        let output = format_csv(&PathBuf::from("a.pdf"), &parsed).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("file,name,location"));
    }
}
