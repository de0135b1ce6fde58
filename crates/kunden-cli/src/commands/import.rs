//! Import command - batch-import invoice PDFs as customer records.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use kunden_core::import::{ImportPreview, InvoiceImporter};
use kunden_core::models::candidate::InvoiceExtraction;
use kunden_core::store::CustomerStore;

use super::{load_config, resolve_data_dir};

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Input files or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Write the imported records (default is a preview-only dry run)
    #[arg(long)]
    commit: bool,

    /// Also import files whose customer name already exists
    #[arg(long)]
    include_duplicates: bool,

    /// Data directory for the customer store
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

pub fn run(args: ImportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.include_duplicates {
        config.import.skip_duplicates = false;
    }

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No matching PDF files found");
    }

    println!("{} Found {} files to import", style("ℹ").blue(), files.len());

    let data_dir = resolve_data_dir(args.data_dir.clone(), &config);
    debug!("Using data directory {}", data_dir.display());
    let store = CustomerStore::open(&data_dir)?;
    let importer = InvoiceImporter::new(&store, config);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut extractions = Vec::with_capacity(files.len());
    for file in &files {
        extractions.push(importer.extract_file(file));
        pb.inc(1);
    }
    pb.finish_and_clear();

    let previews = importer.mark_duplicates(extractions)?;

    print_preview(&previews);

    if !args.commit {
        println!();
        println!(
            "{} Dry run only. Re-run with --commit to import.",
            style("ℹ").blue()
        );
        return Ok(());
    }

    let summary = importer.commit(&previews)?;

    println!();
    println!(
        "{} Imported {} customers in {:?}",
        style("✓").green(),
        summary.imported,
        start.elapsed()
    );
    println!(
        "   {} duplicates skipped, {} failed",
        style(summary.skipped_duplicates).yellow(),
        style(summary.failed).red()
    );

    Ok(())
}

/// Expand each input as a glob pattern; plain paths match themselves.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = PathBuf::from(input);
        if path.exists() {
            files.push(path);
            continue;
        }

        for entry in glob(input)? {
            files.push(entry?);
        }
    }

    files.retain(|p| {
        let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
        ext.eq_ignore_ascii_case("pdf")
    });

    Ok(files)
}

fn print_preview(previews: &[ImportPreview]) {
    println!();
    for preview in previews {
        match &preview.extraction {
            InvoiceExtraction::Success { customer, job, .. } => {
                let marker = if preview.duplicate {
                    style("≡ duplicate").yellow()
                } else {
                    style("✓").green()
                };
                println!(
                    "  {} {}: {} ({})",
                    marker,
                    preview.extraction.file_name(),
                    if customer.name.is_empty() { "<kein Name>" } else { &customer.name },
                    if job.invoice_number.is_empty() {
                        "Rechnung unbekannt".to_string()
                    } else {
                        format!("Rechnung {}", job.invoice_number)
                    }
                );
            }
            InvoiceExtraction::Failure { error, file_name, .. } => {
                println!("  {} {}: {}", style("✗").red(), file_name, error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_inputs_filters_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("a.pdf");
        let txt = dir.path().join("b.txt");
        std::fs::write(&pdf, b"x").unwrap();
        std::fs::write(&txt, b"x").unwrap();

        let inputs = vec![
            pdf.display().to_string(),
            txt.display().to_string(),
        ];
        let files = expand_inputs(&inputs).unwrap();

        assert_eq!(files, vec![pdf]);
    }

    #[test]
    fn expand_inputs_resolves_globs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("b.pdf"), b"x").unwrap();

        let pattern = dir.path().join("*.pdf").display().to_string();
        let files = expand_inputs(&[pattern]).unwrap();

        assert_eq!(files.len(), 2);
    }
}
