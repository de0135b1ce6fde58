//! List command - show stored customers.

use std::path::PathBuf;

use clap::Args;
use console::style;

use kunden_core::models::customer::Customer;
use kunden_core::store::CustomerStore;

use super::{load_config, resolve_data_dir};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Only show customers with a job in this year
    #[arg(short, long)]
    year: Option<i32>,

    /// Sort order
    #[arg(short, long, value_enum, default_value = "name")]
    sort: SortOrder,

    /// Print as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Data directory for the customer store
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SortOrder {
    /// Alphabetical by name
    Name,
    /// Newest first
    Date,
}

pub fn run(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let data_dir = resolve_data_dir(args.data_dir.clone(), &config);

    let store = CustomerStore::open(&data_dir)?;
    let mut customers = store.load()?;

    if let Some(year) = args.year {
        customers.retain(|c| c.job_years().contains(&year));
    }

    sort_customers(&mut customers, args.sort);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&customers)?);
        return Ok(());
    }

    if customers.is_empty() {
        println!("{} No customers found.", style("ℹ").blue());
        return Ok(());
    }

    for customer in &customers {
        println!(
            "{}  {}",
            style(&customer.name).bold(),
            style(format!("({})", customer.id)).dim()
        );
        if !customer.location.is_empty() {
            println!("    {}", customer.location);
        }
        if !customer.phone.is_empty() {
            println!("    Tel: {}", customer.phone);
        }
        if !customer.email.is_empty() {
            println!("    E-Mail: {}", customer.email);
        }
        let years: Vec<String> = customer.job_years().iter().map(|y| y.to_string()).collect();
        println!(
            "    {} Aufträge{}",
            customer.jobs.len(),
            if years.is_empty() {
                String::new()
            } else {
                format!(" ({})", years.join(", "))
            }
        );
    }

    println!();
    println!("{} {} customers", style("✓").green(), customers.len());

    Ok(())
}

fn sort_customers(customers: &mut [Customer], order: SortOrder) {
    match order {
        SortOrder::Name => {
            customers.sort_by(|a, b| a.normalized_name().cmp(&b.normalized_name()));
        }
        SortOrder::Date => {
            customers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn customer(id: &str, name: &str, secs: i64) -> Customer {
        let mut c = Customer::new(id, name, "", "", "");
        c.created_at = Utc.timestamp_opt(secs, 0).unwrap();
        c
    }

    #[test]
    fn sorts_by_name_case_insensitively() {
        let mut customers = vec![
            customer("1", "zimmer", 0),
            customer("2", "Abel", 0),
        ];
        sort_customers(&mut customers, SortOrder::Name);

        assert_eq!(customers[0].name, "Abel");
    }

    #[test]
    fn sorts_newest_first_by_date() {
        let mut customers = vec![
            customer("1", "Alt", 100),
            customer("2", "Neu", 200),
        ];
        sort_customers(&mut customers, SortOrder::Date);

        assert_eq!(customers[0].name, "Neu");
    }
}
