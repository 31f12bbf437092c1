//! Fixed-savings comparison across every fund and tax bracket
//!
//! Usage: fund_comparison [output.csv] [monthly] [years]
//! Defaults: fund_comparison.csv, 10000 per month, 5 years.

use anyhow::{Context, Result};
use fund_calculator::funds::FundCatalog;
use fund_calculator::input::{parse_amount, parse_count};
use fund_calculator::projection::{InvestmentParameters, ProjectionEngine};
use serde::Serialize;
use std::env;
use std::time::Instant;

/// One line of the comparison report
#[derive(Debug, Serialize)]
struct ComparisonRow<'a> {
    fund: &'a str,
    tax_status: &'static str,
    base_rate: f64,
    net_rate: f64,
    years: u32,
    total_invested: f64,
    final_value: f64,
    total_profit: f64,
    monthly_net_profit: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let output_path = args.get(1).map(String::as_str).unwrap_or("fund_comparison.csv");
    let monthly = args.get(2).map(|s| parse_amount(s)).unwrap_or(10_000.0);
    let years = args.get(3).map(|s| parse_count(s)).unwrap_or(5);

    let start = Instant::now();
    let catalog = FundCatalog::builtin();
    let engine = ProjectionEngine::default();

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    println!("{:<20} {:>10} {:>8} {:>16} {:>16}", "Fund", "Status", "Net %", "Final Value", "Profit");
    println!("{}", "-".repeat(74));

    for fund in catalog.funds() {
        for (is_tax_filer, tax_status) in [(true, "filer"), (false, "non-filer")] {
            let params = InvestmentParameters::new(0.0, monthly, fund.base_rate, is_tax_filer);
            let result = engine.fixed_savings(&params, years);

            println!(
                "{:<20} {:>10} {:>8.3} {:>16.2} {:>16.2}",
                fund.name, tax_status, result.net_annual_rate, result.final_value, result.total_profit
            );

            writer.serialize(ComparisonRow {
                fund: &fund.name,
                tax_status,
                base_rate: fund.base_rate,
                net_rate: result.net_annual_rate,
                years,
                total_invested: result.total_invested,
                final_value: result.final_value,
                total_profit: result.total_profit,
                monthly_net_profit: result.monthly_net_profit,
            })?;
        }
    }
    writer.flush()?;

    println!("\nOutput written to {} in {:?}", output_path, start.elapsed());
    Ok(())
}
