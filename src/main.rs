//! Fund Calculator CLI
//!
//! Savings calculators for the fund catalog plus a locally stored portfolio.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use fund_calculator::config::{AppConfig, DEFAULT_CONFIG_PATH};
use fund_calculator::funds::{load_catalog, FundCatalog};
use fund_calculator::portfolio::{
    Aggregator, Dashboard, FileBlobStore, InvestmentPatch, NewInvestment, PortfolioStore,
};
use fund_calculator::projection::{
    default_step_up_amounts, CalculationKind, CalculationMode, InvestmentParameters,
    ProjectionConfig, ProjectionEngine, ProjectionResult,
};
use fund_calculator::input::{parse_amount, parse_amount_list, parse_count};
use fund_calculator::{FundError, ProjectionError, StorageError};

#[derive(Debug, Parser)]
#[command(name = "fund-calc", version, about = "Fund savings calculators and portfolio dashboard")]
struct Cli {
    /// Settings file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// CSV file replacing the built-in fund catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Override the portfolio data directory from the settings file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the fund catalog
    Funds,
    /// Run a savings calculator
    Calc(CalcArgs),
    /// Manage stored investments
    Portfolio {
        #[command(subcommand)]
        action: PortfolioCommand,
    },
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliMode {
    Fixed,
    Goal,
    StepUp,
}

impl From<CliMode> for CalculationKind {
    fn from(value: CliMode) -> Self {
        match value {
            CliMode::Fixed => CalculationKind::FixedSavings,
            CliMode::Goal => CalculationKind::GoalFinder,
            CliMode::StepUp => CalculationKind::StepUp,
        }
    }
}

#[derive(Debug, clap::Args)]
struct CalcArgs {
    /// Calculator; defaults to the configured one
    #[arg(value_enum)]
    mode: Option<CliMode>,

    /// Fund slug or name
    #[arg(long, default_value = "income")]
    fund: String,

    /// Override the fund's annual return, in percent
    #[arg(long)]
    rate: Option<String>,

    #[arg(long, default_value = "0")]
    initial: String,

    #[arg(long, default_value = "10000")]
    monthly: String,

    #[arg(long, default_value = "5")]
    years: String,

    /// Target monthly profit for the goal finder
    #[arg(long, default_value = "50000")]
    target: String,

    /// Comma-separated monthly amounts per year for the step-up plan
    #[arg(long)]
    amounts: Option<String>,

    #[arg(long, conflicts_with = "non_filer")]
    filer: bool,

    #[arg(long)]
    non_filer: bool,

    /// Write the month-by-month balances to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum PortfolioCommand {
    /// List stored investments
    List,
    /// Add an investment
    Add {
        /// Fund slug or name; fills name, category and rate
        #[arg(long)]
        fund: String,
        /// Override the catalog rate, in percent
        #[arg(long)]
        rate: Option<String>,
        #[arg(long, default_value = "0")]
        initial: String,
        #[arg(long, default_value = "0")]
        monthly: String,
        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        non_filer: bool,
    },
    /// Change fields of an investment
    Edit {
        id: String,
        #[arg(long)]
        fund: Option<String>,
        #[arg(long)]
        rate: Option<String>,
        #[arg(long)]
        initial: Option<String>,
        #[arg(long)]
        monthly: Option<String>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        filer: Option<bool>,
    },
    /// Remove an investment
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Portfolio totals, categories and holdings
    Dashboard {
        /// Valuation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// Projected total value for the coming months
    Trend {
        /// Months ahead, up to 600
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=600))]
        months: Option<u32>,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    Show,
    /// Set one of: default-tax-filer, default-calculation, filer-tax-rate,
    /// non-filer-tax-rate, data-dir, trend-horizon-months
    Set { key: String, value: String },
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    let catalog = match &cli.catalog {
        Some(path) => load_catalog(path)
            .with_context(|| format!("loading fund catalog {}", path.display()))?,
        None => FundCatalog::builtin(),
    };

    match cli.command {
        Command::Funds => print_funds(&catalog),
        Command::Calc(args) => run_calc(&config, &catalog, args),
        Command::Portfolio { action } => run_portfolio(&config, &catalog, action),
        Command::Config { action } => match action {
            ConfigCommand::Show => {
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
            ConfigCommand::Set { key, value } => {
                config.set(&key, &value)?;
                config.save(&cli.config)?;
                println!("Configuration saved to {}", cli.config.display());
                Ok(())
            }
        },
    }
}

fn print_funds(catalog: &FundCatalog) -> Result<()> {
    println!("{:<20} {:>8}  {}", "Fund", "Rate", "Description");
    println!("{}", "-".repeat(90));
    for fund in catalog.funds() {
        println!("{:<20} {:>7.1}%  {}", fund.name, fund.base_rate, fund.description);
    }
    Ok(())
}

fn run_calc(config: &AppConfig, catalog: &FundCatalog, args: CalcArgs) -> Result<()> {
    let fund = catalog
        .find(&args.fund)
        .ok_or_else(|| FundError::UnknownFund(args.fund.clone()))?;
    let rate = args.rate.as_deref().map(parse_amount).unwrap_or(fund.base_rate);
    let is_tax_filer = if args.filer {
        true
    } else if args.non_filer {
        false
    } else {
        config.default_tax_filer
    };

    let params = InvestmentParameters::from_text(&args.initial, &args.monthly, rate, is_tax_filer);
    let kind = args.mode.map(CalculationKind::from).unwrap_or(config.default_calculation);
    let mode = match kind {
        CalculationKind::FixedSavings => CalculationMode::fixed_savings_from_text(&args.years),
        CalculationKind::GoalFinder => CalculationMode::goal_finder_from_text(&args.target),
        CalculationKind::StepUp => {
            let yearly_amounts = match &args.amounts {
                Some(text) => parse_amount_list(text),
                None => default_step_up_amounts(params.monthly_contribution, parse_count(&args.years)),
            };
            CalculationMode::StepUp { yearly_amounts }
        }
    };

    let engine = ProjectionEngine::new(
        config.tax_rates,
        ProjectionConfig {
            detailed_output: args.csv.is_some(),
            ..Default::default()
        },
    );

    let result = match engine.project(&params, &mode) {
        Ok(result) => result,
        Err(ProjectionError::ZeroRate) => {
            println!("Goal cannot be computed: the net return rate is zero.");
            return Ok(());
        }
        Err(ProjectionError::NoYears) => {
            println!("Step-up plan needs at least one year.");
            return Ok(());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{} Calculator - {}", fund.name, kind.label());
        println!("{}", "=".repeat(50));
        print_projection(&result, params.is_tax_filer);
    }

    if let Some(path) = &args.csv {
        write_csv(path, result.trajectory())?;
        println!("\nMonthly balances written to: {}", path.display());
    }
    Ok(())
}

fn print_projection(result: &ProjectionResult, is_tax_filer: bool) {
    let status = if is_tax_filer { "filer" } else { "non-filer" };
    match result {
        ProjectionResult::Standard(p) => {
            println!("  Duration:           {}", result.duration_label());
            println!("  Net Return Rate:    {:.2}% ({status})", p.net_annual_rate);
            println!("  Total Invested:     {}", rupees(p.total_invested));
            println!("  Total Profit:       {}", rupees(p.total_profit));
            println!("  Final Value:        {}", rupees(p.final_value));
            println!("  Monthly Net Profit: {}", rupees(p.monthly_net_profit));
        }
        ProjectionResult::Goal(p) => {
            println!("  Target Profit:      {} / month", rupees(p.target_monthly_profit));
            println!("  Required Balance:   {}", rupees(p.required_balance));
            println!("  Time Needed:        {}", result.duration_label());
            if !p.reached {
                println!("  (target not reached within the search limit)");
            }
            println!("  Monthly Investment: {}", rupees(p.monthly_contribution));
            println!("  Net Return Rate:    {:.2}% ({status})", p.net_annual_rate);
            println!("  Total Invested:     {}", rupees(p.total_invested));
            println!("  Final Value:        {}", rupees(p.final_value));
        }
    }
}

fn run_portfolio(config: &AppConfig, catalog: &FundCatalog, action: PortfolioCommand) -> Result<()> {
    let mut store = PortfolioStore::load(FileBlobStore::new(&config.data_dir));
    let today = Local::now().date_naive();

    match action {
        PortfolioCommand::List => {
            if store.is_empty() {
                println!("No investments yet. Add one with `portfolio add --fund <fund>`.");
                return Ok(());
            }
            println!(
                "{:<15} {:<20} {:>14} {:>12} {:>7} {:<11} {}",
                "ID", "Fund", "Initial", "Monthly", "Rate", "Start", "Tax"
            );
            for inv in store.investments() {
                println!(
                    "{:<15} {:<20} {:>14} {:>12} {:>6.1}% {:<11} {}",
                    inv.id,
                    inv.fund_name,
                    rupees(inv.initial_balance),
                    rupees(inv.monthly_contribution),
                    inv.annual_rate_pct,
                    inv.start_date,
                    if inv.is_tax_filer { "filer" } else { "non-filer" },
                );
            }
        }
        PortfolioCommand::Add { fund, rate, initial, monthly, start, non_filer } => {
            let fund = catalog
                .find(&fund)
                .ok_or_else(|| FundError::UnknownFund(fund.clone()))?;
            let added = store.add(NewInvestment {
                fund_name: fund.name.clone(),
                fund_type: fund.fund_type.clone(),
                initial_balance: parse_amount(&initial),
                monthly_contribution: parse_amount(&monthly),
                annual_rate_pct: rate.as_deref().map(parse_amount).unwrap_or(fund.base_rate),
                start_date: start.unwrap_or(today),
                is_tax_filer: !non_filer,
            })?;
            println!("Added {} ({})", added.id, added.fund_name);
        }
        PortfolioCommand::Edit { id, fund, rate, initial, monthly, start, filer } => {
            let mut patch = InvestmentPatch {
                initial_balance: initial.as_deref().map(parse_amount),
                monthly_contribution: monthly.as_deref().map(parse_amount),
                annual_rate_pct: rate.as_deref().map(parse_amount),
                start_date: start,
                is_tax_filer: filer,
                ..Default::default()
            };
            if let Some(key) = fund {
                let fund = catalog
                    .find(&key)
                    .ok_or_else(|| FundError::UnknownFund(key.clone()))?;
                patch.fund_name = Some(fund.name.clone());
                patch.fund_type = Some(fund.fund_type.clone());
                if patch.annual_rate_pct.is_none() {
                    patch.annual_rate_pct = Some(fund.base_rate);
                }
            }
            if patch.is_empty() {
                bail!("nothing to change for {id}");
            }
            let updated = store.update(&id, patch)?;
            println!("Updated {} ({})", updated.id, updated.fund_name);
        }
        PortfolioCommand::Delete { id, yes } => {
            let Some(inv) = store.get(&id) else {
                return Err(StorageError::NotFound(id).into());
            };
            let prompt = format!("Delete {} ({})?", inv.id, inv.fund_name);
            if !yes && !confirm(&prompt)? {
                println!("Cancelled.");
                return Ok(());
            }
            let removed = store.delete(&id)?;
            println!("Deleted {} ({})", removed.id, removed.fund_name);
        }
        PortfolioCommand::Dashboard { as_of, json } => {
            let aggregator = Aggregator::new(config.tax_rates);
            let dashboard = aggregator.dashboard(
                store.investments(),
                as_of.unwrap_or(today),
                config.trend_horizon_months,
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                print_dashboard(&dashboard);
            }
        }
        PortfolioCommand::Trend { months, csv } => {
            let aggregator = Aggregator::new(config.tax_rates);
            let trend = aggregator.trend(
                store.investments(),
                months.unwrap_or(config.trend_horizon_months),
            );
            for point in &trend {
                println!("  Month {:>3}: {}", point.month, rupees(point.total_value));
            }
            if let Some(path) = csv {
                write_csv(&path, &trend)?;
                println!("\nTrend written to: {}", path.display());
            }
        }
    }
    Ok(())
}

fn print_dashboard(dashboard: &Dashboard) {
    if dashboard.holdings.is_empty() {
        println!("No investments yet. Add one with `portfolio add --fund <fund>`.");
        return;
    }

    let m = &dashboard.metrics;
    println!("Investment Dashboard (as of {})", dashboard.as_of);
    println!("{}", "=".repeat(50));
    println!("  Total Invested:     {}", rupees(m.total_invested));
    println!("  Current Value:      {}", rupees(m.total_current_value));
    println!("  Total Profit:       {}", rupees(m.total_profit));
    println!("  Monthly Income:     {}", rupees(m.total_monthly_income));
    println!("  Active Investments: {}", m.active_investments);
    println!("  Return Rate:        {:.2}%", m.return_rate_pct);

    println!("\nFund Distribution:");
    for category in &dashboard.categories {
        println!("  {:<20} {}", category.fund_type, rupees(category.invested));
    }

    println!("\nHoldings:");
    for h in &dashboard.holdings {
        println!(
            "  {:<15} {:<20} {:>3} mo  net {:>5.2}%  invested {}  value {}  profit {}",
            h.id,
            h.fund_name,
            h.elapsed_months,
            h.net_annual_rate,
            rupees(h.invested),
            rupees(h.current_value),
            rupees(h.profit),
        );
    }

    println!("\nProjected Growth:");
    for point in &dashboard.trend {
        println!("  Month {:>3}: {}", point.month, rupees(point.total_value));
    }
}

/// Ask a yes/no question on stdin, defaulting to no
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Whole rupees with thousands separators, e.g. "Rs 1,234,567"
fn rupees(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-Rs {grouped}")
    } else {
        format!("Rs {grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rupees_grouping() {
        assert_eq!(rupees(0.0), "Rs 0");
        assert_eq!(rupees(999.4), "Rs 999");
        assert_eq!(rupees(1_234_567.8), "Rs 1,234,568");
        assert_eq!(rupees(-45_000.0), "-Rs 45,000");
    }

    #[test]
    fn test_cli_parses_calc() {
        let cli = Cli::try_parse_from([
            "fund-calc", "calc", "step-up", "--fund", "equity", "--amounts", "1000,2000", "--non-filer",
        ])
        .unwrap();
        match cli.command {
            Command::Calc(args) => {
                assert_eq!(args.mode, Some(CliMode::StepUp));
                assert_eq!(args.amounts.as_deref(), Some("1000,2000"));
                assert!(args.non_filer);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_conflicting_tax_flags() {
        assert!(Cli::try_parse_from(["fund-calc", "calc", "--filer", "--non-filer"]).is_err());
    }

    #[test]
    fn test_cli_bounds_trend_months() {
        assert!(Cli::try_parse_from(["fund-calc", "portfolio", "trend", "--months", "600"]).is_ok());
        assert!(Cli::try_parse_from(["fund-calc", "portfolio", "trend", "--months", "4000000000"]).is_err());
    }
}
