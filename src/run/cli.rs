use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use crate::analysis::{Analysis, DataState};
use crate::categorize::suggest_keyword;
use crate::config::{EngineConfig, KeywordMap};
use crate::import::CsvImporter;
use crate::models::ForecastTarget;
use crate::ui::util::{format_amount, format_percent};

/// Flags shared by every command.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Options {
    pub(crate) window: Option<usize>,
    pub(crate) margin: Option<Decimal>,
    pub(crate) min_history: Option<usize>,
    pub(crate) categories: Option<PathBuf>,
}

pub(crate) fn as_cli(args: &[String], default_categories: &Path) -> Result<()> {
    let (positional, options) = parse_options(&args[1..])?;
    let categories_path = options
        .categories
        .clone()
        .unwrap_or_else(|| default_categories.to_path_buf());

    let Some(command) = positional.first() else {
        print_usage();
        return Ok(());
    };
    let rest = &positional[1..];

    match command.as_str() {
        "summary" | "s" => {
            let (source, analysis) = analyze(rest, &options, &categories_path)?;
            print!("{}", summary_report(&source, &analysis));
            Ok(())
        }
        "budget" | "b" => {
            let (source, analysis) = analyze(rest, &options, &categories_path)?;
            print!("{}", budget_report(&source, &analysis));
            Ok(())
        }
        "forecast" | "f" => {
            let (source, analysis) = analyze(rest, &options, &categories_path)?;
            print!("{}", forecast_report(&source, &analysis));
            Ok(())
        }
        "categories" => {
            let config = build_config(&options, KeywordMap::load(&categories_path)?)?;
            print!("{}", categories_report(config.keywords()));
            Ok(())
        }
        "add-category" => cli_add_category(rest, &categories_path),
        "add-keyword" => cli_add_keyword(rest, &categories_path),
        "learn" => cli_learn(rest, &categories_path),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendcast {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other if Path::new(other).is_file() => {
            let (source, analysis) = analyze(&positional, &options, &categories_path)?;
            super::as_tui(&source, analysis)
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command or file not found: {other}");
        }
    }
}

fn print_usage() {
    println!("Spendcast: categorize a bank statement, suggest budgets, forecast next month");
    println!();
    println!("Usage: spendcast <command> [options]");
    println!();
    println!("Commands:");
    println!("  <file.csv>                    Open the dashboard for a statement");
    println!("  summary <file.csv>            Expense totals by category and total payments");
    println!("  budget <file.csv>             Budget recommendations per category");
    println!("  forecast <file.csv>           Next month's spending forecast");
    println!("  categories                    List categories and their keywords");
    println!("  add-category <name>           Create an empty category");
    println!("  add-keyword <category> <kw>   Map a keyword (prefix 're:' for a regex)");
    println!("  learn <category> <details>    Derive a keyword from a description and save it");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --window <months>             Trailing months for budgets (default 3)");
    println!("  --margin <factor>             Budget multiplier on the average (default 1.0)");
    println!("  --min-history <months>        Months needed for a trend forecast (default 2)");
    println!("  --categories <path>           Keyword file to use instead of the default");
    println!();
    println!("Set SPENDCAST_LOG=debug for diagnostics on stderr.");
}

pub(crate) fn parse_options(args: &[String]) -> Result<(Vec<String>, Options)> {
    let mut options = Options::default();
    let mut positional = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("{flag} needs a value"))
        };
        match arg.as_str() {
            "--window" => {
                let raw = value("--window")?;
                options.window = Some(
                    raw.parse()
                        .with_context(|| format!("--window expects a month count, got '{raw}'"))?,
                );
            }
            "--margin" => {
                let raw = value("--margin")?;
                options.margin = Some(
                    Decimal::from_str(&raw)
                        .with_context(|| format!("--margin expects a number, got '{raw}'"))?,
                );
            }
            "--min-history" => {
                let raw = value("--min-history")?;
                options.min_history = Some(raw.parse().with_context(|| {
                    format!("--min-history expects a month count, got '{raw}'")
                })?);
            }
            "--categories" => {
                options.categories = Some(PathBuf::from(shellexpand(&value("--categories")?)));
            }
            flag if flag.starts_with("--") && !matches!(flag, "--help" | "--version") => {
                anyhow::bail!("Unknown option: {flag}");
            }
            _ => positional.push(arg.clone()),
        }
    }
    Ok((positional, options))
}

pub(crate) fn build_config(options: &Options, keywords: KeywordMap) -> Result<EngineConfig> {
    let mut builder = EngineConfig::builder().keywords(keywords);
    if let Some(window) = options.window {
        builder = builder.budget_window_months(window);
    }
    if let Some(margin) = options.margin {
        builder = builder.budget_margin(margin);
    }
    if let Some(months) = options.min_history {
        builder = builder.forecast_min_history_months(months);
    }
    Ok(builder.build()?)
}

fn analyze(args: &[String], options: &Options, categories: &Path) -> Result<(String, Analysis)> {
    let Some(file) = args.first() else {
        anyhow::bail!("Missing statement file. Usage: spendcast <command> <file.csv>");
    };
    let path = PathBuf::from(shellexpand(file));
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let config = build_config(options, KeywordMap::load(categories)?)?;
    let (profile, transactions) = CsvImporter::load(&path)?;
    info!(profile = %profile.name, transactions = transactions.len(), "imported statement");

    let analysis = Analysis::run(transactions, &config)
        .with_context(|| format!("Failed to analyze {}", path.display()))?;
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.clone());
    Ok((source, analysis))
}

fn state_note(analysis: &Analysis) -> Option<&'static str> {
    match analysis.state() {
        DataState::NoData => Some("No transactions found."),
        DataState::InsufficientHistory => {
            Some("Note: some series have too little history for a trend; last month is repeated.")
        }
        DataState::Ready => None,
    }
}

// ── Reports ──────────────────────────────────────────────────

pub(crate) fn summary_report(source: &str, analysis: &Analysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Spendcast: {source}");
    let _ = writeln!(out, "{}", "─".repeat(48));
    if analysis.state() == DataState::NoData {
        let _ = writeln!(out, "No transactions found.");
        return out;
    }

    let debits = analysis.debits();
    let total_spent = analysis
        .expense_totals
        .iter()
        .fold(Decimal::ZERO, |acc, (_, amt)| acc.saturating_add(*amt));
    let _ = writeln!(
        out,
        "  Expenses:   {:>18}  ({} txns)",
        format_amount(total_spent),
        debits.len()
    );
    let _ = writeln!(
        out,
        "  Payments:   {:>18}  ({} txns)",
        format_amount(analysis.inflow_total),
        analysis.credits().len()
    );

    let table = &analysis.aggregates;
    if let (Some(first), Some(last)) = (table.first_month(), table.latest_month()) {
        let _ = writeln!(
            out,
            "  Period:     {first} to {last}, {} months ({} with activity)",
            first.months_until(last) + 1,
            table.months().len()
        );
    }

    if !analysis.expense_totals.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Expenses by Category:");
        for (category, amount) in &analysis.expense_totals {
            let _ = writeln!(out, "  {:<24} {:>18}", category.as_str(), format_amount(*amount));
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Monthly Totals:");
    for (category, month, total) in table.iter() {
        let _ = writeln!(
            out,
            "  {:<24} {}  {:>18}  ({} txns)",
            category.as_str(),
            month,
            format_amount(total.sum),
            total.count
        );
    }
    out
}

pub(crate) fn budget_report(source: &str, analysis: &Analysis) -> String {
    let mut out = String::new();
    let as_of = analysis
        .aggregates
        .latest_month()
        .map(|m| format!(" as of {m}"))
        .unwrap_or_default();
    let _ = writeln!(out, "Budget Recommendations for {source}{as_of}");
    let _ = writeln!(out, "{}", "─".repeat(110));
    if analysis.budgets.is_empty() {
        let _ = writeln!(out, "Not enough data to generate recommendations.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<20} {:>16} {:>16} {:>16} {:>10}  {:<14} Advice",
        "Category", "Last Month", "Average", "Suggested", "Deviation", "Status"
    );
    for rec in analysis.budgets.values() {
        let _ = writeln!(
            out,
            "{:<20} {:>16} {:>16} {:>16} {:>10}  {:<14} {}",
            rec.category.as_str(),
            format_amount(rec.latest_outflow),
            format_amount(rec.trailing_average),
            format_amount(rec.ceiling),
            format_percent(rec.deviation_pct),
            rec.status.as_str(),
            rec.status.advice(&rec.category),
        );
    }
    out
}

pub(crate) fn forecast_report(source: &str, analysis: &Analysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Predicted Spending for Next Month ({source})");
    let _ = writeln!(out, "{}", "─".repeat(72));
    if analysis.forecasts.is_empty() {
        let _ = writeln!(out, "Not enough data to forecast.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<20} {:<8} {:>18} {:<6} History",
        "Category", "Month", "Predicted", "Method"
    );
    for forecast in &analysis.forecasts {
        let history = forecast
            .fitted_range()
            .map(|(start, end)| format!("{start}..{end}"))
            .unwrap_or_default();
        let label = match &forecast.target {
            ForecastTarget::Total => "TOTAL".to_string(),
            target => target.to_string(),
        };
        let _ = writeln!(
            out,
            "{:<20} {:<8} {:>18} {:<6} {}",
            label,
            forecast.month.to_string(),
            format_amount(forecast.value),
            forecast.provenance.as_str(),
            history,
        );
    }
    if let Some(note) = state_note(analysis) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{note}");
    }
    out
}

pub(crate) fn categories_report(map: &KeywordMap) -> String {
    let mut out = String::new();
    for entry in map.entries() {
        let keywords = if entry.keywords.is_empty() {
            "(no keywords)".to_string()
        } else {
            entry.keywords.join(", ")
        };
        let _ = writeln!(out, "{:<20} {}", entry.name, keywords);
    }
    out
}

// ── Keyword learning ─────────────────────────────────────────

fn cli_add_category(args: &[String], path: &Path) -> Result<()> {
    let name = args.join(" ");
    if name.trim().is_empty() {
        anyhow::bail!("Usage: spendcast add-category <name>");
    }
    let mut map = KeywordMap::load(path)?;
    if map.add_category(name.trim()) {
        map.save(path)?;
        println!("Added category: {}", name.trim());
    } else {
        println!("Category already exists: {}", name.trim());
    }
    Ok(())
}

fn cli_add_keyword(args: &[String], path: &Path) -> Result<()> {
    let [category, keyword @ ..] = args else {
        anyhow::bail!("Usage: spendcast add-keyword <category> <keyword>");
    };
    let keyword = keyword.join(" ");
    if keyword.trim().is_empty() {
        anyhow::bail!("Usage: spendcast add-keyword <category> <keyword>");
    }
    save_keyword(path, category, keyword.trim())
}

fn cli_learn(args: &[String], path: &Path) -> Result<()> {
    let [category, description @ ..] = args else {
        anyhow::bail!("Usage: spendcast learn <category> <description>");
    };
    let keyword = suggest_keyword(&description.join(" "));
    if keyword.is_empty() {
        anyhow::bail!("Could not derive a keyword from that description");
    }
    println!("Suggested keyword: {keyword}");
    save_keyword(path, category, &keyword)
}

fn save_keyword(path: &Path, category: &str, keyword: &str) -> Result<()> {
    let mut map = KeywordMap::load(path)?;
    if !map.add_keyword(category, keyword) {
        println!("'{keyword}' is already mapped to {category}");
        return Ok(());
    }
    // Rejects bad regex keywords before they reach the file.
    EngineConfig::builder().keywords(map.clone()).build()?;
    map.save(path)?;
    println!("Mapped '{keyword}' to {category}");
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
