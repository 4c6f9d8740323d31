// Text dashboard over a portfolio snapshot CSV.
use anyhow::Result;
use clap::Parser;
use engine::config::settings::EngineSettings;
use engine::error::EngineError;
use engine::services::dashboard::{DashboardService, SnapshotSource};
use shared::models::DashboardReport;
use shared::utils::{format_kronor, format_percent, format_signed_percent};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dashboard", about = "Portfolio dashboard over a spreadsheet snapshot")]
struct Args {
    /// Path to the snapshot CSV exported from the spreadsheet
    snapshot: PathBuf,

    /// Only show company rows matching this name
    #[arg(long)]
    company: Option<String>,

    /// Engine settings file (JSON); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => EngineSettings::from_file(path)?,
        None => EngineSettings::default(),
    };

    let mut service = DashboardService::new(settings);
    let source = SnapshotSource::from_path(&args.snapshot);
    match service.report(&source) {
        Ok(report) => {
            print_report(&report, args.company.as_deref());
            Ok(())
        }
        Err(EngineError::NoData) => {
            eprintln!(
                "No portfolio rows found in {} -- is the export empty?",
                args.snapshot.display()
            );
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn print_report(report: &DashboardReport, company_filter: Option<&str>) {
    println!("== Overview ==");
    println!("  Invested:      {}", format_kronor(report.summary.total_invested));
    println!("  Current value: {}", format_kronor(report.summary.current_value));
    match report.summary.change_pct {
        Some(pct) => println!("  Change:        {}", format_signed_percent(pct, 2)),
        None => println!("  Change:        n/a"),
    }

    if let Some(capital) = &report.capital {
        println!();
        println!("== Capital Structure ==");
        println!("  WACC:          {}", format_percent(capital.wacc * 100.0, 2));
        println!(
            "  Equity:        {} ({})",
            format_kronor(capital.total_equity),
            format_percent(capital.equity_weight * 100.0, 1)
        );
        println!(
            "  Debt:          {} ({})",
            format_kronor(capital.total_debt),
            format_percent(capital.debt_weight * 100.0, 1)
        );
        match capital.debt_equity_ratio {
            Some(ratio) => println!("  Debt/Equity:   {:.2}", ratio),
            None => println!("  Debt/Equity:   n/a"),
        }
    }

    println!();
    println!("== Concentration by Company ==");
    for entry in &report.company_concentration {
        println!(
            "  {:<24} {:>14}  {}",
            entry.label,
            format_kronor(entry.value),
            format_percent(entry.percentage, 1)
        );
    }

    println!();
    println!("== Concentration by Source ==");
    for entry in &report.source_concentration {
        println!(
            "  {:<24} {:>14}  {}",
            entry.label,
            format_kronor(entry.value),
            format_percent(entry.percentage, 1)
        );
    }

    println!();
    println!("== Companies ==");
    for company in report.companies.iter().filter(|c| {
        company_filter.map_or(true, |f| c.company.eq_ignore_ascii_case(f))
    }) {
        let return_pct = match company.return_pct {
            Some(pct) => format_signed_percent(pct, 2),
            None => "n/a".to_string(),
        };
        let ownership = match company.ownership_pct {
            Some(pct) => format_percent(pct, 2),
            None => "n/a".to_string(),
        };
        println!(
            "  {:<24} invested {:>14}  value {:>14}  return {:>9}  ownership {:>8}",
            company.company,
            format_kronor(company.invested),
            format_kronor(company.current_value),
            return_pct,
            ownership
        );
    }

    if !report.repayment_plan.steps.is_empty() {
        println!();
        println!("== Repayment Plan (avalanche) ==");
        for step in &report.repayment_plan.steps {
            println!(
                "  {}. {:<20} {:>7}  {:>14}  {}/month",
                step.priority,
                step.label,
                format_percent(step.interest_rate, 2),
                format_kronor(step.amount),
                format_kronor(step.monthly_interest)
            );
        }
        println!(
            "  Total debt {} costing {}/month",
            format_kronor(report.repayment_plan.total_amount),
            format_kronor(report.repayment_plan.total_monthly_interest)
        );
    }

    if let (Some(first), Some(last)) = (
        report.growth_timeline.points.first(),
        report.growth_timeline.points.last(),
    ) {
        println!();
        println!("== Growth ==");
        println!(
            "  {} .. {}: invested {} -> value {}",
            first.date,
            last.date,
            format_kronor(last.cumulative_invested),
            format_kronor(last.cumulative_value)
        );
    }

    if !report.warnings.is_empty() {
        println!();
        println!("== Warnings ==");
        for warning in &report.warnings {
            println!(
                "  row {}, {}: could not read {:?}",
                warning.row, warning.column, warning.raw
            );
        }
    }
}
