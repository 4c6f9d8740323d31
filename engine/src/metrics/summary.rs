// Portfolio-level totals for the overview section.
use super::company::return_percentage;
use shared::models::{InvestmentRecord, PortfolioSummary};

pub fn portfolio(records: &[InvestmentRecord]) -> PortfolioSummary {
    let total_invested: f64 = records.iter().map(|r| r.invested).sum();
    let current_value: f64 = records.iter().map(|r| r.current_value).sum();
    PortfolioSummary {
        total_invested,
        current_value,
        change_pct: return_percentage(total_invested, current_value),
    }
}
