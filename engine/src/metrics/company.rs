// Per-company metrics: ownership, return and aggregated performance.
use crate::error::EngineError;
use shared::models::{CompanyPerformance, InvestmentRecord, ShareRecord};

/// Percentage of a company owned, based on the share-totals table.
/// A company without a usable row there is an error for the caller to
/// surface, never a silent zero.
pub fn ownership_percentage(
    company: &str,
    my_shares: f64,
    share_totals: &[ShareRecord],
) -> Result<f64, EngineError> {
    let record = share_totals
        .iter()
        .find(|s| s.company == company)
        .ok_or_else(|| EngineError::UnknownCompany(company.to_string()))?;
    match record.total_shares {
        Some(total) if total > 0.0 => Ok(my_shares / total * 100.0),
        _ => Err(EngineError::MissingTotalShares(company.to_string())),
    }
}

/// Percentage gain or loss on invested capital. `None` when nothing was
/// invested; the division has to be guarded at every level, not just for
/// the portfolio total.
pub fn return_percentage(invested: f64, current_value: f64) -> Option<f64> {
    if invested > 0.0 {
        Some((current_value - invested) / invested * 100.0)
    } else {
        None
    }
}

/// Aggregates the investment records per company and attaches the guarded
/// return and ownership figures. Companies appear in first-encounter
/// order. Ownership failures degrade to `None` with a warning log; the
/// other aggregates are still worth rendering.
pub fn performance(
    records: &[InvestmentRecord],
    share_totals: &[ShareRecord],
) -> Vec<CompanyPerformance> {
    let mut companies: Vec<CompanyPerformance> = Vec::new();
    for record in records {
        let idx = match companies.iter().position(|c| c.company == record.company) {
            Some(idx) => idx,
            None => {
                companies.push(CompanyPerformance {
                    company: record.company.clone(),
                    invested: 0.0,
                    current_value: 0.0,
                    my_shares: 0.0,
                    return_pct: None,
                    ownership_pct: None,
                });
                companies.len() - 1
            }
        };
        let entry = &mut companies[idx];
        entry.invested += record.invested;
        entry.current_value += record.current_value;
        entry.my_shares += record.my_shares.unwrap_or(0.0);
    }

    for entry in &mut companies {
        entry.return_pct = return_percentage(entry.invested, entry.current_value);
        entry.ownership_pct =
            match ownership_percentage(&entry.company, entry.my_shares, share_totals) {
                Ok(pct) => Some(pct),
                Err(err) => {
                    tracing::warn!(company = %entry.company, error = %err, "ownership percentage undefined");
                    None
                }
            };
    }
    companies
}
