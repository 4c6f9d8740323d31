// Weighted average cost of capital over the current equity/debt split.
use crate::config::settings::EngineSettings;
use crate::error::EngineError;
use shared::models::{CapitalStructure, InvestmentRecord, LoanRecord};

/// Equity is the summed current value of the holdings, debt the summed
/// loan amounts. Cost of debt is the amount-weighted mean interest rate;
/// with no loans it is 0 and the computation must still succeed. The debt
/// term carries the after-tax shield from settings. Zero total capital
/// makes every weight undefined and is reported as an error, never as NaN.
pub fn wacc(
    investments: &[InvestmentRecord],
    loans: &[LoanRecord],
    settings: &EngineSettings,
) -> Result<CapitalStructure, EngineError> {
    let total_equity: f64 = investments.iter().map(|r| r.current_value).sum();
    let total_debt: f64 = loans.iter().map(|l| l.amount).sum();
    let total_capital = total_equity + total_debt;
    if total_capital <= 0.0 {
        return Err(EngineError::ZeroCapital);
    }

    let cost_of_debt = if total_debt > 0.0 {
        loans
            .iter()
            .map(|l| l.amount * l.interest_rate)
            .sum::<f64>()
            / total_debt
            / 100.0
    } else {
        0.0
    };

    let equity_weight = total_equity / total_capital;
    let debt_weight = total_debt / total_capital;
    let wacc = equity_weight * settings.cost_of_equity
        + debt_weight * cost_of_debt * settings.debt_tax_shield;

    Ok(CapitalStructure {
        wacc,
        equity_weight,
        debt_weight,
        cost_of_equity: settings.cost_of_equity,
        cost_of_debt,
        total_equity,
        total_debt,
        debt_equity_ratio: if total_equity > 0.0 {
            Some(total_debt / total_equity)
        } else {
            None
        },
    })
}
