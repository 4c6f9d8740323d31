// Debt-avalanche repayment ordering and interest cost.
use shared::models::{LoanRecord, RepaymentPlan, RepaymentStep};
use std::cmp::Ordering;

/// Interest cost of carrying a loan for one month.
pub fn monthly_interest(loan: &LoanRecord) -> f64 {
    loan.amount * (loan.interest_rate / 100.0) / 12.0
}

/// Orders loans by interest rate descending (avalanche method: the most
/// expensive debt is repaid first) and assigns priorities 1..N. The sort
/// is stable, so equal rates keep their table order.
pub fn repayment_plan(loans: &[LoanRecord]) -> RepaymentPlan {
    let mut ordered: Vec<LoanRecord> = loans.to_vec();
    ordered.sort_by(|a, b| {
        b.interest_rate
            .partial_cmp(&a.interest_rate)
            .unwrap_or(Ordering::Equal)
    });

    let steps: Vec<RepaymentStep> = ordered
        .into_iter()
        .enumerate()
        .map(|(i, loan)| RepaymentStep {
            priority: i + 1,
            monthly_interest: monthly_interest(&loan),
            label: loan.label,
            interest_rate: loan.interest_rate,
            amount: loan.amount,
        })
        .collect();

    let total_amount = steps.iter().map(|s| s.amount).sum();
    let total_monthly_interest = steps.iter().map(|s| s.monthly_interest).sum();
    RepaymentPlan {
        steps,
        total_amount,
        total_monthly_interest,
    }
}
