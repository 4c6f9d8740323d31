use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the investment block of the snapshot (columns 0..10).
/// Monetary fields are non-negative after loading; cells that failed their
/// typed conversion carry the lossy default and a matching [`CellWarning`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentRecord {
    pub date: NaiveDate,
    pub company: String,
    pub source: String,
    /// "No." column. Unparsable cells stay `None` rather than 0.
    pub count: Option<f64>,
    pub my_shares: Option<f64>,
    pub price_paid: f64,
    pub invested: f64,
    pub current_market_price: f64,
    pub current_value: f64,
}

/// One row of the share-totals block (columns 11..14). `total_shares` is
/// the ownership denominator for the matching company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRecord {
    pub company: String,
    pub org_no: String,
    pub total_shares: Option<f64>,
}

/// One row of the loans block (columns 15..18).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRecord {
    pub label: String,
    /// Percent, expected in [0, 100].
    pub interest_rate: f64,
    pub amount: f64,
}

/// A cell that failed its typed conversion during a load. The table keeps
/// the lossy default; the warning makes the loss visible to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellWarning {
    /// 1-based data row index (header row excluded).
    pub row: usize,
    pub column: String,
    pub raw: String,
}

/// Product of one load cycle over a single spreadsheet snapshot.
/// Immutable for the duration of a dashboard session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotTables {
    pub investments: Vec<InvestmentRecord>,
    pub share_totals: Vec<ShareRecord>,
    pub loans: Vec<LoanRecord>,
    pub warnings: Vec<CellWarning>,
}

/// Share of total portfolio value attributable to one group label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcentrationEntry {
    pub label: String,
    pub value: f64,
    pub percentage: f64,
}

/// Weighted average cost of capital and the weights behind it.
/// Costs and weights are fractions, not percents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapitalStructure {
    pub wacc: f64,
    pub equity_weight: f64,
    pub debt_weight: f64,
    pub cost_of_equity: f64,
    pub cost_of_debt: f64,
    pub total_equity: f64,
    pub total_debt: f64,
    /// `None` when there is no equity to divide by.
    pub debt_equity_ratio: Option<f64>,
}

/// Per-company aggregates. `return_pct` is `None` when nothing was
/// invested; `ownership_pct` is `None` when the company has no usable row
/// in the share-totals table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyPerformance {
    pub company: String,
    pub invested: f64,
    pub current_value: f64,
    pub my_shares: f64,
    pub return_pct: Option<f64>,
    pub ownership_pct: Option<f64>,
}

/// One loan in debt-avalanche order. Priority 1 is repaid first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentStep {
    pub priority: usize,
    pub label: String,
    pub interest_rate: f64,
    pub amount: f64,
    pub monthly_interest: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepaymentPlan {
    pub steps: Vec<RepaymentStep>,
    pub total_amount: f64,
    pub total_monthly_interest: f64,
}

/// Running totals at one date of the investment timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub cumulative_invested: f64,
    pub cumulative_value: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrowthTimeline {
    pub points: Vec<TimelinePoint>,
}

/// (source, company) aggregate behind the allocation views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationNode {
    pub source: String,
    pub company: String,
    pub invested: f64,
    pub current_value: f64,
}

/// Portfolio-level totals. `change_pct` is `None` when nothing was
/// invested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_invested: f64,
    pub current_value: f64,
    pub change_pct: Option<f64>,
}

/// Everything a render cycle consumes, derived from one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    pub summary: PortfolioSummary,
    pub company_concentration: Vec<ConcentrationEntry>,
    pub source_concentration: Vec<ConcentrationEntry>,
    /// `None` when total capital is zero and WACC is undefined.
    pub capital: Option<CapitalStructure>,
    pub companies: Vec<CompanyPerformance>,
    pub repayment_plan: RepaymentPlan,
    pub growth_timeline: GrowthTimeline,
    pub allocation: Vec<AllocationNode>,
    pub warnings: Vec<CellWarning>,
}
