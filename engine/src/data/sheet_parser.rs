use crate::error::EngineError;
use csv::ReaderBuilder;
use shared::models::{CellWarning, InvestmentRecord, LoanRecord, ShareRecord, SnapshotTables};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// Module for Swedish-style number and date format handling.
pub mod swedish_format {
    use chrono::NaiveDate;

    /// Expected date format of the snapshot, e.g. "05-Jan-2023".
    pub const DATE_FORMAT: &str = "%d-%b-%Y";

    // Strips thousands separators and normalizes the decimal separator.
    // Spreadsheet exports group thousands with regular or no-break spaces
    // and sometimes with commas; a decimal comma ("1234,56") is only
    // recognized as such when no dot is present and at most two digits
    // follow it. Everything else treats commas as grouping noise.
    fn normalize_number(raw: &str) -> String {
        let mut s: String = raw
            .trim()
            .chars()
            .filter(|c| *c != ' ' && *c != '\u{a0}')
            .collect();
        if s.contains('.') {
            s.retain(|c| c != ',');
        } else if let Some(pos) = s.find(',') {
            let fraction = &s[pos + 1..];
            let is_decimal_comma = s.matches(',').count() == 1
                && !fraction.is_empty()
                && fraction.len() <= 2
                && fraction.bytes().all(|b| b.is_ascii_digit());
            if is_decimal_comma {
                s.replace_range(pos..=pos, ".");
            } else {
                s.retain(|c| c != ',');
            }
        }
        s
    }

    /// Parses a monetary cell like "1 234,56 kr". Returns `None` for cells
    /// that do not clean up to a number.
    pub fn try_parse_currency(raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        let without_suffix = trimmed
            .strip_suffix("kr")
            .or_else(|| trimmed.strip_suffix("Kr"))
            .or_else(|| trimmed.strip_suffix("KR"))
            .unwrap_or(trimmed);
        normalize_number(&without_suffix.replace('%', ""))
            .parse::<f64>()
            .ok()
    }

    /// Lossy form of [`try_parse_currency`]: malformed and absent cells
    /// collapse to 0.0 and never abort a load.
    pub fn parse_currency(raw: &str) -> f64 {
        try_parse_currency(raw).unwrap_or(0.0)
    }

    /// Parses an interest-rate cell like "4,5%". Returns `None` for cells
    /// that do not clean up to a number.
    pub fn try_parse_percent(raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        let without_sign = trimmed.strip_suffix('%').unwrap_or(trimmed);
        normalize_number(without_sign).parse::<f64>().ok()
    }

    /// Lossy form of [`try_parse_percent`].
    pub fn parse_percent(raw: &str) -> f64 {
        try_parse_percent(raw).unwrap_or(0.0)
    }

    /// Best-effort numeric coercion for count columns ("No.", "My Shares",
    /// "Total Shares"). Missing stays missing: `None`, not 0.
    pub fn parse_count(raw: &str) -> Option<f64> {
        normalize_number(raw).parse::<f64>().ok()
    }

    pub fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_currency_swedish_style() {
            assert_eq!(try_parse_currency("1 234,56 kr").unwrap(), 1234.56);
            assert_eq!(try_parse_currency("500 kr").unwrap(), 500.0);
            assert_eq!(try_parse_currency("12 345 kr").unwrap(), 12345.0);
        }

        #[test]
        fn test_parse_currency_comma_thousands() {
            // A comma followed by three digits is grouping, not a decimal
            assert_eq!(try_parse_currency("1,234 kr").unwrap(), 1234.0);
            assert_eq!(try_parse_currency("1,234.56 kr").unwrap(), 1234.56);
        }

        #[test]
        fn test_parse_currency_no_break_space() {
            assert_eq!(try_parse_currency("1\u{a0}234,56 kr").unwrap(), 1234.56);
        }

        #[test]
        fn test_parse_currency_plain_number() {
            assert_eq!(try_parse_currency("250.5").unwrap(), 250.5);
            assert_eq!(try_parse_currency("  42  ").unwrap(), 42.0);
        }

        #[test]
        fn test_parse_currency_malformed_is_zero() {
            assert!(try_parse_currency("n/a").is_none());
            assert!(try_parse_currency("").is_none());
            assert_eq!(parse_currency("n/a"), 0.0);
            assert_eq!(parse_currency(""), 0.0);
        }

        #[test]
        fn test_parse_percent() {
            assert_eq!(try_parse_percent("4%").unwrap(), 4.0);
            assert_eq!(try_parse_percent("4,5%").unwrap(), 4.5);
            assert_eq!(try_parse_percent("3.25").unwrap(), 3.25);
            assert_eq!(parse_percent("x"), 0.0);
        }

        #[test]
        fn test_parse_count() {
            assert_eq!(parse_count("1 000").unwrap(), 1000.0);
            assert_eq!(parse_count("42").unwrap(), 42.0);
            assert!(parse_count("unknown").is_none());
            assert!(parse_count("").is_none());
        }

        #[test]
        fn test_parse_date() {
            let date = parse_date("05-Jan-2023").unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
            assert!(parse_date("2023-01-05").is_err());
            assert!(parse_date("").is_err());
        }
    }
}

// Fixed column layout of the snapshot grid. The three logical tables share
// one sheet, separated by spacer columns at offsets 10 and 14.
const INVESTMENT_WIDTH: usize = 10;
const INVESTMENT_LABELS: [&str; 9] = [
    "Date",
    "Company",
    "Source",
    "No.",
    "My Shares",
    "Price Paid",
    "Invested",
    "Current Market Price",
    "Current Value",
];
const SHARES_OFFSET: usize = 11;
const SHARES_LABELS: [&str; 3] = ["Company", "Org.No.", "Total Shares"];
const LOANS_OFFSET: usize = 15;
const LOANS_LABELS: [&str; 3] = ["Loans", "Interest rate", "Amount"];

/// Splits the raw snapshot grid into the three normalized tables and
/// applies the typed column conversions.
pub struct SnapshotParser;

impl SnapshotParser {
    /// Reads a CSV export of the snapshot and parses it. Rows may be
    /// ragged; the reader is configured to tolerate varying lengths.
    pub fn load_csv(path: &Path, delimiter: u8) -> Result<SnapshotTables, EngineError> {
        let file = File::open(path)?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut grid: Vec<Vec<String>> = Vec::new();
        for record in rdr.records() {
            let record = record?;
            grid.push(record.iter().map(|cell| cell.to_string()).collect());
        }
        Self::parse_grid(&grid)
    }

    /// Parses a raw 2D grid (first row = header, rest = data).
    pub fn parse_grid(grid: &[Vec<String>]) -> Result<SnapshotTables, EngineError> {
        let (header, rows) = grid.split_first().ok_or(EngineError::NoData)?;
        if rows.is_empty() {
            return Err(EngineError::NoData);
        }
        Self::validate_header(header)?;

        let mut tables = SnapshotTables::default();
        for (idx, row) in rows.iter().enumerate() {
            let row_no = idx + 1;
            // Rows shorter than the investment block are incomplete, not
            // errors: skip them.
            if row.len() >= INVESTMENT_WIDTH {
                let record = Self::investment_row(row, row_no, &mut tables.warnings)?;
                tables.investments.push(record);
            }
            if row.len() > SHARES_OFFSET + 2 && !row[SHARES_OFFSET].trim().is_empty() {
                tables
                    .share_totals
                    .push(Self::share_row(row, row_no, &mut tables.warnings));
            }
            if row.len() > LOANS_OFFSET + 2 && !row[LOANS_OFFSET].trim().is_empty() {
                tables
                    .loans
                    .push(Self::loan_row(row, row_no, &mut tables.warnings));
            }
        }
        Ok(tables)
    }

    // The column-offset contract is implicit coupling with the sheet
    // layout; requiring the known labels at their offsets turns a silently
    // misaligned load into an immediate SchemaMismatch.
    fn validate_header(header: &[String]) -> Result<(), EngineError> {
        Self::check_labels(header, 0, &INVESTMENT_LABELS)?;
        if header.len() > SHARES_OFFSET {
            Self::check_labels(header, SHARES_OFFSET, &SHARES_LABELS)?;
        }
        if header.len() > LOANS_OFFSET {
            Self::check_labels(header, LOANS_OFFSET, &LOANS_LABELS)?;
        }
        Ok(())
    }

    fn check_labels(
        header: &[String],
        offset: usize,
        expected: &[&str],
    ) -> Result<(), EngineError> {
        for (i, want) in expected.iter().enumerate() {
            let found = header.get(offset + i).map(|s| s.trim()).unwrap_or("");
            if found != *want {
                return Err(EngineError::SchemaMismatch {
                    offset: offset + i,
                    expected: want.to_string(),
                    found: found.to_string(),
                });
            }
        }
        Ok(())
    }

    fn investment_row(
        row: &[String],
        row_no: usize,
        warnings: &mut Vec<CellWarning>,
    ) -> Result<InvestmentRecord, EngineError> {
        let date = swedish_format::parse_date(&row[0]).map_err(|source| {
            EngineError::InvalidDate {
                row: row_no,
                raw: row[0].clone(),
                source,
            }
        })?;
        Ok(InvestmentRecord {
            date,
            company: row[1].trim().to_string(),
            source: row[2].trim().to_string(),
            count: Self::count_cell(&row[3], "No.", row_no, warnings),
            my_shares: Self::count_cell(&row[4], "My Shares", row_no, warnings),
            price_paid: Self::money_cell(&row[5], "Price Paid", row_no, warnings),
            invested: Self::money_cell(&row[6], "Invested", row_no, warnings),
            current_market_price: Self::money_cell(
                &row[7],
                "Current Market Price",
                row_no,
                warnings,
            ),
            current_value: Self::money_cell(&row[8], "Current Value", row_no, warnings),
        })
    }

    fn share_row(row: &[String], row_no: usize, warnings: &mut Vec<CellWarning>) -> ShareRecord {
        ShareRecord {
            company: row[SHARES_OFFSET].trim().to_string(),
            org_no: row[SHARES_OFFSET + 1].trim().to_string(),
            total_shares: Self::count_cell(
                &row[SHARES_OFFSET + 2],
                "Total Shares",
                row_no,
                warnings,
            ),
        }
    }

    fn loan_row(row: &[String], row_no: usize, warnings: &mut Vec<CellWarning>) -> LoanRecord {
        LoanRecord {
            label: row[LOANS_OFFSET].trim().to_string(),
            interest_rate: Self::percent_cell(
                &row[LOANS_OFFSET + 1],
                "Interest rate",
                row_no,
                warnings,
            ),
            amount: Self::money_cell(&row[LOANS_OFFSET + 2], "Amount", row_no, warnings),
        }
    }

    // Monetary cells: absent is a legitimate 0.0; malformed or negative
    // cells also collapse to 0.0 but leave a warning behind.
    fn money_cell(
        raw: &str,
        column: &str,
        row: usize,
        warnings: &mut Vec<CellWarning>,
    ) -> f64 {
        if raw.trim().is_empty() {
            return 0.0;
        }
        match swedish_format::try_parse_currency(raw) {
            Some(value) if value >= 0.0 => value,
            _ => {
                tracing::warn!(row, column, raw, "unusable monetary cell, defaulting to 0.0");
                warnings.push(CellWarning {
                    row,
                    column: column.to_string(),
                    raw: raw.to_string(),
                });
                0.0
            }
        }
    }

    fn count_cell(
        raw: &str,
        column: &str,
        row: usize,
        warnings: &mut Vec<CellWarning>,
    ) -> Option<f64> {
        if raw.trim().is_empty() {
            return None;
        }
        let parsed = swedish_format::parse_count(raw);
        if parsed.is_none() {
            tracing::warn!(row, column, raw, "unparsable count cell, keeping it missing");
            warnings.push(CellWarning {
                row,
                column: column.to_string(),
                raw: raw.to_string(),
            });
        }
        parsed
    }

    fn percent_cell(
        raw: &str,
        column: &str,
        row: usize,
        warnings: &mut Vec<CellWarning>,
    ) -> f64 {
        if raw.trim().is_empty() {
            return 0.0;
        }
        match swedish_format::try_parse_percent(raw) {
            Some(value) => value,
            None => {
                tracing::warn!(row, column, raw, "unparsable rate cell, defaulting to 0.0");
                warnings.push(CellWarning {
                    row,
                    column: column.to_string(),
                    raw: raw.to_string(),
                });
                0.0
            }
        }
    }
}
