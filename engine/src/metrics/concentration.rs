// Portfolio concentration: share of total current value per group.
use shared::models::{ConcentrationEntry, InvestmentRecord};

/// Groups records by `key`, sums current value per group and expresses
/// each sum as a percentage of the total, sorted descending. The sort is
/// stable, so equal values keep their first-encounter order. A total of
/// zero yields an empty vector (there is no distribution to express).
pub fn by_group<F>(records: &[InvestmentRecord], key: F) -> Vec<ConcentrationEntry>
where
    F: Fn(&InvestmentRecord) -> &str,
{
    let mut groups: Vec<(String, f64)> = Vec::new();
    for record in records {
        let label = key(record);
        match groups.iter_mut().find(|(existing, _)| existing.as_str() == label) {
            Some((_, value)) => *value += record.current_value,
            None => groups.push((label.to_string(), record.current_value)),
        }
    }

    let total: f64 = groups.iter().map(|(_, value)| value).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut entries: Vec<ConcentrationEntry> = groups
        .into_iter()
        .map(|(label, value)| ConcentrationEntry {
            label,
            value,
            percentage: value / total * 100.0,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

fn company_key(record: &InvestmentRecord) -> &str {
    &record.company
}

fn source_key(record: &InvestmentRecord) -> &str {
    &record.source
}

pub fn by_company(records: &[InvestmentRecord]) -> Vec<ConcentrationEntry> {
    by_group(records, company_key)
}

pub fn by_source(records: &[InvestmentRecord]) -> Vec<ConcentrationEntry> {
    by_group(records, source_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(company: &str, source: &str, current_value: f64) -> InvestmentRecord {
        InvestmentRecord {
            date: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
            company: company.to_string(),
            source: source.to_string(),
            count: Some(1.0),
            my_shares: Some(10.0),
            price_paid: 0.0,
            invested: 0.0,
            current_market_price: 0.0,
            current_value,
        }
    }

    #[test]
    fn test_percentages_sum_to_one_hundred() {
        let records = vec![
            record("A", "X", 300.0),
            record("B", "X", 500.0),
            record("C", "Y", 200.0),
        ];
        let entries = by_company(&records);
        let sum: f64 = entries.iter().map(|e| e.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_sorted_descending_by_value() {
        let records = vec![
            record("A", "X", 100.0),
            record("B", "X", 900.0),
            record("C", "Y", 400.0),
        ];
        let entries = by_company(&records);
        assert_eq!(entries[0].label, "B");
        assert_eq!(entries[1].label, "C");
        assert_eq!(entries[2].label, "A");
        assert!((entries[0].percentage - 900.0 / 1400.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let records = vec![
            record("First", "X", 250.0),
            record("Second", "X", 250.0),
            record("Third", "X", 250.0),
        ];
        let entries = by_company(&records);
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_groups_accumulate_multiple_records() {
        let records = vec![
            record("A", "X", 100.0),
            record("A", "Y", 200.0),
            record("B", "X", 100.0),
        ];
        let entries = by_company(&records);
        assert_eq!(entries[0].label, "A");
        assert_eq!(entries[0].value, 300.0);

        let by_src = by_source(&records);
        assert_eq!(by_src[0].label, "X");
        assert_eq!(by_src[0].value, 200.0);
    }

    #[test]
    fn test_zero_total_yields_empty() {
        let records = vec![record("A", "X", 0.0), record("B", "X", 0.0)];
        assert!(by_company(&records).is_empty());
        assert!(by_company(&[]).is_empty());
    }
}
