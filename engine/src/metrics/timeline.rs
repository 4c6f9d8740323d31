// Historical growth: cumulative invested capital and market value.
use shared::models::{GrowthTimeline, InvestmentRecord, TimelinePoint};

/// Running totals of invested amount and current value in date order.
/// The sort is stable, so same-day records keep their sheet order and the
/// two cumulative series stay aligned index for index.
pub fn growth(records: &[InvestmentRecord]) -> GrowthTimeline {
    let mut ordered: Vec<&InvestmentRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.date);

    let mut points = Vec::with_capacity(ordered.len());
    let mut cumulative_invested = 0.0;
    let mut cumulative_value = 0.0;
    for record in ordered {
        cumulative_invested += record.invested;
        cumulative_value += record.current_value;
        points.push(TimelinePoint {
            date: record.date,
            cumulative_invested,
            cumulative_value,
        });
    }
    GrowthTimeline { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: (i32, u32, u32), company: &str, invested: f64, value: f64) -> InvestmentRecord {
        InvestmentRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            company: company.to_string(),
            source: "Avanza".to_string(),
            count: None,
            my_shares: None,
            price_paid: 0.0,
            invested,
            current_market_price: 0.0,
            current_value: value,
        }
    }

    #[test]
    fn test_sorted_by_date_with_running_sums() {
        let records = vec![
            record((2023, 6, 1), "B", 200.0, 250.0),
            record((2023, 1, 5), "A", 100.0, 90.0),
            record((2024, 2, 1), "C", 300.0, 400.0),
        ];
        let timeline = growth(&records);

        let dates: Vec<_> = timeline.points.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
                NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            ]
        );
        assert_eq!(timeline.points[2].cumulative_invested, 600.0);
        assert_eq!(timeline.points[2].cumulative_value, 740.0);
    }

    #[test]
    fn test_cumulative_sums_are_monotonic_for_non_negative_inputs() {
        let records = vec![
            record((2023, 3, 1), "A", 100.0, 0.0),
            record((2023, 1, 1), "B", 50.0, 75.0),
            record((2023, 2, 1), "C", 0.0, 10.0),
        ];
        let timeline = growth(&records);
        for pair in timeline.points.windows(2) {
            assert!(pair[1].cumulative_invested >= pair[0].cumulative_invested);
            assert!(pair[1].cumulative_value >= pair[0].cumulative_value);
        }
    }

    #[test]
    fn test_same_day_records_keep_sheet_order() {
        let records = vec![
            record((2023, 1, 5), "First", 100.0, 100.0),
            record((2023, 1, 5), "Second", 200.0, 200.0),
        ];
        let timeline = growth(&records);
        assert_eq!(timeline.points[0].cumulative_invested, 100.0);
        assert_eq!(timeline.points[1].cumulative_invested, 300.0);
    }

    #[test]
    fn test_empty_records() {
        assert!(growth(&[]).points.is_empty());
    }
}
