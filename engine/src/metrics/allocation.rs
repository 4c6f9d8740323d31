// (source, company) allocation behind the treemap/flow views.
use shared::models::{AllocationNode, InvestmentRecord};

/// Aggregates invested amount and current value per (source, company)
/// pair. Nodes come out sorted by source, then company, which is the
/// order the flow views want their labels in.
pub fn by_source(records: &[InvestmentRecord]) -> Vec<AllocationNode> {
    let mut nodes: Vec<AllocationNode> = Vec::new();
    for record in records {
        match nodes
            .iter_mut()
            .find(|n| n.source == record.source && n.company == record.company)
        {
            Some(node) => {
                node.invested += record.invested;
                node.current_value += record.current_value;
            }
            None => nodes.push(AllocationNode {
                source: record.source.clone(),
                company: record.company.clone(),
                invested: record.invested,
                current_value: record.current_value,
            }),
        }
    }
    nodes.sort_by(|a, b| a.source.cmp(&b.source).then_with(|| a.company.cmp(&b.company)));
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(source: &str, company: &str, invested: f64, value: f64) -> InvestmentRecord {
        InvestmentRecord {
            date: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
            company: company.to_string(),
            source: source.to_string(),
            count: None,
            my_shares: None,
            price_paid: 0.0,
            invested,
            current_market_price: 0.0,
            current_value: value,
        }
    }

    #[test]
    fn test_aggregates_per_pair() {
        let records = vec![
            record("Avanza", "Acme", 100.0, 120.0),
            record("Avanza", "Acme", 50.0, 60.0),
            record("Nordnet", "Acme", 200.0, 210.0),
        ];
        let nodes = by_source(&records);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].source, "Avanza");
        assert_eq!(nodes[0].invested, 150.0);
        assert_eq!(nodes[0].current_value, 180.0);
    }

    #[test]
    fn test_sorted_by_source_then_company() {
        let records = vec![
            record("Nordnet", "Beta", 1.0, 1.0),
            record("Avanza", "Beta", 1.0, 1.0),
            record("Avanza", "Acme", 1.0, 1.0),
        ];
        let nodes = by_source(&records);
        let pairs: Vec<(&str, &str)> = nodes
            .iter()
            .map(|n| (n.source.as_str(), n.company.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [("Avanza", "Acme"), ("Avanza", "Beta"), ("Nordnet", "Beta")]
        );
    }

    #[test]
    fn test_node_sums_match_portfolio_totals() {
        let records = vec![
            record("Avanza", "Acme", 100.0, 110.0),
            record("Nordnet", "Beta", 200.0, 190.0),
            record("Avanza", "Beta", 300.0, 330.0),
        ];
        let nodes = by_source(&records);
        let invested: f64 = nodes.iter().map(|n| n.invested).sum();
        let value: f64 = nodes.iter().map(|n| n.current_value).sum();
        assert_eq!(invested, 600.0);
        assert_eq!(value, 630.0);
    }
}
