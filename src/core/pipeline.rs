//! The scoring pipeline: clean -> normalize -> score -> rank.

use crate::core::error::PipelineError;
use crate::core::score::{MissingMetricPolicy, Weights};
use crate::core::table::{RankedTable, RawFundTable};
use crate::core::{clean, normalize, rank, score};
use tracing::debug;

/// Runs a raw fund table through the full scoring pipeline. Each stage
/// produces a new value; nothing upstream is mutated once a stage has run.
pub fn run(
    raw: RawFundTable,
    weights: &Weights,
    policy: MissingMetricPolicy,
) -> Result<RankedTable, PipelineError> {
    if raw.records.is_empty() {
        return Err(PipelineError::EmptyTable);
    }
    debug!("Scoring {} fund records", raw.records.len());

    let table = clean::clean(raw)?;
    let normalized = normalize::normalize(&table);
    let scores = score::score(&normalized, weights, policy)?;
    let ranked = rank::rank(table, normalized, scores);

    debug!(
        "Ranked {} funds ({} excluded)",
        ranked.funds.len(),
        ranked.excluded.len()
    );
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metric::{Metric, MetricValues};
    use crate::core::table::RawFundRecord;

    fn record(name: &str, cells: [&str; Metric::COUNT]) -> RawFundRecord {
        let mut i = 0;
        RawFundRecord {
            scheme_name: name.to_string(),
            category: "Equity".to_string(),
            metrics: MetricValues::from_fn(|_| {
                let cell = cells[i].to_string();
                i += 1;
                cell
            }),
            extras: Vec::new(),
        }
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let raw = RawFundTable {
            headers: Vec::new(),
            records: Vec::new(),
        };
        let err = run(raw, &Weights::default(), MissingMetricPolicy::Fail).unwrap_err();
        assert_eq!(err, PipelineError::EmptyTable);
    }

    #[test]
    fn test_lowest_expense_ratio_wins_when_all_else_equal() {
        // Only expense_ratio varies; its inverted normalization should decide
        // the whole ordering.
        let raw = RawFundTable {
            headers: Vec::new(),
            records: vec![
                record("Pricey", ["3.0", "10.0", "10.0", "10.0", "1.0", "1.0", "0.5", "1.0"]),
                record("Cheap", ["1.0", "10.0", "10.0", "10.0", "1.0", "1.0", "0.5", "1.0"]),
                record("Middling", ["2.0", "10.0", "10.0", "10.0", "1.0", "1.0", "0.5", "1.0"]),
            ],
        };
        let ranked = run(raw, &Weights::default(), MissingMetricPolicy::Fail).unwrap();
        let names: Vec<&str> = ranked
            .funds
            .iter()
            .map(|f| f.record.scheme_name.as_str())
            .collect();
        assert_eq!(names, vec!["Cheap", "Middling", "Pricey"]);
        assert_eq!(
            ranked.funds[0].normalized[Metric::ExpenseRatio],
            Some(1.0)
        );
        assert_eq!(
            ranked.funds[1].normalized[Metric::ExpenseRatio],
            Some(0.5)
        );
        assert_eq!(
            ranked.funds[2].normalized[Metric::ExpenseRatio],
            Some(0.0)
        );
    }

    #[test]
    fn test_imputed_returns_survive_to_ranked_output() {
        let raw = RawFundTable {
            headers: Vec::new(),
            records: vec![
                record("A", ["1.0", "10.0", "4.0", "8.0", "1.0", "1.0", "0.5", "1.0"]),
                record("B", ["2.0", "11.0", "6.0", "9.0", "1.1", "1.2", "0.6", "0.9"]),
                record("C", ["3.0", "12.0", "-", "10.0", "1.2", "1.4", "0.7", "0.8"]),
            ],
        };
        let ranked = run(raw, &Weights::default(), MissingMetricPolicy::Fail).unwrap();
        let c = ranked
            .funds
            .iter()
            .find(|f| f.record.scheme_name == "C")
            .unwrap();
        assert_eq!(c.record.metrics[Metric::Returns3Yr], Some(5.0));
    }
}
