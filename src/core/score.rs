//! Weighted composite scoring of normalized fund metrics.

use crate::core::error::PipelineError;
use crate::core::metric::{Metric, MetricValues};
use crate::core::table::NormalizedTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Per-metric composite weights, validated to sum to 1.0.
#[derive(Debug, Clone)]
pub struct Weights(MetricValues<f64>);

impl Default for Weights {
    fn default() -> Self {
        Weights(MetricValues::from_fn(Metric::default_weight))
    }
}

impl Weights {
    /// Builds a weight table from a configured override. Every metric must be
    /// present and the total must be 1.0, otherwise the whole table is
    /// rejected rather than silently renormalized.
    pub fn from_map(map: &HashMap<Metric, f64>) -> Result<Self, PipelineError> {
        let total: f64 = map.values().sum();
        if map.len() != Metric::COUNT || (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(PipelineError::InvalidWeights(total));
        }
        Ok(Weights(MetricValues::from_fn(|m| map[&m])))
    }

    pub fn get(&self, metric: Metric) -> f64 {
        self.0[metric]
    }
}

/// What to do with a fund that is missing a normalized metric at scoring time.
///
/// Missing values are never treated as a 0 contribution: that would silently
/// rank an incomplete fund as if its unknown metrics were the worst observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingMetricPolicy {
    /// Abort the pipeline on the first incomplete fund.
    #[default]
    Fail,
    /// Leave the fund unscored; it is excluded from ranking and reported.
    Exclude,
}

/// Computes one composite score per row as the weighted sum of its normalized
/// metrics. With all metrics present the score lands in [0,1]. Incomplete rows
/// follow `policy`: `Fail` aborts with the offending fund and column,
/// `Exclude` yields `None` for that row.
pub fn score(
    normalized: &NormalizedTable,
    weights: &Weights,
    policy: MissingMetricPolicy,
) -> Result<Vec<Option<f64>>, PipelineError> {
    normalized
        .rows
        .iter()
        .map(|row| {
            let mut total = 0.0;
            for metric in Metric::ALL {
                match row.metrics[metric] {
                    Some(value) => total += weights.get(metric) * value,
                    None => match policy {
                        MissingMetricPolicy::Fail => {
                            return Err(PipelineError::IncompleteMetrics {
                                column: metric.column_name(),
                                scheme: row.scheme_name.clone(),
                            });
                        }
                        MissingMetricPolicy::Exclude => {
                            warn!(
                                "Excluding fund '{}' from ranking: no value for '{metric}'",
                                row.scheme_name
                            );
                            return Ok(None);
                        }
                    },
                }
            }
            Ok(Some(total))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::NormalizedRow;

    fn row(name: &str, values: MetricValues<Option<f64>>) -> NormalizedRow {
        NormalizedRow {
            scheme_name: name.to_string(),
            metrics: values,
        }
    }

    #[test]
    fn test_weighted_sum_with_known_values() {
        let table = NormalizedTable {
            rows: vec![
                row("Best", MetricValues::from_fn(|_| Some(1.0))),
                row("Worst", MetricValues::from_fn(|_| Some(0.0))),
                row("Half", MetricValues::from_fn(|_| Some(0.5))),
            ],
        };
        let scores = score(&table, &Weights::default(), MissingMetricPolicy::Fail).unwrap();
        assert!((scores[0].unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(scores[1], Some(0.0));
        assert!((scores[2].unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_metric_contribution() {
        let mut values: MetricValues<Option<f64>> = MetricValues::from_fn(|_| Some(0.0));
        values[Metric::ExpenseRatio] = Some(1.0);
        let table = NormalizedTable {
            rows: vec![row("Cheap", values)],
        };
        let scores = score(&table, &Weights::default(), MissingMetricPolicy::Fail).unwrap();
        assert!((scores[0].unwrap() - 0.20).abs() < 1e-12);
    }

    #[test]
    fn test_fail_policy_reports_fund_and_column() {
        let mut values: MetricValues<Option<f64>> = MetricValues::from_fn(|_| Some(0.5));
        values[Metric::Alpha] = None;
        let table = NormalizedTable {
            rows: vec![row("Fund A", values)],
        };
        let err = score(&table, &Weights::default(), MissingMetricPolicy::Fail).unwrap_err();
        assert_eq!(
            err,
            PipelineError::IncompleteMetrics {
                column: "alpha",
                scheme: "Fund A".to_string(),
            }
        );
    }

    #[test]
    fn test_exclude_policy_skips_incomplete_rows() {
        let mut incomplete: MetricValues<Option<f64>> = MetricValues::from_fn(|_| Some(0.5));
        incomplete[Metric::Sortino] = None;
        let table = NormalizedTable {
            rows: vec![
                row("Complete", MetricValues::from_fn(|_| Some(0.5))),
                row("Incomplete", incomplete),
            ],
        };
        let scores = score(&table, &Weights::default(), MissingMetricPolicy::Exclude).unwrap();
        assert!(scores[0].is_some());
        assert_eq!(scores[1], None);
    }

    #[test]
    fn test_weights_override_must_sum_to_one() {
        let mut map: HashMap<Metric, f64> =
            Metric::ALL.into_iter().map(|m| (m, 0.125)).collect();
        assert!(Weights::from_map(&map).is_ok());

        map.insert(Metric::Beta, 0.5);
        assert_eq!(
            Weights::from_map(&map).unwrap_err(),
            PipelineError::InvalidWeights(0.125 * 7.0 + 0.5)
        );

        map.remove(&Metric::Beta);
        assert!(matches!(
            Weights::from_map(&map).unwrap_err(),
            PipelineError::InvalidWeights(_)
        ));
    }
}
