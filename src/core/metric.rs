//! The closed set of fund performance metrics used for scoring.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the eight metric columns every fund record carries.
///
/// The set is closed on purpose: a missing or misspelled column in the input
/// is a load-time error, never a silent `None` at scoring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "expense_ratio")]
    ExpenseRatio,
    #[serde(rename = "returns_1yr")]
    Returns1Yr,
    #[serde(rename = "returns_3yr")]
    Returns3Yr,
    #[serde(rename = "returns_5yr")]
    Returns5Yr,
    #[serde(rename = "sharpe")]
    Sharpe,
    #[serde(rename = "sortino")]
    Sortino,
    #[serde(rename = "alpha")]
    Alpha,
    #[serde(rename = "beta")]
    Beta,
}

impl Metric {
    pub const COUNT: usize = 8;

    /// All metrics, in canonical column order.
    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::ExpenseRatio,
        Metric::Returns1Yr,
        Metric::Returns3Yr,
        Metric::Returns5Yr,
        Metric::Sharpe,
        Metric::Sortino,
        Metric::Alpha,
        Metric::Beta,
    ];

    /// The column name as it appears in the input file header.
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::ExpenseRatio => "expense_ratio",
            Metric::Returns1Yr => "returns_1yr",
            Metric::Returns3Yr => "returns_3yr",
            Metric::Returns5Yr => "returns_5yr",
            Metric::Sharpe => "sharpe",
            Metric::Sortino => "sortino",
            Metric::Alpha => "alpha",
            Metric::Beta => "beta",
        }
    }

    pub fn from_column_name(name: &str) -> Option<Metric> {
        Metric::ALL.iter().copied().find(|m| m.column_name() == name)
    }

    /// Cost/risk metrics where a lower raw value is preferable. Normalization
    /// inverts these so that a higher normalized value is always better.
    pub fn lower_is_better(self) -> bool {
        matches!(self, Metric::ExpenseRatio | Metric::Beta)
    }

    /// Default composite weight. The full table sums to 1.0.
    pub fn default_weight(self) -> f64 {
        match self {
            Metric::ExpenseRatio => 0.20,
            Metric::Returns1Yr => 0.15,
            Metric::Returns3Yr => 0.15,
            Metric::Returns5Yr => 0.15,
            Metric::Sharpe => 0.10,
            Metric::Sortino => 0.10,
            Metric::Alpha => 0.10,
            Metric::Beta => 0.05,
        }
    }

    fn index(self) -> usize {
        match self {
            Metric::ExpenseRatio => 0,
            Metric::Returns1Yr => 1,
            Metric::Returns3Yr => 2,
            Metric::Returns5Yr => 3,
            Metric::Sharpe => 4,
            Metric::Sortino => 5,
            Metric::Alpha => 6,
            Metric::Beta => 7,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Fixed-size storage of one value per metric, indexable by `Metric`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricValues<T>([T; Metric::COUNT]);

impl<T: Default> Default for MetricValues<T> {
    fn default() -> Self {
        MetricValues(std::array::from_fn(|_| T::default()))
    }
}

impl<T> MetricValues<T> {
    pub fn from_fn(mut f: impl FnMut(Metric) -> T) -> Self {
        MetricValues(std::array::from_fn(|i| f(Metric::ALL[i])))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, &T)> {
        Metric::ALL.iter().map(move |&m| (m, &self[m]))
    }
}

impl<T> Index<Metric> for MetricValues<T> {
    type Output = T;

    fn index(&self, metric: Metric) -> &T {
        &self.0[metric.index()]
    }
}

impl<T> IndexMut<Metric> for MetricValues<T> {
    fn index_mut(&mut self, metric: Metric) -> &mut T {
        &mut self.0[metric.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_column_name(metric.column_name()), Some(metric));
        }
        assert_eq!(Metric::from_column_name("nav"), None);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let total: f64 = Metric::ALL.iter().map(|m| m.default_weight()).sum();
        assert_eq!(total, 1.0);
    }

    #[test]
    fn test_polarity_flags() {
        let inverted: Vec<Metric> = Metric::ALL
            .into_iter()
            .filter(|m| m.lower_is_better())
            .collect();
        assert_eq!(inverted, vec![Metric::ExpenseRatio, Metric::Beta]);
    }

    #[test]
    fn test_metric_values_indexing() {
        let mut values: MetricValues<Option<f64>> = MetricValues::default();
        assert_eq!(values[Metric::Sharpe], None);
        values[Metric::Sharpe] = Some(1.5);
        assert_eq!(values[Metric::Sharpe], Some(1.5));
        assert_eq!(values[Metric::Sortino], None);
    }
}
