//! Deterministic ranking of scored funds.

use crate::core::table::{FundTable, NormalizedTable, RankedFund, RankedTable};
use std::cmp::Ordering;

/// Orders funds by descending composite score and assigns competition ranks:
/// rank 1 is the best score, equal scores share the same (lowest eligible)
/// rank. Ties are ordered by scheme name so the output does not depend on the
/// input row order. Funds without a score (exclude policy) are carried in
/// `excluded` and never ranked.
pub fn rank(
    table: FundTable,
    normalized: NormalizedTable,
    scores: Vec<Option<f64>>,
) -> RankedTable {
    let headers = table.headers;
    let mut scored = Vec::with_capacity(table.records.len());
    let mut excluded = Vec::new();

    for ((record, row), score) in table
        .records
        .into_iter()
        .zip(normalized.rows)
        .zip(scores)
    {
        match score {
            Some(score) => scored.push((record, row.metrics, score)),
            None => excluded.push(record.scheme_name),
        }
    }

    scored.sort_by(|(a, _, score_a), (b, _, score_b)| {
        score_b
            .partial_cmp(score_a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.scheme_name.cmp(&b.scheme_name))
    });

    let mut funds: Vec<RankedFund> = Vec::with_capacity(scored.len());
    for (position, (record, normalized, composite_score)) in scored.into_iter().enumerate() {
        let rank = match funds.last() {
            Some(prev) if prev.composite_score == composite_score => prev.rank,
            _ => position as u32 + 1,
        };
        funds.push(RankedFund {
            record,
            normalized,
            composite_score,
            rank,
        });
    }

    RankedTable {
        headers,
        funds,
        excluded,
    }
}
