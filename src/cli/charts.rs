//! Terminal renderings of the exploratory charts. These are pure consumers of
//! the ranked table; none of them feed back into the pipeline.

use super::ui;
use crate::core::metric::Metric;
use crate::core::table::RankedTable;
use anyhow::Result;
use comfy_table::Cell;
use std::collections::BTreeMap;

const BAR_WIDTH: usize = 40;
const SCATTER_WIDTH: usize = 56;
const SCATTER_HEIGHT: usize = 16;
const CATEGORY_GLYPHS: [char; 8] = ['●', '▪', '▲', '◆', '○', '□', '△', '◇'];

/// Renders all five charts, separated for terminal reading.
pub fn run(table: &RankedTable) -> Result<()> {
    println!("{}", composite_bar_chart(table, 10));
    ui::print_separator();
    println!("{}", expense_vs_returns_scatter(table));
    ui::print_separator();
    println!("{}", correlation_table(table));
    ui::print_separator();
    println!("{}", category_distribution(table));
    ui::print_separator();
    println!("{}", top_fund_profile(table));
    Ok(())
}

/// Horizontal bar chart of the top `n` composite scores by fund name.
pub fn composite_bar_chart(table: &RankedTable, n: usize) -> String {
    let top = table.top(n);
    let mut out = format!(
        "{}\n\n",
        ui::style_text(
            &format!("Top {} funds by composite score", top.len()),
            ui::StyleType::Title
        )
    );
    let name_width = top
        .iter()
        .map(|f| f.record.scheme_name.chars().count())
        .max()
        .unwrap_or(0);
    let max_score = top
        .iter()
        .map(|f| f.composite_score)
        .fold(f64::MIN, f64::max);

    for fund in top {
        let fraction = if max_score > 0.0 {
            fund.composite_score / max_score
        } else {
            0.0
        };
        out.push_str(&format!(
            "{:<name_width$}  {} {:.4}\n",
            fund.record.scheme_name,
            ui::bar(fraction, BAR_WIDTH),
            fund.composite_score
        ));
    }
    out
}

/// Character-grid scatter of expense ratio vs 5-year returns, one glyph per
/// category. Funds missing either metric are left out.
pub fn expense_vs_returns_scatter(table: &RankedTable) -> String {
    let mut out = format!(
        "{}\n\n",
        ui::style_text("Expense ratio vs 5Y returns by category", ui::StyleType::Title)
    );

    let points: Vec<(f64, f64, &str)> = table
        .funds
        .iter()
        .filter_map(|f| {
            let x = f.record.metrics[Metric::ExpenseRatio]?;
            let y = f.record.metrics[Metric::Returns5Yr]?;
            Some((x, y, f.record.category.as_str()))
        })
        .collect();
    if points.is_empty() {
        out.push_str("No funds with both metrics present.\n");
        return out;
    }

    let mut glyphs: BTreeMap<&str, char> = BTreeMap::new();
    for &(_, _, category) in &points {
        let next = glyphs.len();
        glyphs
            .entry(category)
            .or_insert_with(|| *CATEGORY_GLYPHS.get(next).unwrap_or(&'*'));
    }

    let (x_min, x_max) = bounds(points.iter().map(|p| p.0));
    let (y_min, y_max) = bounds(points.iter().map(|p| p.1));
    let mut grid = vec![vec![' '; SCATTER_WIDTH]; SCATTER_HEIGHT];
    for (x, y, category) in &points {
        let col = position(*x, x_min, x_max, SCATTER_WIDTH);
        let row = SCATTER_HEIGHT - 1 - position(*y, y_min, y_max, SCATTER_HEIGHT);
        grid[row][col] = glyphs[category];
    }

    out.push_str(&format!("{y_max:>8.2} ┤"));
    for (i, row) in grid.iter().enumerate() {
        if i > 0 {
            out.push_str("         │");
        }
        out.push_str(&row.iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&format!(
        "{y_min:>8.2} └{}\n          {:<width$.2}{:>rest$.2}\n",
        "─".repeat(SCATTER_WIDTH),
        x_min,
        x_max,
        width = SCATTER_WIDTH / 2,
        rest = SCATTER_WIDTH - SCATTER_WIDTH / 2,
    ));
    out.push_str("          expense ratio (%) → ; 5Y returns (%) ↑\n\n");
    for (category, glyph) in &glyphs {
        out.push_str(&format!("  {glyph} {category}\n"));
    }
    out
}

/// Pearson correlation over the eight raw metric columns, using pairwise
/// complete observations. Strong correlations are color-coded.
pub fn correlation_table(table: &RankedTable) -> String {
    let mut out = format!(
        "{}\n\n",
        ui::style_text("Correlation of performance metrics", ui::StyleType::Title)
    );

    let mut display = ui::new_styled_table();
    let mut header = vec![ui::header_cell("")];
    header.extend(Metric::ALL.iter().map(|m| ui::header_cell(m.column_name())));
    display.set_header(header);

    for row_metric in Metric::ALL {
        let mut row = vec![ui::header_cell(row_metric.column_name())];
        for col_metric in Metric::ALL {
            let pairs: Vec<(f64, f64)> = table
                .funds
                .iter()
                .filter_map(|f| {
                    Some((
                        f.record.metrics[row_metric]?,
                        f.record.metrics[col_metric]?,
                    ))
                })
                .collect();
            row.push(match pearson(&pairs) {
                Some(r) if r >= 0.7 => Cell::new(format!("{r:.2}"))
                    .fg(comfy_table::Color::Green),
                Some(r) if r <= -0.7 => Cell::new(format!("{r:.2}"))
                    .fg(comfy_table::Color::Red),
                Some(r) => Cell::new(format!("{r:.2}")),
                None => Cell::new("-").fg(comfy_table::Color::DarkGrey),
            });
        }
        display.add_row(row);
    }
    out.push_str(&display.to_string());
    out
}

/// Bar chart of fund counts per category, most common first.
pub fn category_distribution(table: &RankedTable) -> String {
    let mut out = format!(
        "{}\n\n",
        ui::style_text("Funds per category", ui::StyleType::Title)
    );

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for fund in &table.funds {
        *counts.entry(fund.record.category.as_str()).or_default() += 1;
    }
    let mut ordered: Vec<(&str, usize)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let name_width = ordered
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    let max_count = ordered.first().map_or(0, |(_, count)| *count);
    for (category, count) in ordered {
        out.push_str(&format!(
            "{category:<name_width$}  {} {count}\n",
            ui::bar(count as f64 / max_count as f64, BAR_WIDTH)
        ));
    }
    out
}

/// Normalized metric profile of the rank-1 fund. Every bar is on the same
/// [0,1] scale with higher always better, so this reads like a flattened
/// radar chart.
pub fn top_fund_profile(table: &RankedTable) -> String {
    let Some(best) = table.funds.first() else {
        return "No ranked funds.\n".to_string();
    };
    let mut out = format!(
        "{}\n\n",
        ui::style_text(
            &format!("Risk-return profile: {}", best.record.scheme_name),
            ui::StyleType::Title
        )
    );
    for metric in Metric::ALL {
        let (bar, label) = match best.normalized[metric] {
            Some(v) => (ui::bar(v, 30), format!("{v:.2}")),
            None => (String::new(), "-".to_string()),
        };
        out.push_str(&format!("{:<13}  {bar:<30} {label}\n", metric.column_name()));
    }
    out
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::MAX, f64::MIN), |(min, max), v| {
        (min.min(v), max.max(v))
    })
}

/// Maps a value into a cell index along an axis of `cells` positions.
fn position(value: f64, min: f64, max: f64, cells: usize) -> usize {
    if max == min {
        return 0;
    }
    let fraction = (value - min) / (max - min);
    ((fraction * (cells - 1) as f64).round() as usize).min(cells - 1)
}

/// Pearson correlation coefficient; `None` when fewer than two pairs are
/// available or either side has zero variance.
fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}
