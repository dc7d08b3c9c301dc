use super::ui;
use crate::core::metric::Metric;
use crate::core::table::RankedTable;
use anyhow::Result;
use comfy_table::Cell;

/// Renders the ranked fund table for the terminal.
pub fn display_as_table(table: &RankedTable, limit: usize) -> String {
    let mut out = format!(
        "{}\n\n",
        ui::style_text("Top mutual funds by composite score", ui::StyleType::Title)
    );

    let mut display = ui::new_styled_table();
    display.set_header(vec![
        ui::header_cell("Rank"),
        ui::header_cell("Fund"),
        ui::header_cell("Category"),
        ui::header_cell("Expense (%)"),
        ui::header_cell("1Y (%)"),
        ui::header_cell("3Y (%)"),
        ui::header_cell("5Y (%)"),
        ui::header_cell("Sharpe"),
        ui::header_cell("Score"),
    ]);

    for fund in table.top(limit) {
        let metric = |m: Metric| {
            ui::format_optional_cell(fund.record.metrics[m], |v| format!("{v:.2}"))
        };
        display.add_row(vec![
            ui::number_cell(fund.rank.to_string()),
            Cell::new(&fund.record.scheme_name),
            Cell::new(&fund.record.category),
            metric(Metric::ExpenseRatio),
            metric(Metric::Returns1Yr),
            metric(Metric::Returns3Yr),
            metric(Metric::Returns5Yr),
            metric(Metric::Sharpe),
            ui::number_cell(format!("{:.4}", fund.composite_score)),
        ]);
    }
    out.push_str(&display.to_string());

    if !table.excluded.is_empty() {
        out.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                &format!(
                    "Excluded from ranking (missing metrics): {}",
                    table.excluded.join(", ")
                ),
                ui::StyleType::Error
            )
        ));
    }

    out
}

pub fn run(table: &RankedTable, limit: usize) -> Result<()> {
    println!("{}", display_as_table(table, limit));
    Ok(())
}
