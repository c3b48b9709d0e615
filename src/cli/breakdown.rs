use super::ui;
use crate::engine::{AggregationEngine, MonthBreakdown};
use anyhow::Result;
use comfy_table::Cell;

fn month_table(month: &MonthBreakdown) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Income"),
        ui::header_cell("Expense"),
        ui::header_cell("Records"),
    ]);

    for category in &month.categories {
        table.add_row(vec![
            Cell::new(&category.name),
            ui::money_cell(category.income),
            ui::money_cell(category.expense),
            Cell::new(category.records.len().to_string()),
        ]);
    }
    table.to_string()
}

/// Shows the month-by-month category breakdown, most recent month first.
/// Amounts stay in their original currencies here; only the summary view
/// normalizes.
pub async fn run(engine: &AggregationEngine, owner: &str) -> Result<()> {
    let months = engine.monthly_breakdown(owner).await?;

    if months.is_empty() {
        println!("{}", ui::style_text("No records.", ui::StyleType::Subtle));
        return Ok(());
    }

    let count = months.len();
    for (i, month) in months.iter().enumerate() {
        println!(
            "{}  income {:.2}  expense {:.2}\n",
            ui::style_text(&month.key, ui::StyleType::Title),
            month.income,
            month.expense
        );
        println!("{}", month_table(month));
        if i < count - 1 {
            ui::print_separator();
        }
    }

    Ok(())
}
