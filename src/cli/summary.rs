use super::ui;
use crate::core::record::RecordKind;
use crate::engine::AggregationEngine;
use anyhow::Result;
use comfy_table::Cell;
use std::collections::HashMap;

fn expense_table(totals: &HashMap<String, f64>) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Spent")]);

    let mut currencies: Vec<&String> = totals.keys().collect();
    currencies.sort();
    for currency in currencies {
        table.add_row(vec![Cell::new(currency), ui::money_cell(totals[currency])]);
    }
    table.to_string()
}

/// Shows what the owner spent per currency, plus the grand total in the
/// pivot currency.
pub async fn run(engine: &AggregationEngine, owner: &str) -> Result<()> {
    let totals = engine.totals_by_currency(owner, RecordKind::Expense).await?;

    println!(
        "Expenses for {}\n",
        ui::style_text(owner, ui::StyleType::Title)
    );

    if totals.is_empty() {
        println!("{}", ui::style_text("No expense records.", ui::StyleType::Subtle));
        return Ok(());
    }

    println!("{}", expense_table(&totals));

    let total = engine.total_expense_in_pivot(owner).await?;
    println!(
        "\nTotal ({}): {}",
        ui::style_text(engine.pivot(), ui::StyleType::TotalLabel),
        ui::style_text(&format!("{total:.2}"), ui::StyleType::TotalValue)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_table_lists_currencies_sorted() {
        let mut totals = HashMap::new();
        totals.insert("USD".to_string(), 10.0);
        totals.insert("EUR".to_string(), 5.5);

        let rendered = expense_table(&totals);
        assert!(rendered.contains("Currency"));
        let eur = rendered.find("EUR").unwrap();
        let usd = rendered.find("USD").unwrap();
        assert!(eur < usd);
        assert!(rendered.contains("5.50"));
        assert!(rendered.contains("10.00"));
    }
}
