use super::ui;
use crate::cache::RateCache;
use anyhow::Result;
use comfy_table::Cell;

/// Shows the snapshot currently served by the rate cache. `--refresh`
/// drops the stored snapshot first so a fresh one is fetched.
pub async fn run(cache: &RateCache, currencies: &[String], refresh: bool) -> Result<()> {
    if refresh {
        cache.invalidate().await;
    }

    let snapshot = cache.current_snapshot(currencies).await?;

    println!(
        "Rates retrieved at {}\n",
        ui::style_text(
            &snapshot.retrieved_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            ui::StyleType::TotalLabel
        )
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Rate")]);

    let mut codes: Vec<&String> = snapshot.rates.keys().collect();
    codes.sort();
    for code in codes {
        table.add_row(vec![
            Cell::new(code),
            Cell::new(format!("{:.4}", snapshot.rates[code])),
        ]);
    }
    println!("{table}");

    Ok(())
}
