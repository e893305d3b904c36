use super::ui;
use crate::core::holding::Holding;
use crate::store::Portfolio;
use comfy_table::Cell;
use tracing::info;

/// Adds or replaces a holding and returns the message shown to the user.
pub fn add(portfolio: &mut Portfolio, holding: Holding) -> String {
    let ticker = holding.ticker.clone();
    match portfolio.insert(holding) {
        Some(_) => {
            info!("Replaced holding {ticker}");
            format!("Updated {ticker} in portfolio.")
        }
        None => {
            info!("Added holding {ticker}");
            format!("Added {ticker} to portfolio.")
        }
    }
}

/// Removes a holding and returns the message shown to the user, plus whether
/// anything changed.
pub fn remove(portfolio: &mut Portfolio, ticker: &str) -> (String, bool) {
    match portfolio.remove(ticker) {
        Some(holding) => {
            info!("Removed holding {}", holding.ticker);
            (format!("Removed {} from portfolio.", holding.ticker), true)
        }
        None => ("Ticker not found.".to_string(), false),
    }
}

pub fn display_as_table(portfolio: &Portfolio) -> String {
    if portfolio.is_empty() {
        return ui::style_text("Portfolio is empty.", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Ticker"),
        ui::header_cell("Qty"),
        ui::header_cell("Buy Price"),
        ui::header_cell("Buy Date"),
    ]);

    for holding in portfolio.holdings() {
        table.add_row(vec![
            Cell::new(&holding.ticker),
            ui::number_cell(holding.quantity.to_string()),
            ui::number_cell(format!("{:.2}", holding.buy_price)),
            Cell::new(&holding.buy_date),
        ]);
    }

    format!(
        "{}\n\n{table}",
        ui::style_text("Current Portfolio", ui::StyleType::Title)
    )
}
