use super::ui;
use crate::core::holding::{HoldingStore, normalize_ticker};
use crate::core::{QuoteProviderChain, ReturnError, ReturnEstimate, estimate_return};
use comfy_table::Cell;
use futures::future::join_all;
use tracing::info;

pub type ReturnOutcome = (String, Result<ReturnEstimate, ReturnError>);

/// Estimates the CAGR of each ticker. Every ticker gets its own pass through
/// the quote chain; a failure for one does not affect the others.
pub async fn calculate_returns(
    store: &(impl HoldingStore + Sync),
    chain: &QuoteProviderChain,
    tickers: &[String],
) -> Vec<ReturnOutcome> {
    info!("Calculating CAGR for {} holdings...", tickers.len());

    let pb = ui::new_progress_bar(tickers.len() as u64);
    let futures = tickers.iter().map(|ticker| {
        let pb_clone = pb.clone();
        async move {
            let result = estimate_return(store, chain, ticker).await;
            pb_clone.inc(1);
            (normalize_ticker(ticker), result)
        }
    });

    let results = join_all(futures).await;
    pb.finish_and_clear();
    results
}

pub fn display_as_table(results: &[ReturnOutcome]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Ticker"),
        ui::header_cell("Live Price"),
        ui::header_cell("Source"),
        ui::header_cell("Years"),
        ui::header_cell("CAGR (%)"),
    ]);

    let mut errors = Vec::new();
    for (ticker, result) in results {
        let row = match result {
            Ok(estimate) => vec![
                Cell::new(ticker),
                ui::number_cell(format!("{:.2}", estimate.quote.price)),
                Cell::new(&estimate.quote.source),
                ui::number_cell(format!("{:.2}", estimate.years)),
                ui::change_cell(estimate.cagr),
            ],
            Err(e) => {
                errors.push(format!("{ticker}: {e}"));
                vec![
                    Cell::new(ticker),
                    ui::na_cell(true),
                    ui::na_cell(true),
                    ui::na_cell(true),
                    ui::na_cell(true),
                ]
            }
        };
        table.add_row(row);
    }

    let mut output = table.to_string();
    for error in errors {
        output.push('\n');
        output.push_str(&ui::style_text(&error, ui::StyleType::Error));
    }
    output
}
