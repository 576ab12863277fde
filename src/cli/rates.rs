use super::ui::{self, StyleType};
use crate::core::config::DisplayConfig;
use crate::core::currency::Currency;
use crate::core::ranking::favorites_first;
use crate::core::{RateDay, RateSession};
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, Color, Table};
use std::collections::BTreeSet;

pub async fn run(
    session: &mut RateSession,
    day: RateDay,
    search_term: &str,
    display: &DisplayConfig,
    today: NaiveDate,
) -> Result<()> {
    super::load_with_spinner(session, day, today).await?;

    println!("{}", rate_date_line(session, today));

    let visible = session.visible(search_term);
    if visible.is_empty() {
        println!("No currencies match the current selection and search.");
        return Ok(());
    }

    let ordered = favorites_first(visible, session.favorites.favorites());
    println!(
        "{}",
        rates_table(&ordered, session.favorites.favorites(), display)
    );
    Ok(())
}

fn rate_date_line(session: &RateSession, today: NaiveDate) -> String {
    let as_of = session
        .board()
        .and_then(|board| board.as_of)
        .map_or_else(|| "unknown".to_string(), |d| d.format("%d.%m.%Y").to_string());
    let mut line = format!(
        "{} {}",
        ui::style_text("Rate date:", StyleType::TotalLabel),
        as_of
    );
    if session.rates_pending(today) {
        line.push_str(&format!(
            " {}",
            ui::style_text(
                "(today's rates are not published yet)",
                StyleType::Subtle
            )
        ));
    }
    line
}

pub fn rates_table(
    currencies: &[&Currency],
    favorites: &BTreeSet<String>,
    display: &DisplayConfig,
) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell("Buying"),
        ui::header_cell("Selling"),
        ui::header_cell("Banknote Buying"),
        ui::header_cell("Banknote Selling"),
    ]);

    for currency in currencies {
        let star = if favorites.contains(&currency.code) {
            Cell::new("★").fg(Color::Yellow)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            star,
            Cell::new(currency.display_code()),
            Cell::new(&currency.name),
            ui::rate_cell(
                currency.buying,
                currency.yesterday_buying,
                currency.buying_change(),
                display,
            ),
            ui::rate_cell(
                currency.selling,
                currency.yesterday_selling,
                currency.selling_change(),
                display,
            ),
            ui::plain_rate_cell(currency.banknote_buying, display),
            ui::plain_rate_cell(currency.banknote_selling, display),
        ]);
    }
    table
}
