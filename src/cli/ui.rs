use crate::core::config::DisplayConfig;
use crate::core::currency::RateChange;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::{Decimal, RoundingStrategy};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Rounds to the configured places and swaps in the configured separator.
pub fn format_decimal(value: Decimal, display: &DisplayConfig) -> String {
    let rounded =
        value.round_dp_with_strategy(display.decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", display.decimal_places as usize, rounded);
    if display.decimal_separator == "." {
        text
    } else {
        text.replace('.', &display.decimal_separator)
    }
}

fn change_arrow(change: Option<RateChange>) -> Option<(&'static str, Color)> {
    match change {
        Some(RateChange::Increase) => Some(("▲", Color::Green)),
        Some(RateChange::Decrease) => Some(("▼", Color::Red)),
        None => None,
    }
}

/// A rate with its previous-day value and a coloured arrow when it moved.
pub fn rate_cell(
    value: Decimal,
    yesterday: Option<Decimal>,
    change: Option<RateChange>,
    display: &DisplayConfig,
) -> Cell {
    let mut text = format_decimal(value, display);
    if let Some(yesterday) = yesterday {
        text.push_str(&format!(" ({})", format_decimal(yesterday, display)));
    }
    let cell = match change_arrow(change) {
        Some((arrow, color)) => Cell::new(format!("{text} {arrow}")).fg(color),
        None => Cell::new(text),
    };
    cell.set_alignment(CellAlignment::Right)
}

/// Right aligned rate without comparison.
pub fn plain_rate_cell(value: Decimal, display: &DisplayConfig) -> Cell {
    Cell::new(format_decimal(value, display)).set_alignment(CellAlignment::Right)
}

/// Creates a spinner shown while rates are fetched.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_decimal() {
        let display = DisplayConfig::default();
        assert_eq!(format_decimal(dec!(35.37605), &display), "35,3761");
        assert_eq!(format_decimal(dec!(340), &display), "340,0000");

        let display = DisplayConfig {
            decimal_places: 2,
            decimal_separator: ".".to_string(),
        };
        assert_eq!(format_decimal(dec!(22.3165), &display), "22.32");
        assert_eq!(format_decimal(dec!(-0.005), &display), "-0.01");
    }

    #[test]
    fn test_rate_cell_content() {
        let display = DisplayConfig::default();
        let cell = rate_cell(
            dec!(35.4),
            Some(dec!(35.2)),
            Some(RateChange::Increase),
            &display,
        );
        assert_eq!(cell.content(), "35,4000 (35,2000) ▲");

        let cell = rate_cell(dec!(35.4), None, None, &display);
        assert_eq!(cell.content(), "35,4000");
    }
}
