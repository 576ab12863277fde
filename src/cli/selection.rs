use super::ui::{self, StyleType};
use crate::core::{RateDay, RateSession};
use anyhow::{Result, bail};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectAction {
    List,
    All,
    None,
    Toggle(Vec<String>),
}

/// Selection changes are checked against today's published codes.
pub async fn run(session: &mut RateSession, action: &SelectAction, today: NaiveDate) -> Result<()> {
    super::load_with_spinner(session, RateDay::Today, today).await?;

    match action {
        SelectAction::List => {}
        SelectAction::All => session.selection.select_all().await,
        SelectAction::None => session.selection.deselect_all().await,
        SelectAction::Toggle(codes) => {
            let unknown: Vec<&str> = codes
                .iter()
                .filter(|code| !session.currencies().iter().any(|c| &c.code == *code))
                .map(String::as_str)
                .collect();
            if !unknown.is_empty() {
                bail!("Unknown currency code(s): {}", unknown.join(", "));
            }
            for code in codes {
                let selected = session.selection.toggle(code).await;
                println!(
                    "{code} {}",
                    if selected { "selected" } else { "deselected" }
                );
            }
        }
    }

    print_selection(session);
    Ok(())
}

fn print_selection(session: &RateSession) {
    let selected = session.selection.selected();
    if selected.is_empty() {
        println!(
            "{}",
            ui::style_text("No selection, all currencies are shown", StyleType::Subtle)
        );
        return;
    }
    println!("{}", ui::style_text("Selected currencies", StyleType::Title));
    for code in selected {
        println!("  {code}");
    }
}
