use super::ui::{self, StyleType};
use crate::core::RateSession;
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteAction {
    List,
    Add(Vec<String>),
    Remove(Vec<String>),
    Toggle(Vec<String>),
}

/// Favorites are not checked against the published codes, so no load happens.
pub async fn run(session: &mut RateSession, action: &FavoriteAction) -> Result<()> {
    match action {
        FavoriteAction::List => {}
        FavoriteAction::Add(codes) => {
            for code in codes {
                session.favorites.add(code).await;
            }
        }
        FavoriteAction::Remove(codes) => {
            for code in codes {
                session.favorites.remove(code).await;
            }
        }
        FavoriteAction::Toggle(codes) => {
            for code in codes {
                let starred = session.favorites.toggle(code).await;
                println!("{code} {}", if starred { "added" } else { "removed" });
            }
        }
    }

    let favorites = session.favorites.favorites();
    if favorites.is_empty() {
        println!("{}", ui::style_text("No favorites", StyleType::Subtle));
    } else {
        println!("{}", ui::style_text("Favorites", StyleType::Title));
        for code in favorites {
            println!("  ★ {code}");
        }
    }
    Ok(())
}
