pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::convert::ConvertRequest;
use crate::cli::favorites::FavoriteAction;
use crate::cli::selection::SelectAction;
use crate::core::config::AppConfig;
use crate::core::{CollectionStorage, RateSession};
use crate::providers::TcmbProvider;
use crate::store::KeyValueStore;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

/// Name of the collection holding the selection and favorites.
const PREFERENCES_COLLECTION: &str = "preferences";

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Rates {
        date: Option<NaiveDate>,
        search: Option<String>,
    },
    Convert {
        amount: Decimal,
        from: String,
        to: String,
        date: Option<NaiveDate>,
    },
    Select(SelectAction),
    Favorite(FavoriteAction),
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("kurlar starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = if config.persist {
        KeyValueStore::open(&config.default_data_path()?)
    } else {
        KeyValueStore::in_memory()
    };
    let storage = Arc::new(CollectionStorage::from_store(
        &store,
        PREFERENCES_COLLECTION,
        config.persist,
    ));
    let provider = Arc::new(TcmbProvider::new(config.providers.tcmb_base_url())?);
    let mut session = RateSession::open(provider, storage).await;

    let today = Local::now().date_naive();
    let display = &config.display;

    match command {
        AppCommand::Rates { date, search } => {
            let day = cli::resolve_day(date, today)?;
            cli::rates::run(
                &mut session,
                day,
                search.as_deref().unwrap_or_default(),
                display,
                today,
            )
            .await
        }
        AppCommand::Convert {
            amount,
            from,
            to,
            date,
        } => {
            let request =
                ConvertRequest::new(amount, &from, &to, cli::resolve_day(date, today)?)?;
            cli::convert::run(&mut session, &request, display, today)
                .await
                .map(|_| ())
        }
        AppCommand::Select(action) => cli::selection::run(&mut session, &action, today).await,
        AppCommand::Favorite(action) => cli::favorites::run(&mut session, &action).await,
    }
}
