//! State shared by every front end: the current board and the user's sets.

use crate::core::conversion::{self, ConversionError, ConversionTarget};
use crate::core::currency::Currency;
use crate::core::favorites::FavoriteStore;
use crate::core::filter::filter_currencies;
use crate::core::loader::{RateBoard, load_rates};
use crate::core::rates::{RateDay, RateError, RateProvider};
use crate::core::selection::SelectionStore;
use crate::core::storage::PreferenceStorage;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info};

pub struct RateSession {
    provider: Arc<dyn RateProvider>,
    pub selection: SelectionStore,
    pub favorites: FavoriteStore,
    board: Option<RateBoard>,
}

impl RateSession {
    /// Creates a session and reads the saved favorites.
    pub async fn open(
        provider: Arc<dyn RateProvider>,
        storage: Arc<dyn PreferenceStorage>,
    ) -> Self {
        let mut favorites = FavoriteStore::new(Arc::clone(&storage));
        favorites.load().await;
        Self {
            provider,
            selection: SelectionStore::new(storage),
            favorites,
            board: None,
        }
    }

    /// Runs a load cycle relative to `today`.
    ///
    /// On failure the previous board stays in place. Concurrent callers are
    /// not sequenced: whichever load finishes last wins.
    pub async fn load_as_of(
        &mut self,
        day: RateDay,
        today: NaiveDate,
    ) -> Result<&RateBoard, RateError> {
        let board = match load_rates(self.provider.as_ref(), day, today).await {
            Ok(board) => board,
            Err(e) => {
                error!("Failed to load exchange rates: {}", e);
                return Err(e);
            }
        };
        info!(
            "Loaded {} currencies for {} (as of {:?})",
            board.currencies.len(),
            day,
            board.as_of
        );
        self.selection.initialize(&board.currencies).await;
        Ok(&*self.board.insert(board))
    }

    pub fn board(&self) -> Option<&RateBoard> {
        self.board.as_ref()
    }

    pub fn currencies(&self) -> &[Currency] {
        self.board
            .as_ref()
            .map(|board| board.currencies.as_slice())
            .unwrap_or_default()
    }

    /// Currencies that pass the selection and `search_term`, in board order.
    pub fn visible(&self, search_term: &str) -> Vec<&Currency> {
        filter_currencies(self.currencies(), self.selection.selected(), search_term)
    }

    /// Converts over the whole board, regardless of what is visible.
    pub fn convert(
        &self,
        amount: Decimal,
        from_code: &str,
        to_code: &str,
    ) -> Result<Decimal, ConversionError> {
        conversion::convert(amount, from_code, to_code, self.currencies())
    }

    pub fn conversion_targets(&self) -> Vec<ConversionTarget> {
        conversion::conversion_targets(self.currencies())
    }

    /// True when the latest document was asked for but it is not dated `today`.
    ///
    /// The bank publishes on weekdays in the afternoon; before that the alias
    /// still serves the previous bulletin.
    pub fn rates_pending(&self, today: NaiveDate) -> bool {
        self.board
            .as_ref()
            .is_some_and(|board| board.day == RateDay::Today && board.as_of != Some(today))
    }
}
