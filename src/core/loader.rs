use crate::core::currency::Currency;
use crate::core::ranking::rank_by_popularity;
use crate::core::rates::{RateDay, RateError, RateProvider};
use crate::core::reconcile::merge_with_previous_day;
use chrono::NaiveDate;
use futures::future::join;
use tracing::{debug, warn};

/// The rates produced by one load cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct RateBoard {
    pub day: RateDay,
    pub as_of: Option<NaiveDate>,
    /// Merged with the previous day and ranked by popularity.
    pub currencies: Vec<Currency>,
}

/// Fetches `day` and the day before it together and combines them.
///
/// Only the requested day is required; if the previous day cannot be
/// fetched the board is built without comparison values.
pub async fn load_rates(
    provider: &dyn RateProvider,
    day: RateDay,
    today: NaiveDate,
) -> Result<RateBoard, RateError> {
    let previous_day = RateDay::On(day.previous(today));
    debug!("Loading rates for {day}, comparing with {previous_day}");

    let (current, previous) = join(
        provider.fetch_rates(day),
        provider.fetch_rates(previous_day),
    )
    .await;

    let current = current?;
    let previous = match previous {
        Ok(snapshot) => snapshot.currencies,
        Err(e) => {
            warn!("Previous day data unavailable: {}", e);
            Vec::new()
        }
    };

    let merged = merge_with_previous_day(current.currencies, &previous);
    Ok(RateBoard {
        day,
        as_of: current.as_of,
        currencies: rank_by_popularity(merged),
    })
}
