pub mod convert;
pub mod favorites;
pub mod rates;
pub mod selection;
pub mod setup;
pub mod ui;

use crate::core::loader::RateBoard;
use crate::core::{RateDay, RateSession};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

/// Maps an optional `--date` to the document to request.
///
/// Today's date uses the latest-bulletin alias. Dates after today are rejected.
pub fn resolve_day(date: Option<NaiveDate>, today: NaiveDate) -> Result<RateDay> {
    match date {
        None => Ok(RateDay::Today),
        Some(date) if date > today => bail!("Date {date} is in the future"),
        Some(date) if date == today => Ok(RateDay::Today),
        Some(date) => Ok(RateDay::On(date)),
    }
}

pub(crate) async fn load_with_spinner<'a>(
    session: &'a mut RateSession,
    day: RateDay,
    today: NaiveDate,
) -> Result<&'a RateBoard> {
    let pb = ui::new_spinner(&format!("Fetching rates for {day}"));
    let result = session.load_as_of(day, today).await;
    pb.finish_and_clear();
    result.with_context(|| format!("Could not load exchange rates for {day}"))
}
