//! Rate source abstractions

use crate::core::currency::RateSnapshot;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use std::fmt::Display;
use thiserror::Error;

/// The calendar day a rate document is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateDay {
    /// Latest published document, served under a fixed alias.
    Today,
    On(NaiveDate),
}

impl RateDay {
    /// The day whose rates are used for comparison.
    pub fn previous(&self, today: NaiveDate) -> NaiveDate {
        let base = match self {
            RateDay::Today => today,
            RateDay::On(date) => *date,
        };
        base.checked_sub_days(Days::new(1)).unwrap_or(base)
    }
}

impl Display for RateDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateDay::Today => write!(f, "today"),
            RateDay::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

#[derive(Debug, Error)]
pub enum RateError {
    #[error("Request error: {message} for URL: {url}")]
    Network { url: String, message: String },
    #[error("HTTP error: {status} for URL: {url}")]
    Status { url: String, status: u16 },
    #[error("Failed to parse rate document from {url}: {message}")]
    Parse { url: String, message: String },
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, day: RateDay) -> Result<RateSnapshot, RateError>;
}
