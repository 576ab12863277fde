//! Rate model, loading pipeline and the user's preference stores

pub mod config;
pub mod conversion;
pub mod currency;
pub mod favorites;
pub mod filter;
pub mod loader;
pub mod log;
pub mod ranking;
pub mod rates;
pub mod reconcile;
pub mod selection;
pub mod session;
pub mod storage;

// Re-export main types for cleaner imports
pub use currency::{Currency, PIVOT_CODE, RateSnapshot};
pub use rates::{RateDay, RateError, RateProvider};
pub use session::RateSession;
pub use storage::{CollectionStorage, PreferenceStorage};
