use crate::core::currency::Currency;
use std::collections::HashMap;

/// Attaches the previous day's buying/selling rates to today's records.
///
/// Today's list decides which records exist; a code missing from `previous`
/// leaves the comparison fields empty. Duplicate codes in `previous` resolve
/// to their first occurrence.
pub fn merge_with_previous_day(today: Vec<Currency>, previous: &[Currency]) -> Vec<Currency> {
    let mut by_code: HashMap<&str, &Currency> = HashMap::with_capacity(previous.len());
    for currency in previous {
        by_code.entry(currency.code.as_str()).or_insert(currency);
    }

    today
        .into_iter()
        .map(|mut currency| {
            let matched = by_code.get(currency.code.as_str());
            currency.yesterday_buying = matched.map(|y| y.buying);
            currency.yesterday_selling = matched.map(|y| y.selling);
            currency
        })
        .collect()
}
