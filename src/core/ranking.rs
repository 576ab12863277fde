//! Stable partitions that move well-known codes to the front.

use crate::core::currency::Currency;
use std::collections::BTreeSet;

/// Commonly traded codes, shown before everything else.
pub const POPULAR_CURRENCIES: [&str; 11] = [
    "USD", "EUR", "GBP", "JPY", "CHF", "AUD", "CAD", "RUB", "CNY", "SAR", "AED",
];

pub fn is_popular(code: &str) -> bool {
    POPULAR_CURRENCIES.contains(&code)
}

/// Popular codes first, then the rest. Relative order inside each group is kept.
pub fn rank_by_popularity(currencies: Vec<Currency>) -> Vec<Currency> {
    let (mut popular, others): (Vec<_>, Vec<_>) =
        currencies.into_iter().partition(|c| is_popular(&c.code));
    popular.extend(others);
    popular
}

/// Favorites first, then the rest. Used by the table view.
pub fn favorites_first<'a>(
    currencies: Vec<&'a Currency>,
    favorites: &BTreeSet<String>,
) -> Vec<&'a Currency> {
    let (mut starred, others): (Vec<_>, Vec<_>) = currencies
        .into_iter()
        .partition(|c| favorites.contains(&c.code));
    starred.extend(others);
    starred
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::tests::currency;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn codes(currencies: &[Currency]) -> Vec<&str> {
        currencies.iter().map(|c| c.code.as_str()).collect()
    }

    fn list(codes: &[&str]) -> Vec<Currency> {
        codes
            .iter()
            .map(|c| currency(c, Decimal::ONE, Decimal::ONE))
            .collect()
    }

    #[test]
    fn test_popular_codes_move_to_front() {
        let ranked = rank_by_popularity(list(&["DKK", "EUR", "KWD", "USD", "SEK", "JPY"]));
        assert_eq!(codes(&ranked), vec!["EUR", "USD", "JPY", "DKK", "KWD", "SEK"]);
    }

    #[test]
    fn test_empty_list() {
        assert!(rank_by_popularity(Vec::new()).is_empty());
    }

    #[test]
    fn test_favorites_first_keeps_order() {
        let currencies = list(&["USD", "EUR", "GBP", "DKK"]);
        let favorites = BTreeSet::from(["DKK".to_string(), "EUR".to_string()]);
        let sorted = favorites_first(currencies.iter().collect(), &favorites);
        let sorted: Vec<_> = sorted.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(sorted, vec!["EUR", "DKK", "USD", "GBP"]);
    }

    fn code_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            proptest::sample::select(POPULAR_CURRENCIES.to_vec()).prop_map(String::from),
            "[K-Z]{3}",
        ]
    }

    proptest! {
        #[test]
        fn prop_rank_is_stable_partition(input in proptest::collection::vec(code_strategy(), 0..20)) {
            let tagged: Vec<Currency> = input
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let mut record = currency(c, Decimal::ONE, Decimal::ONE);
                    record.name = i.to_string();
                    record
                })
                .collect();

            let ranked = rank_by_popularity(tagged.clone());
            prop_assert_eq!(ranked.len(), tagged.len());

            let boundary = ranked.iter().take_while(|c| is_popular(&c.code)).count();
            prop_assert!(ranked[boundary..].iter().all(|c| !is_popular(&c.code)));

            let expected_popular: Vec<_> = tagged.iter().filter(|c| is_popular(&c.code)).collect();
            let expected_others: Vec<_> = tagged.iter().filter(|c| !is_popular(&c.code)).collect();
            prop_assert_eq!(ranked[..boundary].iter().collect::<Vec<_>>(), expected_popular);
            prop_assert_eq!(ranked[boundary..].iter().collect::<Vec<_>>(), expected_others);
        }
    }
}
