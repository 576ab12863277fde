use crate::core::currency::Currency;
use std::collections::BTreeSet;

/// Whether `currency` is visible under `selection` and `search_term`.
///
/// An empty selection does not restrict anything. The search term is trimmed
/// and matched case-insensitively against the code and the localized name.
pub fn include(currency: &Currency, selection: &BTreeSet<String>, search_term: &str) -> bool {
    if !selection.is_empty() && !selection.contains(&currency.code) {
        return false;
    }

    let term = search_term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    currency.code.to_lowercase().contains(&term) || currency.name.to_lowercase().contains(&term)
}

pub fn filter_currencies<'a>(
    currencies: &'a [Currency],
    selection: &BTreeSet<String>,
    search_term: &str,
) -> Vec<&'a Currency> {
    currencies
        .iter()
        .filter(|c| include(c, selection, search_term))
        .collect()
}
