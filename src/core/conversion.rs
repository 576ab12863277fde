//! Cross-currency conversion through the domestic currency.
//!
//! Money leaving the pivot is bought at the bank's selling rate, money coming
//! back is sold at its buying rate, so a round trip loses the spread.

use crate::core::currency::{Currency, PIVOT_CODE, PIVOT_NAME};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Currency not found: {0}")]
    NotFound(String),
    #[error("No buying rate quoted for {0}")]
    ZeroRate(String),
    #[error("Conversion overflowed")]
    Overflow,
}

/// A currency that can appear on either side of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTarget {
    pub code: String,
    pub name: String,
    pub unit: u32,
}

pub fn convert(
    amount: Decimal,
    from_code: &str,
    to_code: &str,
    currencies: &[Currency],
) -> Result<Decimal, ConversionError> {
    if from_code == PIVOT_CODE && to_code == PIVOT_CODE {
        return Ok(amount);
    }

    let from = resolve(from_code, currencies)?;
    let to = resolve(to_code, currencies)?;

    let pivot_amount = match from {
        None => amount,
        Some(from) => amount
            .checked_mul(from.selling)
            .and_then(|v| v.checked_div(Decimal::from(from.unit)))
            .ok_or(ConversionError::Overflow)?,
    };

    let result = match to {
        None => pivot_amount,
        Some(to) => {
            if to.buying.is_zero() {
                return Err(ConversionError::ZeroRate(to.code.clone()));
            }
            pivot_amount
                .checked_mul(Decimal::from(to.unit))
                .and_then(|v| v.checked_div(to.buying))
                .ok_or(ConversionError::Overflow)?
        }
    };

    debug!("Converted {amount} {from_code} to {result} {to_code}");
    Ok(result)
}

/// `None` stands for the pivot currency.
fn resolve<'a>(
    code: &str,
    currencies: &'a [Currency],
) -> Result<Option<&'a Currency>, ConversionError> {
    if code == PIVOT_CODE {
        return Ok(None);
    }
    currencies
        .iter()
        .find(|c| c.code == code)
        .map(Some)
        .ok_or_else(|| ConversionError::NotFound(code.to_string()))
}

/// The pivot followed by every quoted currency, in board order.
pub fn conversion_targets(currencies: &[Currency]) -> Vec<ConversionTarget> {
    std::iter::once(ConversionTarget {
        code: PIVOT_CODE.to_string(),
        name: PIVOT_NAME.to_string(),
        unit: 1,
    })
    .chain(currencies.iter().map(|c| ConversionTarget {
        code: c.code.clone(),
        name: c.name.clone(),
        unit: c.unit,
    }))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::tests::currency;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn board() -> Vec<Currency> {
        let mut jpy = currency("JPY", dec!(22.1540), dec!(22.3010));
        jpy.unit = 100;
        vec![
            currency("USD", dec!(33.80), dec!(34.00)),
            currency("EUR", dec!(36.90), dec!(37.05)),
            jpy,
        ]
    }

    #[test]
    fn test_pivot_to_pivot_is_identity() {
        assert_eq!(convert(dec!(100), PIVOT_CODE, PIVOT_CODE, &[]), Ok(dec!(100)));
    }

    #[test]
    fn test_foreign_to_pivot_uses_selling_rate() {
        assert_eq!(convert(dec!(10), "USD", PIVOT_CODE, &board()), Ok(dec!(340.00)));
    }

    #[test]
    fn test_pivot_to_foreign_uses_buying_rate() {
        assert_eq!(convert(dec!(338), PIVOT_CODE, "USD", &board()), Ok(dec!(10)));
    }

    #[test]
    fn test_unit_is_respected() {
        // 1000 JPY at 22.3010 per 100 JPY
        assert_eq!(
            convert(dec!(1000), "JPY", PIVOT_CODE, &board()),
            Ok(dec!(223.010))
        );
        assert_eq!(
            convert(dec!(221.540), PIVOT_CODE, "JPY", &board()),
            Ok(dec!(1000))
        );
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(
            convert(dec!(1), "XXX", PIVOT_CODE, &board()),
            Err(ConversionError::NotFound("XXX".to_string()))
        );
        assert_eq!(
            convert(dec!(1), PIVOT_CODE, "XXX", &board()),
            Err(ConversionError::NotFound("XXX".to_string()))
        );
        assert_eq!(
            convert(dec!(1), "USD", "XXX", &board()),
            Err(ConversionError::NotFound("XXX".to_string()))
        );
    }

    #[test]
    fn test_zero_buying_rate() {
        let board = vec![currency("XDR", dec!(0), dec!(45.5))];
        assert_eq!(
            convert(dec!(1), PIVOT_CODE, "XDR", &board),
            Err(ConversionError::ZeroRate("XDR".to_string()))
        );
        assert_eq!(convert(dec!(2), "XDR", PIVOT_CODE, &board), Ok(dec!(91.0)));
    }

    #[test]
    fn test_conversion_targets_start_with_pivot() {
        let targets = conversion_targets(&board());
        let codes: Vec<_> = targets.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, vec!["TRY", "USD", "EUR", "JPY"]);
        assert_eq!(targets[0].name, PIVOT_NAME);
        assert_eq!(targets[3].unit, 100);
    }

    proptest! {
        #[test]
        fn prop_cross_conversion_goes_through_pivot(cents in 0u64..100_000_000) {
            let amount = Decimal::new(cents as i64, 2);
            let board = board();
            let direct = convert(amount, "USD", "EUR", &board).unwrap();
            let pivot = convert(amount, "USD", PIVOT_CODE, &board).unwrap();
            let chained = convert(pivot, PIVOT_CODE, "EUR", &board).unwrap();
            prop_assert_eq!(direct, chained);
        }
    }
}
