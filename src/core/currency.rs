//! Exchange-rate quote model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Code of the domestic currency. Every quote is a price in this currency.
pub const PIVOT_CODE: &str = "TRY";

/// Display name of the pivot currency in the source locale.
pub const PIVOT_NAME: &str = "Türk Lirası";

/// One exchange-rate quote for a calendar day.
///
/// All rates are the domestic price of `unit` foreign units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub english_name: Option<String>,
    pub buying: Decimal,
    pub selling: Decimal,
    pub banknote_buying: Decimal,
    pub banknote_selling: Decimal,
    pub unit: u32,
    pub yesterday_buying: Option<Decimal>,
    pub yesterday_selling: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateChange {
    Increase,
    Decrease,
}

impl Currency {
    /// A record is worth keeping only if it has a code and quotes something.
    pub fn is_quoted(&self) -> bool {
        !self.code.is_empty() && (!self.buying.is_zero() || !self.selling.is_zero())
    }

    /// Code with the quoting unit appended when it is not 1, e.g. `JPY (100)`.
    pub fn display_code(&self) -> String {
        if self.unit > 1 {
            format!("{} ({})", self.code, self.unit)
        } else {
            self.code.clone()
        }
    }

    pub fn buying_change(&self) -> Option<RateChange> {
        change_between(self.buying, self.yesterday_buying)
    }

    pub fn selling_change(&self) -> Option<RateChange> {
        change_between(self.selling, self.yesterday_selling)
    }
}

fn change_between(today: Decimal, yesterday: Option<Decimal>) -> Option<RateChange> {
    let yesterday = yesterday.filter(|y| !y.is_zero())?;
    if today > yesterday {
        Some(RateChange::Increase)
    } else if today < yesterday {
        Some(RateChange::Decrease)
    } else {
        None
    }
}

/// A parsed daily rate document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateSnapshot {
    /// Publication date carried by the document itself.
    pub as_of: Option<NaiveDate>,
    pub currencies: Vec<Currency>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    pub(crate) fn currency(code: &str, buying: Decimal, selling: Decimal) -> Currency {
        Currency {
            code: code.to_string(),
            name: format!("{code} name"),
            english_name: None,
            buying,
            selling,
            banknote_buying: buying,
            banknote_selling: selling,
            unit: 1,
            yesterday_buying: None,
            yesterday_selling: None,
        }
    }

    #[test]
    fn test_is_quoted_requires_code_and_a_rate() {
        assert!(currency("USD", dec!(33.8), dec!(34)).is_quoted());
        assert!(currency("USD", dec!(0), dec!(34)).is_quoted());
        assert!(!currency("USD", dec!(0), dec!(0.0000)).is_quoted());
        assert!(!currency("", dec!(1), dec!(1)).is_quoted());
    }

    #[test]
    fn test_display_code_includes_unit() {
        let mut jpy = currency("JPY", dec!(22.5), dec!(22.6));
        assert_eq!(jpy.display_code(), "JPY");
        jpy.unit = 100;
        assert_eq!(jpy.display_code(), "JPY (100)");
    }

    #[test]
    fn test_rate_change_direction() {
        let mut usd = currency("USD", dec!(34.10), dec!(34.20));
        assert_eq!(usd.buying_change(), None);

        usd.yesterday_buying = Some(dec!(34.00));
        usd.yesterday_selling = Some(dec!(34.30));
        assert_eq!(usd.buying_change(), Some(RateChange::Increase));
        assert_eq!(usd.selling_change(), Some(RateChange::Decrease));

        usd.yesterday_buying = Some(dec!(34.10));
        assert_eq!(usd.buying_change(), None);

        usd.yesterday_selling = Some(Decimal::ZERO);
        assert_eq!(usd.selling_change(), None);
    }
}
