use super::ui::{self, StyleType};
use crate::core::config::DisplayConfig;
use crate::core::conversion::ConversionError;
use crate::core::{RateDay, RateSession};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertRequest {
    amount: Decimal,
    from: String,
    to: String,
    day: RateDay,
}

impl ConvertRequest {
    /// Rejects negative amounts.
    pub fn new(amount: Decimal, from: &str, to: &str, day: RateDay) -> Result<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            bail!("Amount must not be negative: {amount}");
        }
        Ok(Self {
            amount,
            from: from.to_string(),
            to: to.to_string(),
            day,
        })
    }
}

pub async fn run(
    session: &mut RateSession,
    request: &ConvertRequest,
    display: &DisplayConfig,
    today: NaiveDate,
) -> Result<Decimal> {
    super::load_with_spinner(session, request.day, today).await?;

    let result = match session.convert(request.amount, &request.from, &request.to) {
        Ok(result) => result,
        Err(e @ ConversionError::NotFound(_)) => {
            eprintln!("{}", ui::style_text(&e.to_string(), StyleType::Error));
            eprintln!("Available currencies: {}", available_codes(session));
            return Err(e).with_context(|| {
                format!("Cannot convert {} to {}", request.from, request.to)
            });
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Cannot convert {} to {}", request.from, request.to)
            });
        }
    };

    println!(
        "{} {} = {} {}",
        ui::format_decimal(request.amount, display),
        request.from,
        ui::style_text(&ui::format_decimal(result, display), StyleType::TotalValue),
        request.to
    );
    Ok(result)
}

pub(crate) fn available_codes(session: &RateSession) -> String {
    session
        .conversion_targets()
        .iter()
        .map(|target| target.code.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
