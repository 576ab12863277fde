use crate::core::currency::{Currency, RateSnapshot};
use crate::core::rates::{RateDay, RateError, RateProvider};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use tracing::{debug, instrument, warn};

pub const DEFAULT_BASE_URL: &str = "https://www.tcmb.gov.tr/kurlar";

/// Where the document for `day` lives.
///
/// The latest bulletin has a fixed alias; older ones are filed by month as
/// `{YYYY}{MM}/{DD}{MM}{YYYY}.xml`.
pub fn document_url(base_url: &str, day: RateDay) -> String {
    let base_url = base_url.trim_end_matches('/');
    match day {
        RateDay::Today => format!("{base_url}/today.xml"),
        RateDay::On(date) => {
            let (year, month, day) = (date.year(), date.month(), date.day());
            format!("{base_url}/{year:04}{month:02}/{day:02}{month:02}{year:04}.xml")
        }
    }
}

// TCMB daily bulletin (`Tarih_Date` root)
#[derive(Debug, Deserialize)]
struct TcmbDocument {
    #[serde(rename = "@Tarih", default)]
    tarih: Option<String>,
    #[serde(rename = "@Date", default)]
    date: Option<String>,
    #[serde(rename = "Currency", default)]
    currencies: Vec<TcmbCurrency>,
}

#[derive(Debug, Deserialize)]
struct TcmbCurrency {
    #[serde(rename = "@CurrencyCode", default)]
    code: Option<String>,
    #[serde(rename = "Unit", default)]
    unit: Option<String>,
    #[serde(rename = "Isim", default)]
    name: Option<String>,
    #[serde(rename = "CurrencyName", default)]
    english_name: Option<String>,
    #[serde(rename = "ForexBuying", default)]
    forex_buying: Option<String>,
    #[serde(rename = "ForexSelling", default)]
    forex_selling: Option<String>,
    #[serde(rename = "BanknoteBuying", default)]
    banknote_buying: Option<String>,
    #[serde(rename = "BanknoteSelling", default)]
    banknote_selling: Option<String>,
}

/// Empty and whitespace-only elements count as missing.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Non-numeric rates read as zero; the record may still be quoted by its other rate.
fn parse_rate(code: &str, field: &str, raw: &str) -> Decimal {
    Decimal::from_str(raw).unwrap_or_else(|e| {
        warn!("{field} '{raw}' for {code} is not a number ({e}), using 0");
        Decimal::ZERO
    })
}

impl TcmbCurrency {
    fn resolve_name(&self) -> String {
        present(&self.name).unwrap_or_default().to_string()
    }

    fn resolve_english_name(&self) -> Option<String> {
        present(&self.english_name).map(str::to_string)
    }

    fn resolve_buying(&self) -> &str {
        present(&self.forex_buying).unwrap_or("0")
    }

    fn resolve_selling(&self) -> &str {
        present(&self.forex_selling).unwrap_or("0")
    }

    /// Falls back to the forex buying rate.
    fn resolve_banknote_buying(&self) -> &str {
        present(&self.banknote_buying).unwrap_or_else(|| self.resolve_buying())
    }

    /// Falls back to the forex selling rate.
    fn resolve_banknote_selling(&self) -> &str {
        present(&self.banknote_selling).unwrap_or_else(|| self.resolve_selling())
    }

    /// Falls back to 1, also for values that are not a positive integer.
    fn resolve_unit(&self, code: &str) -> u32 {
        match present(&self.unit) {
            None => 1,
            Some(raw) => match raw.parse::<u32>() {
                Ok(unit) if unit > 0 => unit,
                _ => {
                    warn!("Invalid unit '{raw}' for {code}, using 1");
                    1
                }
            },
        }
    }

    fn into_currency(self) -> Option<Currency> {
        let code = present(&self.code)?.to_string();
        let currency = Currency {
            buying: parse_rate(&code, "ForexBuying", self.resolve_buying()),
            selling: parse_rate(&code, "ForexSelling", self.resolve_selling()),
            banknote_buying: parse_rate(&code, "BanknoteBuying", self.resolve_banknote_buying()),
            banknote_selling: parse_rate(&code, "BanknoteSelling", self.resolve_banknote_selling()),
            unit: self.resolve_unit(&code),
            name: self.resolve_name(),
            english_name: self.resolve_english_name(),
            code,
            yesterday_buying: None,
            yesterday_selling: None,
        };
        currency.is_quoted().then_some(currency)
    }
}

fn parse_document_date(document: &TcmbDocument) -> Option<NaiveDate> {
    present(&document.tarih)
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%d.%m.%Y").ok())
        .or_else(|| {
            present(&document.date).and_then(|raw| NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok())
        })
}

/// Parses a bulletin into a snapshot, keeping only quoted currencies.
pub fn parse_document(xml: &str) -> Result<RateSnapshot, quick_xml::DeError> {
    let document: TcmbDocument = quick_xml::de::from_str(xml)?;
    let as_of = parse_document_date(&document);
    let currencies = document
        .currencies
        .into_iter()
        .filter_map(TcmbCurrency::into_currency)
        .collect();
    Ok(RateSnapshot { as_of, currencies })
}

pub struct TcmbProvider {
    base_url: String,
    client: reqwest::Client,
}

impl TcmbProvider {
    pub fn new(base_url: &str) -> Result<Self, RateError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("kurlar/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RateError::Network {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;
        Ok(TcmbProvider {
            base_url: base_url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl RateProvider for TcmbProvider {
    #[instrument(name = "TcmbRatesFetch", skip(self), fields(day = %day))]
    async fn fetch_rates(&self, day: RateDay) -> Result<RateSnapshot, RateError> {
        let url = document_url(&self.base_url, day);
        debug!("Requesting rates from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RateError::Network {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(RateError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let text = response.text().await.map_err(|e| RateError::Network {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let snapshot = parse_document(&text).map_err(|e| RateError::Parse {
            url: url.clone(),
            message: e.to_string(),
        })?;

        debug!(
            "Parsed {} currencies from {} (as of {:?})",
            snapshot.currencies.len(),
            url,
            snapshot.as_of
        );
        Ok(snapshot)
    }
}
