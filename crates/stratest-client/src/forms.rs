use chrono::NaiveDate;
use reqwest::multipart::Form;

use crate::error::{Error, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields of the data fetch form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchForm {
    pub ticker: String,
    /// First day of the requested history, `YYYY-MM-DD`.
    pub start: String,
    /// Last day of the requested history, `YYYY-MM-DD`.
    pub end: String,
}

impl FetchForm {
    pub fn new(
        ticker: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        required("ticker", &self.ticker)?;
        date("start", &self.start)?;
        date("end", &self.end)?;
        Ok(())
    }

    pub fn to_multipart(&self) -> Form {
        Form::new()
            .text("ticker", self.ticker.trim().to_string())
            .text("start", self.start.trim().to_string())
            .text("end", self.end.trim().to_string())
    }
}

/// Fields of the report form: the strategy parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportForm {
    pub ticker: String,
    pub initial_cache: f64,
    pub buy_price: f64,
    pub sell_price: f64,
    pub commission_rate: f64,
    pub tax_rate: f64,
}

impl ReportForm {
    fn numbers(&self) -> [(&'static str, f64); 5] {
        [
            ("initial_cache", self.initial_cache),
            ("buy_price", self.buy_price),
            ("sell_price", self.sell_price),
            ("commission_rate", self.commission_rate),
            ("tax_rate", self.tax_rate),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        required("ticker", &self.ticker)?;
        for (name, value) in self.numbers() {
            if !value.is_finite() {
                return Err(Error::Validation(format!("Некорректное значение поля {name}")));
            }
        }
        Ok(())
    }

    pub fn to_multipart(&self) -> Form {
        self.numbers().into_iter().fold(
            Form::new().text("ticker", self.ticker.trim().to_string()),
            |form, (name, value)| form.text(name, value.to_string()),
        )
    }
}

fn required(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("Заполните поле {name}")));
    }
    Ok(())
}

fn date(name: &str, value: &str) -> Result<NaiveDate> {
    required(name, value)?;
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| Error::Validation(format!("Некорректная дата в поле {name}: {value}")))
}
