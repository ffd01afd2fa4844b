use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use stratest_report::ReportResult;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::forms::{FetchForm, ReportForm};
use crate::schema::{FetchOutcome, FetchResponse, HistoryPayload, ReportResponse};

pub const FETCH_DATA: &str = "/api/fetch-data";
pub const GENERATE_REPORT: &str = "/api/generate-report";
pub const SHOW_HISTORY: &str = "/api/show-history";

/// Calls to the strategy tester API.
pub trait ClientApiExt {
    fn fetch_data(
        &self,
        config: &Config,
        form: &FetchForm,
    ) -> impl Future<Output = Result<FetchOutcome>> + Send;

    fn generate_report(
        &self,
        config: &Config,
        form: &ReportForm,
    ) -> impl Future<Output = Result<ReportResult>> + Send;

    fn show_history(
        &self,
        config: &Config,
        ticker: &str,
    ) -> impl Future<Output = Result<HistoryPayload>> + Send;
}

/// Add-on methods for [`reqwest::Client`].
///
/// [`reqwest::Client`]: https://docs.rs/reqwest/latest/reqwest/struct.Client.html
impl ClientApiExt for Client {
    /// Ask the server to download and store the price history of a ticker.
    async fn fetch_data(&self, config: &Config, form: &FetchForm) -> Result<FetchOutcome> {
        form.validate()?;
        let url = config.endpoint(FETCH_DATA);
        log::debug!("POST {url} ({})", form.ticker);

        let response = self.post(&url).multipart(form.to_multipart()).send().await?;
        let body: FetchResponse = read_body(response, &url).await?;
        Ok(body.into())
    }

    /// Run the strategy on the server and return its flat result set.
    async fn generate_report(&self, config: &Config, form: &ReportForm) -> Result<ReportResult> {
        form.validate()?;
        let url = config.endpoint(GENERATE_REPORT);
        log::debug!("POST {url} ({})", form.ticker);

        let response = self.post(&url).multipart(form.to_multipart()).send().await?;
        let body: ReportResponse = read_body(response, &url).await?;
        match body.success {
            Value::Object(map) => Ok(ReportResult::from(map)),
            other => Err(Error::Malformed(format!(
                "expected an object in `success`, found {other}"
            ))),
        }
    }

    /// Fetch the pre-rendered results table of a ticker.
    async fn show_history(&self, config: &Config, ticker: &str) -> Result<HistoryPayload> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(Error::Validation("Пожалуйста, введите тикер".to_string()));
        }
        let url = config.endpoint(SHOW_HISTORY);
        log::debug!("POST {url} ({ticker})");

        // `.form()` sends application/x-www-form-urlencoded
        let response = self.post(&url).form(&[("ticker", ticker)]).send().await?;
        let payload: HistoryPayload = read_body(response, &url).await?;
        if payload.success && payload.html_table.is_none() {
            return Err(Error::Malformed(
                "`html_table` missing from a successful reply".to_string(),
            ));
        }
        Ok(payload)
    }
}

/// Check the status, then decode the JSON body.
async fn read_body<T: DeserializeOwned>(response: Response, url: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            status,
            url: url.to_string(),
        });
    }
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| Error::Malformed(e.to_string()))
}
