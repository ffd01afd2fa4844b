//! The three user-facing flows: fetch data, generate a report, show history.
//!
//! Each flow runs one request to completion and reports back only through
//! the adapter traits below, so any surface (terminal, window, test double)
//! can host it.

use reqwest::Client;
use std::future::Future;
use stratest_report::{HistoryPage, ReportTable};

use crate::client_ext::api::ClientApiExt;
use crate::config::Config;
use crate::error::Error;
use crate::forms::{FetchForm, ReportForm};

/// User-facing notification texts.
pub mod messages {
    pub const FETCH_OK: &str = "Data fetched successfully!";
    pub const FETCH_FAILED: &str = "Failed to fetch data.";
    pub const EMPTY_TICKER: &str = "Пожалуйста, введите тикер";
    pub const HISTORY_FAILED: &str = "Не удалось загрузить историю";
    pub const REPORT_FAILED: &str = "Не удалось сформировать отчет";
    pub const NETWORK_ERROR: &str = "Произошла ошибка при загрузке данных";
    pub const LOADING: &str = "Загрузка...";
    pub const SHOW_HISTORY: &str = "Показать историю";
}

/// Blocking, one-line notification.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Control that starts a flow and is locked while the flow runs.
pub trait Trigger {
    fn label(&self) -> String;
    fn set_label(&mut self, label: &str);
    fn set_disabled(&mut self, disabled: bool);
}

/// Container the report table is rendered into.
pub trait ReportView {
    /// Replace any previous content with `table`.
    fn replace(&mut self, table: &ReportTable) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Surface that shows a history page on its own, like a new browser window.
pub trait PageSink {
    fn open(&self, page: &HistoryPage) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// How a flow ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowOutcome {
    Completed,
    /// Input was invalid; nothing was sent.
    Rejected,
    /// The server answered and reported a failure.
    ServerFailure,
    /// No usable answer: transport error, bad status or unexpected body.
    NetworkFailure,
}

/// Disables a [`Trigger`] and shows a loading label until dropped, then
/// re-enables it with the label it had before.
pub struct Loading<'a, T: Trigger> {
    trigger: &'a mut T,
    original: String,
}

impl<'a, T: Trigger> Loading<'a, T> {
    pub fn start(trigger: &'a mut T, label: &str) -> Self {
        let original = trigger.label();
        trigger.set_disabled(true);
        trigger.set_label(label);
        Self { trigger, original }
    }
}

impl<T: Trigger> Drop for Loading<'_, T> {
    fn drop(&mut self) {
        self.trigger.set_disabled(false);
        self.trigger.set_label(&self.original);
    }
}

/// Plain in-memory [`Trigger`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub disabled: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
        }
    }
}

impl Default for Button {
    fn default() -> Self {
        Button::new(messages::SHOW_HISTORY)
    }
}

impl Trigger for Button {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

fn fail<N: Notifier>(error: Error, notifier: &N, message: &str) -> FlowOutcome {
    match error {
        Error::Validation(reason) => {
            log::warn!("input rejected: {reason}");
            notifier.notify(&reason);
            FlowOutcome::Rejected
        }
        e if e.is_network() => {
            log::error!("request failed: {e}");
            notifier.notify(message);
            FlowOutcome::NetworkFailure
        }
        e => {
            log::error!("client not usable: {e}");
            notifier.notify(message);
            FlowOutcome::NetworkFailure
        }
    }
}

/// Submit the fetch form and notify whether the server stored the data.
pub async fn fetch_data_flow<N: Notifier>(
    client: &Client,
    config: &Config,
    form: &FetchForm,
    notifier: &N,
) -> FlowOutcome {
    match client.fetch_data(config, form).await {
        Ok(outcome) if outcome.success => {
            if let Some(message) = &outcome.message {
                log::info!("{message}");
            }
            notifier.notify(messages::FETCH_OK);
            FlowOutcome::Completed
        }
        Ok(_) => {
            notifier.notify(messages::FETCH_FAILED);
            FlowOutcome::ServerFailure
        }
        Err(e) => fail(e, notifier, messages::NETWORK_ERROR),
    }
}

/// Submit the report form and render the result into `view`.
///
/// The view is only touched once a result is in hand.
pub async fn generate_report_flow<N: Notifier, V: ReportView>(
    client: &Client,
    config: &Config,
    form: &ReportForm,
    notifier: &N,
    view: &mut V,
) -> FlowOutcome {
    let result = match client.generate_report(config, form).await {
        Ok(result) => result,
        Err(e) => return fail(e, notifier, messages::REPORT_FAILED),
    };
    log::info!("report for {} holds {} fields", form.ticker.trim(), result.len());

    let table = ReportTable::build(&result, config.locale);
    match view.replace(&table).await {
        Ok(()) => FlowOutcome::Completed,
        Err(e) => {
            log::error!("failed to render report: {e:#}");
            notifier.notify(messages::REPORT_FAILED);
            FlowOutcome::NetworkFailure
        }
    }
}

/// Fetch the history table of `ticker` and open it as a standalone page.
///
/// A blank ticker is rejected without a request. Otherwise `trigger` stays
/// disabled, showing the loading label, until the flow returns.
pub async fn show_history_flow<N, T, S>(
    client: &Client,
    config: &Config,
    ticker: &str,
    notifier: &N,
    trigger: &mut T,
    sink: &S,
) -> FlowOutcome
where
    N: Notifier,
    T: Trigger,
    S: PageSink,
{
    let ticker = ticker.trim();
    if ticker.is_empty() {
        notifier.notify(messages::EMPTY_TICKER);
        return FlowOutcome::Rejected;
    }

    let _loading = Loading::start(trigger, messages::LOADING);

    let payload = match client.show_history(config, ticker).await {
        Ok(payload) => payload,
        Err(e) => return fail(e, notifier, messages::NETWORK_ERROR),
    };

    if !payload.success {
        let message = payload
            .error
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| messages::HISTORY_FAILED.to_string());
        log::warn!("history for {ticker} refused: {message}");
        notifier.notify(&message);
        return FlowOutcome::ServerFailure;
    }

    let shown = payload
        .ticker
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| ticker.to_string());
    let page = HistoryPage::new(shown, payload.html_table.as_deref().unwrap_or_default());
    let summary = page.summary();
    log::info!(
        "history for {}: {} rows, {} increases, {} decreases",
        page.ticker(),
        summary.rows,
        summary.increases,
        summary.decreases
    );

    match sink.open(&page).await {
        Ok(()) => FlowOutcome::Completed,
        Err(e) => {
            log::error!("failed to open history page: {e:#}");
            notifier.notify(messages::NETWORK_ERROR);
            FlowOutcome::NetworkFailure
        }
    }
}
