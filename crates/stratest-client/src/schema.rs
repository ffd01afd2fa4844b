use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/fetch-data`.
/// ```json
/// { "success": true }
/// ```
/// The server may put a message string in `success` instead of a bool.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct FetchResponse {
    #[serde(default)]
    pub success: Value,
}

/// Body of `POST /api/generate-report`.
/// ```json
/// { "success": { "start_date": "2020-01-03", "buy_price": 250.0, ... } }
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ReportResponse {
    #[serde(default)]
    pub success: Value,
}

/// Body of `POST /api/show-history`.
/// ```json
/// { "success": true, "ticker": "SBER", "html_table": "<table ...>...</table>" }
/// { "success": false, "error": "..." }
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct HistoryPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub html_table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a data fetch, as the server reported it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl From<FetchResponse> for FetchOutcome {
    fn from(response: FetchResponse) -> Self {
        let message = response.success.as_str().map(str::to_string);
        FetchOutcome {
            success: is_truthy(&response.success),
            message,
        }
    }
}

/// Truthiness of a JSON value as a browser script sees it.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
