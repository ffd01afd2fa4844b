use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::format::{self, NumberLocale};
use crate::labels::{self, COMMISSION_KEY};

pub const CAPTION: &str = "Отчет по торговой стратегии";
pub const HEADERS: [&str; 2] = ["Параметр", "Значение"];

/// Fraction digits shown for the commission rate.
const COMMISSION_DIGITS: usize = 5;

/// A single value of the strategy result set.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportValue {
    Number(f64),
    Text(String),
}

impl From<Value> for ReportValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(f) => ReportValue::Number(f),
                None => ReportValue::Text(n.to_string()),
            },
            Value::String(s) => ReportValue::Text(s),
            Value::Null => ReportValue::Text(String::new()),
            other => ReportValue::Text(other.to_string()),
        }
    }
}

impl ReportValue {
    /// Render the value the way the report table shows it for `key`.
    pub fn display(&self, key: &str, locale: NumberLocale) -> String {
        match self {
            ReportValue::Number(n) if key == COMMISSION_KEY => format::fixed(*n, COMMISSION_DIGITS),
            ReportValue::Number(n) => format::grouped(*n, locale),
            ReportValue::Text(s) => s.clone(),
        }
    }
}

/// Flat result set of a strategy run, in the order the server sent it.
///
/// Reads and writes as a JSON object, so a saved result can be fed back to
/// `stratest render`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportResult(pub Vec<(String, ReportValue)>);

impl ReportResult {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReportValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Map<String, Value>> for ReportResult {
    fn from(map: Map<String, Value>) -> Self {
        ReportResult(map.into_iter().map(|(k, v)| (k, ReportValue::from(v))).collect())
    }
}

impl Serialize for ReportResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for ReportResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(ReportResult::from(map))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportRow {
    pub key: String,
    pub label: String,
    pub value: String,
}

/// Two-column table describing a [`ReportResult`], ready for any renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportTable {
    pub caption: String,
    pub headers: [String; 2],
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Build the table: one row per entry of `result`, in order, labelled
    /// through the dictionary and formatted per field.
    pub fn build(result: &ReportResult, locale: NumberLocale) -> Self {
        let rows = result
            .iter()
            .map(|(key, value)| ReportRow {
                key: key.to_string(),
                label: labels::label(key).to_string(),
                value: value.display(key, locale),
            })
            .collect();

        ReportTable {
            caption: CAPTION.to_string(),
            headers: HEADERS.map(String::from),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportResult {
        serde_json::from_str(
            r#"{
                "start_date": "2020-01-03",
                "initial_cache": 1234567.8,
                "comission_percent": 0.123456,
                "buy_count": 12,
                "custom_field": "as is"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn rows_follow_result_order() {
        let table = ReportTable::build(&sample(), NumberLocale::EnUs);
        let keys: Vec<_> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(
            keys,
            ["start_date", "initial_cache", "comission_percent", "buy_count", "custom_field"]
        );
        assert_eq!(table.rows.len(), sample().len());
        assert_eq!(table.headers, ["Параметр", "Значение"]);
    }

    #[test]
    fn values_are_formatted_per_field() {
        let table = ReportTable::build(&sample(), NumberLocale::EnUs);
        let value = |key: &str| {
            table.rows.iter().find(|r| r.key == key).map(|r| r.value.clone()).unwrap()
        };
        assert_eq!(value("comission_percent"), "0.12346");
        assert_eq!(value("initial_cache"), "1,234,567.8");
        assert_eq!(value("buy_count"), "12");
        assert_eq!(value("start_date"), "2020-01-03");
        assert_eq!(value("custom_field"), "as is");
    }

    #[test]
    fn labels_fall_back_to_key() {
        let table = ReportTable::build(&sample(), NumberLocale::EnUs);
        assert_eq!(table.rows[0].label, "Дата начала");
        assert_eq!(table.rows[4].label, "custom_field");
    }

    #[test]
    fn commission_as_text_is_left_alone() {
        let result = ReportResult(vec![(
            COMMISSION_KEY.to_string(),
            ReportValue::Text("0.1".to_string()),
        )]);
        let table = ReportTable::build(&result, NumberLocale::EnUs);
        assert_eq!(table.rows[0].value, "0.1");
    }

    #[test]
    fn non_scalar_values_become_text() {
        assert_eq!(ReportValue::from(Value::Null), ReportValue::Text(String::new()));
        assert_eq!(ReportValue::from(Value::Bool(true)), ReportValue::Text("true".into()));
        assert_eq!(ReportValue::from(serde_json::json!(7)), ReportValue::Number(7.0));
    }

    #[test]
    fn result_reads_back_what_it_writes() {
        let result: ReportResult =
            serde_json::from_str(r#"{"buy_price":250.5,"start_date":"2024-01-03"}"#).unwrap();
        let written = serde_json::to_string(&result).unwrap();
        assert_eq!(written, r#"{"buy_price":250.5,"start_date":"2024-01-03"}"#);

        let read_back: ReportResult = serde_json::from_str(&written).unwrap();
        assert_eq!(read_back, result);

        let full = serde_json::to_string(&sample()).unwrap();
        assert_eq!(serde_json::from_str::<ReportResult>(&full).unwrap(), sample());
    }

    #[test]
    fn empty_result_gives_header_only_table() {
        let table = ReportTable::build(&ReportResult::default(), NumberLocale::RuRu);
        assert!(table.rows.is_empty());
        assert_eq!(table.caption, CAPTION);
    }
}
