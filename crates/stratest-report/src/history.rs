//! Trading history viewer.
//!
//! The server hands back a pre-rendered `<table>` of the day-by-day strategy
//! results. This module turns it into a standalone page and classifies each
//! row by comparing the share count (fifth column) with the row before it.

use lazy_static::lazy_static;
use regex::Regex;

use crate::html::{decode_entities, escape};

/// Zero-based index of the share count column.
pub const QUANTITY_CELL: usize = 4;

lazy_static! {
    static ref TH_CELL: Regex = Regex::new(r"<th([^>]*)>([^<]*)</th>").expect("th regex");
    static ref TR_ROW: Regex = Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>").expect("tr regex");
    static ref TD_CELL: Regex = Regex::new(r"(?is)<td\b[^>]*>(.*?)</td\s*>").expect("td regex");
    static ref ANY_TAG: Regex = Regex::new(r"(?s)<[^>]*>").expect("tag regex");
}

/// Highlight applied to a history row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowTag {
    Increase,
    Decrease,
}

impl RowTag {
    pub fn class(&self) -> &'static str {
        match self {
            RowTag::Increase => "increase",
            RowTag::Decrease => "decrease",
        }
    }
}

/// Read a quantity the way the page script does: whitespace removed, the
/// leading integer taken, anything unparseable counted as zero.
pub fn parse_quantity(text: &str) -> i64 {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let (negative, digits) = match compact.as_bytes().first() {
        Some(b'-') => (true, &compact[1..]),
        Some(b'+') => (false, &compact[1..]),
        _ => (false, compact.as_str()),
    };

    let mut value: i64 = 0;
    for d in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(d - b'0');
        value = value.saturating_mul(10).saturating_add(d);
    }
    if negative {
        -value
    } else {
        value
    }
}

/// Tag each entry against the one before it.
///
/// `None` entries stand for rows without a quantity cell: they stay untagged
/// and leave the baseline where it was. Every other entry moves the baseline,
/// whether or not it was tagged.
pub fn classify<I>(quantities: I) -> Vec<Option<RowTag>>
where
    I: IntoIterator<Item = Option<i64>>,
{
    let mut prev: Option<i64> = None;
    quantities
        .into_iter()
        .map(|quantity| {
            let current = quantity?;
            let tag = match prev {
                Some(p) if current > p => Some(RowTag::Increase),
                Some(p) if current < p => Some(RowTag::Decrease),
                _ => None,
            };
            prev = Some(current);
            tag
        })
        .collect()
}

/// Text of the `<td>` cells of every row, in document order.
pub fn table_rows(html_table: &str) -> Vec<Vec<String>> {
    TR_ROW
        .captures_iter(html_table)
        .map(|row| {
            TD_CELL
                .captures_iter(&row[1])
                .map(|cell| decode_entities(&ANY_TAG.replace_all(&cell[1], "")))
                .collect()
        })
        .collect()
}

/// Row tags for a history table, first row (the header) excluded.
///
/// Every `<tr>` of `html_table` counts, which is the set of rows the page
/// script walks once the table is the only one in the document.
pub fn highlight(html_table: &str) -> Vec<Option<RowTag>> {
    let quantities = table_rows(html_table)
        .into_iter()
        .skip(1)
        .map(|cells| cells.get(QUANTITY_CELL).map(String::as_str).map(parse_quantity));
    classify(quantities)
}

/// Wrap the text of every header cell in a `<span>` so long titles can break
/// under the sticky header.
pub fn wrap_header_cells(html_table: &str) -> String {
    TH_CELL
        .replace_all(html_table, "<th${1}><span>${2}</span></th>")
        .into_owned()
}

/// Counts of tagged rows, for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub rows: usize,
    pub increases: usize,
    pub decreases: usize,
}

/// Standalone document showing a ticker's trading history.
#[derive(Clone, Debug)]
pub struct HistoryPage {
    ticker: String,
    table: String,
}

impl HistoryPage {
    pub fn new(ticker: impl Into<String>, html_table: &str) -> Self {
        Self {
            ticker: ticker.into(),
            table: wrap_header_cells(html_table),
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn title(&self) -> String {
        format!("История торгов: {}", self.ticker)
    }

    pub fn summary(&self) -> Summary {
        let tags = highlight(&self.table);
        Summary {
            rows: tags.len(),
            increases: tags.iter().filter(|t| **t == Some(RowTag::Increase)).count(),
            decreases: tags.iter().filter(|t| **t == Some(RowTag::Decrease)).count(),
        }
    }

    pub fn render(&self) -> String {
        let ticker = escape(&self.ticker);
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>История торгов: {ticker}</title>
    <style>{css}</style>
</head>
<body>
    <h2>Результаты стратегии: {ticker}</h2>
    <script>{js}</script>
    {table}
</body>
</html>
"#,
            css = HISTORY_CSS,
            js = HISTORY_JS,
            table = self.table,
        )
    }
}

const HISTORY_CSS: &str = r#"
        .trading-results {
            width: 100%;
            border-collapse: collapse;
            margin-top: 10px;
        }
        .trading-results th {
            background-color: #f2f2f2;
            padding: 10px;
            text-align: left;
            position: sticky;
            top: 0;
            white-space: normal;
            height: 60px;
            vertical-align: bottom;
        }
        .trading-results th span {
            display: inline-block;
            max-width: 100%;
            word-break: break-word;
            line-height: 1.3;
        }
        .trading-results td {
            padding: 8px 10px;
            border-bottom: 1px solid #ddd;
        }
        .numeric {
            text-align: right;
            font-family: 'Courier New', monospace;
        }
        tr.increase {
            background-color: rgb(58, 209, 58) !important;
        }
        tr.decrease {
            background-color: rgb(228, 71, 71) !important;
        }
        tr:hover {
            background-color: #f5f5f5;
        }
"#;

// Same rows and rule as `highlight`: every row of the page's only table,
// first one skipped, fifth cell compared with the previous row that had one.
const HISTORY_JS: &str = r#"
        function highlightQuantityChanges() {
            const rows = Array.from(document.querySelectorAll('table tr')).slice(1);
            let prevQuantity = null;

            rows.forEach(row => {
                const cells = row.querySelectorAll('td');
                if (cells.length > 4) {
                    const quantityText = cells[4].textContent.replace(/\s+/g, '');
                    const currentQuantity = parseInt(quantityText, 10) || 0;

                    if (prevQuantity !== null) {
                        if (currentQuantity > prevQuantity) {
                            row.classList.add('increase');
                        } else if (currentQuantity < prevQuantity) {
                            row.classList.add('decrease');
                        }
                    }
                    prevQuantity = currentQuantity;
                }
            });
        }

        document.addEventListener('DOMContentLoaded', highlightQuantityChanges);
"#;
