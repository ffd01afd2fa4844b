//! HTML rendering of the report table.

use crate::report::ReportTable;

/// Escape text for use inside HTML element content or a quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode the handful of entities a server-rendered table uses.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", "\u{a0}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Render a [`ReportTable`] as a `<table>` element.
pub fn render_report(table: &ReportTable) -> String {
    let mut out = String::from("<table>\n");
    out.push_str(&format!("  <caption>{}</caption>\n", escape(&table.caption)));
    out.push_str(&format!(
        "  <tr><th>{}</th><th>{}</th></tr>\n",
        escape(&table.headers[0]),
        escape(&table.headers[1])
    ));
    for row in &table.rows {
        out.push_str(&format!(
            "  <tr><td>{}</td><td>{}</td></tr>\n",
            escape(&row.label),
            escape(&row.value)
        ));
    }
    out.push_str("</table>");
    out
}

/// Standalone page holding a rendered report.
pub fn report_document(table: &ReportTable, ticker: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{caption}: {ticker}</title>
    <style>{css}</style>
</head>
<body>
    <div id="report">
{table}
    </div>
</body>
</html>
"#,
        caption = escape(&table.caption),
        ticker = escape(ticker),
        css = REPORT_CSS,
        table = render_report(table),
    )
}

const REPORT_CSS: &str = r#"
        table { border-collapse: collapse; margin-top: 10px; }
        caption { font-weight: bold; padding: 6px; }
        th { background-color: #f2f2f2; text-align: left; padding: 8px 10px; }
        td { padding: 6px 10px; border-bottom: 1px solid #ddd; }
        td:last-child { text-align: right; font-family: 'Courier New', monospace; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::NumberLocale;
    use crate::report::{ReportResult, ReportValue};

    fn table() -> ReportTable {
        ReportTable::build(
            &ReportResult(vec![
                ("buy_price".into(), ReportValue::Number(250.5)),
                ("note".into(), ReportValue::Text("<b>&</b>".into())),
            ]),
            NumberLocale::EnUs,
        )
    }

    #[test]
    fn escape_and_decode_are_inverse_for_text() {
        let s = r#"a < b & "c" 'd'"#;
        assert_eq!(escape(s), "a &lt; b &amp; &quot;c&quot; &#39;d&#39;");
        assert_eq!(decode_entities(&escape(s)), s);
    }

    #[test]
    fn one_tr_per_row_plus_header() {
        let html = render_report(&table());
        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains("<caption>Отчет по торговой стратегии</caption>"));
        assert!(html.contains("<tr><th>Параметр</th><th>Значение</th></tr>"));
        assert!(html.contains("<tr><td>Цена покупки</td><td>250.5</td></tr>"));
    }

    #[test]
    fn cell_text_is_escaped() {
        let html = render_report(&table());
        assert!(html.contains("<td>&lt;b&gt;&amp;&lt;/b&gt;</td>"));
    }

    #[test]
    fn document_wraps_table() {
        let doc = report_document(&table(), "SBER");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Отчет по торговой стратегии: SBER</title>"));
        assert!(doc.contains(&render_report(&table())));
    }
}
