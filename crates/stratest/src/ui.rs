use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use stratest_client::config::Config;
use stratest_client::flows::{messages, Notifier, PageSink, ReportView, Trigger};
use stratest_report::{fs, html, HistoryPage, ReportTable};

/// Notifications go straight to the terminal.
pub struct Terminal;

impl Notifier for Terminal {
    fn notify(&self, message: &str) {
        println!("{} {}", "»".yellow().bold(), message.bold());
    }
}

/// Spinner standing in for the history button: spinning while disabled,
/// its message is the button label.
pub struct Spinner {
    pb: ProgressBar,
    label: String,
}

impl Spinner {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self {
            pb,
            label: messages::SHOW_HISTORY.to_string(),
        }
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Spinner::new()
    }
}

impl Trigger for Spinner {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
        self.pb.set_message(self.label.clone());
    }

    fn set_disabled(&mut self, disabled: bool) {
        if disabled {
            self.pb.reset();
            self.pb.enable_steady_tick(Duration::from_millis(100));
        } else {
            self.pb.finish_and_clear();
        }
    }
}

/// Prints the report table, and keeps an optional page copy in step.
pub struct ReportOutput {
    pub ticker: String,
    pub html: Option<PathBuf>,
}

impl ReportView for ReportOutput {
    async fn replace(&mut self, table: &ReportTable) -> Result<()> {
        println!("{}", render_text(table));
        if let Some(path) = &self.html {
            fs::write_page(path, &html::report_document(table, &self.ticker)).await?;
            log::info!("report page written to {}", path.display());
        }
        Ok(())
    }
}

/// Writes history pages to disk, one file per ticker.
pub struct PageWriter {
    pub config: Config,
}

impl PageSink for PageWriter {
    async fn open(&self, page: &HistoryPage) -> Result<()> {
        let path = self.config.history_path(page.ticker());
        fs::write_page(&path, &page.render()).await?;
        println!("{} {}", page.title().bold(), path.display());
        Ok(())
    }
}

/// Plain-text rendering of a report table: caption, header, aligned rows.
pub fn render_text(table: &ReportTable) -> String {
    let width = table
        .rows
        .iter()
        .map(|r| r.label.chars().count())
        .chain(std::iter::once(table.headers[0].chars().count()))
        .max()
        .unwrap_or(0);

    let mut out = format!("{}\n", table.caption.bold());
    out.push_str(&format!(
        "{}\n",
        format!("{:<width$}  {}", table.headers[0], table.headers[1]).underline()
    ));
    for row in &table.rows {
        out.push_str(&format!("{:<width$}  {}\n", row.label, row.value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratest_report::{NumberLocale, ReportResult, ReportValue};

    #[test]
    fn text_table_aligns_values() {
        colored::control::set_override(false);
        let table = ReportTable::build(
            &ReportResult(vec![
                ("buy_count".into(), ReportValue::Number(3.0)),
                ("x".into(), ReportValue::Text("y".into())),
            ]),
            NumberLocale::EnUs,
        );
        let text = render_text(&table);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Отчет по торговой стратегии");
        assert_eq!(lines[2], "Количество покупок  3");
        assert_eq!(lines[3], format!("{:<18}  y", "x"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn spinner_tracks_label() {
        let mut spinner = Spinner::new();
        spinner.set_disabled(true);
        spinner.set_label(messages::LOADING);
        assert_eq!(spinner.label(), messages::LOADING);
        spinner.set_disabled(false);
        spinner.set_label(messages::SHOW_HISTORY);
        assert_eq!(spinner.label(), messages::SHOW_HISTORY);
    }

    #[tokio::test]
    async fn page_writer_names_file_after_ticker() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let writer = PageWriter {
            config: Config::default().with_out_dir(dir.path()),
        };
        writer.open(&HistoryPage::new("sber", "<table></table>")).await?;
        let doc = tokio::fs::read_to_string(dir.path().join("history").join("SBER.html")).await?;
        assert!(doc.contains("История торгов: sber"));
        Ok(())
    }
}
