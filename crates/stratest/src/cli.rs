use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the strategy tester server (overrides STRATEST_URL).
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Number formatting of report values (overrides STRATEST_LOCALE).
    #[arg(long, global = true, value_enum, ignore_case = true)]
    pub locale: Option<Locale>,

    /// Sets the level of logging
    #[arg(long, global = true, value_enum, default_value_t = TraceLevel::Info, ignore_case = true)]
    pub trace: TraceLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the server to download the price history of a ticker.
    FetchData {
        #[arg(long)]
        ticker: String,

        /// First day, YYYY-MM-DD.
        #[arg(long)]
        start: String,

        /// Last day, YYYY-MM-DD.
        #[arg(long)]
        end: String,
    },

    /// Run the strategy on the server and print the report.
    Report(ReportArgs),

    /// Open the day-by-day results of a ticker as a standalone page.
    History {
        #[arg(long, default_value = "")]
        ticker: String,

        /// Directory the page is written under (overrides STRATEST_OUT).
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Render a saved result file without contacting the server.
    Render {
        /// JSON object of field keys to values.
        file: PathBuf,

        /// Also write the report as a standalone page.
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Print the field label dictionary.
    Labels,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[arg(long)]
    pub ticker: String,

    #[arg(long)]
    pub initial_cache: f64,

    #[arg(long)]
    pub buy_price: f64,

    #[arg(long)]
    pub sell_price: f64,

    #[arg(long)]
    pub commission_rate: f64,

    #[arg(long)]
    pub tax_rate: f64,

    /// Also write the report as a standalone page.
    #[arg(long)]
    pub html: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Locale {
    EnUs,
    RuRu,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    Debug,
    Info,
    Warn,
    Error,
}
