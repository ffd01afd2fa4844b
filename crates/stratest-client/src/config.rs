use std::env::var;
use std::path::PathBuf;

use stratest_report::NumberLocale;

use crate::error::{Error, Result};

/// Address the strategy tester server listens on out of the box.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_OUT_DIR: &str = "./buffer";

/// Runtime settings, read from the environment (and `.env`, when the
/// binary has loaded it).
///
/// | variable          | default                 |
/// |-------------------|-------------------------|
/// | `STRATEST_URL`    | `http://127.0.0.1:8080` |
/// | `USER_AGENT`      | `stratest/<version>`    |
/// | `STRATEST_LOCALE` | `en-us`                 |
/// | `STRATEST_OUT`    | `./buffer`              |
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub user_agent: String,
    pub locale: NumberLocale,
    pub out_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            user_agent: default_user_agent(),
            locale: NumberLocale::default(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        if let Ok(url) = var("STRATEST_URL") {
            config.base_url = url;
        }
        if let Ok(agent) = var("USER_AGENT") {
            config.user_agent = agent;
        }
        if let Ok(locale) = var("STRATEST_LOCALE") {
            config.locale = locale
                .parse()
                .map_err(|e: anyhow::Error| Error::Config(e.to_string()))?;
        }
        if let Ok(dir) = var("STRATEST_OUT") {
            config.out_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    /// Absolute URL of an API path such as `/api/show-history`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Where the history page of `ticker` is written.
    pub fn history_path(&self, ticker: &str) -> PathBuf {
        self.out_dir
            .join("history")
            .join(format!("{}.html", file_stem(ticker)))
    }
}

fn default_user_agent() -> String {
    format!("stratest/{}", env!("CARGO_PKG_VERSION"))
}

// keep tickers like "BRK/B" inside the output directory
fn file_stem(ticker: &str) -> String {
    ticker
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect::<String>()
        .to_uppercase()
}
