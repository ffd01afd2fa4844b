use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use stratest_client::prelude::*;
use stratest_report::{fs, labels, NumberLocale, ReportResult, ReportTable};

mod cli;
mod ui;

use cli::{Cli, Commands::*, Locale, TraceLevel};

fn preprocess(trace_level: LevelFilter) {
    // grant access to .env
    dotenv::dotenv().ok();

    // initialise logger; RUST_LOG still wins for individual modules
    env_logger::Builder::new()
        .filter_level(trace_level)
        .parse_default_env()
        .init();
}

fn config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(url) = &cli.url {
        config = config.with_base_url(url);
    }
    if let Some(locale) = cli.locale {
        config = config.with_locale(match locale {
            Locale::EnUs => NumberLocale::EnUs,
            Locale::RuRu => NumberLocale::RuRu,
        });
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.trace {
        TraceLevel::Debug => LevelFilter::Debug,
        TraceLevel::Info => LevelFilter::Info,
        TraceLevel::Warn => LevelFilter::Warn,
        TraceLevel::Error => LevelFilter::Error,
    };

    preprocess(log_level);
    log::info!("Command line input recorded: {cli:#?}");

    let mut config = config(&cli)?;
    log::debug!("{config:#?}");

    // cli framework:
    // "> stratest <COMMAND>"
    let outcome = match &cli.command {
        // "> stratest fetch-data --ticker SBER --start 2020-01-01 --end 2024-12-31"
        // have the server download a ticker's price history
        FetchData { ticker, start, end } => {
            let client = build_client(&config.user_agent)?;
            let form = FetchForm::new(ticker, start, end);
            fetch_data_flow(&client, &config, &form, &ui::Terminal).await
        }

        // "> stratest report --ticker SBER --initial-cache 100000 ..."
        // run the strategy and print its report
        Report(args) => {
            let client = build_client(&config.user_agent)?;
            let form = ReportForm {
                ticker: args.ticker.clone(),
                initial_cache: args.initial_cache,
                buy_price: args.buy_price,
                sell_price: args.sell_price,
                commission_rate: args.commission_rate,
                tax_rate: args.tax_rate,
            };
            let mut view = ui::ReportOutput {
                ticker: args.ticker.trim().to_string(),
                html: args.html.clone(),
            };
            generate_report_flow(&client, &config, &form, &ui::Terminal, &mut view).await
        }

        // "> stratest history --ticker SBER"
        // write the day-by-day results page under the output directory
        History { ticker, out_dir } => {
            if let Some(dir) = out_dir {
                config = config.with_out_dir(dir);
            }
            let client = build_client(&config.user_agent)?;
            let mut spinner = ui::Spinner::new();
            let writer = ui::PageWriter {
                config: config.clone(),
            };
            show_history_flow(&client, &config, ticker, &ui::Terminal, &mut spinner, &writer).await
        }

        // "> stratest render ./buffer/SBER.json"
        // render a saved result set offline
        Render { file, html } => {
            let result: ReportResult = fs::read_json(file).await?;
            let table = ReportTable::build(&result, config.locale);
            let ticker = file
                .file_stem()
                .map(|s| s.to_string_lossy().to_uppercase())
                .unwrap_or_default();
            let mut view = ui::ReportOutput {
                ticker,
                html: html.clone(),
            };
            view.replace(&table).await?;
            FlowOutcome::Completed
        }

        // "> stratest labels"
        Labels => {
            for (key, label) in labels::labels() {
                println!("{key:<24} {label}");
            }
            FlowOutcome::Completed
        }
    };

    log::debug!("finished with {outcome:?}");
    if outcome != FlowOutcome::Completed {
        std::process::exit(1);
    }

    Ok(())
}
