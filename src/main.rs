//! cbsrates - Central Bank of Seychelles daily exchange rates
//!
//! Prints the buying, selling and mid rates for USD, EUR and GBP from the
//! bank's daily rates page, rendering it at most once per business day.

use std::io;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cbsrates::app::App;
use cbsrates::cli::{Cli, StartupConfig};
use cbsrates::fetch::{ChromiumRenderer, FetcherKind, HttpRenderer, PageRenderer};

/// Sends logs to stderr so stdout only carries the rates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cbsrates=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_renderer(startup: &StartupConfig) -> Result<Box<dyn PageRenderer>, Box<dyn std::error::Error>> {
    Ok(match startup.fetcher {
        FetcherKind::Chromium => match &startup.chromium {
            Some(path) => Box::new(ChromiumRenderer::with_executable(path.clone())),
            None => Box::new(ChromiumRenderer::new()),
        },
        FetcherKind::Http => Box::new(HttpRenderer::new()?),
    })
}

async fn run(startup: StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    let renderer = build_renderer(&startup)?;
    let app = App::new(startup.config, renderer.as_ref());

    let today = Local::now().date_naive();
    let stdout = io::stdout();
    app.run(today, &mut stdout.lock()).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(startup).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
