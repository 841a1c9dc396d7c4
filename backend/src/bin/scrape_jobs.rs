//! Scrape the listing page once and push every listing to the job API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use jobboard::domain::ScrapeService;
use jobboard::outbound::browser::{ChromiumPageRenderer, RendererOptions};
use jobboard::outbound::job_api::HttpJobSyncClient;
use tokio::runtime::Builder;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

/// `scrape-jobs` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "scrape-jobs",
    about = "Render the job listing page and submit each listing to the job board API",
    version
)]
struct CliArgs {
    /// Listing page to render.
    #[arg(long, value_name = "url", default_value = "https://www.actuarylist.com/")]
    url: Url,
    /// Job API endpoint receiving one `POST` per listing.
    #[arg(
        long = "api-url",
        value_name = "url",
        env = "JOBBOARD_API_URL",
        default_value = "http://127.0.0.1:5000/jobs"
    )]
    api_url: Url,
    /// Seconds to wait after page load before reading embedded state.
    #[arg(long = "settle-secs", value_name = "seconds", default_value_t = 5)]
    settle_secs: u64,
    /// Per-request timeout for job API calls, in seconds.
    #[arg(long = "timeout-secs", value_name = "seconds", default_value_t = 10)]
    timeout_secs: u64,
    /// Show the browser window instead of running headless.
    #[arg(long)]
    headful: bool,
}

impl CliArgs {
    fn renderer_options(&self) -> RendererOptions {
        RendererOptions::default()
            .with_settle_delay(Duration::from_secs(self.settle_secs))
            .with_headless(!self.headful)
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "scrape run aborted");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: CliArgs) -> io::Result<()> {
    let renderer = Arc::new(ChromiumPageRenderer::new(args.renderer_options()));
    let sync = HttpJobSyncClient::new(args.api_url.clone(), Duration::from_secs(args.timeout_secs))
        .map_err(|error| io::Error::other(format!("create job API client: {error}")))?;
    let service = ScrapeService::new(renderer, Arc::new(sync));

    let report = service
        .run(args.url.as_str())
        .await
        .map_err(io::Error::other)?;
    info!(
        found = report.found,
        pushed = report.pushed(),
        created = report.created,
        "scrape complete"
    );
    Ok(())
}
