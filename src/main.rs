use anyhow::{Context, Result};
use mananera_scraper::{
    fetch::{fetch_data, FetchConfig, FetchOutcome},
    transport::HttpTransport,
};
use reqwest::Client;
use std::{env, path::PathBuf, time::Duration};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_REPO: &str = "enriquegiottonini/conferencias_matutinas_amlo";
const DEFAULT_BRANCH: &str = "master";
const DEFAULT_DEST: &str = "data";
const DEFAULT_START_DATE: &str = "02-01-2023";
const DEFAULT_END_DATE: &str = "30-06-2023";

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mananera_scraper=info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) configure the run ────────────────────────────────────────
    // usage: mananera-scraper [dest] [start_date] [end_date] [repo] [branch]
    let mut args = env::args().skip(1);
    let config = FetchConfig {
        dest: PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_DEST.to_string())),
        start_date: args.next().unwrap_or_else(|| DEFAULT_START_DATE.to_string()),
        end_date: args.next().unwrap_or_else(|| DEFAULT_END_DATE.to_string()),
        repo: args.next().unwrap_or_else(|| DEFAULT_REPO.to_string()),
        branch: args.next().unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
    };

    // GitHub rejects requests without a User-Agent
    let client = Client::builder()
        .user_agent(concat!("mananera-scraper/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()
        .context("building HTTP client")?;
    let transport = HttpTransport::new(client);

    // ─── 3) run the pipeline ─────────────────────────────────────────
    match fetch_data(&transport, &config).await? {
        FetchOutcome::Skipped => info!(dest = %config.dest.display(), "data already fetched"),
        FetchOutcome::Completed => info!(dest = %config.dest.display(), "fetch complete"),
    }

    Ok(())
}
