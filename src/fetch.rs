// src/fetch.rs

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use tracing::{info, instrument, warn};

use crate::{cache, extract, transport::Transport, weeks};

/// Everything one run needs to know.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// `owner/name` GitHub repository identifier.
    pub repo: String,
    pub branch: String,
    /// Directory receiving the cache file and the week files.
    pub dest: PathBuf,
    /// Inclusive range, `DD-MM-YYYY`.
    pub start_date: String,
    pub end_date: String,
}

/// Terminal state of a run; failures surface as `Err`.
#[derive(Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The destination already holds week files; nothing was fetched.
    Skipped,
    Completed,
}

/// True when `dest` holds anything besides the path cache.
///
/// The cache file does not count: persisting a crawl must not mark the
/// fetch itself as done.
fn already_fetched(dest: &Path) -> Result<bool> {
    if !dest.exists() {
        return Ok(false);
    }
    for entry in fs::read_dir(dest).with_context(|| format!("listing {:?}", dest))? {
        let entry = entry?;
        if entry.file_name() != cache::CACHE_FILE {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Download every transcript in the configured date range and aggregate the
/// text into one file per calendar week under `dest`.
///
/// Strictly sequential: one GET at a time, each week file opened and closed
/// once per transcript. Any non-success fetch aborts the whole run; a
/// failure here has always meant a malformed URL that needs fixing, not a
/// transient fault, so there is no retry.
#[instrument(level = "info", skip(transport, config), fields(repo = %config.repo, dest = %config.dest.display()))]
pub async fn fetch_data<T: Transport>(transport: &T, config: &FetchConfig) -> Result<FetchOutcome> {
    if already_fetched(&config.dest)? {
        info!("destination already populated; skipping fetch");
        return Ok(FetchOutcome::Skipped);
    }
    fs::create_dir_all(&config.dest).with_context(|| format!("creating {:?}", config.dest))?;

    let (paths, freshly_crawled) =
        cache::load_or_crawl(transport, &config.repo, &config.branch, &config.dest).await?;
    if freshly_crawled {
        cache::save(&paths, &config.dest)?;
    }

    let weeks = weeks::bucket(&paths, &config.start_date, &config.end_date)?;
    if weeks.is_empty() {
        warn!(
            start = %config.start_date,
            end = %config.end_date,
            "no transcripts in range"
        );
        return Ok(FetchOutcome::Completed);
    }

    let total = weeks.len();
    for (done, (week, week_paths)) in weeks.iter().enumerate() {
        for path in week_paths {
            fetch_into_week_file(transport, config, week, path).await?;
        }
        info!(week, done = done + 1, total, "week complete");
    }

    Ok(FetchOutcome::Completed)
}

async fn fetch_into_week_file<T: Transport>(
    transport: &T,
    config: &FetchConfig,
    week: &str,
    path: &str,
) -> Result<()> {
    let url = format!(
        "https://raw.githubusercontent.com/{}/{}/{}",
        config.repo, config.branch, path
    );
    let resp = transport.get(&url).await?;
    if !resp.is_success() {
        // fail fast: a bad status here means the URL itself is wrong
        bail!("fetch of {} failed with status {}", url, resp.status);
    }

    let week_file = config.dest.join(format!("{}.txt", week));
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&week_file)
        .with_context(|| format!("opening {:?} for append", week_file))?;
    for fragment in extract::text_column(resp.body)? {
        let fragment = fragment.with_context(|| format!("extracting text from {}", url))?;
        file.write_all(fragment.as_bytes())
            .with_context(|| format!("appending to {:?}", week_file))?;
    }
    Ok(())
}

/// Drop all fetched data (cache included) for a fresh run.
pub fn clean_data(dest: &Path) -> Result<()> {
    if dest.exists() {
        fs::remove_dir_all(dest).with_context(|| format!("removing {:?}", dest))?;
    }
    fs::create_dir_all(dest).with_context(|| format!("recreating {:?}", dest))?;
    Ok(())
}
