// src/cache.rs

use std::{
    fs::{self, File},
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{crawl, transport::Transport};

pub const CACHE_FILE: &str = "cache_paths.txt";

pub fn cache_path(dest: &Path) -> PathBuf {
    dest.join(CACHE_FILE)
}

/// Read the cached path list under `dest`, one path per line.
///
/// Errors with NotFound if no cache has been written; callers check
/// existence first via `cache_path`.
pub fn load(dest: &Path) -> Result<Vec<String>> {
    let file_path = cache_path(dest);
    let file =
        File::open(&file_path).with_context(|| format!("opening cache {:?}", file_path))?;
    let mut paths = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("reading cache {:?}", file_path))?;
        paths.push(line);
    }
    Ok(paths)
}

/// Overwrite the cache under `dest` with `paths`, newline-terminated.
pub fn save(paths: &[String], dest: &Path) -> Result<()> {
    let file_path = cache_path(dest);
    let mut file =
        File::create(&file_path).with_context(|| format!("creating cache {:?}", file_path))?;
    for path in paths {
        writeln!(file, "{}", path).with_context(|| format!("writing cache {:?}", file_path))?;
    }
    debug!(count = paths.len(), path = %file_path.display(), "saved path cache");
    Ok(())
}

/// Delete the cache file if present; a missing cache is not an error.
pub fn clear(dest: &Path) -> Result<()> {
    let file_path = cache_path(dest);
    if file_path.exists() {
        fs::remove_file(&file_path).with_context(|| format!("removing cache {:?}", file_path))?;
    }
    Ok(())
}

/// Resolve the transcript path list: cached if a cache file exists under
/// `dest`, freshly crawled otherwise.
///
/// The returned flag is true when the list came from a crawl, so the caller
/// decides whether to persist it.
pub async fn load_or_crawl<T: Transport>(
    transport: &T,
    repo: &str,
    branch: &str,
    dest: &Path,
) -> Result<(Vec<String>, bool)> {
    if cache_path(dest).exists() {
        let paths = load(dest)?;
        info!(count = paths.len(), "using cached path list");
        return Ok((paths, false));
    }

    let tree = crawl::fetch_tree(transport, repo, branch)
        .await?
        .with_context(|| format!("no tree listing for {}@{}", repo, branch))?;
    let paths = crawl::csv_paths(&tree);
    info!(count = paths.len(), "crawled path list");
    Ok((paths, true))
}
