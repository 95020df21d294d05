// src/crawl.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::transport::Transport;

/// Only transcript CSVs are of interest; everything else in the repo tree
/// (notebooks, READMEs, scripts) is noise.
const CSV_EXTENSION: &str = ".csv";
const CATEGORY_MARKER: &str = "mananera";

/// Recursive tree listing of a GitHub repository, as returned by
/// `GET /repos/{repo}/git/trees/{branch}?recursive=1`.
#[derive(Debug, Deserialize)]
pub struct GitTree {
    pub tree: Vec<TreeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TreeEntry {
    pub path: String,
}

/// Fetch the recursive tree of `repo` at `branch`.
///
/// A non-success status yields `Ok(None)`: there is no tree to work with and
/// the caller decides whether that is fatal.
pub async fn fetch_tree<T: Transport>(
    transport: &T,
    repo: &str,
    branch: &str,
) -> Result<Option<GitTree>> {
    let url = format!(
        "https://api.github.com/repos/{}/git/trees/{}?recursive=1",
        repo, branch
    );
    let resp = transport.get(&url).await?;
    if !resp.is_success() {
        warn!(%url, status = %resp.status, "tree listing failed");
        return Ok(None);
    }
    let tree: GitTree = serde_json::from_str(&resp.body)
        .with_context(|| format!("decoding tree listing from {}", url))?;
    debug!(entries = tree.tree.len(), "fetched tree");
    Ok(Some(tree))
}

/// Filter the tree down to transcript CSV paths, preserving listing order.
pub fn csv_paths(tree: &GitTree) -> Vec<String> {
    tree.tree
        .iter()
        .filter(|e| e.path.ends_with(CSV_EXTENSION) && e.path.contains(CATEGORY_MARKER))
        .map(|e| e.path.clone())
        .collect()
}
