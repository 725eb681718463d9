use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::TraderList;

/// Write a pretty-printed JSON artifact into the output directory,
/// overwriting any previous run's file.
pub fn save_json<T: Serialize>(dir: &Path, filename: &str, data: &T) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    let path = dir.join(filename);
    let body = serde_json::to_string_pretty(data)?;
    fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "Saved JSON artifact");
    Ok(path)
}

/// Write a raw Markdown artifact into the output directory.
pub fn save_markdown(dir: &Path, filename: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    let path = dir.join(filename);
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "Saved Markdown artifact");
    Ok(path)
}

/// Overwrite the persisted trader list.
pub fn save_trader_list(path: &Path, list: &TraderList) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }
    let body = serde_json::to_string_pretty(list)?;
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Load the scraped trader addresses. A missing or unparsable list file is
/// logged and treated as zero traders; the report run continues with market
/// data only.
pub fn load_trader_addresses(path: &Path) -> Vec<String> {
    tracing::info!(path = %path.display(), "Loading trader list");

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Trader list not readable — run scrape-traders first"
            );
            return Vec::new();
        }
    };

    match serde_json::from_str::<TraderList>(&raw) {
        Ok(list) => {
            tracing::info!(count = list.trader_addresses.len(), "Loaded trader list");
            list.trader_addresses
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Trader list is not valid JSON — treating as empty"
            );
            Vec::new()
        }
    }
}
