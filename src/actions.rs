//! Maintenance actions run on the stored strips of one comic.

use crate::{
    comics::ComicEntry, config::CrawlerConfig, fetch::Fetcher, utils, CrawlerError, Storage,
};
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

/// Problems found in the stored strips.
pub async fn check<S>(entry: &ComicEntry, storage: &S) -> Result<Vec<String>, CrawlerError>
where
    S: Storage + Sync,
{
    let today = utils::today();
    let mut problems = vec![];

    let strips = storage.strips_get().await?;
    for (i, strip) in strips.iter().enumerate() {
        if strip.url.is_empty() {
            problems.push(format!("Strip at position {} has no url", strip.position));
        }
        if strip.comic != entry.info.long_name {
            problems.push(format!(
                "{}: comic is \"{}\" instead of \"{}\"",
                strip.url, strip.comic, entry.info.long_name
            ));
        }
        if strip.date > today {
            problems.push(format!("{}: date {} is in the future", strip.url, strip.date));
        }
        if let Some(prev) = i.checked_sub(1).map(|p| &strips[p]) {
            let by_num = prev.num.unwrap_or(0) < strip.num.unwrap_or(0);
            if prev.date > strip.date && !by_num {
                problems.push(format!(
                    "{} ({}) comes after {} ({})",
                    strip.url, strip.date, prev.url, prev.date
                ));
            }
        }
        for image in &strip.images {
            match &image.local_path {
                Some(path) if !Path::new(path).is_file() => {
                    problems.push(format!("{}: file {} does not exist", strip.url, path))
                }
                Some(_) => {}
                None => problems.push(format!("{}: image {} is missing", strip.url, image.url)),
            }
        }
    }

    for problem in &problems {
        warn!("[{}] {}", entry.info.name, problem);
    }
    Ok(problems)
}

/// Downloads again the images that failed before. Returns how many were
/// retrieved.
pub async fn fix<S>(
    entry: &ComicEntry,
    storage: &S,
    fetcher: &Fetcher,
    config: &CrawlerConfig,
) -> Result<usize, CrawlerError>
where
    S: Storage + Sync,
{
    let name = entry.info.name;
    let dir = config.comic_dir(name);
    tokio::fs::create_dir_all(&dir).await?;

    let mut fixed = 0;
    for image in storage.images_missing().await? {
        let prefix = image.prefix.as_deref().unwrap_or_default();
        match fetcher
            .download(&image.url, &dir, prefix, Some(image.strip_url.as_str()))
            .await
        {
            Ok(path) => {
                storage
                    .images_set_local(&image.strip_url, image.idx, &path.to_string_lossy())
                    .await?;
                info!("[{}] Retrieved {}", name, image.url);
                fixed += 1;
            }
            Err(e) => warn!("[{}] Could not download {}: {}", name, image.url, e),
        }
    }
    Ok(fixed)
}

pub async fn reset_new<S>(entry: &ComicEntry, storage: &S) -> Result<u64, CrawlerError>
where
    S: Storage + Sync,
{
    let reset = storage.new_reset().await?;
    info!("[{}] {} strips are not new anymore", entry.info.name, reset);
    Ok(reset)
}

/// Writes `<output>/<name>/<name>.json` with every stored strip.
pub async fn export<S>(
    entry: &ComicEntry,
    storage: &S,
    config: &CrawlerConfig,
) -> Result<PathBuf, CrawlerError>
where
    S: Storage + Sync,
{
    let name = entry.info.name;
    let dir = config.comic_dir(name);
    tokio::fs::create_dir_all(&dir).await?;

    let strips: Vec<serde_json::Value> = storage
        .strips_get()
        .await?
        .iter()
        .map(|s| s.to_json())
        .collect();
    let path = dir.join(format!("{}.json", name));
    tokio::fs::write(&path, serde_json::to_string_pretty(&strips)?).await?;

    info!("[{}] Exported {} strips to {}", name, strips.len(), path.display());
    Ok(path)
}

pub fn list<W: Write>(entries: &[ComicEntry], out: &mut W) -> Result<(), CrawlerError> {
    for entry in entries {
        writeln!(out, "{}", entry)?;
    }
    Ok(())
}

/// Strip count and last stored strip.
pub async fn info<S, W>(entry: &ComicEntry, storage: &S, out: &mut W) -> Result<(), CrawlerError>
where
    S: Storage + Sync,
    W: Write + Send,
{
    let count = storage.strips_count().await?;
    let last = storage.strips_last().await?;
    writeln!(out, "{} ({}): {} strips", entry.info.long_name, entry.info.url, count)?;
    if let Some(last) = last {
        write!(out, "{}", last)?;
    }
    Ok(())
}

/// Checks the navigation around the last stored strip.
pub async fn check_nav<S>(
    entry: &ComicEntry,
    storage: &S,
    fetcher: &Fetcher,
) -> Result<Vec<String>, CrawlerError>
where
    S: Storage + Sync,
{
    let last = storage.strips_last().await?;
    let problems = entry
        .source
        .check_navigation(fetcher, last.as_ref().map(|l| l.url.as_str()))
        .await?;
    for problem in &problems {
        warn!("[{}] {}", entry.info.name, problem);
    }
    Ok(problems)
}
