use chrono::NaiveDate;
use itertools::Itertools;
use std::path::Path;
use tokio::{sync::mpsc, time::Instant};
use tracing::{info, warn};

pub mod actions;
pub mod comics;
pub mod config;
pub mod fetch;
pub mod nav;
pub mod store;
pub mod strip;

mod data;
mod error;
mod utils;

pub use data::Table;
pub use error::CrawlerError;

use comics::ComicEntry;
use config::CrawlerConfig;
use fetch::Fetcher;
use nav::StripSender;
use strip::{StoredStrip, Strip};

/// An image that could not be downloaded when its strip was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingImage {
    pub strip_url: String,
    pub idx: i64,
    pub url: String,
    pub prefix: Option<String>,
}

#[async_trait::async_trait]
pub trait Storage {
    /// Every stored strip, in position order.
    async fn strips_get(&self) -> Result<Vec<StoredStrip>, CrawlerError>;
    async fn strips_last(&self) -> Result<Option<StoredStrip>, CrawlerError>;
    async fn strips_count(&self) -> Result<u32, CrawlerError>;
    async fn strips_is_exists<I: AsRef<str> + Send>(&self, url: I) -> Result<bool, CrawlerError>;
    /// Stores the strip with its images after the last one, atomically.
    async fn strips_insert(
        &self,
        strip: &Strip,
        date: NaiveDate,
        local_paths: &[Option<String>],
    ) -> Result<(), CrawlerError>;

    async fn images_missing(&self) -> Result<Vec<MissingImage>, CrawlerError>;
    async fn images_set_local<I: AsRef<str> + Send>(
        &self,
        strip_url: I,
        idx: i64,
        local_path: &str,
    ) -> Result<(), CrawlerError>;

    /// Clears the `is_new` flag, returns how many strips had it.
    async fn new_reset(&self) -> Result<u64, CrawlerError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub added: usize,
    pub skipped: usize,
}

/// Retrieves the strips published since the last stored one.
///
/// Strips are stored one by one as they come: whatever was stored before a
/// failure stays stored and the next run resumes from there.
pub async fn run_update<S>(
    entry: &ComicEntry,
    storage: &S,
    fetcher: &Fetcher,
    config: &CrawlerConfig,
) -> Result<UpdateSummary, CrawlerError>
where
    S: Storage + Sync,
{
    let name = entry.info.name;
    if !entry.is_working() {
        info!("[{}] Comic is {}, nothing to retrieve", name, entry.info.status);
        return Ok(UpdateSummary::default());
    }

    let dir = config.comic_dir(name);
    tokio::fs::create_dir_all(&dir).await?;
    let dir = dir.as_path();

    let last = storage.strips_last().await?;
    if let Some(last) = &last {
        info!("[{}] Last strip: {} ({})", name, last.url, last.date);
    }

    let start = Instant::now();
    let (tx, mut rx) = mpsc::channel::<Strip>(1);

    let source = entry.source.as_ref();
    let last = last.as_ref();
    let producer = async move {
        let tx = StripSender::new(tx);
        source.crawl(fetcher, last, &tx).await
    };

    // Owns the receiver: once it is done, the producer stops.
    let consumer = async move {
        let mut summary = UpdateSummary::default();
        loop {
            if config.limit.map_or(false, |limit| summary.added >= limit) {
                info!("[{}] Stopping after {} strips", name, summary.added);
                break;
            }
            let Some(strip) = rx.recv().await else { break };
            match save_strip(name, strip, storage, fetcher, dir).await {
                Ok(true) => summary.added += 1,
                Ok(false) => summary.skipped += 1,
                Err(e) => return (summary, Err(e)),
            }
        }
        (summary, Ok(()))
    };

    let (crawled, (summary, saved)) = tokio::join!(producer, consumer);
    info!(
        "[{}] Added {} new strips in {:?}",
        name,
        summary.added,
        start.elapsed()
    );
    saved?;
    crawled?;
    Ok(summary)
}

/// `Ok(false)` when the strip is not stored.
async fn save_strip<S>(
    name: &str,
    mut strip: Strip,
    storage: &S,
    fetcher: &Fetcher,
    dir: &Path,
) -> Result<bool, CrawlerError>
where
    S: Storage + Sync,
{
    strip.url = strip.url.trim().to_string();
    if strip.url.is_empty() {
        warn!("[{}] Strip without url, skipped", name);
        return Ok(false);
    }
    if storage.strips_is_exists(strip.url.as_str()).await? {
        warn!("[{}] Strip {} is already stored, skipped", name, strip.url);
        return Ok(false);
    }

    strip.images = strip.images.into_iter().unique().collect();
    let date = strip.date.unwrap_or_else(utils::today);
    let prefix = strip.prefix.clone().unwrap_or_default();

    let mut local_paths = Vec::with_capacity(strip.images.len());
    for image in &strip.images {
        let local_path = match fetcher.download(image, dir, &prefix, Some(strip.url.as_str())).await {
            Ok(path) => Some(path.to_string_lossy().into_owned()),
            Err(e) => {
                warn!("[{}] Could not download {}: {}", name, image, e);
                None
            }
        };
        local_paths.push(local_path);
    }

    storage.strips_insert(&strip, date, &local_paths).await?;
    info!(
        "[{}] {} ({}, {} images)",
        name,
        strip.url,
        date,
        strip.images.len()
    );
    Ok(true)
}
