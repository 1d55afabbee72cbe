//! Sites publishing a JSON Feed (`/feed/json/`).

use super::ComicEntry;
use crate::{
    fetch::Fetcher,
    nav::{StripSender, StripSource},
    strip::{StoredStrip, Strip},
    utils, CrawlerError,
};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct FeedAuthor {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    id: i64,
    url: String,
    title: Option<String>,
    author: Option<FeedAuthor>,
    image: Option<String>,
    date_modified: Option<String>,
    date_published: Option<String>,
    content_html: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Feed {
    items: Vec<FeedItem>,
}

impl FeedItem {
    fn into_strip(self) -> Result<Strip, CrawlerError> {
        let date = self
            .date_modified
            .as_deref()
            .or(self.date_published.as_deref())
            .map(utils::isoformat_to_date)
            .transpose()?;
        let strip = Strip {
            url: self.url,
            num: Some(self.id),
            date,
            title: self.title,
            author: self.author.and_then(|a| a.name),
            images: self.image.into_iter().collect(),
            ..Default::default()
        };
        Ok(match self.content_html {
            Some(description) => strip.with_extra("description", description),
            None => strip,
        })
    }
}

pub struct JsonFeed {
    pub home: &'static str,
}

#[async_trait::async_trait]
impl StripSource for JsonFeed {
    fn kind(&self) -> &'static str {
        "FEED"
    }

    async fn crawl(
        &self,
        fetcher: &Fetcher,
        last: Option<&StoredStrip>,
        tx: &StripSender,
    ) -> Result<(), CrawlerError> {
        let feed: Feed = fetcher
            .get_json(&utils::join_url(self.home, "/feed/json/"))
            .await?;
        let after = last.and_then(|l| l.num).unwrap_or(0);

        let mut items: Vec<FeedItem> = feed.items.into_iter().filter(|i| i.id > after).collect();
        items.sort_by_key(|i| i.id);
        debug!("{} new items after {}", items.len(), after);

        for item in items {
            if !tx.send(item.into_strip()?).await {
                break;
            }
        }
        Ok(())
    }
}

pub(super) fn comics() -> Vec<ComicEntry> {
    vec![ComicEntry::new(
        "ptbd",
        "Pretends to be drawing",
        "https://ptbd.jwels.berlin",
        &["PTBD"],
        JsonFeed {
            home: "https://ptbd.jwels.berlin",
        },
    )]
}
