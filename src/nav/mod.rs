//! Navigation idioms shared by the comic adapters.
//!
//! Every adapter ends up as a [`StripSource`] which streams strips, oldest
//! first, into a [`StripSender`].

mod links;
mod listable;
mod navigable;
mod numbered;
mod paginated;

pub use links::{FirstStyle, NaviStyle};
pub use listable::{Listable, ListableComic};
pub use navigable::{NavComic, Navigable, NavigableComic};
pub use numbered::{Numbered, NumberedComic};
pub use paginated::{ArchivePage, Paginated, PaginatedComic};

use crate::{fetch::Fetcher, strip::StoredStrip, strip::Strip, utils, CrawlerError};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::warn;

/// Receiving end of a crawl. Closing the receiver stops the crawl.
pub struct StripSender {
    tx: mpsc::Sender<Strip>,
}

impl StripSender {
    pub fn new(tx: mpsc::Sender<Strip>) -> Self {
        StripSender { tx }
    }

    /// Returns `false` once nobody listens anymore.
    pub async fn send(&self, strip: Strip) -> bool {
        self.tx.send(strip).await.is_ok()
    }
}

#[async_trait::async_trait]
pub trait StripSource: Send + Sync {
    /// Idiom category (`NAVIGABLE`, `NUMBERED`, ...).
    fn kind(&self) -> &'static str;

    /// Sends every strip published after `last`, oldest first.
    async fn crawl(
        &self,
        fetcher: &Fetcher,
        last: Option<&StoredStrip>,
        tx: &StripSender,
    ) -> Result<(), CrawlerError>;

    /// Problems found while checking the navigation around `url`.
    async fn check_navigation(
        &self,
        _fetcher: &Fetcher,
        _url: Option<&str>,
    ) -> Result<Vec<String>, CrawlerError> {
        Ok(vec![])
    }
}

/// A link found in a page: `href` is already resolved against the page url.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub text: String,
    pub attrs: BTreeMap<String, String>,
}

impl Link {
    pub fn new<S: Into<String>>(href: S) -> Self {
        Link {
            href: href.into(),
            ..Default::default()
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// A fetched and parsed page. Not `Send`: build it, read it, drop it before
/// the next `.await`.
pub struct Page {
    pub url: String,
    pub doc: Html,
    pub link: Link,
}

pub(crate) fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(_) => {
            warn!("Invalid selector {:?}", css);
            None
        }
    }
}

pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

impl Page {
    pub fn parse(url: &str, html: &str, link: Link) -> Self {
        Page {
            url: url.to_string(),
            doc: Html::parse_document(html),
            link,
        }
    }

    pub fn join(&self, href: &str) -> String {
        utils::join_url(&self.url, href)
    }

    pub fn missing<W: Into<String>>(&self, what: W) -> CrawlerError {
        CrawlerError::missing(self.url.as_str(), what)
    }

    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        match selector(css) {
            Some(selector) => self.doc.select(&selector).collect(),
            None => vec![],
        }
    }

    pub fn first(&self, css: &str) -> Result<ElementRef<'_>, CrawlerError> {
        self.select(css)
            .into_iter()
            .next()
            .ok_or_else(|| self.missing(css))
    }

    pub fn text(&self, css: &str) -> Result<String, CrawlerError> {
        self.first(css).map(text_of)
    }

    pub fn attr(&self, css: &str, attr: &str) -> Result<String, CrawlerError> {
        self.first(css)?
            .value()
            .attr(attr)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| self.missing(format!("{} of {}", attr, css)))
    }

    pub fn attrs(&self, css: &str, attr: &str) -> Vec<String> {
        self.select(css)
            .into_iter()
            .filter_map(|el| el.value().attr(attr))
            .map(|s| s.trim().to_string())
            .collect()
    }

    /// `<meta property=..>` or `<meta name=..>` content.
    pub fn meta(&self, property: &str) -> Result<String, CrawlerError> {
        self.metas(property)
            .into_iter()
            .next()
            .ok_or_else(|| self.missing(format!("meta {}", property)))
    }

    pub fn metas(&self, property: &str) -> Vec<String> {
        self.attrs(
            &format!(
                r#"meta[property="{p}"], meta[name="{p}"]"#,
                p = property
            ),
            "content",
        )
    }

    /// Images under `css`, resolved against the page url.
    pub fn images(&self, css: &str, attr: &str) -> Vec<String> {
        self.attrs(css, attr)
            .iter()
            .filter(|src| !src.is_empty())
            .map(|src| utils::to_ascii_url(&self.join(src)))
            .collect()
    }

    /// Image urls announced in meta tags (`og:image` mostly).
    pub fn meta_images(&self, property: &str) -> Vec<String> {
        self.metas(property)
            .iter()
            .filter(|src| !src.is_empty())
            .map(|src| utils::to_ascii_url(&self.join(src)))
            .collect()
    }

    /// Builds a [`Link`] out of an element carrying a `href`.
    pub fn link_from(&self, el: ElementRef<'_>) -> Option<Link> {
        let href = el.value().attr("href")?.trim();
        if href.is_empty() {
            return None;
        }
        Some(Link {
            href: self.join(href),
            text: text_of(el),
            attrs: el
                .value()
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }

    pub fn links(&self, css: &str) -> Vec<Link> {
        self.select(css)
            .into_iter()
            .filter_map(|el| self.link_from(el))
            .collect()
    }
}

#[cfg(test)]
pub(crate) async fn collect(
    source: &dyn StripSource,
    fetcher: &Fetcher,
    last: Option<&StoredStrip>,
) -> Result<Vec<Strip>, CrawlerError> {
    let (tx, mut rx) = mpsc::channel(1);
    let tx = StripSender::new(tx);
    let producer = async move { source.crawl(fetcher, last, &tx).await };
    let consumer = async {
        let mut strips = vec![];
        while let Some(strip) = rx.recv().await {
            strips.push(strip);
        }
        strips
    };
    let (result, strips) = tokio::join!(producer, consumer);
    result.map(|_| strips)
}
