//! The catalog of supported comics.

mod archives;
mod feeds;
mod navigable;
mod numbered;
mod tapas;
mod tumblr;

use crate::{nav::StripSource, CrawlerError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Working,
    NotWorking,
    Unavailable,
    Deleted,
}

impl Status {
    fn category(&self) -> Option<&'static str> {
        match self {
            Status::Working => None,
            Status::NotWorking => Some("NOTWORKING"),
            Status::Unavailable => Some("UNAVAILABLE"),
            Status::Deleted => Some("DELETED"),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Working => "working",
            Status::NotWorking => "not working",
            Status::Unavailable => "unavailable",
            Status::Deleted => "deleted",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct ComicInfo {
    pub name: &'static str,
    pub long_name: &'static str,
    pub url: &'static str,
    pub categories: &'static [&'static str],
    pub status: Status,
}

pub struct ComicEntry {
    pub info: ComicInfo,
    pub source: Box<dyn StripSource>,
}

impl ComicEntry {
    pub(crate) fn new<S: StripSource + 'static>(
        name: &'static str,
        long_name: &'static str,
        url: &'static str,
        categories: &'static [&'static str],
        source: S,
    ) -> Self {
        ComicEntry {
            info: ComicInfo {
                name,
                long_name,
                url,
                categories,
                status: Status::Working,
            },
            source: Box::new(source),
        }
    }

    pub(crate) fn with_status(mut self, status: Status) -> Self {
        self.info.status = status;
        self
    }

    pub fn is_working(&self) -> bool {
        self.info.status == Status::Working
    }

    /// Own categories, idiom category and status category.
    pub fn categories(&self) -> Vec<&'static str> {
        let mut categories = self.info.categories.to_vec();
        categories.push(self.source.kind());
        categories.extend(self.info.status.category());
        categories
    }

    fn matches(&self, selector: &str) -> bool {
        self.info.name == selector.to_lowercase()
            || self
                .categories()
                .iter()
                .any(|c| *c == selector.to_uppercase())
    }
}

impl fmt::Display for ComicEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<24} {:<48} {:<12} {}",
            self.info.name,
            self.info.long_name,
            self.info.status,
            self.categories().join(",")
        )
    }
}

pub fn catalog() -> Vec<ComicEntry> {
    let mut comics = vec![];
    comics.extend(numbered::comics());
    comics.extend(navigable::comics());
    comics.extend(archives::comics());
    comics.extend(tumblr::comics());
    comics.extend(tapas::comics());
    comics.extend(feeds::comics());
    comics
}

/// Comics matching any of the names or categories. Everything when
/// `selectors` is empty.
pub fn select<S: AsRef<str>>(selectors: &[S]) -> Result<Vec<ComicEntry>, CrawlerError> {
    let comics = catalog();
    if selectors.is_empty() {
        return Ok(comics);
    }

    for selector in selectors {
        let selector = selector.as_ref();
        if !comics.iter().any(|c| c.matches(selector)) {
            return Err(CrawlerError::UnknownComic(selector.to_string()));
        }
    }

    Ok(comics
        .into_iter()
        .filter(|c| selectors.iter().any(|s| c.matches(s.as_ref())))
        .collect())
}
