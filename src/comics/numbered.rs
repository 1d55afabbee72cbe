use super::ComicEntry;
use crate::{
    fetch::Fetcher,
    nav::{Link, Numbered, NumberedComic, Page},
    strip::Strip,
    utils, CrawlerError,
};
use chrono::NaiveDate;
use itertools::{Itertools, MinMaxResult};
use lazy_regex::regex_captures;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct XkcdInfo {
    num: i64,
    day: String,
    month: String,
    year: String,
    img: String,
    title: String,
    safe_title: String,
    alt: String,
    link: String,
    news: String,
    transcript: String,
}

pub struct Xkcd {
    pub home: &'static str,
}

#[async_trait::async_trait]
impl NumberedComic for Xkcd {
    async fn first_and_last(&self, fetcher: &Fetcher) -> Result<(i64, i64), CrawlerError> {
        let info: XkcdInfo = fetcher
            .get_json(&utils::join_url(self.home, "info.0.json"))
            .await?;
        Ok((1, info.num))
    }

    async fn strip_info(
        &self,
        fetcher: &Fetcher,
        num: i64,
    ) -> Result<Option<Strip>, CrawlerError> {
        let json_url = utils::join_url(self.home, &format!("{}/info.0.json", num));
        let info: XkcdInfo = match fetcher.get_json(&json_url).await {
            Ok(info) => info,
            Err(CrawlerError::StatusError { status, .. }) if status == StatusCode::NOT_FOUND => {
                debug!("No strip {}", num);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let date = NaiveDate::from_ymd_opt(
            info.year.parse().unwrap_or_default(),
            info.month.parse().unwrap_or_default(),
            info.day.parse().unwrap_or_default(),
        )
        .ok_or_else(|| CrawlerError::DateError {
            value: format!("{}-{}-{}", info.year, info.month, info.day),
            format: "%Y-%m-%d".to_string(),
        })?;

        Ok(Some(
            Strip {
                url: utils::join_url(self.home, &format!("{}/", num)),
                date: Some(date),
                title: Some(info.title),
                alt: Some(info.alt),
                images: vec![info.img],
                prefix: Some(format!("{}-", num)),
                ..Default::default()
            }
            .with_extra("json_url", json_url)
            .with_extra("link", info.link)
            .with_extra("news", info.news)
            .with_extra("safe_title", info.safe_title)
            .with_extra("transcript", info.transcript),
        ))
    }
}

#[derive(Debug, Deserialize)]
struct DeathBulgePagination {
    first: i64,
    last: i64,
}

#[derive(Debug, Deserialize)]
struct DeathBulgeComic {
    title: String,
    alt_text: String,
    comic: String,
    timestamp: String,
}

#[derive(Debug, Deserialize)]
struct DeathBulgeResponse {
    pagination_links: DeathBulgePagination,
    comic: DeathBulgeComic,
}

pub struct DeathBulge {
    pub home: &'static str,
}

#[async_trait::async_trait]
impl NumberedComic for DeathBulge {
    async fn first_and_last(&self, fetcher: &Fetcher) -> Result<(i64, i64), CrawlerError> {
        let response: DeathBulgeResponse = fetcher
            .get_json(&utils::join_url(self.home, "/api/comics/1"))
            .await?;
        let pagination = response.pagination_links;
        Ok((pagination.first, pagination.last))
    }

    async fn strip_info(
        &self,
        fetcher: &Fetcher,
        num: i64,
    ) -> Result<Option<Strip>, CrawlerError> {
        let json_url = utils::join_url(self.home, &format!("/api/comics/{}", num));
        let comic = fetcher.get_json::<DeathBulgeResponse>(&json_url).await?.comic;
        Ok(Some(
            Strip {
                url: utils::join_url(self.home, &format!("/comics/{}", num)),
                date: Some(utils::isoformat_to_date(&comic.timestamp)?),
                title: Some(comic.title),
                alt: Some(comic.alt_text),
                images: vec![utils::join_url(self.home, &comic.comic)],
                ..Default::default()
            }
            .with_extra("json_url", json_url),
        ))
    }
}

/// Numbers are read from the `/comic/<n>` links of the home page.
pub struct MrLovenstein {
    pub home: &'static str,
}

#[async_trait::async_trait]
impl NumberedComic for MrLovenstein {
    async fn first_and_last(&self, fetcher: &Fetcher) -> Result<(i64, i64), CrawlerError> {
        let html = fetcher.get_text(self.home).await?;
        let page = Page::parse(self.home, &html, Link::new(self.home));
        let nums = page
            .attrs("a[href]", "href")
            .iter()
            .filter_map(|href| regex_captures!(r"^/comic/([0-9]+)$", href))
            .filter_map(|(_, num)| num.parse::<i64>().ok())
            .minmax();
        match nums {
            MinMaxResult::NoElements => Err(page.missing("links to strips")),
            MinMaxResult::OneElement(num) => Ok((num, num)),
            MinMaxResult::MinMax(first, last) => Ok((first, last)),
        }
    }

    async fn strip_info(
        &self,
        fetcher: &Fetcher,
        num: i64,
    ) -> Result<Option<Strip>, CrawlerError> {
        const IMAGES: &str = r#"img[src^="/images/comics/"]"#;
        let url = utils::join_url(self.home, &format!("/comic/{}", num));
        let html = fetcher.get_text(&url).await?;
        let page = Page::parse(&url, &html, Link::new(url.as_str()));

        let mut images = page.images(IMAGES, "src");
        images.reverse();
        let texts = page
            .attrs(IMAGES, "title")
            .into_iter()
            .rev()
            .filter(|t| !t.is_empty())
            .join("  ");
        Ok(Some(
            Strip {
                url: url.clone(),
                images,
                ..Default::default()
            }
            .with_extra("texts", texts)
            .with_extra("description", page.meta("description")?),
        ))
    }
}

pub(super) fn comics() -> Vec<ComicEntry> {
    vec![
        ComicEntry::new(
            "xkcd",
            "xkcd",
            "http://xkcd.com",
            &["GEEKY"],
            Numbered(Xkcd {
                home: "http://xkcd.com/",
            }),
        ),
        ComicEntry::new(
            "deathbulge",
            "Death Bulge",
            "http://www.deathbulge.com",
            &[],
            Numbered(DeathBulge {
                home: "http://www.deathbulge.com",
            }),
        ),
        ComicEntry::new(
            "mrlovenstein",
            "Mr. Lovenstein",
            "http://www.mrlovenstein.com",
            &["MRLOVENSTEIN"],
            Numbered(MrLovenstein {
                home: "http://www.mrlovenstein.com",
            }),
        ),
    ]
}
