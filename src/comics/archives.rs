use super::ComicEntry;
use crate::{
    fetch::Fetcher,
    nav::{Link, Listable, ListableComic, Page},
    strip::Strip,
    utils, CrawlerError,
};
use lazy_regex::regex_captures;

async fn archive_page(fetcher: &Fetcher, url: &str, css: &str) -> Result<Vec<Link>, CrawlerError> {
    let html = fetcher.get_text(url).await?;
    let page = Page::parse(url, &html, Link::new(url));
    Ok(page.links(css))
}

pub struct DinosaurComics {
    pub home: &'static str,
}

#[async_trait::async_trait]
impl ListableComic for DinosaurComics {
    async fn archive_links(&self, fetcher: &Fetcher) -> Result<Vec<Link>, CrawlerError> {
        let url = utils::join_url(self.home, "archive.php");
        let mut links: Vec<Link> = archive_page(fetcher, &url, "a[href]")
            .await?
            .into_iter()
            .filter(|l| regex_captures!(r"/index\.php\?comic=[0-9]+$", &l.href).is_some())
            // The first one is a random strip.
            .skip(1)
            .collect();
        links.reverse();
        Ok(links)
    }

    fn strip_info(&self, page: &Page) -> Result<Option<Strip>, CrawlerError> {
        let (_, num) = regex_captures!(r"comic=([0-9]+)$", &page.link.href)
            .ok_or_else(|| page.missing("strip number"))?;
        let date = utils::string_to_date(
            &utils::remove_ordinal_suffixes(&page.link.text),
            "%B %d, %Y",
        )?;
        Ok(Some(
            Strip {
                num: num.parse().ok(),
                date: Some(date),
                title: page.text("title").ok(),
                images: page.meta_images("og:image"),
                ..Default::default()
            }
            .with_extra("description", page.meta("og:description").unwrap_or_default()),
        ))
    }
}

pub struct PerryBibleFellowship {
    pub home: &'static str,
}

#[async_trait::async_trait]
impl ListableComic for PerryBibleFellowship {
    async fn archive_links(&self, fetcher: &Fetcher) -> Result<Vec<Link>, CrawlerError> {
        let mut links = archive_page(fetcher, self.home, "div#all_thumbnails a").await?;
        links.reverse();
        Ok(links)
    }

    fn strip_info(&self, page: &Page) -> Result<Option<Strip>, CrawlerError> {
        Ok(Some(
            Strip::new(page.meta_images("og:image")).with_extra("name", page.meta("og:title")?),
        ))
    }
}

pub struct AbstruseGoose {
    pub home: &'static str,
}

#[async_trait::async_trait]
impl ListableComic for AbstruseGoose {
    async fn archive_links(&self, fetcher: &Fetcher) -> Result<Vec<Link>, CrawlerError> {
        let url = utils::join_url(self.home, "/archive");
        Ok(archive_page(fetcher, &url, "a[href]")
            .await?
            .into_iter()
            .filter(|l| l.href.starts_with(self.home))
            .filter(|l| regex_captures!(r"/[0-9]+$", &l.href).is_some())
            .collect())
    }

    fn strip_info(&self, page: &Page) -> Result<Option<Strip>, CrawlerError> {
        let (_, num) = regex_captures!(r"/([0-9]+)$", &page.link.href)
            .ok_or_else(|| page.missing("strip number"))?;
        Ok(Some(Strip {
            num: num.parse().ok(),
            title: Some(page.link.text.clone()),
            images: page.images(r#"img[src*="/strips/"]"#, "src"),
            ..Default::default()
        }))
    }
}

pub struct PoorlyDrawnLines {
    pub home: &'static str,
}

#[async_trait::async_trait]
impl ListableComic for PoorlyDrawnLines {
    async fn archive_links(&self, fetcher: &Fetcher) -> Result<Vec<Link>, CrawlerError> {
        let url = utils::join_url(self.home, "/archive");
        let mut links = archive_page(fetcher, &url, r#"a[href*="/comic/"]"#).await?;
        links.reverse();
        Ok(links)
    }

    fn strip_info(&self, page: &Page) -> Result<Option<Strip>, CrawlerError> {
        Ok(Some(Strip {
            title: page.attrs("div.post img", "title").into_iter().next(),
            images: page.images("div.post img", "src"),
            ..Default::default()
        }))
    }
}

pub(super) fn comics() -> Vec<ComicEntry> {
    vec![
        ComicEntry::new(
            "dinosaur",
            "Dinosaur Comics",
            "http://www.qwantz.com",
            &[],
            Listable(DinosaurComics {
                home: "http://www.qwantz.com",
            }),
        ),
        ComicEntry::new(
            "pbf",
            "Perry Bible Fellowship",
            "http://pbfcomics.com",
            &[],
            Listable(PerryBibleFellowship {
                home: "http://pbfcomics.com",
            }),
        ),
        ComicEntry::new(
            "abstruse",
            "Abstruse Goose",
            "http://abstrusegoose.com",
            &["GEEKY"],
            Listable(AbstruseGoose {
                home: "http://abstrusegoose.com",
            }),
        ),
        ComicEntry::new(
            "poorlydrawn",
            "Poorly Drawn Lines",
            "https://poorlydrawnlines.com",
            &["POORLYDRAWN"],
            Listable(PoorlyDrawnLines {
                home: "https://poorlydrawnlines.com",
            }),
        ),
    ]
}
