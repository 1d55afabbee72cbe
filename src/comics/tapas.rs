use super::ComicEntry;
use crate::{
    fetch::Fetcher,
    nav::{text_of, ArchivePage, Link, Page, Paginated, PaginatedComic},
    strip::{StoredStrip, Strip},
    utils, CrawlerError,
};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use scraper::Selector;
use tracing::warn;

const E: &str = "Invalid selector";
lazy_static! {
    static ref EPISODE: Selector = Selector::parse("li.content__item a").expect(E);
    static ref EPISODE_TITLE: Selector = Selector::parse("div.info__title").expect(E);
    static ref EPISODE_INFO: Selector = Selector::parse("div.info__tag").expect(E);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    pub url: String,
    pub id: i64,
    pub number: i64,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub coming_soon: bool,
}

/// "Jan 02, 2018 &bullet; 1.2k views" -> 2018-01-02
fn episode_date(info: &str) -> Option<NaiveDate> {
    let date = info.split(['•', '&']).next()?;
    utils::string_to_date(date, "%b %d, %Y").ok()
}

fn episodes(page: &Page) -> Vec<Episode> {
    page.doc
        .select(&EPISODE)
        .filter_map(|a| {
            let attr = |name: &str| a.value().attr(name).and_then(|v| v.trim().parse().ok());
            Some(Episode {
                url: page.join(a.value().attr("href")?),
                id: attr("data-id")?,
                number: attr("data-scene-number").unwrap_or_default(),
                title: a.select(&EPISODE_TITLE).next().map(text_of).unwrap_or_default(),
                date: a
                    .select(&EPISODE_INFO)
                    .next()
                    .map(text_of)
                    .and_then(|info| episode_date(&info)),
                coming_soon: a.value().classes().any(|c| c == "js-coming-soon"),
            })
        })
        .collect()
}

fn episode_id(strip: &StoredStrip) -> Option<i64> {
    strip.extra.get("episode_id").and_then(|id| id.parse().ok())
}

pub struct Tapas {
    pub home: &'static str,
}

#[async_trait::async_trait]
impl PaginatedComic for Tapas {
    type Entry = Episode;

    async fn archive_page(
        &self,
        fetcher: &Fetcher,
        cursor: Option<String>,
    ) -> Result<ArchivePage<Episode>, CrawlerError> {
        let url = cursor.unwrap_or_else(|| self.home.to_string());
        let html = fetcher.get_text(&url).await?;
        let page = Page::parse(&url, &html, Link::new(url.as_str()));
        Ok(ArchivePage {
            entries: episodes(&page),
            next: page
                .links("a.paging__button--next")
                .into_iter()
                .next()
                .map(|l| l.href),
        })
    }

    fn is_last_strip(&self, entry: &Episode, last: &StoredStrip) -> bool {
        episode_id(last) == Some(entry.id)
    }

    async fn last_strip_is_valid(&self, fetcher: &Fetcher, last: &StoredStrip) -> bool {
        if fetcher.is_reachable(&last.url).await {
            return true;
        }
        if fetcher.is_reachable(self.home).await {
            warn!("Did not find previous post {}: it might have been deleted", last.url);
        } else {
            warn!("Did not find previous post nor main url {}", self.home);
        }
        false
    }

    async fn strip_info(
        &self,
        fetcher: &Fetcher,
        episode: Episode,
    ) -> Result<Option<Strip>, CrawlerError> {
        if episode.coming_soon {
            warn!("Strip {} is being uploaded, retry later", episode.url);
            return Ok(None);
        }

        let html = fetcher.get_text(&episode.url).await?;
        let page = Page::parse(&episode.url, &html, Link::new(episode.url.as_str()));
        let images = page.images("img.content__img", "data-src");
        if images.is_empty() {
            return Err(page.missing("images"));
        }

        Ok(Some(
            Strip {
                url: episode.url.clone(),
                date: episode.date,
                title: Some(episode.title.clone()),
                images,
                ..Default::default()
            }
            .with_extra("episode_num", episode.number.to_string())
            .with_extra("episode_id", episode.id.to_string()),
        ))
    }
}

fn tapas(
    name: &'static str,
    long_name: &'static str,
    url: &'static str,
    categories: &'static [&'static str],
) -> ComicEntry {
    ComicEntry::new(name, long_name, url, categories, Paginated(Tapas { home: url }))
}

pub(super) fn comics() -> Vec<ComicEntry> {
    vec![
        tapas(
            "vegetables",
            "Vegetables For Dessert",
            "https://tapas.io/series/vegetablesfordessert",
            &["TAPAS"],
        ),
        tapas(
            "mrlovenstein-tapa",
            "Mr. Lovenstein (from Tapas.io)",
            "https://tapas.io/series/MrLovenstein",
            &["TAPAS", "MRLOVENSTEIN"],
        ),
        tapas(
            "fowllanguage-tapa",
            "Fowl Language Comics (from Tapas.io)",
            "https://tapas.io/series/Fowl-Language-Comics",
            &["TAPAS"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fetch::test_fetcher, nav::collect};
    use pretty_assertions::assert_eq;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn episode(id: i64, date: &str, coming_soon: bool) -> String {
        format!(
            r#"<li class="content__item"><a href="/episode/{id}" data-id="{id}"
                data-scene-number="{id}" class="ga-tracking js-episode{soon}">
                <div class="info__title"> Episode {id} </div>
                <div class="info__tag">{date} &bullet; 12 views</div></a></li>"#,
            id = id,
            date = date,
            soon = if coming_soon { " js-coming-soon" } else { "" }
        )
    }

    async fn serve(server: &MockServer, route: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[test]
    fn reads_episode_dates() {
        assert_eq!(
            episode_date("Jan 02, 2018 • 1.2k views"),
            NaiveDate::from_ymd_opt(2018, 1, 2)
        );
        assert_eq!(
            episode_date("Mar 15, 2017 &bullet; 3 views"),
            NaiveDate::from_ymd_opt(2017, 3, 15)
        );
        assert_eq!(episode_date("soon"), None);
    }

    #[tokio::test]
    async fn follows_pages_and_skips_coming_soon() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/series/test",
            format!(
                r#"<ul>{}{}</ul><a class="paging__button paging__button--next" href="/series/test/2">next</a>"#,
                episode(4, "Feb 01, 2019", true),
                episode(3, "Jan 20, 2019", false),
            ),
        )
        .await;
        serve(
            &server,
            "/series/test/2",
            format!(
                "<ul>{}{}</ul>",
                episode(2, "Jan 10, 2019", false),
                episode(1, "Jan 01, 2019", false)
            ),
        )
        .await;
        for id in 1..=3 {
            serve(
                &server,
                &format!("/episode/{}", id),
                format!(
                    r#"<img class="content__img js-lazy" data-src="/img/{}.jpg" src="">"#,
                    id
                ),
            )
            .await;
        }

        let home: &'static str =
            Box::leak(format!("{}/series/test", server.uri()).into_boxed_str());
        let fetcher = test_fetcher();
        let source = Paginated(Tapas { home });

        let mut last = StoredStrip::stub(&format!("{}/episode/1", server.uri()), None);
        last.extra.insert("episode_id".into(), "1".into());
        let strips = collect(&source, &fetcher, Some(&last)).await.unwrap();

        assert_eq!(strips.len(), 2);
        assert_eq!(strips[0].title.as_deref(), Some("Episode 2"));
        assert_eq!(strips[0].date, NaiveDate::from_ymd_opt(2019, 1, 10));
        assert_eq!(
            strips[0].images,
            vec![format!("{}/img/2.jpg", server.uri())]
        );
        assert_eq!(strips[1].extra["episode_id"], "3");
    }
}
