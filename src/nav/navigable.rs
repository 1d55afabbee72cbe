use super::{FirstStyle, Link, NaviStyle, Page, StripSender, StripSource};
use crate::{
    fetch::Fetcher,
    strip::{StoredStrip, Strip},
    utils, CrawlerError,
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Comics with first/previous/next links.
#[async_trait::async_trait]
pub trait NavigableComic: Send + Sync {
    async fn first_link(&self, fetcher: &Fetcher) -> Result<Link, CrawlerError>;

    fn navi_link(&self, page: &Page, next: bool) -> Option<Link>;

    fn url_from_link(&self, link: &Link) -> String {
        link.href.clone()
    }

    /// `Ok(None)` skips the page but keeps following the chain.
    fn strip_info(&self, page: &Page) -> Result<Option<Strip>, CrawlerError>;
}

pub struct Navigable<T>(pub T);

impl<T: NavigableComic> Navigable<T> {
    /// Url the `next`/`prev` link of the page at `url` points to.
    async fn follow(
        &self,
        fetcher: &Fetcher,
        url: &str,
        next: bool,
    ) -> Result<Option<(String, Link)>, CrawlerError> {
        let html = fetcher.get_text(url).await?;
        let link = {
            let page = Page::parse(url, &html, Link::new(url));
            self.0.navi_link(&page, next)
        };
        Ok(link.map(|link| (utils::join_url(url, &self.0.url_from_link(&link)), link)))
    }
}

#[async_trait::async_trait]
impl<T: NavigableComic> StripSource for Navigable<T> {
    fn kind(&self) -> &'static str {
        "NAVIGABLE"
    }

    async fn crawl(
        &self,
        fetcher: &Fetcher,
        last: Option<&StoredStrip>,
        tx: &StripSender,
    ) -> Result<(), CrawlerError> {
        let mut visited = HashSet::new();
        let (mut url, mut link) = match last {
            Some(last) => {
                visited.insert(last.url.clone());
                match self.follow(fetcher, &last.url, true).await? {
                    Some((url, _)) if url == last.url => {
                        debug!("Next link of {} is itself", url);
                        return Ok(());
                    }
                    Some(next) => next,
                    None => return Ok(()),
                }
            }
            None => {
                let link = self.0.first_link(fetcher).await?;
                (utils::to_ascii_url(&self.0.url_from_link(&link)), link)
            }
        };

        loop {
            if !visited.insert(url.clone()) {
                warn!("Navigation loops back to {}", url);
                return Ok(());
            }

            let html = fetcher.get_text(&url).await?;
            let (strip, next) = {
                let page = Page::parse(&url, &html, link);
                (self.0.strip_info(&page)?, self.0.navi_link(&page, true))
            };

            if let Some(mut strip) = strip {
                strip.url = url.clone();
                if !tx.send(strip).await {
                    return Ok(());
                }
            }

            match next {
                Some(next) => {
                    let next_url = utils::join_url(&url, &self.0.url_from_link(&next));
                    if next_url == url {
                        debug!("Next link of {} is itself", url);
                        return Ok(());
                    }
                    url = next_url;
                    link = next;
                }
                None => return Ok(()),
            }
        }
    }

    async fn check_navigation(
        &self,
        fetcher: &Fetcher,
        url: Option<&str>,
    ) -> Result<Vec<String>, CrawlerError> {
        let mut problems = vec![];

        match self.0.first_link(fetcher).await {
            Ok(link) => {
                let first = self.0.url_from_link(&link);
                if let Err(e) = fetcher.get_text(&first).await {
                    problems.push(format!("Invalid first url {}: {}", first, e));
                }
            }
            Err(e) => problems.push(format!("No first link: {}", e)),
        }

        let url = match url {
            Some(url) => url,
            None => return Ok(problems),
        };

        let prev = self.follow(fetcher, url, false).await?;
        let next = self.follow(fetcher, url, true).await?;
        if prev.is_none() && next.is_none() {
            problems.push(format!("From {}: no previous nor next", url));
        }

        for (target, forward) in [(prev, true), (next, false)] {
            let Some((target, _)) = target else { continue };
            if target == url {
                continue;
            }
            let back = self
                .follow(fetcher, &target, forward)
                .await?
                .map(|(back, _)| back)
                .unwrap_or_else(|| "NO URL".to_string());
            if back != url {
                problems.push(format!(
                    "From {}, going {} leads to {}",
                    url,
                    if forward {
                        "backward then forward"
                    } else {
                        "forward then backward"
                    },
                    back
                ));
            }
        }

        Ok(problems)
    }
}

/// A navigable comic described by data: where to start, how to move and how
/// to read a page.
pub struct NavComic {
    pub home: &'static str,
    pub first: FirstStyle,
    pub navi: NaviStyle,
    pub parse: fn(&Page) -> Result<Strip, CrawlerError>,
}

#[async_trait::async_trait]
impl NavigableComic for NavComic {
    async fn first_link(&self, fetcher: &Fetcher) -> Result<Link, CrawlerError> {
        self.first.find(fetcher, self.home).await
    }

    fn navi_link(&self, page: &Page, next: bool) -> Option<Link> {
        self.navi.find(page, next)
    }

    fn strip_info(&self, page: &Page) -> Result<Option<Strip>, CrawlerError> {
        (self.parse)(page).map(Some)
    }
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

    fn parse(page: &Page) -> Result<Strip, CrawlerError> {
        Ok(Strip {
            title: Some(page.text("h1")?),
            images: page.images("div#comic img", "src"),
            ..Default::default()
        })
    }

    fn comic_page(n: u32, prev: Option<&str>, next: Option<&str>) -> String {
        let mut html = format!(
            r#"<html><head><title>{n}</title></head><body><h1>Strip {n}</h1>
               <div id="comic"><img src="/img/{n}.png"></div>"#,
            n = n
        );
        if let Some(prev) = prev {
            html.push_str(&format!(r#"<a rel="prev" href="{}">prev</a>"#, prev));
        }
        if let Some(next) = next {
            html.push_str(&format!(r#"<a rel="next" href="{}">next</a>"#, next));
        }
        html.push_str("</body></html>");
        html
    }

    async fn serve(server: &MockServer, route: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    fn stored(url: String) -> StoredStrip {
        StoredStrip::stub(&url, None)
    }

    fn source(server: &MockServer) -> Navigable<NavComic> {
        let first: &'static str = Box::leak(format!("{}/1", server.uri()).into_boxed_str());
        Navigable(NavComic {
            home: first,
            first: FirstStyle::Url(first),
            navi: NaviStyle::ARel,
            parse,
        })
    }

    #[tokio::test]
    async fn follows_chain_from_first_strip() {
        let server = MockServer::start().await;
        serve(&server, "/1", comic_page(1, None, Some("/2"))).await;
        serve(&server, "/2", comic_page(2, Some("/1"), Some("3"))).await;
        serve(&server, "/3", comic_page(3, Some("/2"), None)).await;

        let fetcher = test_fetcher();
        let strips = collect(&source(&server), &fetcher, None).await.unwrap();

        assert_eq!(
            strips.iter().map(|s| s.url.clone()).collect::<Vec<_>>(),
            vec![
                format!("{}/1", server.uri()),
                format!("{}/2", server.uri()),
                format!("{}/3", server.uri()),
            ]
        );
        assert_eq!(strips[1].title.as_deref(), Some("Strip 2"));
        assert_eq!(strips[2].images, vec![format!("{}/img/3.png", server.uri())]);
    }

    #[tokio::test]
    async fn resumes_after_last_strip() {
        let server = MockServer::start().await;
        serve(&server, "/2", comic_page(2, Some("/1"), Some("/3"))).await;
        serve(&server, "/3", comic_page(3, Some("/2"), None)).await;

        let fetcher = test_fetcher();
        let last = stored(format!("{}/2", server.uri()));
        let strips = collect(&source(&server), &fetcher, Some(&last)).await.unwrap();
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].url, format!("{}/3", server.uri()));

        // Nothing new after the latest strip.
        let last = stored(format!("{}/3", server.uri()));
        let strips = collect(&source(&server), &fetcher, Some(&last)).await.unwrap();
        assert!(strips.is_empty());
    }

    #[tokio::test]
    async fn stops_on_self_link_and_loops() {
        let server = MockServer::start().await;
        serve(&server, "/1", comic_page(1, None, Some("/2"))).await;
        serve(&server, "/2", comic_page(2, Some("/1"), Some("/2"))).await;
        let fetcher = test_fetcher();
        let strips = collect(&source(&server), &fetcher, None).await.unwrap();
        assert_eq!(strips.len(), 2);

        let server = MockServer::start().await;
        serve(&server, "/1", comic_page(1, None, Some("/2"))).await;
        serve(&server, "/2", comic_page(2, Some("/1"), Some("/1"))).await;
        let strips = collect(&source(&server), &fetcher, None).await.unwrap();
        assert_eq!(strips.len(), 2);
    }

    #[tokio::test]
    async fn stops_when_receiver_is_gone() {
        let server = MockServer::start().await;
        serve(&server, "/1", comic_page(1, None, Some("/2"))).await;
        serve(&server, "/2", comic_page(2, Some("/1"), None)).await;

        let fetcher = test_fetcher();
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        drop(rx);
        source(&server)
            .crawl(&fetcher, None, &StripSender::new(tx))
            .await
            .unwrap();
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn parse_errors_are_reported() {
        let server = MockServer::start().await;
        serve(&server, "/1", comic_page(1, None, Some("/2"))).await;
        serve(&server, "/2", "<html><body>gone</body></html>".to_string()).await;

        let fetcher = test_fetcher();
        let (tx, mut rx) = tokio::sync::mpsc::channel(10);
        let result = source(&server)
            .crawl(&fetcher, None, &StripSender::new(tx))
            .await;
        assert!(matches!(result, Err(CrawlerError::MissingElement { .. })));
        assert_eq!(rx.recv().await.unwrap().url, format!("{}/1", server.uri()));
    }

    #[tokio::test]
    async fn checks_navigation() {
        let server = MockServer::start().await;
        serve(&server, "/1", comic_page(1, None, Some("/2"))).await;
        serve(&server, "/2", comic_page(2, Some("/1"), Some("/3"))).await;
        serve(&server, "/3", comic_page(3, Some("/1"), None)).await;

        let fetcher = test_fetcher();
        let src = source(&server);

        let url = format!("{}/1", server.uri());
        assert!(src
            .check_navigation(&fetcher, Some(&url))
            .await
            .unwrap()
            .is_empty());

        let url = format!("{}/2", server.uri());
        let problems = src.check_navigation(&fetcher, Some(&url)).await.unwrap();
        assert_eq!(
            problems,
            vec![format!(
                "From {u}/2, going forward then backward leads to {u}/1",
                u = server.uri()
            )]
        );
    }
}
