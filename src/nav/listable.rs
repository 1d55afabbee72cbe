use super::{Link, Page, StripSender, StripSource};
use crate::{
    fetch::Fetcher,
    strip::{StoredStrip, Strip},
    CrawlerError,
};
use tracing::{debug, warn};

/// Comics with a single archive page listing every strip.
#[async_trait::async_trait]
pub trait ListableComic: Send + Sync {
    /// Archive entries, oldest first.
    async fn archive_links(&self, fetcher: &Fetcher) -> Result<Vec<Link>, CrawlerError>;

    fn url_from_link(&self, link: &Link) -> String {
        link.href.clone()
    }

    fn strip_info(&self, page: &Page) -> Result<Option<Strip>, CrawlerError>;
}

pub struct Listable<T>(pub T);

#[async_trait::async_trait]
impl<T: ListableComic> StripSource for Listable<T> {
    fn kind(&self) -> &'static str {
        "LISTABLE"
    }

    async fn crawl(
        &self,
        fetcher: &Fetcher,
        last: Option<&StoredStrip>,
        tx: &StripSender,
    ) -> Result<(), CrawlerError> {
        let links = self.0.archive_links(fetcher).await?;
        let urls: Vec<String> = links.iter().map(|l| self.0.url_from_link(l)).collect();

        let start = match last {
            Some(last) => match urls.iter().position(|url| *url == last.url) {
                Some(idx) => idx + 1,
                None => {
                    warn!(
                        "Did not find previous strip {} in the {} strips found: there might be a problem",
                        last.url,
                        urls.len()
                    );
                    return Ok(());
                }
            },
            None => 0,
        };

        for (url, link) in urls.into_iter().zip(links).skip(start) {
            debug!("Archive entry {}", url);
            let html = fetcher.get_text(&url).await?;
            let strip = {
                let page = Page::parse(&url, &html, link);
                self.0.strip_info(&page)?
            };
            if let Some(mut strip) = strip {
                strip.url = url;
                if !tx.send(strip).await {
                    break;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fetch::test_fetcher, nav::collect};
    use pretty_assertions::assert_eq;
    use wiremock::{
        matchers::{method, path_regex},
        Mock, MockServer, ResponseTemplate,
    };

    struct Archive {
        base: String,
    }

    #[async_trait::async_trait]
    impl ListableComic for Archive {
        async fn archive_links(&self, _: &Fetcher) -> Result<Vec<Link>, CrawlerError> {
            Ok((1..=3)
                .map(|n| Link {
                    href: format!("{}/strip/{}", self.base, n),
                    text: format!("Strip {}", n),
                    ..Default::default()
                })
                .collect())
        }

        fn strip_info(&self, page: &Page) -> Result<Option<Strip>, CrawlerError> {
            Ok(Some(Strip {
                title: Some(page.link.text.clone()),
                images: page.images("img", "src"),
                ..Default::default()
            }))
        }
    }

    #[tokio::test]
    async fn yields_entries_after_last_strip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex("^/strip/[0-9]+$"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"<img src="/a.png">"#))
            .mount(&server)
            .await;

        let fetcher = test_fetcher();
        let source = Listable(Archive { base: server.uri() });

        let strips = collect(&source, &fetcher, None).await.unwrap();
        assert_eq!(
            strips.iter().map(|s| s.title.clone().unwrap()).collect::<Vec<_>>(),
            vec!["Strip 1", "Strip 2", "Strip 3"]
        );

        let last = StoredStrip::stub(&format!("{}/strip/2", server.uri()), None);
        let strips = collect(&source, &fetcher, Some(&last)).await.unwrap();
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].url, format!("{}/strip/3", server.uri()));
        assert_eq!(strips[0].images, vec![format!("{}/a.png", server.uri())]);
    }

    #[tokio::test]
    async fn unknown_last_strip_yields_nothing() {
        let server = MockServer::start().await;
        let fetcher = test_fetcher();
        let source = Listable(Archive { base: server.uri() });

        let last = StoredStrip::stub("http://elsewhere/strip/9", None);
        assert!(collect(&source, &fetcher, Some(&last))
            .await
            .unwrap()
            .is_empty());
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
