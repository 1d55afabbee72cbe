use super::{Link, Page};
use crate::{fetch::Fetcher, CrawlerError};
use scraper::ElementRef;

/// How to find the previous/next strip from a strip page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaviStyle {
    /// `<link rel="next">`
    LinkRel,
    /// `<a rel="next">`
    ARel,
    /// `<a title="Next">`
    ATitle,
    /// ComicPress
    ComicPress,
    ComicNavNext,
    ComicNavBase,
    /// Blogspot pager.
    Blogspot,
    Css {
        next: &'static str,
        prev: &'static str,
    },
    /// The anchor wrapping the matched element (usually an arrow image).
    ParentOf {
        next: &'static str,
        prev: &'static str,
    },
}

impl NaviStyle {
    fn css(&self, next: bool) -> &'static str {
        use NaviStyle::*;
        match (self, next) {
            (LinkRel, true) => r#"link[rel~="next"]"#,
            (LinkRel, false) => r#"link[rel~="prev"]"#,
            (ARel, true) => r#"a[rel~="next"]"#,
            (ARel, false) => r#"a[rel~="prev"]"#,
            (ATitle, true) => r#"a[title="Next"]"#,
            (ATitle, false) => r#"a[title="Previous"]"#,
            (ComicPress, true) => "a.navi.navi-next:not(.comic-nav-next)",
            (ComicPress, false) => "a.navi.navi-prev:not(.comic-nav-previous)",
            (ComicNavNext, true) => "a.navi.comic-nav-next.navi-next",
            (ComicNavNext, false) => "a.navi.comic-nav-previous.navi-prev",
            (ComicNavBase, true) => "a.comic-nav-base.comic-nav-next",
            (ComicNavBase, false) => "a.comic-nav-base.comic-nav-previous",
            (Blogspot, true) => "a#Blog1_blog-pager-newer-link",
            (Blogspot, false) => "a#Blog1_blog-pager-older-link",
            (Css { next, .. }, true) | (ParentOf { next, .. }, true) => *next,
            (Css { prev, .. }, false) | (ParentOf { prev, .. }, false) => *prev,
        }
    }

    pub fn find(&self, page: &Page, next: bool) -> Option<Link> {
        let el = page.select(self.css(next)).into_iter().next()?;
        let el = match self {
            NaviStyle::ParentOf { .. } => el.parent().and_then(ElementRef::wrap)?,
            _ => el,
        };
        page.link_from(el)
    }
}

/// How to find the very first strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstStyle {
    /// Hardcoded url.
    Url(&'static str),
    NaviFirst,
    ATitleFirst,
    DivNavFirst,
    ComicNavBaseFirst,
    ARelFirst,
    ARelStart,
    /// First element matching the selector on the home page.
    Css(&'static str),
}

impl FirstStyle {
    pub async fn find(&self, fetcher: &Fetcher, home: &str) -> Result<Link, CrawlerError> {
        use FirstStyle::*;
        let css = match self {
            Url(url) => return Ok(Link::new(*url)),
            NaviFirst => "a.navi.navi-first",
            ATitleFirst => r#"a[title="First"]"#,
            DivNavFirst => "div.nav-first a",
            ComicNavBaseFirst => "a.comic-nav-base.comic-nav-first",
            ARelFirst => r#"a[rel~="first"]"#,
            ARelStart => r#"a[rel~="start"]"#,
            Css(css) => *css,
        };

        let html = fetcher.get_text(home).await?;
        let page = Page::parse(home, &html, Link::new(home));
        page.links(css)
            .into_iter()
            .next()
            .ok_or_else(|| page.missing("link to the first strip"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::test_fetcher;
    use pretty_assertions::assert_eq;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn page(html: &str) -> Page {
        Page::parse("http://example.com/c/5/", html, Link::new("http://example.com/c/5/"))
    }

    fn href(style: NaviStyle, html: &str, next: bool) -> Option<String> {
        style.find(&page(html), next).map(|l| l.href)
    }

    #[test]
    fn finds_navigation_links() {
        let html = r#"<html><head>
            <link rel="prev" href="/c/4/"><link rel="next" href="/c/6/">
            </head><body>
            <a rel="nofollow next" href="6b">n</a>
            <a title="Previous" href="/c/4c/">p</a>
            <a class="navi comic-nav-next navi-next" href="/c/6d/">n</a>
            <a class="comic-nav-base comic-nav-previous" href="/c/4e/">p</a>
            <a class="navi navi-prev" href="/c/4f/">p</a>
            <a id="Blog1_blog-pager-newer-link" href="http://blog.example.com/6.html">n</a>
            <a href="/c/6g/"><img src="/next.gif"></a>
            <li class="link-next"><a href="/c/6h/">n</a></li>
            </body></html>"#;

        use NaviStyle::*;
        assert_eq!(href(LinkRel, html, true).unwrap(), "http://example.com/c/6/");
        assert_eq!(href(LinkRel, html, false).unwrap(), "http://example.com/c/4/");
        assert_eq!(href(ARel, html, true).unwrap(), "http://example.com/c/5/6b");
        assert_eq!(href(ARel, html, false), None);
        assert_eq!(href(ATitle, html, false).unwrap(), "http://example.com/c/4c/");
        assert_eq!(href(ATitle, html, true), None);
        assert_eq!(href(ComicNavNext, html, true).unwrap(), "http://example.com/c/6d/");
        assert_eq!(href(ComicNavBase, html, false).unwrap(), "http://example.com/c/4e/");
        // Plain ComicPress links only, not the comic-nav variant.
        assert_eq!(href(ComicPress, html, true), None);
        assert_eq!(href(ComicPress, html, false).unwrap(), "http://example.com/c/4f/");
        assert_eq!(href(ComicNavNext, html, false), None);
        assert_eq!(
            href(Blogspot, html, true).unwrap(),
            "http://blog.example.com/6.html"
        );
        assert_eq!(
            href(
                ParentOf {
                    next: r#"img[src="/next.gif"]"#,
                    prev: r#"img[src="/prev.gif"]"#
                },
                html,
                true
            )
            .unwrap(),
            "http://example.com/c/6g/"
        );
        assert_eq!(
            href(
                Css {
                    next: "li.link-next a",
                    prev: "li.link-prev a"
                },
                html,
                true
            )
            .unwrap(),
            "http://example.com/c/6h/"
        );
    }

    #[tokio::test]
    async fn finds_first_link_on_home_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<div class="nav-first"><a href="/comic/1">First</a></div>"#,
            ))
            .mount(&server)
            .await;

        let fetcher = test_fetcher();
        let home = format!("{}/", server.uri());
        let link = FirstStyle::DivNavFirst.find(&fetcher, &home).await.unwrap();
        assert_eq!(link.href, format!("{}/comic/1", server.uri()));
        assert_eq!(link.text, "First");

        assert!(FirstStyle::NaviFirst.find(&fetcher, &home).await.is_err());

        let link = FirstStyle::Url("http://example.com/1")
            .find(&fetcher, &home)
            .await
            .unwrap();
        assert_eq!(link, Link::new("http://example.com/1"));
    }
}
