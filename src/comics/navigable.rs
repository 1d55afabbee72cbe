use super::{ComicEntry, Status};
use crate::{
    fetch::Fetcher,
    nav::{FirstStyle, Link, NavComic, NaviStyle, Navigable, NavigableComic, Page},
    strip::Strip,
    utils, CrawlerError,
};
use lazy_regex::regex_captures;

fn nav(
    home: &'static str,
    first: FirstStyle,
    navi: NaviStyle,
    parse: fn(&Page) -> Result<Strip, CrawlerError>,
) -> Navigable<NavComic> {
    Navigable(NavComic {
        home,
        first,
        navi,
        parse,
    })
}

/// Joined `title` attributes of the matched images.
fn image_titles(page: &Page, css: &str) -> String {
    page.attrs(css, "title")
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("  ")
}

fn smbc(page: &Page) -> Result<Strip, CrawlerError> {
    let mut images = page.images("img#cc-comic", "src");
    images.extend(page.images("div#aftercomic img", "src"));
    let ld: serde_json::Value =
        serde_json::from_str(&page.text(r#"script[type="application/ld+json"]"#)?)?;
    Ok(Strip {
        title: page.attr("img#cc-comic", "title").ok(),
        author: ld["author"].as_str().map(String::from),
        date: ld["datePublished"]
            .as_str()
            .map(utils::isoformat_to_date)
            .transpose()?,
        images,
        ..Default::default()
    })
}

fn efc(page: &Page) -> Result<Strip, CrawlerError> {
    let title = page.meta("og:title")?;
    Ok(Strip {
        date: Some(utils::isoformat_to_date(
            &page.meta("article:published_time")?,
        )?),
        images: page.meta_images("og:image"),
        prefix: Some(format!("{}-", title)),
        title: Some(title),
        ..Default::default()
    })
}

fn zenpencils(page: &Page) -> Result<Strip, CrawlerError> {
    Ok(Strip {
        title: Some(page.text("h2.post-title")?),
        author: page.text("div.post-content span.post-author a").ok(),
        date: Some(utils::string_to_date(
            &page.text("div.post-content span.post-date")?,
            "%B %d, %Y",
        )?),
        images: page.images("div#comic img", "src"),
        ..Default::default()
    })
}

fn nedroid(page: &Page) -> Result<Strip, CrawlerError> {
    let short_url = page.join(&page.attr(r#"link[rel="shortlink"]"#, "href")?);
    let (_, num) =
        regex_captures!(r"\?p=([0-9]+)", &short_url).ok_or_else(|| page.missing("post id"))?;
    let num = num.parse().ok();
    Ok(Strip {
        num,
        title: page.attr("div#comic img", "alt").ok(),
        images: page.images("div#comic img", "src"),
        ..Default::default()
    }
    .with_extra("title2", page.attr("div#comic img", "title").unwrap_or_default())
    .with_extra("short_url", short_url))
}

fn phd(page: &Page) -> Result<Strip, CrawlerError> {
    Ok(Strip {
        title: Some(page.meta("twitter:title")?),
        images: page.meta_images("og:image"),
        ..Default::default()
    })
}

fn oglaf(page: &Page) -> Result<Strip, CrawlerError> {
    let mut images = page.images("div#tt img", "src");
    images.extend(page.images("img#strip", "src"));
    let description = page
        .attrs("div#tt img, img#strip", "title")
        .join(" ");
    Ok(Strip {
        title: Some(page.text("title")?),
        images,
        ..Default::default()
    }
    .with_extra("description", description))
}

fn satw(page: &Page) -> Result<Strip, CrawlerError> {
    Ok(Strip {
        title: Some(page.meta("twitter:label1")?),
        images: page.images(r#"img[itemprop="image"]"#, "src"),
        ..Default::default()
    }
    .with_extra("description", page.meta("og:description")?))
}

fn monkeyuser(page: &Page) -> Result<Strip, CrawlerError> {
    Ok(Strip {
        title: Some(page.meta("og:title")?),
        date: Some(utils::string_to_date(
            &page.text("span.post-date time")?,
            "%d %b %Y",
        )?),
        images: page.meta_images("og:image"),
        ..Default::default()
    }
    .with_extra("description", page.meta("og:description")?))
}

fn commitstrip(page: &Page) -> Result<Strip, CrawlerError> {
    Ok(Strip {
        title: Some(page.meta("og:title")?),
        images: page.images("div.entry-content img", "src"),
        ..Default::default()
    }
    .with_extra("title2", page.attrs("div.entry-content img", "title").join(" "))
    .with_extra("description", page.meta("og:description")?))
}

fn boumeries(page: &Page, french: bool) -> Result<Strip, CrawlerError> {
    let date = page.text("span.post-date")?;
    let date = if french {
        utils::string_to_date(&utils::french_to_english(&date), "%d %B %Y")?
    } else {
        utils::string_to_date(&date, "%B %d, %Y")?
    };
    Ok(Strip {
        title: Some(page.text("h2.post-title")?),
        author: page.text("span.post-author a").ok(),
        date: Some(date),
        images: page.images("div#comic img", "src"),
        ..Default::default()
    }
    .with_extra("short_url", page.attr(r#"link[rel="shortlink"]"#, "href")?))
}

fn boumeries_en(page: &Page) -> Result<Strip, CrawlerError> {
    boumeries(page, false)
}

fn boumeries_fr(page: &Page) -> Result<Strip, CrawlerError> {
    boumeries(page, true)
}

/// WordPress with the Inkblot theme.
fn inkblot(page: &Page) -> Result<Strip, CrawlerError> {
    Ok(Strip {
        title: Some(page.meta("og:title")?),
        date: Some(utils::isoformat_to_date(
            &page.meta("article:published_time")?,
        )?),
        images: page.images("div.webcomic-image img", "src"),
        ..Default::default()
    })
}

fn boulet(page: &Page) -> Result<Strip, CrawlerError> {
    const IMAGES: &str = "div#notes div.storycontent img";
    Ok(Strip {
        title: page.text("title").ok(),
        date: utils::date_from_url(&page.url),
        images: page.images(IMAGES, "src"),
        ..Default::default()
    }
    .with_extra("texts", image_titles(page, IMAGES)))
}

fn lemonde(page: &Page) -> Result<Strip, CrawlerError> {
    Ok(Strip {
        title: Some(page.meta("og:title").unwrap_or_default()),
        date: Some(utils::isoformat_to_date(
            &page.attr("time.published", "datetime")?,
        )?),
        images: page.meta_images("og:image"),
        ..Default::default()
    }
    .with_extra("url2", page.attr(r#"link[rel="shortlink"]"#, "href")?))
}

fn mourrasmoinsbete(page: &Page) -> Result<Strip, CrawlerError> {
    Ok(Strip {
        title: Some(page.text("title")?),
        author: page.text(r#"span[itemprop="author"]"#).ok(),
        images: page.images(r#"div[itemprop="description articleBody"] img"#, "src"),
        ..Default::default()
    })
}

fn octopuns(page: &Page) -> Result<Strip, CrawlerError> {
    Ok(Strip {
        title: Some(page.text("h3.post-title.entry-title")?),
        date: Some(utils::string_to_date(
            &page.text("h2.date-header")?,
            "%A, %B %d, %Y",
        )?),
        images: page.images(r#"link[rel="image_src"]"#, "href"),
        ..Default::default()
    })
}

/// gocomics.com: the first strip is reached from the latest one.
pub struct GoComic {
    pub home: &'static str,
}

#[async_trait::async_trait]
impl NavigableComic for GoComic {
    async fn first_link(&self, fetcher: &Fetcher) -> Result<Link, CrawlerError> {
        let html = fetcher.get_text(self.home).await?;
        let latest = {
            let page = Page::parse(self.home, &html, Link::new(self.home));
            page.links(r#"a[data-link="comics"]"#)
                .into_iter()
                .next()
                .ok_or_else(|| page.missing("link to the comics"))?
        };

        let html = fetcher.get_text(&latest.href).await?;
        let page = Page::parse(&latest.href, &html, latest.clone());
        page.links("a.fa-backward")
            .into_iter()
            .next()
            .ok_or_else(|| page.missing("link to the first strip"))
    }

    fn navi_link(&self, page: &Page, next: bool) -> Option<Link> {
        let css = if next {
            "a.fa-caret-right"
        } else {
            "a.fa-caret-left.js-previous-comic"
        };
        page.links(css).into_iter().next()
    }

    fn strip_info(&self, page: &Page) -> Result<Option<Strip>, CrawlerError> {
        Ok(Some(
            Strip {
                date: Some(utils::string_to_date(
                    &page.meta("article:published_time")?,
                    "%Y-%m-%d",
                )?),
                author: page.meta("article:author").ok(),
                images: page.meta_images("og:image"),
                ..Default::default()
            }
            .with_extra("tags", page.meta("article:tag").unwrap_or_default()),
        ))
    }
}

fn lemonde_blog(
    name: &'static str,
    long_name: &'static str,
    url: &'static str,
    first: &'static str,
) -> ComicEntry {
    ComicEntry::new(
        name,
        long_name,
        url,
        &["LEMONDE", "FRANCAIS"],
        nav(url, FirstStyle::Url(first), NaviStyle::LinkRel, lemonde),
    )
}

fn gocomic(
    name: &'static str,
    long_name: &'static str,
    url: &'static str,
    categories: &'static [&'static str],
) -> ComicEntry {
    ComicEntry::new(
        name,
        long_name,
        url,
        categories,
        Navigable(GoComic { home: url }),
    )
}

pub(super) fn comics() -> Vec<ComicEntry> {
    use FirstStyle as F;
    use NaviStyle as N;

    vec![
        ComicEntry::new(
            "smbc",
            "Saturday Morning Breakfast Cereal",
            "http://www.smbc-comics.com",
            &["SMBC"],
            nav("http://www.smbc-comics.com", F::ARelFirst, N::ARel, smbc),
        ),
        ComicEntry::new(
            "efc",
            "Extra Fabulous Comics",
            "http://extrafabulouscomics.com",
            &["EFC"],
            nav(
                "http://extrafabulouscomics.com",
                F::Url("http://extrafabulouscomics.com/comic/buttfly/"),
                N::LinkRel,
                efc,
            ),
        ),
        ComicEntry::new(
            "zenpencils",
            "Zen Pencils",
            "http://zenpencils.com",
            &["ZENPENCILS"],
            nav(
                "http://zenpencils.com",
                F::Url("http://zenpencils.com/comic/1-ralph-waldo-emerson-make-them-cry/"),
                N::ComicNavNext,
                zenpencils,
            ),
        ),
        ComicEntry::new(
            "nedroid",
            "NeDroid",
            "http://nedroid.com",
            &[],
            nav("http://nedroid.com", F::DivNavFirst, N::LinkRel, nedroid),
        ),
        ComicEntry::new(
            "phd",
            "PhD Comics",
            "http://phdcomics.com/comics/archive.php",
            &[],
            nav(
                "http://phdcomics.com/comics/archive.php",
                F::Url("http://phdcomics.com/comics/archive.php?comicid=1"),
                N::ParentOf {
                    next: r#"img[src$="next_button.gif"]"#,
                    prev: r#"img[src$="prev_button.gif"]"#,
                },
                phd,
            ),
        ),
        ComicEntry::new(
            "oglaf",
            "Oglaf [NSFW]",
            "http://oglaf.com",
            &["NSFW"],
            nav(
                "http://oglaf.com",
                F::Url("https://www.oglaf.com/cumsprite/"),
                N::ARel,
                oglaf,
            ),
        ),
        ComicEntry::new(
            "satw",
            "Scandinavia And The World",
            "http://satwcomic.com",
            &[],
            nav(
                "http://satwcomic.com",
                F::Url("http://satwcomic.com/sweden-denmark-and-norway"),
                N::Css {
                    next: r#"a[accesskey="n"]"#,
                    prev: r#"a[accesskey="p"]"#,
                },
                satw,
            ),
        ),
        ComicEntry::new(
            "monkeyuser",
            "Monkey User",
            "http://www.monkeyuser.com",
            &["GEEKY"],
            nav(
                "http://www.monkeyuser.com",
                F::Url("http://www.monkeyuser.com/2016/project-lifecycle/"),
                N::Css {
                    next: r#"div[title="next"] a"#,
                    prev: r#"div[title="previous"] a"#,
                },
                monkeyuser,
            ),
        ),
        ComicEntry::new(
            "commit_fr",
            "Commit Strip (Fr)",
            "http://www.commitstrip.com/fr",
            &["COMMITSTRIP", "GEEKY", "FRANCAIS"],
            nav(
                "http://www.commitstrip.com/fr",
                F::Url("http://www.commitstrip.com/fr/2012/02/22/interview/"),
                N::ARel,
                commitstrip,
            ),
        ),
        ComicEntry::new(
            "commit_en",
            "Commit Strip (En)",
            "http://www.commitstrip.com/en",
            &["COMMITSTRIP", "GEEKY"],
            nav(
                "http://www.commitstrip.com/en",
                F::Url("http://www.commitstrip.com/en/2012/02/22/interview/"),
                N::ARel,
                commitstrip,
            ),
        ),
        ComicEntry::new(
            "boumeries_en",
            "Boumeries (En)",
            "http://comics.boumerie.com",
            &["BOUMERIES"],
            nav(
                "http://comics.boumerie.com",
                F::NaviFirst,
                N::LinkRel,
                boumeries_en,
            ),
        ),
        ComicEntry::new(
            "boumeries_fr",
            "Boumeries (Fr)",
            "http://bd.boumerie.com",
            &["BOUMERIES", "FRANCAIS"],
            nav("http://bd.boumerie.com", F::NaviFirst, N::LinkRel, boumeries_fr),
        ),
        ComicEntry::new(
            "stupid",
            "Everything's Stupid",
            "http://everythingsstupid.net",
            &["INKBLOT"],
            nav(
                "http://everythingsstupid.net",
                F::Css("a.first-webcomic-link"),
                N::ARel,
                inkblot,
            ),
        ),
        ComicEntry::new(
            "theism",
            "The Ism",
            "http://www.theism-comics.com",
            &["INKBLOT"],
            nav(
                "http://www.theism-comics.com",
                F::Css("a.first-webcomic-link"),
                N::LinkRel,
                inkblot,
            ),
        )
        .with_status(Status::Deleted),
        ComicEntry::new(
            "boulet",
            "Boulet Corp",
            "http://www.bouletcorp.com",
            &["BOULET", "FRANCAIS"],
            nav(
                "http://www.bouletcorp.com",
                F::Css("div#centered_nav a"),
                N::LinkRel,
                boulet,
            ),
        ),
        ComicEntry::new(
            "boulet_en",
            "Boulet Corp English",
            "http://english.bouletcorp.com",
            &["BOULET"],
            nav(
                "http://english.bouletcorp.com",
                F::Css("div#centered_nav a"),
                N::LinkRel,
                boulet,
            ),
        ),
        lemonde_blog(
            "zep",
            "Zep World",
            "http://zepworld.blog.lemonde.fr",
            "http://zepworld.blog.lemonde.fr/2014/10/31/bientot-le-blog-de-zep/",
        ),
        lemonde_blog(
            "vidberg",
            "Vidberg - l'actu en patates",
            "http://vidberg.blog.lemonde.fr",
            "http://vidberg.blog.lemonde.fr/2012/02/09/revue-de-campagne-la-campagne-du-modem-semballe/",
        ),
        lemonde_blog(
            "plantu",
            "Plantu",
            "http://plantu.blog.lemonde.fr",
            "http://plantu.blog.lemonde.fr/2014/10/28/stress-test-a-bruxelles/",
        ),
        lemonde_blog(
            "gorce",
            "Xavier Gorce",
            "http://xaviergorce.blog.lemonde.fr",
            "http://xaviergorce.blog.lemonde.fr/2015/01/09/distinction/",
        ),
        lemonde_blog(
            "forpeace",
            "Cartooning For Peace",
            "http://cartooningforpeace.blog.lemonde.fr",
            "http://cartooningforpeace.blog.lemonde.fr/2014/12/15/bado/",
        ),
        lemonde_blog(
            "lycee",
            "Une Annee au Lycee",
            "http://uneanneeaulycee.blog.lemonde.fr",
            "http://uneanneeaulycee.blog.lemonde.fr/2016/06/13/la-semaine-du-bac-est-arrivee/",
        ),
        lemonde_blog(
            "aurel",
            "Aurel",
            "http://aurel.blog.lemonde.fr",
            "http://aurel.blog.lemonde.fr/2014/09/29/le-senat-repasse-a-droite/",
        )
        .with_status(Status::Deleted),
        lemonde_blog(
            "culottees",
            "Les Culottees",
            "http://lesculottees.blog.lemonde.fr",
            "http://lesculottees.blog.lemonde.fr/2016/01/11/clementine-delait-femme-a-barbe/",
        )
        .with_status(Status::Deleted),
        lemonde_blog(
            "mandel",
            "Lisa Mandel (HP, hors-service)",
            "http://lisamandel.blog.lemonde.fr",
            "http://lisamandel.blog.lemonde.fr/2016/02/23/premiers-jours-a-calais/",
        )
        .with_status(Status::Deleted),
        ComicEntry::new(
            "mourrasmoinsbete",
            "Tu Mourras Moins Bete",
            "http://tumourrasmoinsbete.blogspot.fr",
            &["BLOGSPOT", "FRANCAIS"],
            nav(
                "http://tumourrasmoinsbete.blogspot.fr",
                F::Url("http://tumourrasmoinsbete.blogspot.fr/2008/06/essai.html"),
                N::Blogspot,
                mourrasmoinsbete,
            ),
        ),
        ComicEntry::new(
            "octopuns",
            "Octopuns",
            "http://www.octopuns.net",
            &["BLOGSPOT"],
            nav(
                "http://www.octopuns.net",
                F::Url("http://octopuns.blogspot.com/2010/12/17122010-always-read-label.html"),
                N::Blogspot,
                octopuns,
            ),
        ),
        gocomic(
            "smbc-goc",
            "Saturday Morning Breakfast Cereal (from GoComics)",
            "http://www.gocomics.com/saturday-morning-breakfast-cereal",
            &["GOCOMIC", "SMBC"],
        ),
        gocomic(
            "pearls",
            "Pearls Before Swine",
            "http://www.gocomics.com/pearlsbeforeswine",
            &["GOCOMIC"],
        ),
        gocomic(
            "peanuts",
            "Peanuts",
            "http://www.gocomics.com/peanuts",
            &["GOCOMIC"],
        ),
        gocomic(
            "wuerker",
            "Matt Wuerker",
            "http://www.gocomics.com/mattwuerker",
            &["GOCOMIC"],
        ),
        gocomic(
            "toles",
            "Tom Toles",
            "http://www.gocomics.com/tomtoles",
            &["GOCOMIC"],
        ),
        gocomic(
            "breakofday",
            "Break Of Day",
            "http://www.gocomics.com/break-of-day",
            &["GOCOMIC"],
        ),
        gocomic(
            "brevity",
            "Brevity",
            "http://www.gocomics.com/brevity",
            &["GOCOMIC"],
        ),
        gocomic(
            "ramirez",
            "Michael Ramirez",
            "http://www.gocomics.com/michaelramirez",
            &["GOCOMIC"],
        ),
        gocomic(
            "luckovich",
            "Mike Luckovich",
            "http://www.gocomics.com/mikeluckovich",
            &["GOCOMIC"],
        ),
        gocomic(
            "benton",
            "Jim Benton",
            "http://www.gocomics.com/jim-benton-cartoons",
            &["GOCOMIC"],
        ),
        gocomic(
            "argyle",
            "Argyle Sweater",
            "http://www.gocomics.com/theargylesweater",
            &["GOCOMIC"],
        ),
        gocomic(
            "sunny",
            "Sunny Street",
            "http://www.gocomics.com/sunny-street",
            &["GOCOMIC"],
        ),
        gocomic(
            "offthemark",
            "Off The Mark",
            "http://www.gocomics.com/offthemark",
            &["GOCOMIC"],
        ),
        gocomic(
            "wumo",
            "WuMo",
            "http://www.gocomics.com/wumo",
            &["GOCOMIC"],
        ),
        gocomic(
            "lunarbaboon",
            "Lunar Baboon",
            "http://www.gocomics.com/lunarbaboon",
            &["GOCOMIC"],
        ),
        gocomic(
            "sandersen-goc",
            "Sarah Andersen (from GoComics)",
            "http://www.gocomics.com/sarahs-scribbles",
            &["GOCOMIC"],
        ),
        gocomic(
            "calvin-goc",
            "Calvin and Hobbes (from GoComics)",
            "http://www.gocomics.com/calvinandhobbes",
            &["GOCOMIC"],
        ),
        gocomic(
            "rall-goc",
            "Ted Rall (from GoComics)",
            "http://www.gocomics.com/ted-rall",
            &["GOCOMIC", "RALL"],
        ),
        gocomic(
            "yeti-goc",
            "The Awkward Yeti (from GoComics)",
            "http://www.gocomics.com/the-awkward-yeti",
            &["GOCOMIC", "YETI"],
        ),
        gocomic(
            "berkeley-goc",
            "Berkeley Mews (from GoComics)",
            "http://www.gocomics.com/berkeley-mews",
            &["GOCOMIC", "BERKELEY"],
        ),
        gocomic(
            "sheldon-goc",
            "Sheldon Comics (from GoComics)",
            "http://www.gocomics.com/sheldon",
            &["GOCOMIC"],
        )
        .with_status(Status::Deleted),
        gocomic(
            "fowllanguage-goc",
            "Fowl Language Comics (from GoComics)",
            "http://www.gocomics.com/fowl-language",
            &["GOCOMIC", "FOWLLANGUAGE"],
        ),
        gocomic(
            "nickanderson",
            "Nick Anderson",
            "http://www.gocomics.com/nickanderson",
            &["GOCOMIC"],
        ),
        gocomic(
            "garfield-goc",
            "Garfield (from GoComics)",
            "http://www.gocomics.com/garfield",
            &["GOCOMIC", "GARFIELD"],
        ),
        gocomic(
            "dorrismc-goc",
            "Dorris Mc (from GoComics)",
            "http://www.gocomics.com/dorris-mccomics",
            &["GOCOMIC"],
        )
        .with_status(Status::Deleted),
        gocomic(
            "foxtrot",
            "FoxTrot",
            "http://www.gocomics.com/foxtrot",
            &["GOCOMIC"],
        ),
        gocomic(
            "foxtrot-classics",
            "FoxTrot Classics",
            "http://www.gocomics.com/foxtrotclassics",
            &["GOCOMIC"],
        ),
        gocomic(
            "dilbert-goc",
            "Dilbert Classics (from GoComics)",
            "http://www.gocomics.com/dilbert-classics",
            &["GOCOMIC"],
        ),
        gocomic(
            "mister-goc",
            "Mister & Me (from GoComics)",
            "http://www.gocomics.com/mister-and-me",
            &["GOCOMIC"],
        )
        .with_status(Status::Deleted),
        gocomic(
            "nonsequitur",
            "Non Sequitur",
            "http://www.gocomics.com/nonsequitur",
            &["GOCOMIC"],
        ),
        gocomic(
            "joeyalison",
            "Joey Alison Sayers (from GoComics)",
            "http://www.gocomics.com/joey-alison-sayers-comics",
            &["GOCOMIC"],
        ),
        gocomic(
            "savage-goc",
            "Savage Chicken (from GoComics)",
            "http://www.gocomics.com/savage-chickens",
            &["GOCOMIC"],
        ),
        gocomic(
            "owlturd-goc",
            "Owl Turd / Shen Comix (from GoComics)",
            "https://www.gocomics.com/shen-comix",
            &["GOCOMIC", "OWLTURD", "SHENCOMIX"],
        ),
        gocomic(
            "imogen-goc",
            "Imogen Quest (from GoComics)",
            "https://www.gocomics.com/imogen-quest",
            &["GOCOMIC", "IMOGEN"],
        ),
        gocomic(
            "picturesinboxes-goc",
            "Pictures in Boxes (from GoComics)",
            "https://www.gocomics.com/pictures-in-boxes",
            &["GOCOMIC", "PICTURESINBOXES"],
        )
        .with_status(Status::Deleted),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fetch::test_fetcher, nav::collect};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn page(url: &str, html: &str) -> Page {
        Page::parse(url, html, Link::new(url))
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn parses_smbc() {
        let html = r#"<html><head>
            <script type="application/ld+json">
            {"author": "Zach Weinersmith", "datePublished": "2019-08-17T14:25:35+00:00"}
            </script></head><body>
            <img id="cc-comic" title="Hello" src="/comics/1566047135-20190817.png">
            <div id="aftercomic"><img src="/comics/1566047135-20190817after.png"></div>
            </body></html>"#;
        let strip = smbc(&page("http://www.smbc-comics.com/comic/hello", html)).unwrap();
        assert_eq!(strip.title.as_deref(), Some("Hello"));
        assert_eq!(strip.author.as_deref(), Some("Zach Weinersmith"));
        assert_eq!(strip.date, date(2019, 8, 17));
        assert_eq!(
            strip.images,
            vec![
                "http://www.smbc-comics.com/comics/1566047135-20190817.png",
                "http://www.smbc-comics.com/comics/1566047135-20190817after.png",
            ]
        );
    }

    #[test]
    fn parses_french_dates() {
        let html = r#"<html><head><link rel="shortlink" href="http://bd.boumerie.com/?p=12"></head>
            <body><h2 class="post-title">Le titre</h2>
            <span class="post-author"><a href="/a">Boumeries</a></span>
            <span class="post-date">3 février 2016</span>
            <div id="comic"><img src="http://bd.boumerie.com/1.jpg" alt="x" title="x"></div>
            </body></html>"#;
        let strip = boumeries_fr(&page("http://bd.boumerie.com/bd/1", html)).unwrap();
        assert_eq!(strip.date, date(2016, 2, 3));
        assert_eq!(strip.author.as_deref(), Some("Boumeries"));
        assert_eq!(strip.extra["short_url"], "http://bd.boumerie.com/?p=12");
        assert!(matches!(
            boumeries_en(&page("http://bd.boumerie.com/bd/1", html)),
            Err(CrawlerError::DateError { .. })
        ));
    }

    #[test]
    fn parses_dates_from_url_and_short_links() {
        let html = r#"<html><head><title>Boulet</title></head><body><div id="notes">
            <div class="storycontent"><img src="http://www.bouletcorp.com/a.jpg" title="one">
            <img src="http://www.bouletcorp.com/b.jpg"></div></div></body></html>"#;
        let strip = boulet(&page("http://www.bouletcorp.com/blog/2014/03/21/zig/", html)).unwrap();
        assert_eq!(strip.date, date(2014, 3, 21));
        assert_eq!(strip.images.len(), 2);
        assert_eq!(strip.extra["texts"], "one");

        let html = r#"<html><head><link rel="shortlink" href="http://nedroid.com/?p=341">
            </head><body><div id="comic"><img src="/comics/beartato.png" alt="Bear" title="Tato">
            </div></body></html>"#;
        let strip = nedroid(&page("http://nedroid.com/2005/09/2210-whee/", html)).unwrap();
        assert_eq!(strip.num, Some(341));
        assert_eq!(strip.title.as_deref(), Some("Bear"));
        assert_eq!(strip.extra["title2"], "Tato");
        assert_eq!(strip.images, vec!["http://nedroid.com/comics/beartato.png"]);
    }

    #[tokio::test]
    async fn gocomics_start_from_the_oldest_strip() {
        let server = MockServer::start().await;
        let strip_page = |date: &str, nav: &str| {
            format!(
                r#"<html><head>
                <meta property="article:published_time" content="{date}">
                <meta property="article:author" content="Stephan Pastis">
                <meta property="article:tag" content="pigs">
                <meta property="og:image" content="https://assets.example.com/{date}.gif">
                </head><body>{nav}</body></html>"#,
                date = date,
                nav = nav
            )
        };
        let routes = [
            (
                "/pearls",
                r#"<a data-link="comics" href="/pearls/2020/01/02">Comics</a>"#.to_string(),
            ),
            (
                "/pearls/2020/01/02",
                strip_page(
                    "2020-01-02",
                    r#"<a class="fa btn fa-backward sm" href="/pearls/2020/01/01">First</a>"#,
                ),
            ),
            (
                "/pearls/2020/01/01",
                strip_page(
                    "2020-01-01",
                    r#"<a class="fa btn fa-caret-right sm" href="/pearls/2020/01/02">Next</a>"#,
                ),
            ),
        ];
        for (route, body) in routes {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200).set_body_string(body))
                .mount(&server)
                .await;
        }

        let home: &'static str = Box::leak(format!("{}/pearls", server.uri()).into_boxed_str());
        let fetcher = test_fetcher();
        let strips = collect(&Navigable(GoComic { home }), &fetcher, None)
            .await
            .unwrap();

        assert_eq!(strips.len(), 2);
        assert_eq!(strips[0].date, date(2020, 1, 1));
        assert_eq!(strips[1].date, date(2020, 1, 2));
        assert_eq!(strips[0].author.as_deref(), Some("Stephan Pastis"));
        assert_eq!(strips[0].extra["tags"], "pigs");
        assert_eq!(
            strips[1].images,
            vec!["https://assets.example.com/2020-01-02.gif"]
        );
    }
}
