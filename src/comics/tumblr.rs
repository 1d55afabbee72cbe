//! Tumblr blogs, read through the v1 API (`/api/read/`).

use super::{ComicEntry, Status};
use crate::{
    fetch::Fetcher,
    nav::{text_of, ArchivePage, Paginated, PaginatedComic},
    strip::{StoredStrip, Strip},
    utils, CrawlerError,
};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

const POSTS_PER_CALL: i64 = 10;

const E: &str = "Invalid selector";
lazy_static! {
    static ref POSTS: Selector = Selector::parse("posts").expect(E);
    static ref POST: Selector = Selector::parse("post").expect(E);
    static ref PHOTO: Selector = Selector::parse("photo").expect(E);
    static ref PHOTO_URL: Selector = Selector::parse("photo-url").expect(E);
    static ref CAPTION: Selector = Selector::parse("photo-caption").expect(E);
    static ref TAG: Selector = Selector::parse("tag").expect(E);
}

#[derive(Debug, Clone, PartialEq)]
pub struct TumblrPost {
    pub id: i64,
    pub kind: String,
    pub url: String,
    pub url_with_slug: String,
    pub timestamp: i64,
    pub caption: String,
    pub tags: Vec<String>,
    pub images: Vec<String>,
}

impl TumblrPost {
    fn from_element(post: ElementRef<'_>) -> Option<Self> {
        let attr = |name: &str| post.value().attr(name).unwrap_or_default().to_string();

        // Photo sets list every photo, single photos sit right in the post.
        let mut photos: Vec<ElementRef> = post.select(&PHOTO).collect();
        if photos.is_empty() {
            photos.push(post);
        }
        // Several resolutions are given, the first one is the largest.
        let images = photos
            .into_iter()
            .filter_map(|photo| photo.select(&PHOTO_URL).next())
            .map(text_of)
            .collect();

        Some(TumblrPost {
            id: attr("id").parse().ok()?,
            kind: attr("type").to_lowercase(),
            url: attr("url"),
            url_with_slug: attr("url-with-slug"),
            timestamp: attr("unix-timestamp").parse().unwrap_or_default(),
            caption: post.select(&CAPTION).next().map(text_of).unwrap_or_default(),
            tags: post.select(&TAG).map(text_of).collect(),
            images,
        })
    }
}

/// Posts of an API answer with the `start` and `total` announced.
fn parse_posts(xml: &str) -> Option<(Vec<TumblrPost>, i64, i64)> {
    let doc = Html::parse_document(xml);
    let posts = doc.select(&POSTS).next()?;
    let start = posts.value().attr("start")?.parse().ok()?;
    let total = posts.value().attr("total")?.parse().ok()?;
    let entries = posts
        .select(&POST)
        .filter_map(TumblrPost::from_element)
        .collect();
    Some((entries, start, total))
}

pub struct Tumblr {
    pub home: &'static str,
}

impl Tumblr {
    fn api_url(&self) -> String {
        utils::join_url(self.home, "/api/read/")
    }

    fn api_url_for_id(&self, id: i64) -> String {
        format!("{}?id={}", self.api_url(), id)
    }
}

fn tumblr_id(strip: &StoredStrip) -> Option<i64> {
    strip.extra.get("tumblr-id").and_then(|id| id.parse().ok())
}

#[async_trait::async_trait]
impl PaginatedComic for Tumblr {
    type Entry = TumblrPost;

    async fn archive_page(
        &self,
        fetcher: &Fetcher,
        cursor: Option<String>,
    ) -> Result<ArchivePage<TumblrPost>, CrawlerError> {
        let start: i64 = cursor.and_then(|c| c.parse().ok()).unwrap_or(0);
        let url = format!("{}?start={}&num={}", self.api_url(), start, POSTS_PER_CALL);
        let xml = fetcher.get_text(&url).await?;

        let (entries, found_start, total) = match parse_posts(&xml) {
            Some(posts) => posts,
            None => {
                warn!("Could not get post info from {}", url);
                return Ok(ArchivePage {
                    entries: vec![],
                    next: None,
                });
            }
        };
        if found_start != start {
            warn!("Asked for posts from {}, got them from {}", start, found_start);
        }

        let next_start = start + POSTS_PER_CALL;
        Ok(ArchivePage {
            entries,
            next: (next_start < total).then(|| next_start.to_string()),
        })
    }

    fn is_last_strip(&self, entry: &TumblrPost, last: &StoredStrip) -> bool {
        tumblr_id(last) == Some(entry.id)
    }

    async fn last_strip_is_valid(&self, fetcher: &Fetcher, last: &StoredStrip) -> bool {
        let api_url = match tumblr_id(last) {
            Some(id) => self.api_url_for_id(id),
            None => {
                warn!("No tumblr id stored for {}", last.url);
                return false;
            }
        };
        if fetcher.is_reachable(&api_url).await {
            return true;
        }
        if fetcher.is_reachable(self.home).await {
            warn!("Did not find previous post {}: it might have been deleted", api_url);
        } else {
            warn!("Did not find previous post nor main url {}", self.home);
        }
        false
    }

    async fn strip_info(
        &self,
        _fetcher: &Fetcher,
        post: TumblrPost,
    ) -> Result<Option<Strip>, CrawlerError> {
        if post.kind != "photo" {
            return Ok(None);
        }
        if !post.url.starts_with(self.home.trim_end_matches('/')) {
            warn!("Url {} does not start with {}", post.url, self.home);
        }
        Ok(Some(
            Strip {
                url: post.url,
                date: utils::timestamp_to_date(post.timestamp),
                title: Some(post.caption).filter(|c| !c.is_empty()),
                images: post.images,
                ..Default::default()
            }
            .with_extra("url2", post.url_with_slug)
            .with_extra("tags", post.tags.join(" "))
            .with_extra("tumblr-id", post.id.to_string())
            .with_extra("api_url", self.api_url_for_id(post.id)),
        ))
    }
}

fn tumblr(
    name: &'static str,
    long_name: &'static str,
    url: &'static str,
    categories: &'static [&'static str],
) -> ComicEntry {
    ComicEntry::new(name, long_name, url, categories, Paginated(Tumblr { home: url }))
}

pub(super) fn comics() -> Vec<ComicEntry> {
    vec![
        tumblr(
            "smbc-tumblr",
            "Saturday Morning Breakfast Cereal (from Tumblr)",
            "https://smbc-comics.tumblr.com",
            &["TUMBLR", "SMBC"],
        ),
        tumblr(
            "poorlydrawn-tumblr",
            "Poorly Drawn Lines (from Tumblr)",
            "https://pdlcomics.tumblr.com",
            &["TUMBLR", "POORLYDRAWN"],
        ),
        tumblr(
            "zenpencils-tumblr",
            "Zen Pencils (from Tumblr)",
            "https://zenpencils.tumblr.com",
            &["TUMBLR", "ZENPENCILS"],
        ),
        tumblr(
            "boulet-tumblr",
            "Boulet Corp (from Tumblr)",
            "https://bouletcorp.tumblr.com",
            &["TUMBLR", "BOULET"],
        ),
        tumblr(
            "efc-tumblr",
            "Extra Fabulous Comics (from Tumblr)",
            "https://extrafabulouscomics.tumblr.com",
            &["TUMBLR", "EFC"],
        ),
        tumblr(
            "boumeries-tumblr",
            "Boumeries (from Tumblr)",
            "https://boumeries.tumblr.com",
            &["TUMBLR", "BOUMERIES"],
        ),
        tumblr(
            "threeword-tumblr",
            "Three Word Phrase (from Tumblr)",
            "https://threewordphrase.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "mousebear-tumblr",
            "Mouse Bear Comedy (from Tumblr)",
            "https://mousebearcomedy.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "octopuns-tumblr",
            "Octopuns (from Tumblr)",
            "http://octopuns.tumblr.com",
            &["TUMBLR", "DELETEDTUMBLR"],
        )
        .with_status(Status::Deleted),
        tumblr(
            "endangered-tumblr",
            "Safely Endangered (from Tumblr)",
            "https://tumblr.safelyendangered.com",
            &["TUMBLR", "DELETEDTUMBLR"],
        )
        .with_status(Status::Deleted),
        tumblr(
            "lack",
            "For Lack Of A Better Comic",
            "http://forlackofabettercomic.tumblr.com",
            &["TUMBLR", "DELETEDTUMBLR"],
        )
        .with_status(Status::Deleted),
        tumblr(
            "hamm",
            "A Hamm A Day",
            "http://www.ahammaday.com",
            &["TUMBLR"],
        ),
        tumblr(
            "irwinc",
            "Irwin Cardozo",
            "https://irwincardozocomics.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "devin",
            "According To Devin",
            "https://accordingtodevin.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "tie-tumblr",
            "It's the tie (from Tumblr)",
            "https://itsthetie.tumblr.com",
            &["TUMBLR", "TIE"],
        ),
        tumblr(
            "picturesinboxes-tumblr",
            "Pictures in Boxes (from Tumblr)",
            "https://picturesinboxescomic.tumblr.com",
            &["TUMBLR", "PICTURESINBOXES"],
        )
        .with_status(Status::NotWorking),
        tumblr(
            "tubeytoons-tumblr",
            "Tubey Toons (from Tumblr)",
            "https://tubeytoons.tumblr.com",
            &["TUMBLR", "TUBEYTOONS"],
        ),
        tumblr(
            "unearthed-tumblr",
            "Unearthed Comics (from Tumblr)",
            "https://unearthedcomics.tumblr.com",
            &["TUMBLR", "UNEARTHED"],
        ),
        tumblr(
            "pie",
            "Pie Comic",
            "https://piecomic.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "diamond",
            "Mr Ethan Diamond",
            "https://mrethandiamond.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "flocci",
            "floccinaucinihilipilification",
            "https://floccinaucinihilipilificationa.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "upandout",
            "Up And Out (from Tumblr)",
            "https://upandoutcomic.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "pundemonium",
            "Pundemonium",
            "https://monstika.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "pearshaped",
            "Pear-Shaped Comics",
            "https://pearshapedcomics.com",
            &["TUMBLR"],
        ),
        tumblr(
            "pond",
            "Pond Scum",
            "https://pondscumcomic.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "mercworks-tumblr",
            "Mercworks (from Tumblr)",
            "https://mercworks.tumblr.com",
            &["TUMBLR", "MERCWORKS"],
        ),
        tumblr(
            "owlturd-tumblr",
            "Owl Turd / Shen Comix (from Tumblr)",
            "https://shencomix.tumblr.com",
            &["TUMBLR", "OWLTURD", "SHENCOMIX"],
        ),
        tumblr(
            "vector",
            "Vector Belly",
            "https://vectorbelly.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "rapture",
            "Gone Into Rapture",
            "https://goneintorapture.com",
            &["TUMBLR"],
        ),
        tumblr(
            "oatmeal-tumblr",
            "The Oatmeal (from Tumblr)",
            "https://oatmeal.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "jetpack",
            "My Jet Pack",
            "https://myjetpack.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "cuek-tumblr",
            "Cheer Up Emo Kid (from Tumblr)",
            "https://enzocomics.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "timetrabble-tumblr",
            "Time Trabble (from Tumblr)",
            "https://timetrabble.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "yeti-tumblr",
            "The Awkward Yeti (from Tumblr)",
            "https://larstheyeti.tumblr.com",
            &["TUMBLR", "YETI"],
        ),
        tumblr(
            "nhoj",
            "Nelluc Nhoj",
            "https://nellucnhoj.com",
            &["TUMBLR"],
        ),
        tumblr(
            "spiral-tumblr",
            "Down the Upward Spiral (from Tumblr)",
            "https://downtheupwardspiral.com",
            &["TUMBLR"],
        ),
        tumblr(
            "usual-tumblr",
            "As Per Usual (from Tumblr)",
            "https://as-per-usual.tumblr.com",
            &["TUMBLR", "DAMILEE"],
        ),
        tumblr(
            "hotcomics-tumblr",
            "Hot Comics For Cool People (from Tumblr)",
            "https://hotcomicsforcoolpeople.tumblr.com",
            &["TUMBLR", "DAMILEE"],
        ),
        tumblr(
            "1111-tumblr",
            "1111 Comics (from Tumblr)",
            "https://comics1111.tumblr.com",
            &["TUMBLR", "ONEONEONEONE"],
        ),
        tumblr(
            "jhall-tumblr",
            "Jhall Comics (from Tumblr)",
            "https://jhallcomics.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "berkeley-tumblr",
            "Berkeley Mews (from Tumblr)",
            "https://mews.tumblr.com",
            &["TUMBLR", "BERKELEY"],
        ),
        tumblr(
            "cornella-tumblr",
            "Joan Cornella (from Tumblr)",
            "https://cornellajoan.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "respawn-tumblr",
            "Respawn Comic (from Tumblr)",
            "https://respawncomic.tumblr.com",
            &["TUMBLR", "RESPAWN"],
        ),
        tumblr(
            "hallbeck-tumblr",
            "Chris Hallback (from Tumblr)",
            "https://chrishallbeck.tumblr.com",
            &["TUMBLR", "HALLBACK"],
        ),
        tumblr(
            "nuggets",
            "Comic Nuggets",
            "https://comicnuggets.com",
            &["TUMBLR"],
        ),
        tumblr(
            "pigeon-tumblr",
            "The Pigeon Gazette (from Tumblr)",
            "https://thepigeongazette.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "cancerowl-tumblr",
            "Cancer Owl (from Tumblr)",
            "https://cancerowl.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "fowllanguage-tumblr",
            "Fowl Language Comics (from Tumblr)",
            "https://fowllanguagecomics.tumblr.com",
            &["TUMBLR", "FOWLLANGUAGE"],
        ),
        tumblr(
            "theodd-tumblr",
            "The Odd 1s Out (from Tumblr)",
            "https://theodd1sout.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "lolnein-tumblr",
            "Lol Nein (from Tumblr)",
            "https://lolnein.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "fatawesome-tumblr",
            "Fat Awesome (from Tumblr)",
            "https://fatawesomecomedy.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "flatworld-tumblr",
            "The World Is Flat (from Tumblr)",
            "https://theworldisflatcomics.com",
            &["TUMBLR"],
        ),
        tumblr(
            "dorrismc",
            "Dorris Mc",
            "https://dorrismccomics.com",
            &["TUMBLR"],
        ),
        tumblr(
            "moonbeard-tumblr",
            "Moon Beard (from Tumblr)",
            "https://squireseses.tumblr.com",
            &["TUMBLR", "MOONBEARD"],
        ),
        tumblr(
            "comik",
            "A Comik",
            "https://acomik.com",
            &["TUMBLR"],
        ),
        tumblr(
            "randy",
            "Classic Randy",
            "https://classicrandy.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "dagsson-tumblr",
            "Dagsson Hugleikur (from Tumblr)",
            "https://hugleikurdagsson.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "lins-tumblr",
            "L.I.N.S. Editions (from Tumblr)",
            "https://linscomics.tumblr.com",
            &["TUMBLR", "WARANDPEAS", "LINS"],
        ),
        tumblr(
            "warandpeas-tumblr",
            "War And Peas (from Tumblr)",
            "https://warandpeas.tumblr.com",
            &["TUMBLR", "WARANDPEAS", "LINS"],
        ),
        tumblr(
            "origamihotdish",
            "Origami Hot Dish",
            "https://origamihotdish.com",
            &["TUMBLR"],
        ),
        tumblr(
            "hitandmiss",
            "Hit and Miss Comics",
            "https://hitandmisscomics.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "hmblanc",
            "HM Blanc",
            "https://hmblanc.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "absurdity-tumblr",
            "Tales of Absurdity (from Tumblr)",
            "https://talesofabsurdity.tumblr.com",
            &["TUMBLR", "ABSURDITY"],
        ),
        tumblr(
            "robbie-tumblr",
            "Robbie And Bobby (from Tumblr)",
            "https://robbieandbobby.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "bfgfs-tumblr",
            "BFGFS (from Tumblr)",
            "https://bfgfs.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "doodle",
            "Doodle For Food",
            "https://www.doodleforfood.com",
            &["TUMBLR"],
        ),
        tumblr(
            "cassandra-tumblr",
            "Cassandra Calin (from Tumblr)",
            "https://c-cassandra.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "doug",
            "Doug Was Taken",
            "https://dougwastaken.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "rollercoaster",
            "Mandatory Roller Coaster",
            "https://mandatoryrollercoaster.com",
            &["TUMBLR"],
        ),
        tumblr(
            "cperspqccltt",
            "C Est Pas En Regardant Ses Pompes (...)",
            "https://marcoandco.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "grohltroll",
            "The Grohl Troll",
            "http://thegrohltroll.com",
            &["TUMBLR", "DELETEDTUMBLR"],
        )
        .with_status(Status::Deleted),
        tumblr(
            "webcomicname",
            "Webcomic Name",
            "https://webcomicname.com",
            &["TUMBLR"],
        ),
        tumblr(
            "booksofadam",
            "Books of Adam",
            "http://booksofadam.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "hark-tumblr",
            "Hark A Vagrant (from Tumblr)",
            "https://beatonna.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "superadventure-tumblr",
            "Our Super Adventure (from Tumblr)",
            "https://sarahssketchbook.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "jake",
            "Jake Likes Onions",
            "https://jakelikesonions.com",
            &["TUMBLR"],
        ),
        tumblr(
            "inyourfacecake-tumblr",
            "In Your Face Cake (from Tumblr)",
            "https://in-your-face-cake.tumblr.com",
            &["TUMBLR", "INYOURFACECAKE"],
        ),
        tumblr(
            "robospunk",
            "Robospunk",
            "https://robospunk.com",
            &["TUMBLR"],
        ),
        tumblr(
            "banana",
            "Banana Twinky",
            "https://bananatwinky.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "popcorn-tumblr",
            "Yesterday's Popcorn (from Tumblr)",
            "https://yesterdayspopcorn.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "twisted",
            "Twisted Doodles",
            "https://www.twisteddoodles.com",
            &["TUMBLR"],
        ),
        tumblr(
            "ubertool-tumblr",
            "Ubertool (from Tumblr)",
            "https://ubertool.tumblr.com",
            &["TUMBLR", "UBERTOOL"],
        ),
        tumblr(
            "theycantalk",
            "They Can Talk",
            "https://theycantalk.com",
            &["TUMBLR"],
        ),
        tumblr(
            "will5",
            "Will 5:00 Never Come ?",
            "https://will5nevercome.com",
            &["TUMBLR"],
        ),
        tumblr(
            "sephko",
            "Sephko",
            "https://sephko.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "blazers",
            "Blazers At Dawn",
            "https://blazersatdawn.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "moga",
            "Art By Moga",
            "http://artbymoga.tumblr.com",
            &["TUMBLR"],
        )
        .with_status(Status::Unavailable),
        tumblr(
            "vomit-tumblr",
            "Verbal Vomit (from Tumblr)",
            "https://verbalvomits.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "library-tumblr",
            "LibraryComic (from Tumblr)",
            "https://librarycomic.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "tizzy-tumblr",
            "Tizzy Stitch Bird (from Tumblr)",
            "https://tizzystitchbird.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "circumsolar-tumblr",
            "Victims Of Circumsolar (from Tumblr)",
            "https://victimsofcomics.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "rpc-tumblr",
            "Rock Paper Cynic (from Tumblr)",
            "https://rockpapercynic.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "angry-tumblr",
            "Angry At Nothing (from Tumblr)",
            "https://angryatnothing.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "tango",
            "Shanghai Tango",
            "http://tango2010weibo.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "offtheleash-tumblr",
            "Off The Leash Dog (from Tumblr)",
            "https://rupertfawcettsdoggyblog.tumblr.com",
            &["TUMBLR", "FAWCETT"],
        ),
        tumblr(
            "imogen-tumblr",
            "Imogen Quest (from Tumblr)",
            "https://imoquest.tumblr.com",
            &["TUMBLR", "IMOGEN"],
        ),
        tumblr(
            "shitfest",
            "Shitfest",
            "https://shitfestcomic.com",
            &["TUMBLR"],
        ),
        tumblr(
            "icecream",
            "Ice Cream Sandwich Comics",
            "https://icecreamsandwichcomics.com",
            &["TUMBLR"],
        ),
        tumblr(
            "dustinteractive",
            "Dustinteractive",
            "https://dustinteractive.com",
            &["TUMBLR"],
        ),
        tumblr(
            "stickycinema",
            "Sticky Cinema Floor",
            "https://stickycinemafloor.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "incidental-tumblr",
            "Incidental Comics (from Tumblr)",
            "https://incidentalcomics.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "pleasant-waste-tumblr",
            "A Pleasant Waste Of Time (from Tumblr)",
            "https://artjcf.tumblr.com",
            &["TUMBLR", "WASTE"],
        ),
        tumblr(
            "horovitz-tumblr",
            "Horovitz (from Tumblr)",
            "https://horovitzcomics.tumblr.com",
            &["TUMBLR", "HOROVITZ"],
        ),
        tumblr(
            "deep-dark-fears-tumblr",
            "Deep Dark Fears (from Tumblr)",
            "https://deep-dark-fears.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "dakota",
            "Dakota McDadzean",
            "https://dakotamcfadzean.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "alevesque",
            "Alex Levesque",
            "https://alexlevesque.com",
            &["TUMBLR", "FRANCAIS"],
        )
        .with_status(Status::NotWorking),
        tumblr(
            "jamesofnotrades-tumblr",
            "James Of No Trades (from Tumblr)",
            "https://jamesfregan.tumblr.com",
            &["TUMBLR", "JAMESOFNOTRADES"],
        ),
        tumblr(
            "skeletonclaw",
            "Skeleton Claw",
            "https://skeletonclaw.com",
            &["TUMBLR"],
        ),
        tumblr(
            "goodbear-tumblr",
            "Good Bear Comics (from Tumblr)",
            "https://goodbearcomics.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "brooklyn-tumblr",
            "Brooklyn Cartoons (from Tumblr)",
            "https://brooklyncartoons.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "gemma-tumblr",
            "Gemma Correll (from Tumblr)",
            "https://gemmacorrell.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "robotatertot-tumblr",
            "Robotatertot (from Tumblr)",
            "https://robotatertot.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "huffypenguin",
            "Huffy Penguin",
            "https://huffy-penguin.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "cowardly-tumblr",
            "Cowardly Comics (from Tumblr)",
            "https://cowardlycomics.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "caw4hw-tumblr",
            "Caw4hw (from Tumblr)",
            "https://caw4hw.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "weflaps-tumblr",
            "We Flaps (from Tumblr)",
            "https://weflaps.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "theseinsidejokes-tumblr",
            "These Inside Jokes (from Tumblr)",
            "http://theseinsidejokes.tumblr.com",
            &["TUMBLR", "DELETEDTUMBLR"],
        )
        .with_status(Status::Deleted),
        tumblr(
            "sinewyn-tumblr",
            "Sinewyn (from Tumblr)",
            "https://sinewyn.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "infiniteimmortal-tumblr",
            "Infinite Immortal Bens (from Tumblr)",
            "https://infiniteimmortalbens.tumblr.com",
            &["TUMBLR", "INFINITEIMMORTAL"],
        ),
        tumblr(
            "cheesecornz-tumblr",
            "Cheese Cornz (from Tumblr)",
            "https://cheesecornz.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "cinismo",
            "Cinismo Ilustrado",
            "https://cinismoilustrado.com",
            &["TUMBLR", "ESPANOL"],
        ),
        tumblr(
            "eatmypaint-tumblr",
            "Eat My Paint (from Tumblr)",
            "https://eatmypaint.tumblr.com",
            &["TUMBLR", "EATMYPAINT"],
        ),
        tumblr(
            "anomalytown-tumblr",
            "Anomaly Town (from Tumblr)",
            "https://anomalytown.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "rory-tumblr",
            "Rory (from Tumblr)",
            "https://rorycomics.tumblr.com",
            &["TUMBLR", "RORY"],
        ),
        tumblr(
            "onegianthand",
            "One Giant Hand",
            "https://onegianthand.com",
            &["TUMBLR"],
        ),
        tumblr(
            "rae-tumblr",
            "Rae the Doe (from Tumblr)",
            "https://raethedoe.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "paintrain-tumblr",
            "Pain Train Comics (from Tumblr)",
            "https://paintraincomic.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "gentlemanarmchair",
            "The Gentleman Armchair",
            "https://thegentlemansarmchair.tumblr.com",
            &["TUMBLR"],
        ),
        tumblr(
            "3mb",
            "3MB Comics",
            "https://www.3mbcomics.com",
            &["TUMBLR"],
        ),
        tumblr(
            "falseknees-tumblr",
            "False Knees (from Tumblr)",
            "https://falseknees.tumblr.com",
            &["TUMBLR", "FALSEKNEES"],
        ),
        tumblr(
            "quarkside-tumblr",
            "The Quark Side (from Tumblr)",
            "https://thequarkside.tumblr.com",
            &["TUMBLR", "QUARKSIDE"],
        ),
    ]
}
