use crate::CrawlerError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use lazy_regex::{regex, regex_captures};
use sqlx::SqlitePool;

pub(crate) async fn is_table_exists(
    pool: &SqlitePool,
    table_name: &str,
) -> Result<bool, sqlx::Error> {
    Ok(
        sqlx::query("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
            .bind(table_name)
            .fetch_optional(pool)
            .await?
            .is_some(),
    )
}

pub(crate) fn get_now() -> DateTime<FixedOffset> {
    let now = chrono::offset::Local::now();
    now.with_timezone(now.offset())
}

pub fn today() -> NaiveDate {
    chrono::offset::Local::now().date_naive()
}

/// Joins `href` on `base` the way a browser resolves a link. Falls back to
/// `href` untouched when either side cannot be parsed.
pub fn join_url(base: &str, href: &str) -> String {
    reqwest::Url::parse(base)
        .and_then(|base| base.join(href.trim()))
        .map(String::from)
        .unwrap_or_else(|_| href.trim().to_string())
}

/// Percent-encodes whatever needs it (non-ASCII paths mostly).
pub fn to_ascii_url(url: &str) -> String {
    reqwest::Url::parse(url.trim())
        .map(String::from)
        .unwrap_or_else(|_| url.trim().to_string())
}

pub fn string_to_date(value: &str, format: &str) -> Result<NaiveDate, CrawlerError> {
    NaiveDate::parse_from_str(value.trim(), format).map_err(|_| CrawlerError::DateError {
        value: value.to_string(),
        format: format.to_string(),
    })
}

/// `2019-08-17T14:25:35+00:00` -> 2019-08-17
pub fn isoformat_to_date(value: &str) -> Result<NaiveDate, CrawlerError> {
    let value = value.trim();
    string_to_date(value.get(..10).unwrap_or(value), "%Y-%m-%d")
}

pub fn timestamp_to_date(secs: i64) -> Option<NaiveDate> {
    NaiveDateTime::from_timestamp_opt(secs, 0).map(|dt| dt.date())
}

/// Finds a `/<year>/<month>/<day>/` sequence in a url.
pub fn date_from_url(url: &str) -> Option<NaiveDate> {
    let (_, year, month, day) = regex_captures!(r"/(\d{4})/(\d{1,2})/(\d{1,2})(?:/|$)", url)?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// "March 1st, 2018" -> "March 1, 2018"
pub fn remove_ordinal_suffixes(value: &str) -> String {
    regex!(r"(\d+)(st|nd|rd|th)\b")
        .replace_all(value, "$1")
        .into_owned()
}

/// Translates French day and month names so that chrono can parse them.
pub fn french_to_english(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let translated = match lower.trim_end_matches(',') {
                "lundi" => "Monday",
                "mardi" => "Tuesday",
                "mercredi" => "Wednesday",
                "jeudi" => "Thursday",
                "vendredi" => "Friday",
                "samedi" => "Saturday",
                "dimanche" => "Sunday",
                "janvier" => "January",
                "février" | "fevrier" => "February",
                "mars" => "March",
                "avril" => "April",
                "mai" => "May",
                "juin" => "June",
                "juillet" => "July",
                "août" | "aout" => "August",
                "septembre" => "September",
                "octobre" => "October",
                "novembre" => "November",
                "décembre" | "decembre" => "December",
                _ => return word.to_string(),
            };
            if lower.ends_with(',') {
                format!("{},", translated)
            } else {
                translated.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Last path segment of the url, percent-decoded, without query string.
pub fn filename_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = urlencoding::decode(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string());
    match decoded.rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "image".to_string(),
    }
}

pub fn extensions_are_equivalent(ext1: &str, ext2: &str) -> bool {
    const SYNONYMS: &[&[&str]] = &[&["jpg", "jpeg"]];
    let (ext1, ext2) = (ext1.to_lowercase(), ext2.to_lowercase());
    ext1 == ext2
        || SYNONYMS
            .iter()
            .any(|s| s.contains(&ext1.as_str()) && s.contains(&ext2.as_str()))
}

pub fn add_extension_if_needed(ext: &str, filename: &str) -> String {
    let current = filename.rsplit('.').next().unwrap_or(filename);
    if extensions_are_equivalent(ext, current) {
        filename.to_string()
    } else {
        format!("{}.{}", filename, ext)
    }
}
