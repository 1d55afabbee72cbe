use chrono::{Datelike, NaiveDate};
use std::{collections::BTreeMap, fmt};

/// A strip as yielded by a [`StripSource`](crate::nav::StripSource), before
/// its images are downloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Strip {
    pub url: String,
    pub num: Option<i64>,
    pub date: Option<NaiveDate>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub alt: Option<String>,
    pub images: Vec<String>,
    pub prefix: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl Strip {
    pub fn new<I: IntoIterator<Item = String>>(images: I) -> Self {
        Strip {
            images: images.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_extra<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    pub local_path: Option<String>,
}

/// A strip read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredStrip {
    pub position: i64,
    pub comic: String,
    pub url: String,
    pub num: Option<i64>,
    pub date: NaiveDate,
    pub title: Option<String>,
    pub author: Option<String>,
    pub alt: Option<String>,
    pub prefix: Option<String>,
    pub images: Vec<Image>,
    pub extra: BTreeMap<String, String>,
    pub is_new: bool,
}

impl StoredStrip {
    /// The flat JSON object consumed by the ebook tooling.
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        for (k, v) in &self.extra {
            obj.insert(k.clone(), v.clone().into());
        }
        obj.insert("url".into(), self.url.clone().into());
        obj.insert("comic".into(), self.comic.clone().into());
        obj.insert(
            "img".into(),
            self.images.iter().map(|i| i.url.clone()).collect(),
        );
        obj.insert(
            "local_img".into(),
            self.images.iter().map(|i| i.local_path.clone()).collect(),
        );
        obj.insert("day".into(), self.date.day().into());
        obj.insert("month".into(), self.date.month().into());
        obj.insert("year".into(), self.date.year().into());
        for (key, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("alt", &self.alt),
            ("prefix", &self.prefix),
        ] {
            if let Some(value) = value {
                obj.insert(key.into(), value.clone().into());
            }
        }
        if let Some(num) = self.num {
            obj.insert("num".into(), num.into());
        }
        if self.is_new {
            obj.insert("new".into(), serde_json::Value::Null);
        }
        serde_json::Value::Object(obj)
    }
}

#[cfg(test)]
impl StoredStrip {
    pub(crate) fn stub(url: &str, num: Option<i64>) -> Self {
        StoredStrip {
            position: 1,
            comic: "Test".into(),
            url: url.to_string(),
            num,
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            title: None,
            author: None,
            alt: None,
            prefix: None,
            images: vec![],
            extra: BTreeMap::new(),
            is_new: false,
        }
    }
}

impl fmt::Display for StoredStrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Position   : {}", self.position)?;
        writeln!(f, "Url        : {}", self.url)?;
        writeln!(f, "Date       : {}", self.date)?;
        if let Some(num) = self.num {
            writeln!(f, "Num        : {}", num)?;
        }
        writeln!(
            f,
            "Title      : {}",
            self.title.as_deref().unwrap_or("None")
        )?;
        if let Some(alt) = self.alt.as_ref() {
            writeln!(f, "Alt        : {}", alt)?;
        }
        for image in &self.images {
            writeln!(
                f,
                "Image      : {} -> {}",
                image.url,
                image.local_path.as_deref().unwrap_or("(missing)")
            )?;
        }
        Ok(())
    }
}
