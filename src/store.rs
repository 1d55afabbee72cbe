use crate::{
    strip::{Image, StoredStrip, Strip},
    utils, CrawlerError, MissingImage, Storage, Table,
};
use chrono::NaiveDate;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteRow},
    Row, Sqlite, SqlitePool, Transaction,
};
use std::{collections::HashMap, path::Path};

pub async fn open_pool<P: AsRef<Path>>(path: P) -> Result<SqlitePool, CrawlerError> {
    let opt = SqliteConnectOptions::new()
        .filename(path.as_ref())
        .create_if_missing(true);
    Ok(SqlitePool::connect_with(opt).await?)
}

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct NewStrip<'a> {
    pub strip: &'a Strip,
    pub comic: &'a str,
    pub date: NaiveDate,
    pub local_paths: &'a [Option<String>],
}

pub struct StripTable {
    name: String,
    images: String,
    pool: SqlitePool,
}

#[async_trait::async_trait]
impl Table for StripTable {
    type Record<'a> = NewStrip<'a>;

    fn get_name(&self) -> &str {
        self.name.as_str()
    }

    fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create(&self) -> Result<(), sqlx::Error> {
        if !utils::is_table_exists(self.get_pool(), &self.name).await? {
            let query = format!(
                r#"
                    CREATE TABLE "{}" (
                        id TEXT PRIMARY KEY,
                        position INTEGER NOT NULL UNIQUE,
                        num INTEGER,
                        date TEXT NOT NULL,
                        title TEXT,
                        author TEXT,
                        alt TEXT,
                        comic TEXT NOT NULL,
                        prefix TEXT,
                        extra TEXT NOT NULL,
                        is_new BOOLEAN NOT NULL,
                        created_at DATETIME
                    )
                "#,
                &self.name
            );
            sqlx::query(query.as_str()).execute(self.get_pool()).await?;
        }
        Ok(())
    }

    /// Inserts the strip after the current last one, with its images, in a
    /// single transaction.
    async fn insert<'a>(&self, record: Self::Record<'a>) -> Result<(), sqlx::Error> {
        let NewStrip {
            strip,
            comic,
            date,
            local_paths,
        } = record;
        let extra = serde_json::to_string(&strip.extra)
            .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;

        let mut tx = self.get_pool().begin().await?;
        let query = format!(
            r#"SELECT COALESCE(MAX(position), 0) + 1 FROM "{}""#,
            self.name
        );
        let position: i64 = sqlx::query(&query).fetch_one(&mut tx).await?.try_get(0)?;

        let query = format!(
            r#"INSERT INTO "{}" (
                id,
                position,
                num,
                date,
                title,
                author,
                alt,
                comic,
                prefix,
                extra,
                is_new,
                created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
            self.name
        );
        sqlx::query(&query)
            .bind(strip.url.trim())
            .bind(position)
            .bind(strip.num)
            .bind(date.format(DATE_FORMAT).to_string())
            .bind(strip.title.as_deref())
            .bind(strip.author.as_deref())
            .bind(strip.alt.as_deref())
            .bind(comic)
            .bind(strip.prefix.as_deref())
            .bind(extra)
            .bind(true)
            .bind(utils::get_now())
            .execute(&mut tx)
            .await?;

        for (idx, url) in strip.images.iter().enumerate() {
            let local_path = local_paths.get(idx).cloned().flatten();
            insert_image(&mut tx, &self.images, (strip.url.trim(), idx as i64, url, local_path))
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

type ImageRecord<'a> = (&'a str, i64, &'a str, Option<String>);

async fn insert_image(
    tx: &mut Transaction<'_, Sqlite>,
    table: &str,
    (strip_id, idx, url, local_path): ImageRecord<'_>,
) -> Result<(), sqlx::Error> {
    let query = format!(
        r#"INSERT INTO "{}" (strip_id, idx, url, local_path, created_at) VALUES (?, ?, ?, ?, ?)"#,
        table
    );
    sqlx::query(&query)
        .bind(strip_id)
        .bind(idx)
        .bind(url)
        .bind(local_path)
        .bind(utils::get_now())
        .execute(tx)
        .await?;
    Ok(())
}

pub struct ImageTable {
    name: String,
    pool: SqlitePool,
}

#[async_trait::async_trait]
impl Table for ImageTable {
    type Record<'a> = ImageRecord<'a>;

    const KEY: &'static str = "strip_id";

    fn get_name(&self) -> &str {
        self.name.as_str()
    }

    fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create(&self) -> Result<(), sqlx::Error> {
        if !utils::is_table_exists(self.get_pool(), &self.name).await? {
            let query = format!(
                r#"
                    CREATE TABLE "{}" (
                        strip_id TEXT NOT NULL,
                        idx INTEGER NOT NULL,
                        url TEXT NOT NULL,
                        local_path TEXT,
                        created_at DATETIME,
                        PRIMARY KEY (strip_id, idx)
                    )
                "#,
                &self.name
            );
            sqlx::query(query.as_str()).execute(self.get_pool()).await?;
        }
        Ok(())
    }

    async fn insert<'a>(&self, record: Self::Record<'a>) -> Result<(), sqlx::Error> {
        let mut tx = self.get_pool().begin().await?;
        insert_image(&mut tx, &self.name, record).await?;
        tx.commit().await?;
        Ok(())
    }
}

/// Strips and images of one comic.
pub struct ComicData {
    pub name: String,
    pub long_name: String,
    pub strips: StripTable,
    pub images: ImageTable,
    pool: SqlitePool,
}

impl ComicData {
    pub async fn new(
        pool: &SqlitePool,
        name: &str,
        long_name: &str,
    ) -> Result<ComicData, CrawlerError> {
        let d = ComicData {
            name: name.to_string(),
            long_name: long_name.to_string(),
            strips: StripTable {
                name: format!("{}_strips", name),
                images: format!("{}_images", name),
                pool: pool.clone(),
            },
            images: ImageTable {
                name: format!("{}_images", name),
                pool: pool.clone(),
            },
            pool: pool.clone(),
        };

        if !utils::is_table_exists(&d.pool, &d.strips.name).await? {
            tracing::debug!("Create table {}", d.strips.name);
            d.strips.create().await?;
        }
        if !utils::is_table_exists(&d.pool, &d.images.name).await? {
            tracing::debug!("Create table {}", d.images.name);
            d.images.create().await?;
        }

        Ok(d)
    }

    /// Images grouped by strip url, for one strip or for all of them.
    async fn images_of(
        &self,
        strip_id: Option<&str>,
    ) -> Result<HashMap<String, Vec<Image>>, CrawlerError> {
        let query = format!(
            r#"SELECT strip_id, url, local_path FROM "{}" WHERE ? IS NULL OR strip_id = ? ORDER BY strip_id, idx"#,
            self.images.get_name()
        );

        let mut images: HashMap<String, Vec<Image>> = HashMap::new();
        for row in sqlx::query(&query)
            .bind(strip_id)
            .bind(strip_id)
            .fetch_all(&self.pool)
            .await?
        {
            images
                .entry(row.try_get("strip_id")?)
                .or_default()
                .push(Image {
                    url: row.try_get("url")?,
                    local_path: row.try_get("local_path")?,
                });
        }
        Ok(images)
    }
}

fn strip_from_row(
    row: &SqliteRow,
    images: &mut HashMap<String, Vec<Image>>,
) -> Result<StoredStrip, CrawlerError> {
    let url: String = row.try_get("id")?;
    let date: String = row.try_get("date")?;
    let extra: String = row.try_get("extra")?;
    Ok(StoredStrip {
        position: row.try_get("position")?,
        comic: row.try_get("comic")?,
        num: row.try_get("num")?,
        date: utils::string_to_date(&date, DATE_FORMAT)?,
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        alt: row.try_get("alt")?,
        prefix: row.try_get("prefix")?,
        images: images.remove(&url).unwrap_or_default(),
        extra: serde_json::from_str(&extra)?,
        is_new: row.try_get("is_new")?,
        url,
    })
}

#[async_trait::async_trait]
impl Storage for ComicData {
    async fn strips_get(&self) -> Result<Vec<StoredStrip>, CrawlerError> {
        let mut images = self.images_of(None).await?;
        let query = format!(
            r#"SELECT * FROM "{}" ORDER BY position"#,
            self.strips.get_name()
        );
        sqlx::query(&query)
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(|row| strip_from_row(row, &mut images))
            .collect()
    }

    async fn strips_last(&self) -> Result<Option<StoredStrip>, CrawlerError> {
        let query = format!(
            r#"SELECT * FROM "{}" ORDER BY position DESC LIMIT 1"#,
            self.strips.get_name()
        );
        match sqlx::query(&query).fetch_optional(&self.pool).await? {
            Some(row) => {
                let url: String = row.try_get("id")?;
                let mut images = self.images_of(Some(&url)).await?;
                Ok(Some(strip_from_row(&row, &mut images)?))
            }
            None => Ok(None),
        }
    }

    async fn strips_count(&self) -> Result<u32, CrawlerError> {
        Ok(self.strips.count().await?)
    }

    async fn strips_is_exists<I: AsRef<str> + Send>(&self, url: I) -> Result<bool, CrawlerError> {
        let url = url.as_ref().trim();
        Ok(self.strips.is_exist(url).await?)
    }

    async fn strips_insert(
        &self,
        strip: &Strip,
        date: NaiveDate,
        local_paths: &[Option<String>],
    ) -> Result<(), CrawlerError> {
        Ok(self
            .strips
            .insert(NewStrip {
                strip,
                comic: &self.long_name,
                date,
                local_paths,
            })
            .await?)
    }

    async fn images_missing(&self) -> Result<Vec<MissingImage>, CrawlerError> {
        let query = format!(
            r#"SELECT i.strip_id, i.idx, i.url, s.prefix
               FROM "{}" i JOIN "{}" s ON s.id = i.strip_id
               WHERE i.local_path IS NULL
               ORDER BY s.position, i.idx"#,
            self.images.get_name(),
            self.strips.get_name()
        );
        let mut missing = vec![];
        for row in sqlx::query(&query).fetch_all(&self.pool).await? {
            missing.push(MissingImage {
                strip_url: row.try_get("strip_id")?,
                idx: row.try_get("idx")?,
                url: row.try_get("url")?,
                prefix: row.try_get("prefix")?,
            });
        }
        Ok(missing)
    }

    async fn images_set_local<I: AsRef<str> + Send>(
        &self,
        strip_url: I,
        idx: i64,
        local_path: &str,
    ) -> Result<(), CrawlerError> {
        let query = format!(
            r#"UPDATE "{}" SET local_path = ? WHERE strip_id = ? AND idx = ?"#,
            self.images.get_name()
        );
        sqlx::query(&query)
            .bind(local_path)
            .bind(strip_url.as_ref())
            .bind(idx)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn new_reset(&self) -> Result<u64, CrawlerError> {
        let query = format!(
            r#"UPDATE "{}" SET is_new = FALSE WHERE is_new"#,
            self.strips.get_name()
        );
        Ok(sqlx::query(&query)
            .execute(&self.pool)
            .await?
            .rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    macro_rules! insert {
        ($it:expr, $($added:expr),+) => {
            $(
                $it.strips_insert(&$added, day(1), &[]).await.unwrap();
            )+
        };
    }

    macro_rules! assert_eq_fut_strings {
        ($fut:expr, $($item:expr),+) => {
            let mut v = Vec::new();
            $(
                v.push($item.to_string());
            )+
            assert_eq!($fut.await.unwrap().into_iter().map(|s| s.url).collect::<Vec<_>>(), v);
        };
        ($fut:expr) => {
            let v: Vec<String> = vec![];
            assert_eq!($fut.await.unwrap().into_iter().map(|s| s.url).collect::<Vec<_>>(), v);
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    fn strip(url: &str, images: &[&str]) -> Strip {
        Strip {
            url: url.to_string(),
            images: images.iter().map(ToString::to_string).collect(),
            ..Default::default()
        }
    }

    async fn test_data(dir: &tempfile::TempDir, name: &str) -> ComicData {
        let pool = open_pool(dir.path().join("test.db")).await.unwrap();
        ComicData::new(&pool, name, "Test Comic").await.unwrap()
    }

    #[tokio::test]
    async fn create_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("test.db");
        assert!(!db.is_file());

        let pool = open_pool(&db).await.unwrap();
        ComicData::new(&pool, "smbc", "Saturday Morning Breakfast Cereal")
            .await
            .unwrap();
        assert!(db.is_file());
        assert!(utils::is_table_exists(&pool, "smbc_strips").await.unwrap());
        assert!(utils::is_table_exists(&pool, "smbc_images").await.unwrap());

        // Opening again keeps the tables.
        ComicData::new(&pool, "smbc", "Saturday Morning Breakfast Cereal")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn insert_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let d = test_data(&dir, "some-comic").await;

        assert_eq!(d.strips_count().await.unwrap(), 0);
        assert_eq!(d.strips_last().await.unwrap(), None);

        let mut first = strip("http://a/1", &["http://a/1.png", "http://a/1b.png"]);
        first.num = Some(1);
        first.title = Some("One".into());
        first.prefix = Some("1-".into());
        first = first.with_extra("tags", "a b");
        d.strips_insert(&first, day(1), &[Some("out/1-1.png".into()), None])
            .await
            .unwrap();
        d.strips_insert(&strip(" http://a/2 ", &[]), day(2), &[])
            .await
            .unwrap();

        assert_eq!(d.strips_count().await.unwrap(), 2);
        assert!(d.strips_is_exists("http://a/2").await.unwrap());
        assert!(!d.strips_is_exists("http://a/3").await.unwrap());

        let all = d.strips_get().await.unwrap();
        assert_eq!(
            all[0],
            StoredStrip {
                position: 1,
                comic: "Test Comic".into(),
                url: "http://a/1".into(),
                num: Some(1),
                date: day(1),
                title: Some("One".into()),
                author: None,
                alt: None,
                prefix: Some("1-".into()),
                images: vec![
                    Image {
                        url: "http://a/1.png".into(),
                        local_path: Some("out/1-1.png".into()),
                    },
                    Image {
                        url: "http://a/1b.png".into(),
                        local_path: None,
                    },
                ],
                extra: [("tags".to_string(), "a b".to_string())].into(),
                is_new: true,
            }
        );

        let last = d.strips_last().await.unwrap().unwrap();
        assert_eq!(last.position, 2);
        assert_eq!(last.url, "http://a/2");
        assert_eq!(last.date, day(2));
        assert!(last.images.is_empty());
    }

    #[tokio::test]
    async fn duplicate_insert_is_rolled_back() {
        let dir = tempfile::tempdir().unwrap();
        let d = test_data(&dir, "dup").await;

        insert!(d, strip("http://a/1", &["x.png"]));
        assert!(d
            .strips_insert(&strip("http://a/1", &["y.png", "z.png"]), day(1), &[])
            .await
            .is_err());

        assert_eq!(d.strips_count().await.unwrap(), 1);
        assert_eq!(d.images.count().await.unwrap(), 1);
        assert_eq_fut_strings!(d.strips_get(), "http://a/1");
    }

    #[tokio::test]
    async fn positions_follow_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let d = test_data(&dir, "order").await;
        assert_eq_fut_strings!(d.strips_get());

        insert!(d, strip("c", &[]), strip("a", &[]), strip("b", &[]));
        assert_eq_fut_strings!(d.strips_get(), "c", "a", "b");

        d.strips.delete("a").await.unwrap();
        insert!(d, strip("d", &[]));
        assert_eq_fut_strings!(d.strips_get(), "c", "b", "d");
        assert_eq!(d.strips_last().await.unwrap().unwrap().position, 4);
    }

    #[tokio::test]
    async fn missing_images_and_new_flag() {
        let dir = tempfile::tempdir().unwrap();
        let d = test_data(&dir, "fix").await;

        let mut s = strip("http://a/1", &["http://a/x.png", "http://a/y.png"]);
        s.prefix = Some("p-".into());
        d.strips_insert(&s, day(1), &[None, Some("y.png".into())])
            .await
            .unwrap();

        assert_eq!(
            d.images_missing().await.unwrap(),
            vec![MissingImage {
                strip_url: "http://a/1".into(),
                idx: 0,
                url: "http://a/x.png".into(),
                prefix: Some("p-".into()),
            }]
        );

        d.images_set_local("http://a/1", 0, "x.png").await.unwrap();
        assert!(d.images_missing().await.unwrap().is_empty());

        assert_eq!(d.new_reset().await.unwrap(), 1);
        assert_eq!(d.new_reset().await.unwrap(), 0);
        assert!(!d.strips_last().await.unwrap().unwrap().is_new);

        assert!(d.images.is_exist("http://a/1").await.unwrap());
        d.images.delete("http://a/1").await.unwrap();
        assert_eq!(d.images.count().await.unwrap(), 0);
    }
}
