use sqlx::{Row, SqlitePool};
use std::fmt::Display;

/// A single SQLite table. Table names are derived from comic names and are
/// always quoted in queries.
#[async_trait::async_trait]
pub trait Table {
    type Record<'a>;

    /// Column used by `is_exist` and `delete`.
    const KEY: &'static str = "id";

    fn get_name(&self) -> &str;
    fn get_pool(&self) -> &SqlitePool;

    async fn create(&self) -> Result<(), sqlx::Error>;
    async fn insert<'a>(&self, record: Self::Record<'a>) -> Result<(), sqlx::Error>;

    async fn is_exist<I: AsRef<str> + Display + Send + Sync>(
        &self,
        id: I,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            r#"SELECT {key} FROM "{}" WHERE {key} = ?"#,
            self.get_name(),
            key = Self::KEY
        );
        Ok(sqlx::query(&query)
            .bind(id.as_ref())
            .fetch_optional(self.get_pool())
            .await?
            .is_some())
    }

    async fn delete<I: AsRef<str> + Send + Sync>(&self, id: I) -> Result<(), sqlx::Error> {
        let query = format!(
            r#"DELETE FROM "{}" WHERE {} = ?"#,
            self.get_name(),
            Self::KEY
        );
        sqlx::query(&query)
            .bind(id.as_ref())
            .execute(self.get_pool())
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<u32, sqlx::Error> {
        let query = format!(r#"SELECT COUNT(*) FROM "{}""#, self.get_name());
        Ok(sqlx::query(&query)
            .fetch_one(self.get_pool())
            .await?
            .try_get(0)?)
    }
}
