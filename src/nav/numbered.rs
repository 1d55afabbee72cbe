use super::{StripSender, StripSource};
use crate::{
    fetch::Fetcher,
    strip::{StoredStrip, Strip},
    CrawlerError,
};
use tracing::debug;

/// Comics where every strip has a number and the range of numbers is known.
#[async_trait::async_trait]
pub trait NumberedComic: Send + Sync {
    async fn first_and_last(&self, fetcher: &Fetcher) -> Result<(i64, i64), CrawlerError>;

    /// `Ok(None)` when there is no strip for `num`.
    async fn strip_info(&self, fetcher: &Fetcher, num: i64)
        -> Result<Option<Strip>, CrawlerError>;
}

pub struct Numbered<T>(pub T);

#[async_trait::async_trait]
impl<T: NumberedComic> StripSource for Numbered<T> {
    fn kind(&self) -> &'static str {
        "NUMBERED"
    }

    async fn crawl(
        &self,
        fetcher: &Fetcher,
        last: Option<&StoredStrip>,
        tx: &StripSender,
    ) -> Result<(), CrawlerError> {
        let (first, last_num) = self.0.first_and_last(fetcher).await?;
        let first = match last.and_then(|l| l.num) {
            Some(num) => num + 1,
            None => first,
        };
        debug!("Numbers from {} to {}", first, last_num);

        for num in first..=last_num {
            if let Some(mut strip) = self.0.strip_info(fetcher, num).await? {
                strip.num = Some(num);
                if !tx.send(strip).await {
                    break;
                }
            }
        }
        Ok(())
    }
}
