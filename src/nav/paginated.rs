use super::{StripSender, StripSource};
use crate::{
    fetch::Fetcher,
    strip::{StoredStrip, Strip},
    CrawlerError,
};
use tracing::{debug, warn};

/// One page of a newest-first archive.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivePage<E> {
    pub entries: Vec<E>,
    /// Cursor of the next (older) page, if any.
    pub next: Option<String>,
}

/// Comics whose archive is served newest first, a page at a time.
#[async_trait::async_trait]
pub trait PaginatedComic: Send + Sync {
    type Entry: Send + Sync;

    /// `cursor` is `None` for the newest page.
    async fn archive_page(
        &self,
        fetcher: &Fetcher,
        cursor: Option<String>,
    ) -> Result<ArchivePage<Self::Entry>, CrawlerError>;

    fn is_last_strip(&self, entry: &Self::Entry, last: &StoredStrip) -> bool;

    /// Whether the last stored strip can still be found upstream.
    async fn last_strip_is_valid(&self, _fetcher: &Fetcher, _last: &StoredStrip) -> bool {
        true
    }

    async fn strip_info(
        &self,
        fetcher: &Fetcher,
        entry: Self::Entry,
    ) -> Result<Option<Strip>, CrawlerError>;
}

pub struct Paginated<T>(pub T);

#[async_trait::async_trait]
impl<T: PaginatedComic> StripSource for Paginated<T> {
    fn kind(&self) -> &'static str {
        "PAGINATED"
    }

    async fn crawl(
        &self,
        fetcher: &Fetcher,
        last: Option<&StoredStrip>,
        tx: &StripSender,
    ) -> Result<(), CrawlerError> {
        if let Some(last) = last {
            if !self.0.last_strip_is_valid(fetcher, last).await {
                warn!("Last strip {} is not available anymore", last.url);
                return Ok(());
            }
        }

        let mut pending = vec![];
        let mut cursor = None;
        let mut found = false;
        'pages: loop {
            let page = self.0.archive_page(fetcher, cursor).await?;
            debug!("Archive page with {} entries", page.entries.len());
            for entry in page.entries {
                if let Some(last) = last {
                    if self.0.is_last_strip(&entry, last) {
                        found = true;
                        break 'pages;
                    }
                }
                pending.push(entry);
            }
            match page.next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        if let Some(last) = last {
            if !found {
                warn!(
                    "Did not find previous strip {} in the {} strips found: there might be a problem",
                    last.url,
                    pending.len()
                );
                return Ok(());
            }
        }

        for entry in pending.into_iter().rev() {
            if let Some(strip) = self.0.strip_info(fetcher, entry).await? {
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

    /// Ids 1..=7 served newest first, three per page.
    struct Pages {
        valid: bool,
    }

    #[async_trait::async_trait]
    impl PaginatedComic for Pages {
        type Entry = i64;

        async fn archive_page(
            &self,
            _: &Fetcher,
            cursor: Option<String>,
        ) -> Result<ArchivePage<i64>, CrawlerError> {
            let start: i64 = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
            let entries: Vec<i64> = (start..start + 3)
                .map(|i| 7 - i)
                .filter(|id| *id > 0)
                .collect();
            let next = (start + 3 < 7).then(|| (start + 3).to_string());
            Ok(ArchivePage { entries, next })
        }

        fn is_last_strip(&self, entry: &i64, last: &StoredStrip) -> bool {
            Some(*entry) == last.num
        }

        async fn last_strip_is_valid(&self, _: &Fetcher, _: &StoredStrip) -> bool {
            self.valid
        }

        async fn strip_info(&self, _: &Fetcher, id: i64) -> Result<Option<Strip>, CrawlerError> {
            Ok((id != 5).then(|| Strip {
                url: format!("http://example.com/post/{}", id),
                num: Some(id),
                ..Default::default()
            }))
        }
    }

    fn nums(strips: &[Strip]) -> Vec<i64> {
        strips.iter().filter_map(|s| s.num).collect()
    }

    #[tokio::test]
    async fn collects_newest_first_and_yields_oldest_first() {
        let fetcher = test_fetcher();
        let source = Paginated(Pages { valid: true });

        let strips = collect(&source, &fetcher, None).await.unwrap();
        assert_eq!(nums(&strips), vec![1, 2, 3, 4, 6, 7]);

        let last = StoredStrip::stub("http://example.com/post/3", Some(3));
        let strips = collect(&source, &fetcher, Some(&last)).await.unwrap();
        assert_eq!(nums(&strips), vec![4, 6, 7]);

        let last = StoredStrip::stub("http://example.com/post/7", Some(7));
        assert!(collect(&source, &fetcher, Some(&last))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn lost_last_strip_yields_nothing() {
        let fetcher = test_fetcher();

        let last = StoredStrip::stub("http://example.com/post/42", Some(42));
        let source = Paginated(Pages { valid: true });
        assert!(collect(&source, &fetcher, Some(&last))
            .await
            .unwrap()
            .is_empty());

        let last = StoredStrip::stub("http://example.com/post/3", Some(3));
        let source = Paginated(Pages { valid: false });
        assert!(collect(&source, &fetcher, Some(&last))
            .await
            .unwrap()
            .is_empty());
    }
}
