use crate::{config::CrawlerConfig, utils, CrawlerError};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, REFERER},
    Response, StatusCode,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::{
    io::AsyncWriteExt,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing::{debug, warn};

/// HTTP access shared by every comic of a run.
pub struct Fetcher {
    client: reqwest::Client,
    retries: u32,
    delay: Duration,
    backoff: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Fetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self, CrawlerError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .gzip(true)
            .timeout(config.timeout)
            .build()?;

        Ok(Fetcher {
            client,
            retries: config.retries.max(1),
            delay: config.delay,
            backoff: config.retry_backoff,
            last_request: Mutex::new(None),
        })
    }

    async fn wait_turn(&self) {
        let mut last_request_mutex = self.last_request.lock().await;
        if let Some(last_request) = last_request_mutex.take() {
            let duration = Instant::now().duration_since(last_request);
            if duration < self.delay {
                tokio::time::sleep(self.delay - duration).await;
            }
        }
        last_request_mutex.replace(Instant::now());
    }

    async fn send(&self, url: &str, referer: Option<&str>) -> Result<Response, CrawlerError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            self.wait_turn().await;

            debug!("Visit {}", url);
            let mut request = self.client.get(url);
            if let Some(referer) = referer {
                request = request.header(REFERER, referer);
            }

            match request.send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status();
                    let retryable =
                        status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
                    if !retryable || attempt >= self.retries {
                        return Err(CrawlerError::StatusError {
                            url: url.to_string(),
                            status,
                        });
                    }
                    warn!("Got {} for {} ({}/{})", status, url, attempt, self.retries);
                }
                Err(err) => {
                    let retryable = err.is_timeout() || err.is_connect() || err.is_request();
                    if !retryable || attempt >= self.retries {
                        return Err(err.into());
                    }
                    warn!("Request to {} failed ({}/{}): {}", url, attempt, self.retries, err);
                }
            }

            tokio::time::sleep(self.backoff * attempt).await;
        }
    }

    pub async fn get_text(&self, url: &str) -> Result<String, CrawlerError> {
        Ok(self.send(url, None).await?.text().await?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CrawlerError> {
        let body = self.get_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn is_reachable(&self, url: &str) -> bool {
        self.send(url, None).await.is_ok()
    }

    /// Saves the resource at `url` in `dir` as `<prefix><file name>`, adding
    /// the image type announced by the server when the name lacks it.
    pub async fn download(
        &self,
        url: &str,
        dir: &Path,
        prefix: &str,
        referer: Option<&str>,
    ) -> Result<PathBuf, CrawlerError> {
        let response = self.send(url, referer).await?;

        let mut filename = format!("{}{}", prefix, utils::filename_from_url(url));
        if let Some(ext) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .and_then(|ct| ct.strip_prefix("image/"))
            .and_then(|subtype| subtype.split(';').next())
            .map(str::trim)
            .filter(|ext| !ext.is_empty())
        {
            filename = utils::add_extension_if_needed(ext, &filename);
        }

        let path = dir.join(filename);
        let bytes = response.bytes().await?;
        let mut file = tokio::fs::File::create(&path).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        debug!("Saved {} at {}", url, path.display());
        Ok(path)
    }
}

#[cfg(test)]
pub(crate) fn test_fetcher() -> Fetcher {
    Fetcher::new(&CrawlerConfig {
        delay: Duration::from_millis(0),
        retry_backoff: Duration::from_millis(1),
        timeout: Duration::from_secs(5),
        ..Default::default()
    })
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[tokio::test]
    async fn retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(200).set_body_string("finally"))
            .mount(&server)
            .await;

        let fetcher = test_fetcher();
        let body = fetcher
            .get_text(&format!("{}/flaky", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "finally");
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .expect(2)
            .mount(&server)
            .await;

        let fetcher = test_fetcher();
        let url = format!("{}/missing", server.uri());
        let err = fetcher.get_text(&url).await.unwrap_err();
        assert!(matches!(
            err,
            CrawlerError::StatusError { status, .. } if status == StatusCode::NOT_FOUND
        ));
        assert!(!fetcher.is_reachable(&url).await);
    }

    #[tokio::test]
    async fn sends_browser_headers_and_parses_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/info.0.json"))
            .and(header("accept", "*/*"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"num": 42}"#))
            .mount(&server)
            .await;

        let fetcher = test_fetcher();
        let value: serde_json::Value = fetcher
            .get_json(&format!("{}/info.0.json", server.uri()))
            .await
            .unwrap();
        assert_eq!(value["num"], 42);
    }

    #[tokio::test]
    async fn download_adds_missing_extension() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/img/strip"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(vec![1u8, 2, 3])
                    .insert_header("content-type", "image/png"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/img/photo.jpg"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(vec![4u8])
                    .insert_header("content-type", "image/jpeg; charset=binary"),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let fetcher = test_fetcher();

        let saved = fetcher
            .download(&format!("{}/img/strip", server.uri()), dir.path(), "12-", None)
            .await
            .unwrap();
        assert_eq!(saved, dir.path().join("12-strip.png"));
        assert_eq!(std::fs::read(&saved).unwrap(), vec![1u8, 2, 3]);

        let saved = fetcher
            .download(
                &format!("{}/img/photo.jpg", server.uri()),
                dir.path(),
                "",
                Some("http://example.com/page"),
            )
            .await
            .unwrap();
        assert_eq!(saved, dir.path().join("photo.jpg"));
    }

    #[tokio::test]
    async fn requests_are_spaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(&CrawlerConfig {
            delay: Duration::from_millis(100),
            ..Default::default()
        })
        .unwrap();
        let start = Instant::now();
        for _ in 0..3 {
            fetcher.get_text(&server.uri()).await.unwrap();
        }
        assert!(start.elapsed() >= Duration::from_millis(200));
    }
}
