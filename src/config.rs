use std::path::PathBuf;
use tokio::time::Duration;

pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/534.30 (KHTML, like Gecko) Ubuntu/11.04 Chromium/12.0.742.112 Chrome/12.0.742.112 Safari/534.30";

#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Root directory, each comic gets `<output_dir>/<name>/`.
    pub output_dir: PathBuf,
    pub db_path: PathBuf,
    /// Minimum delay between two requests.
    pub delay: Duration,
    pub retries: u32,
    /// Multiplied by the attempt number between two attempts.
    pub retry_backoff: Duration,
    pub timeout: Duration,
    pub user_agent: String,
    /// Stop each update after this many new strips.
    pub limit: Option<usize>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        CrawlerConfig {
            output_dir: PathBuf::from("output"),
            db_path: PathBuf::from("comics.db"),
            delay: Duration::from_millis(400),
            retries: 3,
            retry_backoff: Duration::from_secs(1),
            timeout: Duration::from_secs(30),
            user_agent: USER_AGENT.to_string(),
            limit: None,
        }
    }
}

impl CrawlerConfig {
    pub fn comic_dir(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}
