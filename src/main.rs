use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tokio::time::Duration;
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;
use webcomic_crawler::{
    actions,
    comics::{self, ComicEntry},
    config::CrawlerConfig,
    fetch::Fetcher,
    run_update,
    store::{open_pool, ComicData},
    CrawlerError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    Update,
    Check,
    Fix,
    ResetNew,
    Export,
    Info,
    List,
    CheckNav,
}

/// Retrieves new strips of the selected webcomics.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Comic names or categories, every comic when absent
    #[arg(short, long)]
    comic: Vec<String>,

    /// Actions run on each selected comic, in order
    #[arg(short, long, value_enum, default_value = "update")]
    action: Vec<Action>,

    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    #[arg(long, default_value = "comics.db")]
    db: PathBuf,

    /// Minimum delay between two requests
    #[arg(long, default_value_t = 400)]
    delay_ms: u64,

    #[arg(long, default_value_t = 3)]
    retries: u32,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Stop each update after this many new strips
    #[arg(long)]
    limit: Option<usize>,
}

impl Args {
    fn config(&self) -> CrawlerConfig {
        CrawlerConfig {
            output_dir: self.output_dir.clone(),
            db_path: self.db.clone(),
            delay: Duration::from_millis(self.delay_ms),
            retries: self.retries,
            timeout: Duration::from_secs(self.timeout_secs),
            limit: self.limit,
            ..Default::default()
        }
    }
}

async fn run_actions(
    entry: &ComicEntry,
    data: &ComicData,
    fetcher: &Fetcher,
    config: &CrawlerConfig,
    actions: &[Action],
) -> Result<(), CrawlerError> {
    for action in actions {
        match action {
            Action::Update => {
                run_update(entry, data, fetcher, config).await?;
            }
            Action::Check => {
                let problems = actions::check(entry, data).await?;
                info!("[{}] {} problems found", entry.info.name, problems.len());
            }
            Action::Fix => {
                let fixed = actions::fix(entry, data, fetcher, config).await?;
                info!("[{}] {} images retrieved", entry.info.name, fixed);
            }
            Action::ResetNew => {
                actions::reset_new(entry, data).await?;
            }
            Action::Export => {
                actions::export(entry, data, config).await?;
            }
            Action::Info => {
                actions::info(entry, data, &mut std::io::stdout()).await?;
            }
            Action::CheckNav => {
                let problems = actions::check_nav(entry, data, fetcher).await?;
                info!(
                    "[{}] {} navigation problems found",
                    entry.info.name,
                    problems.len()
                );
            }
            Action::List => {}
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "debug,html5ever=error,selectors=error,hyper=warn,reqwest=info,sqlx=warn".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let args = Args::parse();
    let config = args.config();
    let entries = comics::select(args.comic.as_slice())?;

    if args.action.contains(&Action::List) {
        actions::list(&entries, &mut std::io::stdout())?;
        if args.action.iter().all(|a| *a == Action::List) {
            return Ok(());
        }
    }

    let pool = open_pool(&config.db_path).await?;
    let fetcher = Fetcher::new(&config)?;

    let mut failed = vec![];
    for entry in &entries {
        let data = ComicData::new(&pool, entry.info.name, entry.info.long_name).await?;
        if let Err(e) = run_actions(entry, &data, &fetcher, &config, &args.action).await {
            error!("[{}] {}", entry.info.name, e);
            failed.push(entry.info.name);
        }
    }

    if !failed.is_empty() {
        error!("{} comics failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}
