use clap::Parser;
use std::{collections::HashSet, path::PathBuf};
use tracing::{debug, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;
use webcomic_crawler::{
    comics,
    config::CrawlerConfig,
    store::{open_pool, ComicData},
    Storage,
};

/// Lists the files of the comic directories no stored image points to.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    #[arg(long, default_value = "comics.db")]
    db: PathBuf,
}

impl Args {
    fn config(&self) -> CrawlerConfig {
        CrawlerConfig {
            output_dir: self.output_dir.clone(),
            db_path: self.db.clone(),
            ..Default::default()
        }
    }
}

async fn list_unused(config: &CrawlerConfig) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let pool = open_pool(&config.db_path).await?;
    let mut unused = vec![];

    for entry in comics::catalog() {
        let name = entry.info.name;
        let dir = config.comic_dir(name);
        if !dir.is_dir() {
            continue;
        }

        let data = ComicData::new(&pool, name, entry.info.long_name).await?;
        let used: HashSet<PathBuf> = data
            .strips_get()
            .await?
            .into_iter()
            .flat_map(|s| s.images)
            .filter_map(|i| i.local_path)
            .map(PathBuf::from)
            .collect();
        debug!("[{}] {} images in use", name, used.len());

        let export = format!("{}.json", name);
        let mut files = tokio::fs::read_dir(&dir).await?;
        while let Some(file) = files.next_entry().await? {
            let path = file.path();
            if file.file_name().to_string_lossy() == export || used.contains(&path) {
                continue;
            }
            unused.push(path);
        }
    }

    unused.sort();
    Ok(unused)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "debug,html5ever=error,selectors=error,hyper=warn,reqwest=info,sqlx=warn".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let config = Args::parse().config();
    let unused = list_unused(&config).await?;
    for path in &unused {
        println!("{}", path.display());
    }
    info!("{} unused files", unused.len());
    Ok(())
}
