use clap::Parser;
use anyhow::Result;
use std::path::PathBuf;

mod config;
mod db;
mod error;
mod logger;
mod markdown;
mod models;
mod post;
mod slug;

use config::{DbConfig, Settings};

/// Turn the latest feed items into static-site blog posts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SQLite database holding feeds and items
    #[arg(short, long, default_value = config::DEFAULT_DATABASE)]
    database: String,

    /// Directory the post files are written to
    #[arg(short, long, default_value = config::DEFAULT_POSTS_ROOT)]
    posts_root: PathBuf,

    /// Number of latest items to turn into posts
    #[arg(short, long, default_value_t = config::DEFAULT_LIMIT)]
    limit: u32,

    #[arg(long, default_value = "warn")]
    log_level: String,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logger::init(logger::LogConfig::new(&args.log_level, args.log_file))?;

    let db_config = DbConfig::with_database(&args.database);
    print!("{}", config::startup_text(&db_config)?);

    let db = db::Database::connect(&db_config).await?;
    let settings = Settings {
        posts_root: args.posts_root,
        limit: args.limit,
    };
    let generator = post::PostGenerator::new(db, markdown::Html2Md, settings);

    let summary = generator.run().await?;
    log::info!("Wrote {} posts", summary.written.len());

    Ok(())
}
