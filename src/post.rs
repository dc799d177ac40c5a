use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::config::Settings;
use crate::db::Database;
use crate::error::PlanetError;
use crate::markdown::{ConvertOptions, HtmlConverter};
use crate::models::{FeedItem, FrontMatter};
use crate::slug::title_to_key;

const LAYOUT: &str = "post";
const DELIMITER: &str = "---\n";

/// Outcome of one `run`, in write order
#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
}

/// Writes feed items out as static-site posts
pub struct PostGenerator<C: HtmlConverter> {
    db: Database,
    converter: C,
    options: ConvertOptions,
    settings: Settings,
}

impl<C: HtmlConverter> PostGenerator<C> {
    pub fn new(db: Database, converter: C, settings: Settings) -> Self {
        Self {
            db,
            converter,
            options: ConvertOptions::default(),
            settings,
        }
    }

    /// Fetch the latest items and write one post per item, in fetch order.
    /// The first failure stops the run.
    pub async fn run(&self) -> Result<RunSummary> {
        let items = self.db.latest_items(self.settings.limit).await?;
        info!("Generating {} posts into {}", items.len(), self.settings.posts_root.display());

        let mut summary = RunSummary::default();
        for (i, item) in items.iter().enumerate() {
            println!("{}", progress_line(i, item));
            let path = self.generate_blog_post(item)?;
            summary.written.push(path);
        }

        Ok(summary)
    }

    pub fn generate_blog_post(&self, item: &FeedItem) -> Result<PathBuf, PlanetError> {
        let root = &self.settings.posts_root;
        fs::create_dir_all(root).map_err(|source| PlanetError::CreateDir {
            path: root.clone(),
            source,
        })?;

        let published = published_at(item)?;
        let slug = title_to_key(&item.title);
        let path = post_path(root, published, &slug);

        let mut text = front_matter_block(&front_matter(item, published, &slug))?;
        match self.body(item) {
            Some(body) => text.push_str(&body),
            None => debug!("No content or summary for '{}'", item.title),
        }

        fs::write(&path, text).map_err(|source| PlanetError::WritePost {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {}", path.display());

        Ok(path)
    }

    /// Markdown body from `content`, falling back to `summary`
    fn body(&self, item: &FeedItem) -> Option<String> {
        item.content
            .as_deref()
            .or(item.summary.as_deref())
            .map(|html| self.converter.convert(html, &self.options))
    }
}

/// `[n] title` with `n` counted from 1
pub fn progress_line(index: usize, item: &FeedItem) -> String {
    format!("[{}] {}", index + 1, item.title)
}

fn published_at(item: &FeedItem) -> Result<DateTime<Utc>, PlanetError> {
    item.published_at
        .ok_or_else(|| PlanetError::MissingPublishedDate {
            title: item.title.clone(),
        })
}

pub fn post_path(root: &Path, published: DateTime<Utc>, slug: &str) -> PathBuf {
    root.join(format!("{}-{}.md", published.format("%Y-%m-%d"), slug))
}

pub fn front_matter(item: &FeedItem, published: DateTime<Utc>, slug: &str) -> FrontMatter {
    FrontMatter {
        title: item.title.clone(),
        author: item.feed_title.clone(),
        layout: LAYOUT.to_string(),
        permalink: format!("{}-{}.html", published.format("%Y-%m-%d-%H-%M:%S"), slug),
        original_link: (!item.url.is_empty()).then(|| item.url.clone()),
    }
}

/// YAML mapping wrapped in `---` lines, followed by a blank line
pub fn front_matter_block(front_matter: &FrontMatter) -> Result<String, PlanetError> {
    let yaml = serde_yaml::to_string(front_matter)?;
    Ok(format!("{DELIMITER}{yaml}{DELIMITER}\n"))
}
