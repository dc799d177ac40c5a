use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool},
    Row,
};
use anyhow::{bail, Result};
use chrono::{NaiveDateTime, TimeZone, Utc};
use log::{debug, info};

use crate::config::DbConfig;
use crate::models::FeedItem;

pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        if config.adapter != "sqlite3" {
            bail!("unsupported database adapter: {}", config.adapter);
        }

        info!("Connecting to {}", config.database);
        let options = SqliteConnectOptions::new()
            .filename(&config.database)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        let db = Self { pool };
        db.init().await?;
        Ok(db)
    }

    /// Create the feed tables when pointed at an empty database file.
    /// Existing tables are left alone.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS feeds (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT,
                url TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                feed_id INTEGER NOT NULL,
                title TEXT,
                url TEXT,
                content TEXT,
                summary TEXT,
                published DATETIME,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (feed_id) REFERENCES feeds(id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Most recently published items first, at most `limit` of them.
    pub async fn latest_items(&self, limit: u32) -> Result<Vec<FeedItem>> {
        let rows = sqlx::query(
            r#"
            SELECT items.title, items.url, items.content, items.summary,
                   items.published, feeds.title AS feed_title
            FROM items
            LEFT JOIN feeds ON feeds.id = items.feed_id
            ORDER BY items.published DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} items (limit {})", rows.len(), limit);

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let published: Option<NaiveDateTime> = row.try_get("published")?;
            items.push(FeedItem {
                title: row.try_get::<Option<String>, _>("title")?.unwrap_or_default(),
                url: row.try_get::<Option<String>, _>("url")?.unwrap_or_default(),
                content: row.try_get("content")?,
                summary: row.try_get("summary")?,
                published_at: published.map(|dt| Utc.from_utc_datetime(&dt)),
                feed_title: row.try_get("feed_title")?,
            });
        }

        Ok(items)
    }
}

#[cfg(test)]
impl Database {
    pub async fn add_feed(&self, title: Option<&str>) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO feeds (title)
            VALUES (?)
            RETURNING id
            "#,
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.get(0))
    }

    pub async fn add_item(
        &self,
        feed_id: i64,
        title: &str,
        url: &str,
        content: Option<&str>,
        summary: Option<&str>,
        published: Option<NaiveDateTime>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO items (feed_id, title, url, content, summary, published)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(feed_id)
        .bind(title)
        .bind(url)
        .bind(content)
        .bind(summary)
        .bind(published)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
