use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FeedItem {
    pub title: String,
    pub url: String,             // May be empty, then no original_link is written
    pub content: Option<String>, // HTML
    pub summary: Option<String>, // HTML
    pub published_at: Option<DateTime<Utc>>,
    pub feed_title: Option<String>,
}

/// YAML header written at the top of every post file.
/// Field order is the order keys appear in the file.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FrontMatter {
    pub title: String,
    pub author: Option<String>,
    pub layout: String,
    pub permalink: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub original_link: Option<String>,
}
