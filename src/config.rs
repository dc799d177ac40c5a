use std::path::PathBuf;

use serde::Serialize;

pub const DEFAULT_DATABASE: &str = "./feed.db";
pub const DEFAULT_POSTS_ROOT: &str = "./_posts";
pub const DEFAULT_LIMIT: u32 = 10;

/// Storage connection settings, printed at startup.
#[derive(Debug, Clone, Serialize)]
pub struct DbConfig {
    pub adapter: String,
    pub database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            adapter: "sqlite3".to_string(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

impl DbConfig {
    pub fn with_database(database: &str) -> Self {
        Self {
            database: database.to_string(),
            ..Self::default()
        }
    }
}

/// Where and how many posts to generate
#[derive(Debug, Clone)]
pub struct Settings {
    pub posts_root: PathBuf,
    pub limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            posts_root: PathBuf::from(DEFAULT_POSTS_ROOT),
            limit: DEFAULT_LIMIT,
        }
    }
}

pub fn banner() -> String {
    format!(
        "{}/{} on Rust [{}-{}]",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::ARCH,
        std::env::consts::OS,
    )
}

/// Banner followed by the storage settings, printed before the run
pub fn startup_text(db_config: &DbConfig) -> Result<String, serde_yaml::Error> {
    Ok(format!(
        "{}\ndb settings:\n{}",
        banner(),
        serde_yaml::to_string(db_config)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let db = DbConfig::default();
        assert_eq!(db.adapter, "sqlite3");
        assert_eq!(db.database, "./feed.db");

        let settings = Settings::default();
        assert_eq!(settings.posts_root, PathBuf::from("./_posts"));
        assert_eq!(settings.limit, 10);
    }

    #[test]
    fn test_with_database_keeps_adapter() {
        let db = DbConfig::with_database("/tmp/other.db");
        assert_eq!(db.adapter, "sqlite3");
        assert_eq!(db.database, "/tmp/other.db");
    }

    #[test]
    fn test_banner() {
        let banner = banner();
        assert!(banner.starts_with(&format!("planet/{}", env!("CARGO_PKG_VERSION"))));
        assert!(banner.contains(std::env::consts::OS));
    }

    #[test]
    fn test_startup_text() {
        let text = startup_text(&DbConfig::default()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], banner());
        assert_eq!(lines[1], "db settings:");
        let settings: serde_yaml::Value = serde_yaml::from_str(&lines[2..].join("\n")).unwrap();
        assert_eq!(settings["adapter"], "sqlite3");
        assert_eq!(settings["database"], "./feed.db");
    }
}
