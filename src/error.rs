use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanetError {
    #[error("item '{title}' has no publish date")]
    MissingPublishedDate { title: String },

    #[error("failed to write post file {path}: {source}")]
    WritePost {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create posts directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize front-matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
}
