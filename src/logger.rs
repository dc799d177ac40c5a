use std::io;
use std::path::PathBuf;

use anyhow::Result;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// Targets that log every statement at info; capped so `--log-level info`
/// shows post progress rather than SQL.
const NOISY_TARGETS: &[&str] = &["sqlx"];

pub struct LogConfig {
    pub level: LevelFilter,
    /// Also append uncolored lines to this file
    pub log_file: Option<PathBuf>,
}

impl LogConfig {
    pub fn new(level: &str, log_file: Option<PathBuf>) -> Self {
        Self {
            level: parse_log_level(level),
            log_file,
        }
    }
}

/// Install the global logger. Must be called at most once.
pub fn init(config: LogConfig) -> Result<()> {
    let mut dispatch = fern::Dispatch::new().level(config.level);
    for target in NOISY_TARGETS {
        dispatch = dispatch.level_for(*target, config.level.min(LevelFilter::Warn));
    }

    // stdout carries the banner and `[i] title` lines
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);
    let console = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                colors.color(record.level()),
                message
            ))
        })
        .chain(io::stderr());
    dispatch = dispatch.chain(console);

    if let Some(path) = config.log_file {
        let file = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{} [{}] [{}] {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.target(),
                    record.level(),
                    message
                ))
            })
            .chain(fern::log_file(path)?);
        dispatch = dispatch.chain(file);
    }

    dispatch.apply()?;

    Ok(())
}

/// Unrecognized names fall back to `Info`
pub fn parse_log_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}
