//! Start-up settings resolved from command-line flags and the user's home
//! directory.

use std::path::PathBuf;

use anyhow::{anyhow, ensure, Result};
use directories::BaseDirs;

use crate::manager::DEFAULT_PAGE_SIZE;
use crate::query::SearchMatch;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".travel-desk";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "travel_agency.sqlite";
/// Log file name stored next to the database.
const LOG_FILE_NAME: &str = "travel-desk.log";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_file: PathBuf,
    /// Directory relative image references are resolved against.
    pub image_dir: PathBuf,
    pub log_file: PathBuf,
    pub page_size: i64,
    pub search_match: SearchMatch,
}

/// Optional overrides, usually straight from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database_file: Option<PathBuf>,
    pub image_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub page_size: Option<i64>,
    pub case_insensitive: bool,
}

impl Config {
    /// Fill every unset value from the defaults. The home directory is only
    /// looked up when no database path was given; the log file and image
    /// directory default to the folder holding the database.
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        let page_size = overrides.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        ensure!(page_size >= 1, "page size must be at least 1, got {page_size}");

        let search_match = if overrides.case_insensitive {
            SearchMatch::CaseInsensitive
        } else {
            SearchMatch::CaseSensitive
        };

        let database_file = match overrides.database_file {
            Some(path) => path,
            None => data_dir()?.join(DB_FILE_NAME),
        };
        let base_dir = database_file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default();
        let log_file = overrides
            .log_file
            .unwrap_or_else(|| base_dir.join(LOG_FILE_NAME));
        let image_dir = overrides.image_dir.unwrap_or(base_dir);

        Ok(Self {
            database_file,
            image_dir,
            log_file,
            page_size,
            search_match,
        })
    }
}

/// Resolve the application data directory inside the user's home.
fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
