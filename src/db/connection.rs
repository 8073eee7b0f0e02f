use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;

/// Reference countries inserted on every start-up. The unique constraint on
/// `countries.name` turns repeated inserts into no-ops.
const BASELINE_COUNTRIES: &[&str] = &["Russia", "France", "Italy"];

/// Handle to the SQLite file. It only remembers where the database lives:
/// every operation opens its own connection and drops it before returning, so
/// nothing is held open between user actions.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a short-lived connection to the database file.
    pub fn open(&self) -> Result<Connection> {
        debug!("opening {}", self.path.display());
        Connection::open(&self.path)
            .with_context(|| format!("failed to open SQLite database {}", self.path.display()))
    }
}

/// Create the data directory and the three tables if they are missing, then
/// make sure the reference countries exist. Safe to call on every start-up:
/// existing tables are never altered.
pub fn ensure_schema(store: &Store) -> Result<()> {
    if let Some(parent) = store.path().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }
    }

    let conn = store.open()?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS tours (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            image TEXT,
            price REAL NOT NULL,
            tickets INTEGER NOT NULL,
            status TEXT NOT NULL CHECK(status IN ('active', 'inactive')),
            type TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create tours table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS hotels (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            stars INTEGER NOT NULL CHECK(stars BETWEEN 0 AND 5),
            country TEXT NOT NULL,
            description TEXT NOT NULL,
            tours_count INTEGER DEFAULT 0
        )",
        [],
    )
    .context("failed to create hotels table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS countries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )",
        [],
    )
    .context("failed to create countries table")?;

    let mut stmt = conn
        .prepare("INSERT OR IGNORE INTO countries (name) VALUES (?1)")
        .context("failed to prepare country insert")?;
    let mut inserted = 0;
    for country in BASELINE_COUNTRIES {
        inserted += stmt
            .execute([country])
            .with_context(|| format!("failed to insert country {country}"))?;
    }

    info!(
        "schema ready at {} ({inserted} new countries)",
        store.path().display()
    );
    Ok(())
}
