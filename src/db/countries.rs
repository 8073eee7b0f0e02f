use anyhow::{Context, Result};

use super::connection::Store;

/// Reference country names, alphabetical. The hotel form offers them as
/// suggestions for its country field.
pub fn fetch_countries(store: &Store) -> Result<Vec<String>> {
    let conn = store.open()?;
    let mut stmt = conn
        .prepare("SELECT name FROM countries ORDER BY name")
        .context("failed to prepare country query")?;

    let countries = stmt
        .query_map([], |row| row.get(0))
        .context("failed to load countries")?
        .collect::<Result<Vec<String>, _>>()
        .context("failed to collect countries")?;

    Ok(countries)
}
