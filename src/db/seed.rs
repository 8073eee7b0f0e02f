use anyhow::{Context, Result};
use log::info;
use rusqlite::{params, Connection};

use crate::models::TourStatus;

use super::connection::Store;

/// Demonstration tours: name, price, tickets, status, type.
const SAMPLE_TOURS: &[(&str, f64, i64, TourStatus, &str)] = &[
    ("Golden Ring of Russia", 15000.0, 20, TourStatus::Active, "Historical"),
    ("French Riviera", 85000.0, 5, TourStatus::Active, "Beach"),
    ("Alps and Cote d'Azur", 120000.0, 2, TourStatus::Inactive, "Ski"),
];

/// Demonstration hotels: name, stars, country, description, tours_count.
const SAMPLE_HOTELS: &[(&str, i64, &str, &str, i64)] = &[
    ("Hotel Moscow", 5, "Russia", "Luxury hotel in the centre of Moscow", 3),
    ("Azure Coast", 4, "France", "Hotel with a sea view", 2),
    ("Mountain Resort", 3, "Italy", "Cosy hotel in the Alps", 1),
];

/// Fill empty `tours` and `hotels` tables with demonstration rows. Each table
/// is checked on its own, and a table that already has rows is left alone, so
/// calling this repeatedly never duplicates anything.
pub fn seed_sample_data(store: &Store) -> Result<()> {
    let mut conn = store.open()?;

    if table_is_empty(&conn, "tours")? {
        let tx = conn
            .transaction()
            .context("failed to start tour seed transaction")?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO tours (name, image, price, tickets, status, type)
                     VALUES (?1, NULL, ?2, ?3, ?4, ?5)",
                )
                .context("failed to prepare tour seed insert")?;
            for (name, price, tickets, status, kind) in SAMPLE_TOURS {
                stmt.execute(params![name, price, tickets, status, kind])
                    .with_context(|| format!("failed to seed tour {name}"))?;
            }
        }
        tx.commit().context("failed to commit tour seed")?;
        info!("seeded {} sample tours", SAMPLE_TOURS.len());
    }

    if table_is_empty(&conn, "hotels")? {
        let tx = conn
            .transaction()
            .context("failed to start hotel seed transaction")?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO hotels (name, stars, country, description, tours_count)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )
                .context("failed to prepare hotel seed insert")?;
            for (name, stars, country, description, tours_count) in SAMPLE_HOTELS {
                stmt.execute(params![name, stars, country, description, tours_count])
                    .with_context(|| format!("failed to seed hotel {name}"))?;
            }
        }
        tx.commit().context("failed to commit hotel seed")?;
        info!("seeded {} sample hotels", SAMPLE_HOTELS.len());
    }

    Ok(())
}

fn table_is_empty(conn: &Connection, table: &str) -> Result<bool> {
    // Table names come from the constants above, never from user input.
    let count: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
        .with_context(|| format!("failed to count {table}"))?;
    Ok(count == 0)
}
