use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::{Hotel, NewHotel};

/// Offset/limit pair for one page of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Window for the 1-based `page` with `per_page` rows each.
    pub fn page(page: i64, per_page: i64) -> Self {
        let per_page = per_page.max(1);
        let page = page.max(1);
        Self {
            limit: per_page,
            offset: (page - 1) * per_page,
        }
    }
}

fn hotel_from_row(row: &Row<'_>) -> rusqlite::Result<Hotel> {
    Ok(Hotel {
        id: row.get(0)?,
        name: row.get(1)?,
        stars: row.get(2)?,
        country: row.get(3)?,
        description: row.get(4)?,
        tours_count: row.get::<_, Option<i64>>(5)?.unwrap_or(0),
    })
}

pub fn count_hotels(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM hotels", [], |row| row.get(0))
        .context("failed to count hotels")
}

/// One page of hotels in insertion order.
pub fn fetch_hotel_page(conn: &Connection, window: Pagination) -> Result<Vec<Hotel>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, stars, country, description, tours_count
             FROM hotels
             ORDER BY id
             LIMIT ?1 OFFSET ?2",
        )
        .context("failed to prepare hotel page query")?;

    let hotels = stmt
        .query_map(params![window.limit, window.offset], hotel_from_row)
        .context("failed to load hotels")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect hotels")?;

    Ok(hotels)
}

pub fn fetch_hotel(conn: &Connection, id: i64) -> Result<Option<Hotel>> {
    conn.query_row(
        "SELECT id, name, stars, country, description, tours_count
         FROM hotels
         WHERE id = ?1",
        params![id],
        hotel_from_row,
    )
    .optional()
    .context("failed to load hotel")
}

/// Insert a hotel. `tours_count` starts at zero through the column default.
pub fn insert_hotel(conn: &Connection, hotel: &NewHotel) -> Result<i64> {
    conn.execute(
        "INSERT INTO hotels (name, stars, country, description) VALUES (?1, ?2, ?3, ?4)",
        params![hotel.name, hotel.stars, hotel.country, hotel.description],
    )
    .context("failed to insert hotel")?;

    Ok(conn.last_insert_rowid())
}

/// Overwrite the editable fields of a hotel. Returns the number of rows
/// touched so callers can report a missing hotel.
pub fn update_hotel(conn: &Connection, id: i64, hotel: &NewHotel) -> Result<usize> {
    conn.execute(
        "UPDATE hotels SET name = ?1, stars = ?2, country = ?3, description = ?4 WHERE id = ?5",
        params![hotel.name, hotel.stars, hotel.country, hotel.description, id],
    )
    .context("failed to update hotel")
}

/// Delete a hotel that no tour references. The guard is part of the statement
/// so a referenced row is never removed, even if the count changed after the
/// caller looked at it.
pub fn delete_unreferenced_hotel(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute(
        "DELETE FROM hotels WHERE id = ?1 AND COALESCE(tours_count, 0) = 0",
        params![id],
    )
    .context("failed to delete hotel")
}
