//! Domain models that mirror the SQLite schema. They stay plain data holders:
//! nothing in here knows about rendering, so the terminal UI builds its own
//! display models on top of them.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

/// Whether a tour is currently on sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourStatus {
    Active,
    Inactive,
}

impl TourStatus {
    /// Text stored in the `status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            TourStatus::Active => "active",
            TourStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for TourStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TourStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(TourStatus::Active),
            "inactive" => Ok(TourStatus::Inactive),
            other => Err(format!("unknown tour status '{other}'")),
        }
    }
}

impl ToSql for TourStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TourStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|err: String| FromSqlError::Other(err.into()))
    }
}

/// One row of the tour listing. The engine never hands out the `type` column
/// because the listing does not show it; filtering on it happens in SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct TourRow {
    pub id: i64,
    pub name: String,
    /// Raw image reference as stored. `None` means "use the placeholder".
    pub image: Option<String>,
    pub price: f64,
    pub tickets: i64,
    pub status: TourStatus,
}

/// A hotel from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    /// Star rating, always within `0..=5` thanks to the table constraint.
    pub stars: i64,
    pub country: String,
    pub description: String,
    /// Number of tours referencing this hotel. Maintained outside this
    /// application; we only read it for the delete guard.
    pub tours_count: i64,
}

impl fmt::Display for Hotel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validated hotel fields ready to be written. Produced by
/// [`HotelDraft::validate`](crate::manager::HotelDraft::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHotel {
    pub name: String,
    pub stars: i64,
    pub country: String,
    pub description: String,
}
