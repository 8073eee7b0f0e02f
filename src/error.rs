//! Typed outcomes for the hotel catalog. Store plumbing keeps using
//! `anyhow::Error` with context strings; these enums cover the failures a user
//! can trigger and needs to read about.

use thiserror::Error;

/// A hotel form field that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required.")]
    Blank { field: &'static str },
    #[error("Stars must be a whole number.")]
    StarsNotInteger,
    #[error("Stars must be between 0 and 5, got {stars}.")]
    StarsOutOfRange { stars: i64 },
}

/// Everything that can go wrong while paging or editing hotels.
#[derive(Error, Debug)]
pub enum HotelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The hotel is still referenced by tours and must stay.
    #[error("Hotel \"{name}\" is linked to {tours_count} tour(s) and cannot be deleted.")]
    Referenced { name: String, tours_count: i64 },
    #[error("Hotel {id} not found.")]
    NotFound { id: i64 },
    #[error("Page {page} is out of range (1-{total_pages}).")]
    PageOutOfRange { page: i64, total_pages: i64 },
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl HotelError {
    /// True for failures caused by user input rather than the store.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, HotelError::Store(_))
    }
}

pub type HotelResult<T> = std::result::Result<T, HotelError>;
