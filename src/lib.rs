//! Core library surface for the Travel Desk application.
//!
//! The persistence layer, the tour query engine, and the hotel manager are
//! usable without the terminal UI, which is how the CLI subcommands and the
//! integration tests drive them.
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod images;
pub mod manager;
pub mod models;
pub mod query;
pub mod ui;

pub use config::Config;
pub use db::{ensure_schema, seed_sample_data, Store};
pub use error::{HotelError, ValidationError};
pub use manager::{DeleteOutcome, HotelDraft, HotelManager, HotelPage};
pub use models::{Hotel, TourRow, TourStatus};
pub use query::{PriceSort, SearchMatch, TourFilter, TypeFilter};

pub use ui::{run_app, App};
