//! Ratatui front-end: the tour listing, the paged hotel table, and the hotel
//! form dialogs.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
