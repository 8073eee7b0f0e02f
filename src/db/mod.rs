//! Persistence module split across logical submodules.

mod connection;
mod countries;
mod hotels;
mod seed;
mod tours;

pub use connection::{ensure_schema, Store};
pub use countries::fetch_countries;
pub use hotels::{
    count_hotels, delete_unreferenced_hotel, fetch_hotel, fetch_hotel_page, insert_hotel,
    update_hotel, Pagination,
};
pub use seed::seed_sample_data;
pub use tours::{fetch_tour_types, fetch_tours};
