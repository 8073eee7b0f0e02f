//! Command-line arguments and the non-interactive subcommands. Running without
//! a subcommand starts the terminal UI instead.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{Config, Overrides};
use crate::db::{fetch_tour_types, fetch_tours, Store};
use crate::manager::{DeleteOutcome, HotelDraft, HotelManager, HotelPage};
use crate::query::{PriceSort, TourFilter, TypeFilter};

/// Tours and hotels for a small travel agency.
///
/// Without a subcommand the interactive terminal UI starts.
#[derive(Parser, Debug)]
#[command(version, about, name = "travel-desk")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// ~/.travel-desk/travel_agency.sqlite
    #[arg(long, global = true, env = "TRAVEL_DESK_DB")]
    pub database_file: Option<PathBuf>,

    /// Directory that relative tour image paths are resolved against.
    /// Defaults to the database directory
    #[arg(long, global = true)]
    pub image_dir: Option<PathBuf>,

    /// Log file used while the terminal UI is running. Defaults to
    /// travel-desk.log next to the database
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Number of hotels per page
    #[arg(long, global = true)]
    pub page_size: Option<i64>,

    /// Match tour searches without regard to ASCII letter case
    #[arg(long, global = true)]
    pub case_insensitive: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Args {
    pub fn config(&self) -> Result<Config> {
        Config::resolve(Overrides {
            database_file: self.database_file.clone(),
            image_dir: self.image_dir.clone(),
            log_file: self.log_file.clone(),
            page_size: self.page_size,
            case_insensitive: self.case_insensitive,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tours matching the given filters
    Tours {
        /// Text contained in the tour name or type
        #[arg(long, default_value = "")]
        search: String,
        /// Only tours of exactly this type
        #[arg(long = "type")]
        kind: Option<String>,
        /// Only tours that are currently on sale
        #[arg(long)]
        active_only: bool,
        /// Order by price
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
    /// List the tour type choices
    Types,
    /// Show one page of hotels
    Hotels {
        #[arg(long, default_value_t = 1)]
        page: i64,
    },
    /// Add, edit or delete hotels
    Hotel {
        #[command(subcommand)]
        command: HotelCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum HotelCommands {
    /// Add a hotel
    Add {
        name: String,
        stars: String,
        country: String,
        description: String,
    },
    /// Replace the fields of an existing hotel
    Edit {
        id: i64,
        name: String,
        stars: String,
        country: String,
        description: String,
    },
    /// Delete a hotel that no tour references
    Delete {
        id: i64,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for PriceSort {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Asc => PriceSort::Ascending,
            SortArg::Desc => PriceSort::Descending,
        }
    }
}

/// Run one subcommand against an initialised store, writing to `out`.
pub fn run_command(
    command: Commands,
    config: &Config,
    store: &Store,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Tours {
            search,
            kind,
            active_only,
            sort,
        } => {
            let filter = TourFilter {
                search,
                kind: kind
                    .as_deref()
                    .map(TypeFilter::from_label)
                    .unwrap_or_default(),
                active_only,
                sort: sort.map(PriceSort::from).unwrap_or_default(),
            };
            let tours = fetch_tours(store, &filter, config.search_match)?;
            if tours.is_empty() {
                writeln!(out, "No tours found.")?;
            }
            for tour in tours {
                writeln!(
                    out,
                    "{} | {:.2} RUB | {} tickets | {}",
                    tour.name, tour.price, tour.tickets, tour.status
                )?;
            }
        }
        Commands::Types => {
            for kind in fetch_tour_types(store)? {
                writeln!(out, "{kind}")?;
            }
        }
        Commands::Hotels { page } => {
            let mut manager = HotelManager::new(config.page_size);
            let page = manager.list(store, page)?;
            print_page(out, &page)?;
        }
        Commands::Hotel { command } => {
            let mut manager = HotelManager::new(config.page_size);
            match command {
                HotelCommands::Add {
                    name,
                    stars,
                    country,
                    description,
                } => {
                    let draft = HotelDraft {
                        name,
                        stars,
                        country,
                        description,
                    };
                    manager.create(store, &draft)?;
                    writeln!(out, "Added hotel \"{}\".", draft.name.trim())?;
                }
                HotelCommands::Edit {
                    id,
                    name,
                    stars,
                    country,
                    description,
                } => {
                    let draft = HotelDraft {
                        name,
                        stars,
                        country,
                        description,
                    };
                    manager.update(store, id, &draft)?;
                    writeln!(out, "Updated hotel {id}.")?;
                }
                HotelCommands::Delete { id, yes } => {
                    match manager.delete(store, id, |_| yes)? {
                        DeleteOutcome::Declined => writeln!(
                            out,
                            "Nothing deleted. Pass --yes to confirm deleting hotel {id}."
                        )?,
                        DeleteOutcome::Deleted(_) => writeln!(out, "Deleted hotel {id}.")?,
                    }
                }
            }
        }
    }

    out.flush().context("failed to flush output")
}

fn print_page(out: &mut impl Write, page: &HotelPage) -> Result<()> {
    if page.hotels.is_empty() {
        writeln!(out, "No hotels yet.")?;
    }
    for hotel in &page.hotels {
        writeln!(
            out,
            "{:>4}  {}  {}*  {}  tours: {}",
            hotel.id, hotel.name, hotel.stars, hotel.country, hotel.tours_count
        )?;
    }
    writeln!(out, "Page {} of {}", page.page, page.total_pages)?;
    Ok(())
}
