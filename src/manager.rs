//! Paging and editing for the hotel catalog.
//!
//! [`HotelManager`] owns the paging state of one session: a fixed page size,
//! the page the user is looking at, and the page count as of the last fetch.
//! Every operation opens one connection through the [`Store`], runs its
//! statements, and closes it again.

use log::{debug, info, warn};

use crate::db::{self, Pagination, Store};
use crate::error::{HotelError, HotelResult, ValidationError};
use crate::models::{Hotel, NewHotel};

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Number of pages needed for `row_count` rows. An empty table still has one
/// (empty) page.
pub fn total_pages(row_count: i64, page_size: i64) -> i64 {
    let page_size = page_size.max(1);
    let row_count = row_count.max(0);
    let pages = row_count / page_size + i64::from(row_count % page_size != 0);
    pages.max(1)
}

/// Raw hotel form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotelDraft {
    pub name: String,
    pub stars: String,
    pub country: String,
    pub description: String,
}

impl HotelDraft {
    /// Check every field and return trimmed, typed values.
    pub fn validate(&self) -> Result<NewHotel, ValidationError> {
        let name = required("Hotel name", &self.name)?;
        let stars_raw = required("Stars", &self.stars)?;
        let country = required("Country", &self.country)?;
        let description = required("Description", &self.description)?;

        // `parse` accepts "+3", the form does not.
        if stars_raw.starts_with('+') {
            return Err(ValidationError::StarsNotInteger);
        }
        let stars = stars_raw
            .parse::<i64>()
            .map_err(|_| ValidationError::StarsNotInteger)?;
        if !(0..=5).contains(&stars) {
            return Err(ValidationError::StarsOutOfRange { stars });
        }

        Ok(NewHotel {
            name: name.to_string(),
            stars,
            country: country.to_string(),
            description: description.to_string(),
        })
    }
}

impl From<&Hotel> for HotelDraft {
    fn from(hotel: &Hotel) -> Self {
        Self {
            name: hotel.name.clone(),
            stars: hotel.stars.to_string(),
            country: hotel.country.clone(),
            description: hotel.description.clone(),
        }
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Blank { field })
    } else {
        Ok(trimmed)
    }
}

/// One fetched page together with the numbers shown next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelPage {
    pub hotels: Vec<Hotel>,
    pub page: i64,
    pub total_pages: i64,
    pub total_rows: i64,
}

/// Result of a delete request that passed the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The caller declined the confirmation. Nothing changed.
    Declined,
    /// The row is gone; carries the refreshed current page.
    Deleted(HotelPage),
}

#[derive(Debug, Clone)]
pub struct HotelManager {
    page_size: i64,
    current_page: i64,
    total_pages: i64,
}

impl Default for HotelManager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl HotelManager {
    pub fn new(page_size: i64) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            total_pages: 1,
        }
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    /// Page count as of the most recent fetch.
    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    /// Fetch `page`. Pages outside `1..=total_pages` are rejected and leave the
    /// manager untouched.
    pub fn list(&mut self, store: &Store, page: i64) -> HotelResult<HotelPage> {
        let conn = store.open()?;
        let total_rows = db::count_hotels(&conn)?;
        let pages = total_pages(total_rows, self.page_size);

        if page < 1 || page > pages {
            warn!("rejected hotel page {page} of {pages}");
            return Err(HotelError::PageOutOfRange {
                page,
                total_pages: pages,
            });
        }

        let hotels = db::fetch_hotel_page(&conn, Pagination::page(page, self.page_size))?;
        self.current_page = page;
        self.total_pages = pages;
        debug!(
            "hotel page {page}/{pages}: {} rows of {total_rows}",
            hotels.len()
        );

        Ok(HotelPage {
            hotels,
            page,
            total_pages: pages,
            total_rows,
        })
    }

    pub fn next_page(&mut self, store: &Store) -> HotelResult<HotelPage> {
        self.list(store, self.current_page + 1)
    }

    pub fn previous_page(&mut self, store: &Store) -> HotelResult<HotelPage> {
        self.list(store, self.current_page - 1)
    }

    /// Re-fetch the current page. After deletions the current page may no
    /// longer exist, in which case the last remaining page is shown.
    pub fn refresh(&mut self, store: &Store) -> HotelResult<HotelPage> {
        let total_rows = {
            let conn = store.open()?;
            db::count_hotels(&conn)?
        };
        let page = self
            .current_page
            .clamp(1, total_pages(total_rows, self.page_size));
        self.list(store, page)
    }

    /// Look up a single hotel, e.g. to pre-fill the edit form.
    pub fn hotel(&self, store: &Store, id: i64) -> HotelResult<Hotel> {
        let conn = store.open()?;
        db::fetch_hotel(&conn, id)?.ok_or(HotelError::NotFound { id })
    }

    /// Validate and insert a new hotel, then refresh the current page.
    pub fn create(&mut self, store: &Store, draft: &HotelDraft) -> HotelResult<HotelPage> {
        let hotel = draft.validate().inspect_err(|err| {
            warn!("rejected new hotel: {err}");
        })?;

        {
            let conn = store.open()?;
            let id = db::insert_hotel(&conn, &hotel)?;
            info!("created hotel {id} ({})", hotel.name);
        }

        self.refresh(store)
    }

    /// Validate and overwrite every editable field of hotel `id`.
    pub fn update(
        &mut self,
        store: &Store,
        id: i64,
        draft: &HotelDraft,
    ) -> HotelResult<HotelPage> {
        let hotel = draft.validate().inspect_err(|err| {
            warn!("rejected update of hotel {id}: {err}");
        })?;

        {
            let conn = store.open()?;
            if db::update_hotel(&conn, id, &hotel)? == 0 {
                return Err(HotelError::NotFound { id });
            }
            info!("updated hotel {id} ({})", hotel.name);
        }

        self.refresh(store)
    }

    /// Delete hotel `id` once `confirm` agrees. Hotels still linked to tours
    /// are refused before the caller is asked anything.
    pub fn delete<F>(&mut self, store: &Store, id: i64, confirm: F) -> HotelResult<DeleteOutcome>
    where
        F: FnOnce(&Hotel) -> bool,
    {
        let hotel = self.hotel(store, id)?;
        ensure_unreferenced(&hotel)?;

        if !confirm(&hotel) {
            debug!("deletion of hotel {id} declined");
            return Ok(DeleteOutcome::Declined);
        }

        {
            let conn = store.open()?;
            if db::delete_unreferenced_hotel(&conn, id)? == 0 {
                // Gone or referenced since we looked: report the current state.
                let hotel = db::fetch_hotel(&conn, id)?.ok_or(HotelError::NotFound { id })?;
                ensure_unreferenced(&hotel)?;
                return Err(HotelError::NotFound { id });
            }
            info!("deleted hotel {id} ({})", hotel.name);
        }

        self.refresh(store).map(DeleteOutcome::Deleted)
    }
}

/// The referential guard: a hotel with tours attached stays.
pub fn ensure_unreferenced(hotel: &Hotel) -> HotelResult<()> {
    if hotel.tours_count > 0 {
        warn!(
            "refused to delete hotel {} linked to {} tours",
            hotel.id, hotel.tours_count
        );
        return Err(HotelError::Referenced {
            name: hotel.name.clone(),
            tours_count: hotel.tours_count,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, stars: &str, country: &str, description: &str) -> HotelDraft {
        HotelDraft {
            name: name.to_string(),
            stars: stars.to_string(),
            country: country.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn page_count_rounds_up_and_never_hits_zero() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn page_count_survives_huge_page_sizes() {
        assert_eq!(total_pages(1, i64::MAX), 1);
        assert_eq!(total_pages(i64::MAX, i64::MAX), 1);
        assert_eq!(total_pages(i64::MAX, 2), i64::MAX / 2 + 1);
    }

    #[test]
    fn draft_validation_trims_and_parses() {
        let hotel = draft(" Inn ", " 4 ", " Italy ", " Nice ").validate().unwrap();
        assert_eq!(
            hotel,
            NewHotel {
                name: "Inn".to_string(),
                stars: 4,
                country: "Italy".to_string(),
                description: "Nice".to_string(),
            }
        );
    }

    #[test]
    fn draft_validation_reports_each_failure() {
        assert_eq!(
            draft("  ", "3", "Italy", "x").validate(),
            Err(ValidationError::Blank { field: "Hotel name" })
        );
        assert_eq!(
            draft("Inn", "3", "Italy", "\n").validate(),
            Err(ValidationError::Blank {
                field: "Description"
            })
        );
        assert_eq!(
            draft("Inn", "three", "Italy", "x").validate(),
            Err(ValidationError::StarsNotInteger)
        );
        assert_eq!(
            draft("Inn", "6", "Italy", "x").validate(),
            Err(ValidationError::StarsOutOfRange { stars: 6 })
        );
        assert_eq!(
            draft("Inn", "-1", "Italy", "x").validate(),
            Err(ValidationError::StarsOutOfRange { stars: -1 })
        );
        assert_eq!(
            draft("Inn", "+3", "Italy", "x").validate(),
            Err(ValidationError::StarsNotInteger)
        );
    }

    #[test]
    fn guard_refuses_referenced_hotels() {
        let hotel = Hotel {
            id: 1,
            name: "Busy".to_string(),
            stars: 3,
            country: "France".to_string(),
            description: "x".to_string(),
            tours_count: 2,
        };
        assert!(matches!(
            ensure_unreferenced(&hotel),
            Err(HotelError::Referenced { tours_count: 2, .. })
        ));
    }
}
