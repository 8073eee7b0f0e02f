use std::path::Path;

use anyhow::Result;

use crate::db::{fetch_tour_types, fetch_tours, Store};
use crate::error::HotelResult;
use crate::images::{resolve_image, TourImage};
use crate::manager::{HotelManager, HotelPage};
use crate::models::{Hotel, TourRow, TourStatus};
use crate::query::{SearchMatch, TourFilter, TypeFilter};

/// Display model for one tour in the listing. Built from a [`TourRow`] so the
/// query engine never carries rendering state.
#[derive(Debug, Clone)]
pub(crate) struct TourCard {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) price: f64,
    pub(crate) tickets: i64,
    pub(crate) status: TourStatus,
    pub(crate) image: TourImage,
}

impl TourCard {
    pub(crate) fn from_row(row: TourRow, image_dir: &Path) -> Self {
        let image = resolve_image(row.image.as_deref(), image_dir);
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            tickets: row.tickets,
            status: row.status,
            image,
        }
    }
}

/// The tour listing together with the filter that produced it.
pub(crate) struct TourScreen {
    pub(crate) filter: TourFilter,
    pub(crate) types: Vec<TypeFilter>,
    pub(crate) cards: Vec<TourCard>,
    pub(crate) selected: usize,
}

impl TourScreen {
    pub(crate) fn load(store: &Store, matching: SearchMatch, image_dir: &Path) -> Result<Self> {
        let mut screen = Self {
            filter: TourFilter::default(),
            types: vec![TypeFilter::All],
            cards: Vec::new(),
            selected: 0,
        };
        screen.reload_types(store)?;
        screen.reload(store, matching, image_dir)?;
        Ok(screen)
    }

    /// Re-run the query for the current filter, keeping the selection on the
    /// same tour when it is still listed.
    pub(crate) fn reload(
        &mut self,
        store: &Store,
        matching: SearchMatch,
        image_dir: &Path,
    ) -> Result<()> {
        let focus = self.current_card().map(|card| card.id);
        self.cards = fetch_tours(store, &self.filter, matching)?
            .into_iter()
            .map(|row| TourCard::from_row(row, image_dir))
            .collect();

        self.selected = focus
            .and_then(|id| self.cards.iter().position(|card| card.id == id))
            .unwrap_or(0);
        self.ensure_in_bounds();
        Ok(())
    }

    /// Refresh the type picker. A selected type that disappeared falls back
    /// to "All types".
    pub(crate) fn reload_types(&mut self, store: &Store) -> Result<()> {
        self.types = fetch_tour_types(store)?;
        if !self.types.contains(&self.filter.kind) {
            self.filter.kind = TypeFilter::All;
        }
        Ok(())
    }

    /// Step through the type picker, wrapping at both ends.
    pub(crate) fn cycle_type(&mut self, offset: isize) {
        if self.types.is_empty() {
            return;
        }
        let len = self.types.len() as isize;
        let current = self
            .types
            .iter()
            .position(|kind| *kind == self.filter.kind)
            .unwrap_or(0) as isize;
        let next = (current + offset).rem_euclid(len) as usize;
        self.filter.kind = self.types[next].clone();
    }

    pub(crate) fn current_card(&self) -> Option<&TourCard> {
        self.cards.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.cards.is_empty() {
            return;
        }
        let len = self.cards.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.cards.len().saturating_sub(1);
    }

    fn ensure_in_bounds(&mut self) {
        if self.selected >= self.cards.len() {
            self.selected = self.cards.len().saturating_sub(1);
        }
    }
}

/// One page of the hotel catalog and the paging state behind it.
pub(crate) struct HotelScreen {
    pub(crate) manager: HotelManager,
    pub(crate) page: HotelPage,
    pub(crate) selected: usize,
}

impl HotelScreen {
    pub(crate) fn open(store: &Store, page_size: i64) -> HotelResult<Self> {
        let mut manager = HotelManager::new(page_size);
        let page = manager.list(store, 1)?;
        Ok(Self {
            manager,
            page,
            selected: 0,
        })
    }

    /// Show a freshly fetched page. `focus` keeps a specific hotel selected
    /// when it is on the page.
    pub(crate) fn show(&mut self, page: HotelPage, focus: Option<i64>) {
        let changed_page = page.page != self.page.page;
        self.page = page;
        if let Some(idx) =
            focus.and_then(|id| self.page.hotels.iter().position(|hotel| hotel.id == id))
        {
            self.selected = idx;
        } else if changed_page {
            self.selected = 0;
        }
        if self.selected >= self.page.hotels.len() {
            self.selected = self.page.hotels.len().saturating_sub(1);
        }
    }

    pub(crate) fn current_hotel(&self) -> Option<&Hotel> {
        self.page.hotels.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.page.hotels.is_empty() {
            return;
        }
        let len = self.page.hotels.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }
}
