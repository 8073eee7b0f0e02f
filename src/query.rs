//! Filter and sort settings for the tour listing, and the SQL they turn into.
//!
//! The three predicates are independent: each one either contributes an
//! `AND` clause with its own bound parameters or contributes nothing. The
//! resulting statement is a plain single-table `SELECT`; executing it lives in
//! [`crate::db::fetch_tours`].

use std::fmt;

use crate::models::TourStatus;

/// Label of the "no type restriction" choice.
pub const ALL_TYPES_LABEL: &str = "All types";

/// Type filter choice. `All` is the sentinel shown first in the type picker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Exactly(String),
}

impl TypeFilter {
    /// Map a picker label back to a filter. The sentinel label and blank input
    /// both mean "all types".
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed == ALL_TYPES_LABEL {
            TypeFilter::All
        } else {
            TypeFilter::Exactly(trimmed.to_string())
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str(ALL_TYPES_LABEL),
            TypeFilter::Exactly(kind) => f.write_str(kind),
        }
    }
}

/// Optional ordering by price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceSort {
    /// Store order, usually insertion order. Nothing is guaranteed.
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl PriceSort {
    /// Next option in the picker cycle.
    pub fn cycle(self) -> Self {
        match self {
            PriceSort::Unsorted => PriceSort::Ascending,
            PriceSort::Ascending => PriceSort::Descending,
            PriceSort::Descending => PriceSort::Unsorted,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceSort::Unsorted => "Default",
            PriceSort::Ascending => "Price ascending",
            PriceSort::Descending => "Price descending",
        }
    }

    fn order_clause(self) -> Option<&'static str> {
        match self {
            PriceSort::Unsorted => None,
            PriceSort::Ascending => Some(" ORDER BY price ASC"),
            PriceSort::Descending => Some(" ORDER BY price DESC"),
        }
    }
}

/// How the search text is compared against tour names and types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMatch {
    /// Exact substring test with `instr`, unaffected by collation.
    #[default]
    CaseSensitive,
    /// `LIKE` with ASCII case folding.
    CaseInsensitive,
}

/// Everything the tour listing is filtered and ordered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourFilter {
    pub search: String,
    pub kind: TypeFilter,
    pub active_only: bool,
    pub sort: PriceSort,
}

impl Default for TourFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            kind: TypeFilter::All,
            // The listing opens on tours that are still on sale.
            active_only: true,
            sort: PriceSort::Unsorted,
        }
    }
}

impl TourFilter {
    /// Filter that lets every tour through in store order.
    pub fn everything() -> Self {
        Self {
            active_only: false,
            ..Self::default()
        }
    }
}

/// A statement plus its positional parameters, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourQuery {
    pub sql: String,
    pub params: Vec<String>,
}

/// Assemble the listing statement for `filter`.
pub fn build_tour_query(filter: &TourFilter, matching: SearchMatch) -> TourQuery {
    let mut sql =
        String::from("SELECT id, name, image, price, tickets, status FROM tours WHERE 1=1");
    let mut params = Vec::new();

    let search = filter.search.trim();
    if !search.is_empty() {
        match matching {
            SearchMatch::CaseSensitive => {
                sql.push_str(" AND (instr(name, ?) > 0 OR instr(type, ?) > 0)");
                params.push(search.to_string());
                params.push(search.to_string());
            }
            SearchMatch::CaseInsensitive => {
                sql.push_str(" AND (name LIKE ? ESCAPE '\\' OR type LIKE ? ESCAPE '\\')");
                let pattern = format!("%{}%", escape_like(search));
                params.push(pattern.clone());
                params.push(pattern);
            }
        }
    }

    if let TypeFilter::Exactly(kind) = &filter.kind {
        sql.push_str(" AND type = ?");
        params.push(kind.clone());
    }

    if filter.active_only {
        sql.push_str(" AND status = ?");
        params.push(TourStatus::Active.as_str().to_string());
    }

    if let Some(order) = filter.sort.order_clause() {
        sql.push_str(order);
    }

    TourQuery { sql, params }
}

/// Escape `LIKE` wildcards so user text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
