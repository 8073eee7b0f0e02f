use anyhow::{Context, Result};
use log::debug;
use rusqlite::params_from_iter;

use crate::models::TourRow;
use crate::query::{build_tour_query, SearchMatch, TourFilter, TypeFilter};

use super::connection::Store;

/// Run the tour listing for `filter`. The whole matching set is returned; the
/// tour view has no paging. Store failures are passed up untouched.
pub fn fetch_tours(
    store: &Store,
    filter: &TourFilter,
    matching: SearchMatch,
) -> Result<Vec<TourRow>> {
    let query = build_tour_query(filter, matching);
    debug!("tour query: {} {:?}", query.sql, query.params);

    let conn = store.open()?;
    let mut stmt = conn
        .prepare(&query.sql)
        .context("failed to prepare tour query")?;

    let tours = stmt
        .query_map(params_from_iter(query.params.iter()), |row| {
            Ok(TourRow {
                id: row.get(0)?,
                name: row.get(1)?,
                image: row.get(2)?,
                price: row.get(3)?,
                tickets: row.get(4)?,
                status: row.get(5)?,
            })
        })
        .context("failed to load tours")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect tours")?;

    Ok(tours)
}

/// Every distinct tour type, preceded by the "All types" sentinel, for the
/// type picker.
pub fn fetch_tour_types(store: &Store) -> Result<Vec<TypeFilter>> {
    let conn = store.open()?;
    let mut stmt = conn
        .prepare("SELECT DISTINCT type FROM tours ORDER BY type")
        .context("failed to prepare tour type query")?;

    let mut rows = stmt.query([]).context("failed to execute tour type query")?;

    let mut types = vec![TypeFilter::All];
    while let Some(row) = rows.next().context("failed to fetch tour type row")? {
        let kind: String = row.get(0).context("failed to read tour type")?;
        types.push(TypeFilter::Exactly(kind));
    }

    Ok(types)
}
