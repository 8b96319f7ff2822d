//! Helpers that shape query results for grid-style presentation.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Number of columns in the hotel intro grid.
pub const INTRO_COLUMNS: usize = 5;

/// Split `items` into [`INTRO_COLUMNS`] contiguous slices.
///
/// Every slice gets `len / 5` items and the first `len % 5` slices get one
/// extra, so concatenating the slices yields `items` unchanged.
pub fn intro_columns<T>(items: &[T]) -> Vec<&[T]> {
    let base = items.len() / INTRO_COLUMNS;
    let remainder = items.len() % INTRO_COLUMNS;

    let mut columns = Vec::with_capacity(INTRO_COLUMNS);
    let mut rest = items;
    for i in 0..INTRO_COLUMNS {
        let take = if i < remainder { base + 1 } else { base };
        let (head, tail) = rest.split_at(take);
        columns.push(head);
        rest = tail;
    }
    columns
}

/// Align `(date, value)` pairs onto a list of dates.
///
/// The output has one entry per distinct requested date, in ascending date
/// order, with `None` where no value exists. Pairs for dates that were not
/// requested are ignored.
pub fn values_by_dates<T: Clone>(dates: &[NaiveDate], values: &[(NaiveDate, T)]) -> Vec<Option<T>> {
    let mut grid: BTreeMap<NaiveDate, Option<T>> = dates.iter().map(|d| (*d, None)).collect();
    for (date, value) in values {
        if let Some(slot) = grid.get_mut(date) {
            *slot = Some(value.clone());
        }
    }
    grid.into_values().collect()
}
