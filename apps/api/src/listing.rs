//! Shared pieces of the list endpoints: sort direction, null-last comparison,
//! case-insensitive search and pagination.
//!
//! Every list endpoint follows the same shape: filter the full record set in
//! memory, sort it stably by the selected key, then slice out one page.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Re-selecting the active key flips direction; a new key starts ascending.
    pub fn toggle<K: PartialEq>(current_key: &K, current: SortDirection, selected: &K) -> Self {
        if current_key == selected {
            current.flip()
        } else {
            SortDirection::Asc
        }
    }

    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// The sort a list was produced with, echoed in list responses.
///
/// A request may carry `toggle=<key>` next to its current `sort` and
/// `direction`, as a column-header click does: the clicked key becomes the
/// sort key and the direction follows [`SortDirection::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState<K> {
    pub sort: K,
    pub direction: SortDirection,
}

impl<K: Copy + PartialEq> SortState<K> {
    pub fn resolve(sort: K, direction: SortDirection, toggle: Option<K>) -> Self {
        match toggle {
            Some(selected) => Self {
                sort: selected,
                direction: SortDirection::toggle(&sort, direction, &selected),
            },
            None => Self { sort, direction },
        }
    }
}

/// Compares optional values in `direction`, keeping `None` last either way.
pub fn cmp_optional<T: Ord>(a: Option<&T>, b: Option<&T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive substring search over `fields`. A blank term matches
/// everything.
pub fn matches_search<'a>(
    search: Option<&str>,
    fields: impl IntoIterator<Item = &'a str>,
) -> bool {
    match search.map(str::trim).filter(|s| !s.is_empty()) {
        None => true,
        Some(term) => {
            let term = term.to_lowercase();
            fields
                .into_iter()
                .any(|field| field.to_lowercase().contains(&term))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
}

impl Pagination {
    pub fn new(page: Option<u32>, limit: Option<u32>, total: usize) -> Self {
        let page = page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let total_pages = total.div_ceil(limit as usize) as u32;
        let has_next_page = page < total_pages;
        let has_prev_page = page > 1;
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next_page,
            has_prev_page,
            // only computed when in range; u32::MAX must not overflow
            next_page: if has_next_page { Some(page + 1) } else { None },
            prev_page: if has_prev_page { Some(page - 1) } else { None },
        }
    }

    /// The slice of `items` that falls on this page; empty past the end.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let start = (self.page as usize - 1).saturating_mul(self.limit as usize);
        items
            .into_iter()
            .skip(start)
            .take(self.limit as usize)
            .collect()
    }
}

/// Body returned by every list endpoint.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn paginate(items: Vec<T>, page: Option<u32>, limit: Option<u32>) -> Self {
        let pagination = Pagination::new(page, limit, items.len());
        Self {
            items: pagination.slice(items),
            pagination,
        }
    }
}
