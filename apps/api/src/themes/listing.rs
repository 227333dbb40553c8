use serde::{Deserialize, Serialize};

use crate::listing::{matches_search, SortDirection, SortState};
use crate::models::{Priority, Theme};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeSortKey {
    #[default]
    UpdatedAt,
    Title,
    Priority,
    CreatedAt,
}

impl ThemeSortKey {
    pub fn default_direction(&self) -> SortDirection {
        match self {
            ThemeSortKey::UpdatedAt | ThemeSortKey::CreatedAt => SortDirection::Desc,
            ThemeSortKey::Title | ThemeSortKey::Priority => SortDirection::Asc,
        }
    }
}

/// `priority=all` (or absent) disables the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityFilter {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl PriorityFilter {
    fn admits(&self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Low => priority == Priority::Low,
            PriorityFilter::Medium => priority == Priority::Medium,
            PriorityFilter::High => priority == Priority::High,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeListQuery {
    pub search: Option<String>,
    #[serde(default)]
    pub priority: PriorityFilter,
    #[serde(default)]
    pub sort: ThemeSortKey,
    pub direction: Option<SortDirection>,
    pub toggle: Option<ThemeSortKey>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ThemeListQuery {
    pub fn sort_state(&self) -> SortState<ThemeSortKey> {
        let direction = self
            .direction
            .unwrap_or_else(|| self.sort.default_direction());
        SortState::resolve(self.sort, direction, self.toggle)
    }
}

/// Filters by search term (title, description, keywords) and priority, then
/// sorts. Priority sorts by rank, so ascending is low → high.
pub fn filter_and_sort_themes(mut themes: Vec<Theme>, query: &ThemeListQuery) -> Vec<Theme> {
    themes.retain(|t| {
        query.priority.admits(t.priority)
            && matches_search(
                query.search.as_deref(),
                [t.title.as_str(), t.description.as_str()]
                    .into_iter()
                    .chain(t.keywords.iter().map(String::as_str)),
            )
    });

    let SortState { sort, direction } = query.sort_state();
    themes.sort_by(|a, b| {
        let ordering = match sort {
            ThemeSortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            ThemeSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            ThemeSortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            ThemeSortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
        };
        direction.apply(ordering)
    });
    themes
}
