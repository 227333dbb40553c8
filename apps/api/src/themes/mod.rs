//! Pitch themes: CRUD, list filtering and reporter affinity ranking.

pub mod affinity;
pub mod handlers;
pub mod listing;
