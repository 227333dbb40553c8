//! Reporter records plus their articles, contact log and theme matches.

pub mod handlers;
pub mod listing;
