//! Events, their participants and the exposure each participation produced.

pub mod handlers;
pub mod listing;
