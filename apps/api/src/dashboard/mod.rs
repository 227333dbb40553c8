//! Summary figures for the landing page.

pub mod handlers;
pub mod stats;
