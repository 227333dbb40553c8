//! LLM-backed outreach helpers exposed under `/api/v1/outreach`.

pub mod handlers;
pub mod prompts;
pub mod service;
