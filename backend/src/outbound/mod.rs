//! Driven adapters: PostgreSQL persistence, headless browser rendering, and
//! the job API client used by the scraper.

pub mod browser;
pub mod job_api;
pub mod persistence;
