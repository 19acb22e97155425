//! A small Rust client for the NIH RePORTER `projects/search` API.
//!
//! This crate implements a one-shot search flow:
//! build a filtered request, POST it once, then print and export the results.
//!
//! Project records come back with either PascalCase or snake_case keys depending on
//! the endpoint and field; [`flatten_project`] reconciles both into a fixed
//! 11-column [`FlatRow`].
//!
//! ## Quick start
//! - Optionally point the client at another endpoint via `NIH_REPORTER_URL` or a
//!   `.reporterrc` file (current directory or home directory).
//! - Build a request with [`build_payload`] and call [`Client::search`].
//!
//! ```no_run
//! use anyhow::Result;
//! use nih_reporter::{Client, SearchFilters, build_payload, flatten_project};
//!
//! fn main() -> Result<()> {
//!     let client = Client::from_env()?;
//!     let filters = SearchFilters {
//!         fiscal_years: vec![2025],
//!         pi_names: vec!["Smith".to_string()],
//!         ..SearchFilters::default()
//!     };
//!     let response = client.search(&build_payload(&filters, 0, 5, None))?;
//!     for project in response.results() {
//!         let row = flatten_project(project);
//!         println!("{} {}", row.appl_id, row.project_title);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

pub mod cli;
mod client;
mod config;
mod error;
mod flatten;
mod payload;
mod report;
mod resolve;
mod response;
mod util;

pub use client::{API_URL, Client, ClientConfig};
pub use flatten::{FlatRow, first_pi_name, flatten_project};
pub use payload::{
    Criteria, DEFAULT_INCLUDE_FIELDS, PiName, SearchFilters, SearchRequest, build_payload,
};
pub use report::{print_projects, print_summary, write_csv, write_json};
pub use resolve::{get_value, get_value_or, normalize_key, safe_get};
pub use response::SearchResponse;
