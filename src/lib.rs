//! Incremental scraper for the VGChartz games table.
//! Each run resumes from the page after the last one already stored in the output CSV.

mod macros;

pub mod config;
mod error;
pub mod parse;
pub mod process;
pub mod record;
pub mod request;
pub mod store;

pub use error::{Error, Result};

/// Rows per page requested from the site.
pub const PAGE_SIZE: usize = 200;
/// Known size of the catalog in pages.
pub const MAX_TOTAL_PAGES: usize = 315;
/// Leading rows of the listing table that never hold data.
pub const HEADER_ROWS: usize = 4;
const OUTPUT_PATH: &str = "data/vgchartz_games_webscrape.csv";
const USER_AGENT: &str = concat!("vgscrape/", env!("CARGO_PKG_VERSION"));
