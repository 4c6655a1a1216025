use std::path::PathBuf;

use clap::Parser;

use crate::request::listing_url;
use crate::{HEADER_ROWS, MAX_TOTAL_PAGES, OUTPUT_PATH, PAGE_SIZE};

/// Scrape the VGChartz games table into a CSV file, resuming where the last run stopped.
#[derive(Debug, Parser)]
#[command(name = "vgscrape", version, about)]
pub struct Cli {
    /// Print progress while scraping
    #[arg(long)]
    pub debug: bool,

    /// Platform to scrape (accepted, not applied as a filter yet)
    #[arg(long)]
    pub platform: Option<String>,

    /// Number of pages to scrape in this run
    #[arg(long = "page_limit", value_name = "PAGES")]
    pub page_limit: Option<usize>,

    /// Output CSV file
    #[arg(long, default_value = OUTPUT_PATH)]
    pub output: PathBuf,

    /// Map cells by their fixed position instead of validating the header labels
    #[arg(long = "no_header_check")]
    pub no_header_check: bool,
}

impl Cli {
    pub fn into_config(self) -> Config {
        let defaults = Config::default();
        Config {
            debug: self.debug,
            platform: self.platform,
            page_limit: self.page_limit.unwrap_or(defaults.page_limit),
            check_header: !self.no_header_check,
            output: self.output,
            ..defaults
        }
    }
}

/// Everything one run needs. Built once and passed to each stage.
#[derive(Debug, Clone)]
pub struct Config {
    pub debug: bool,
    pub platform: Option<String>,
    /// Pages to fetch in this run, counted from the resume page.
    pub page_limit: usize,
    /// Absolute last page of the catalog.
    pub max_pages: usize,
    pub page_size: usize,
    pub header_rows: usize,
    pub check_header: bool,
    pub output: PathBuf,
    /// Listing query without the page parameter.
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            platform: None,
            page_limit: MAX_TOTAL_PAGES,
            max_pages: MAX_TOTAL_PAGES,
            page_size: PAGE_SIZE,
            header_rows: HEADER_ROWS,
            check_header: true,
            output: PathBuf::from(OUTPUT_PATH),
            base_url: listing_url(PAGE_SIZE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let config = Cli::parse_from(["vgscrape"]).into_config();

        assert!(!config.debug);
        assert!(config.check_header);
        assert_eq!(config.platform, None);
        assert_eq!(config.page_limit, MAX_TOTAL_PAGES);
        assert_eq!(config.output, PathBuf::from(OUTPUT_PATH));
    }

    #[test]
    fn long_flags_are_applied() {
        let config = Cli::parse_from([
            "vgscrape",
            "--debug",
            "--platform",
            "PS4",
            "--page_limit",
            "3",
            "--output",
            "out/games.csv",
            "--no_header_check",
        ])
        .into_config();

        assert!(config.debug);
        assert!(!config.check_header);
        assert_eq!(config.platform.as_deref(), Some("PS4"));
        assert_eq!(config.page_limit, 3);
        assert_eq!(config.max_pages, MAX_TOTAL_PAGES);
        assert_eq!(config.output, PathBuf::from("out/games.csv"));
    }

    #[test]
    fn short_flags_are_rejected() {
        assert!(Cli::try_parse_from(["vgscrape", "-d"]).is_err());
    }
}
