use chrono::Local;

use crate::config::Config;
use crate::parse::parse_page;
use crate::record::GameRecord;
use crate::request::{HttpFetcher, PageSource};
use crate::store::{check_previous, write_records};
use crate::{debug_time, info_time, warn_time, Result};

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Pages already stored when the run started.
    pub resume_page: usize,
    /// Pages requested in this run, in order.
    pub pages: Vec<usize>,
    pub records_written: usize,
}

pub async fn process_site(config: &Config) -> Result<RunSummary> {
    let fetcher = HttpFetcher::new(config.base_url.clone())?;
    run(&fetcher, config).await
}

/// Resumes after the stored pages, scrapes up to `page_limit` more (never past `max_pages`)
/// and writes everything collected in one go at the end.
/// A page without records also ends the run: the catalog is exhausted.
pub async fn run<S: PageSource>(source: &S, config: &Config) -> Result<RunSummary> {
    let start_time = Local::now();
    debug_time!(
        config.debug,
        "Beginning to scrape game data from VGChartz. Will scrape {} pages...",
        config.page_limit
    );
    if let Some(platform) = &config.platform {
        debug_time!(
            config.debug,
            "Platform '{}' requested; platform filtering is not applied",
            platform
        );
    }

    let resume = check_previous(config)?;
    let resume_page = resume.resume_page(config.page_size);

    let (records, pages) = collect_pages(source, config, resume_page).await?;
    debug_time!(
        config.debug,
        start_time,
        "Scraped {} records from {} pages.",
        records.len(),
        pages.len()
    );

    debug_time!(
        config.debug,
        "Writing scraped game data to '{}'...",
        config.output.display()
    );
    write_records(config, &records, resume.write_mode())?;
    debug_time!(config.debug, "Webscraping complete!");

    Ok(RunSummary {
        resume_page,
        pages,
        records_written: records.len(),
    })
}

/// Fetches and maps pages one after another, starting after `resume_page`.
/// Stops at the run limit, at the end of the catalog or at the first page without records.
async fn collect_pages<S: PageSource>(
    source: &S,
    config: &Config,
    resume_page: usize,
) -> Result<(Vec<GameRecord>, Vec<usize>)> {
    let mut records = Vec::new();
    let mut pages = Vec::new();
    let mut page_counter = resume_page;

    loop {
        if page_counter >= resume_page + config.page_limit {
            break;
        }
        // TODO: confirm whether the catalog bound or the run limit should win when both apply.
        if page_counter >= config.max_pages {
            debug_time!(config.debug, "Reached the last catalog page ({})", config.max_pages);
            break;
        }
        page_counter += 1;

        let page_time = Local::now();
        debug_time!(config.debug, "Scraping game data from page {}...", page_counter);
        let html = source.fetch_page(page_counter).await?;
        pages.push(page_counter);

        let page_records = parse_page(html, config).await?;
        if page_records.is_empty() {
            info_time!("found EMPTY page {}, stopping", page_counter);
            break;
        }
        if page_records.len() < config.page_size {
            warn_time!(
                "Page {} has {} records instead of {}; the next run may resume inside it",
                page_counter,
                page_records.len(),
                config.page_size
            );
        }
        if config.debug {
            info_time!(
                page_time,
                "{} games have been scraped from page {}",
                page_records.len(),
                page_counter
            );
        }
        records.extend(page_records);
    }

    Ok((records, pages))
}
