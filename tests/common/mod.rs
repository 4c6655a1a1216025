#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use tempfile::TempDir;
use vgscrape::config::Config;
use vgscrape::request::PageSource;
use vgscrape::Result;

const HEADINGS: [&str; 16] = [
    "Pos",
    "Game",
    "Console",
    "Publisher",
    "Developer",
    "VGChartz Score",
    "Critic Score",
    "User Score",
    "Total Shipped",
    "Total Sales",
    "NA Sales",
    "PAL Sales",
    "Japan Sales",
    "Other Sales",
    "Release Date",
    "Last Update",
];

/// A listing page shaped like the site's: two decoration rows, the header, a spacer, then data.
pub fn listing_page(ranks: std::ops::RangeInclusive<usize>) -> String {
    let header = HEADINGS
        .iter()
        .map(|h| match *h {
            "Game" => r#"<th colspan="2" width="200">Game</th>"#.to_string(),
            other => format!("<th>\n  {other}\n</th>"),
        })
        .collect::<String>();
    let rows = ranks
        .map(|rank| {
            format!(
                r#"<tr>
                <td>{rank}</td>
                <td><a href="/games/game.php?id={rank}"><img src="/games/boxart/{rank}.jpg" alt="Boxart Missing"></a></td>
                <td style="font-size:12pt;"><a href="/games/game.php?id={rank}">Title {rank}</a></td>
                <td><img src="/images/consoles/PS2_b.png" alt="PS2"></td>
                <td>Publisher {rank}</td>
                <td>Developer {rank}</td>
                <td>N/A</td>
                <td>9.{rank}</td>
                <td>N/A</td>
                <td>N/A</td>
                <td>{rank}.00m</td>
                <td>0.{rank}m</td>
                <td>0.10m</td>
                <td>0.05m</td>
                <td>0.01m</td>
                <td>26th Oct 04</td>
                <td>28th Jan 18</td>
                </tr>"#
            )
        })
        .collect::<String>();

    format!(
        r#"<!DOCTYPE html><html><head><title>Games</title></head><body>
        <div id="generalBody">
        <table width="100%">
        <tr><th colspan="17">Results: 64,000</th></tr>
        <tr><td colspan="17"><a href="?page=2">Next</a></td></tr>
        <tr>{header}</tr>
        <tr><td colspan="17">&nbsp;</td></tr>
        {rows}
        </table>
        </div></body></html>"#
    )
}

/// Serves canned listing pages and remembers which pages were asked for.
pub struct FakeSite {
    page_size: usize,
    /// Pages at or above this number come back with no data rows.
    catalog_pages: usize,
    overrides: HashMap<usize, String>,
    requested: Mutex<Vec<usize>>,
}

impl FakeSite {
    pub fn new(page_size: usize, catalog_pages: usize) -> Self {
        Self {
            page_size,
            catalog_pages,
            overrides: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(mut self, page_num: usize, html: String) -> Self {
        self.overrides.insert(page_num, html);
        self
    }

    pub fn requested(&self) -> Vec<usize> {
        self.requested.lock().unwrap().clone()
    }
}

impl PageSource for FakeSite {
    async fn fetch_page(&self, page_num: usize) -> Result<String> {
        self.requested.lock().unwrap().push(page_num);
        if let Some(html) = self.overrides.get(&page_num) {
            return Ok(html.clone());
        }
        if page_num > self.catalog_pages {
            return Ok(listing_page(1..=0));
        }
        let first = (page_num - 1) * self.page_size + 1;
        Ok(listing_page(first..=first + self.page_size - 1))
    }
}

pub fn test_config(dir: &TempDir, page_size: usize, page_limit: usize) -> Config {
    Config {
        page_size,
        page_limit,
        output: dir.path().join("data").join("vgchartz_games_webscrape.csv"),
        ..Default::default()
    }
}
