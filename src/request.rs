use std::future::Future;

use reqwest::Client;

use crate::{Result, USER_AGENT};

const LISTING_ENDPOINT: &str = "https://www.vgchartz.com/games/games.php";

/// Builds the listing query with every optional column switched on.
/// The site expects each `show*` switch twice: `=0` then `=1`.
pub fn listing_url(page_size: usize) -> String {
    let columns = [
        "totalsales",
        "publisher",
        "vgchartzscore",
        "nasales",
        "developer",
        "criticscore",
        "palsales",
        "releasedate",
        "userscore",
        "japansales",
        "lastupdate",
        "othersales",
        "shipped",
    ]
    .iter()
    .map(|col| format!("&show{col}=0&show{col}=1"))
    .collect::<String>();

    format!(
        "{LISTING_ENDPOINT}?name=&keyword=&console=&region=All&developer=&publisher=&goty_year=\
         &genre=&boxart=Both&banner=Both&ownership=Both&showmultiplat=No&results={page_size}\
         &order=Sales{columns}"
    )
}

/// Appends the 1-based page parameter to a listing query.
pub fn page_url(base_url: &str, page_num: usize) -> String {
    format!("{base_url}&page={page_num}")
}

/// Anything that can hand out the markup of one listing page.
pub trait PageSource {
    fn fetch_page(&self, page_num: usize) -> impl Future<Output = Result<String>>;
}

/// Fetches listing pages over HTTP. One request per page, errors are returned as is.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Uses a preconfigured client (proxy, TLS or header settings).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl PageSource for HttpFetcher {
    /// Requests a page and returns a `Result<String>` containing the HTML.
    async fn fetch_page(&self, page_num: usize) -> Result<String> {
        let res = self
            .client
            .get(page_url(&self.base_url, page_num))
            .send()
            .await?
            .error_for_status()?;
        let html = res.text().await?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_url_requests_page_size_and_all_columns() {
        let url = listing_url(200);

        assert!(url.starts_with("https://www.vgchartz.com/games/games.php?name=&keyword="));
        assert!(url.contains("&results=200&order=Sales"));
        assert!(url.contains("&showtotalsales=0&showtotalsales=1"));
        assert!(url.ends_with("&showshipped=0&showshipped=1"));
        assert_eq!(url.matches("=1").count(), 13);
    }

    #[test]
    fn page_url_appends_page_number() {
        assert_eq!(page_url("http://host/games.php?x=1", 7), "http://host/games.php?x=1&page=7");
    }
}
