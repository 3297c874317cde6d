//! Inside Airbnb scraper
//!
//! Finds the `listings.csv.gz` link for a city on the "get the data" page and
//! downloads it into a DataFrame.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use polars::prelude::*;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use super::loader::read_csv_bytes;

/// Directory page listing the per-city datasets
pub const DEFAULT_DIRECTORY_URL: &str = "https://insideairbnb.com/fr/get-the-data/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Human-readable message for the status codes the directory page is known to return
pub fn status_message(code: u16) -> Option<&'static str> {
    match code {
        200 => Some("Successfully requested!"),
        404 => Some("Not found."),
        403 => Some("Forbidden access!"),
        401 => Some("Unauthorized access!"),
        300 => Some("Multiple choices."),
        _ => None,
    }
}

/// Directory page as returned by [`ListingsScraper::request`]
#[derive(Debug, Clone)]
pub struct DirectoryPage {
    pub status: u16,
    pub html: String,
}

impl DirectoryPage {
    /// Message for the response status, e.g. "Successfully requested!"
    pub fn status_line(&self) -> String {
        match status_message(self.status) {
            Some(message) => format!("{} {}", self.status, message),
            None => format!("{} (unexpected status)", self.status),
        }
    }
}

/// Blocking client for the listings directory page
#[derive(Debug, Clone)]
pub struct ListingsScraper {
    url: String,
    client: Client,
}

impl ListingsScraper {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("misty/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the directory page; non-success statuses are errors
    pub fn request(&self) -> Result<DirectoryPage> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .with_context(|| format!("Failed to request {}", self.url))?;

        let status = response.status();
        match status_message(status.as_u16()) {
            Some(message) if status.is_success() => {
                info!(status = status.as_u16(), "{}", message)
            }
            Some(message) => warn!(status = status.as_u16(), "{}", message),
            None => warn!(status = status.as_u16(), "unexpected status"),
        }

        if !status.is_success() {
            anyhow::bail!(
                "Request to {} failed with status: {} {}",
                self.url,
                status,
                status_message(status.as_u16()).unwrap_or("")
            );
        }

        let html = response
            .text()
            .with_context(|| format!("Failed to read response body from {}", self.url))?;

        Ok(DirectoryPage {
            status: status.as_u16(),
            html,
        })
    }

    /// Download a listings file (plain or gzipped CSV) into a DataFrame
    pub fn download_table(&self, url: &str, infer_schema_length: usize) -> Result<DataFrame> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to download from {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Download failed with status: {}",
                response.status()
            ));
        }

        let bytes = response
            .bytes()
            .with_context(|| format!("Failed to read download body from {}", url))?;
        debug!(url, bytes = bytes.len(), "listings downloaded");

        read_csv_bytes(bytes.to_vec(), infer_schema_length)
            .with_context(|| format!("Failed to load listings from {}", url))
    }
}

/// Find the listings link for `city` in the directory page HTML.
///
/// Each city is a `<tbody>`; the first cell of its first row names the city
/// and the first link of that row points at `listings.csv.gz`. The city is
/// matched in title case, so `"paris"` finds `"Paris"`.
pub fn find_city_listings_url(html: &str, city: &str) -> Result<Option<String>> {
    let tbody = selector("tbody")?;
    let tr = selector("tr")?;
    let td = selector("td")?;
    let a = selector("a")?;

    let needle = title_case(city);
    let document = Html::parse_document(html);

    for body in document.select(&tbody) {
        let Some(row) = body.select(&tr).next() else {
            continue;
        };
        let label = row
            .select(&td)
            .next()
            .and_then(|cell| cell.text().next())
            .unwrap_or("");

        if label.contains(&needle) {
            let href = row
                .select(&a)
                .next()
                .and_then(|link| link.value().attr("href"))
                .map(str::to_string);
            debug!(city = %needle, href = ?href, "city row found");
            return Ok(href);
        }
    }

    Ok(None)
}

/// Re-serialize the parsed page, for inspecting what the parser saw
pub fn prettify(html: &str) -> String {
    Html::parse_document(html).html()
}

/// Uppercase the first letter of every alphabetic run and lowercase the rest
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid CSS selector '{}': {:?}", css, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("paris"), "Paris");
        assert_eq!(title_case("NEW YORK city"), "New York City");
        assert_eq!(title_case("rio de janeiro"), "Rio De Janeiro");
        assert_eq!(title_case("saint-malo"), "Saint-Malo");
    }

    #[test]
    fn test_directory_page_status_line() {
        let page = DirectoryPage {
            status: 200,
            html: String::new(),
        };
        assert_eq!(page.status_line(), "200 Successfully requested!");

        let page = DirectoryPage {
            status: 204,
            html: String::new(),
        };
        assert_eq!(page.status_line(), "204 (unexpected status)");
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(status_message(200), Some("Successfully requested!"));
        assert_eq!(status_message(403), Some("Forbidden access!"));
        assert_eq!(status_message(500), None);
    }
}
