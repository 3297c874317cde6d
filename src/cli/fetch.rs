//! Fetch subcommand - download a city's listings

use std::path::Path;

use anyhow::Result;
use console::style;
use tracing::info;

use super::default_fetch_output;
use crate::pipeline::scraper::prettify;
use crate::pipeline::{estimated_size_mb, find_city_listings_url, save_table, ListingsScraper};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_info, print_success,
    print_warning,
};

/// Look up `city` on the directory page and save its listings to `output`
pub fn run_fetch(
    city: &str,
    url: &str,
    output: Option<&Path>,
    print_html: bool,
    infer_schema_length: usize,
) -> Result<()> {
    let scraper = ListingsScraper::new(url)?;

    let spinner = create_spinner(&format!("Requesting {}...", scraper.url()));
    let page = scraper.request()?;
    finish_with_success(&spinner, "Directory page retrieved");
    print_info(&page.status_line());

    if print_html {
        println!("{}", prettify(&page.html));
        return Ok(());
    }

    let Some(listings_url) = find_city_listings_url(&page.html, city)? else {
        print_warning(&format!("`{}` not found amongst existing cities.", city));
        return Ok(());
    };
    print_info(&format!("Listings for {}: {}", city, style(&listings_url).dim()));

    let spinner = create_spinner("Downloading listings...");
    let mut df = match scraper.download_table(&listings_url, infer_schema_length) {
        Ok(df) => {
            finish_with_success(&spinner, "Listings downloaded");
            df
        }
        Err(e) => {
            finish_with_warning(&spinner, "Download failed");
            return Err(e);
        }
    };

    let (rows, cols) = df.shape();
    info!(rows, cols, size_mb = estimated_size_mb(&df), "listings loaded");

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_fetch_output(city));
    save_table(&mut df, &output_path)?;

    print_success(&format!(
        "Saved {} rows x {} columns to {}",
        rows,
        cols,
        output_path.display()
    ));
    Ok(())
}
