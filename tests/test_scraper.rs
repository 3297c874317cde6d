//! Tests for locating a city's listings link in the directory page

use misty::pipeline::scraper::{prettify, title_case};
use misty::pipeline::{find_city_listings_url, ListingsScraper, DEFAULT_DIRECTORY_URL};

const DIRECTORY_PAGE: &str = r#"
<html>
  <body>
    <h3>Paris, Île-de-France, France</h3>
    <table>
      <tbody>
        <tr>
          <td>Paris, Île-de-France, France</td>
          <td><a href="https://data.insideairbnb.com/france/ile-de-france/paris/2024-09-06/data/listings.csv.gz">listings.csv.gz</a></td>
          <td>Detailed Listings data</td>
        </tr>
        <tr>
          <td>Paris, Île-de-France, France</td>
          <td><a href="https://data.insideairbnb.com/france/ile-de-france/paris/2024-09-06/data/calendar.csv.gz">calendar.csv.gz</a></td>
        </tr>
      </tbody>
    </table>
    <table>
      <tbody>
        <tr>
          <td>New York City, New York, United States</td>
          <td><a href="https://data.insideairbnb.com/united-states/ny/new-york-city/2024-09-04/data/listings.csv.gz">listings.csv.gz</a></td>
        </tr>
      </tbody>
    </table>
    <table>
      <tbody>
        <tr>
          <td>Lyon, Auvergne-Rhône-Alpes, France</td>
          <td>archived</td>
        </tr>
      </tbody>
    </table>
  </body>
</html>
"#;

#[test]
fn test_finds_first_link_of_city_row() {
    let url = find_city_listings_url(DIRECTORY_PAGE, "Paris").unwrap();
    assert_eq!(
        url.as_deref(),
        Some("https://data.insideairbnb.com/france/ile-de-france/paris/2024-09-06/data/listings.csv.gz")
    );
}

#[test]
fn test_city_matched_in_title_case() {
    let url = find_city_listings_url(DIRECTORY_PAGE, "new york city").unwrap();
    assert!(url.unwrap().contains("new-york-city"));
}

#[test]
fn test_unknown_city_not_found() {
    let url = find_city_listings_url(DIRECTORY_PAGE, "Atlantis").unwrap();
    assert!(url.is_none());
}

#[test]
fn test_city_row_without_link() {
    let url = find_city_listings_url(DIRECTORY_PAGE, "lyon").unwrap();
    assert!(url.is_none());
}

#[test]
fn test_page_without_tables() {
    let url = find_city_listings_url("<html><body><p>maintenance</p></body></html>", "Paris").unwrap();
    assert!(url.is_none());
}

#[test]
fn test_prettify_keeps_links() {
    let html = prettify(DIRECTORY_PAGE);
    assert!(html.contains("<tbody>"));
    assert!(html.contains("listings.csv.gz"));
}

#[test]
fn test_title_case_matches_page_labels() {
    assert_eq!(title_case("buenos aires"), "Buenos Aires");
}

#[test]
fn test_scraper_keeps_url() {
    let scraper = ListingsScraper::new(DEFAULT_DIRECTORY_URL).unwrap();
    assert_eq!(scraper.url(), DEFAULT_DIRECTORY_URL);
}
