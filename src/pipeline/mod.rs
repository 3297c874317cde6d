//! Pipeline module - loading, profiling and association testing

pub mod association;
pub mod columns;
pub mod describe;
pub mod loader;
pub mod profile;
pub mod scraper;
pub mod stats;
pub mod target;

pub use association::*;
pub use columns::*;
pub use describe::*;
pub use loader::*;
pub use profile::*;
pub use scraper::{find_city_listings_url, DirectoryPage, ListingsScraper, DEFAULT_DIRECTORY_URL};
pub use stats::{SkipReason, TestStatistic};
pub use target::*;
