pub mod card;
pub mod collector;
pub mod links;
pub mod scraper;
pub mod selectors;

pub use card::CardExtractor;
pub use collector::{CategoryCollector, DEFAULT_START_URL};
pub use scraper::{LeadScraper, ScrapeOptions, ScrapeState, ScrapeSummary};
pub use selectors::Selectors;
