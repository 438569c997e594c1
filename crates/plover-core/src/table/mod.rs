mod reader;
mod writer;

pub use reader::CategoryReader;
pub use writer::{CategoryWriter, ChunkWriter};

/// Default file the collector writes and the scraper reads
pub const DEFAULT_CATEGORIES_FILE: &str = "trustpilot_categories.csv";

/// Default file name prefix for lead chunks
pub const DEFAULT_CHUNK_PREFIX: &str = "trustpilot_leads_chunk";
