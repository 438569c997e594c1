use crate::Result;
use crate::model::CategoryLink;
use std::io::Read;
use std::path::Path;

pub struct CategoryReader;

impl CategoryReader {
    /// Read category links from a CSV file with `Link`, `Subcategory` and `Category` columns
    pub fn from_file(path: &Path) -> Result<Vec<CategoryLink>> {
        tracing::debug!("Reading category links from: {}", path.display());

        let reader = csv::Reader::from_path(path)?;
        let links = Self::collect(reader)?;

        tracing::info!(
            "Loaded {} category links from {}",
            links.len(),
            path.display()
        );

        Ok(links)
    }

    /// Parse category links from CSV text
    pub fn from_str(content: &str) -> Result<Vec<CategoryLink>> {
        Self::collect(csv::Reader::from_reader(content.as_bytes()))
    }

    fn collect<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<CategoryLink>> {
        let mut links = Vec::new();
        for record in reader.deserialize() {
            let link: CategoryLink = record?;
            links.push(link);
        }
        Ok(links)
    }
}
