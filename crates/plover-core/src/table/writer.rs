use crate::Result;
use crate::model::{Batch, CategoryLink};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct CategoryWriter;

impl CategoryWriter {
    /// Write category links to a CSV file, replacing any existing file
    pub fn to_file(links: &[CategoryLink], path: &Path) -> Result<()> {
        tracing::debug!("Writing category links to: {}", path.display());

        let writer = csv::Writer::from_path(path)?;
        write_records(writer, links, &["Link", "Subcategory", "Category"])?;

        tracing::info!(
            "Wrote {} category links to {}",
            links.len(),
            path.display()
        );

        Ok(())
    }
}

/// Writes each batch of leads to its own numbered CSV file
#[derive(Debug, Clone)]
pub struct ChunkWriter {
    dir: PathBuf,
    prefix: String,
}

impl ChunkWriter {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Path the batch with the given sequence number is written to
    pub fn path_for(&self, sequence: usize) -> PathBuf {
        self.dir.join(format!("{}_{}.csv", self.prefix, sequence))
    }

    /// Write a batch and return the path of the new file
    pub fn write(&self, batch: &Batch) -> Result<PathBuf> {
        let path = self.path_for(batch.sequence);

        let writer = csv::Writer::from_path(&path)?;
        write_records(writer, &batch.leads, LEAD_HEADERS)?;

        tracing::info!(
            "Saved chunk {} with {} records to {}",
            batch.sequence,
            batch.len(),
            path.display()
        );

        Ok(path)
    }
}

const LEAD_HEADERS: &[&str] = &[
    "Name",
    "Email",
    "Company",
    "Location",
    "Phone",
    "Website",
    "Subcategory",
    "Category",
];

// serde only emits the header row alongside the first record, so it is
// written by hand to keep empty files readable
fn write_records<W: Write, T: Serialize>(
    mut writer: csv::Writer<W>,
    records: &[T],
    headers: &[&str],
) -> Result<()> {
    if records.is_empty() {
        writer.write_record(headers)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
