use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::geo::SearchPage;
use crate::parser::tree::RawSchool;

/// Scraper export. `pages` is only present in the richer export.
#[derive(Debug, Deserialize)]
pub struct RawDataset {
    pub schools: Vec<RawSchool>,
    #[serde(default)]
    pub pages: Option<Vec<SearchPage>>,
}

pub fn load(path: &Path) -> Result<RawDataset> {
    info!("loading data from {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    let dataset: RawDataset = serde_json::from_reader(reader)?;
    info!(
        schools = dataset.schools.len(),
        search_pages = dataset.pages.as_ref().map_or(0, Vec::len),
        "loaded input"
    );
    Ok(dataset)
}

/// Pretty JSON with 4-space indentation.
pub fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

pub fn write<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    info!("writing data to {}", path.display());
    let bytes = to_json(value)?;
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(&bytes)?;
    out.flush()?;
    Ok(())
}
