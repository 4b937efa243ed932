//! Normalizes scraped Niche college pages into flat records plus ranking catalogs,
//! and hosts the small share-document API used by the ranking frontend.

pub mod catalog;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod parser;
pub mod record;
pub mod shares;

pub use error::{ExtractError, Result};
pub use parser::parse_dataset;
pub use record::{InstitutionRecord, OutputDocument};
