use std::collections::{BTreeMap, BTreeSet};

use crate::record::CatalogEntry;

/// Ranking identifier → catalog entry.
pub type Catalog = BTreeMap<String, CatalogEntry>;

pub const OVERALL_KEY: &str = "best-colleges";
pub const OVERALL_NAME: &str = "Best Colleges";

/// Ranking lists seen across a run. One is built per institution and folded
/// into the run-wide value with [`GlobalCatalogs::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalCatalogs {
    pub rankings: Catalog,
    pub major_rankings: Catalog,
    pub majors: BTreeSet<String>,
}

impl GlobalCatalogs {
    /// Run-wide starting value: the overall list sized to the institution count.
    pub fn seeded(total: u64) -> Self {
        let mut catalogs = Self::default();
        catalogs.rankings.insert(
            OVERALL_KEY.to_string(),
            CatalogEntry {
                total,
                name: OVERALL_NAME.to_string(),
            },
        );
        catalogs
    }

    pub fn record_general(&mut self, key: &str, total: u64, name: &str) {
        self.rankings.insert(
            key.to_string(),
            CatalogEntry {
                total,
                name: name.to_string(),
            },
        );
    }

    pub fn record_major(&mut self, key: &str, total: u64, name: &str) {
        self.major_rankings.insert(
            key.to_string(),
            CatalogEntry {
                total,
                name: name.to_string(),
            },
        );
        self.majors.insert(name.to_string());
    }

    /// Last write wins per identifier.
    pub fn merge(&mut self, other: GlobalCatalogs) {
        self.rankings.extend(other.rankings);
        self.major_rankings.extend(other.major_rankings);
        self.majors.extend(other.majors);
    }

    pub fn sorted_majors(&self) -> Vec<String> {
        self.majors.iter().cloned().collect()
    }
}
