use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::Catalog;

/// Position of an institution within one ranking list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub ordinal: u64,
    pub total: u64,
}

/// A ranking list itself: its size and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub total: u64,
    pub name: String,
}

pub type RankingMap = BTreeMap<String, RankingEntry>;

/// One flat row per institution. Statistics the pipeline does not interpret are
/// kept as the scraped JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstitutionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub name: String,
    pub slug: String,
    pub description: Option<Value>,
    pub website: Option<Value>,
    pub acceptance_rate: Option<Value>,
    pub sat_range: Option<Vec<i64>>,
    pub act_range: Option<Vec<f64>>,
    pub test_requirement: Option<u8>,
    pub application_website: Option<Value>,
    pub net_price: Option<Value>,
    pub student_faculty_ratio: Option<Value>,
    pub full_time_undergrads: Option<Value>,
    pub part_time_undergrads: Option<Value>,
    pub undergrads_over_25: Option<Value>,
    pub freshman_housing: Option<Value>,
    pub earnings_after_graduation: Option<Value>,
    pub graduation_rate: Option<Value>,
    pub employed_after_graduation: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_rankings: Option<RankingMap>,
    pub rankings: RankingMap,
    pub early_decision: Option<Value>,
    pub early_action: Option<Value>,
    pub research_funding_per_student: Option<Value>,
    pub avg_class_size: Option<f64>,
    pub professor_salary: Option<Value>,
}

impl InstitutionRecord {
    pub fn new(name: &str, slug: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: slug.to_string(),
            ..Default::default()
        }
    }
}

/// What gets written to the output file.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OutputDocument {
    Full {
        schools: Vec<InstitutionRecord>,
        majors: Vec<String>,
        rankings: Catalog,
        major_rankings: Catalog,
    },
    Reduced(Vec<InstitutionRecord>),
}

impl OutputDocument {
    pub fn schools(&self) -> &[InstitutionRecord] {
        match self {
            OutputDocument::Full { schools, .. } => schools,
            OutputDocument::Reduced(schools) => schools,
        }
    }
}
