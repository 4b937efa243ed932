use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ExtractError, Result};
use crate::parser::tree::Node;

/// One page of the search listing the scraper walked.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    pub entities: Vec<SearchEntity>,
}

/// Entities are kept loose; only the one a slug resolves to is validated.
#[derive(Debug, Deserialize)]
pub struct SearchEntity {
    #[serde(default)]
    pub content: Option<SearchContent>,
}

#[derive(Debug, Deserialize)]
pub struct SearchContent {
    #[serde(default)]
    pub entity: Value,
    #[serde(default)]
    pub centroid: Value,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub lat: f64,
    pub lon: f64,
}

/// Slug → raw centroid, built once per run. The first entity listed for a slug wins;
/// entities without a string `url` are never matched.
pub struct GeoIndex<'a> {
    by_slug: HashMap<&'a str, &'a Value>,
}

impl<'a> GeoIndex<'a> {
    pub fn build(pages: &'a [SearchPage]) -> Self {
        let mut by_slug = HashMap::new();
        let contents = pages
            .iter()
            .flat_map(|p| &p.entities)
            .filter_map(|e| e.content.as_ref());
        for content in contents {
            let Some(url) = content.entity.get("url").and_then(Value::as_str) else {
                continue;
            };
            by_slug.entry(url).or_insert(&content.centroid);
        }
        Self { by_slug }
    }

    pub fn len(&self) -> usize {
        self.by_slug.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slug.is_empty()
    }

    pub fn resolve(&self, slug: &str) -> Result<Centroid> {
        let centroid = self
            .by_slug
            .get(slug)
            .ok_or_else(|| ExtractError::LookupNotFound {
                slug: slug.to_string(),
            })?;
        let path = format!("pages[url={slug}].content.centroid");
        if centroid.is_null() {
            return Err(ExtractError::MissingKey { path });
        }
        let node = Node::root(centroid, path);
        Ok(Centroid {
            lat: node.key("lat")?.as_f64()?,
            lon: node.key("lon")?.as_f64()?,
        })
    }
}
