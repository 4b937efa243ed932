use serde::Deserialize;
use serde_json::Value;

use crate::error::{ExtractError, Result};

/// One institution as exported by the scraper.
#[derive(Debug, Deserialize)]
pub struct RawSchool {
    pub entity_data: EntityData,
    /// Main page blocks.
    pub blocks: Vec<RawBlock>,
    pub rankings: RawPage,
    pub admissions: RawPage,
    pub academics: RawPage,
}

#[derive(Debug, Deserialize)]
pub struct EntityData {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct RawPage {
    pub blocks: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
pub struct RawBlock {
    pub config: Option<BlockConfig>,
    #[serde(default)]
    pub buckets: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct BlockConfig {
    #[serde(default)]
    pub anchor: Value,
}

impl RawBlock {
    fn buckets(&self) -> Result<Node<'_>> {
        self.buckets
            .as_ref()
            .map(|v| Node::root(v, "buckets"))
            .ok_or_else(|| ExtractError::MissingKey {
                path: "buckets".into(),
            })
    }

    /// `buckets.<n>.contents`
    pub fn contents(&self, bucket: &str) -> Result<Node<'_>> {
        self.buckets()?.key(bucket)?.key("contents")
    }

    /// `buckets.<n>.contents[<idx>]`
    pub fn item(&self, bucket: &str, idx: usize) -> Result<Node<'_>> {
        self.contents(bucket)?.index(idx)
    }

    /// `buckets.<n>.contents[<idx>].value`
    pub fn item_value(&self, bucket: &str, idx: usize) -> Result<Node<'_>> {
        self.item(bucket, idx)?.key("value")
    }

    /// Every content item of every bucket, buckets in ascending numeric order.
    pub fn all_items(&self) -> Result<Vec<Node<'_>>> {
        let buckets = self.buckets()?;
        let map = buckets.object()?;
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort_by(|a, b| bucket_rank(a).cmp(&bucket_rank(b)).then_with(|| a.cmp(b)));

        let mut items = Vec::new();
        for key in keys {
            items.extend(buckets.key(key)?.key("contents")?.elements()?);
        }
        Ok(items)
    }
}

fn bucket_rank(key: &str) -> u64 {
    key.parse().unwrap_or(u64::MAX)
}

/// A borrowed position in the loosely typed tree, carrying its key path for errors.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> Node<'a> {
    pub fn root(value: &'a Value, path: impl Into<String>) -> Self {
        Self {
            value,
            path: path.into(),
        }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn wrong_type(&self, expected: &'static str) -> ExtractError {
        ExtractError::WrongType {
            path: self.path.clone(),
            expected,
        }
    }

    fn object(&self) -> Result<&'a serde_json::Map<String, Value>> {
        self.value.as_object().ok_or_else(|| self.wrong_type("an object"))
    }

    /// Required key.
    pub fn key(&self, key: &str) -> Result<Node<'a>> {
        let path = format!("{}.{}", self.path, key);
        match self.object()?.get(key) {
            Some(value) => Ok(Node { value, path }),
            None => Err(ExtractError::MissingKey { path }),
        }
    }

    /// Optional key; the node itself must still be an object.
    pub fn get(&self, key: &str) -> Result<Option<Node<'a>>> {
        Ok(self.object()?.get(key).map(|value| Node {
            value,
            path: format!("{}.{}", self.path, key),
        }))
    }

    pub fn index(&self, idx: usize) -> Result<Node<'a>> {
        let arr = self.value.as_array().ok_or_else(|| self.wrong_type("a list"))?;
        let path = format!("{}[{}]", self.path, idx);
        match arr.get(idx) {
            Some(value) => Ok(Node { value, path }),
            None => Err(ExtractError::MissingKey { path }),
        }
    }

    pub fn elements(&self) -> Result<Vec<Node<'a>>> {
        let arr = self.value.as_array().ok_or_else(|| self.wrong_type("a list"))?;
        Ok(arr
            .iter()
            .enumerate()
            .map(|(i, value)| Node {
                value,
                path: format!("{}[{}]", self.path, i),
            })
            .collect())
    }

    /// `label` of a content item, if it has a string one.
    pub fn label(&self) -> Result<Option<&'a str>> {
        Ok(self.get("label")?.and_then(|n| n.value.as_str()))
    }

    pub fn str(&self) -> Result<&'a str> {
        self.value.as_str().ok_or_else(|| self.wrong_type("a string"))
    }

    pub fn as_u64(&self) -> Result<u64> {
        self.value
            .as_u64()
            .ok_or_else(|| self.wrong_type("a non-negative integer"))
    }

    /// Numbers pass through, numeric strings are parsed.
    pub fn as_f64(&self) -> Result<f64> {
        match self.value {
            Value::Number(n) => n.as_f64().ok_or_else(|| self.wrong_type("a number")),
            Value::String(s) => s.trim().parse().map_err(|_| ExtractError::InvalidNumber {
                path: self.path.clone(),
                raw: s.clone(),
            }),
            _ => Err(self.wrong_type("a number")),
        }
    }

    /// Null, false, zero and empty strings, lists or objects are falsy.
    pub fn is_truthy(&self) -> bool {
        match self.value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
        }
    }
}
