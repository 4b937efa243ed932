use serde_json::Value;

use crate::error::{ExtractError, Result};
use crate::parser::tree::Node;

/// `(breakpoint label, representative class size)`
const CLASS_SIZE_WEIGHTS: &[(&str, f64)] = &[
    ("100+", 100.0),
    ("40-99", 70.0),
    ("20-39", 30.0),
    ("2-19 students", 10.0),
];

/// Scraped value kept as-is; JSON null reads as absent.
pub fn scraped(node: &Node<'_>) -> Option<Value> {
    match node.value() {
        Value::Null => None,
        v => Some(v.clone()),
    }
}

fn split_range<'a>(node: &Node<'a>) -> Result<Vec<&'a str>> {
    Ok(node.str()?.splitn(2, '-').map(str::trim).collect())
}

/// `"1200-1400"` → `[1200, 1400]`
pub fn sat_range(node: &Node<'_>) -> Result<Vec<i64>> {
    split_range(node)?
        .into_iter()
        .map(|part| {
            part.parse::<i64>().map_err(|_| ExtractError::InvalidNumber {
                path: node.path().to_string(),
                raw: part.to_string(),
            })
        })
        .collect()
}

/// `"24-30"` → `[24.0, 30.0]`
pub fn act_range(node: &Node<'_>) -> Result<Vec<f64>> {
    split_range(node)?
        .into_iter()
        .map(|part| {
            part.parse::<f64>().map_err(|_| ExtractError::InvalidNumber {
                path: node.path().to_string(),
                raw: part.to_string(),
            })
        })
        .collect()
}

pub fn test_requirement(value: &Value) -> Option<u8> {
    match value.as_str()? {
        "Neither required nor recommended" => Some(0),
        "Considered but not required" => Some(1),
        "Required" => Some(2),
        _ => None,
    }
}

/// Weighted sum of the class-size breakdown fractions.
pub fn avg_class_size(breakdown: &Node<'_>) -> Result<f64> {
    let mut total = 0.0;
    for (label, weight) in CLASS_SIZE_WEIGHTS {
        total += weight * breakdown.key(label)?.as_f64()?;
    }
    Ok(total)
}
