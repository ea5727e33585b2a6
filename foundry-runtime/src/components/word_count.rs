//! Word counting component.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use super::text_field;
use crate::handler::HandlerError;

/// Count words in `{"text": ...}`, a raw string, or any other value's JSON text.
pub fn predict(item: Value) -> Result<Value, HandlerError> {
    let text = match &item {
        Value::Object(object) => text_field(object, "text")?.to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    Ok(count(&text))
}

fn count(text: &str) -> Value {
    let lengths: Vec<usize> = text.split_whitespace().map(|w| w.chars().count()).collect();

    let mut length_distribution: BTreeMap<usize, usize> = BTreeMap::new();
    for len in &lengths {
        *length_distribution.entry(*len).or_default() += 1;
    }

    let total: usize = lengths.iter().sum();

    json!({
        "text": text,
        "word_count": lengths.len(),
        "character_count": text.chars().count(),
        "average_word_length": total as f64 / lengths.len().max(1) as f64,
        "length_distribution": length_distribution,
    })
}
