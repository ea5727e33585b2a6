//! Text filtering component.

use serde_json::{json, Map, Value};

use super::text_field;
use crate::config::TextProcessorConfig;
use crate::handler::{Handler, HandlerError};

/// Counts words and keeps only those within a length window.
///
/// `{"batch": [{"text": ...}, ...]}` yields `{"results": [...]}`; any
/// other object yields `{"result": ...}` for its `text` field.
#[derive(Debug, Clone)]
pub struct TextProcessor {
    min_length: usize,
    max_length: usize,
}

impl TextProcessor {
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    pub fn from_config(config: &TextProcessorConfig) -> Self {
        tracing::info!(
            "Text processor config: min_length={}, max_length={}",
            config.min_length,
            config.max_length
        );
        Self::new(config.min_length, config.max_length)
    }

    fn process(&self, text: &str) -> Value {
        let words: Vec<&str> = text.split_whitespace().collect();
        let filtered: Vec<&str> = words
            .iter()
            .copied()
            .filter(|w| (self.min_length..=self.max_length).contains(&w.chars().count()))
            .collect();

        json!({
            "original_text": text,
            "word_count": words.len(),
            "filtered_word_count": filtered.len(),
            "filtered_text": filtered.join(" "),
        })
    }

    fn process_item(&self, item: &Value) -> Result<Value, HandlerError> {
        let object = as_object(item)?;
        Ok(self.process(text_field(object, "text")?))
    }
}

fn as_object(item: &Value) -> Result<&Map<String, Value>, HandlerError> {
    item.as_object()
        .ok_or_else(|| HandlerError::new("text processor expects an object input"))
}

impl Handler for TextProcessor {
    fn invoke(&self, item: Value) -> Result<Value, HandlerError> {
        let object = as_object(&item)?;

        if let Some(Value::Array(batch)) = object.get("batch") {
            tracing::debug!("Processing batch of {} texts", batch.len());
            let results = batch
                .iter()
                .map(|entry| self.process_item(entry))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(json!({ "results": results }));
        }

        Ok(json!({ "result": self.process_item(&item)? }))
    }
}
