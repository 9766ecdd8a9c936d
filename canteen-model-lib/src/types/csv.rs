use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::error::ProcessorError;

/// One input row: header names in file order alongside the row's cell values.
///
/// Rows decoded from the same file share one header list, so copies made during
/// barcode expansion only duplicate the values.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl RawRecord {
    pub fn new(headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self { headers, values }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (headers, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self {
            headers: headers.into(),
            values,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the first column named `column`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    /// `(header, value)` pairs in column order. A short row yields only the cells
    /// it has; cells past the last header are not named and are skipped.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .zip(self.values.iter())
            .map(|(h, v)| (h.as_str(), v.as_str()))
    }

    /// Copy of this record with `column` set to `value`. The header list is shared.
    pub fn with_value(&self, column: &str, value: &str) -> Self {
        let mut values = self.values.clone();
        if let Some(i) = self.headers.iter().position(|h| h == column) {
            if let Some(slot) = values.get_mut(i) {
                *slot = value.to_string();
            }
        }
        Self {
            headers: Arc::clone(&self.headers),
            values,
        }
    }

    /// Build records from an already parsed JSON array of flat objects.
    /// `null` counts as "no records"; anything other than an array of objects is rejected.
    pub fn list_from_json(value: &JsonValue) -> Result<Vec<RawRecord>, ProcessorError> {
        let items = match value {
            JsonValue::Null => return Ok(Vec::new()),
            JsonValue::Array(items) => items,
            other => {
                return Err(ProcessorError::InvalidInput(format!(
                    "expected an array of records, found {}",
                    json_kind(other)
                )))
            }
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                JsonValue::Object(map) => Ok(RawRecord::from_pairs(map.iter().map(|(k, v)| {
                    let text = match v {
                        JsonValue::String(s) => s.clone(),
                        JsonValue::Null => String::new(),
                        other => other.to_string(),
                    };
                    (k.clone(), text)
                }))),
                other => Err(ProcessorError::InvalidInput(format!(
                    "record {} is {}, expected an object",
                    i + 1,
                    json_kind(other)
                ))),
            })
            .collect()
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
