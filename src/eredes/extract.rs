use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use std::collections::BTreeMap;

use super::json_path;
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::model::Reading;

/// Turns raw usage payloads into load-curve readings.
///
/// The extractor locates the configured path, expects an array there, and
/// maps each element to one [`Reading`] using the configured timestamp and
/// value field names. The returned sequence is a single forward pass in
/// provider order; callers that need all-or-nothing semantics collect it
/// into a `Result` so any parse failure discards the whole fetch.
#[derive(Debug)]
pub struct RecordExtractor {
    config: ParserConfig,
}

impl RecordExtractor {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn extract(&self, payload: &[u8]) -> Result<Readings<'_>, ParseError> {
        let document: Value = serde_json::from_slice(payload)?;
        let records = json_path::lookup(&document, &self.config.records_path)
            .ok_or_else(|| ParseError::path_not_found(self.config.records_path.as_str()))?;
        let records = records
            .as_array()
            .ok_or_else(|| ParseError::not_an_array(self.config.records_path.as_str()))?
            .clone();

        Ok(Readings {
            extractor: self,
            records: records.into_iter(),
        })
    }

    fn reading(&self, record: &Value) -> Result<Reading, ParseError> {
        let object = record.as_object().ok_or_else(|| {
            ParseError::UnexpectedStructure("load-curve record is not an object".to_string())
        })?;

        let format = self.config.timestamp_format.as_str();
        let raw_timestamp = object
            .get(&self.config.timestamp_field)
            .ok_or_else(|| ParseError::missing_field(self.config.timestamp_field.as_str()))?;
        let text = raw_timestamp.as_str().ok_or_else(|| {
            ParseError::timestamp_parse(raw_timestamp.to_string(), format, "not a string")
        })?;
        let naive = NaiveDateTime::parse_from_str(text, format)
            .map_err(|e| ParseError::timestamp_parse(text, format, e))?;
        let timestamp = naive.and_local_timezone(Local).single().ok_or_else(|| {
            ParseError::timestamp_parse(text, format, "ambiguous or nonexistent local time")
        })?;

        let mut fields = Vec::new();
        for name in &self.config.value_fields {
            match object.get(name) {
                Some(Value::String(value)) => fields.push((name.clone(), value.clone())),
                Some(Value::Number(value)) => fields.push((name.clone(), value.to_string())),
                Some(Value::Bool(value)) => fields.push((name.clone(), value.to_string())),
                _ => {}
            }
        }
        if fields.is_empty() {
            return Err(ParseError::EmptyRecord {
                fields: self.config.value_fields.clone(),
            });
        }

        Ok(Reading {
            measurement: self.config.measurement.clone(),
            tags: BTreeMap::new(),
            fields,
            timestamp,
        })
    }
}

/// Lazy single-pass sequence over the extracted record array.
#[derive(Debug)]
pub struct Readings<'a> {
    extractor: &'a RecordExtractor,
    records: std::vec::IntoIter<Value>,
}

impl Iterator for Readings<'_> {
    type Item = Result<Reading, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(self.extractor.reading(&record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for Readings<'_> {}
