//! Upload decoding: JSON and CSV files into raw transaction documents.
//!
//! Decoding is deliberately lenient about record contents. A decoded
//! document may be missing fields or carry the wrong shape; those records
//! flow into the validation dispatcher and come back as rejections. Only
//! unreadable files fail here.

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::IngestError;

/// Columns coerced to numbers when decoding CSV rows.
const NUMERIC_COLUMNS: &[&str] = &["amount", "exchangeRate"];

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Csv,
}

impl FileFormat {
    /// Detect the format from the uploaded file name.
    pub fn detect(filename: &str) -> Result<Self, IngestError> {
        match filename.rsplit_once('.').map(|(_, ext)| ext) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Self::Csv),
            Some(ext) => Err(IngestError::UnsupportedFormat(ext.to_string())),
            None => Err(IngestError::UnsupportedFormat(filename.to_string())),
        }
    }
}

/// Decode an uploaded file into raw documents.
pub fn decode(format: FileFormat, bytes: &[u8]) -> Result<Vec<Value>, IngestError> {
    match format {
        FileFormat::Json => decode_json(bytes),
        FileFormat::Csv => decode_csv(bytes),
    }
}

/// Decode a JSON upload: an array of records, or a single record.
pub fn decode_json(bytes: &[u8]) -> Result<Vec<Value>, IngestError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| IngestError::Parse(e.to_string()))?;

    let documents = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(IngestError::Parse(format!(
                "expected a JSON array or object, got {}",
                json_type_name(&other)
            )));
        }
    };

    debug!(count = documents.len(), "Decoded JSON upload");
    Ok(documents)
}

/// Decode a CSV upload: one document per row, keyed by the header row.
///
/// Empty cells are dropped so downstream presence checks fire; the
/// `amount` and `exchangeRate` columns are coerced to numbers; a `details`
/// column may carry an embedded JSON object.
pub fn decode_csv(bytes: &[u8]) -> Result<Vec<Value>, IngestError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| IngestError::Parse(e.to_string()))?
        .clone();

    let mut documents = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::Parse(e.to_string()))?;
        let mut document = Map::new();

        for (header, raw) in headers.iter().zip(record.iter()) {
            if raw.is_empty() {
                continue;
            }
            document.insert(header.to_string(), csv_cell_value(header, raw));
        }

        documents.push(Value::Object(document));
    }

    debug!(count = documents.len(), "Decoded CSV upload");
    Ok(documents)
}

fn csv_cell_value(header: &str, raw: &str) -> Value {
    if NUMERIC_COLUMNS.contains(&header) {
        if let Ok(number) = raw.parse::<f64>()
            && let Some(number) = serde_json::Number::from_f64(number)
        {
            return Value::Number(number);
        }
        // Unparseable numeric cell: keep the raw string so the dispatcher
        // reports it as a malformed payload instead of silently dropping it
        return Value::String(raw.to_string());
    }

    if header == "details"
        && let Ok(embedded @ Value::Object(_)) = serde_json::from_str::<Value>(raw)
    {
        return embedded;
    }

    Value::String(raw.to_string())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
