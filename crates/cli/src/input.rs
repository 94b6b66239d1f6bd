//! Loading numeric series from CSV and JSON files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::warn;

use crate::CliResult;

/// Load a numeric series from a CSV file.
///
/// `column` is a header name or a zero-based index; the first column is
/// used when omitted. Rows whose cell is not numeric are skipped and the
/// count is logged, since verdict steps then no longer match file rows.
pub fn load_csv_data(path: &Path, column: Option<&str>) -> CliResult<Vec<f64>> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let (data, skipped) = read_csv_column(BufReader::new(file), column)?;
    if skipped > 0 {
        warn!(
            skipped,
            kept = data.len(),
            path = %path.display(),
            "skipped rows without a numeric value"
        );
    }
    Ok(data)
}

/// Read one numeric column, returning the values and the number of skipped rows.
fn read_csv_column<R: Read>(input: R, column: Option<&str>) -> CliResult<(Vec<f64>, usize)> {
    let mut reader = csv::Reader::from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read headers: {}", e))?
        .clone();

    let col_idx = match column {
        Some(col) => match col.parse::<usize>() {
            Ok(idx) => idx,
            Err(_) => headers
                .iter()
                .position(|h| h == col)
                .ok_or_else(|| format!("Column '{}' not found", col))?,
        },
        None => 0,
    };

    let mut data = Vec::new();
    let mut skipped = 0;
    for result in reader.records() {
        let record = result.map_err(|e| format!("Failed to read record: {}", e))?;
        match record.get(col_idx).map(|v| v.trim().parse::<f64>()) {
            Some(Ok(num)) => data.push(num),
            _ => skipped += 1,
        }
    }

    if data.is_empty() {
        return Err("No numeric data found in the specified column".to_string());
    }
    Ok((data, skipped))
}

/// Load a numeric series from a JSON file.
pub fn load_json_data(path: &Path, column: Option<&str>) -> CliResult<Vec<f64>> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("Failed to parse JSON: {}", e))?;
    extract_series(&json, column)
}

/// Pull a numeric series out of a JSON document.
///
/// Accepts a bare array of numbers, an array of objects (keyed by `column`
/// or one of `value`/`values`/`data`/`y`), or an object holding the array
/// under `data`/`values`/`series`/`y`.
pub fn extract_series(json: &serde_json::Value, column: Option<&str>) -> CliResult<Vec<f64>> {
    if let Some(arr) = json.as_array() {
        if !arr.is_empty() && arr.iter().all(|v| v.is_number()) {
            return Ok(arr.iter().filter_map(|v| v.as_f64()).collect());
        }

        let keys: Vec<&str> = match column {
            Some(col) => vec![col],
            None => vec!["value", "values", "data", "y"],
        };
        for key in keys {
            let data: Vec<f64> = arr
                .iter()
                .filter_map(|obj| obj.get(key).and_then(|v| v.as_f64()))
                .collect();
            if !data.is_empty() {
                return Ok(data);
            }
        }
    }

    if let Some(obj) = json.as_object() {
        for key in ["data", "values", "series", "y"] {
            if let Some(arr) = obj.get(key).and_then(|v| v.as_array()) {
                let data: Vec<f64> = arr.iter().filter_map(|v| v.as_f64()).collect();
                if !data.is_empty() {
                    return Ok(data);
                }
            }
        }
    }

    Err("Could not extract numeric data from JSON".to_string())
}

/// Load data from file, picking the format from the extension.
pub fn load_data(path: &Path, column: Option<&str>) -> CliResult<Vec<f64>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => load_csv_data(path, column),
        "json" => load_json_data(path, column),
        _ => load_csv_data(path, column).or_else(|_| load_json_data(path, column)),
    }
}
