use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataLoadError;
use super::model::{
    Dataset, LaunchRecord, COL_BOOSTER, COL_OUTCOME, COL_PAYLOAD, COL_SITE, REQUIRED_COLUMNS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the four required columns
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per field, string / numeric types
pub fn load_file(path: &Path) -> Result<Dataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(open(path)?)?,
        "json" => load_json(open(path)?)?,
        "parquet" | "pq" => load_parquet(open(path)?)?,
        other => return Err(DataLoadError::UnsupportedExtension(other.to_string())),
    };

    log::info!(
        "Loaded {} launches from {} ({} sites, payload {}..{} kg)",
        dataset.len(),
        path.display(),
        dataset.sites.len(),
        dataset.min_payload,
        dataset.max_payload
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn require_columns(present: &[&str]) -> Result<(), DataLoadError> {
    for column in REQUIRED_COLUMNS {
        if !present.contains(&column) {
            return Err(DataLoadError::MissingColumn {
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per line.
/// Columns other than the four required ones are ignored.
pub fn load_csv<R: Read>(reader: R) -> Result<Dataset, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    require_columns(&headers.iter().collect::<Vec<_>>())?;

    let records = reader
        .deserialize::<LaunchRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
pub fn load_json<R: Read>(reader: R) -> Result<Dataset, DataLoadError> {
    let root: JsonValue = serde_json::from_reader(reader)?;

    let rows = root.as_array().ok_or_else(|| DataLoadError::InvalidValue {
        row: 0,
        column: String::new(),
        reason: "expected a top-level JSON array".into(),
    })?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or_else(|| DataLoadError::InvalidValue {
            row: i,
            column: String::new(),
            reason: "row is not a JSON object".into(),
        })?;
        require_columns(&obj.keys().map(String::as_str).collect::<Vec<_>>())?;
        records.push(record_from_json(row, i)?);
    }

    Ok(Dataset::from_records(records))
}

fn record_from_json(row: &JsonValue, index: usize) -> Result<LaunchRecord, DataLoadError> {
    // `class` comes through as 1.0 from float-typed frames.
    let mut row = row.clone();
    if let Some(class) = row.get_mut(COL_OUTCOME) {
        let whole = match class {
            JsonValue::Number(n) if !n.is_i64() => n.as_f64().filter(|f| f.fract() == 0.0),
            _ => None,
        };
        if let Some(f) = whole {
            *class = JsonValue::from(f as i64);
        }
    }
    serde_json::from_value(row).map_err(|e| DataLoadError::InvalidValue {
        row: index,
        column: String::new(),
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing the launch table.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
pub fn load_parquet(file: File) -> Result<Dataset, DataLoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    {
        let schema = builder.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        require_columns(&names)?;
    }
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let base = records.len();
        append_batch(&batch, base, &mut records)?;
    }

    Ok(Dataset::from_records(records))
}

fn append_batch(
    batch: &RecordBatch,
    base: usize,
    out: &mut Vec<LaunchRecord>,
) -> Result<(), DataLoadError> {
    let site_col = column(batch, COL_SITE)?;
    let payload_col = column(batch, COL_PAYLOAD)?;
    let outcome_col = column(batch, COL_OUTCOME)?;
    let booster_col = column(batch, COL_BOOSTER)?;

    for row in 0..batch.num_rows() {
        let at = base + row;
        out.push(LaunchRecord {
            site: extract_string(site_col, row, at, COL_SITE)?,
            payload_mass: extract_f64(payload_col, row, at, COL_PAYLOAD)?,
            outcome: extract_i64(outcome_col, row, at, COL_OUTCOME)?,
            booster_category: extract_string(booster_col, row, at, COL_BOOSTER)?,
        });
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

fn column<'b>(batch: &'b RecordBatch, name: &str) -> Result<&'b Arc<dyn Array>, DataLoadError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DataLoadError::MissingColumn {
            column: name.to_string(),
        })?;
    Ok(batch.column(idx))
}

fn invalid(at: usize, column: &str, reason: String) -> DataLoadError {
    DataLoadError::InvalidValue {
        row: at,
        column: column.to_string(),
        reason,
    }
}

fn extract_string(
    col: &Arc<dyn Array>,
    row: usize,
    at: usize,
    name: &str,
) -> Result<String, DataLoadError> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => Err(invalid(at, name, format!("expected a string column, got {other:?}"))),
    }
}

fn extract_f64(
    col: &Arc<dyn Array>,
    row: usize,
    at: usize,
    name: &str,
) -> Result<f64, DataLoadError> {
    if col.is_null(row) {
        return Err(invalid(at, name, "null value".into()));
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Ok(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        Err(invalid(
            at,
            name,
            format!("expected a numeric column, got {:?}", col.data_type()),
        ))
    }
}

fn extract_i64(
    col: &Arc<dyn Array>,
    row: usize,
    at: usize,
    name: &str,
) -> Result<i64, DataLoadError> {
    if col.is_null(row) {
        return Err(invalid(at, name, "null value".into()));
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as i64)
    } else if let Some(arr) = any.downcast_ref::<BooleanArray>() {
        Ok(arr.value(row) as i64)
    } else if let Some(arr) = any.downcast_ref::<Float64Array>() {
        let v = arr.value(row);
        if v.fract() != 0.0 {
            return Err(invalid(at, name, format!("{v} is not an integer")));
        }
        Ok(v as i64)
    } else {
        Err(invalid(
            at,
            name,
            format!("expected an integer column, got {:?}", col.data_type()),
        ))
    }
}
