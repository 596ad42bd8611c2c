use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{
    LaunchDataset, LaunchRecord, Outcome, COL_BOOSTER_CATEGORY, COL_CLASS, COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS, REQUIRED_COLUMNS,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong turning a file into a [`LaunchDataset`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("opening {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("reading JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reading parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("decoding parquet column: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: {message}")]
    InvalidValue { row: usize, message: String },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("dataset contains no launch records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the four required columns (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<LaunchDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    LaunchDataset::from_records(records)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row, one launch attempt per line. The notebook export
/// carries more columns (flight number, orbit, ...); only the required four
/// are read.
fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);

    let headers = reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::MissingColumn(required.to_string()));
        }
    }

    let mut records = Vec::new();
    for result in reader.deserialize::<LaunchRecord>() {
        records.push(result?);
    }
    Ok(records)
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
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let root: JsonValue = serde_json::from_reader(BufReader::new(open(path)?))?;

    let rows = root.as_array().ok_or_else(|| LoadError::InvalidValue {
        row: 0,
        message: "expected a top-level JSON array".to_string(),
    })?;

    let mut records = Vec::with_capacity(rows.len());
    for (row, value) in rows.iter().enumerate() {
        let obj = value.as_object().ok_or_else(|| LoadError::InvalidValue {
            row,
            message: "not a JSON object".to_string(),
        })?;
        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !obj.contains_key(**c)) {
            return Err(LoadError::MissingColumn(missing.to_string()));
        }
        records.push(serde_json::from_value(value.clone())?);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Numeric columns are cast to Float64 before reading, so integer payloads
/// and boolean/integer `class` columns written by Pandas or Polars both work.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    // Checked up front: a file with no row groups yields no batches.
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|c| builder.schema().index_of(**c).is_err())
    {
        return Err(LoadError::MissingColumn(missing.to_string()));
    }
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let offset = records.len();

        let sites = string_column(&batch, COL_LAUNCH_SITE)?;
        let payloads = float_column(&batch, COL_PAYLOAD_MASS)?;
        let classes = float_column(&batch, COL_CLASS)?;
        let boosters = string_column(&batch, COL_BOOSTER_CATEGORY)?;

        for i in 0..batch.num_rows() {
            let row = offset + i;
            if sites.is_null(i) || payloads.is_null(i) || classes.is_null(i) || boosters.is_null(i)
            {
                return Err(LoadError::InvalidValue {
                    row,
                    message: "null value in a required column".to_string(),
                });
            }
            let outcome = Outcome::try_from(classes.value(i))
                .map_err(|message| LoadError::InvalidValue { row, message })?;

            records.push(LaunchRecord::new(
                sites.value(i),
                payloads.value(i),
                outcome,
                boosters.value(i),
            ));
        }
    }
    Ok(records)
}

// -- Parquet / Arrow helpers --

fn column(batch: &RecordBatch, name: &str) -> Result<ArrayRef, LoadError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| LoadError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx).clone())
}

/// Fetch a column as `Float64`, casting from any integer, float or boolean type.
fn float_column(batch: &RecordBatch, name: &str) -> Result<Float64Array, LoadError> {
    let casted = cast(&column(batch, name)?, &DataType::Float64)?;
    casted
        .as_any()
        .downcast_ref::<Float64Array>()
        .cloned()
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

/// Fetch a column as `Utf8`, casting from `LargeUtf8` if needed.
fn string_column(batch: &RecordBatch, name: &str) -> Result<StringArray, LoadError> {
    let casted = cast(&column(batch, name)?, &DataType::Utf8)?;
    casted
        .as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{BooleanArray, Int64Array};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::TempPath {
        let mut temp = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        temp.write_all(contents.as_bytes()).unwrap();
        temp.into_temp_path()
    }

    #[test]
    fn csv_reads_required_columns_and_ignores_extra() {
        let path = write_temp(
            ".csv",
            "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category\n\
             1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0\n\
             2,VAFB SLC-4E,1,500.0,F9 v1.1,v1.1\n\
             3,CCAFS LC-40,1,3170.5,F9 FT B1029.1,FT\n",
        );
        let ds = load_file(&path).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(ds.min_payload(), 0.0);
        assert_eq!(ds.max_payload(), 3170.5);
        assert_eq!(
            ds.records()[2],
            LaunchRecord::new("CCAFS LC-40", 3170.5, Outcome::Success, "FT")
        );
    }

    #[test]
    fn csv_missing_column_is_reported_by_name() {
        let path = write_temp(
            ".csv",
            "Launch Site,class,Payload Mass (kg)\nCCAFS LC-40,0,0.0\n",
        );
        match load_file(&path) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, "Booster Version Category"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn csv_rejects_class_outside_zero_one() {
        let path = write_temp(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,2,10.0,FT\n",
        );
        assert!(matches!(load_file(&path), Err(LoadError::Csv(_))));
    }

    #[test]
    fn csv_accepts_float_formatted_class() {
        let path = write_temp(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
             A,1.0,10.0,FT\n\
             A,0.0,20.0,FT\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn csv_rejects_non_numeric_payload() {
        let path = write_temp(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,1,heavy,FT\n",
        );
        assert!(matches!(load_file(&path), Err(LoadError::Csv(_))));
    }

    #[test]
    fn csv_with_header_only_is_empty() {
        let path = write_temp(
            ".csv",
            "Launch Site,class,Payload Mass (kg),Booster Version Category\n",
        );
        assert!(matches!(load_file(&path), Err(LoadError::Empty)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spacex_launch_dash.csv");
        assert!(matches!(load_file(&path), Err(LoadError::Io { .. })));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = write_temp(".xlsx", "");
        match load_file(&path) {
            Err(LoadError::UnsupportedFormat(ext)) => assert_eq!(ext, "xlsx"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn json_records_load() {
        let path = write_temp(
            ".json",
            r#"[
                {"Launch Site": "A", "Payload Mass (kg)": 500, "class": 1, "Booster Version Category": "FT"},
                {"Launch Site": "B", "Payload Mass (kg)": 3000.5, "class": 0, "Booster Version Category": "B4", "Orbit": "LEO"}
            ]"#,
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.sites(), ["A", "B"]);
        assert_eq!(ds.records()[0].payload_mass_kg, 500.0);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn json_accepts_float_formatted_class() {
        let path = write_temp(
            ".json",
            r#"[
                {"Launch Site": "A", "Payload Mass (kg)": 10.0, "class": 1.0, "Booster Version Category": "FT"},
                {"Launch Site": "A", "Payload Mass (kg)": 20.0, "class": 0.0, "Booster Version Category": "FT"}
            ]"#,
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn json_rejects_fractional_class() {
        let path = write_temp(
            ".json",
            r#"[{"Launch Site": "A", "Payload Mass (kg)": 10.0, "class": 0.5, "Booster Version Category": "FT"}]"#,
        );
        assert!(matches!(load_file(&path), Err(LoadError::Json(_))));
    }

    #[test]
    fn json_missing_key_is_missing_column() {
        let path = write_temp(
            ".json",
            r#"[{"Launch Site": "A", "class": 1, "Booster Version Category": "FT"}]"#,
        );
        match load_file(&path) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, "Payload Mass (kg)"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn parquet_casts_integer_payload_and_boolean_class() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Int64, false),
            Field::new(COL_CLASS, DataType::Boolean, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B", "A"])),
                Arc::new(Int64Array::from(vec![500, 3000, 9000])),
                Arc::new(BooleanArray::from(vec![true, true, false])),
                Arc::new(StringArray::from(vec!["FT", "B4", "FT"])),
            ],
        )
        .unwrap();

        let temp = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(temp.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(temp.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites(), ["A", "B"]);
        assert_eq!(ds.max_payload(), 9000.0);
        assert_eq!(ds.records()[2].outcome, Outcome::Failure);
    }

    #[test]
    fn parquet_missing_column_is_reported() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A"])),
                Arc::new(Float64Array::from(vec![1.0])),
            ],
        )
        .unwrap();

        let temp: NamedTempFile = tempfile::Builder::new().suffix(".pq").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(temp.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        assert!(matches!(
            load_file(temp.path()),
            Err(LoadError::MissingColumn(_))
        ));
    }

    #[test]
    fn parquet_without_row_groups_still_checks_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_CLASS, DataType::Int64, false),
        ]));

        let temp = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let writer = ArrowWriter::try_new(temp.reopen().unwrap(), schema, None).unwrap();
        writer.close().unwrap();

        match load_file(temp.path()) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, "Payload Mass (kg)"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }
}
