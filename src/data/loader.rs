use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::DataLoadError;
use super::model::{Dataset, LaunchRecord, Outcome};

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";
pub const CLASS_COLUMN: &str = "class";

const REQUIRED_COLUMNS: [&str; 4] = [SITE_COLUMN, PAYLOAD_COLUMN, BOOSTER_COLUMN, CLASS_COLUMN];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming at least the four required columns
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – same column names, any numeric payload / class type
pub fn load_file(path: &Path) -> Result<Dataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataLoadError::UnsupportedFormat(other.to_string())),
    }
}

fn open(path: &Path) -> Result<std::fs::File, DataLoadError> {
    std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_payload(raw: &str, row: usize) -> Result<f64, DataLoadError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| DataLoadError::InvalidPayload {
            row,
            value: raw.to_string(),
        })
}

fn parse_outcome(raw: &str, row: usize) -> Result<Outcome, DataLoadError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(Outcome::from_class)
        .ok_or_else(|| DataLoadError::InvalidOutcome {
            row,
            value: raw.to_string(),
        })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV row, numeric cells kept as text so bad values report their row.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
    #[serde(rename = "class")]
    class: String,
}

/// CSV layout: header row with column names. Columns other than the four
/// required ones (flight number, booster version, ...) are ignored.
fn load_csv(path: &Path) -> Result<Dataset, DataLoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers = reader.headers()?.clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(DataLoadError::MissingColumn(col));
        }
    }

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<CsvRow>().enumerate() {
        let raw = result?;
        records.push(LaunchRecord::new(
            raw.site,
            parse_payload(&raw.payload_mass, row)?,
            raw.booster_category,
            parse_outcome(&raw.class, row)?,
        ));
    }

    Dataset::from_records(records)
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
///     "Booster Version Category": "v1.0",
///     "class": 0
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset, DataLoadError> {
    let file = open(path)?;
    let rows: Vec<serde_json::Map<String, JsonValue>> =
        serde_json::from_reader(std::io::BufReader::new(file))?;

    let mut records = Vec::with_capacity(rows.len());
    for (row, rec) in rows.iter().enumerate() {
        let field = |col: &'static str| rec.get(col).ok_or(DataLoadError::MissingColumn(col));

        let site = json_text(field(SITE_COLUMN)?);
        let booster = json_text(field(BOOSTER_COLUMN)?);

        let payload = field(PAYLOAD_COLUMN)?;
        let payload_mass = match payload {
            JsonValue::Number(n) => n.as_f64(),
            JsonValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(|| DataLoadError::InvalidPayload {
            row,
            value: payload.to_string(),
        })?;

        let class = field(CLASS_COLUMN)?;
        let outcome = match class {
            JsonValue::Number(n) => n.as_f64().and_then(Outcome::from_class),
            JsonValue::Bool(true) => Some(Outcome::Success),
            JsonValue::Bool(false) => Some(Outcome::Failure),
            JsonValue::String(s) => s.trim().parse::<f64>().ok().and_then(Outcome::from_class),
            _ => None,
        }
        .ok_or_else(|| DataLoadError::InvalidOutcome {
            row,
            value: class.to_string(),
        })?;

        records.push(LaunchRecord::new(site, payload_mass, booster, outcome));
    }

    Dataset::from_records(records)
}

fn json_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Column types are normalised with Arrow's cast kernel: strings to Utf8,
/// payload and class to Float64. Values that do not cast come back null and
/// are reported as invalid for their row.
fn load_parquet(path: &Path) -> Result<Dataset, DataLoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        append_batch(&batch, &mut records)?;
    }

    Dataset::from_records(records)
}

fn column(batch: &RecordBatch, name: &'static str, to: &DataType) -> Result<ArrayRef, DataLoadError> {
    let col = batch
        .column_by_name(name)
        .ok_or(DataLoadError::MissingColumn(name))?;
    Ok(cast(col.as_ref(), to)?)
}

fn append_batch(batch: &RecordBatch, records: &mut Vec<LaunchRecord>) -> Result<(), DataLoadError> {
    let sites = column(batch, SITE_COLUMN, &DataType::Utf8)?;
    let boosters = column(batch, BOOSTER_COLUMN, &DataType::Utf8)?;
    let payloads = column(batch, PAYLOAD_COLUMN, &DataType::Float64)?;
    let classes = column(batch, CLASS_COLUMN, &DataType::Float64)?;

    let sites = sites.as_string::<i32>();
    let boosters = boosters.as_string::<i32>();
    let payloads = payloads.as_primitive::<Float64Type>();
    let classes = classes.as_primitive::<Float64Type>();

    let offset = records.len();
    for i in 0..batch.num_rows() {
        let row = offset + i;
        if payloads.is_null(i) {
            return Err(DataLoadError::InvalidPayload {
                row,
                value: "null".to_string(),
            });
        }
        let class = (!classes.is_null(i)).then(|| classes.value(i));
        let outcome = class.and_then(Outcome::from_class).ok_or_else(|| {
            DataLoadError::InvalidOutcome {
                row,
                value: class.map_or_else(|| "null".to_string(), |c| c.to_string()),
            }
        })?;
        let site = if sites.is_null(i) { "" } else { sites.value(i) };
        let booster = if boosters.is_null(i) { "" } else { boosters.value(i) };

        records.push(LaunchRecord::new(site, payloads.value(i), booster, outcome));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::SiteId;

    const SPACEX_CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
3,VAFB SLC-4E,1,9600.0,F9 FT B1029.1,FT
4,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
5,CCAFS SLC-40,1,3669.0,F9 B4 B1039.2,B4
";

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_spacex_csv() {
        let file = write_file(".csv", SPACEX_CSV);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 5);
        let sites: Vec<&str> = ds.sites().iter().map(SiteId::as_str).collect();
        assert_eq!(sites, ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]);
        assert_eq!(ds.bounds().min, 0.0);
        assert_eq!(ds.bounds().max, 9600.0);
        assert_eq!(ds.records()[2].outcome, Outcome::Success);
        assert_eq!(ds.records()[4].booster_category, "B4");
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let file = write_file(".csv", "Launch Site,class,Booster Version Category\nA,1,FT\n");
        assert!(matches!(
            load_file(file.path()),
            Err(DataLoadError::MissingColumn(PAYLOAD_COLUMN))
        ));
    }

    #[test]
    fn csv_non_numeric_payload_is_reported() {
        let file = write_file(
            ".csv",
            "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,100,FT,1\nA,heavy,FT,1\n",
        );
        match load_file(file.path()) {
            Err(DataLoadError::InvalidPayload { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "heavy");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn csv_bad_class_is_reported() {
        let file = write_file(
            ".csv",
            "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,100,FT,2\n",
        );
        assert!(matches!(
            load_file(file.path()),
            Err(DataLoadError::InvalidOutcome { row: 0, .. })
        ));
    }

    #[test]
    fn csv_with_only_header_is_empty() {
        let file = write_file(
            ".csv",
            "Launch Site,Payload Mass (kg),Booster Version Category,class\n",
        );
        assert!(matches!(load_file(file.path()), Err(DataLoadError::Empty)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = Path::new("/nonexistent/launches.csv");
        assert!(matches!(load_file(path), Err(DataLoadError::Io { .. })));
    }

    #[test]
    fn unsupported_extension() {
        let file = write_file(".xlsx", "");
        match load_file(file.path()) {
            Err(DataLoadError::UnsupportedFormat(ext)) => assert_eq!(ext, "xlsx"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn loads_records_oriented_json() {
        let file = write_file(
            ".json",
            r#"[
                {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490, "Booster Version Category": "FT", "class": 1},
                {"Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 525.5, "Booster Version Category": "v1.0", "class": 0}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].payload_mass, 525.5);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
        assert_eq!(ds.sites()[0].as_str(), "KSC LC-39A");
    }

    #[test]
    fn json_missing_key_is_reported() {
        let file = write_file(
            ".json",
            r#"[{"Launch Site": "A", "Booster Version Category": "FT", "class": 1}]"#,
        );
        assert!(matches!(
            load_file(file.path()),
            Err(DataLoadError::MissingColumn(PAYLOAD_COLUMN))
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let file = write_file(".json", "[{not json");
        assert!(matches!(load_file(file.path()), Err(DataLoadError::Json(_))));
    }

    #[test]
    fn json_class_accepts_bools_and_numeric_strings() {
        let file = write_file(
            ".json",
            r#"[
                {"Launch Site": "A", "Payload Mass (kg)": 100, "Booster Version Category": "FT", "class": true},
                {"Launch Site": "A", "Payload Mass (kg)": 200, "Booster Version Category": "FT", "class": false},
                {"Launch Site": "B", "Payload Mass (kg)": "300", "Booster Version Category": "B4", "class": "1"},
                {"Launch Site": "B", "Payload Mass (kg)": 400, "Booster Version Category": "B4", "class": " 0 "}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        let outcomes: Vec<Outcome> = ds.records().iter().map(|r| r.outcome).collect();
        assert_eq!(
            outcomes,
            [Outcome::Success, Outcome::Failure, Outcome::Success, Outcome::Failure]
        );
        assert_eq!(ds.records()[2].payload_mass, 300.0);
    }

    #[test]
    fn json_null_payload_is_reported() {
        let file = write_file(
            ".json",
            r#"[{"Launch Site": "A", "Payload Mass (kg)": null, "Booster Version Category": "FT", "class": 1}]"#,
        );
        match load_file(file.path()) {
            Err(DataLoadError::InvalidPayload { row, value }) => {
                assert_eq!(row, 0);
                assert_eq!(value, "null");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn csv_blank_site_is_reported() {
        let file = write_file(
            ".csv",
            "Launch Site,Payload Mass (kg),Booster Version Category,class\n,100,FT,1\n",
        );
        assert!(matches!(
            load_file(file.path()),
            Err(DataLoadError::EmptySite { row: 0 })
        ));
    }

    fn write_parquet(payloads: ArrayRef, classes: ArrayRef) -> tempfile::NamedTempFile {
        let rows = payloads.len();
        let schema = Arc::new(Schema::new(vec![
            Field::new(SITE_COLUMN, DataType::Utf8, false),
            Field::new(PAYLOAD_COLUMN, payloads.data_type().clone(), true),
            Field::new(BOOSTER_COLUMN, DataType::Utf8, false),
            Field::new(CLASS_COLUMN, classes.data_type().clone(), true),
        ]));
        let sites = ["VAFB SLC-4E", "KSC LC-39A", "VAFB SLC-4E"];
        let boosters = ["FT", "B4", "B5"];
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from_iter_values(sites.iter().cycle().take(rows))),
                payloads,
                Arc::new(StringArray::from_iter_values(boosters.iter().cycle().take(rows))),
                classes,
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer =
            ArrowWriter::try_new(file.as_file().try_clone().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        file
    }

    #[test]
    fn loads_parquet_with_integer_class() {
        let file = write_parquet(
            Arc::new(Float64Array::from(vec![9600.0, 0.0, 475.0])),
            Arc::new(Int64Array::from(vec![1, 0, 1])),
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites().len(), 2);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
        assert_eq!(ds.bounds().max, 9600.0);
    }

    #[test]
    fn parquet_null_payload_is_reported() {
        let file = write_parquet(
            Arc::new(Float64Array::from(vec![Some(9600.0), None, Some(475.0)])),
            Arc::new(Int64Array::from(vec![1, 0, 1])),
        );
        match load_file(file.path()) {
            Err(DataLoadError::InvalidPayload { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "null");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn parquet_text_payload_that_does_not_cast_is_reported() {
        let file = write_parquet(
            Arc::new(StringArray::from(vec!["9600", "heavy", "475"])),
            Arc::new(Int64Array::from(vec![1, 0, 1])),
        );
        match load_file(file.path()) {
            Err(DataLoadError::InvalidPayload { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "null");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn parquet_bad_class_is_reported() {
        let file = write_parquet(
            Arc::new(Float64Array::from(vec![9600.0, 0.0, 475.0])),
            Arc::new(Int64Array::from(vec![Some(1), Some(3), None])),
        );
        match load_file(file.path()) {
            Err(DataLoadError::InvalidOutcome { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "3");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
