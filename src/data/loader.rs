use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{Catalog, SourceRow, TestRecord, columns};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a reference table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – LOINC table export with a header row (the usual source)
/// * `.json`    – `[{ "LOINC_NUM": "...", "CLASS": "...", ... }, ...]`
/// * `.parquet` – one column per field, string or stringifiable types
///
/// `LOINC_NUM` and `CLASS` must be present; other columns may be missing
/// and are then null for every record.  Row order is preserved.
pub fn load_file(path: &Path) -> Result<Catalog, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let catalog = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!("Loaded {} lab tests from {}", catalog.len(), path.display());
    Ok(catalog)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Build a [`SourceRow`] from a per-column cell accessor.
fn source_row<F>(mut cell: F) -> Result<SourceRow, LoadError>
where
    F: FnMut(&'static str) -> Result<Option<String>, LoadError>,
{
    Ok(SourceRow {
        loinc_num: cell(columns::LOINC_NUM)?.unwrap_or_default(),
        component: cell(columns::COMPONENT)?,
        property: cell(columns::PROPERTY)?,
        system: cell(columns::SYSTEM)?,
        scale_typ: cell(columns::SCALE_TYP)?,
        method_typ: cell(columns::METHOD_TYP)?,
        class: cell(columns::CLASS)?,
        shortname: cell(columns::SHORTNAME)?,
        long_common_name: cell(columns::LONG_COMMON_NAME)?,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with LOINC column names, one test per row.
/// Every row must have as many fields as the header.
fn load_csv(path: &Path) -> Result<Catalog, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);

    let headers = reader.headers()?.clone();
    for required in columns::REQUIRED {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::MissingColumn(required));
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<SourceRow>().enumerate() {
        let row = result.map_err(|e| LoadError::Malformed {
            row: row_no + 1,
            reason: e.to_string(),
        })?;
        records.push(TestRecord::from(row));
    }

    Ok(Catalog::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
/// Numbers and booleans are kept as their text form; `null` is null.
fn load_json(path: &Path) -> Result<Catalog, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let rows = root.as_array().ok_or(LoadError::NotRecordArray)?;

    let objects = rows
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            rec.as_object().ok_or_else(|| LoadError::Malformed {
                row: i + 1,
                reason: "not a JSON object".to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // A column exists when any record carries the key; absent keys are null.
    if !objects.is_empty() {
        for required in columns::REQUIRED {
            if !objects.iter().any(|obj| obj.contains_key(required)) {
                return Err(LoadError::MissingColumn(required));
            }
        }
    }

    let records = objects
        .into_iter()
        .map(|obj| {
            source_row(|name| Ok(obj.get(name).and_then(json_to_text))).map(TestRecord::from)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::from_records(records))
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per LOINC field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Catalog, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    for required in columns::REQUIRED {
        if builder.schema().index_of(required).is_err() {
            return Err(LoadError::MissingColumn(required));
        }
    }
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let source = source_row(|name| match column(&batch, name) {
                Some(col) => cell_text(col, row),
                None => Ok(None),
            })?;
            records.push(TestRecord::from(source));
        }
    }

    Ok(Catalog::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a ArrayRef> {
    batch.schema().index_of(name).ok().map(|i| batch.column(i))
}

/// Text of a single cell, `None` for nulls.
fn cell_text(col: &ArrayRef, row: usize) -> Result<Option<String>, LoadError> {
    if col.is_null(row) {
        return Ok(None);
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        _ => array_value_to_string(col, row)?,
    };
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Arc;

    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str =
        "LOINC_NUM,COMPONENT,PROPERTY,SYSTEM,SCALE_TYP,METHOD_TYP,CLASS,SHORTNAME,LONG_COMMON_NAME";

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_preserves_order_and_derives_category() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!(
            "{HEADER}\n\
             2345-7,Glucose,MCnc,Ser/Plas,Qn,,CHEM,Glucose SerPl-mCnc,Glucose [Mass/volume] in Serum or Plasma\n\
             718-7,Hemoglobin,MCnc,Bld,Qn,,HEM/BC,Hgb Bld-mCnc,Hemoglobin [Mass/volume] in Blood\n\
             99999-9,Widget,Prid,,Nom,,RAD,,\n"
        );
        let path = write_file(&dir, "tests.csv", &body);

        let catalog = load_file(&path).unwrap();
        assert_eq!(catalog.len(), 3);

        let codes: Vec<&str> = catalog.records().iter().map(|r| r.loinc_code.as_str()).collect();
        assert_eq!(codes, vec!["2345-7", "718-7", "99999-9"]);

        let glucose = &catalog.records()[0];
        assert_eq!(glucose.category, "Chemistry");
        assert_eq!(glucose.specimen_system.as_deref(), Some("Ser/Plas"));
        assert_eq!(glucose.method_type, None);

        assert_eq!(catalog.records()[1].category, "CBC & Hematology");

        let other = &catalog.records()[2];
        assert_eq!(other.category, "Other");
        assert_eq!(other.specimen_system, None);
        assert_eq!(other.short_name, None);
    }

    #[test]
    fn csv_tolerates_missing_optional_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "min.csv", "CLASS,LOINC_NUM,EXTRA\nUA,5811-5,x\n");

        let catalog = load_file(&path).unwrap();
        let rec = &catalog.records()[0];
        assert_eq!(rec.loinc_code, "5811-5");
        assert_eq!(rec.category, "Urinalysis");
        assert_eq!(rec.long_name, None);
        assert_eq!(rec.component, None);
    }

    #[test]
    fn csv_missing_class_column_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "noclass.csv", "LOINC_NUM,SHORTNAME\n1,GLU\n");

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("CLASS")), "{err}");
    }

    #[test]
    fn csv_missing_identifier_column_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "noid.csv", "CLASS,SHORTNAME\nCHEM,GLU\n");

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("LOINC_NUM")), "{err}");
    }

    #[test]
    fn csv_ragged_row_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.csv", "LOINC_NUM,CLASS\n1,CHEM\n2,CHEM,extra\n");

        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { row: 2, .. }), "{err}");
    }

    #[test]
    fn header_only_csv_is_an_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty.csv", &format!("{HEADER}\n"));

        let catalog = load_file(&path).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }), "{err}");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("table.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref ext) if ext == "xlsx"));
    }

    #[test]
    fn json_records_with_nulls_and_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "tests.json",
            r#"[
                {"LOINC_NUM": "718-7", "CLASS": "HEM/BC", "SYSTEM": "Bld", "SHORTNAME": null},
                {"LOINC_NUM": 12345, "CLASS": null, "COMPONENT": "Sodium"}
            ]"#,
        );

        let catalog = load_file(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records()[0].category, "CBC & Hematology");
        assert_eq!(catalog.records()[0].short_name, None);
        assert_eq!(catalog.records()[1].loinc_code, "12345");
        assert_eq!(catalog.records()[1].category, "Other");
        assert_eq!(catalog.records()[1].component.as_deref(), Some("Sodium"));
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "obj.json", r#"{"LOINC_NUM": "1"}"#);
        assert!(matches!(load_file(&path).unwrap_err(), LoadError::NotRecordArray));

        let path = write_file(&dir, "scalar.json", r#"[{"LOINC_NUM": "1", "CLASS": "UA"}, 3]"#);
        assert!(matches!(
            load_file(&path).unwrap_err(),
            LoadError::Malformed { row: 2, .. }
        ));

        let path = write_file(&dir, "broken.json", "[{");
        assert!(matches!(load_file(&path).unwrap_err(), LoadError::Json(_)));
    }

    #[test]
    fn json_record_without_class_is_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "noclass.json", r#"[{"LOINC_NUM": "1"}, {"LOINC_NUM": "2"}]"#);
        assert!(matches!(
            load_file(&path).unwrap_err(),
            LoadError::MissingColumn("CLASS")
        ));
    }

    #[test]
    fn json_key_missing_from_one_record_reads_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "partial.json",
            r#"[{"LOINC_NUM": "1", "CLASS": "CHEM"}, {"LOINC_NUM": "2"}]"#,
        );

        let catalog = load_file(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records()[0].category, "Chemistry");
        assert_eq!(catalog.records()[1].loinc_code, "2");
        assert_eq!(catalog.records()[1].class_code, None);
        assert_eq!(catalog.records()[1].category, "Other");
    }

    #[test]
    fn empty_json_array_is_an_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty.json", "[]");
        assert!(load_file(&path).unwrap().is_empty());
    }

    #[test]
    fn parquet_reads_string_and_numeric_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tests.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("LOINC_NUM", DataType::Utf8, false),
            Field::new("CLASS", DataType::Utf8, true),
            Field::new("SYSTEM", DataType::Utf8, true),
            Field::new("PROPERTY", DataType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["2345-7", "718-7"])),
                Arc::new(StringArray::from(vec![Some("CHEM"), None])),
                Arc::new(StringArray::from(vec![Some("Ser/Plas"), Some("Bld")])),
                Arc::new(Int64Array::from(vec![Some(7), None])),
            ],
        )
        .unwrap();
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let catalog = load_file(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records()[0].category, "Chemistry");
        assert_eq!(catalog.records()[0].property.as_deref(), Some("7"));
        assert_eq!(catalog.records()[1].category, "Other");
        assert_eq!(catalog.records()[1].property, None);
        assert_eq!(catalog.records()[1].short_name, None);
    }

    #[test]
    fn parquet_missing_class_column_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noclass.parquet");

        let schema = Arc::new(Schema::new(vec![Field::new("LOINC_NUM", DataType::Utf8, false)]));
        let batch =
            RecordBatch::try_new(schema.clone(), vec![Arc::new(StringArray::from(vec!["1"]))])
                .unwrap();
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        assert!(matches!(
            load_file(&path).unwrap_err(),
            LoadError::MissingColumn("CLASS")
        ));
    }
}
