//! Schema loading from a spreadsheet or CSV file.
//!
//! The file must carry a header row with a `schema` column (output column
//! names) and a `data type` column (nominal types). Headers are matched
//! after trimming and lowercasing; rows with a blank name are skipped.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use crate::error::SchemaError;
use crate::models::schema::{Schema, SchemaEntry};

/// Normalized header naming the output column.
pub const SCHEMA_COLUMN: &str = "schema";

/// Normalized header naming the declared type.
pub const DATA_TYPE_COLUMN: &str = "data type";

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// A cell read from the schema file; `None` when blank.
type Cell = Option<String>;

/// Load the schema from a workbook (`.xlsx`, `.xls`, `.ods`, ...) or a
/// `.csv` file.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let rows = if is_csv {
        read_csv(path)?
    } else {
        read_workbook(path)?
    };

    let schema = schema_from_rows(rows)?;
    debug!("Loaded schema with {} columns from {}", schema.len(), path.display());
    Ok(schema)
}

/// Build a schema from raw rows; the first row is the header.
pub fn schema_from_rows(rows: Vec<Vec<Cell>>) -> Result<Schema> {
    let mut rows = rows.into_iter();
    let header: Vec<String> = rows
        .next()
        .ok_or(SchemaError::Empty)?
        .into_iter()
        .map(|cell| cell.unwrap_or_default().trim().to_lowercase())
        .collect();

    let name_idx = column_index(&header, SCHEMA_COLUMN)?;
    let type_idx = column_index(&header, DATA_TYPE_COLUMN)?;

    let schema = rows
        .filter_map(|mut row| {
            let name = row.get_mut(name_idx).and_then(Option::take)?;
            let data_type = row
                .get(type_idx)
                .and_then(Option::as_deref)
                .map(|t| t.trim().to_lowercase())
                .unwrap_or_default();
            Some(SchemaEntry::new(name, data_type))
        })
        .collect();

    Ok(schema)
}

fn column_index(header: &[String], column: &'static str) -> Result<usize> {
    header
        .iter()
        .position(|h| h == column)
        .ok_or(SchemaError::MissingColumn(column))
}

fn read_workbook(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| SchemaError::Workbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SchemaError::Empty)?
        .map_err(|e| SchemaError::Workbook(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect())
}

fn workbook_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => None,
        other => non_blank(other.to_string()),
    }
}

fn read_csv(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|s| non_blank(s.to_string())).collect());
    }
    Ok(rows)
}

fn non_blank(value: String) -> Cell {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Schema" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

    const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

    fn text_cell(reference: &str, value: &str) -> String {
        format!(r#"<c r="{reference}" t="inlineStr"><is><t xml:space="preserve">{value}</t></is></c>"#)
    }

    /// Write a single-sheet workbook; `None` leaves the cell out.
    fn write_workbook(path: &Path, rows: &[[Option<&str>; 2]]) {
        let mut sheet_rows = String::new();
        for (i, row) in rows.iter().enumerate() {
            let n = i + 1;
            sheet_rows.push_str(&format!(r#"<row r="{n}">"#));
            for (col, value) in ["A", "B"].iter().zip(row) {
                let reference = format!("{col}{n}");
                match value {
                    Some(v) if v.parse::<f64>().is_ok() => {
                        sheet_rows.push_str(&format!(r#"<c r="{reference}"><v>{v}</v></c>"#))
                    }
                    Some(v) => sheet_rows.push_str(&text_cell(&reference, v)),
                    None => {}
                }
            }
            sheet_rows.push_str("</row>");
        }
        let sheet = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_rows}</sheetData></worksheet>"#
        );

        let mut zip = ZipWriter::new(fs::File::create(path).unwrap());
        for (name, body) in [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", PACKAGE_RELS),
            ("xl/workbook.xml", WORKBOOK_XML),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
            ("xl/worksheets/sheet1.xml", sheet.as_str()),
        ] {
            zip.start_file(name, SimpleFileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    fn cells(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| non_blank(v.to_string())).collect()
    }

    #[test]
    fn test_headers_are_trimmed_and_lowercased() {
        let rows = vec![
            cells(&["  Schema ", "Data Type  "]),
            cells(&["mid", " String "]),
            cells(&["year", "INT"]),
        ];

        let schema = schema_from_rows(rows).unwrap();

        assert_eq!(
            schema.entries(),
            &[
                SchemaEntry::new("mid", "string"),
                SchemaEntry::new("year", "int"),
            ]
        );
    }

    #[test]
    fn test_blank_names_are_skipped_in_order() {
        let rows = vec![
            cells(&["Data type", "Schema", "Notes"]),
            cells(&["string", "mid", ""]),
            cells(&["string", "", "spacer row"]),
            cells(&["", "company", ""]),
            vec![Some("float".to_string())],
            cells(&["float", "grand_total", ""]),
        ];

        let schema = schema_from_rows(rows).unwrap();

        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["mid", "company", "grand_total"]);
        assert_eq!(schema.entries()[1].data_type, "");
    }

    #[test]
    fn test_missing_schema_column() {
        let rows = vec![cells(&["Name", "Data type"]), cells(&["mid", "string"])];

        let err = schema_from_rows(rows).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn("schema")));
    }

    #[test]
    fn test_missing_data_type_column() {
        let rows = vec![cells(&["Schema", "Datatype"]), cells(&["mid", "string"])];

        let err = schema_from_rows(rows).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn("data type")));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(schema_from_rows(vec![]), Err(SchemaError::Empty)));
    }

    #[test]
    fn test_load_csv_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.csv");
        fs::write(
            &path,
            "Schema,Data type\nmid,String\n,\nproduct_name,string\norder_subtotal, Float\n",
        )
        .unwrap();

        let schema = load_schema(&path).unwrap();

        assert_eq!(schema.len(), 3);
        assert_eq!(
            schema.names().collect::<Vec<_>>(),
            vec!["mid", "product_name", "order_subtotal"]
        );
        assert_eq!(schema.entries()[2].data_type, "float");
    }

    #[test]
    fn test_load_xlsx_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.xlsx");
        write_workbook(
            &path,
            &[
                [Some("  Schema "), Some("Data TYPE")],
                [Some("mid"), Some(" String ")],
                [None, Some("string")],
                [Some("   "), Some("int")],
                [Some("order_subtotal"), Some("Float")],
                [Some("product_quantity"), Some("7")],
                [Some("company"), None],
            ],
        );

        let schema = load_schema(&path).unwrap();

        assert_eq!(
            schema.entries(),
            &[
                SchemaEntry::new("mid", "string"),
                SchemaEntry::new("order_subtotal", "float"),
                SchemaEntry::new("product_quantity", "7"),
                SchemaEntry::new("company", ""),
            ]
        );
    }

    #[test]
    fn test_workbook_without_schema_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.xlsx");
        write_workbook(&path, &[[Some("Column"), Some("Data type")], [Some("mid"), Some("string")]]);

        assert!(matches!(load_schema(&path), Err(SchemaError::MissingColumn("schema"))));
    }

    #[test]
    fn test_unreadable_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.xlsx");
        fs::write(&path, b"not a zip archive").unwrap();

        assert!(matches!(load_schema(&path), Err(SchemaError::Workbook(_))));
    }
}
