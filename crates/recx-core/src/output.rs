//! Projection of canonical rows onto the schema and CSV output.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use tracing::debug;

use crate::error::Result;
use crate::models::row::CanonicalRow;
use crate::models::schema::Schema;

/// Writes rows as CSV with the schema's columns, in schema order.
pub struct RowWriter<'s> {
    schema: &'s Schema,
}

impl<'s> RowWriter<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Project a row onto the schema: one value per column, empty when the
    /// row lacks the field. Fields outside the schema are dropped.
    pub fn project<'r>(&self, row: &'r CanonicalRow) -> Vec<&'r str> {
        self.schema
            .names()
            .map(|name| row.get_by_name(name).unwrap_or(""))
            .collect()
    }

    /// Write the header and every row to any writer.
    pub fn write<W: Write>(&self, writer: W, rows: &[CanonicalRow]) -> Result<()> {
        let mut wtr = WriterBuilder::new()
            .terminator(Terminator::CRLF)
            .from_writer(writer);

        wtr.write_record(self.schema.names())?;
        for row in rows {
            wtr.write_record(self.project(row))?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Write the header and every row to a file, replacing it.
    pub fn write_to_path(&self, path: &Path, rows: &[CanonicalRow]) -> Result<()> {
        let file = File::create(path)?;
        self.write(file, rows)?;
        debug!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }
}
