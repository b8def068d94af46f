use crate::core::models::table::MotionTable;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV writing error for '{path}': {source}")]
    CsvFile { path: String, source: csv::Error },
}

/// Writes `table` as CSV: a header row with the column names, then one record per frame.
/// Missing cells are written as empty fields.
pub fn write_csv<W: Write>(table: &MotionTable, writer: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer);
    write_records(table, &mut writer)?;
    Ok(())
}

pub fn write_csv_path(table: &MotionTable, path: &Path) -> Result<(), ExportError> {
    let file_err = |e: csv::Error| ExportError::CsvFile {
        path: path.to_string_lossy().to_string(),
        source: e,
    };
    let mut writer = csv::Writer::from_path(path).map_err(file_err)?;
    write_records(table, &mut writer).map_err(file_err)
}

fn write_records<W: Write>(
    table: &MotionTable,
    writer: &mut csv::Writer<W>,
) -> Result<(), csv::Error> {
    writer.write_record(table.column_names())?;
    for frame in 0..table.frame_count() {
        writer.write_record(
            table
                .columns()
                .iter()
                .map(|c| c.values[frame].map_or_else(String::new, |v| v.to_string())),
        )?;
    }
    writer.flush()?;
    Ok(())
}
