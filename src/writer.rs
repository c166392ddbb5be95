use crate::config::{OutputConfig, WriteMode};
use crate::error::Result;
use crate::results::{COLUMNS, ResultColumns, ResultTable};
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Writes the accumulated table to the configured CSV file.
///
/// Columns are padded to equal length first. Returns the number of data rows
/// written.
pub fn save_to_csv(table: &ResultTable, output: &OutputConfig) -> Result<usize> {
    let mut columns = table.columns();
    write_columns(&mut columns, &output.path, output.mode)
}

/// Pads `columns` and writes them to `path`, creating the parent directory
/// if needed
pub fn write_columns(columns: &mut ResultColumns, path: &Path, mode: WriteMode) -> Result<usize> {
    columns.pad();
    let rows = columns.max_len();

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
            ::log::debug!("Created output directory {}", dir.display());
        }
    }

    let write_header = match mode {
        WriteMode::Overwrite => true,
        WriteMode::Append => fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true),
    };

    let file = match mode {
        WriteMode::Overwrite => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?,
        WriteMode::Append => OpenOptions::new().append(true).create(true).open(path)?,
    };

    let mut writer = csv::Writer::from_writer(file);
    if write_header {
        writer.write_record(COLUMNS)?;
    }
    for i in 0..rows {
        writer.write_record(columns.row(i))?;
    }
    writer.flush()?;

    ::log::info!("CSV file saved successfully: {} rows to {}", rows, path.display());
    Ok(rows)
}
