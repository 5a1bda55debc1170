//! Reads the species column out of the input spreadsheet.
use crate::error::{CrateError, Result};
use calamine::{Data, Reader, open_workbook_auto};
use log::{info, warn};
use std::fs::File;
use std::path::Path;

/// Loads the first column of the first sheet, skipping the header row.
pub fn load_species_column(file_path: &Path) -> Result<Vec<String>> {
    File::open(file_path).map_err(|source| CrateError::FileAccess {
        path: file_path.to_path_buf(),
        source,
    })?;

    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let cells = match extension.as_deref() {
        Some("csv") => read_delimited_column(file_path, b',')?,
        Some("tsv") => read_delimited_column(file_path, b'\t')?,
        _ => read_workbook_column(file_path)?,
    };

    let mut names = Vec::with_capacity(cells.len());
    for (i, cell) in cells.into_iter().enumerate() {
        let row_num = i + 2; // +1 for header, +1 for 0-based index
        match cell {
            Some(value) => names.push(value),
            None => warn!("Skipping empty species cell at row {}", row_num),
        }
    }

    info!("Read {} species names from {:?}", names.len(), file_path);
    Ok(names)
}

fn read_workbook_column(file_path: &Path) -> Result<Vec<Option<String>>> {
    let format_error = |reason: String| CrateError::SpreadsheetFormat {
        path: file_path.to_path_buf(),
        reason,
    };

    let mut workbook = open_workbook_auto(file_path).map_err(|e| format_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CrateError::EmptyWorkbook(file_path.to_path_buf()))?
        .map_err(|e| format_error(e.to_string()))?;

    Ok(range
        .rows()
        .skip(1)
        .map(|row| row.first().and_then(cell_text))
        .collect())
}

fn read_delimited_column(file_path: &Path, delimiter: u8) -> Result<Vec<Option<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(file_path)?;

    let mut cells = Vec::new();
    for result in reader.records() {
        let record = result?;
        cells.push(
            record
                .get(0)
                .filter(|field| !field.is_empty())
                .map(str::to_string),
        );
    }
    Ok(cells)
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
