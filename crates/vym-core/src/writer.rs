//! Output table serialization.
//!
//! The whole table is written in one scoped operation per format. Existing
//! files are replaced, never merged. A failure part way through leaves
//! whatever the format library managed to flush.

use crate::config::{OutputConfig, OutputFormat};
use crate::error::ExtractError;
use crate::extract::ProgramEntry;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Header labels, in column order. Downstream sheets key on these.
pub const COLUMNS: [&str; 4] = ["Week", "Title", "Duration", "Assignment"];

const COLUMN_WIDTHS: [f64; 4] = [24.0, 48.0, 10.0, 48.0];

/// Write `entries` to the configured path and format.
pub fn write_table(entries: &[ProgramEntry], output: &OutputConfig) -> Result<PathBuf, ExtractError> {
    let path = output.path_buf();
    match output.format {
        OutputFormat::Xlsx => write_xlsx(entries, &path, &output.sheet_name)?,
        OutputFormat::Text => write_text(entries, &path)?,
        OutputFormat::Json => write_json(entries, &path)?,
    }
    info!(
        path = %path.display(),
        format = ?output.format,
        rows = entries.len(),
        "Wrote output table"
    );
    Ok(path)
}

pub fn write_xlsx(entries: &[ProgramEntry], path: &Path, sheet_name: &str) -> Result<(), ExtractError> {
    build_workbook(entries, sheet_name)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|err| ExtractError::write(path, err))
}

fn build_workbook(entries: &[ProgramEntry], sheet_name: &str) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (col, (label, width)) in (0u16..).zip(COLUMNS.iter().zip(COLUMN_WIDTHS)) {
        sheet.write_string_with_format(0, col, *label, &header)?;
        sheet.set_column_width(col, width)?;
    }

    // Rows past the sheet limit fail in the write call, long before `row` could wrap.
    for (row, entry) in (1u32..).zip(entries) {
        if !entry.week.is_empty() {
            sheet.write_string(row, 0, &entry.week)?;
        }
        if !entry.title.is_empty() {
            sheet.write_string(row, 1, &entry.title)?;
        }
        if let Some(minutes) = entry.duration_minutes {
            sheet.write_number(row, 2, f64::from(minutes))?;
        }
        if !entry.assignment.is_empty() {
            sheet.write_string(row, 3, &entry.assignment)?;
        }
    }
    Ok(workbook)
}

/// Week label, then one line per item; a blank line between weeks.
pub fn write_text(entries: &[ProgramEntry], path: &Path) -> Result<(), ExtractError> {
    let file = File::create(path).map_err(|err| ExtractError::write(path, err))?;
    let mut out = BufWriter::new(file);
    render_text(entries, &mut out)
        .and_then(|()| out.flush())
        .map_err(|err| ExtractError::write(path, err))
}

fn render_text(entries: &[ProgramEntry], out: &mut impl Write) -> std::io::Result<()> {
    let mut current_week: Option<&str> = None;
    for entry in entries {
        if current_week != Some(entry.week.as_str()) {
            if current_week.is_some() {
                writeln!(out)?;
            }
            writeln!(out, "{}:", entry.week)?;
            current_week = Some(entry.week.as_str());
        }
        write!(out, "{}", entry.title)?;
        if let Some(minutes) = entry.duration_minutes {
            write!(out, " ({minutes} min)")?;
        }
        if !entry.assignment.is_empty() {
            write!(out, " — {}", entry.assignment)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_json(entries: &[ProgramEntry], path: &Path) -> Result<(), ExtractError> {
    let file = File::create(path).map_err(|err| ExtractError::write(path, err))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, entries).map_err(|err| ExtractError::write(path, err))?;
    out.flush().map_err(|err| ExtractError::write(path, err))
}
