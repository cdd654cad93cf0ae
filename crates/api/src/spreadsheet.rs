//! xlsx import and export.
//!
//! Reading uses `calamine` and only looks at the first worksheet. Writing
//! uses `rust_xlsxwriter` and produces a single sheet with a bold header row.

use std::path::Path;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook};

use crate::error::{AppError, AppResult};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A single exported cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map_or(Cell::Empty, Cell::Text)
    }
}

impl From<Option<i64>> for Cell {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Cell::Empty, |n| Cell::Number(n as f64))
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }
}

/// Read every row of the first worksheet as trimmed strings.
///
/// Whole-number floats are rendered without a fractional part so numeric
/// cells like follower counts parse back as integers.
pub fn read_first_sheet(path: &Path) -> Result<Vec<Vec<String>>, String> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| format!("Unable to open spreadsheet: {e}"))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "Spreadsheet has no worksheets".to_string())?
        .map_err(|e| format!("Unable to read worksheet: {e}"))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}

/// Build an xlsx workbook in memory.
pub fn write_workbook(
    sheet_name: &str,
    headers: &[&str],
    rows: &[Vec<Cell>],
) -> AppResult<Vec<u8>> {
    build_workbook(sheet_name, headers, rows)
        .map_err(|e| AppError::InternalError(format!("Failed to build spreadsheet: {e}")))
}

fn build_workbook(
    sheet_name: &str,
    headers: &[&str],
    rows: &[Vec<Cell>],
) -> Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (idx, row) in rows.iter().enumerate() {
        let r = idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(r, col as u16, text)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(r, col as u16, *n)?;
                }
                Cell::Empty => {}
            }
        }
    }

    workbook.save_to_buffer()
}

/// Wrap workbook bytes as a download.
pub fn xlsx_attachment(filename: &str, bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_floats_render_as_integers() {
        assert_eq!(cell_text(&Data::Float(12000.0)), "12000");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::String("  ig_user ".into())), "ig_user");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn written_workbook_reads_back() {
        let bytes = write_workbook(
            "Leads",
            &["Username", "Followers"],
            &[vec!["creator_one".into(), Some(15_000_i64).into()]],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.xlsx");
        std::fs::write(&path, bytes).unwrap();

        let rows = read_first_sheet(&path).unwrap();
        assert_eq!(rows[0], vec!["Username", "Followers"]);
        assert_eq!(rows[1], vec!["creator_one", "15000"]);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a workbook").unwrap();
        assert!(read_first_sheet(&path).is_err());
    }

    #[test]
    fn attachment_sets_download_headers() {
        let response = xlsx_attachment("influencers.xlsx", vec![1, 2]);
        assert_eq!(
            response.headers()[CONTENT_DISPOSITION],
            "attachment; filename=\"influencers.xlsx\""
        );
        assert_eq!(response.headers()[CONTENT_TYPE], XLSX_CONTENT_TYPE);
    }
}
