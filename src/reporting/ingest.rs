//! Plan spreadsheet parsing.
//!
//! Uploads are Excel workbooks (first sheet) or CSV/TSV exports, each with a
//! header row. Three columns are recognised by name (Ukrainian headers or
//! English aliases): plan month, plan category name and target sum. Rows are
//! numbered from 1, header excluded, in every error message.

use crate::database::NewPlan;
use crate::error::AppError;
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;
use std::io::Cursor;

const MONTH_COLUMNS: &[&str] = &["місяць плану", "plan_month", "period", "month"];
const CATEGORY_COLUMNS: &[&str] = &["назва категорії плану", "category_name", "category"];
const SUM_COLUMNS: &[&str] = &["сума", "sum"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// xlsx/ods (zip) and legacy xls (OLE compound document)
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Header row plus data rows, every cell as trimmed text
struct Sheet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Acknowledgement returned after a successful upload
#[derive(Debug, Clone, Serialize)]
pub struct IngestSummary {
    pub message: String,
    pub inserted: usize,
}

impl IngestSummary {
    pub fn new(inserted: usize) -> Self {
        Self {
            message: "Plans added to the database".to_string(),
            inserted,
        }
    }
}

struct Columns {
    month: usize,
    category: usize,
    sum: usize,
}

impl Columns {
    fn locate(headers: &[String]) -> Result<Self, AppError> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|header| {
                    let header = header.trim().to_lowercase();
                    names.iter().any(|name| *name == header)
                })
                .ok_or_else(|| AppError::ParseFailed(format!("Missing column '{}'", names[0])))
        };

        Ok(Self {
            month: find(MONTH_COLUMNS)?,
            category: find(CATEGORY_COLUMNS)?,
            sum: find(SUM_COLUMNS)?,
        })
    }
}

/// Parse and validate every row of a plan sheet.
///
/// Fails on the first invalid row; the caller never sees a partial batch.
/// Checks that need the database (known category, no stored duplicate)
/// happen at insert time.
pub fn parse_plan_sheet(data: &[u8]) -> Result<Vec<NewPlan>, AppError> {
    let sheet = if is_workbook(data) {
        read_workbook(data)?
    } else {
        read_delimited(data)?
    };
    let columns = Columns::locate(&sheet.headers)?;

    let mut plans = Vec::new();
    let mut seen = HashSet::new();

    for (index, record) in sheet.rows.iter().enumerate() {
        let row = index + 1;
        let field = |i: usize| record.get(i).map(String::as_str).unwrap_or("");
        if record.iter().all(String::is_empty) {
            continue;
        }

        let period = parse_month(field(columns.month)).ok_or_else(|| {
            AppError::ValidationFailed(format!(
                "Row {}: cannot read plan month '{}'",
                row,
                field(columns.month)
            ))
        })?;
        if period.day() != 1 {
            return Err(AppError::ValidationFailed(format!(
                "Row {}: plan month must be the first day of a month, got {}",
                row, period
            )));
        }

        let category_name = field(columns.category);
        if category_name.is_empty() {
            return Err(AppError::ValidationFailed(format!(
                "Row {}: plan category is empty",
                row
            )));
        }

        let sum = parse_sum(field(columns.sum))
            .map_err(|reason| AppError::ValidationFailed(format!("Row {}: {}", row, reason)))?;

        if !seen.insert((period, category_name.to_string())) {
            return Err(AppError::ValidationFailed(format!(
                "Row {}: plan for {} and category '{}' appears twice in the file",
                row,
                period.format("%Y-%m"),
                category_name
            )));
        }

        plans.push(NewPlan {
            row,
            period,
            category_name: category_name.to_string(),
            sum,
        });
    }

    if plans.is_empty() {
        return Err(AppError::ValidationFailed(
            "The file contains no plan rows".to_string(),
        ));
    }

    Ok(plans)
}

fn is_workbook(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC) || data.starts_with(OLE_MAGIC)
}

fn read_workbook(data: &[u8]) -> Result<Sheet, AppError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(data.to_vec()))
        .map_err(|e| AppError::ParseFailed(format!("Cannot open workbook: {}", e)))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ParseFailed("The workbook has no sheets".to_string()))?
        .map_err(|e| AppError::ParseFailed(format!("Cannot read first sheet: {}", e)))?;

    let mut rows = range
        .rows()
        .map(|cells| cells.iter().map(cell_text).collect::<Vec<_>>());
    let headers = rows
        .next()
        .ok_or_else(|| AppError::ParseFailed("Cannot read header row: sheet is empty".to_string()))?;

    Ok(Sheet {
        headers,
        rows: rows.collect(),
    })
}

fn read_delimited(data: &[u8]) -> Result<Sheet, AppError> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);

    let mut reader = ReaderBuilder::new()
        .delimiter(detect_delimiter(data))
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| AppError::ParseFailed(format!("Cannot read header row: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| AppError::ParseFailed(format!("Row {}: {}", index + 1, e)))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Sheet { headers, rows })
}

/// Render a workbook cell the way a CSV export would show it
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(value) | Data::DateTimeIso(value) | Data::DurationIso(value) => {
            value.trim().to_string()
        }
        Data::Int(value) => value.to_string(),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", *value as i64)
        }
        Data::Float(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => excel_serial_date(value.as_f64())
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    }
}

/// Calendar date of an Excel 1900-system serial number
fn excel_serial_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(Duration::days(serial.floor() as i64))
}

fn detect_delimiter(data: &[u8]) -> u8 {
    let header = data.split(|b| *b == b'\n').next().unwrap_or_default();
    if header.contains(&b'\t') {
        b'\t'
    } else if header.contains(&b';') && !header.contains(&b',') {
        b';'
    } else {
        b','
    }
}

fn parse_month(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|datetime| datetime.date())
        })
}

fn parse_sum(value: &str) -> Result<i64, String> {
    if value.is_empty() {
        return Err("sum is empty".to_string());
    }

    let amount: Decimal = value
        .parse()
        .map_err(|_| format!("cannot read sum '{}'", value))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(format!("sum must not be negative, got {}", value));
    }
    if !amount.fract().is_zero() {
        return Err(format!("sum must be a whole number, got {}", value));
    }

    i64::try_from(amount).map_err(|_| format!("sum {} is out of range", value))
}
