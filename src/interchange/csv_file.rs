use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::io;
use std::path::Path;
use std::str::FromStr;

use crate::models::ExpenseRecord;

pub(crate) const HEADERS: [&str; 3] = ["date", "category", "amount"];
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write `records` as `date,category,amount` rows under a header line.
pub(crate) fn write_records<W: io::Write>(writer: W, records: &[ExpenseRecord]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)
        .context("Failed to write CSV header")?;

    for record in records {
        wtr.write_record([
            record.date.format(DATE_FORMAT).to_string(),
            record.category.clone(),
            record.amount.to_string(),
        ])
        .context("Failed to write CSV record")?;
    }

    wtr.flush().context("Failed to flush CSV output")?;
    Ok(records.len())
}

pub(crate) fn export_to_path(path: &Path, records: &[ExpenseRecord]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let count = write_records(file, records)?;
    tracing::info!(path = %path.display(), count, "Exported expenses");
    Ok(count)
}

/// Parse `date,category,amount` rows. The header line is optional; rows
/// with an empty date are skipped, any other malformed row fails the read.
pub(crate) fn read_records<R: io::Read>(reader: R) -> Result<Vec<ExpenseRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = result.context("Failed to read CSV record")?;
        let date_str = row.get(0).unwrap_or_default();

        if i == 0 && date_str.eq_ignore_ascii_case(HEADERS[0]) {
            continue;
        }
        if date_str.is_empty() {
            continue;
        }

        let date = parse_date(date_str)
            .with_context(|| format!("Row {}: failed to parse date '{date_str}'", i + 1))?;
        let category = row.get(1).unwrap_or_default();
        let amount = parse_amount(row.get(2).unwrap_or_default())
            .with_context(|| format!("Row {}: failed to parse amount", i + 1))?;

        records.push(ExpenseRecord::new(amount, category, date));
    }

    Ok(records)
}

pub(crate) fn import_from_path(path: &Path) -> Result<Vec<ExpenseRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let records = read_records(file)?;
    tracing::info!(path = %path.display(), count = records.len(), "Read expenses from CSV");
    Ok(records)
}

fn parse_date(s: &str) -> Result<NaiveDateTime> {
    for fmt in [DATE_FORMAT, "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(day.and_time(chrono::NaiveTime::MIN));
    }
    bail!("Could not parse date: {s}")
}

fn parse_amount(s: &str) -> Result<Decimal> {
    if s.is_empty() {
        bail!("Missing amount");
    }
    let amount = Decimal::from_str(s).with_context(|| format!("Failed to parse '{s}' as decimal"))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        bail!("Amount must not be negative: {s}");
    }
    Ok(amount)
}

#[cfg(test)]
#[path = "csv_file_tests.rs"]
mod tests;
