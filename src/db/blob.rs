use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ExpenseRecord;

/// On-disk shape of one expense inside the JSON blob.
#[derive(Debug, Serialize, Deserialize)]
struct StoredExpense {
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    #[serde(default)]
    category: Option<String>,
    date: StoredDate,
}

/// Dates are written as epoch milliseconds; older blobs may hold ISO strings.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum StoredDate {
    Millis(i64),
    Text(String),
}

pub(crate) fn encode(records: &[ExpenseRecord]) -> Result<String> {
    let stored: Vec<StoredExpense> = records
        .iter()
        .map(|r| StoredExpense {
            amount: r.amount,
            category: Some(r.category.clone()),
            date: StoredDate::Millis(to_millis(r.date)),
        })
        .collect();
    serde_json::to_string(&stored).context("Failed to serialize expenses")
}

/// Parse a blob. A structurally invalid blob is an error; entries whose date
/// cannot be interpreted are dropped.
pub(crate) fn decode(blob: &str) -> Result<Vec<ExpenseRecord>> {
    let stored: Vec<StoredExpense> =
        serde_json::from_str(blob).context("Malformed expense blob")?;

    let mut records = Vec::with_capacity(stored.len());
    for entry in stored {
        match entry.date.to_local() {
            Some(date) => records.push(ExpenseRecord::new(
                entry.amount,
                entry.category.unwrap_or_default(),
                date,
            )),
            None => tracing::warn!(date = ?entry.date, "Skipping expense with unreadable date"),
        }
    }
    Ok(records)
}

impl StoredDate {
    fn to_local(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Millis(ms) => Local
                .timestamp_millis_opt(*ms)
                .single()
                .map(|dt| dt.naive_local()),
            Self::Text(text) => parse_date_text(text),
        }
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn to_millis(date: NaiveDateTime) -> i64 {
    match Local.from_local_datetime(&date).earliest() {
        Some(dt) => dt.timestamp_millis(),
        // Wall-clock times skipped by a DST change have no local instant.
        None => date.and_utc().timestamp_millis(),
    }
}
