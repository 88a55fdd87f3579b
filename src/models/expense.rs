use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;

/// A single recorded expense. Immutable once created; aggregation only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDateTime,
}

impl ExpenseRecord {
    pub fn new(amount: Decimal, category: impl Into<String>, date: NaiveDateTime) -> Self {
        Self {
            amount,
            category: category.into(),
            date,
        }
    }

    /// Parse user input of the form `<amount> <category> [YYYY-MM-DD [HH:MM]]`.
    ///
    /// A missing date means `now`; a date without a time keeps `now`'s time of day.
    pub fn parse_entry(input: &str, now: NaiveDateTime) -> Result<Self> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let (amount_str, category) = match parts.as_slice() {
            [amount, category, ..] => (*amount, *category),
            _ => bail!("Expected: <amount> <category> [YYYY-MM-DD [HH:MM]]"),
        };

        let amount = Decimal::from_str(amount_str.replace(',', ".").as_str())
            .with_context(|| format!("Invalid amount: {amount_str}"))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            bail!("Amount must not be negative: {amount_str}");
        }

        let date = match &parts[2..] {
            [] => now,
            [day] => parse_day(day)?.and_time(now.time()),
            [day, time] => parse_day(day)?.and_time(
                NaiveTime::parse_from_str(time, "%H:%M")
                    .with_context(|| format!("Invalid time: {time}. Use HH:MM"))?,
            ),
            _ => bail!("Too many arguments: {input}"),
        };

        Ok(Self::new(amount, category, date))
    }

    pub fn is_same_day(&self, other: NaiveDateTime) -> bool {
        self.date.day() == other.day() && self.is_same_month(other)
    }

    pub fn is_same_month(&self, other: NaiveDateTime) -> bool {
        self.date.month() == other.month() && self.is_same_year(other)
    }

    pub fn is_same_year(&self, other: NaiveDateTime) -> bool {
        self.date.year() == other.year()
    }
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {s}. Use YYYY-MM-DD"))
}
