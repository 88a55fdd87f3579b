//! Pure aggregation over a snapshot of expense records.
//!
//! Nothing here touches storage or keeps state between calls: every function
//! takes the records and the reference instant explicitly and returns a fresh
//! result.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CategorySummary, ExpenseRecord, Mode, Rgb, WindowTotals};

const GREEN_SCALE: Decimal = Decimal::from_parts(255, 0, 0, false, 2); // 2.55
const RED_SCALE: Decimal = Decimal::from_parts(18, 0, 0, false, 1); // 1.8
const GREEN_MAX: u8 = 255;
const RED_MAX: u8 = 180;

/// Result of [`compute_category_totals`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryTotals {
    /// Ascending by amount; ties keep the order categories were first seen.
    pub summaries: Vec<CategorySummary>,
    pub total_amount: Decimal,
}

/// Round to cents, half away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Add and round to cents. Sums past the `Decimal` range stick at the bound.
fn add_cents(total: Decimal, amount: Decimal) -> Decimal {
    round_cents(total.saturating_add(amount))
}

/// Day, month and year sums for one category relative to `reference`.
///
/// The three buckets overlap: a record from today counts towards all of them.
/// Sums are not rounded and saturate at the `Decimal` bounds.
pub fn compute_window_totals(
    records: &[ExpenseRecord],
    category_id: &str,
    reference: NaiveDateTime,
) -> WindowTotals {
    records
        .iter()
        .filter(|r| r.category == category_id)
        .fold(WindowTotals::default(), |mut totals, r| {
            if r.is_same_day(reference) {
                totals.day = totals.day.saturating_add(r.amount);
            }
            if r.is_same_month(reference) {
                totals.month = totals.month.saturating_add(r.amount);
            }
            if r.is_same_year(reference) {
                totals.year = totals.year.saturating_add(r.amount);
            }
            totals
        })
}

/// First day of the window selected by `mode`.
///
/// Week windows start on the most recent Monday; a Sunday reference goes back
/// six days. The result may fall in the previous month.
pub fn window_start(mode: Mode, reference: NaiveDateTime) -> NaiveDate {
    let today = reference.date();
    match mode {
        Mode::Today => today,
        Mode::Week => {
            let back = u64::from(today.weekday().num_days_from_monday());
            today.checked_sub_days(Days::new(back)).unwrap_or(today)
        }
        Mode::Month => today.with_day(1).unwrap_or(today),
    }
}

/// Window filter: same month and year as `since`, day-of-month not earlier.
///
/// This compares the day number only, so a week that started in the previous
/// month admits nothing from the current one.
pub fn in_window(record: &ExpenseRecord, since: NaiveDate) -> bool {
    record.date.day() >= since.day()
        && record.date.month() == since.month()
        && record.date.year() == since.year()
}

/// Group records in the window by category and derive percentages and colors.
pub fn compute_category_totals(
    records: &[ExpenseRecord],
    mode: Mode,
    reference: NaiveDateTime,
) -> CategoryTotals {
    let since = window_start(mode, reference);

    let mut by_category: Vec<(&str, Decimal)> = Vec::new();
    let mut total_amount = Decimal::ZERO;

    for record in records.iter().filter(|r| in_window(r, since)) {
        match by_category
            .iter()
            .position(|(category, _)| *category == record.category)
        {
            Some(i) => by_category[i].1 = add_cents(by_category[i].1, record.amount),
            None => by_category.push((record.category.as_str(), round_cents(record.amount))),
        }
        total_amount = add_cents(total_amount, record.amount);
    }

    let mut summaries: Vec<CategorySummary> = by_category
        .into_iter()
        .map(|(category, amount)| {
            let percentage = percentage_of(amount, total_amount);
            CategorySummary {
                category: category.to_string(),
                amount,
                percentage,
                color: derive_color(percentage),
            }
        })
        .collect();
    summaries.sort_by(|a, b| a.amount.cmp(&b.amount));

    CategoryTotals {
        summaries,
        total_amount,
    }
}

/// `amount / total * 100`, or zero when the total is zero.
pub fn percentage_of(amount: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    amount
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Map a percentage to a red/green bar color; larger shares are redder.
///
/// Channels are clamped, so percentages outside `0..=100` still produce a
/// valid color.
pub fn derive_color(percentage: Decimal) -> Rgb {
    let green = scale_channel(
        Decimal::ONE_HUNDRED
            .saturating_sub(percentage)
            .saturating_mul(GREEN_SCALE),
        GREEN_MAX,
    );
    let red = scale_channel(percentage.saturating_mul(RED_SCALE), RED_MAX);
    Rgb::new(red, green, 0)
}

fn scale_channel(value: Decimal, max: u8) -> u8 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::ZERO, Decimal::from(max))
        .to_u8()
        .unwrap_or(0)
}

/// Total of the summaries whose category is not excluded, re-rounded after
/// each addition in summary order.
pub fn recompute_total_excluding(summaries: &[CategorySummary], excluded: &[String]) -> Decimal {
    summaries
        .iter()
        .filter(|s| !excluded.contains(&s.category))
        .fold(Decimal::ZERO, |total, s| add_cents(total, s.amount))
}
