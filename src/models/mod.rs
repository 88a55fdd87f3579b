mod expense;
mod summary;

pub use expense::ExpenseRecord;
pub use summary::{CategorySummary, Mode, Rgb, WindowTotals};

#[cfg(test)]
mod tests;
