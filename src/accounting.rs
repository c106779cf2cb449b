//! Accounting sheet total.
//!
//! The accounting sheet holds currency-like strings ("¥12,000", "800円") in
//! its second column. The total strips every non-digit character per cell,
//! parses what remains and sums it; cells that do not survive the parse are
//! skipped, never an error.

use crate::csv::Table;

/// Sum the second column of a table's data rows.
///
/// The first row is treated as the header and skipped. For each remaining
/// row the second cell is reduced to its ASCII digits and parsed; rows whose
/// cell is missing or has no digits contribute nothing.
///
/// # Examples
/// ```
/// use bbq2026::accounting::total;
///
/// let table = vec![
///     vec!["項目".to_string(), "金額".to_string()],
///     vec!["肉".to_string(), "¥12,000".to_string()],
///     vec!["調整".to_string(), "abc".to_string()],
/// ];
/// assert_eq!(total(&table), 12_000);
/// ```
pub fn total(table: &Table) -> i64 {
    table
        .iter()
        .skip(1)
        .filter_map(|row| row.get(1))
        .filter_map(|cell| {
            let digits: String = cell.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse::<i64>().ok()
        })
        .sum()
}

/// The grouped total string for the display element, or `None` when the sum
/// is not positive (the display stays hidden).
pub fn total_display(table: &Table) -> Option<String> {
    let sum = total(table);
    if sum > 0 { Some(group_digits(sum)) } else { None }
}

/// Format a number with thousands separators ("1234567" -> "1,234,567").
pub fn group_digits(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::new();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
