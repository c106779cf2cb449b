//! Quote-aware CSV parsing for spreadsheet exports.
//!
//! The Google Sheets CSV export wraps most values in double quotes and may
//! embed commas and newlines inside quoted fields. This module implements a
//! single-pass scan over the exported text that handles quoting, doubled-quote
//! escapes and both `\n` and `\r\n` record terminators.

/// One parsed CSV record: an ordered list of trimmed cell strings.
pub type Row = Vec<String>;

/// The full parsed contents of one sheet.
pub type Table = Vec<Row>;

/// Parse a CSV document into rows of trimmed cell strings.
///
/// The scan keeps a single "inside quoted field" flag and one character of
/// lookahead; there is no backtracking. Behavior notes:
/// - Inside quotes, `""` decodes to one literal `"`; a single `"` closes the
///   field. Commas and newlines inside quotes are ordinary characters.
/// - `\r\n` is consumed as one line terminator, as is a lone `\n`. A `\r` not
///   followed by `\n` is kept as cell content.
/// - Every cell is trimmed of surrounding whitespace, including content that
///   was quoted. Padding inside quoted values does not survive.
/// - A row whose cells are all empty after trimming (e.g. a blank line) is
///   dropped, so blank lines never produce output rows.
/// - The parser is total: an unterminated quote at end of input simply ends
///   the field, and the in-progress cell/row is flushed.
///
/// # Arguments
/// * `csv` - The complete text of the CSV document
///
/// # Returns
/// * `Table` - All non-empty rows, in order
///
/// # Examples
/// ```
/// use bbq2026::csv::parse_csv;
///
/// let rows = parse_csv("名前,出欠\n\"山田, 太郎\",参加\n");
/// assert_eq!(rows[1], vec!["山田, 太郎", "参加"]);
/// ```
pub fn parse_csv(csv: &str) -> Table {
    let mut rows: Table = Vec::new();
    let mut row: Row = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let chars: Vec<char> = csv.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if in_quotes {
            if c == '"' && chars.get(i + 1) == Some(&'"') {
                current.push('"');
                i += 1;
            } else if c == '"' {
                in_quotes = false;
            } else {
                current.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == ',' {
            row.push(current.trim().to_string());
            current.clear();
        } else if c == '\n' || (c == '\r' && chars.get(i + 1) == Some(&'\n')) {
            row.push(current.trim().to_string());
            current.clear();
            push_if_nonempty(&mut rows, std::mem::take(&mut row));
            if c == '\r' {
                i += 1;
            }
        } else {
            current.push(c);
        }

        i += 1;
    }

    // Flush the last record when the input has no trailing newline.
    if !current.is_empty() || !row.is_empty() {
        row.push(current.trim().to_string());
        push_if_nonempty(&mut rows, row);
    }

    rows
}

/// Keep a completed row only if at least one cell is non-empty.
fn push_if_nonempty(rows: &mut Table, row: Row) {
    if row.iter().any(|cell| !cell.is_empty()) {
        rows.push(row);
    }
}
