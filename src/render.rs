//! Turning parsed sheet tables into page sections.
//!
//! The renderer is pure: it maps a parsed [`Table`] (or a fetch failure)
//! onto a [`SectionView`] that the Handlebars template walks. The first row
//! of every table is the sheet's own header and is dropped; the page renders
//! its static header labels instead.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::accounting;
use crate::config::SheetDescriptor;
use crate::csv::Table;
use crate::fetcher::{FetchError, SheetClient};

/// Placeholder shown when a sheet has no data rows.
pub const MSG_NO_DATA: &str = "まだデータがありません";

/// Placeholder shown when a sheet's fetch failed.
pub const MSG_FETCH_FAILED: &str = "データの読み込みに失敗しました";

/// Placeholder shown while the spreadsheet id is unconfigured.
pub const MSG_NOT_CONFIGURED: &str = "スプレッドシートが未設定です";

/// Column count used when a section declares no static header.
pub const FALLBACK_COL_COUNT: usize = 3;

lazy_static! {
    /// Fixed vocabulary of status labels and their styling classes.
    ///
    /// Matching is exact and case-sensitive; anything outside the vocabulary
    /// renders unstyled. Presentation only, not validation.
    static ref STATUS_CLASSES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("参加", "status-attending");
        m.insert("不参加", "status-absent");
        m.insert("完了", "status-done");
        m.insert("未定", "status-pending");
        m
    };
}

/// One rendered table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellView {
    /// Cell text (template-escaped when rendered).
    pub text: String,

    /// Styling class from the status vocabulary, if the text matches.
    pub class: Option<&'static str>,
}

/// Everything the template needs to render one page section.
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub key: &'static str,
    pub title: &'static str,
    pub table_id: &'static str,
    pub edit_link_id: &'static str,
    pub edit_url: String,
    pub columns: Vec<&'static str>,
    pub col_count: usize,
    /// Data rows, each padded to exactly `col_count` cells. Empty when the
    /// placeholder `message` should render instead.
    pub rows: Vec<Vec<CellView>>,
    pub message: Option<&'static str>,
    /// Locale-grouped accounting total, only when positive.
    pub total: Option<String>,
}

/// Styling class for a cell value, if it is in the status vocabulary.
pub fn status_class(text: &str) -> Option<&'static str> {
    STATUS_CLASSES.get(text).copied()
}

/// Drop the header row and shape the data rows for rendering.
///
/// Every row is padded (or truncated) to exactly `col_count` cells; missing
/// trailing cells render as empty strings. Ragged rows are tolerated, never
/// an error.
pub fn prepare_rows(table: &Table, col_count: usize) -> Vec<Vec<CellView>> {
    table
        .iter()
        .skip(1)
        .map(|row| {
            (0..col_count)
                .map(|i| {
                    let text = row.get(i).cloned().unwrap_or_default();
                    let class = status_class(&text);
                    CellView { text, class }
                })
                .collect()
        })
        .collect()
}

/// Build the view for one section from its fetch outcome.
///
/// A fetch failure collapses to the localized failure placeholder; an empty
/// table (header only, or nothing at all) collapses to the no-data
/// placeholder. Other sheets are unaffected either way.
pub fn build_section(
    descriptor: &SheetDescriptor,
    client: &SheetClient,
    outcome: Result<Table, FetchError>,
) -> SectionView {
    let col_count = if descriptor.columns.is_empty() {
        FALLBACK_COL_COUNT
    } else {
        descriptor.columns.len()
    };

    let (rows, message, total) = match outcome {
        Ok(table) => {
            let rows = prepare_rows(&table, col_count);
            if rows.is_empty() {
                (rows, Some(MSG_NO_DATA), None)
            } else {
                let total = if descriptor.accounting {
                    accounting::total_display(&table)
                } else {
                    None
                };
                (rows, None, total)
            }
        }
        Err(_) => (Vec::new(), Some(MSG_FETCH_FAILED), None),
    };

    SectionView {
        key: descriptor.key,
        title: descriptor.sheet_name,
        table_id: descriptor.table_id,
        edit_link_id: descriptor.edit_link_id,
        edit_url: client.edit_url(descriptor.gid),
        columns: descriptor.columns.to_vec(),
        col_count,
        rows,
        message,
        total,
    }
}

/// Build the placeholder view shown while the spreadsheet is unconfigured.
pub fn unconfigured_section(descriptor: &SheetDescriptor, client: &SheetClient) -> SectionView {
    let col_count = if descriptor.columns.is_empty() {
        FALLBACK_COL_COUNT
    } else {
        descriptor.columns.len()
    };

    SectionView {
        key: descriptor.key,
        title: descriptor.sheet_name,
        table_id: descriptor.table_id,
        edit_link_id: descriptor.edit_link_id,
        edit_url: client.edit_url(descriptor.gid),
        columns: descriptor.columns.to_vec(),
        col_count,
        rows: Vec::new(),
        message: Some(MSG_NOT_CONFIGURED),
        total: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn table(rows: &[&[&str]]) -> Table {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn test_client() -> SheetClient {
        SheetClient::new(&SiteConfig::default())
    }

    fn descriptor() -> SheetDescriptor {
        SiteConfig::default().sheet("shopping").unwrap().clone()
    }

    #[test]
    fn header_row_is_dropped() {
        let rows = prepare_rows(&table(&[&["品目", "担当", "状況"], &["肉", "山田", "完了"]]), 3);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0].text, "肉");
    }

    #[test]
    fn ragged_rows_pad_with_empty_cells() {
        let rows = prepare_rows(&table(&[&["a", "b", "c"], &["x"]]), 3);
        assert_eq!(rows[0][1], CellView { text: String::new(), class: None });
        assert_eq!(rows[0][2], CellView { text: String::new(), class: None });
    }

    #[test]
    fn long_rows_truncate_to_column_count() {
        let rows = prepare_rows(&table(&[&["h1", "h2"], &["a", "b", "extra"]]), 2);
        assert_eq!(rows[0].len(), 2);
    }

    #[test]
    fn status_vocabulary_is_exact_and_case_sensitive() {
        assert_eq!(status_class("参加"), Some("status-attending"));
        assert_eq!(status_class("不参加"), Some("status-absent"));
        assert_eq!(status_class("完了"), Some("status-done"));
        assert_eq!(status_class("未定"), Some("status-pending"));
        assert_eq!(status_class("参加 "), None);
        assert_eq!(status_class("欠席"), None);
        assert_eq!(status_class(""), None);
    }

    #[test]
    fn header_only_table_shows_no_data_message() {
        let section = build_section(
            &descriptor(),
            &test_client(),
            Ok(table(&[&["品目", "担当", "状況"]])),
        );
        assert!(section.rows.is_empty());
        assert_eq!(section.message, Some(MSG_NO_DATA));
    }

    #[test]
    fn fetch_failure_shows_failure_message() {
        let section = build_section(
            &descriptor(),
            &test_client(),
            Err(FetchError::Status(502)),
        );
        assert!(section.rows.is_empty());
        assert_eq!(section.message, Some(MSG_FETCH_FAILED));
    }

    #[test]
    fn fallback_column_count_without_static_header() {
        let mut descriptor = descriptor();
        descriptor.columns = &[];
        let section = build_section(
            &descriptor,
            &test_client(),
            Ok(table(&[&["h"], &["only-cell"]])),
        );
        assert_eq!(section.col_count, FALLBACK_COL_COUNT);
        assert_eq!(section.rows[0].len(), FALLBACK_COL_COUNT);
    }

    #[test]
    fn accounting_section_carries_total() {
        let descriptor = SiteConfig::default().sheet("accounting").unwrap().clone();
        let section = build_section(
            &descriptor,
            &test_client(),
            Ok(table(&[&["項目", "金額", "備考"], &["肉", "¥12,000", ""], &["炭", "800", ""]])),
        );
        assert_eq!(section.total.as_deref(), Some("12,800"));
    }

    #[test]
    fn unconfigured_placeholder() {
        let section = unconfigured_section(&descriptor(), &test_client());
        assert_eq!(section.message, Some(MSG_NOT_CONFIGURED));
        assert!(section.rows.is_empty());
    }
}
