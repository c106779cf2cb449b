//! Site configuration.
//!
//! Everything that was an ambient constant in the original page (spreadsheet
//! id, sheet map, password digest) lives in one immutable [`SiteConfig`]
//! handed to the components at construction. The defaults carry the BBQ 2026
//! values; only the bind address and spreadsheet id can be overridden from
//! the environment.

use std::env;

use log::info;

/// Placeholder value used before a real spreadsheet id is configured.
///
/// While the id still holds this value, every table renders the localized
/// "not configured" message instead of attempting a fetch.
pub const SHEET_ID_PLACEHOLDER: &str = "YOUR_SHEET_ID_HERE";

/// One sheet tab of the source spreadsheet and where it lands on the page.
#[derive(Debug, Clone)]
pub struct SheetDescriptor {
    /// Stable key, used as the section id and in the refresh API path.
    pub key: &'static str,

    /// Tab name in the source spreadsheet (also the section heading).
    pub sheet_name: &'static str,

    /// Element id of the target table.
    pub table_id: &'static str,

    /// Element id of the "edit in spreadsheet" link.
    pub edit_link_id: &'static str,

    /// Tab index, used for the `#gid=` fragment of the edit link.
    pub gid: u32,

    /// Static header labels; their count fixes the rendered column count.
    pub columns: &'static [&'static str],

    /// Whether this sheet feeds the accounting total display.
    pub accounting: bool,
}

/// Immutable configuration for the whole site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,

    /// Spreadsheet host, e.g. `https://docs.google.com`.
    pub spreadsheet_host: String,

    /// Spreadsheet id (the part between `/d/` and `/edit` in its URL).
    pub sheet_id: String,

    /// Lowercase SHA-256 hex digest of the gate password. Embedded in the
    /// delivered page flow and therefore not a security boundary.
    pub password_digest: String,

    /// The sheets to fetch and render, in page order.
    pub sheets: Vec<SheetDescriptor>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            bind_addr: "127.0.0.1:3000".to_string(),
            spreadsheet_host: "https://docs.google.com".to_string(),
            sheet_id: SHEET_ID_PLACEHOLDER.to_string(),
            // sha256("yakiniku")
            password_digest: "a87401bd13cc7a67e4b875556f5f4ba59e0fdcf9150101b2e98c70111819f45c"
                .to_string(),
            sheets: vec![
                SheetDescriptor {
                    key: "attendance",
                    sheet_name: "出欠リスト",
                    table_id: "attendance-table",
                    edit_link_id: "attendance-edit-link",
                    gid: 0,
                    columns: &["名前", "出欠", "コメント"],
                    accounting: false,
                },
                SheetDescriptor {
                    key: "potluck",
                    sheet_name: "持ち寄りリスト",
                    table_id: "potluck-table",
                    edit_link_id: "potluck-edit-link",
                    gid: 1,
                    columns: &["名前", "持ち寄り品", "メモ"],
                    accounting: false,
                },
                SheetDescriptor {
                    key: "shopping",
                    sheet_name: "買い物リスト",
                    table_id: "shopping-table",
                    edit_link_id: "shopping-edit-link",
                    gid: 2,
                    columns: &["品目", "担当", "状況"],
                    accounting: false,
                },
                SheetDescriptor {
                    key: "accounting",
                    sheet_name: "会計",
                    table_id: "accounting-table",
                    edit_link_id: "accounting-edit-link",
                    gid: 3,
                    columns: &["項目", "金額", "備考"],
                    accounting: true,
                },
            ],
        }
    }
}

impl SiteConfig {
    /// Load the configuration, applying environment overrides.
    ///
    /// `BBQ_BIND` overrides the bind address and `BBQ_SHEET_ID` the
    /// spreadsheet id; everything else is fixed at compile time.
    pub fn load() -> Self {
        let mut config = SiteConfig::default();
        config.bind_addr = try_var("BBQ_BIND", &config.bind_addr);
        config.sheet_id = try_var("BBQ_SHEET_ID", &config.sheet_id);
        config
    }

    /// Whether a real spreadsheet id has been configured.
    pub fn is_configured(&self) -> bool {
        self.sheet_id != SHEET_ID_PLACEHOLDER && !self.sheet_id.is_empty()
    }

    /// Look up a sheet descriptor by its stable key.
    pub fn sheet(&self, key: &str) -> Option<&SheetDescriptor> {
        self.sheets.iter().find(|s| s.key == key)
    }
}

fn try_var(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) => value,
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    }
}
