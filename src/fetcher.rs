//! Fetching sheet data from the published spreadsheet.
//!
//! Each sheet tab is exported as CSV through the `gviz` endpoint and parsed
//! into a [`Table`]. One attempt per call: no retries, no timeout, no
//! caching. A failed fetch is reported per sheet and never affects the
//! others.

use thiserror::Error;

use crate::config::SiteConfig;
use crate::csv::{Table, parse_csv};

/// A single sheet fetch failure.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The export endpoint answered with a non-success status.
    #[error("sheet export failed with status {0}")]
    Status(u16),

    /// The request never produced a response.
    #[error("sheet export transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The in-process load task was cancelled or panicked before settling.
    #[error("sheet load task did not complete")]
    Canceled,
}

/// HTTP client bound to one spreadsheet.
#[derive(Clone)]
pub struct SheetClient {
    http: reqwest::Client,
    host: String,
    sheet_id: String,
}

impl SheetClient {
    /// Create a client for the configured spreadsheet.
    pub fn new(config: &SiteConfig) -> Self {
        SheetClient {
            http: reqwest::Client::new(),
            host: config.spreadsheet_host.clone(),
            sheet_id: config.sheet_id.clone(),
        }
    }

    /// CSV export URL for one sheet tab, with the tab name percent-encoded.
    pub fn export_url(&self, sheet_name: &str) -> String {
        format!(
            "{}/spreadsheets/d/{}/gviz/tq?tqx=out:csv&sheet={}",
            self.host,
            self.sheet_id,
            urlencoding::encode(sheet_name)
        )
    }

    /// Edit URL for one sheet tab (presentational link only).
    pub fn edit_url(&self, gid: u32) -> String {
        format!("{}/spreadsheets/d/{}/edit#gid={}", self.host, self.sheet_id, gid)
    }

    /// Fetch one sheet tab and parse its CSV export.
    ///
    /// A non-2xx status fails with [`FetchError::Status`]; transport errors
    /// surface as [`FetchError::Transport`]. The body is decoded as text and
    /// handed to the parser, which never fails.
    pub async fn fetch_sheet(&self, sheet_name: &str) -> Result<Table, FetchError> {
        let url = self.export_url(sheet_name);

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let csv = response.text().await?;
        Ok(parse_csv(&csv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use tokio::net::TcpListener;

    fn client_for(host: &str, sheet_id: &str) -> SheetClient {
        let mut config = SiteConfig::default();
        config.spreadsheet_host = host.to_string();
        config.sheet_id = sheet_id.to_string();
        SheetClient::new(&config)
    }

    #[test]
    fn export_url_percent_encodes_sheet_name() {
        let client = client_for("https://docs.google.com", "abc123");
        let url = client.export_url("買い物リスト");
        assert!(url.starts_with(
            "https://docs.google.com/spreadsheets/d/abc123/gviz/tq?tqx=out:csv&sheet="
        ));
        assert!(url.ends_with(
            "%E8%B2%B7%E3%81%84%E7%89%A9%E3%83%AA%E3%82%B9%E3%83%88"
        ));
    }

    #[test]
    fn edit_url_carries_tab_index() {
        let client = client_for("https://docs.google.com", "abc123");
        assert_eq!(
            client.edit_url(2),
            "https://docs.google.com/spreadsheets/d/abc123/edit#gid=2"
        );
    }

    /// Serve a fixed export response on an ephemeral port.
    async fn spawn_export_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn fetch_parses_export_body() {
        let router = Router::new().route(
            "/spreadsheets/d/test-sheet/gviz/tq",
            get(|| async { "名前,出欠\n山田,参加\n" }),
        );
        let host = spawn_export_server(router).await;

        let client = client_for(&host, "test-sheet");
        let table = client.fetch_sheet("出欠リスト").await.unwrap();

        assert_eq!(table, vec![vec!["名前", "出欠"], vec!["山田", "参加"]]);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let router = Router::new().route(
            "/spreadsheets/d/test-sheet/gviz/tq",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let host = spawn_export_server(router).await;

        let client = client_for(&host, "test-sheet");
        let err = client.fetch_sheet("出欠リスト").await.unwrap_err();

        match err {
            FetchError::Status(status) => assert_eq!(status, 500),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 1 is reserved and unbound; the connection is refused.
        let client = client_for("http://127.0.0.1:1", "test-sheet");
        let err = client.fetch_sheet("出欠リスト").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
