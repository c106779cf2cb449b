/*!
# BBQ 2026 Planning Site

A small server-rendered event website, built in Rust.

## Overview

The site shows the attendee, potluck, shopping and accounting lists for the
BBQ 2026 event. The data lives in a published Google Spreadsheet; every page
load exports the configured sheet tabs as CSV, parses them and renders the
tables server-side. Access is gated behind a session-scoped password check.

## Architecture

- **csv** - quote-aware CSV parsing of the spreadsheet export
- **fetcher** - per-sheet CSV export fetches over HTTP
- **render** - mapping parsed tables onto page sections, with status-label
  styling, placeholder rows and ragged-row padding
- **accounting** - the accounting sheet's second-column total
- **gate** - SHA-256 password check and the session unlock cookie
- **ui** - navigation highlighting and entrance reveal as pure functions of
  viewport state
- **config** - one immutable configuration struct (spreadsheet id, sheet
  map, password digest)
- **app** - routing, concurrent sheet loading and page assembly

## Behavior notes

- All sheet fetches run concurrently and settle independently; a failed
  fetch renders a localized placeholder row in that table only.
- The CSV parser is total: malformed input degrades into odd cell contents
  rather than an error.
- The gate is cosmetic. The expected digest ships with the application, so
  this is not an access-control boundary.
*/

pub mod accounting;
pub mod app;
pub mod config;
pub mod csv;
pub mod error;
pub mod fetcher;
pub mod gate;
pub mod render;
pub mod ui;

pub use config::{SheetDescriptor, SiteConfig};
pub use csv::{Row, Table, parse_csv};
pub use fetcher::{FetchError, SheetClient};
