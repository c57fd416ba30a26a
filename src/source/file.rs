//! Fixture-file page source.
//!
//! A fixture is a JSON array of gateway-format pages. Each page carries the
//! `cursor` it answers; the first page has none. Useful for offline demos and
//! for tests that need a deterministic paged source.

use super::PageSource;
use crate::model::{Cursor, FetchError, Page};
use crate::parser::{convert_page, RawPage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Page source backed by a fixture file loaded once at construction.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    origin: String,
    pages: HashMap<Option<String>, Page>,
}

impl FixtureSource {
    /// Load a fixture file.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Io` if the file cannot be read and
    /// `FetchError::InvalidResponse` if it is not an array of pages.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let body = std::fs::read_to_string(&path)?;
        let mut source = Self::from_json(&body)?;
        source.origin = path.display().to_string();
        Ok(source)
    }

    /// Parse fixture JSON.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidResponse` if the body is not an array of
    /// pages.
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        let raw: Vec<RawPage> =
            serde_json::from_str(body).map_err(|e| FetchError::InvalidResponse {
                reason: e.to_string(),
            })?;

        let mut pages = HashMap::with_capacity(raw.len());
        for raw_page in raw {
            let cursor = raw_page.cursor.clone().filter(|c| !c.is_empty());
            let (page, errors) = convert_page(raw_page);
            for err in errors {
                warn!(cursor = ?cursor, error = %err, "Skipping malformed fixture item");
            }
            pages.insert(cursor, page);
        }

        Ok(Self {
            origin: "inline fixture".to_string(),
            pages,
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl PageSource for FixtureSource {
    fn fetch_page(&mut self, cursor: Option<&Cursor>) -> Result<Page, FetchError> {
        let key = cursor.map(|c| c.as_str().to_string());
        debug!(cursor = ?key, "Serving fixture page");
        self.pages
            .get(&key)
            .cloned()
            .ok_or_else(|| FetchError::UnknownCursor(key.unwrap_or_default()))
    }

    fn describe(&self) -> String {
        format!("fixture {}", self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const FIXTURE: &str = r#"[
        {"next": "p2", "results": [
            {"address": "0xA", "id": "1", "tokenName": "Kitties", "tokenSymbol": "CK"},
            {"address": "0xA", "id": "2", "tokenName": "Kitties", "tokenSymbol": "CK"}
        ]},
        {"cursor": "p2", "next": null, "results": [
            {"address": "0xB", "id": "3", "tokenName": "Punks", "tokenSymbol": "P"},
            {"id": "4"}
        ]}
    ]"#;

    #[test]
    fn first_page_has_no_cursor() {
        let mut source = FixtureSource::from_json(FIXTURE).unwrap();
        let page = source.fetch_page(None).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.next().map(Cursor::as_str), Some("p2"));
    }

    #[test]
    fn next_cursor_serves_following_page() {
        let mut source = FixtureSource::from_json(FIXTURE).unwrap();
        let cursor = Cursor::new("p2").unwrap();
        let page = source.fetch_page(Some(&cursor)).unwrap();
        assert_eq!(page.len(), 1, "Malformed item skipped");
        assert!(!page.has_more());
    }

    #[test]
    fn unknown_cursor_is_an_error() {
        let mut source = FixtureSource::from_json(FIXTURE).unwrap();
        let cursor = Cursor::new("nope").unwrap();
        assert_eq!(
            source.fetch_page(Some(&cursor)),
            Err(FetchError::UnknownCursor("nope".to_string()))
        );
    }

    #[test]
    fn rejects_non_array_fixture() {
        let result = FixtureSource::from_json(r#"{"results": []}"#);
        assert!(matches!(result, Err(FetchError::InvalidResponse { .. })));
    }

    #[test]
    fn load_reads_file_and_describes_origin() {
        let path = std::env::temp_dir().join("nftdeck_fixture_load_test.json");
        fs::write(&path, FIXTURE).unwrap();

        let source = FixtureSource::load(&path);

        let _ = fs::remove_file(&path);
        let source = source.unwrap();
        assert_eq!(source.page_count(), 2);
        assert!(source.describe().contains("nftdeck_fixture_load_test.json"));
    }
}
