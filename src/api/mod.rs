//! Cloudflare API access
//!
//! Only listing is needed: every supported resource type is fetched with a
//! single GET against a v4 list endpoint.

pub mod client;

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;

use crate::import::resource::Endpoint;

pub use client::{Credentials, ReqwestApiClient};
#[cfg(test)]
pub use mock::MockApiClient;

/// Paging block returned alongside list results
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResultInfo {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
}

impl ResultInfo {
    /// Whether pages after the current one exist
    pub fn has_more_pages(&self) -> bool {
        match (self.page, self.total_pages) {
            (Some(page), Some(total)) => page < total,
            (None, Some(total)) => total > 1,
            _ => false,
        }
    }
}

/// One page of raw records from a list endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPage {
    pub records: Vec<Value>,
    pub result_info: Option<ResultInfo>,
}

impl ListPage {
    #[cfg(test)]
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records,
            result_info: None,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.result_info
            .as_ref()
            .is_some_and(ResultInfo::has_more_pages)
    }
}

/// Trait for provider API access, allowing for mocking in tests
pub trait ApiClient: Send + Sync {
    /// List the records behind an endpoint (first page only)
    fn list(&self, endpoint: &Endpoint) -> Result<ListPage>;
}

#[cfg(test)]
mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock API client returning canned pages keyed by endpoint path
    pub struct MockApiClient {
        pages: Mutex<HashMap<String, Result<ListPage, String>>>,
        requests: Mutex<Vec<Endpoint>>,
    }

    impl MockApiClient {
        pub fn new() -> Self {
            Self {
                pages: Mutex::new(HashMap::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Serve `page` for requests to `path`
        pub fn with_page(self, path: &str, page: ListPage) -> Self {
            self.pages
                .lock()
                .unwrap()
                .insert(path.to_string(), Ok(page));
            self
        }

        /// Serve plain records for requests to `path`
        pub fn with_records(self, path: &str, records: Vec<Value>) -> Self {
            self.with_page(path, ListPage::new(records))
        }

        /// Fail requests to `path` with `message`
        pub fn with_failure(self, path: &str, message: &str) -> Self {
            self.pages
                .lock()
                .unwrap()
                .insert(path.to_string(), Err(message.to_string()));
            self
        }

        /// Get every endpoint requested so far
        pub fn requests(&self) -> Vec<Endpoint> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Default for MockApiClient {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ApiClient for MockApiClient {
        fn list(&self, endpoint: &Endpoint) -> Result<ListPage> {
            self.requests.lock().unwrap().push(endpoint.clone());

            match self.pages.lock().unwrap().get(&endpoint.path) {
                Some(Ok(page)) => Ok(page.clone()),
                Some(Err(message)) => Err(anyhow::anyhow!("{}", message)),
                None => Err(anyhow::anyhow!("No mock response for {}", endpoint.path)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_more_pages() {
        let info = ResultInfo {
            page: Some(1),
            total_pages: Some(3),
            ..Default::default()
        };
        assert!(info.has_more_pages());

        let last = ResultInfo {
            page: Some(3),
            total_pages: Some(3),
            ..Default::default()
        };
        assert!(!last.has_more_pages());
        assert!(!ResultInfo::default().has_more_pages());
    }

    #[test]
    fn test_list_page_without_info_is_complete() {
        assert!(!ListPage::new(Vec::new()).is_truncated());
    }
}
