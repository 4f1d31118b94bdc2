use std::sync::{Arc, OnceLock};

use chrono::Utc;
use serde_json::Value;
use sha1::{Digest, Sha1};
use tracing::debug;

use super::error::{ImportError, ImportResult};
use super::resource::{ResourceType, Source};
use super::scope::Scope;
use crate::api::ApiClient;

/// Identifiers fetched for one resource type, in API order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedIds {
    pub ids: Vec<String>,
    /// The API reported further pages that were not requested
    pub truncated: bool,
}

/// Lists resource identifiers through the API client
pub struct ResourceFetcher {
    client: Option<Arc<dyn ApiClient>>,
    synthesized_id: OnceLock<String>,
}

impl ResourceFetcher {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self {
            client: Some(client),
            synthesized_id: OnceLock::new(),
        }
    }

    /// Fetcher for runs that only need synthesized identifiers
    pub fn offline() -> Self {
        Self {
            client: None,
            synthesized_id: OnceLock::new(),
        }
    }

    /// Fetch the identifiers of every resource of `resource_type` in `scope`
    pub fn fetch_ids(&self, resource_type: ResourceType, scope: &Scope) -> ImportResult<FetchedIds> {
        resource_type.check_scope(scope)?;

        let endpoint = match resource_type.source(scope) {
            Source::Synthesized => {
                return Ok(FetchedIds {
                    ids: vec![self.synthesized_id().to_string()],
                    truncated: false,
                });
            }
            Source::Api(endpoint) => endpoint,
        };

        let client = self.client.as_ref().ok_or(ImportError::MissingCredentials)?;
        let page = client
            .list(&endpoint)
            .map_err(|err| ImportError::FetchFailure {
                resource_type: resource_type.name().to_string(),
                message: format!("{:#}", err),
            })?;

        let truncated = page.is_truncated();
        let ids = page
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| resource_type.keeps_record(record))
            .map(|(index, record)| record_id(resource_type, index, record))
            .collect::<ImportResult<Vec<_>>>()?;

        debug!(
            resource_type = resource_type.name(),
            listed = page.records.len(),
            kept = ids.len(),
            "fetched identifiers"
        );

        Ok(FetchedIds { ids, truncated })
    }

    /// Pseudo-identifier for settings that have no remote ID
    ///
    /// Lowercase hex SHA-1 of the current UTC timestamp (40 characters, where
    /// cf-terraforming emits a 32 character MD5). Generated once, so every call
    /// within a process agrees.
    fn synthesized_id(&self) -> &str {
        self.synthesized_id.get_or_init(|| {
            let mut hasher = Sha1::new();
            hasher.update(Utc::now().to_string().as_bytes());
            format!("{:x}", hasher.finalize())
        })
    }
}

/// Extract the `id` string from a raw record
fn record_id(resource_type: ResourceType, index: usize, record: &Value) -> ImportResult<String> {
    let malformed = |reason: &str| ImportError::MalformedRecord {
        resource_type: resource_type.name().to_string(),
        index,
        reason: reason.to_string(),
    };

    match record.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::String(_)) => Err(malformed("'id' field is empty")),
        Some(_) => Err(malformed("'id' field is not a string")),
        None => Err(malformed("missing 'id' field")),
    }
}
