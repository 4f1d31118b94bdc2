use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{ApiClient, ListPage, ResultInfo};
use crate::import::error::{ImportError, ImportResult};
use crate::import::resource::Endpoint;

pub const DEFAULT_API_URL: &str = "https://api.cloudflare.com/client/v4";

const USER_AGENT: &str = concat!("cf-import/", env!("CARGO_PKG_VERSION"));

/// API credentials
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Scoped API token sent as a bearer token
    Token(String),
    /// Legacy global API key
    ApiKey { email: String, key: String },
}

impl Credentials {
    /// Pick credentials from whatever was configured, token first
    pub fn resolve(
        token: Option<&str>,
        email: Option<&str>,
        key: Option<&str>,
    ) -> ImportResult<Self> {
        fn non_empty(value: Option<&str>) -> Option<&str> {
            value.map(str::trim).filter(|v| !v.is_empty())
        }

        if let Some(token) = non_empty(token) {
            return Ok(Credentials::Token(token.to_string()));
        }

        match (non_empty(email), non_empty(key)) {
            (Some(email), Some(key)) => Ok(Credentials::ApiKey {
                email: email.to_string(),
                key: key.to_string(),
            }),
            _ => Err(ImportError::MissingCredentials),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Token(_) => write!(f, "Token(***)"),
            Credentials::ApiKey { email, .. } => write!(f, "ApiKey {{ email: {}, key: *** }}", email),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    #[serde(default)]
    result: Value,
    #[serde(default)]
    result_info: Option<ResultInfo>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

impl Envelope {
    fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return "no error details returned".to_string();
        }

        self.errors
            .iter()
            .map(|e| format!("{} (code {})", e.message, e.code))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Decode a v4 response body into a list page
fn parse_list_page(status: u16, body: &str) -> Result<ListPage> {
    let envelope: Envelope = serde_json::from_str(body)
        .with_context(|| format!("Unexpected response body (HTTP {})", status))?;

    if !(200..300).contains(&status) || !envelope.success {
        bail!("HTTP {}: {}", status, envelope.error_summary());
    }

    let records = match envelope.result {
        Value::Array(records) => records,
        Value::Null => Vec::new(),
        other => bail!("Expected a list of records, got: {}", other),
    };

    Ok(ListPage {
        records,
        result_info: envelope.result_info,
    })
}

/// Real API client using reqwest
pub struct ReqwestApiClient {
    client: reqwest::blocking::Client,
    base_url: Url,
    credentials: Credentials,
}

impl ReqwestApiClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        // Url::join drops the last path segment unless it ends with a slash
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .with_context(|| format!("Invalid API URL: {}", base_url))?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    fn endpoint_url(&self, endpoint: &Endpoint) -> Result<Url> {
        let mut url = self
            .base_url
            .join(endpoint.path.trim_start_matches('/'))
            .with_context(|| format!("Invalid endpoint path: {}", endpoint.path))?;

        if !endpoint.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &endpoint.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

impl ApiClient for ReqwestApiClient {
    fn list(&self, endpoint: &Endpoint) -> Result<ListPage> {
        let url = self.endpoint_url(endpoint)?;
        debug!(url = %url, "listing resources");

        let request = self.client.get(url.clone());
        let request = match &self.credentials {
            Credentials::Token(token) => request.bearer_auth(token),
            Credentials::ApiKey { email, key } => request
                .header("X-Auth-Email", email)
                .header("X-Auth-Key", key),
        };

        let response = request
            .send()
            .with_context(|| format!("Failed to fetch URL: {}", url))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .with_context(|| format!("Failed to read response body from: {}", url))?;

        let page = parse_list_page(status, &body)?;
        debug!(url = %url, records = page.records.len(), "listed resources");

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_prefer_token() {
        let creds = Credentials::resolve(Some("tok"), Some("a@b.c"), Some("key")).unwrap();
        assert_eq!(creds, Credentials::Token("tok".to_string()));
    }

    #[test]
    fn test_credentials_api_key() {
        let creds = Credentials::resolve(None, Some("a@b.c"), Some("key")).unwrap();
        assert!(matches!(creds, Credentials::ApiKey { ref email, .. } if email == "a@b.c"));
    }

    #[test]
    fn test_credentials_trim_whitespace() {
        let creds = Credentials::resolve(Some("  tok \n"), None, None).unwrap();
        assert_eq!(creds, Credentials::Token("tok".to_string()));

        let creds = Credentials::resolve(Some(""), Some(" a@b.c "), Some(" key ")).unwrap();
        assert_eq!(
            creds,
            Credentials::ApiKey {
                email: "a@b.c".to_string(),
                key: "key".to_string(),
            }
        );
    }

    #[test]
    fn test_credentials_missing() {
        let err = Credentials::resolve(Some(" "), Some("a@b.c"), None).unwrap_err();
        assert!(matches!(err, ImportError::MissingCredentials));
    }

    #[test]
    fn test_credentials_debug_hides_secrets() {
        let creds = Credentials::ApiKey {
            email: "a@b.c".to_string(),
            key: "secret".to_string(),
        };
        assert!(!format!("{:?}", creds).contains("secret"));
        assert!(!format!("{:?}", Credentials::Token("secret".to_string())).contains("secret"));
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let client = ReqwestApiClient::new(DEFAULT_API_URL, Credentials::Token("t".into())).unwrap();
        let url = client
            .endpoint_url(&Endpoint::new("zones/z1/dns_records"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.cloudflare.com/client/v4/zones/z1/dns_records"
        );
    }

    #[test]
    fn test_endpoint_url_with_query() {
        let client =
            ReqwestApiClient::new("http://localhost:8080/v4/", Credentials::Token("t".into()))
                .unwrap();
        let url = client
            .endpoint_url(&Endpoint::new("certificates").with_query("zone_id", "z1"))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v4/certificates?zone_id=z1");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ReqwestApiClient::new("not a url", Credentials::Token("t".into())).is_err());
    }

    #[test]
    fn test_parse_list_page() {
        let body = r#"{
            "success": true,
            "errors": [],
            "result": [{"id": "a"}, {"id": "b"}],
            "result_info": {"page": 1, "per_page": 20, "total_pages": 2, "count": 20, "total_count": 40}
        }"#;
        let page = parse_list_page(200, body).unwrap();
        assert_eq!(page.records.len(), 2);
        assert!(page.is_truncated());
    }

    #[test]
    fn test_parse_list_page_api_error() {
        let body = r#"{"success": false, "errors": [{"code": 10000, "message": "Authentication error"}], "result": null}"#;
        let err = parse_list_page(403, body).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("Authentication error (code 10000)"));
    }

    #[test]
    fn test_parse_list_page_rejects_object_result() {
        let body = r#"{"success": true, "errors": [], "result": {"id": "a"}}"#;
        assert!(parse_list_page(200, body).is_err());
    }

    #[test]
    fn test_parse_list_page_invalid_json() {
        assert!(parse_list_page(502, "<html>bad gateway</html>").is_err());
    }
}
