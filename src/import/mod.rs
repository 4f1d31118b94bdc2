//! Resource Import Module
//!
//! Turns live Cloudflare resources into `terraform import` commands:
//!
//! - `resource` is the registry of supported types (template, scope, endpoint)
//! - `template` parses composite ID templates and holds the format table
//! - `resolver` renders one import line per resource
//! - `fetch` lists resource identifiers through the API client
//!
//! # Output
//!
//! ```text
//! terraform import cloudflare_record.terraform_managed_resource_<id> <zone_id>/<id>
//! ```

pub mod error;
pub mod fetch;
pub mod resolver;
pub mod resource;
pub mod scope;
pub mod template;

pub use error::{ImportError, ImportResult};
pub use fetch::ResourceFetcher;
pub use resolver::CompositeIdResolver;
pub use resource::ResourceType;
pub use scope::Scope;
pub use template::FormatTable;
