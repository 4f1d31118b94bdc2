use anyhow::Result;
use std::sync::Arc;

use crate::api::{ApiClient, ReqwestApiClient};
use crate::config::Settings;
use crate::import::{CompositeIdResolver, FormatTable};
use crate::traits::{FileSystem, Output, RealFileSystem, TerminalOutput};
#[cfg(test)]
use crate::traits::{MockFileSystem, MockOutput};

/// Application context that holds all dependencies for dependency injection
pub struct Context {
    pub fs: Arc<dyn FileSystem>,
    pub output: Arc<dyn Output>,
    pub formats: Arc<FormatTable>,
    /// Injected in tests, otherwise built from settings when a fetch needs it
    api: Option<Arc<dyn ApiClient>>,
}

impl Context {
    /// Create a new context with real implementations (for production use)
    pub fn new() -> Self {
        Self {
            fs: Arc::new(RealFileSystem),
            output: Arc::new(TerminalOutput),
            formats: Arc::new(FormatTable::builtin()),
            api: None,
        }
    }

    /// Create a test context with specific mock implementations
    #[cfg(test)]
    pub fn test_with(
        fs: Arc<dyn FileSystem>,
        output: Arc<dyn Output>,
        api: Arc<dyn ApiClient>,
    ) -> Self {
        Self {
            fs,
            output,
            formats: Arc::new(FormatTable::builtin()),
            api: Some(api),
        }
    }

    /// Create a new context with mock output and no API client
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            fs: Arc::new(MockFileSystem::new()),
            output: Arc::new(MockOutput::new()),
            formats: Arc::new(FormatTable::builtin()),
            api: None,
        }
    }

    /// Resolver configured with the prefixes from `settings`
    pub fn resolver(&self, settings: &Settings) -> CompositeIdResolver {
        CompositeIdResolver::new(
            Arc::clone(&self.formats),
            settings.import_command_prefix.clone(),
            settings.resource_name_prefix.clone(),
        )
    }

    /// API client, built from `settings` unless one was injected
    pub fn api(&self, settings: &Settings) -> Result<Arc<dyn ApiClient>> {
        if let Some(api) = &self.api {
            return Ok(Arc::clone(api));
        }

        let client = ReqwestApiClient::new(&settings.api_url, settings.credentials()?)?;
        Ok(Arc::new(client))
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Context {
    fn clone(&self) -> Self {
        Self {
            fs: Arc::clone(&self.fs),
            output: Arc::clone(&self.output),
            formats: Arc::clone(&self.formats),
            api: self.api.clone(),
        }
    }
}
