use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;

use crate::config::{Overrides, Settings};
use crate::context::Context;
use crate::import::{ImportError, ImportResult, ResourceFetcher, ResourceType};

/// Output `terraform import` commands for existing resources
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Resource type(s) to import, e.g. cloudflare_record (comma-separated)
    #[arg(short = 't', long = "resource-type", required = true, value_delimiter = ',')]
    resource_types: Vec<String>,

    /// Command written at the start of every line
    #[arg(long, env = "CF_IMPORT_COMMAND_PREFIX")]
    import_command_prefix: Option<String>,

    /// Prefix for the generated Terraform resource names
    #[arg(long, env = "CF_IMPORT_RESOURCE_NAME_PREFIX")]
    resource_name_prefix: Option<String>,
}

impl ImportCommand {
    #[cfg(test)]
    pub fn new(resource_types: Vec<String>) -> Self {
        Self {
            resource_types,
            import_command_prefix: None,
            resource_name_prefix: None,
        }
    }

    pub fn execute(self, ctx: &Context, mut overrides: Overrides) -> Result<()> {
        overrides.import_command_prefix = self.import_command_prefix;
        overrides.resource_name_prefix = self.resource_name_prefix;

        let settings = Settings::load(ctx.fs.as_ref(), overrides)?;
        let scope = settings.scope()?;

        // Unknown types and scope mismatches fail before anything is printed
        let resource_types = self
            .resource_types
            .iter()
            .map(|name| ResourceType::from_name(name))
            .collect::<ImportResult<Vec<_>>>()?;
        for resource_type in &resource_types {
            resource_type.check_scope(&scope)?;
        }

        let fetcher = if resource_types.iter().all(ResourceType::is_synthesized) {
            ResourceFetcher::offline()
        } else {
            ResourceFetcher::new(ctx.api(&settings)?)
        };
        let resolver = ctx.resolver(&settings);

        for resource_type in resource_types {
            let fetched = fetcher.fetch_ids(resource_type, &scope)?;

            if fetched.truncated {
                ctx.output.warning(&format!(
                    "{}: the API returned more than one page, only the first page was imported",
                    resource_type
                ));
            }

            if fetched.ids.is_empty() {
                ctx.output
                    .info(&format!("No {} resources found", resource_type));
            }

            for id in &fetched.ids {
                let line = resolver
                    .resolve(resource_type.name(), id, &scope)
                    .with_context(|| format!("Failed to build import command for {}", id))?;
                ctx.output.line(&line).map_err(ImportError::from)?;
            }

            info!(
                resource_type = resource_type.name(),
                count = fetched.ids.len(),
                "import commands written"
            );
        }

        Ok(())
    }
}
