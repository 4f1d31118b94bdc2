use anyhow::Result;
use clap::Args;

use crate::context::Context;
use crate::import::{ImportError, ResourceType, Scope};

/// List supported resource types and their import formats
#[derive(Debug, Args)]
pub struct ResourceTypesCommand {
    /// Only list resource types importable with this scope (account or zone)
    #[arg(long, value_parser = ["account", "zone"])]
    scope: Option<String>,
}

impl ResourceTypesCommand {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let scope = match self.scope.as_deref() {
            Some("account") => Some(Scope::account("-")),
            Some(_) => Some(Scope::zone("-")),
            None => None,
        };

        for resource_type in ResourceType::all() {
            if let Some(scope) = &scope {
                if !scope.satisfies(resource_type.scope_requirement()) {
                    continue;
                }
            }

            let template = ctx.formats.get(resource_type.name())?;
            ctx.output
                .line(&format!(
                    "{:<34} {:<16} {}\n",
                    resource_type.name(),
                    resource_type.scope_requirement().as_str(),
                    template.as_str()
                ))
                .map_err(ImportError::from)?;
        }

        Ok(())
    }
}
