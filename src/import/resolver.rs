use std::sync::Arc;

use super::error::ImportResult;
use super::scope::Scope;
use super::template::FormatTable;

pub const DEFAULT_IMPORT_COMMAND_PREFIX: &str = "terraform import";
pub const DEFAULT_RESOURCE_NAME_PREFIX: &str = "terraform_managed_resource";

/// Builds `terraform import` lines from the format table
#[derive(Debug, Clone)]
pub struct CompositeIdResolver {
    table: Arc<FormatTable>,
    command_prefix: String,
    resource_name_prefix: String,
}

impl CompositeIdResolver {
    pub fn new(
        table: Arc<FormatTable>,
        command_prefix: impl Into<String>,
        resource_name_prefix: impl Into<String>,
    ) -> Self {
        Self {
            table,
            command_prefix: command_prefix.into(),
            resource_name_prefix: resource_name_prefix.into(),
        }
    }

    /// Resolver with the stock `terraform import` prefixes
    #[cfg(test)]
    pub fn with_defaults(table: Arc<FormatTable>) -> Self {
        Self::new(
            table,
            DEFAULT_IMPORT_COMMAND_PREFIX,
            DEFAULT_RESOURCE_NAME_PREFIX,
        )
    }

    /// Resolve the composite ID for one resource
    pub fn composite_id(
        &self,
        resource_type: &str,
        resource_id: &str,
        scope: &Scope,
    ) -> ImportResult<String> {
        let template = self.table.get(resource_type)?;
        Ok(template.render(resource_id, scope))
    }

    /// Resolve the full newline-terminated import command for one resource
    pub fn resolve(
        &self,
        resource_type: &str,
        resource_id: &str,
        scope: &Scope,
    ) -> ImportResult<String> {
        let composite_id = self.composite_id(resource_type, resource_id, scope)?;

        Ok(format!(
            "{} {}.{}_{} {}\n",
            self.command_prefix,
            resource_type,
            self.resource_name_prefix,
            resource_id,
            composite_id
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::error::ImportError;
    use crate::import::resource::ResourceType;
    use crate::import::template::Token;

    fn resolver() -> CompositeIdResolver {
        CompositeIdResolver::with_defaults(Arc::new(FormatTable::builtin()))
    }

    #[test]
    fn test_account_member_uses_account_id() {
        let id = resolver()
            .composite_id("cloudflare_account_member", "abc", &Scope::account("acc1"))
            .unwrap();
        assert_eq!(id, "acc1/abc");
    }

    #[test]
    fn test_record_uses_zone_id() {
        let id = resolver()
            .composite_id("cloudflare_record", "rec1", &Scope::zone("zone1"))
            .unwrap();
        assert_eq!(id, "zone1/rec1");
    }

    #[test]
    fn test_access_rule_uses_identifier_pair() {
        let id = resolver()
            .composite_id("cloudflare_access_rule", "r1", &Scope::account("acc1"))
            .unwrap();
        assert_eq!(id, "account/acc1/r1");

        let id = resolver()
            .composite_id("cloudflare_access_rule", "r1", &Scope::zone("zone1"))
            .unwrap();
        assert_eq!(id, "zone/zone1/r1");
    }

    #[test]
    fn test_argo_ends_with_fixed_suffix() {
        let line = resolver()
            .resolve("cloudflare_argo", "d41d8cd98f00b204", &Scope::zone("zone1"))
            .unwrap();
        assert_eq!(
            line,
            "terraform import cloudflare_argo.terraform_managed_resource_d41d8cd98f00b204 zone1/argo\n"
        );
    }

    #[test]
    fn test_full_line_shape() {
        let line = resolver()
            .resolve("cloudflare_record", "rec1", &Scope::zone("zone1"))
            .unwrap();
        assert_eq!(
            line,
            "terraform import cloudflare_record.terraform_managed_resource_rec1 zone1/rec1\n"
        );
    }

    #[test]
    fn test_custom_prefixes() {
        let resolver = CompositeIdResolver::new(
            Arc::new(FormatTable::builtin()),
            "tofu import",
            "imported",
        );
        let line = resolver
            .resolve("cloudflare_zone", "z1", &Scope::account("acc1"))
            .unwrap();
        assert_eq!(line, "tofu import cloudflare_zone.imported_z1 z1\n");
    }

    #[test]
    fn test_unknown_type_fails() {
        let err = resolver()
            .resolve("cloudflare_unknown_thing", "x", &Scope::zone("zone1"))
            .unwrap_err();
        assert!(matches!(err, ImportError::UnknownResourceType(_)));
    }

    #[test]
    fn test_no_token_survives_for_any_type() {
        let resolver = resolver();
        let scopes = [Scope::account("acc1"), Scope::zone("zone1")];

        for rt in ResourceType::all() {
            for scope in &scopes {
                let id = resolver.composite_id(rt.name(), "res1", scope).unwrap();
                for token in [
                    Token::IdentifierType,
                    Token::IdentifierValue,
                    Token::ZoneId,
                    Token::AccountId,
                    Token::Id,
                ] {
                    let needle = format!(":{}", token.name());
                    assert!(
                        !id.contains(&needle),
                        "{} left {} unresolved in {}",
                        rt,
                        needle,
                        id
                    );
                }
            }
        }
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let resolver = resolver();
        let scope = Scope::zone("zone1");
        let first = resolver.resolve("cloudflare_page_rule", "p1", &scope).unwrap();
        let second = resolver.resolve("cloudflare_page_rule", "p1", &scope).unwrap();
        assert_eq!(first, second);
    }
}
