use serde_json::Value;

use super::error::{ImportError, ImportResult};
use super::scope::{Scope, ScopeKind};

/// Supported Cloudflare resource types
///
/// This is the single registry of what can be imported: each variant knows its
/// import format, the scope it lives under and where its records are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    AccessRule,
    AccountMember,
    Argo,
    ArgoTunnel,
    ByoIpPrefix,
    CertificatePack,
    CustomPages,
    Filter,
    FirewallRule,
    Healthcheck,
    CustomHostname,
    CustomSsl,
    IpList,
    OriginCaCertificate,
    PageRule,
    RateLimit,
    Record,
    SpectrumApplication,
    WafOverride,
    WaitingRoom,
    WorkersKvNamespace,
    WorkerRoute,
    Zone,
    ZoneLockdown,
}

/// A list endpoint relative to the API base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Where the identifiers of a resource type come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Listed from the provider API
    Api(Endpoint),
    /// No remote identifier exists, one is generated locally
    Synthesized,
}

impl ResourceType {
    /// Get every resource type in registry order
    pub fn all() -> Vec<ResourceType> {
        vec![
            ResourceType::AccessRule,
            ResourceType::AccountMember,
            ResourceType::Argo,
            ResourceType::ArgoTunnel,
            ResourceType::ByoIpPrefix,
            ResourceType::CertificatePack,
            ResourceType::CustomPages,
            ResourceType::Filter,
            ResourceType::FirewallRule,
            ResourceType::Healthcheck,
            ResourceType::CustomHostname,
            ResourceType::CustomSsl,
            ResourceType::IpList,
            ResourceType::OriginCaCertificate,
            ResourceType::PageRule,
            ResourceType::RateLimit,
            ResourceType::Record,
            ResourceType::SpectrumApplication,
            ResourceType::WafOverride,
            ResourceType::WaitingRoom,
            ResourceType::WorkersKvNamespace,
            ResourceType::WorkerRoute,
            ResourceType::Zone,
            ResourceType::ZoneLockdown,
        ]
    }

    /// Get the Terraform resource type name
    pub fn name(&self) -> &'static str {
        match self {
            ResourceType::AccessRule => "cloudflare_access_rule",
            ResourceType::AccountMember => "cloudflare_account_member",
            ResourceType::Argo => "cloudflare_argo",
            ResourceType::ArgoTunnel => "cloudflare_argo_tunnel",
            ResourceType::ByoIpPrefix => "cloudflare_byo_ip_prefix",
            ResourceType::CertificatePack => "cloudflare_certificate_pack",
            ResourceType::CustomPages => "cloudflare_custom_pages",
            ResourceType::Filter => "cloudflare_filter",
            ResourceType::FirewallRule => "cloudflare_firewall_rule",
            ResourceType::Healthcheck => "cloudflare_healthcheck",
            ResourceType::CustomHostname => "cloudflare_custom_hostname",
            ResourceType::CustomSsl => "cloudflare_custom_ssl",
            ResourceType::IpList => "cloudflare_ip_list",
            ResourceType::OriginCaCertificate => "cloudflare_origin_ca_certificate",
            ResourceType::PageRule => "cloudflare_page_rule",
            ResourceType::RateLimit => "cloudflare_rate_limit",
            ResourceType::Record => "cloudflare_record",
            ResourceType::SpectrumApplication => "cloudflare_spectrum_application",
            ResourceType::WafOverride => "cloudflare_waf_override",
            ResourceType::WaitingRoom => "cloudflare_waiting_room",
            ResourceType::WorkersKvNamespace => "cloudflare_workers_kv_namespace",
            ResourceType::WorkerRoute => "cloudflare_worker_route",
            ResourceType::Zone => "cloudflare_zone",
            ResourceType::ZoneLockdown => "cloudflare_zone_lockdown",
        }
    }

    /// Parse a resource type from its Terraform name
    pub fn from_name(name: &str) -> ImportResult<Self> {
        Self::all()
            .into_iter()
            .find(|rt| rt.name() == name.trim())
            .ok_or_else(|| ImportError::UnknownResourceType(name.to_string()))
    }

    /// Composite ID template accepted by `terraform import`
    pub fn template(&self) -> &'static str {
        match self {
            ResourceType::AccessRule | ResourceType::CustomPages => {
                ":identifier_type/:identifier_value/:id"
            }
            ResourceType::AccountMember | ResourceType::ArgoTunnel | ResourceType::IpList => {
                ":account_id/:id"
            }
            ResourceType::Argo => ":zone_id/argo",
            ResourceType::ByoIpPrefix
            | ResourceType::OriginCaCertificate
            | ResourceType::WorkersKvNamespace
            | ResourceType::Zone => ":id",
            ResourceType::CertificatePack
            | ResourceType::Filter
            | ResourceType::FirewallRule
            | ResourceType::Healthcheck
            | ResourceType::CustomHostname
            | ResourceType::CustomSsl
            | ResourceType::PageRule
            | ResourceType::RateLimit
            | ResourceType::Record
            | ResourceType::SpectrumApplication
            | ResourceType::WafOverride
            | ResourceType::WaitingRoom
            | ResourceType::WorkerRoute
            | ResourceType::ZoneLockdown => ":zone_id/:id",
        }
    }

    /// Scope the resource type has to be listed under
    pub fn scope_requirement(&self) -> ScopeKind {
        match self {
            ResourceType::AccessRule | ResourceType::CustomPages | ResourceType::Zone => {
                ScopeKind::Either
            }
            ResourceType::AccountMember
            | ResourceType::ArgoTunnel
            | ResourceType::ByoIpPrefix
            | ResourceType::IpList
            | ResourceType::WorkersKvNamespace => ScopeKind::Account,
            _ => ScopeKind::Zone,
        }
    }

    /// Whether identifiers are generated locally instead of listed
    pub fn is_synthesized(&self) -> bool {
        matches!(self, ResourceType::Argo)
    }

    /// Fail unless the scope can serve this resource type
    pub fn check_scope(&self, scope: &Scope) -> ImportResult<()> {
        let required = self.scope_requirement();
        if scope.satisfies(required) {
            Ok(())
        } else {
            Err(ImportError::ScopeMismatch {
                resource_type: self.name().to_string(),
                required: required.to_string(),
            })
        }
    }

    /// Resolve where identifiers for this resource type are listed
    pub fn source(&self, scope: &Scope) -> Source {
        let account = &scope.account_id;
        let zone = &scope.zone_id;

        let endpoint = match self {
            ResourceType::Argo => return Source::Synthesized,
            ResourceType::AccessRule if scope.is_account() => {
                Endpoint::new(format!("accounts/{}/firewall/access_rules/rules", account))
            }
            ResourceType::AccessRule => {
                Endpoint::new(format!("zones/{}/firewall/access_rules/rules", zone))
            }
            ResourceType::AccountMember => Endpoint::new(format!("accounts/{}/members", account)),
            ResourceType::ArgoTunnel => Endpoint::new(format!("accounts/{}/tunnels", account)),
            ResourceType::ByoIpPrefix => {
                Endpoint::new(format!("accounts/{}/addressing/prefixes", account))
            }
            ResourceType::CertificatePack => {
                Endpoint::new(format!("zones/{}/ssl/certificate_packs", zone))
                    .with_query("status", "all")
            }
            ResourceType::CustomPages if scope.is_account() => {
                Endpoint::new(format!("accounts/{}/custom_pages", account))
            }
            ResourceType::CustomPages => Endpoint::new(format!("zones/{}/custom_pages", zone)),
            ResourceType::Filter => Endpoint::new(format!("zones/{}/filters", zone)),
            ResourceType::FirewallRule => Endpoint::new(format!("zones/{}/firewall/rules", zone)),
            ResourceType::Healthcheck => Endpoint::new(format!("zones/{}/healthchecks", zone)),
            ResourceType::CustomHostname => {
                Endpoint::new(format!("zones/{}/custom_hostnames", zone))
            }
            ResourceType::CustomSsl => {
                Endpoint::new(format!("zones/{}/custom_certificates", zone))
            }
            ResourceType::IpList => Endpoint::new(format!("accounts/{}/rules/lists", account)),
            ResourceType::OriginCaCertificate => {
                Endpoint::new("certificates").with_query("zone_id", zone.as_str())
            }
            ResourceType::PageRule => Endpoint::new(format!("zones/{}/pagerules", zone)),
            ResourceType::RateLimit => Endpoint::new(format!("zones/{}/rate_limits", zone)),
            ResourceType::Record => Endpoint::new(format!("zones/{}/dns_records", zone)),
            ResourceType::SpectrumApplication => {
                Endpoint::new(format!("zones/{}/spectrum/apps", zone))
            }
            ResourceType::WafOverride => {
                Endpoint::new(format!("zones/{}/firewall/waf/overrides", zone))
            }
            ResourceType::WaitingRoom => Endpoint::new(format!("zones/{}/waiting_rooms", zone)),
            ResourceType::WorkersKvNamespace => {
                Endpoint::new(format!("accounts/{}/storage/kv/namespaces", account))
            }
            ResourceType::WorkerRoute => Endpoint::new(format!("zones/{}/workers/routes", zone)),
            ResourceType::Zone => Endpoint::new("zones"),
            ResourceType::ZoneLockdown => {
                Endpoint::new(format!("zones/{}/firewall/lockdowns", zone))
            }
        };

        Source::Api(endpoint)
    }

    /// Whether a listed record should be imported
    ///
    /// Universal certificate packs are provisioned by Cloudflare itself and
    /// cannot be managed.
    pub fn keeps_record(&self, record: &Value) -> bool {
        match self {
            ResourceType::CertificatePack => {
                record.get("type").and_then(Value::as_str) != Some("universal")
            }
            _ => true,
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
