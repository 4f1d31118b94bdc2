use super::error::{ImportError, ImportResult};

/// Account or zone context that disambiguates resource identifiers
///
/// Exactly one side is expected to be populated. `Scope::new` enforces that;
/// the raw constructors do not, so the resolver can still be driven with an
/// empty scope and will substitute empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub account_id: String,
    pub zone_id: String,
}

/// Which scope a resource type can be listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Account,
    Zone,
    Either,
}

impl ScopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::Account => "account",
            ScopeKind::Zone => "zone",
            ScopeKind::Either => "account or zone",
        }
    }
}

impl std::fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Scope {
    /// Build a validated scope from optional account and zone identifiers
    pub fn new(account_id: Option<&str>, zone_id: Option<&str>) -> ImportResult<Self> {
        let account_id = account_id.map(str::trim).unwrap_or_default();
        let zone_id = zone_id.map(str::trim).unwrap_or_default();

        match (account_id.is_empty(), zone_id.is_empty()) {
            (true, true) => Err(ImportError::InvalidScope(
                "either an account or a zone must be set".to_string(),
            )),
            (false, false) => Err(ImportError::InvalidScope(
                "account and zone are mutually exclusive, set only one".to_string(),
            )),
            (false, true) => Ok(Self::account(account_id)),
            (true, false) => Ok(Self::zone(zone_id)),
        }
    }

    pub fn account(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            zone_id: String::new(),
        }
    }

    pub fn zone(zone_id: impl Into<String>) -> Self {
        Self {
            account_id: String::new(),
            zone_id: zone_id.into(),
        }
    }

    /// Account wins whenever it is non-empty
    pub fn is_account(&self) -> bool {
        !self.account_id.is_empty()
    }

    /// `"account"` or `"zone"`
    pub fn identifier_type(&self) -> &'static str {
        if self.is_account() { "account" } else { "zone" }
    }

    pub fn identifier_value(&self) -> &str {
        if self.is_account() {
            &self.account_id
        } else {
            &self.zone_id
        }
    }

    /// Check this scope can serve a resource type with the given requirement
    pub fn satisfies(&self, required: ScopeKind) -> bool {
        match required {
            ScopeKind::Either => true,
            ScopeKind::Account => self.is_account(),
            ScopeKind::Zone => !self.is_account() && !self.zone_id.is_empty(),
        }
    }
}
