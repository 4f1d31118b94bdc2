use std::collections::HashMap;

use super::error::{ImportError, ImportResult};
use super::resource::ResourceType;
use super::scope::Scope;

/// Placeholder tokens a composite ID template may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    IdentifierType,
    IdentifierValue,
    ZoneId,
    AccountId,
    Id,
}

impl Token {
    /// Longest first, `:id` is a prefix of `:identifier_*`
    const PARSE_ORDER: [Token; 5] = [
        Token::IdentifierValue,
        Token::IdentifierType,
        Token::AccountId,
        Token::ZoneId,
        Token::Id,
    ];

    /// Token text without the leading colon
    pub fn name(&self) -> &'static str {
        match self {
            Token::IdentifierType => "identifier_type",
            Token::IdentifierValue => "identifier_value",
            Token::ZoneId => "zone_id",
            Token::AccountId => "account_id",
            Token::Id => "id",
        }
    }

    fn value<'a>(&self, resource_id: &'a str, scope: &'a Scope) -> &'a str {
        match self {
            Token::IdentifierType => scope.identifier_type(),
            Token::IdentifierValue => scope.identifier_value(),
            Token::ZoneId => &scope.zone_id,
            Token::AccountId => &scope.account_id,
            Token::Id => resource_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Token(Token),
}

/// A parsed composite ID template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl IdTemplate {
    /// Split a template into literal text and tokens
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(colon) = rest.find(':') {
            literal.push_str(&rest[..colon]);
            let after = &rest[colon + 1..];

            match Token::PARSE_ORDER
                .iter()
                .find(|token| after.starts_with(token.name()))
            {
                Some(token) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Token(*token));
                    rest = &after[token.name().len()..];
                }
                None => {
                    literal.push(':');
                    rest = after;
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: template.to_string(),
            segments,
        }
    }

    /// The template as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Tokens used by this template, in order of appearance
    #[cfg(test)]
    pub fn tokens(&self) -> Vec<Token> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Token(token) => Some(*token),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Substitute every token in a single pass
    ///
    /// Values are appended verbatim and never re-scanned, so an ID containing
    /// token text is left alone.
    pub fn render(&self, resource_id: &str, scope: &Scope) -> String {
        let mut out = String::with_capacity(self.source.len() + resource_id.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Token(token) => out.push_str(token.value(resource_id, scope)),
            }
        }
        out
    }
}

/// Mapping from resource type name to its composite ID template
#[derive(Debug, Clone, Default)]
pub struct FormatTable {
    entries: HashMap<String, IdTemplate>,
}

impl FormatTable {
    /// Build the table from every registered resource type
    pub fn builtin() -> Self {
        Self::from_entries(
            ResourceType::all()
                .into_iter()
                .map(|rt| (rt.name(), rt.template())),
        )
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, template)| (name.to_string(), IdTemplate::parse(template)))
                .collect(),
        }
    }

    pub fn get(&self, resource_type: &str) -> ImportResult<&IdTemplate> {
        self.entries
            .get(resource_type)
            .ok_or_else(|| ImportError::UnknownResourceType(resource_type.to_string()))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefers_longest_token() {
        let template = IdTemplate::parse(":identifier_type/:identifier_value/:id");
        assert_eq!(
            template.tokens(),
            vec![Token::IdentifierType, Token::IdentifierValue, Token::Id]
        );
    }

    #[test]
    fn test_parse_keeps_fixed_suffix() {
        let template = IdTemplate::parse(":zone_id/argo");
        assert_eq!(template.tokens(), vec![Token::ZoneId]);
        assert_eq!(template.render("ignored", &Scope::zone("zone1")), "zone1/argo");
    }

    #[test]
    fn test_parse_keeps_unknown_colon_text() {
        let template = IdTemplate::parse("x:foo/:id");
        assert_eq!(template.render("abc", &Scope::zone("z")), "x:foo/abc");
    }

    #[test]
    fn test_render_is_single_pass() {
        let template = IdTemplate::parse(":zone_id/:id");
        let scope = Scope::zone(":id");
        assert_eq!(template.render(":zone_id", &scope), ":id/:zone_id");
    }

    #[test]
    fn test_render_empty_scope_substitutes_empty_strings() {
        let template = IdTemplate::parse(":account_id/:id");
        assert_eq!(template.render("abc", &Scope::default()), "/abc");
    }

    #[test]
    fn test_builtin_table_covers_registry() {
        let table = FormatTable::builtin();
        assert_eq!(table.len(), ResourceType::all().len());
        for rt in ResourceType::all() {
            assert_eq!(table.get(rt.name()).unwrap().as_str(), rt.template());
        }
    }

    #[test]
    fn test_get_unknown_type() {
        let table = FormatTable::builtin();
        assert!(matches!(
            table.get("cloudflare_unknown_thing"),
            Err(ImportError::UnknownResourceType(_))
        ));
    }

    #[test]
    fn test_custom_table() {
        let table = FormatTable::from_entries([("custom_type", "prefix/:account_id")]);
        let rendered = table
            .get("custom_type")
            .unwrap()
            .render("id1", &Scope::account("acc9"));
        assert_eq!(rendered, "prefix/acc9");
    }
}
