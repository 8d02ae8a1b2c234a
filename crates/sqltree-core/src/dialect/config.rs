//! Dialect switches loaded from configuration.

use serde::{Deserialize, Serialize};

use super::{Dialect, LimitStyle, PlaceholderStyle};
use crate::error::Result;

/// A dialect described by plain data, for callers that pick their
/// database at runtime.
///
/// Every field except `name` has a default matching [`super::GenericDialect`],
/// so a configuration document only lists what differs:
///
/// ```rust
/// use sqltree_core::dialect::{Dialect, DialectConfig, PlaceholderStyle};
///
/// let dialect = DialectConfig::from_json(r#"{"name": "pg", "placeholder": "numeric"}"#).unwrap();
/// assert_eq!(dialect.placeholder_style(), PlaceholderStyle::Numeric);
/// assert_eq!(dialect.identifier_quote(), '"');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialectConfig {
    /// Dialect name, used in logs.
    pub name: String,
    /// Identifier quote character.
    pub quote: char,
    /// Placeholder spelling.
    pub placeholder: PlaceholderStyle,
    /// LIMIT/OFFSET spelling.
    pub limit: LimitStyle,
    /// LIMIT emitted for offset-only queries.
    pub max_limit: Option<i64>,
    /// Whether `AS` precedes table aliases.
    pub table_alias_as: bool,
    /// Whether RETURNING may be rendered.
    pub returning: bool,
    /// Whether the INSERT target carries an alias.
    pub insert_alias: bool,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            name: String::from("custom"),
            quote: '"',
            placeholder: PlaceholderStyle::Format,
            limit: LimitStyle::Limit,
            max_limit: None,
            table_alias_as: true,
            returning: true,
            insert_alias: true,
        }
    }
}

impl DialectConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::Config`] if the document is not valid
    /// JSON or names an unknown field or variant.
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Captures the switches of an existing dialect.
    #[must_use]
    pub fn from_dialect(dialect: &dyn Dialect) -> Self {
        Self {
            name: String::from(dialect.name()),
            quote: dialect.identifier_quote(),
            placeholder: dialect.placeholder_style(),
            limit: dialect.limit_style(),
            max_limit: dialect.max_limit(),
            table_alias_as: dialect.table_alias_as(),
            returning: dialect.supports_returning(),
            insert_alias: dialect.supports_insert_alias(),
        }
    }
}

impl Dialect for DialectConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn identifier_quote(&self) -> char {
        self.quote
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        self.placeholder
    }

    fn limit_style(&self) -> LimitStyle {
        self.limit
    }

    fn max_limit(&self) -> Option<i64> {
        self.max_limit
    }

    fn table_alias_as(&self) -> bool {
        self.table_alias_as
    }

    fn supports_returning(&self) -> bool {
        self.returning
    }

    fn supports_insert_alias(&self) -> bool {
        self.insert_alias
    }
}
