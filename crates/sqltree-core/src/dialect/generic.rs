//! Generic SQL dialect.

use super::Dialect;

/// A generic SQL dialect: ANSI double-quoted identifiers and `%s`
/// placeholders. This is the dialect used by [`crate::render`].
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{LimitStyle, PlaceholderStyle};

    #[test]
    fn test_generic_dialect() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.name(), "generic");
        assert_eq!(dialect.identifier_quote(), '"');
        assert_eq!(dialect.placeholder_style(), PlaceholderStyle::Format);
        assert_eq!(dialect.limit_style(), LimitStyle::Limit);
        assert!(dialect.supports_returning());
        assert!(dialect.table_alias_as());
    }
}
