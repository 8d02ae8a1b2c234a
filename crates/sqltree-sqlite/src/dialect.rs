//! SQLite dialect implementation.

use sqltree_core::dialect::{Dialect, PlaceholderStyle};

/// SQLite dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn identifier_quote(&self) -> char {
        '"' // SQLite also accepts backticks, but double quotes are standard
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Qmark
    }

    // OFFSET is only accepted after a LIMIT; a negative LIMIT means none.
    fn max_limit(&self) -> Option<i64> {
        Some(-1)
    }

    fn supports_returning(&self) -> bool {
        true // SQLite 3.35.0+
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_dialect() {
        let dialect = SqliteDialect::new();
        assert_eq!(dialect.name(), "sqlite");
        assert_eq!(dialect.identifier_quote(), '"');
        assert_eq!(dialect.placeholder_style().placeholder(4), "?");
        assert_eq!(dialect.max_limit(), Some(-1));
        assert!(dialect.supports_returning());
    }
}
