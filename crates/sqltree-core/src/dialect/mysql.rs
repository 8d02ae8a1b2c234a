//! MySQL dialect.

use super::Dialect;

/// MySQL dialect: backtick identifiers, `%s` placeholders, no RETURNING and
/// no alias on the INSERT target.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    // MySQL rejects OFFSET without LIMIT; a very large LIMIT is its idiom.
    fn max_limit(&self) -> Option<i64> {
        Some(i64::MAX)
    }

    fn supports_returning(&self) -> bool {
        false
    }

    fn supports_insert_alias(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_dialect() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.name(), "mysql");
        assert_eq!(dialect.identifier_quote(), '`');
        assert_eq!(dialect.max_limit(), Some(i64::MAX));
        assert!(!dialect.supports_returning());
        assert!(!dialect.supports_insert_alias());
    }
}
