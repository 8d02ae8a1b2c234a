//! SQL dialect switches.
//!
//! The renderer does not know any database. Everything that differs between
//! databases and matters to rendering (the identifier quote, the placeholder
//! token and a handful of clause spellings) is read from a [`Dialect`].

mod config;
mod generic;
mod mysql;
mod postgres;

pub use config::DialectConfig;
pub use generic::GenericDialect;
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;

use serde::{Deserialize, Serialize};

/// How bound parameters are spelled in the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderStyle {
    /// `%s` for every parameter (DB-API `format` style).
    #[default]
    Format,
    /// `?` for every parameter.
    Qmark,
    /// `$1`, `$2`, ... numbered in textual order.
    Numeric,
}

impl PlaceholderStyle {
    /// Returns the placeholder for the parameter at 1-based `index`.
    #[must_use]
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Self::Format => String::from("%s"),
            Self::Qmark => String::from("?"),
            Self::Numeric => format!("${index}"),
        }
    }

    /// Returns true if a literal `%` must be doubled in the SQL text.
    #[must_use]
    pub const fn escapes_percent(self) -> bool {
        matches!(self, Self::Format)
    }
}

/// How LIMIT and OFFSET are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitStyle {
    /// `LIMIT n OFFSET m`.
    #[default]
    Limit,
    /// `OFFSET m ROWS FETCH FIRST n ROWS ONLY`.
    Fetch,
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &str;

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns the parameter placeholder style.
    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Format
    }

    /// Returns the LIMIT/OFFSET spelling.
    fn limit_style(&self) -> LimitStyle {
        LimitStyle::Limit
    }

    /// Returns the LIMIT value to emit when only an OFFSET is given, for
    /// databases that reject a bare OFFSET.
    fn max_limit(&self) -> Option<i64> {
        None
    }

    /// Returns whether `AS` is written between a table and its alias.
    fn table_alias_as(&self) -> bool {
        true
    }

    /// Returns whether the dialect supports RETURNING clause.
    fn supports_returning(&self) -> bool {
        true
    }

    /// Returns whether an INSERT target may carry an alias
    /// (`INSERT INTO "t" AS "a"`).
    fn supports_insert_alias(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_styles() {
        assert_eq!(PlaceholderStyle::Format.placeholder(3), "%s");
        assert_eq!(PlaceholderStyle::Qmark.placeholder(3), "?");
        assert_eq!(PlaceholderStyle::Numeric.placeholder(3), "$3");
        assert!(PlaceholderStyle::Format.escapes_percent());
        assert!(!PlaceholderStyle::Numeric.escapes_percent());
    }
}
