//! Identifier quoting and injection guard.
//!
//! Identifiers are wrapped in the dialect's quote character. A name that
//! contains the quote character is rejected instead of escaped: the guard
//! never tries to repair a name that could close the quoting early.
//!
//! Free-form words that are emitted unquoted (function names, cast types)
//! are checked against a conservative allow-list instead.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::dialect::Dialect;
use crate::error::{RenderError, Result};

/// Free-form words emitted without quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// A function name such as `COALESCE` or `pg_catalog.lower`.
    Function,
    /// A type name in `CAST(... AS <type>)`, such as `NUMERIC(10, 2)`.
    Type,
}

/// Quotes an identifier for `dialect`.
///
/// # Errors
///
/// Returns [`RenderError::InvalidIdentifier`] if `name` is empty, contains
/// the dialect's quote character or a NUL byte, or contains `%` under a
/// dialect whose placeholders are spelled with `%`.
pub fn quote_identifier(dialect: &dyn Dialect, name: &str) -> Result<String> {
    let quote = dialect.identifier_quote();
    let reason = if name.is_empty() {
        Some("identifier is empty")
    } else if name.contains(quote) {
        Some("identifier contains the quote character")
    } else if name.contains('\0') {
        Some("identifier contains a NUL byte")
    } else if name.contains('%') && dialect.placeholder_style().escapes_percent() {
        // The driver would read `%s` inside the name as one more placeholder.
        Some("identifier contains '%' under format placeholders")
    } else {
        None
    };
    if let Some(reason) = reason {
        debug!(identifier = name, dialect = dialect.name(), reason, "rejected identifier");
        return Err(RenderError::invalid_identifier(name, reason));
    }
    Ok(format!("{quote}{name}{quote}"))
}

/// Checks a free-form word that will be emitted unquoted.
///
/// # Errors
///
/// Returns [`RenderError::InvalidIdentifier`] if `text` falls outside the
/// allow-list for `kind`.
pub fn validate_keyword(kind: Keyword, text: &str) -> Result<&str> {
    let valid = match kind {
        Keyword::Function => is_function_name(text),
        Keyword::Type => is_type_name(text),
    };
    if valid {
        Ok(text)
    } else {
        let reason = match kind {
            Keyword::Function => "function name outside [A-Za-z_][A-Za-z0-9_]*",
            Keyword::Type => "type name contains characters outside the allow-list",
        };
        debug!(keyword = text, ?kind, "rejected keyword");
        Err(RenderError::invalid_identifier(text, reason))
    }
}

fn is_word(part: &str) -> bool {
    let mut chars = part.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// At most one schema qualifier.
fn is_function_name(text: &str) -> bool {
    let mut parts = text.split('.');
    let ok = parts.by_ref().take(2).all(is_word);
    ok && parts.next().is_none()
}

// Words separated by single spaces, one optional `(p)` or `(p, s)`
// modifier, then any number of `[]`.
static TYPE_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*( [A-Za-z_][A-Za-z0-9_]*)*(\([0-9]+(, ?[0-9]+)?\))?(\[\])*$").ok()
});

fn is_type_name(text: &str) -> bool {
    TYPE_NAME.as_ref().is_some_and(|re| re.is_match(text))
}
