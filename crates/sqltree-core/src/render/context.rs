//! State threaded through one render call.

use super::alias::{AliasRegistry, RelationId};
use super::fragment::Fragment;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::quote::quote_identifier;

/// Rendering context: the dialect, the alias registry and the statement
/// nesting depth.
///
/// A context lives for exactly one top-level render call; nested
/// subqueries and CTE bodies share it so aliases stay consistent across
/// nesting levels.
pub struct RenderContext<'d> {
    dialect: &'d dyn Dialect,
    aliases: AliasRegistry,
    depth: usize,
}

impl<'d> RenderContext<'d> {
    /// Creates a context with an empty alias registry.
    #[must_use]
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            aliases: AliasRegistry::new(),
            depth: 0,
        }
    }

    /// Returns the dialect being rendered for.
    #[must_use]
    pub fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    /// Quotes an identifier through the injection guard.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::InvalidIdentifier`] for names the guard rejects.
    pub fn quote(&self, name: &str) -> Result<String> {
        quote_identifier(self.dialect, name)
    }

    /// Returns the alias of a relation, allocating it on first use.
    pub fn alias_for(&mut self, id: RelationId) -> String {
        self.aliases.alias_for(id)
    }

    /// Returns the quoted alias of a relation, allocating it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::InvalidIdentifier`] if the alias cannot
    /// be quoted by the dialect.
    pub fn quoted_alias(&mut self, id: RelationId) -> Result<String> {
        let alias = self.alias_for(id);
        self.quote(&alias)
    }

    /// Writes ` AS "<alias>"` (or ` "<alias>"`) after a relation.
    ///
    /// # Errors
    ///
    /// See [`RenderContext::quoted_alias`].
    pub fn write_alias(&mut self, id: RelationId, out: &mut Fragment) -> Result<()> {
        let alias = self.quoted_alias(id)?;
        out.push_sql(if self.dialect.table_alias_as() { " AS " } else { " " });
        out.push_sql(&alias);
        Ok(())
    }

    /// Returns true while rendering inside a statement. Columns are only
    /// qualified by their relation's alias inside a statement.
    #[must_use]
    pub const fn in_statement(&self) -> bool {
        self.depth > 0
    }

    /// Runs `f` one statement level deeper.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `f`.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Returns the number of aliases allocated so far.
    #[must_use]
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}
