//! Rendering: turning a tree into SQL text plus ordered parameters.
//!
//! ```rust
//! use sqltree_core::prelude::*;
//!
//! let t = Table::new("t");
//! let query = t.update([t.col("c")], ["foo"]);
//! let (sql, params) = query.build().unwrap();
//! assert_eq!(sql, r#"UPDATE "t" AS "a" SET "c" = %s"#);
//! assert_eq!(params, vec![SqlValue::Text(String::from("foo"))]);
//! ```

mod alias;
mod context;
mod fragment;

pub use alias::{alias_name, AliasRegistry, RelationId};
pub use context::RenderContext;
pub use fragment::Fragment;

use tracing::{debug_span, trace};

use crate::dialect::{Dialect, GenericDialect};
use crate::error::Result;
use crate::value::SqlValue;

/// Trait for tree nodes that can be rendered to SQL.
pub trait Render {
    /// Appends this node's SQL and parameters to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if an identifier is rejected or the node is
    /// structurally invalid.
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()>;

    /// Renders with the generic dialect and returns SQL with parameters.
    ///
    /// # Errors
    ///
    /// See [`render`].
    fn build(&self) -> Result<(String, Vec<SqlValue>)>
    where
        Self: Sized,
    {
        render(self)
    }

    /// Renders with `dialect` and returns SQL with parameters.
    ///
    /// # Errors
    ///
    /// See [`render_with`].
    fn build_with(&self, dialect: &dyn Dialect) -> Result<(String, Vec<SqlValue>)>
    where
        Self: Sized,
    {
        render_with(self, dialect)
    }
}

/// Renders a node with the generic dialect.
///
/// # Errors
///
/// See [`render_with`].
pub fn render<R: Render + ?Sized>(node: &R) -> Result<(String, Vec<SqlValue>)> {
    render_with(node, &GenericDialect::new())
}

/// Renders a node with `dialect`.
///
/// Each call starts from an empty alias registry and an empty parameter
/// list, so a tree can be mutated and rendered again at any time.
///
/// # Errors
///
/// Returns [`crate::RenderError::InvalidIdentifier`] if a name is rejected,
/// [`crate::RenderError::MalformedStatement`] or
/// [`crate::RenderError::TypeMismatch`] if the tree is structurally invalid.
pub fn render_with<R: Render + ?Sized>(
    node: &R,
    dialect: &dyn Dialect,
) -> Result<(String, Vec<SqlValue>)> {
    let span = debug_span!("render", dialect = dialect.name());
    let _enter = span.enter();

    let mut ctx = RenderContext::new(dialect);
    let mut out = Fragment::new();
    node.render(&mut ctx, &mut out)?;
    let aliases = ctx.alias_count();
    let (sql, params) = out.finish(dialect.placeholder_style());
    let kinds: Vec<&str> = params.iter().map(SqlValue::kind).collect();
    trace!(sql_len = sql.len(), params = ?kinds, aliases, "rendered");
    Ok((sql, params))
}
