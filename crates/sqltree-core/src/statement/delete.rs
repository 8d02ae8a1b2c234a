//! DELETE statement.

use crate::error::Result;
use crate::expr::{Expr, IntoExpr};
use crate::from::{render_from_list, render_with_list, FromItem, Table, With};
use crate::render::{Fragment, Render, RenderContext};

use super::{render_condition, render_returning, SelectItem};

/// A DELETE statement.
#[derive(Debug, Clone)]
pub struct Delete {
    /// Common table expressions defined before the statement.
    pub with: Vec<With>,
    /// Target table.
    pub table: Table,
    /// USING items.
    pub using: Vec<FromItem>,
    /// WHERE condition.
    pub where_clause: Option<Expr>,
    /// RETURNING items.
    pub returning: Vec<SelectItem>,
}

impl Delete {
    /// Creates `DELETE FROM <table>`.
    #[must_use]
    pub const fn new(table: Table) -> Self {
        Self {
            with: Vec::new(),
            table,
            using: Vec::new(),
            where_clause: None,
            returning: Vec::new(),
        }
    }

    /// Appends a USING item.
    #[must_use]
    pub fn using(mut self, item: impl Into<FromItem>) -> Self {
        self.using.push(item.into());
        self
    }

    /// Sets the WHERE condition.
    #[must_use]
    pub fn where_clause(mut self, condition: impl IntoExpr) -> Self {
        self.where_clause = Some(condition.into_expr());
        self
    }

    /// Appends RETURNING items.
    #[must_use]
    pub fn returning<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SelectItem>,
    {
        self.returning.extend(items.into_iter().map(Into::into));
        self
    }

    /// Adds a common table expression.
    #[must_use]
    pub fn with(mut self, cte: With) -> Self {
        self.with.push(cte);
        self
    }
}

impl Render for Delete {
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        ctx.nested(|ctx| {
            let with = render_with_list(ctx, &self.with)?;

            let mut using = Fragment::new();
            if !self.using.is_empty() {
                using.push_sql(" USING ");
                render_from_list(ctx, &self.using, &mut using)?;
            }
            let where_clause = render_condition(ctx, " WHERE ", self.where_clause.as_ref())?;
            let returning = render_returning(ctx, &self.returning)?;

            let mut target = Fragment::new();
            self.table.render_target(ctx, &mut target)?;

            out.append(with);
            out.push_sql("DELETE FROM ");
            out.append(target);
            out.append(using);
            out.append(where_clause);
            out.append(returning);
            Ok(())
        })
    }
}
