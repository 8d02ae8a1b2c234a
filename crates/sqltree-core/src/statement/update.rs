//! UPDATE statement.

use crate::error::{RenderError, Result};
use crate::expr::{check_single_column, Expr, IntoExpr};
use crate::from::{render_from_list, render_with_list, Column, FromItem, Table, With};
use crate::render::{Fragment, Render, RenderContext};

use super::{
    check_target_columns, render_column_names, render_condition, render_returning,
    render_scalar, SelectItem, Statement,
};

/// Values assigned by an UPDATE.
#[derive(Debug, Clone)]
pub enum Values {
    /// One expression per target column.
    List(Vec<Expr>),
    /// A single subquery supplying every target column.
    Query(Box<Statement>),
    /// A subquery supplying the leading target columns, then one
    /// expression for each remaining column.
    QueryThen(Box<Statement>, Vec<Expr>),
}

impl Default for Values {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

/// An UPDATE statement.
///
/// ```rust
/// use sqltree_core::prelude::*;
///
/// let t1 = Table::new("t1");
/// let t2 = Table::new("t2");
/// let query = t1
///     .update([t1.col("c")], ["foo"])
///     .from(t2.clone())
///     .where_clause(t1.col("c").eq(t2.col("c")));
/// let (sql, _) = query.build().unwrap();
/// assert_eq!(
///     sql,
///     r#"UPDATE "t1" AS "b" SET "c" = %s FROM "t2" AS "a" WHERE ("b"."c" = "a"."c")"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Update {
    /// Common table expressions defined before the statement.
    pub with: Vec<With>,
    /// Target table.
    pub table: Table,
    /// Assigned columns; each must belong to `table`.
    pub columns: Vec<Column>,
    /// Assigned values.
    pub values: Values,
    /// FROM items.
    pub from: Vec<FromItem>,
    /// WHERE condition.
    pub where_clause: Option<Expr>,
    /// RETURNING items.
    pub returning: Vec<SelectItem>,
}

impl Update {
    /// Creates an UPDATE of `table` with no assignments.
    #[must_use]
    pub fn new(table: Table) -> Self {
        Self {
            with: Vec::new(),
            table,
            columns: Vec::new(),
            values: Values::default(),
            from: Vec::new(),
            where_clause: None,
            returning: Vec::new(),
        }
    }

    /// Appends target columns.
    #[must_use]
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = Column>,
    {
        self.columns.extend(columns);
        self
    }

    /// Replaces the assigned values with one expression per column.
    #[must_use]
    pub fn values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        self.values = Values::List(values.into_iter().map(IntoExpr::into_expr).collect());
        self
    }

    /// Replaces the assigned values with a single subquery.
    #[must_use]
    pub fn values_query(mut self, query: impl Into<Statement>) -> Self {
        self.values = Values::Query(Box::new(query.into()));
        self
    }

    /// Appends one `column = value` assignment.
    ///
    /// After [`Update::values_query`] the subquery keeps the columns it
    /// was given and the new assignment follows it.
    #[must_use]
    pub fn set(mut self, column: Column, value: impl IntoExpr) -> Self {
        let value = value.into_expr();
        self.values = match std::mem::take(&mut self.values) {
            Values::List(mut list) => {
                list.push(value);
                Values::List(list)
            }
            Values::Query(query) => Values::QueryThen(query, vec![value]),
            Values::QueryThen(query, mut rest) => {
                rest.push(value);
                Values::QueryThen(query, rest)
            }
        };
        self.columns.push(column);
        self
    }

    /// Appends a FROM item.
    #[must_use]
    pub fn from(mut self, item: impl Into<FromItem>) -> Self {
        self.from.push(item.into());
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

    fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(RenderError::malformed("UPDATE without target columns"));
        }
        check_target_columns(&self.table, &self.columns)?;
        match &self.values {
            Values::List(values) if values.len() != self.columns.len() => {
                Err(RenderError::malformed(format!(
                    "UPDATE assigns {} values to {} columns",
                    values.len(),
                    self.columns.len()
                )))
            }
            Values::List(_) => Ok(()),
            Values::Query(query) => check_query_width(query, self.columns.len()),
            Values::QueryThen(query, rest) => match self.columns.len().checked_sub(rest.len()) {
                Some(leading) if leading > 0 => check_query_width(query, leading),
                _ => Err(RenderError::malformed(format!(
                    "UPDATE assigns a subquery and {} values to {} columns",
                    rest.len(),
                    self.columns.len()
                ))),
            },
        }
    }

    fn render_set(&self, ctx: &mut RenderContext<'_>) -> Result<Fragment> {
        let mut out = Fragment::new();
        match &self.values {
            Values::List(values) => {
                for (i, (column, value)) in self.columns.iter().zip(values).enumerate() {
                    if i > 0 {
                        out.push_sql(", ");
                    }
                    out.push_sql(&column.unqualified(ctx)?);
                    out.push_sql(" = ");
                    render_scalar(value, ctx, &mut out)?;
                }
            }
            Values::Query(query) => render_query_assignment(ctx, &self.columns, query, &mut out)?,
            Values::QueryThen(query, rest) => {
                let (leading, trailing) = self.columns.split_at(self.columns.len() - rest.len());
                render_query_assignment(ctx, leading, query, &mut out)?;
                for (column, value) in trailing.iter().zip(rest) {
                    out.push_sql(", ");
                    out.push_sql(&column.unqualified(ctx)?);
                    out.push_sql(" = ");
                    render_scalar(value, ctx, &mut out)?;
                }
            }
        }
        Ok(out)
    }
}

fn check_query_width(query: &Statement, columns: usize) -> Result<()> {
    if columns == 1 {
        return check_single_column(query);
    }
    match query.output_width() {
        Some(width) if width != columns => Err(RenderError::malformed(format!(
            "UPDATE assigns a {width}-column subquery to {columns} columns"
        ))),
        _ => Ok(()),
    }
}

// Several columns take a row value: ("c1", "c2") = (SELECT ...).
fn render_query_assignment(
    ctx: &mut RenderContext<'_>,
    columns: &[Column],
    query: &Statement,
    out: &mut Fragment,
) -> Result<()> {
    let names = render_column_names(ctx, columns)?;
    if columns.len() == 1 {
        out.push_sql(&names);
    } else {
        out.push_sql("(");
        out.push_sql(&names);
        out.push_sql(")");
    }
    out.push_sql(" = (");
    query.render(ctx, out)?;
    out.push_sql(")");
    Ok(())
}

impl Render for Update {
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        self.validate()?;
        ctx.nested(|ctx| {
            let with = render_with_list(ctx, &self.with)?;

            let mut from = Fragment::new();
            if !self.from.is_empty() {
                from.push_sql(" FROM ");
                render_from_list(ctx, &self.from, &mut from)?;
            }
            let set = self.render_set(ctx)?;
            let where_clause = render_condition(ctx, " WHERE ", self.where_clause.as_ref())?;
            let returning = render_returning(ctx, &self.returning)?;

            let mut target = Fragment::new();
            self.table.render_target(ctx, &mut target)?;

            out.append(with);
            out.push_sql("UPDATE ");
            out.append(target);
            out.push_sql(" SET ");
            out.append(set);
            out.append(from);
            out.append(where_clause);
            out.append(returning);
            Ok(())
        })
    }
}
