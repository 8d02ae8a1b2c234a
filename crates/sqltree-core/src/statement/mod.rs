//! Statements.
//!
//! Each statement renders its clauses into separate fragments in the
//! order relations must receive their aliases, then joins the fragments
//! in the order the clauses appear in the SQL text. Placeholders are only
//! numbered once the whole text is assembled, so `$n` always follows the
//! text even when aliases were handed out in a different order.

mod delete;
mod insert;
mod select;
mod update;

pub use delete::Delete;
pub use insert::{ConflictAction, Insert, InsertSource, OnConflict};
pub use select::Select;
pub use update::{Update, Values};

use crate::error::{RenderError, Result};
use crate::expr::{render_comma_list, Expr, IntoExpr};
use crate::from::{Column, Table};
use crate::render::{Fragment, Render, RenderContext};

/// Any renderable statement.
#[derive(Debug, Clone)]
pub enum Statement {
    /// SELECT.
    Select(Box<Select>),
    /// UPDATE.
    Update(Box<Update>),
    /// INSERT.
    Insert(Box<Insert>),
    /// DELETE.
    Delete(Box<Delete>),
}

impl Statement {
    /// Returns the number of columns this statement yields, if it is known
    /// without a schema.
    ///
    /// `SELECT *` and `t.*` yield an unknown number of columns.
    #[must_use]
    pub fn output_width(&self) -> Option<usize> {
        match self {
            Self::Select(select) => select.output_width(),
            Self::Update(update) => returning_width(&update.returning),
            Self::Insert(insert) => returning_width(&insert.returning),
            Self::Delete(delete) => returning_width(&delete.returning),
        }
    }
}

fn returning_width(items: &[SelectItem]) -> Option<usize> {
    if items.iter().any(SelectItem::is_wildcard) {
        None
    } else {
        Some(items.len())
    }
}

impl From<Select> for Statement {
    fn from(select: Select) -> Self {
        Self::Select(Box::new(select))
    }
}

impl From<Update> for Statement {
    fn from(update: Update) -> Self {
        Self::Update(Box::new(update))
    }
}

impl From<Insert> for Statement {
    fn from(insert: Insert) -> Self {
        Self::Insert(Box::new(insert))
    }
}

impl From<Delete> for Statement {
    fn from(delete: Delete) -> Self {
        Self::Delete(Box::new(delete))
    }
}

impl Render for Statement {
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        match self {
            Self::Select(select) => select.render(ctx, out),
            Self::Update(update) => update.render(ctx, out),
            Self::Insert(insert) => insert.render(ctx, out),
            Self::Delete(delete) => delete.render(ctx, out),
        }
    }
}

/// An item of a select list or RETURNING clause.
#[derive(Debug, Clone)]
pub struct SelectItem {
    /// The selected expression.
    pub expr: Expr,
    /// Output name, rendered as `AS "<alias>"`.
    pub alias: Option<String>,
}

impl SelectItem {
    /// Creates an item with an output name.
    #[must_use]
    pub fn aliased(expr: impl IntoExpr, alias: impl Into<String>) -> Self {
        Self {
            expr: expr.into_expr(),
            alias: Some(alias.into()),
        }
    }

    fn is_wildcard(&self) -> bool {
        match &self.expr {
            Expr::Star => true,
            Expr::Column(column) => column.name() == "*",
            _ => false,
        }
    }
}

impl From<Expr> for SelectItem {
    fn from(expr: Expr) -> Self {
        Self { expr, alias: None }
    }
}

impl From<Column> for SelectItem {
    fn from(column: Column) -> Self {
        Self::from(Expr::Column(column))
    }
}

impl From<&Column> for SelectItem {
    fn from(column: &Column) -> Self {
        Self::from(Expr::Column(column.clone()))
    }
}

impl Render for SelectItem {
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        self.expr.render(ctx, out)?;
        if let Some(alias) = &self.alias {
            out.push_sql(" AS ");
            out.push_sql(&ctx.quote(alias)?);
        }
        Ok(())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// ASC
    Asc,
    /// DESC
    Desc,
}

/// Placement of NULLs in a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    /// NULLS FIRST
    First,
    /// NULLS LAST
    Last,
}

/// An ORDER BY item.
#[derive(Debug, Clone)]
pub struct OrderBy {
    /// Sort key.
    pub expr: Expr,
    /// Direction; omitted from the SQL when unset.
    pub direction: Option<Direction>,
    /// NULL placement; omitted from the SQL when unset.
    pub nulls: Option<NullsOrder>,
}

impl OrderBy {
    /// Sorts by `expr` with the database's default direction.
    #[must_use]
    pub fn new(expr: impl IntoExpr) -> Self {
        Self {
            expr: expr.into_expr(),
            direction: None,
            nulls: None,
        }
    }

    /// Sorts ascending.
    #[must_use]
    pub fn asc(expr: impl IntoExpr) -> Self {
        Self {
            direction: Some(Direction::Asc),
            ..Self::new(expr)
        }
    }

    /// Sorts descending.
    #[must_use]
    pub fn desc(expr: impl IntoExpr) -> Self {
        Self {
            direction: Some(Direction::Desc),
            ..Self::new(expr)
        }
    }

    /// Puts NULLs first.
    #[must_use]
    pub const fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullsOrder::First);
        self
    }

    /// Puts NULLs last.
    #[must_use]
    pub const fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullsOrder::Last);
        self
    }
}

impl From<Expr> for OrderBy {
    fn from(expr: Expr) -> Self {
        Self::new(expr)
    }
}

impl From<Column> for OrderBy {
    fn from(column: Column) -> Self {
        Self::new(column)
    }
}

impl Render for OrderBy {
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        self.expr.render(ctx, out)?;
        match self.direction {
            Some(Direction::Asc) => out.push_sql(" ASC"),
            Some(Direction::Desc) => out.push_sql(" DESC"),
            None => {}
        }
        match self.nulls {
            Some(NullsOrder::First) => out.push_sql(" NULLS FIRST"),
            Some(NullsOrder::Last) => out.push_sql(" NULLS LAST"),
            None => {}
        }
        Ok(())
    }
}

/// `"column" = value` in a SET list.
#[derive(Debug, Clone)]
pub struct Assignment {
    /// Assigned column; rendered unqualified.
    pub column: Column,
    /// New value.
    pub value: Expr,
}

impl Assignment {
    /// Creates an assignment.
    #[must_use]
    pub fn new(column: Column, value: impl IntoExpr) -> Self {
        Self {
            column,
            value: value.into_expr(),
        }
    }
}

impl Render for Assignment {
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        out.push_sql(&self.column.unqualified(ctx)?);
        out.push_sql(" = ");
        render_scalar(&self.value, ctx, out)
    }
}

/// Renders a value in a scalar position, rejecting multi-column subqueries.
pub(crate) fn render_scalar(
    value: &Expr,
    ctx: &mut RenderContext<'_>,
    out: &mut Fragment,
) -> Result<()> {
    if let Expr::Subquery(query) = value {
        crate::expr::check_single_column(query)?;
    }
    value.render(ctx, out)
}

/// Renders `<keyword><condition>` if a condition is set.
pub(crate) fn render_condition(
    ctx: &mut RenderContext<'_>,
    keyword: &str,
    condition: Option<&Expr>,
) -> Result<Fragment> {
    let mut out = Fragment::new();
    if let Some(condition) = condition {
        out.push_sql(keyword);
        condition.render(ctx, &mut out)?;
    }
    Ok(out)
}

/// Renders `<keyword><a>, <b>, ...` if `items` is not empty.
pub(crate) fn render_list<T: Render>(
    ctx: &mut RenderContext<'_>,
    keyword: &str,
    items: &[T],
) -> Result<Fragment> {
    let mut out = Fragment::new();
    if !items.is_empty() {
        out.push_sql(keyword);
        render_comma_list(ctx, items, &mut out)?;
    }
    Ok(out)
}

/// Renders ` RETURNING ...` if requested and supported.
pub(crate) fn render_returning(ctx: &mut RenderContext<'_>, items: &[SelectItem]) -> Result<Fragment> {
    if !items.is_empty() && !ctx.dialect().supports_returning() {
        return Err(RenderError::malformed(format!(
            "RETURNING is not supported by the {} dialect",
            ctx.dialect().name()
        )));
    }
    render_list(ctx, " RETURNING ", items)
}

/// Renders `"c1", "c2", ...` for a SET or INSERT column list.
pub(crate) fn render_column_names(ctx: &RenderContext<'_>, columns: &[Column]) -> Result<String> {
    let names = columns
        .iter()
        .map(|c| c.unqualified(ctx))
        .collect::<Result<Vec<_>>>()?;
    Ok(names.join(", "))
}

/// Fails if any column does not belong to `table`.
pub(crate) fn check_target_columns<'c>(
    table: &Table,
    columns: impl IntoIterator<Item = &'c Column>,
) -> Result<()> {
    for column in columns {
        if !column.belongs_to(table) {
            return Err(RenderError::malformed(format!(
                "column {:?} does not belong to the target table {:?}",
                column.name(),
                table.name()
            )));
        }
    }
    Ok(())
}
