//! INSERT statement.

use crate::error::{RenderError, Result};
use crate::expr::{render_comma_list, Expr, IntoExpr};
use crate::from::{render_with_list, Column, Table, With};
use crate::render::{Fragment, Render, RenderContext};

use super::{
    check_target_columns, render_column_names, render_condition, render_list, render_returning,
    Assignment, SelectItem, Statement,
};

/// Where inserted rows come from.
#[derive(Debug, Clone, Default)]
pub enum InsertSource {
    /// `DEFAULT VALUES`.
    #[default]
    DefaultValues,
    /// `VALUES (...), (...)`.
    Rows(Vec<Vec<Expr>>),
    /// `INSERT ... SELECT`.
    Query(Box<Statement>),
}

/// What to do when a row conflicts.
#[derive(Debug, Clone)]
pub enum ConflictAction {
    /// `DO NOTHING`.
    DoNothing,
    /// `DO UPDATE SET ... [WHERE ...]`.
    DoUpdate {
        /// Assignments; may use [`Expr::Excluded`].
        assignments: Vec<Assignment>,
        /// Optional WHERE on the update.
        where_clause: Option<Expr>,
    },
}

/// `ON CONFLICT [(target)] DO ...`.
#[derive(Debug, Clone)]
pub struct OnConflict {
    /// Conflict target columns; each must belong to the inserted table.
    pub target: Vec<Column>,
    /// Conflict action.
    pub action: ConflictAction,
}

impl OnConflict {
    /// `ON CONFLICT DO NOTHING` on any constraint.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            target: Vec::new(),
            action: ConflictAction::DoNothing,
        }
    }

    /// `ON CONFLICT ("c", ...) DO NOTHING`.
    #[must_use]
    pub fn columns<I>(target: I) -> Self
    where
        I: IntoIterator<Item = Column>,
    {
        Self {
            target: target.into_iter().collect(),
            action: ConflictAction::DoNothing,
        }
    }

    /// Switches to `DO NOTHING`.
    #[must_use]
    pub fn do_nothing(mut self) -> Self {
        self.action = ConflictAction::DoNothing;
        self
    }

    /// Appends a `DO UPDATE SET column = value` assignment.
    #[must_use]
    pub fn set(mut self, column: Column, value: impl IntoExpr) -> Self {
        let assignment = Assignment::new(column, value);
        match &mut self.action {
            ConflictAction::DoUpdate { assignments, .. } => assignments.push(assignment),
            ConflictAction::DoNothing => {
                self.action = ConflictAction::DoUpdate {
                    assignments: vec![assignment],
                    where_clause: None,
                };
            }
        }
        self
    }

    /// Sets the WHERE condition of `DO UPDATE`.
    #[must_use]
    pub fn where_clause(mut self, condition: impl IntoExpr) -> Self {
        let condition = condition.into_expr();
        match &mut self.action {
            ConflictAction::DoUpdate { where_clause, .. } => *where_clause = Some(condition),
            ConflictAction::DoNothing => {
                self.action = ConflictAction::DoUpdate {
                    assignments: Vec::new(),
                    where_clause: Some(condition),
                };
            }
        }
        self
    }

    fn validate(&self, table: &Table) -> Result<()> {
        check_target_columns(table, &self.target)?;
        if let ConflictAction::DoUpdate { assignments, .. } = &self.action {
            if assignments.is_empty() {
                return Err(RenderError::malformed("ON CONFLICT DO UPDATE without assignments"));
            }
            check_target_columns(table, assignments.iter().map(|a| &a.column))?;
        }
        Ok(())
    }
}

impl Render for OnConflict {
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        out.push_sql(" ON CONFLICT");
        if !self.target.is_empty() {
            out.push_sql(" (");
            out.push_sql(&render_column_names(ctx, &self.target)?);
            out.push_sql(")");
        }
        match &self.action {
            ConflictAction::DoNothing => out.push_sql(" DO NOTHING"),
            ConflictAction::DoUpdate {
                assignments,
                where_clause,
            } => {
                out.append(render_list(ctx, " DO UPDATE SET ", assignments)?);
                out.append(render_condition(ctx, " WHERE ", where_clause.as_ref())?);
            }
        }
        Ok(())
    }
}

/// An INSERT statement.
#[derive(Debug, Clone)]
pub struct Insert {
    /// Common table expressions defined before the statement.
    pub with: Vec<With>,
    /// Target table.
    pub table: Table,
    /// Inserted columns; each must belong to `table`.
    pub columns: Vec<Column>,
    /// Row source.
    pub source: InsertSource,
    /// ON CONFLICT clause.
    pub on_conflict: Option<OnConflict>,
    /// RETURNING items.
    pub returning: Vec<SelectItem>,
}

impl Insert {
    /// Creates `INSERT INTO <table> DEFAULT VALUES`.
    #[must_use]
    pub fn new(table: Table) -> Self {
        Self {
            with: Vec::new(),
            table,
            columns: Vec::new(),
            source: InsertSource::DefaultValues,
            on_conflict: None,
            returning: Vec::new(),
        }
    }

    /// Appends inserted columns.
    #[must_use]
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = Column>,
    {
        self.columns.extend(columns);
        self
    }

    /// Appends one row of values.
    #[must_use]
    pub fn values<I>(mut self, row: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let row = row.into_iter().map(IntoExpr::into_expr).collect();
        match &mut self.source {
            InsertSource::Rows(rows) => rows.push(row),
            source => *source = InsertSource::Rows(vec![row]),
        }
        self
    }

    /// Inserts the rows produced by `query`.
    #[must_use]
    pub fn query(mut self, query: impl Into<Statement>) -> Self {
        self.source = InsertSource::Query(Box::new(query.into()));
        self
    }

    /// Inserts a single row of defaults.
    #[must_use]
    pub fn default_values(mut self) -> Self {
        self.source = InsertSource::DefaultValues;
        self
    }

    /// Sets the ON CONFLICT clause.
    #[must_use]
    pub fn on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = Some(on_conflict);
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
        check_target_columns(&self.table, &self.columns)?;
        match &self.source {
            InsertSource::DefaultValues if !self.columns.is_empty() => {
                Err(RenderError::malformed("INSERT with columns but no values"))
            }
            InsertSource::DefaultValues => Ok(()),
            InsertSource::Rows(rows) => {
                if self.columns.is_empty() {
                    return Err(RenderError::malformed("INSERT rows without a column list"));
                }
                if rows.is_empty() {
                    return Err(RenderError::malformed("INSERT without rows"));
                }
                match rows.iter().find(|row| row.len() != self.columns.len()) {
                    Some(row) => Err(RenderError::malformed(format!(
                        "INSERT row has {} values for {} columns",
                        row.len(),
                        self.columns.len()
                    ))),
                    None => Ok(()),
                }
            }
            InsertSource::Query(query) => match query.output_width() {
                Some(width) if !self.columns.is_empty() && width != self.columns.len() => {
                    Err(RenderError::malformed(format!(
                        "INSERT of a {width}-column query into {} columns",
                        self.columns.len()
                    )))
                }
                _ => Ok(()),
            },
        }
    }

    fn render_source(&self, ctx: &mut RenderContext<'_>) -> Result<Fragment> {
        let mut out = Fragment::new();
        match &self.source {
            InsertSource::DefaultValues => out.push_sql(" DEFAULT VALUES"),
            InsertSource::Rows(rows) => {
                out.push_sql(" VALUES ");
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        out.push_sql(", ");
                    }
                    out.push_sql("(");
                    render_comma_list(ctx, row, &mut out)?;
                    out.push_sql(")");
                }
            }
            InsertSource::Query(query) => {
                out.push_sql(" ");
                query.render(ctx, &mut out)?;
            }
        }
        Ok(out)
    }
}

impl Render for Insert {
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        self.validate()?;
        let aliased = ctx.dialect().supports_insert_alias();
        if let Some(on_conflict) = &self.on_conflict {
            if !aliased {
                return Err(RenderError::malformed(format!(
                    "ON CONFLICT is not supported by the {} dialect",
                    ctx.dialect().name()
                )));
            }
            on_conflict.validate(&self.table)?;
        }
        ctx.nested(|ctx| {
            let with = render_with_list(ctx, &self.with)?;
            let source = self.render_source(ctx)?;
            let mut on_conflict = Fragment::new();
            if let Some(clause) = &self.on_conflict {
                clause.render(ctx, &mut on_conflict)?;
            }
            let returning = render_returning(ctx, &self.returning)?;

            let mut target = Fragment::new();
            if aliased {
                self.table.render_target(ctx, &mut target)?;
            } else {
                self.table.render_bare(ctx, &mut target)?;
            }

            out.append(with);
            out.push_sql("INSERT INTO ");
            out.append(target);
            if !self.columns.is_empty() {
                out.push_sql(" (");
                out.push_sql(&render_column_names(ctx, &self.columns)?);
                out.push_sql(")");
            }
            out.append(source);
            out.append(on_conflict);
            out.append(returning);
            Ok(())
        })
    }
}
