//! Relations and FROM items.
//!
//! A relation (table, CTE, derived table) is a shared, immutable handle with
//! an identity. Columns point back to their relation, and every place the
//! relation is mentioned resolves to the same generated alias within one
//! render. Build two handles with the same name to mention a table twice
//! (self-joins, correlated subqueries over the same table).

use std::sync::Arc;

use crate::error::{RenderError, Result};
use crate::expr::{Expr, IntoExpr};
use crate::render::{Fragment, RelationId, Render, RenderContext};
use crate::statement::{Delete, Insert, Select, SelectItem, Statement, Update};

#[derive(Debug)]
struct TableDef {
    id: RelationId,
    name: String,
    schema: Option<String>,
}

/// A database table.
#[derive(Debug, Clone)]
pub struct Table(Arc<TableDef>);

impl Table {
    /// Creates a table reference with a fresh identity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(TableDef {
            id: RelationId::next(),
            name: name.into(),
            schema: None,
        }))
    }

    /// Creates a schema-qualified table reference with a fresh identity.
    #[must_use]
    pub fn with_schema(name: impl Into<String>, schema: impl Into<String>) -> Self {
        Self(Arc::new(TableDef {
            id: RelationId::next(),
            name: name.into(),
            schema: Some(schema.into()),
        }))
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the schema, if any.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.0.schema.as_deref()
    }

    /// Returns the identity of this table.
    #[must_use]
    pub fn id(&self) -> RelationId {
        self.0.id
    }

    /// Returns a column of this table.
    #[must_use]
    pub fn col(&self, name: impl Into<String>) -> Column {
        Column::new(self.clone(), name)
    }

    /// Returns `<alias>.*`.
    #[must_use]
    pub fn star(&self) -> Column {
        self.col("*")
    }

    /// Starts a SELECT of `items` from this table.
    #[must_use]
    pub fn select<I>(&self, items: I) -> Select
    where
        I: IntoIterator,
        I::Item: Into<SelectItem>,
    {
        Select::new().columns(items).from(self.clone())
    }

    /// Starts a `SELECT *` from this table.
    #[must_use]
    pub fn select_all(&self) -> Select {
        Select::new().from(self.clone())
    }

    /// Starts an UPDATE assigning `values[i]` to `columns[i]`.
    #[must_use]
    pub fn update<C, V>(&self, columns: C, values: V) -> Update
    where
        C: IntoIterator<Item = Column>,
        V: IntoIterator,
        V::Item: IntoExpr,
    {
        Update::new(self.clone()).columns(columns).values(values)
    }

    /// Starts an INSERT into this table.
    #[must_use]
    pub fn insert(&self) -> Insert {
        Insert::new(self.clone())
    }

    /// Starts a DELETE from this table.
    #[must_use]
    pub fn delete(&self) -> Delete {
        Delete::new(self.clone())
    }

    /// Starts an INNER JOIN with `right`.
    #[must_use]
    pub fn join(&self, right: impl Into<FromItem>) -> Join {
        Join::new(self.clone(), right, JoinKind::Inner)
    }

    /// Starts a LEFT JOIN with `right`.
    #[must_use]
    pub fn left_join(&self, right: impl Into<FromItem>) -> Join {
        Join::new(self.clone(), right, JoinKind::Left)
    }

    fn render_name(&self, ctx: &RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        if let Some(schema) = self.schema() {
            out.push_sql(&ctx.quote(schema)?);
            out.push_sql(".");
        }
        out.push_sql(&ctx.quote(self.name())?);
        Ok(())
    }

    /// Renders `"schema"."name" AS "alias"` for a statement target.
    pub(crate) fn render_target(
        &self,
        ctx: &mut RenderContext<'_>,
        out: &mut Fragment,
    ) -> Result<()> {
        self.render_name(ctx, out)?;
        ctx.write_alias(self.id(), out)
    }

    /// Writes the table name without an alias.
    pub(crate) fn render_bare(&self, ctx: &RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        self.render_name(ctx, out)
    }
}

#[derive(Debug)]
struct WithDef {
    id: RelationId,
    name: Option<String>,
    columns: Vec<String>,
    recursive: bool,
    query: Statement,
}

/// A common table expression.
///
/// An unnamed CTE is named after its generated alias.
#[derive(Debug, Clone)]
pub struct With(Arc<WithDef>);

impl With {
    /// Creates an unnamed CTE over `query`.
    #[must_use]
    pub fn new(query: impl Into<Statement>) -> Self {
        Self::build(None, Vec::new(), false, query.into())
    }

    /// Creates a CTE with an explicit name.
    #[must_use]
    pub fn named(name: impl Into<String>, query: impl Into<Statement>) -> Self {
        Self::build(Some(name.into()), Vec::new(), false, query.into())
    }

    /// Creates a `WITH RECURSIVE` CTE. The body refers to the CTE by name,
    /// typically through `Table::new(name)`.
    #[must_use]
    pub fn recursive<I, S>(name: impl Into<String>, columns: I, query: impl Into<Statement>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = columns.into_iter().map(Into::into).collect();
        Self::build(Some(name.into()), columns, true, query.into())
    }

    fn build(name: Option<String>, columns: Vec<String>, recursive: bool, query: Statement) -> Self {
        Self(Arc::new(WithDef {
            id: RelationId::next(),
            name,
            columns,
            recursive,
            query,
        }))
    }

    /// Returns the identity of this CTE.
    #[must_use]
    pub fn id(&self) -> RelationId {
        self.0.id
    }

    /// Returns the explicit name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Returns true for `WITH RECURSIVE`.
    #[must_use]
    pub fn is_recursive(&self) -> bool {
        self.0.recursive
    }

    /// Returns the CTE body.
    #[must_use]
    pub fn query(&self) -> &Statement {
        &self.0.query
    }

    /// Returns a column of this CTE.
    #[must_use]
    pub fn col(&self, name: impl Into<String>) -> Column {
        Column::new(self.clone(), name)
    }

    /// Starts a SELECT of `items` from this CTE.
    #[must_use]
    pub fn select<I>(&self, items: I) -> Select
    where
        I: IntoIterator,
        I::Item: Into<SelectItem>,
    {
        Select::new().columns(items).from(self.clone())
    }

    fn quoted_name(&self, ctx: &mut RenderContext<'_>) -> Result<String> {
        match self.name() {
            Some(name) => ctx.quote(name),
            None => ctx.quoted_alias(self.id()),
        }
    }

    /// Renders `"name" ("c1", ...) AS (<body>)` for a WITH list.
    fn render_definition(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        // The CTE is aliased before its body is visited.
        ctx.alias_for(self.id());
        let name = self.quoted_name(ctx)?;
        out.push_sql(&name);
        if !self.0.columns.is_empty() {
            let columns = self
                .0
                .columns
                .iter()
                .map(|c| ctx.quote(c))
                .collect::<Result<Vec<_>>>()?;
            out.push_sql(" (");
            out.push_sql(&columns.join(", "));
            out.push_sql(")");
        }
        out.push_sql(" AS (");
        self.query().render(ctx, out)?;
        out.push_sql(")");
        Ok(())
    }
}

/// Renders `WITH [RECURSIVE] <cte>, ... ` (with a trailing space).
pub(crate) fn render_with_list(ctx: &mut RenderContext<'_>, ctes: &[With]) -> Result<Fragment> {
    let mut out = Fragment::new();
    if ctes.is_empty() {
        return Ok(out);
    }
    out.push_sql("WITH ");
    if ctes.iter().any(With::is_recursive) {
        out.push_sql("RECURSIVE ");
    }
    for (i, cte) in ctes.iter().enumerate() {
        if i > 0 {
            out.push_sql(", ");
        }
        cte.render_definition(ctx, &mut out)?;
    }
    out.push_sql(" ");
    Ok(out)
}

#[derive(Debug)]
struct DerivedDef {
    id: RelationId,
    query: Statement,
}

/// A subquery in FROM position: `(SELECT ...) AS "a"`.
#[derive(Debug, Clone)]
pub struct DerivedTable(Arc<DerivedDef>);

impl DerivedTable {
    /// Wraps `query` as a derived table with a fresh identity.
    #[must_use]
    pub fn new(query: impl Into<Statement>) -> Self {
        Self(Arc::new(DerivedDef {
            id: RelationId::next(),
            query: query.into(),
        }))
    }

    /// Returns the identity of this derived table.
    #[must_use]
    pub fn id(&self) -> RelationId {
        self.0.id
    }

    /// Returns the wrapped query.
    #[must_use]
    pub fn query(&self) -> &Statement {
        &self.0.query
    }

    /// Returns a column of this derived table.
    #[must_use]
    pub fn col(&self, name: impl Into<String>) -> Column {
        Column::new(self.clone(), name)
    }

    /// Starts a SELECT of `items` from this derived table.
    #[must_use]
    pub fn select<I>(&self, items: I) -> Select
    where
        I: IntoIterator,
        I::Item: Into<SelectItem>,
    {
        Select::new().columns(items).from(self.clone())
    }
}

/// Anything a column can belong to.
#[derive(Debug, Clone)]
pub enum Relation {
    /// A table.
    Table(Table),
    /// A common table expression.
    With(With),
    /// A derived table.
    Derived(DerivedTable),
}

impl Relation {
    /// Returns the identity used for alias allocation.
    #[must_use]
    pub fn id(&self) -> RelationId {
        match self {
            Self::Table(t) => t.id(),
            Self::With(w) => w.id(),
            Self::Derived(d) => d.id(),
        }
    }
}

impl From<Table> for Relation {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

impl From<With> for Relation {
    fn from(with: With) -> Self {
        Self::With(with)
    }
}

impl From<DerivedTable> for Relation {
    fn from(derived: DerivedTable) -> Self {
        Self::Derived(derived)
    }
}

/// A column reference.
#[derive(Debug, Clone)]
pub struct Column {
    relation: Relation,
    name: String,
}

impl Column {
    /// Creates a column of `relation`.
    #[must_use]
    pub fn new(relation: impl Into<Relation>, name: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            name: name.into(),
        }
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the relation this column belongs to.
    #[must_use]
    pub const fn relation(&self) -> &Relation {
        &self.relation
    }

    /// Returns true if this column belongs to `table` (same identity).
    #[must_use]
    pub fn belongs_to(&self, table: &Table) -> bool {
        self.relation.id() == table.id()
    }

    /// Renders the bare column name, as used in SET and INSERT column lists.
    pub(crate) fn unqualified(&self, ctx: &RenderContext<'_>) -> Result<String> {
        if self.name == "*" {
            Ok(String::from("*"))
        } else {
            ctx.quote(&self.name)
        }
    }
}

impl Render for Column {
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        let name = self.unqualified(ctx)?;
        if ctx.in_statement() {
            out.push_sql(&ctx.quoted_alias(self.relation.id())?);
            out.push_sql(".");
        }
        out.push_sql(&name);
        Ok(())
    }
}

/// Join types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
}

impl JoinKind {
    /// Returns the SQL keywords for this join type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// A join of two FROM items.
#[derive(Debug, Clone)]
pub struct Join {
    /// Left side.
    pub left: FromItem,
    /// Right side.
    pub right: FromItem,
    /// Join type.
    pub kind: JoinKind,
    /// ON condition; required for every kind except CROSS.
    pub condition: Option<Expr>,
}

impl Join {
    /// Creates a join without a condition.
    #[must_use]
    pub fn new(left: impl Into<FromItem>, right: impl Into<FromItem>, kind: JoinKind) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            kind,
            condition: None,
        }
    }

    /// Sets the ON condition.
    #[must_use]
    pub fn on(mut self, condition: impl IntoExpr) -> Self {
        self.condition = Some(condition.into_expr());
        self
    }

    /// Joins this join with another item.
    #[must_use]
    pub fn join(self, right: impl Into<FromItem>, kind: JoinKind) -> Self {
        Self::new(self, right, kind)
    }
}

impl Render for Join {
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        self.left.render(ctx, out)?;
        out.push_sql(" ");
        out.push_sql(self.kind.as_str());
        out.push_sql(" ");
        self.right.render(ctx, out)?;
        match (&self.condition, self.kind) {
            (Some(_), JoinKind::Cross) => {
                return Err(RenderError::malformed("CROSS JOIN cannot have an ON condition"));
            }
            (Some(condition), _) => {
                out.push_sql(" ON ");
                condition.render(ctx, out)?;
            }
            (None, JoinKind::Cross) => {}
            (None, kind) => {
                return Err(RenderError::malformed(format!(
                    "{} requires an ON condition",
                    kind.as_str()
                )));
            }
        }
        Ok(())
    }
}

/// Anything that can appear in a FROM, USING, or JOIN position.
#[derive(Debug, Clone)]
pub enum FromItem {
    /// A table.
    Table(Table),
    /// A reference to a CTE defined in the statement's WITH list.
    With(With),
    /// A derived table.
    Derived(DerivedTable),
    /// A join.
    Join(Box<Join>),
}

impl FromItem {
    /// Joins this item with `right`.
    #[must_use]
    pub fn join(self, right: impl Into<Self>, kind: JoinKind) -> Join {
        Join::new(self, right, kind)
    }
}

impl Render for FromItem {
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        match self {
            Self::Table(table) => table.render_target(ctx, out),
            Self::With(with) => {
                out.push_sql(&with.quoted_name(ctx)?);
                ctx.write_alias(with.id(), out)
            }
            Self::Derived(derived) => {
                // Inner relations are aliased before the derived table itself.
                out.push_sql("(");
                derived.query().render(ctx, out)?;
                out.push_sql(")");
                ctx.write_alias(derived.id(), out)
            }
            Self::Join(join) => join.render(ctx, out),
        }
    }
}

impl From<Table> for FromItem {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

impl From<With> for FromItem {
    fn from(with: With) -> Self {
        Self::With(with)
    }
}

impl From<DerivedTable> for FromItem {
    fn from(derived: DerivedTable) -> Self {
        Self::Derived(derived)
    }
}

impl From<Join> for FromItem {
    fn from(join: Join) -> Self {
        Self::Join(Box::new(join))
    }
}

impl From<Relation> for FromItem {
    fn from(relation: Relation) -> Self {
        match relation {
            Relation::Table(t) => Self::Table(t),
            Relation::With(w) => Self::With(w),
            Relation::Derived(d) => Self::Derived(d),
        }
    }
}

/// Renders FROM items separated by commas.
pub(crate) fn render_from_list(
    ctx: &mut RenderContext<'_>,
    items: &[FromItem],
    out: &mut Fragment,
) -> Result<()> {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_sql(", ");
        }
        item.render(ctx, out)?;
    }
    Ok(())
}
