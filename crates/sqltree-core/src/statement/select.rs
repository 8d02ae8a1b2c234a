//! SELECT statement.

use crate::dialect::{Dialect, LimitStyle};
use crate::error::Result;
use crate::expr::{render_comma_list, Expr, IntoExpr};
use crate::from::{render_from_list, render_with_list, DerivedTable, FromItem, With};
use crate::render::{Fragment, Render, RenderContext};

use super::{render_condition, render_list, OrderBy, SelectItem};

/// A SELECT statement.
///
/// Fields are public so a built query can be adjusted in place and
/// rendered again.
#[derive(Debug, Clone, Default)]
pub struct Select {
    /// Common table expressions defined before the statement.
    pub with: Vec<With>,
    /// `SELECT DISTINCT`.
    pub distinct: bool,
    /// Select list; empty means `*`.
    pub columns: Vec<SelectItem>,
    /// FROM items.
    pub from: Vec<FromItem>,
    /// WHERE condition.
    pub where_clause: Option<Expr>,
    /// GROUP BY keys.
    pub group_by: Vec<Expr>,
    /// HAVING condition.
    pub having: Option<Expr>,
    /// ORDER BY items.
    pub order_by: Vec<OrderBy>,
    /// LIMIT.
    pub limit: Option<u64>,
    /// OFFSET.
    pub offset: Option<u64>,
}

impl Select {
    /// Creates an empty `SELECT *`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends items to the select list.
    #[must_use]
    pub fn columns<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SelectItem>,
    {
        self.columns.extend(items.into_iter().map(Into::into));
        self
    }

    /// Appends one item to the select list.
    #[must_use]
    pub fn column(mut self, item: impl Into<SelectItem>) -> Self {
        self.columns.push(item.into());
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

    /// Appends GROUP BY keys.
    #[must_use]
    pub fn group_by<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        self.group_by
            .extend(keys.into_iter().map(IntoExpr::into_expr));
        self
    }

    /// Sets the HAVING condition.
    #[must_use]
    pub fn having(mut self, condition: impl IntoExpr) -> Self {
        self.having = Some(condition.into_expr());
        self
    }

    /// Appends ORDER BY items.
    #[must_use]
    pub fn order_by<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OrderBy>,
    {
        self.order_by.extend(items.into_iter().map(Into::into));
        self
    }

    /// Sets LIMIT.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets OFFSET.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Sets DISTINCT.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Adds a common table expression.
    #[must_use]
    pub fn with(mut self, cte: With) -> Self {
        self.with.push(cte);
        self
    }

    /// Wraps this query as a derived table for use in FROM.
    #[must_use]
    pub fn into_derived(self) -> DerivedTable {
        DerivedTable::new(self)
    }

    pub(crate) fn output_width(&self) -> Option<usize> {
        if self.columns.is_empty() || self.columns.iter().any(SelectItem::is_wildcard) {
            None
        } else {
            Some(self.columns.len())
        }
    }

    fn render_limit(&self, dialect: &dyn Dialect, out: &mut Fragment) {
        match dialect.limit_style() {
            LimitStyle::Limit => {
                match (self.limit, self.offset, dialect.max_limit()) {
                    (Some(n), _, _) => out.push_sql(&format!(" LIMIT {n}")),
                    (None, Some(_), Some(max)) => out.push_sql(&format!(" LIMIT {max}")),
                    _ => {}
                }
                if let Some(m) = self.offset {
                    out.push_sql(&format!(" OFFSET {m}"));
                }
            }
            LimitStyle::Fetch => {
                if let Some(m) = self.offset {
                    out.push_sql(&format!(" OFFSET {m} ROWS"));
                }
                if let Some(n) = self.limit {
                    out.push_sql(&format!(" FETCH FIRST {n} ROWS ONLY"));
                }
            }
        }
    }
}

impl Render for Select {
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        ctx.nested(|ctx| {
            let with = render_with_list(ctx, &self.with)?;

            let mut from = Fragment::new();
            if !self.from.is_empty() {
                from.push_sql(" FROM ");
                render_from_list(ctx, &self.from, &mut from)?;
            }
            let where_clause = render_condition(ctx, " WHERE ", self.where_clause.as_ref())?;
            let group_by = render_list(ctx, " GROUP BY ", &self.group_by)?;
            let having = render_condition(ctx, " HAVING ", self.having.as_ref())?;
            let order_by = render_list(ctx, " ORDER BY ", &self.order_by)?;

            let mut columns = Fragment::new();
            if self.columns.is_empty() {
                columns.push_sql("*");
            } else {
                render_comma_list(ctx, &self.columns, &mut columns)?;
            }

            out.append(with);
            out.push_sql(if self.distinct { "SELECT DISTINCT " } else { "SELECT " });
            out.append(columns);
            out.append(from);
            out.append(where_clause);
            out.append(group_by);
            out.append(having);
            out.append(order_by);
            self.render_limit(ctx.dialect(), out);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{DialectConfig, PostgresDialect};
    use crate::expr::ExprOps;
    use crate::from::Table;
    use crate::value::SqlValue;

    #[test]
    fn test_simple_select() {
        let users = Table::new("users");
        let (sql, params) = users.select([users.col("id"), users.col("name")]).build().unwrap();
        assert_eq!(sql, "SELECT \"a\".\"id\", \"a\".\"name\" FROM \"users\" AS \"a\"");
        assert!(params.is_empty());
    }

    #[test]
    fn test_select_all_and_distinct() {
        let users = Table::new("users");
        let (sql, _) = users.select_all().build().unwrap();
        assert_eq!(sql, "SELECT * FROM \"users\" AS \"a\"");

        let (sql, _) = users.select([users.col("status")]).distinct().build().unwrap();
        assert_eq!(sql, "SELECT DISTINCT \"a\".\"status\" FROM \"users\" AS \"a\"");
    }

    #[test]
    fn test_select_with_where() {
        let users = Table::new("users");
        let (sql, params) = users
            .select_all()
            .where_clause(users.col("active").eq(true) & users.col("age").gt_eq(18))
            .build()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM \"users\" AS \"a\" WHERE ((\"a\".\"active\" = %s) AND (\"a\".\"age\" >= %s))"
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_select_with_group_by_having() {
        let orders = Table::new("orders");
        let query = orders
            .select([
                SelectItem::from(orders.col("user_id")),
                Expr::count_star().aliased("n"),
            ])
            .group_by([orders.col("user_id")])
            .having(Expr::count_star().gt(5));
        let (sql, params) = query.build().unwrap();
        assert_eq!(
            sql,
            "SELECT \"a\".\"user_id\", COUNT(*) AS \"n\" FROM \"orders\" AS \"a\" \
             GROUP BY \"a\".\"user_id\" HAVING (COUNT(*) > %s)"
        );
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_select_with_limit_offset() {
        let users = Table::new("users");
        let query = users.select_all().limit(10).offset(20);
        let (sql, _) = query.build().unwrap();
        assert_eq!(sql, "SELECT * FROM \"users\" AS \"a\" LIMIT 10 OFFSET 20");

        let fetch = DialectConfig {
            limit: LimitStyle::Fetch,
            ..DialectConfig::default()
        };
        let (sql, _) = query.build_with(&fetch).unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM \"users\" AS \"a\" OFFSET 20 ROWS FETCH FIRST 10 ROWS ONLY"
        );
    }

    #[test]
    fn test_offset_only_uses_max_limit() {
        let users = Table::new("users");
        let query = users.select_all().offset(5);
        let (sql, _) = query.build().unwrap();
        assert_eq!(sql, "SELECT * FROM \"users\" AS \"a\" OFFSET 5");

        let capped = DialectConfig {
            max_limit: Some(-1),
            ..DialectConfig::default()
        };
        let (sql, _) = query.build_with(&capped).unwrap();
        assert_eq!(sql, "SELECT * FROM \"users\" AS \"a\" LIMIT -1 OFFSET 5");
    }

    #[test]
    fn test_select_without_from() {
        let (sql, params) = Select::new().column(Expr::literal(1)).build().unwrap();
        assert_eq!(sql, "SELECT %s");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_numbered_placeholders_follow_text() {
        let t = Table::new("t");
        let query = t
            .select([t.col("a").eq(1)])
            .where_clause(t.col("b").eq(2));
        let (sql, params) = query.build_with(&PostgresDialect::new()).unwrap();
        assert_eq!(
            sql,
            "SELECT (\"a\".\"a\" = $1) FROM \"t\" AS \"a\" WHERE (\"a\".\"b\" = $2)"
        );
        assert_eq!(params, vec![SqlValue::Int(1), SqlValue::Int(2)]);
    }
}
