//! Expression tree.
//!
//! Every operator renders with explicit parentheses, so the output never
//! relies on SQL operator precedence. Host values passed where an
//! expression is expected are wrapped as literals and always become
//! placeholders.

use std::ops;

use crate::error::{RenderError, Result};
use crate::from::Column;
use crate::quote::{validate_keyword, Keyword};
use crate::render::{Fragment, Render, RenderContext};
use crate::statement::{OrderBy, Select, SelectItem, Statement};
use crate::value::{SqlValue, ToSqlValue};

/// Prefix and postfix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `NOT x`.
    Not,
    /// `- x`.
    Neg,
    /// `x IS NULL`.
    IsNull,
    /// `x IS NOT NULL`.
    IsNotNull,
}

impl UnaryOp {
    /// Returns the SQL spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::Neg => "-",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }

    /// Returns true if the operator follows its operand.
    #[must_use]
    pub const fn is_postfix(self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `=`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `||`
    Concat,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
    /// `ILIKE`
    ILike,
    /// `NOT ILIKE`
    NotILike,
    /// `IS DISTINCT FROM`
    IsDistinctFrom,
    /// `IS NOT DISTINCT FROM`
    IsNotDistinctFrom,
}

impl BinaryOp {
    /// Returns the SQL spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Concat => "||",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::ILike => "ILIKE",
            Self::NotILike => "NOT ILIKE",
            Self::IsDistinctFrom => "IS DISTINCT FROM",
            Self::IsNotDistinctFrom => "IS NOT DISTINCT FROM",
        }
    }
}

/// Operators over any number of operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaryOp {
    /// `a AND b AND ...`
    And,
    /// `a OR b OR ...`
    Or,
}

impl NaryOp {
    /// Returns the SQL spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Right-hand side of IN.
#[derive(Debug, Clone)]
pub enum InList {
    /// `IN (a, b, ...)`.
    Values(Vec<Expr>),
    /// `IN (SELECT ...)`.
    Query(Box<Statement>),
}

/// A SQL expression.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A column of a relation.
    Column(Column),
    /// A bound value; always a placeholder.
    Literal(SqlValue),
    /// `*`.
    Star,
    /// `DEFAULT`.
    Default,
    /// `EXCLUDED."<column>"`, the proposed row inside ON CONFLICT DO UPDATE.
    Excluded(String),
    /// A prefix or postfix operator.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },
    /// A binary operator.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },
    /// AND / OR over a list of operands.
    Nary {
        /// Operator.
        op: NaryOp,
        /// Operands.
        operands: Vec<Expr>,
    },
    /// A function call.
    Function {
        /// Function name, emitted unquoted after an allow-list check.
        name: String,
        /// Arguments.
        args: Vec<Expr>,
        /// Whether to emit `DISTINCT` before the arguments.
        distinct: bool,
    },
    /// `<expr> COLLATE "<collation>"`.
    Collate {
        /// The collated expression.
        expr: Box<Expr>,
        /// Collation name, quoted at render time.
        collation: String,
    },
    /// A parenthesized subquery.
    Subquery(Box<Statement>),
    /// `x [NOT] IN (...)`.
    In {
        /// Tested expression.
        expr: Box<Expr>,
        /// Candidates.
        list: InList,
        /// `NOT IN` if true.
        negated: bool,
    },
    /// `x [NOT] BETWEEN low AND high`.
    Between {
        /// Tested expression.
        expr: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
        /// `NOT BETWEEN` if true.
        negated: bool,
    },
    /// `CAST(x AS type)`.
    Cast {
        /// Cast expression.
        expr: Box<Expr>,
        /// Target type, emitted unquoted after an allow-list check.
        type_name: String,
    },
    /// `CASE WHEN ... THEN ... [ELSE ...] END`.
    Case(Case),
    /// `EXISTS (SELECT ...)`.
    Exists(Box<Statement>),
}

impl Expr {
    /// Creates a literal (placeholder) expression.
    #[must_use]
    pub fn literal<T: ToSqlValue>(value: T) -> Self {
        Self::Literal(value.to_sql_value())
    }

    /// Creates a function call.
    #[must_use]
    pub fn function<I>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        Self::Function {
            name: name.into(),
            args: args.into_iter().map(IntoExpr::into_expr).collect(),
            distinct: false,
        }
    }

    /// Creates an aggregate call over distinct values: `NAME(DISTINCT ...)`.
    #[must_use]
    pub fn function_distinct<I>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        match Self::function(name, args) {
            Self::Function { name, args, .. } => Self::Function {
                name,
                args,
                distinct: true,
            },
            other => other,
        }
    }

    /// `COUNT(*)`.
    #[must_use]
    pub fn count_star() -> Self {
        Self::function("COUNT", [Self::Star])
    }

    /// Wraps an expression (or a bare value) with a collation.
    #[must_use]
    pub fn collate(expr: impl IntoExpr, collation: impl Into<String>) -> Self {
        Self::Collate {
            expr: Box::new(expr.into_expr()),
            collation: collation.into(),
        }
    }

    /// Creates a parenthesized subquery expression.
    #[must_use]
    pub fn subquery(query: impl Into<Statement>) -> Self {
        Self::Subquery(Box::new(query.into()))
    }

    /// Creates `EXISTS (<query>)`.
    #[must_use]
    pub fn exists(query: impl Into<Statement>) -> Self {
        Self::Exists(Box::new(query.into()))
    }

    /// Creates `CAST(<expr> AS <type_name>)`.
    #[must_use]
    pub fn cast(expr: impl IntoExpr, type_name: impl Into<String>) -> Self {
        Self::Cast {
            expr: Box::new(expr.into_expr()),
            type_name: type_name.into(),
        }
    }

    /// Creates `EXCLUDED."<column>"`.
    #[must_use]
    pub fn excluded(column: impl Into<String>) -> Self {
        Self::Excluded(column.into())
    }

    /// Conjunction of all operands: `(a AND b AND ...)`.
    #[must_use]
    pub fn all<I>(operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        Self::Nary {
            op: NaryOp::And,
            operands: operands.into_iter().map(IntoExpr::into_expr).collect(),
        }
    }

    /// Disjunction of all operands: `(a OR b OR ...)`.
    #[must_use]
    pub fn any<I>(operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        Self::Nary {
            op: NaryOp::Or,
            operands: operands.into_iter().map(IntoExpr::into_expr).collect(),
        }
    }

    fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// Conversion into an expression.
///
/// Implemented for expressions, columns, subqueries, and every
/// [`ToSqlValue`] type; host values become literals.
pub trait IntoExpr {
    /// Converts `self` into an expression.
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl IntoExpr for Column {
    fn into_expr(self) -> Expr {
        Expr::Column(self)
    }
}

impl IntoExpr for &Column {
    fn into_expr(self) -> Expr {
        Expr::Column(self.clone())
    }
}

impl IntoExpr for Case {
    fn into_expr(self) -> Expr {
        Expr::Case(self)
    }
}

impl IntoExpr for Select {
    fn into_expr(self) -> Expr {
        Expr::subquery(self)
    }
}

impl IntoExpr for Statement {
    fn into_expr(self) -> Expr {
        Expr::subquery(self)
    }
}

impl<T: ToSqlValue> IntoExpr for T {
    fn into_expr(self) -> Expr {
        Expr::Literal(self.to_sql_value())
    }
}

impl From<Column> for Expr {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

/// Builder methods shared by [`Expr`] and [`Column`].
pub trait ExprOps: IntoExpr + Sized {
    /// `(self = rhs)`
    fn eq(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self.into_expr(), BinaryOp::Eq, rhs.into_expr())
    }

    /// `(self != rhs)`
    fn not_eq(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self.into_expr(), BinaryOp::NotEq, rhs.into_expr())
    }

    /// `(self < rhs)`
    fn lt(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self.into_expr(), BinaryOp::Lt, rhs.into_expr())
    }

    /// `(self <= rhs)`
    fn lt_eq(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self.into_expr(), BinaryOp::LtEq, rhs.into_expr())
    }

    /// `(self > rhs)`
    fn gt(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self.into_expr(), BinaryOp::Gt, rhs.into_expr())
    }

    /// `(self >= rhs)`
    fn gt_eq(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self.into_expr(), BinaryOp::GtEq, rhs.into_expr())
    }

    /// `(self LIKE pattern)`
    fn like(self, pattern: impl IntoExpr) -> Expr {
        Expr::binary(self.into_expr(), BinaryOp::Like, pattern.into_expr())
    }

    /// `(self NOT LIKE pattern)`
    fn not_like(self, pattern: impl IntoExpr) -> Expr {
        Expr::binary(self.into_expr(), BinaryOp::NotLike, pattern.into_expr())
    }

    /// `(self ILIKE pattern)`
    fn ilike(self, pattern: impl IntoExpr) -> Expr {
        Expr::binary(self.into_expr(), BinaryOp::ILike, pattern.into_expr())
    }

    /// `(self NOT ILIKE pattern)`
    fn not_ilike(self, pattern: impl IntoExpr) -> Expr {
        Expr::binary(self.into_expr(), BinaryOp::NotILike, pattern.into_expr())
    }

    /// `(self || rhs)`
    fn concat(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self.into_expr(), BinaryOp::Concat, rhs.into_expr())
    }

    /// `(self IS DISTINCT FROM rhs)`
    fn is_distinct_from(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self.into_expr(), BinaryOp::IsDistinctFrom, rhs.into_expr())
    }

    /// `(self IS NOT DISTINCT FROM rhs)`
    fn is_not_distinct_from(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(self.into_expr(), BinaryOp::IsNotDistinctFrom, rhs.into_expr())
    }

    /// `(self IS NULL)`
    fn is_null(self) -> Expr {
        Expr::unary(UnaryOp::IsNull, self.into_expr())
    }

    /// `(self IS NOT NULL)`
    fn is_not_null(self) -> Expr {
        Expr::unary(UnaryOp::IsNotNull, self.into_expr())
    }

    /// `(self AND rhs)`
    fn and(self, rhs: impl IntoExpr) -> Expr {
        Expr::all([self.into_expr(), rhs.into_expr()])
    }

    /// `(self OR rhs)`
    fn or(self, rhs: impl IntoExpr) -> Expr {
        Expr::any([self.into_expr(), rhs.into_expr()])
    }

    /// `(NOT self)`
    fn not(self) -> Expr {
        Expr::unary(UnaryOp::Not, self.into_expr())
    }

    /// `(self BETWEEN low AND high)`
    fn between(self, low: impl IntoExpr, high: impl IntoExpr) -> Expr {
        Expr::Between {
            expr: Box::new(self.into_expr()),
            low: Box::new(low.into_expr()),
            high: Box::new(high.into_expr()),
            negated: false,
        }
    }

    /// `(self NOT BETWEEN low AND high)`
    fn not_between(self, low: impl IntoExpr, high: impl IntoExpr) -> Expr {
        Expr::Between {
            expr: Box::new(self.into_expr()),
            low: Box::new(low.into_expr()),
            high: Box::new(high.into_expr()),
            negated: true,
        }
    }

    /// `(self IN (a, b, ...))`
    fn in_list<I>(self, values: I) -> Expr
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        Expr::In {
            expr: Box::new(self.into_expr()),
            list: InList::Values(values.into_iter().map(IntoExpr::into_expr).collect()),
            negated: false,
        }
    }

    /// `(self NOT IN (a, b, ...))`
    fn not_in_list<I>(self, values: I) -> Expr
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        Expr::In {
            expr: Box::new(self.into_expr()),
            list: InList::Values(values.into_iter().map(IntoExpr::into_expr).collect()),
            negated: true,
        }
    }

    /// `(self IN (SELECT ...))`
    fn in_query(self, query: impl Into<Statement>) -> Expr {
        Expr::In {
            expr: Box::new(self.into_expr()),
            list: InList::Query(Box::new(query.into())),
            negated: false,
        }
    }

    /// `(self NOT IN (SELECT ...))`
    fn not_in_query(self, query: impl Into<Statement>) -> Expr {
        Expr::In {
            expr: Box::new(self.into_expr()),
            list: InList::Query(Box::new(query.into())),
            negated: true,
        }
    }

    /// `self COLLATE "collation"`
    fn collate(self, collation: impl Into<String>) -> Expr {
        Expr::collate(self.into_expr(), collation)
    }

    /// `CAST(self AS type_name)`
    fn cast(self, type_name: impl Into<String>) -> Expr {
        Expr::cast(self.into_expr(), type_name)
    }

    /// Sorts ascending.
    fn asc(self) -> OrderBy {
        OrderBy::asc(self.into_expr())
    }

    /// Sorts descending.
    fn desc(self) -> OrderBy {
        OrderBy::desc(self.into_expr())
    }

    /// Names the expression in a select list: `self AS "alias"`.
    fn aliased(self, alias: impl Into<String>) -> SelectItem {
        SelectItem::aliased(self.into_expr(), alias)
    }
}

impl ExprOps for Expr {}
impl ExprOps for Column {}

macro_rules! binary_operator {
    ($ty:ty, $trait:ident, $method:ident, $op:expr) => {
        impl<R: IntoExpr> ops::$trait<R> for $ty {
            type Output = Expr;

            fn $method(self, rhs: R) -> Expr {
                Expr::binary(self.into_expr(), $op, rhs.into_expr())
            }
        }
    };
}

macro_rules! expression_operators {
    ($($ty:ty),*) => {$(
        binary_operator!($ty, Add, add, BinaryOp::Add);
        binary_operator!($ty, Sub, sub, BinaryOp::Sub);
        binary_operator!($ty, Mul, mul, BinaryOp::Mul);
        binary_operator!($ty, Div, div, BinaryOp::Div);
        binary_operator!($ty, Rem, rem, BinaryOp::Mod);

        impl<R: IntoExpr> ops::BitAnd<R> for $ty {
            type Output = Expr;

            fn bitand(self, rhs: R) -> Expr {
                ExprOps::and(self, rhs)
            }
        }

        impl<R: IntoExpr> ops::BitOr<R> for $ty {
            type Output = Expr;

            fn bitor(self, rhs: R) -> Expr {
                ExprOps::or(self, rhs)
            }
        }

        impl ops::Neg for $ty {
            type Output = Expr;

            fn neg(self) -> Expr {
                Expr::unary(UnaryOp::Neg, self.into_expr())
            }
        }
    )*};
}

expression_operators!(Expr, Column);

/// A searched CASE expression.
#[derive(Debug, Clone, Default)]
pub struct Case {
    branches: Vec<(Expr, Expr)>,
    otherwise: Option<Box<Expr>>,
}

impl Case {
    /// Creates a CASE with no branches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `WHEN condition THEN result`.
    #[must_use]
    pub fn when(mut self, condition: impl IntoExpr, result: impl IntoExpr) -> Self {
        self.branches.push((condition.into_expr(), result.into_expr()));
        self
    }

    /// Sets `ELSE result`.
    #[must_use]
    pub fn otherwise(mut self, result: impl IntoExpr) -> Self {
        self.otherwise = Some(Box::new(result.into_expr()));
        self
    }
}

impl Render for Case {
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        if self.branches.is_empty() {
            return Err(RenderError::malformed("CASE without WHEN branches"));
        }
        out.push_sql("CASE");
        for (condition, result) in &self.branches {
            out.push_sql(" WHEN ");
            condition.render(ctx, out)?;
            out.push_sql(" THEN ");
            result.render(ctx, out)?;
        }
        if let Some(otherwise) = &self.otherwise {
            out.push_sql(" ELSE ");
            otherwise.render(ctx, out)?;
        }
        out.push_sql(" END");
        Ok(())
    }
}

/// Renders `items` separated by `, `.
pub(crate) fn render_comma_list<T: Render>(
    ctx: &mut RenderContext<'_>,
    items: &[T],
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

/// Fails unless `query` yields exactly one column (when that is knowable).
pub(crate) fn check_single_column(query: &Statement) -> Result<()> {
    match query.output_width() {
        Some(1) | None => Ok(()),
        Some(width) => Err(RenderError::TypeMismatch {
            expected: "single-column subquery",
            found: format!("subquery with {width} columns"),
        }),
    }
}

fn render_subquery(query: &Statement, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
    out.push_sql("(");
    query.render(ctx, out)?;
    out.push_sql(")");
    Ok(())
}

impl Render for Expr {
    fn render(&self, ctx: &mut RenderContext<'_>, out: &mut Fragment) -> Result<()> {
        match self {
            Self::Column(column) => column.render(ctx, out)?,
            Self::Literal(value) => out.push_param(value.clone()),
            Self::Star => out.push_sql("*"),
            Self::Default => out.push_sql("DEFAULT"),
            Self::Excluded(column) => {
                out.push_sql("EXCLUDED.");
                out.push_sql(&ctx.quote(column)?);
            }
            Self::Unary { op, operand } => {
                out.push_sql("(");
                if op.is_postfix() {
                    operand.render(ctx, out)?;
                    out.push_sql(" ");
                    out.push_sql(op.as_str());
                } else {
                    out.push_sql(op.as_str());
                    out.push_sql(" ");
                    operand.render(ctx, out)?;
                }
                out.push_sql(")");
            }
            Self::Binary { left, op, right } => {
                let spelled = if *op == BinaryOp::Mod
                    && ctx.dialect().placeholder_style().escapes_percent()
                {
                    "%%"
                } else {
                    op.as_str()
                };
                out.push_sql("(");
                left.render(ctx, out)?;
                out.push_sql(" ");
                out.push_sql(spelled);
                out.push_sql(" ");
                right.render(ctx, out)?;
                out.push_sql(")");
            }
            Self::Nary { op, operands } => match operands.as_slice() {
                [] => {
                    return Err(RenderError::malformed(format!(
                        "{} without operands",
                        op.as_str()
                    )));
                }
                [only] => only.render(ctx, out)?,
                _ => {
                    out.push_sql("(");
                    for (i, operand) in operands.iter().enumerate() {
                        if i > 0 {
                            out.push_sql(" ");
                            out.push_sql(op.as_str());
                            out.push_sql(" ");
                        }
                        operand.render(ctx, out)?;
                    }
                    out.push_sql(")");
                }
            },
            Self::Function {
                name,
                args,
                distinct,
            } => {
                out.push_sql(validate_keyword(Keyword::Function, name)?);
                out.push_sql("(");
                if *distinct {
                    out.push_sql("DISTINCT ");
                }
                render_comma_list(ctx, args, out)?;
                out.push_sql(")");
            }
            Self::Collate { expr, collation } => {
                let collation = ctx.quote(collation)?;
                expr.render(ctx, out)?;
                out.push_sql(" COLLATE ");
                out.push_sql(&collation);
            }
            Self::Subquery(query) => render_subquery(query, ctx, out)?,
            Self::In {
                expr,
                list,
                negated,
            } => {
                out.push_sql("(");
                expr.render(ctx, out)?;
                out.push_sql(if *negated { " NOT IN " } else { " IN " });
                match list {
                    InList::Values(values) if values.is_empty() => {
                        return Err(RenderError::malformed("IN with an empty list"));
                    }
                    InList::Values(values) => {
                        out.push_sql("(");
                        render_comma_list(ctx, values, out)?;
                        out.push_sql(")");
                    }
                    InList::Query(query) => {
                        check_single_column(query)?;
                        render_subquery(query, ctx, out)?;
                    }
                }
                out.push_sql(")");
            }
            Self::Between {
                expr,
                low,
                high,
                negated,
            } => {
                out.push_sql("(");
                expr.render(ctx, out)?;
                out.push_sql(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                low.render(ctx, out)?;
                out.push_sql(" AND ");
                high.render(ctx, out)?;
                out.push_sql(")");
            }
            Self::Cast { expr, type_name } => {
                let type_name = validate_keyword(Keyword::Type, type_name)?;
                out.push_sql("CAST(");
                expr.render(ctx, out)?;
                out.push_sql(" AS ");
                out.push_sql(type_name);
                out.push_sql(")");
            }
            Self::Case(case) => case.render(ctx, out)?,
            Self::Exists(query) => {
                out.push_sql("(EXISTS ");
                render_subquery(query, ctx, out)?;
                out.push_sql(")");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::PostgresDialect;
    use crate::from::Table;
    use crate::render::render;

    fn sql(expr: &Expr) -> String {
        render(expr).unwrap().0
    }

    #[test]
    fn test_binary_is_parenthesized() {
        let t = Table::new("t");
        let expr = t.col("a").eq(1) & t.col("b").gt(t.col("c"));
        let (text, params) = render(&expr).unwrap();
        assert_eq!(text, "((\"a\" = %s) AND (\"b\" > \"c\"))");
        assert_eq!(params, vec![SqlValue::Int(1)]);
    }

    #[test]
    fn test_arithmetic_operators() {
        let t = Table::new("t");
        assert_eq!(sql(&((t.col("a") + 1) * t.col("b"))), "((\"a\" + %s) * \"b\")");
        assert_eq!(sql(&-t.col("a")), "(- \"a\")");
        assert_eq!(sql(&t.col("a").concat("x")), "(\"a\" || %s)");
    }

    #[test]
    fn test_modulo_escapes_percent_for_format_placeholders() {
        let t = Table::new("t");
        let expr = t.col("a") % 2;
        assert_eq!(sql(&expr), "(\"a\" %% %s)");
        let (text, _) = expr.build_with(&PostgresDialect::new()).unwrap();
        assert_eq!(text, "(\"a\" % $1)");
    }

    #[test]
    fn test_unary_operators() {
        let t = Table::new("t");
        assert_eq!(sql(&t.col("a").is_null()), "(\"a\" IS NULL)");
        assert_eq!(sql(&t.col("a").is_not_null()), "(\"a\" IS NOT NULL)");
        assert_eq!(sql(&t.col("a").not()), "(NOT \"a\")");
        assert_eq!(sql(&t.col("a").eq(1).not()), "(NOT (\"a\" = %s))");
    }

    #[test]
    fn test_nary() {
        let t = Table::new("t");
        let expr = Expr::any([t.col("a").eq(1), t.col("b").eq(2), t.col("c").eq(3)]);
        let (text, params) = render(&expr).unwrap();
        assert_eq!(text, "((\"a\" = %s) OR (\"b\" = %s) OR (\"c\" = %s))");
        assert_eq!(params.len(), 3);

        assert_eq!(sql(&Expr::all([t.col("a").eq(1)])), "(\"a\" = %s)");
        let err = render(&Expr::all(Vec::<Expr>::new())).unwrap_err();
        assert!(matches!(err, RenderError::MalformedStatement(_)));
    }

    #[test]
    fn test_functions() {
        let t = Table::new("t");
        assert_eq!(
            sql(&Expr::function("COALESCE", [t.col("a").into_expr(), Expr::literal(0)])),
            "COALESCE(\"a\", %s)"
        );
        assert_eq!(sql(&Expr::count_star()), "COUNT(*)");
        assert_eq!(
            sql(&Expr::function_distinct("COUNT", [t.col("a")])),
            "COUNT(DISTINCT \"a\")"
        );
        let err = render(&Expr::function("now(); DROP TABLE t; --", Vec::<Expr>::new())).unwrap_err();
        assert!(matches!(err, RenderError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_in_and_between() {
        let t = Table::new("t");
        let (text, params) = render(&t.col("a").in_list([1, 2, 3])).unwrap();
        assert_eq!(text, "(\"a\" IN (%s, %s, %s))");
        assert_eq!(params, vec![SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)]);

        assert_eq!(
            sql(&t.col("a").not_between(1, 10)),
            "(\"a\" NOT BETWEEN %s AND %s)"
        );

        let err = render(&t.col("a").in_list(Vec::<i32>::new())).unwrap_err();
        assert!(matches!(err, RenderError::MalformedStatement(_)));
    }

    #[test]
    fn test_in_query_requires_single_column() {
        let t = Table::new("t");
        let u = Table::new("u");
        let (text, _) = render(&t.col("a").in_query(u.select([u.col("id")]))).unwrap();
        assert_eq!(text, "(\"a\" IN (SELECT \"a\".\"id\" FROM \"u\" AS \"a\"))");

        let err = render(&t.col("a").in_query(u.select([u.col("id"), u.col("x")]))).unwrap_err();
        assert!(matches!(err, RenderError::TypeMismatch { .. }));
    }

    #[test]
    fn test_cast_and_case() {
        let t = Table::new("t");
        assert_eq!(
            sql(&t.col("a").cast("NUMERIC(10, 2)")),
            "CAST(\"a\" AS NUMERIC(10, 2))"
        );
        assert!(render(&t.col("a").cast("int); DROP TABLE t; --")).is_err());

        let case = Case::new()
            .when(t.col("a").gt(0), "positive")
            .otherwise("other");
        let (text, params) = render(&case.into_expr()).unwrap();
        assert_eq!(text, "CASE WHEN (\"a\" > %s) THEN %s ELSE %s END");
        assert_eq!(params.len(), 3);

        assert!(render(&Case::new().into_expr()).is_err());
    }

    #[test]
    fn test_literal_values_are_never_inlined() {
        let malicious = "'; DROP TABLE users; --";
        let t = Table::new("users");
        let (text, params) = render(&t.col("name").eq(malicious)).unwrap();
        assert_eq!(text, "(\"name\" = %s)");
        assert_eq!(params, vec![SqlValue::Text(String::from(malicious))]);
    }
}
