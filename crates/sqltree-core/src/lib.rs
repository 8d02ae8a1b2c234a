//! # sqltree-core
//!
//! Composable SQL expression trees rendered to parameterized queries.
//!
//! This crate provides:
//! - Relations (tables, CTEs, derived tables) with identity-based aliasing
//! - An expression tree with explicit parenthesization
//! - SELECT, UPDATE, INSERT and DELETE statements that can be mutated and
//!   rendered again at any time
//! - Pluggable dialects for identifier quoting and placeholder spelling
//!
//! ## Aliasing
//!
//! Every relation gets a short generated alias the first time it is
//! visited while rendering, and every reference to it uses that alias:
//!
//! ```rust
//! use sqltree_core::prelude::*;
//!
//! let t1 = Table::new("t1");
//! let t2 = Table::new("t2");
//! let query = t1.update(
//!     [t1.col("c")],
//!     [t2.select([t2.col("c")]).where_clause(t2.col("i").eq(t1.col("i")))],
//! );
//! let (sql, params) = query.build().unwrap();
//! assert_eq!(
//!     sql,
//!     r#"UPDATE "t1" AS "b" SET "c" = (SELECT "a"."c" FROM "t2" AS "a" WHERE ("a"."i" = "b"."i"))"#
//! );
//! assert!(params.is_empty());
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values are never written into the SQL text, and identifiers that could
//! break out of their quotes are rejected when rendered:
//!
//! ```rust
//! use sqltree_core::prelude::*;
//!
//! let users = Table::new("users");
//! let user_input = "'; DROP TABLE users; --";
//! let (sql, params) = users
//!     .select([users.col("id")])
//!     .where_clause(users.col("name").eq(user_input))
//!     .build()
//!     .unwrap();
//! assert_eq!(sql, r#"SELECT "a"."id" FROM "users" AS "a" WHERE ("a"."name" = %s)"#);
//! assert_eq!(params, vec![SqlValue::Text(String::from(user_input))]);
//!
//! let bad = Expr::collate(users.col("name"), "C\";");
//! assert!(matches!(bad.build(), Err(RenderError::InvalidIdentifier { .. })));
//! ```

pub mod dialect;
pub mod error;
pub mod expr;
pub mod from;
pub mod quote;
pub mod render;
pub mod statement;
pub mod value;

pub use dialect::{Dialect, DialectConfig, GenericDialect, MySqlDialect, PostgresDialect};
pub use error::{RenderError, Result};
pub use expr::{Case, Expr, ExprOps, IntoExpr};
pub use from::{Column, DerivedTable, FromItem, Join, JoinKind, Relation, Table, With};
pub use render::{render, render_with, Fragment, Render, RenderContext};
pub use statement::{Delete, Insert, OnConflict, OrderBy, Select, SelectItem, Statement, Update};
pub use value::{SqlValue, ToSqlValue};

/// Everything needed to build and render queries.
pub mod prelude {
    pub use crate::dialect::{
        Dialect, DialectConfig, GenericDialect, MySqlDialect, PostgresDialect,
    };
    pub use crate::error::RenderError;
    pub use crate::expr::{Case, Expr, ExprOps, IntoExpr};
    pub use crate::from::{Column, DerivedTable, FromItem, Join, JoinKind, Table, With};
    pub use crate::render::{render, render_with, Render};
    pub use crate::statement::{
        Delete, Insert, OnConflict, OrderBy, Select, SelectItem, Statement, Update,
    };
    pub use crate::value::{SqlValue, ToSqlValue};
}
