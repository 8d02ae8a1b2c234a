//! # sqltree-sqlite
//!
//! SQLite dialect for `sqltree-core`.
//!
//! # How SQLite differs from the generic dialect
//!
//! - **Placeholders**: parameters are spelled `?`.
//! - **[LIMIT]**: SQLite rejects `OFFSET` without `LIMIT`, so an
//!   offset-only query renders `LIMIT -1 OFFSET n`.
//! - **[UPSERT]**: `INSERT ... ON CONFLICT DO NOTHING` and
//!   `ON CONFLICT DO UPDATE SET ...` (since SQLite 3.24.0). The
//!   [`Upsert`] trait adds the common forms to `Insert`.
//! - **[RETURNING]**: supported on INSERT, UPDATE, and DELETE (since
//!   SQLite 3.35.0).
//!
//! [LIMIT]: https://www.sqlite.org/lang_select.html#limitoffset
//! [UPSERT]: https://www.sqlite.org/lang_upsert.html
//! [RETURNING]: https://www.sqlite.org/lang_returning.html
//!
//! ## Example
//!
//! ```rust
//! use sqltree_core::prelude::*;
//! use sqltree_sqlite::{SqliteDialect, Upsert};
//!
//! let users = Table::new("users");
//! let (sql, params) = users
//!     .insert()
//!     .columns([users.col("id"), users.col("name")])
//!     .values([SqlValue::Int(1), SqlValue::Text(String::from("Alice"))])
//!     .upsert([users.col("id")], [users.col("name")])
//!     .build_with(&SqliteDialect::new())
//!     .unwrap();
//! assert_eq!(
//!     sql,
//!     r#"INSERT INTO "users" AS "a" ("id", "name") VALUES (?, ?) ON CONFLICT ("id") DO UPDATE SET "name" = EXCLUDED."name""#
//! );
//! assert_eq!(params.len(), 2);
//! ```

mod dialect;
mod upsert;

pub use dialect::SqliteDialect;
pub use upsert::Upsert;
