//! SQLite UPSERT (INSERT ... ON CONFLICT) shorthand.

use sqltree_core::expr::Expr;
use sqltree_core::from::Column;
use sqltree_core::statement::{Insert, OnConflict};

/// Adds the common UPSERT forms to [`Insert`].
pub trait Upsert: Sized {
    /// `ON CONFLICT (<target>) DO UPDATE SET "c" = EXCLUDED."c"` for every
    /// column in `update`, or `DO NOTHING` if `update` is empty.
    #[must_use]
    fn upsert<T, U>(self, target: T, update: U) -> Self
    where
        T: IntoIterator<Item = Column>,
        U: IntoIterator<Item = Column>;

    /// `ON CONFLICT (<target>) DO NOTHING`.
    #[must_use]
    fn insert_or_ignore<T>(self, target: T) -> Self
    where
        T: IntoIterator<Item = Column>,
    {
        self.upsert(target, std::iter::empty())
    }
}

impl Upsert for Insert {
    fn upsert<T, U>(self, target: T, update: U) -> Self
    where
        T: IntoIterator<Item = Column>,
        U: IntoIterator<Item = Column>,
    {
        let clause = update
            .into_iter()
            .fold(OnConflict::columns(target), |clause, column| {
                let excluded = Expr::excluded(column.name());
                clause.set(column, excluded)
            });
        self.on_conflict(clause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqltree_core::from::Table;
    use sqltree_core::render::Render;
    use sqltree_core::value::SqlValue;

    use crate::SqliteDialect;

    #[test]
    fn test_upsert_do_update() {
        let users = Table::new("users");
        let query = users
            .insert()
            .columns([users.col("id"), users.col("name"), users.col("email")])
            .values([
                SqlValue::Int(1),
                SqlValue::Text(String::from("Alice")),
                SqlValue::Text(String::from("alice@example.com")),
            ])
            .upsert([users.col("id")], [users.col("name"), users.col("email")]);
        let (sql, params) = query.build_with(&SqliteDialect::new()).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO \"users\" AS \"a\" (\"id\", \"name\", \"email\") VALUES (?, ?, ?) \
             ON CONFLICT (\"id\") DO UPDATE SET \"name\" = EXCLUDED.\"name\", \"email\" = EXCLUDED.\"email\""
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_insert_or_ignore() {
        let users = Table::new("users");
        let query = users
            .insert()
            .columns([users.col("id")])
            .values([1])
            .insert_or_ignore([users.col("id")]);
        let (sql, _) = query.build_with(&SqliteDialect::new()).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO \"users\" AS \"a\" (\"id\") VALUES (?) ON CONFLICT (\"id\") DO NOTHING"
        );
    }
}
