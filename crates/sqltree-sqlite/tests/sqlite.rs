//! Rendering with the SQLite dialect.

use sqltree_core::prelude::*;
use sqltree_sqlite::{SqliteDialect, Upsert};

#[test]
fn sqlite_uses_question_marks() {
    let t = Table::new("t");
    let query = t
        .update([t.col("a"), t.col("b")], [1, 2])
        .where_clause(t.col("id").eq(3));
    let (sql, params) = query.build_with(&SqliteDialect::new()).unwrap();
    assert_eq!(
        sql,
        r#"UPDATE "t" AS "a" SET "a" = ?, "b" = ? WHERE ("a"."id" = ?)"#
    );
    assert_eq!(params, vec![SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)]);
}

#[test]
fn sqlite_offset_without_limit() {
    let t = Table::new("t");
    let (sql, _) = t
        .select_all()
        .offset(10)
        .build_with(&SqliteDialect::new())
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "t" AS "a" LIMIT -1 OFFSET 10"#);
}

#[test]
fn sqlite_modulo_is_not_escaped() {
    let t = Table::new("t");
    let (sql, _) = t
        .select([t.col("n") % 2])
        .build_with(&SqliteDialect::new())
        .unwrap();
    assert_eq!(sql, r#"SELECT ("a"."n" % ?) FROM "t" AS "a""#);
}

#[test]
fn sqlite_upsert_returning() {
    let kv = Table::new("kv");
    let query = kv
        .insert()
        .columns([kv.col("k"), kv.col("v")])
        .values(["key", "value"])
        .upsert([kv.col("k")], [kv.col("v")])
        .returning([kv.col("v")]);
    let (sql, params) = query.build_with(&SqliteDialect::new()).unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "kv" AS "a" ("k", "v") VALUES (?, ?) ON CONFLICT ("k") DO UPDATE SET "v" = EXCLUDED."v" RETURNING "a"."v""#
    );
    assert_eq!(params.len(), 2);
}
