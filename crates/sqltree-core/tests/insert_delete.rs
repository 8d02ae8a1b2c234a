//! Tests for INSERT and DELETE statements.

mod common;
use common::*;

use sqltree_core::prelude::*;

// ===================================================================
// INSERT
// ===================================================================

#[test]
fn insert_single_row() {
    let users = Table::new("users");
    let query = users
        .insert()
        .columns([users.col("name"), users.col("active")])
        .values([text("alice"), SqlValue::Bool(true)]);
    let (sql, params) = build(&query);
    assert_eq!(
        sql,
        r#"INSERT INTO "users" AS "a" ("name", "active") VALUES (%s, %s)"#
    );
    assert_eq!(params, vec![text("alice"), SqlValue::Bool(true)]);
}

#[test]
fn insert_row_with_scalar_subquery() {
    let t = Table::new("t");
    let src = Table::new("src");
    let query = t
        .insert()
        .columns([t.col("total")])
        .values([Expr::subquery(src.select([Expr::count_star()]))]);
    let (sql, _) = build(&query);
    assert_eq!(
        sql,
        r#"INSERT INTO "t" AS "b" ("total") VALUES ((SELECT COUNT(*) FROM "src" AS "a"))"#
    );
}

#[test]
fn insert_from_cte() {
    let archive = Table::new("archive");
    let logs = Table::new("logs");
    let old = With::new(logs.select([logs.col("id")]).where_clause(logs.col("age").gt(30)));
    let query = archive
        .insert()
        .columns([archive.col("id")])
        .query(old.select([old.col("id")]))
        .with(old.clone())
        .returning([archive.col("id")]);
    let (sql, params) = build(&query);
    assert_eq!(
        sql,
        r#"WITH "a" AS (SELECT "b"."id" FROM "logs" AS "b" WHERE ("b"."age" > %s)) INSERT INTO "archive" AS "c" ("id") SELECT "a"."id" FROM "a" AS "a" RETURNING "c"."id""#
    );
    assert_eq!(params, vec![SqlValue::Int(30)]);
}

#[test]
fn insert_query_arity_mismatch() {
    let t = Table::new("t");
    let u = Table::new("u");
    let query = t
        .insert()
        .columns([t.col("a")])
        .query(u.select([u.col("a"), u.col("b")]));
    assert!(matches!(
        build_err(&query),
        RenderError::MalformedStatement(_)
    ));
}

#[test]
fn insert_rejects_column_of_another_table() {
    let t = Table::new("t");
    let u = Table::new("u");
    let query = t.insert().columns([u.col("a")]).values([1]);
    assert!(matches!(
        build_err(&query),
        RenderError::MalformedStatement(_)
    ));
}

#[test]
fn insert_upsert_with_excluded() {
    let counters = Table::new("counters");
    let query = counters
        .insert()
        .columns([counters.col("key"), counters.col("hits")])
        .values([text("home"), SqlValue::Int(1)])
        .on_conflict(
            OnConflict::columns([counters.col("key")])
                .set(counters.col("hits"), counters.col("hits") + Expr::excluded("hits")),
        );
    let (sql, params) = build_with(&query, &PostgresDialect::new());
    assert_eq!(
        sql,
        r#"INSERT INTO "counters" AS "a" ("key", "hits") VALUES ($1, $2) ON CONFLICT ("key") DO UPDATE SET "hits" = ("a"."hits" + EXCLUDED."hits")"#
    );
    assert_eq!(params, vec![text("home"), SqlValue::Int(1)]);
}

#[test]
fn insert_on_mysql_leaves_target_unaliased() {
    let users = Table::new("users");
    let query = users
        .insert()
        .columns([users.col("name")])
        .values([text("alice")]);
    let (sql, params) = build_with(&query, &MySqlDialect::new());
    assert_eq!(sql, "INSERT INTO `users` (`name`) VALUES (%s)");
    assert_eq!(params, vec![text("alice")]);

    let archive = Table::new("archive");
    let query = archive
        .insert()
        .columns([archive.col("name")])
        .query(users.select([users.col("name")]));
    let (sql, _) = build_with(&query, &MySqlDialect::new());
    assert_eq!(
        sql,
        "INSERT INTO `archive` (`name`) SELECT `a`.`name` FROM `users` AS `a`"
    );
}

#[test]
fn insert_on_conflict_on_mysql_is_rejected() {
    let t = Table::new("t");
    let query = t
        .insert()
        .columns([t.col("id")])
        .values([1])
        .on_conflict(OnConflict::any().do_nothing());
    let err = render_with(&query, &MySqlDialect::new()).unwrap_err();
    assert!(matches!(err, RenderError::MalformedStatement(_)));
}

// ===================================================================
// DELETE
// ===================================================================

#[test]
fn delete_with_subquery_condition() {
    let sessions = Table::new("sessions");
    let users = Table::new("users");
    let query = sessions.delete().where_clause(
        sessions
            .col("user_id")
            .in_query(users.select([users.col("id")]).where_clause(users.col("banned").eq(true))),
    );
    let (sql, params) = build(&query);
    assert_eq!(
        sql,
        r#"DELETE FROM "sessions" AS "a" WHERE ("a"."user_id" IN (SELECT "b"."id" FROM "users" AS "b" WHERE ("b"."banned" = %s)))"#
    );
    assert_eq!(params, vec![SqlValue::Bool(true)]);
}

#[test]
fn delete_returning_on_mysql_is_rejected() {
    let t = Table::new("t");
    let query = t.delete().returning([t.col("id")]);
    let err = render_with(&query, &MySqlDialect::new()).unwrap_err();
    assert!(matches!(err, RenderError::MalformedStatement(_)));
}
