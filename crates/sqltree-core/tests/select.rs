//! Tests for SELECT statements, joins and common table expressions.

mod common;
use common::*;

use sqltree_core::prelude::*;

#[test]
fn select_self_join_gets_two_aliases() {
    let employee = Table::new("employee");
    let manager = Table::new("employee");
    let query = Select::new()
        .columns([employee.col("name"), manager.col("name")])
        .from(
            employee
                .left_join(manager.clone())
                .on(employee.col("manager_id").eq(manager.col("id"))),
        );
    let (sql, _) = build(&query);
    assert_eq!(
        sql,
        r#"SELECT "a"."name", "b"."name" FROM "employee" AS "a" LEFT JOIN "employee" AS "b" ON ("a"."manager_id" = "b"."id")"#
    );
}

#[test]
fn select_chained_joins() {
    let orders = Table::new("orders");
    let users = Table::new("users");
    let items = Table::new("items");
    let query = Select::new()
        .columns([orders.col("id"), users.col("name"), items.col("sku")])
        .from(
            users
                .join(items.clone())
                .on(items.col("owner").eq(users.col("id")))
                .join(orders.clone(), JoinKind::Cross),
        );
    let (sql, _) = build(&query);
    assert_eq!(
        sql,
        r#"SELECT "c"."id", "a"."name", "b"."sku" FROM "users" AS "a" INNER JOIN "items" AS "b" ON ("b"."owner" = "a"."id") CROSS JOIN "orders" AS "c""#
    );
}

#[test]
fn select_where_exists_correlated() {
    let users = Table::new("users");
    let orders = Table::new("orders");
    let query = users.select([users.col("id")]).where_clause(Expr::exists(
        orders
            .select([Expr::literal(1)])
            .where_clause(orders.col("user_id").eq(users.col("id"))),
    ));
    let (sql, params) = build(&query);
    assert_eq!(
        sql,
        r#"SELECT "a"."id" FROM "users" AS "a" WHERE (EXISTS (SELECT %s FROM "orders" AS "b" WHERE ("b"."user_id" = "a"."id")))"#
    );
    assert_eq!(params, vec![SqlValue::Int(1)]);
}

#[test]
fn select_named_cte() {
    let t = Table::new("t");
    let recent = With::named("recent", t.select([t.col("id")]).where_clause(t.col("age").lt(7)));
    let query = recent.select([recent.col("id")]).with(recent.clone());
    let (sql, params) = build(&query);
    assert_eq!(
        sql,
        r#"WITH "recent" AS (SELECT "b"."id" FROM "t" AS "b" WHERE ("b"."age" < %s)) SELECT "a"."id" FROM "recent" AS "a""#
    );
    assert_eq!(params, vec![SqlValue::Int(7)]);
}

#[test]
fn select_recursive_cte() {
    let nodes = Table::new("nodes");
    let seed = nodes.select([nodes.col("id")]).where_clause(nodes.col("parent").is_null());
    let base = With::recursive("walk", ["id"], seed);
    let query = base.select([base.col("id")]).with(base.clone());
    let (sql, _) = build(&query);
    assert_eq!(
        sql,
        r#"WITH RECURSIVE "walk" ("id") AS (SELECT "b"."id" FROM "nodes" AS "b" WHERE ("b"."parent" IS NULL)) SELECT "a"."id" FROM "walk" AS "a""#
    );
}

#[test]
fn select_in_subquery_and_between() {
    let t = Table::new("t");
    let u = Table::new("u");
    let query = t.select_all().where_clause(Expr::all([
        t.col("id").in_query(u.select([u.col("t_id")])),
        t.col("score").between(1, 10),
        t.col("name").not_in_list(["x", "y"]),
    ]));
    let (sql, params) = build(&query);
    assert_eq!(
        sql,
        r#"SELECT * FROM "t" AS "a" WHERE (("a"."id" IN (SELECT "b"."t_id" FROM "u" AS "b")) AND ("a"."score" BETWEEN %s AND %s) AND ("a"."name" NOT IN (%s, %s)))"#
    );
    assert_eq!(
        params,
        vec![SqlValue::Int(1), SqlValue::Int(10), text("x"), text("y")]
    );
}

#[test]
fn select_star_of_relation() {
    let t = Table::new("t");
    let (sql, _) = build(&t.select([t.star()]));
    assert_eq!(sql, r#"SELECT "a".* FROM "t" AS "a""#);
}

#[test]
fn select_many_tables_extend_alias_sequence() {
    let tables: Vec<Table> = (0..28).map(|i| Table::new(format!("t{i}"))).collect();
    let query = tables
        .iter()
        .fold(Select::new(), |query, table| query.from(table.clone()));
    let (sql, _) = build(&query);
    assert!(sql.contains(r#""t25" AS "z""#));
    assert!(sql.contains(r#""t26" AS "aa""#));
    assert!(sql.contains(r#""t27" AS "ab""#));
}

#[test]
fn select_case_expression() {
    let t = Table::new("t");
    let grade = Case::new()
        .when(t.col("score").gt_eq(90), "A")
        .when(t.col("score").gt_eq(80), "B")
        .otherwise("C");
    let query = t.select([grade.into_expr().aliased("grade")]);
    let (sql, params) = build(&query);
    assert_eq!(
        sql,
        r#"SELECT CASE WHEN ("a"."score" >= %s) THEN %s WHEN ("a"."score" >= %s) THEN %s ELSE %s END AS "grade" FROM "t" AS "a""#
    );
    assert_eq!(params.len(), 5);
}

#[test]
fn select_cast_type_cannot_inject_select_items() {
    let users = Table::new("users");
    let query = users.select([users.col("id").cast("int) AS x, (SELECT password FROM secrets")]);
    assert!(matches!(
        build_err(&query),
        RenderError::InvalidIdentifier { .. }
    ));

    let query = users.select([users.col("id").cast("NUMERIC(10, 2)")]);
    let (sql, params) = build(&query);
    assert_eq!(sql, r#"SELECT CAST("a"."id" AS NUMERIC(10, 2)) FROM "users" AS "a""#);
    assert!(params.is_empty());
}
