//! Tests for COLLATE expressions.

mod common;
use common::*;

use sqltree_core::prelude::*;

#[test]
fn collate_column() {
    let t = Table::new("t");
    let (sql, params) = build(&Expr::collate(t.col("c"), "C"));
    assert_eq!(sql, r#""c" COLLATE "C""#);
    assert!(params.is_empty());
}

#[test]
fn collate_bare_value() {
    let (sql, params) = build(&Expr::collate("foo", "C"));
    assert_eq!(sql, r#"%s COLLATE "C""#);
    assert_eq!(params, vec![text("foo")]);
}

#[test]
fn collate_method_inside_statement() {
    let t = Table::new("t");
    let query = t
        .select([t.col("c")])
        .order_by([t.col("c").collate("fr_FR")]);
    let (sql, _) = build(&query);
    assert_eq!(
        sql,
        r#"SELECT "a"."c" FROM "t" AS "a" ORDER BY "a"."c" COLLATE "fr_FR""#
    );
}

#[test]
fn collate_injection_is_rejected_at_render() {
    let t = Table::new("t");
    // Construction never fails.
    let expr = Expr::collate(t.col("c"), "C\";");
    match build_err(&expr) {
        RenderError::InvalidIdentifier { name, .. } => assert_eq!(name, "C\";"),
        other => panic!("Expected InvalidIdentifier, got {other:?}"),
    }
}
