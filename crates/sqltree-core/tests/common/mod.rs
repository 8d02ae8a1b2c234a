#![allow(dead_code)]

use sqltree_core::dialect::Dialect;
use sqltree_core::render::{render, render_with, Render};
use sqltree_core::{RenderError, SqlValue};

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}

pub fn build<R: Render>(node: &R) -> (String, Vec<SqlValue>) {
    render(node).unwrap_or_else(|e| panic!("Failed to render: {e}"))
}

pub fn build_with<R: Render>(node: &R, dialect: &dyn Dialect) -> (String, Vec<SqlValue>) {
    render_with(node, dialect)
        .unwrap_or_else(|e| panic!("Failed to render for {}: {e}", dialect.name()))
}

pub fn build_err<R: Render>(node: &R) -> RenderError {
    match render(node) {
        Ok((sql, _)) => panic!("Expected render error, got: {sql}"),
        Err(e) => e,
    }
}
