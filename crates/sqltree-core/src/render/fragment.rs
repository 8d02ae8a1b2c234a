//! The parameter sink.

use crate::dialect::PlaceholderStyle;
use crate::value::SqlValue;

#[derive(Debug, Clone)]
enum Part {
    Sql(String),
    Param(SqlValue),
}

/// An ordered piece of rendered SQL: text interleaved with bound values.
///
/// A fragment is append-only. Text and values are kept in one sequence so
/// the parameter list can never drift from the placeholders; placeholders
/// are only spelled out (and numbered) by [`Fragment::finish`], once the
/// whole statement has been assembled in textual order.
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    parts: Vec<Part>,
}

impl Fragment {
    /// Creates an empty fragment.
    #[must_use]
    pub const fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Appends SQL text.
    pub fn push_sql(&mut self, sql: &str) {
        if sql.is_empty() {
            return;
        }
        if let Some(Part::Sql(last)) = self.parts.last_mut() {
            last.push_str(sql);
        } else {
            self.parts.push(Part::Sql(String::from(sql)));
        }
    }

    /// Appends a bound value; it renders as one placeholder.
    pub fn push_param(&mut self, value: SqlValue) {
        self.parts.push(Part::Param(value));
    }

    /// Appends another fragment.
    pub fn append(&mut self, other: Self) {
        for part in other.parts {
            match part {
                Part::Sql(sql) => self.push_sql(&sql),
                param @ Part::Param(_) => self.parts.push(param),
            }
        }
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Spells out placeholders and returns the SQL with its parameters.
    #[must_use]
    pub fn finish(self, style: PlaceholderStyle) -> (String, Vec<SqlValue>) {
        let mut sql = String::new();
        let mut params = Vec::new();
        for part in self.parts {
            match part {
                Part::Sql(text) => sql.push_str(&text),
                Part::Param(value) => {
                    params.push(value);
                    sql.push_str(&style.placeholder(params.len()));
                }
            }
        }
        (sql, params)
    }
}
