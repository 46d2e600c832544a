//! Parameterized predicate construction
//!
//! A [`FilterBuilder`] collects `(column, comparison, value)` triples and
//! writes them into a [`QueryBuilder`] as `WHERE a = ? AND b >= ? ...`.
//! Column names and operators are `'static` literals chosen by the caller's
//! code; user-provided values only ever reach the statement through
//! `push_bind`.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};

use crate::models::Pagination;
use crate::utils::time::to_db_timestamp;

/// A value bound to a single predicate placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Timestamp(DateTime<Utc>),
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        FilterValue::Timestamp(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Equal,
    AtLeast,
    AtMost,
    Before,
}

impl Comparison {
    fn as_sql(&self) -> &'static str {
        match self {
            Comparison::Equal => " = ",
            Comparison::AtLeast => " >= ",
            Comparison::AtMost => " <= ",
            Comparison::Before => " < ",
        }
    }
}

#[derive(Debug, Clone)]
struct Predicate {
    column: &'static str,
    comparison: Comparison,
    value: FilterValue,
}

/// Ordered conjunction of optional predicates
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    predicates: Vec<Predicate>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, column: &'static str, comparison: Comparison, value: Option<FilterValue>) -> Self {
        if let Some(value) = value {
            self.predicates.push(Predicate {
                column,
                comparison,
                value,
            });
        }
        self
    }

    /// `column = value`, skipped when `value` is `None`
    pub fn eq<V: Into<FilterValue>>(self, column: &'static str, value: Option<V>) -> Self {
        self.push(column, Comparison::Equal, value.map(Into::into))
    }

    /// Inclusive lower bound
    pub fn since(self, column: &'static str, value: Option<DateTime<Utc>>) -> Self {
        self.push(column, Comparison::AtLeast, value.map(Into::into))
    }

    /// Inclusive upper bound
    pub fn until(self, column: &'static str, value: Option<DateTime<Utc>>) -> Self {
        self.push(column, Comparison::AtMost, value.map(Into::into))
    }

    /// Exclusive upper bound
    pub fn before(self, column: &'static str, value: DateTime<Utc>) -> Self {
        self.push(column, Comparison::Before, Some(value.into()))
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Append the `WHERE` clause; writes nothing for an empty filter
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        for (i, predicate) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            qb.push(predicate.column);
            qb.push(predicate.comparison.as_sql());
            match &predicate.value {
                FilterValue::Text(s) => qb.push_bind(s.clone()),
                FilterValue::Integer(n) => qb.push_bind(*n),
                FilterValue::Timestamp(ts) => qb.push_bind(to_db_timestamp(ts)),
            };
        }
    }
}

/// Append the fixed ordering and the pagination window
pub fn push_page(qb: &mut QueryBuilder<'_, Sqlite>, page: Pagination) {
    qb.push(" ORDER BY timestamp DESC, id DESC LIMIT ");
    qb.push_bind(i64::from(page.limit));
    qb.push(" OFFSET ");
    qb.push_bind(i64::from(page.offset));
}
