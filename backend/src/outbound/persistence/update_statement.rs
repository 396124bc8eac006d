//! Rendering of [`UpdateSpec`] into a parameterised PostgreSQL statement.
//!
//! The spec decides which columns change; this module only turns that list
//! into `column = $n` fragments and an ordered argument list whose last entry
//! is the row key.

use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{Integer, Text};

use crate::domain::{FieldValue, UpdateSpec, UserId};

const RETURNING_USER: &str = "RETURNING user_id, passport_serie, passport_number, surname, name";

/// Positional argument bound to a rendered statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StatementArg {
    Integer(i32),
    Text(String),
}

impl From<&FieldValue> for StatementArg {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Integer(value) => Self::Integer(*value),
            FieldValue::Text(value) => Self::Text(value.clone()),
        }
    }
}

/// A rendered `UPDATE users` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderedUpdate {
    /// `column = $n` fragments in spec order.
    pub set_fragments: Vec<String>,
    /// Values for `$1..$n`, followed by the row key.
    pub args: Vec<StatementArg>,
    /// Full statement text.
    pub sql: String,
}

impl RenderedUpdate {
    /// Bind the arguments onto a boxed raw query.
    pub(crate) fn into_query(self) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
        self.args
            .into_iter()
            .fold(diesel::sql_query(self.sql).into_boxed(), |query, arg| match arg {
                StatementArg::Integer(value) => query.bind::<Integer, _>(value),
                StatementArg::Text(value) => query.bind::<Text, _>(value),
            })
    }
}

/// Render `spec` as an update of the user keyed by `key`.
pub(crate) fn render_update_statement(spec: &UpdateSpec, key: UserId) -> RenderedUpdate {
    let mut set_fragments = Vec::with_capacity(spec.len());
    let mut args = Vec::with_capacity(spec.len() + 1);
    for (position, (field, value)) in (1..).zip(spec.changes()) {
        set_fragments.push(format!("{} = ${position}", field.column()));
        args.push(StatementArg::from(value));
    }
    let key_position = args.len() + 1;
    args.push(StatementArg::Integer(key.get()));
    let sql = format!(
        "UPDATE users SET {} WHERE user_id = ${key_position} {RETURNING_USER}",
        set_fragments.join(", ")
    );
    RenderedUpdate {
        set_fragments,
        args,
        sql,
    }
}
