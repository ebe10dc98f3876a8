//! Named-to-positional placeholder rewriting for PostgreSQL drivers.

use super::{Command, SqlCommand};
use crate::error::{CommandError, CommandResult};
use crate::value::Value;
use tokio_postgres::types::ToSql;

/// A command rendered with `$n` placeholders, ready for `tokio-postgres`.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalCommand {
    pub sql: String,
    pub params: Vec<Value>,
}

impl PositionalCommand {
    /// Rewrite every `prefix`-named placeholder in `command` into `$n`.
    ///
    /// Indices follow first appearance; a placeholder repeated in the text
    /// reuses its index. Quoted literals and quoted identifiers are copied
    /// untouched. Absent values are bound as NULL.
    pub fn from_named(command: &SqlCommand, prefix: char) -> CommandResult<Self> {
        let text = command.command_text();
        let mut sql = String::with_capacity(text.len());
        let mut order: Vec<String> = Vec::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\'' | '"' => {
                    sql.push(c);
                    for inner in chars.by_ref() {
                        sql.push(inner);
                        if inner == c {
                            break;
                        }
                    }
                }
                // `::` casts and doubled prefixes are not placeholders.
                _ if c == prefix && chars.peek() == Some(&prefix) => {
                    sql.push(c);
                    sql.push(prefix);
                    chars.next();
                }
                _ if c == prefix && chars.peek().is_some_and(|&n| starts_name(n)) => {
                    let mut name = String::from(prefix);
                    while let Some(&n) = chars.peek() {
                        if !(n.is_ascii_alphanumeric() || n == '_') {
                            break;
                        }
                        name.push(n);
                        chars.next();
                    }
                    let idx = match order.iter().position(|seen| *seen == name) {
                        Some(pos) => pos + 1,
                        None => {
                            order.push(name);
                            order.len()
                        }
                    };
                    sql.push('$');
                    sql.push_str(&idx.to_string());
                }
                _ => sql.push(c),
            }
        }

        let params = order
            .iter()
            .map(|name| {
                command
                    .parameter(name)
                    .map(|p| p.value.clone().unwrap_or(Value::Null))
                    .ok_or_else(|| {
                        CommandError::Other(format!("no parameter bound for placeholder {name}"))
                    })
            })
            .collect::<CommandResult<Vec<_>>>()?;

        Ok(Self { sql, params })
    }

    /// Get parameters as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
    }
}

fn starts_name(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}
