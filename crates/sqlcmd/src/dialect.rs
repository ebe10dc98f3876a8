//! SQL dialect seam.
//!
//! The generated INSERT/UPDATE/DELETE statements are ANSI SQL-92; a
//! [`Dialect`] only decides the parameter prefix and how (or whether) a
//! command is paged. [`AnsiDialect`] is the base dialect and does not page:
//! paging syntax is not standardized, so asking for it is an error rather
//! than a silently unpaged query.

use crate::command::Command;
use crate::error::{CommandError, CommandResult};

/// Table facts a dialect may need to page a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingTarget<'a> {
    pub table_name: &'a str,
    /// Primary key columns in declaration order, for stable ordering.
    pub key_columns: Vec<&'a str>,
}

/// A family of SQL syntax the builder targets.
pub trait Dialect: Send + Sync {
    /// Dialect name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Character that starts a named placeholder.
    fn parameter_prefix(&self) -> char {
        '@'
    }

    /// Rewrite `command` so it returns only page `page_number` of
    /// `page_size` rows.
    fn paging(
        &self,
        target: &PagingTarget<'_>,
        command: &mut dyn Command,
        page_number: u64,
        page_size: u64,
    ) -> CommandResult<()>;
}

/// ANSI SQL-92. Paging is not supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnsiDialect;

impl Dialect for AnsiDialect {
    fn name(&self) -> &'static str {
        "ansi"
    }

    fn paging(
        &self,
        target: &PagingTarget<'_>,
        _command: &mut dyn Command,
        _page_number: u64,
        _page_size: u64,
    ) -> CommandResult<()> {
        Err(CommandError::unsupported(format!(
            "paging is not supported by the {} dialect (table {})",
            self.name(),
            target.table_name
        )))
    }
}
