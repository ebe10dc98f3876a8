//! SQL debug events, emitted through `tracing` when the feature is enabled.

/// Emit a generated statement on the `sqlcmd.sql` target.
macro_rules! sql_generated {
    ($kind:expr, $table:expr, $command:expr) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlcmd.sql",
            kind = $kind,
            table = %$table,
            param_count = $command.parameter_count(),
            sql = %$command.command_text(),
        );
    }};
}

/// Emit a key property left out of an INSERT.
macro_rules! key_skipped {
    ($table:expr, $property:expr, $reason:expr) => {{
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "sqlcmd.sql",
            table = %$table,
            property = %$property,
            reason = $reason,
            "key omitted from insert"
        );
    }};
}

pub(crate) use {key_skipped, sql_generated};
