//! Entity command builder.
//!
//! A [`CommandBuilder`] is constructed once per entity type from its
//! [`MappingDescriptor`], partitions the mapped properties into a key set
//! and a value set, and then writes INSERT, UPDATE, DELETE, and TRUNCATE
//! statements for any number of entity instances into caller-supplied
//! [`Command`]s.
//!
//! ## Design
//!
//! - The builder holds no per-call state and is `Send + Sync`.
//! - A command is only touched once its statement is complete: on error its
//!   text and parameters are left exactly as they were.
//! - Placeholders are the dialect prefix followed by the property name
//!   (`@Name`); columns, placeholders, and conditions are joined, never
//!   trimmed.


use crate::command::Command;
use crate::dialect::{AnsiDialect, Dialect, PagingTarget};
use crate::error::{CommandError, CommandResult};
use crate::log::{key_skipped, sql_generated};
use crate::mapping::{MappingDescriptor, PropertyMapping};
use crate::options::BuilderOptions;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

type Bindings = Vec<(String, Option<Value>)>;

/// Generates parameterized statements for one mapped entity type.
pub struct CommandBuilder<E, D = AnsiDialect> {
    descriptor: Arc<MappingDescriptor<E>>,
    table_name: String,
    keys: Vec<PropertyMapping<E>>,
    values: Vec<PropertyMapping<E>>,
    options: BuilderOptions,
    dialect: D,
}

impl<E> CommandBuilder<E, AnsiDialect> {
    /// Create a builder for the ANSI dialect with default options.
    pub fn new(descriptor: impl Into<Arc<MappingDescriptor<E>>>) -> Self {
        let descriptor = descriptor.into();
        let (keys, values): (Vec<_>, Vec<_>) = descriptor
            .properties()
            .iter()
            .cloned()
            .partition(|p| p.is_primary_key());

        Self {
            table_name: descriptor.table_name().to_string(),
            descriptor,
            keys,
            values,
            options: BuilderOptions::default(),
            dialect: AnsiDialect,
        }
    }
}

impl<E, D: Dialect> CommandBuilder<E, D> {
    /// Switch to another dialect.
    pub fn with_dialect<D2: Dialect>(self, dialect: D2) -> CommandBuilder<E, D2> {
        CommandBuilder {
            descriptor: self.descriptor,
            table_name: self.table_name,
            keys: self.keys,
            values: self.values,
            options: self.options,
            dialect,
        }
    }

    /// Replace the builder options.
    pub fn with_options(mut self, options: BuilderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_treat_zero_as_null_for_keys(&mut self, enabled: bool) -> &mut Self {
        self.options.treat_zero_as_null_for_keys = enabled;
        self
    }

    pub fn treat_zero_as_null_for_keys(&self) -> bool {
        self.options.treat_zero_as_null_for_keys
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Character that starts every placeholder this builder emits.
    pub fn parameter_prefix(&self) -> char {
        self.dialect.parameter_prefix()
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    /// The mapping this builder was constructed from.
    pub fn descriptor(&self) -> &MappingDescriptor<E> {
        &self.descriptor
    }

    /// Primary key properties in declaration order.
    pub fn key_set(&self) -> &[PropertyMapping<E>] {
        &self.keys
    }

    /// Non-key properties in declaration order.
    pub fn value_set(&self) -> &[PropertyMapping<E>] {
        &self.values
    }

    /// Write `INSERT INTO <table> (<columns>) VALUES (<placeholders>)` for
    /// `entity` into `command`.
    ///
    /// A key is left out when its value is absent or NULL, when it is zero
    /// and zero-as-null is enabled, or when it is an auto-increment key with
    /// value zero. Unreadable value properties are left out; an absent value
    /// is bound as NULL.
    pub fn insert_command<C: Command>(&self, command: &mut C, entity: &E) -> CommandResult<()> {
        self.require_keys("insert")?;

        let mut columns = Vec::with_capacity(self.keys.len() + self.values.len());
        let mut placeholders = Vec::with_capacity(columns.capacity());
        let mut bindings = Bindings::with_capacity(columns.capacity());

        for key in &self.keys {
            let value = match key.get_value(entity) {
                Some(value) if !value.is_null() => value,
                _ => {
                    key_skipped!(self.table_name.as_str(), key.property_name(), "absent");
                    continue;
                }
            };
            if value.is_zero() {
                if self.options.treat_zero_as_null_for_keys {
                    key_skipped!(
                        self.table_name.as_str(),
                        key.property_name(),
                        "zero treated as null"
                    );
                    continue;
                }
                if key.is_auto_increment() {
                    key_skipped!(
                        self.table_name.as_str(),
                        key.property_name(),
                        "auto increment"
                    );
                    continue;
                }
            }
            let placeholder = self.placeholder(key);
            columns.push(key.column_name());
            placeholders.push(placeholder.clone());
            bindings.push((placeholder, Some(value)));
        }

        for property in self.values.iter().filter(|p| p.can_read()) {
            let value = property.get_value(entity).unwrap_or(Value::Null);
            let placeholder = self.placeholder(property);
            columns.push(property.column_name());
            placeholders.push(placeholder.clone());
            bindings.push((placeholder, Some(value)));
        }

        if bindings.is_empty() {
            return Err(CommandError::data(
                self.descriptor.entity_name(),
                format!("insert into {} would bind no columns", self.table_name),
            ));
        }

        let text = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table_name,
            columns.join(", "),
            placeholders.join(", ")
        );
        commit(command, text, bindings);
        sql_generated!("insert", self.table_name.as_str(), command);
        Ok(())
    }

    /// Write `UPDATE <table> SET <col=placeholder, ...> WHERE <key=placeholder AND ...>`
    /// for `entity` into `command`.
    ///
    /// Every readable value property is assigned, binding its value as read
    /// (an absent value stays absent). Every key must have a value.
    pub fn update_command<C: Command>(&self, command: &mut C, entity: &E) -> CommandResult<()> {
        self.require_keys("update")?;

        let mut assignments = Vec::with_capacity(self.values.len());
        let mut bindings = Bindings::with_capacity(self.values.len() + self.keys.len());

        for property in self.values.iter().filter(|p| p.can_read()) {
            let placeholder = self.placeholder(property);
            assignments.push(format!("{}={}", property.column_name(), placeholder));
            bindings.push((placeholder, property.get_value(entity)));
        }

        if assignments.is_empty() {
            return Err(CommandError::data(
                self.descriptor.entity_name(),
                format!(
                    "update of {} has no readable non-key column to set",
                    self.table_name
                ),
            ));
        }

        let conditions = self.key_conditions(entity, "update", &mut bindings)?;

        let set_clause = assignments.join(", ");
        let where_clause = conditions.join(" AND ");
        if set_clause.is_empty() || where_clause.is_empty() {
            return Err(CommandError::mapping(
                self.descriptor.entity_name(),
                format!(
                    "degenerate update of {}: SET '{}' WHERE '{}'",
                    self.table_name, set_clause, where_clause
                ),
            ));
        }

        let text = format!(
            "UPDATE {} SET {} WHERE {}",
            self.table_name, set_clause, where_clause
        );
        commit(command, text, bindings);
        sql_generated!("update", self.table_name.as_str(), command);
        Ok(())
    }

    /// Write `DELETE FROM <table> WHERE <key=placeholder AND ...>` for
    /// `entity` into `command`. Only key properties are used.
    pub fn delete_command<C: Command>(&self, command: &mut C, entity: &E) -> CommandResult<()> {
        self.require_keys("delete")?;

        let mut bindings = Bindings::with_capacity(self.keys.len());
        let conditions = self.key_conditions(entity, "delete", &mut bindings)?;

        let text = format!(
            "DELETE FROM {} WHERE {}",
            self.table_name,
            conditions.join(" AND ")
        );
        commit(command, text, bindings);
        sql_generated!("delete", self.table_name.as_str(), command);
        Ok(())
    }

    /// Write `DELETE FROM <table>` into `command`.
    ///
    /// This is an unconditional delete, not a DDL `TRUNCATE`.
    pub fn truncate_command<C: Command>(&self, command: &mut C) {
        commit(
            command,
            format!("DELETE FROM {}", self.table_name),
            Vec::new(),
        );
        sql_generated!("truncate", self.table_name.as_str(), command);
    }

    /// Page the query in `command` through the dialect.
    ///
    /// [`AnsiDialect`] always fails with [`CommandError::Unsupported`].
    pub fn paging<C: Command>(
        &self,
        command: &mut C,
        page_number: u64,
        page_size: u64,
    ) -> CommandResult<()> {
        let target = PagingTarget {
            table_name: &self.table_name,
            key_columns: self.keys.iter().map(|k| k.column_name()).collect(),
        };
        self.dialect
            .paging(&target, command, page_number, page_size)?;
        sql_generated!("paging", self.table_name.as_str(), command);
        Ok(())
    }

    /// The single auto-increment key, if the mapping has exactly one.
    pub fn identity_property(&self) -> Option<&PropertyMapping<E>> {
        let mut identities = self.keys.iter().filter(|k| k.is_auto_increment());
        match (identities.next(), identities.next()) {
            (Some(identity), None) => Some(identity),
            _ => None,
        }
    }

    /// Write a database-generated identity back into `entity`.
    pub fn assign_identity(&self, entity: &mut E, value: Value) -> CommandResult<()> {
        let identity = self.identity_property().ok_or_else(|| {
            CommandError::mapping(
                self.descriptor.entity_name(),
                format!(
                    "table {} needs exactly one auto-increment key to assign an identity",
                    self.table_name
                ),
            )
        })?;
        if !identity.can_write() {
            return Err(CommandError::mapping(
                self.descriptor.entity_name(),
                format!(
                    "identity property '{}' has no writer",
                    identity.property_name()
                ),
            ));
        }
        identity.set_value(entity, value)
    }

    fn require_keys(&self, operation: &str) -> CommandResult<()> {
        if self.keys.is_empty() {
            return Err(CommandError::mapping(
                self.descriptor.entity_name(),
                format!(
                    "cannot {} {}: no primary key is mapped",
                    operation, self.table_name
                ),
            ));
        }
        Ok(())
    }

    fn key_conditions(
        &self,
        entity: &E,
        operation: &str,
        bindings: &mut Bindings,
    ) -> CommandResult<Vec<String>> {
        let mut conditions = Vec::with_capacity(self.keys.len());
        for key in &self.keys {
            let value = match key.get_value(entity) {
                Some(value) if !value.is_null() => value,
                _ => {
                    return Err(CommandError::mapping(
                        self.descriptor.entity_name(),
                        format!(
                            "cannot {} {}: key property '{}' has no value",
                            operation,
                            self.table_name,
                            key.property_name()
                        ),
                    ));
                }
            };
            let placeholder = self.placeholder(key);
            conditions.push(format!("{}={}", key.column_name(), placeholder));
            bindings.push((placeholder, Some(value)));
        }
        Ok(conditions)
    }

    fn placeholder(&self, property: &PropertyMapping<E>) -> String {
        let mut placeholder = String::with_capacity(property.property_name().len() + 1);
        placeholder.push(self.dialect.parameter_prefix());
        placeholder.push_str(property.property_name());
        placeholder
    }
}

fn commit<C: Command>(command: &mut C, text: String, bindings: Bindings) {
    command.clear_parameters();
    for (name, value) in bindings {
        command.add_parameter(name, value);
    }
    command.set_command_text(text);
}

impl<E, D: Clone> Clone for CommandBuilder<E, D> {
    fn clone(&self) -> Self {
        Self {
            descriptor: Arc::clone(&self.descriptor),
            table_name: self.table_name.clone(),
            keys: self.keys.clone(),
            values: self.values.clone(),
            options: self.options,
            dialect: self.dialect.clone(),
        }
    }
}

impl<E, D: fmt::Debug> fmt::Debug for CommandBuilder<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBuilder")
            .field("table_name", &self.table_name)
            .field("keys", &self.keys)
            .field("values", &self.values)
            .field("options", &self.options)
            .field("dialect", &self.dialect)
            .finish()
    }
}
