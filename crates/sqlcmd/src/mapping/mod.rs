//! Declarative entity-to-table mappings.
//!
//! A [`MappingDescriptor`] names the table an entity type is stored in and
//! lists its mapped properties in declaration order. Each
//! [`PropertyMapping`] binds one property to one column and reaches the
//! property's runtime value through a [`ValueAccess`] capability, so no
//! runtime type inspection is involved.
//!
//! # Example
//!
//! ```rust
//! use sqlcmd::mapping::{MappingDescriptor, PropertyMapping};
//!
//! struct User {
//!     id: i32,
//!     name: String,
//! }
//!
//! let users = MappingDescriptor::<User>::builder("Users")
//!     .property(
//!         PropertyMapping::new("Id")
//!             .primary_key()
//!             .auto_increment()
//!             .reader(|u: &User| u.id)
//!             .writer(|u: &mut User, v| {
//!                 u.id = v.try_into()?;
//!                 Ok(())
//!             }),
//!     )
//!     .property(PropertyMapping::new("Name").reader(|u: &User| u.name.clone()))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(users.table_name(), "Users");
//! assert_eq!(users.key_properties().count(), 1);
//! ```

mod access;
mod ident;

#[cfg(test)]
mod tests;

pub use access::{FnAccess, ValueAccess};
pub use ident::{validate_property_name, validate_sql_ident};

use crate::error::{CommandError, CommandResult};
use crate::value::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// One entity property bound to one column.
pub struct PropertyMapping<E> {
    property_name: String,
    column_name: Option<String>,
    is_primary_key: bool,
    is_auto_increment: bool,
    access: Access<E>,
}

enum Access<E> {
    Fn(FnAccess<E>),
    Custom(Arc<dyn ValueAccess<E>>),
}

impl<E> Access<E> {
    fn get(&self) -> &dyn ValueAccess<E> {
        match self {
            Access::Fn(access) => access as &dyn ValueAccess<E>,
            Access::Custom(access) => access.as_ref(),
        }
    }
}

impl<E: 'static> PropertyMapping<E> {
    /// Create a mapping for `property_name`. The column defaults to the
    /// property name and the property is neither readable nor writable until
    /// a reader, writer, or accessor is attached.
    pub fn new(property_name: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            column_name: None,
            is_primary_key: false,
            is_auto_increment: false,
            access: Access::Fn(FnAccess::new()),
        }
    }

    /// Map the property to a differently named column.
    pub fn column(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = Some(column_name.into());
        self
    }

    /// Mark the property as (part of) the primary key.
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Mark the property as assigned by the database on insert.
    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    /// Attach a reader. Whatever the closure returns is converted into a
    /// [`Value`]; `Option::None` becomes [`Value::Null`].
    pub fn reader<V, F>(self, read: F) -> Self
    where
        V: Into<Value>,
        F: Fn(&E) -> V + Send + Sync + 'static,
    {
        self.raw_reader(move |entity| Some(read(entity).into()))
    }

    /// Attach a reader that can report the value as absent (`None`), which is
    /// distinct from an explicit [`Value::Null`].
    pub fn raw_reader<F>(mut self, read: F) -> Self
    where
        F: Fn(&E) -> Option<Value> + Send + Sync + 'static,
    {
        let access = self.take_fn_access().with_reader(read);
        self.access = Access::Fn(access);
        self
    }

    /// Attach a writer.
    pub fn writer<F>(mut self, write: F) -> Self
    where
        F: Fn(&mut E, Value) -> CommandResult<()> + Send + Sync + 'static,
    {
        let access = self.take_fn_access().with_writer(write);
        self.access = Access::Fn(access);
        self
    }

    /// Replace the value access capability with a custom implementation.
    pub fn accessor(mut self, access: impl ValueAccess<E> + 'static) -> Self {
        self.access = Access::Custom(Arc::new(access));
        self
    }

    // A custom accessor is replaced, not combined, by a later reader/writer.
    fn take_fn_access(&mut self) -> FnAccess<E> {
        match std::mem::replace(&mut self.access, Access::Fn(FnAccess::new())) {
            Access::Fn(access) => access,
            Access::Custom(_) => FnAccess::new(),
        }
    }
}

impl<E> PropertyMapping<E> {
    /// Property name, used verbatim after the parameter prefix.
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// Column the property is stored in.
    pub fn column_name(&self) -> &str {
        self.column_name.as_deref().unwrap_or(&self.property_name)
    }

    pub fn is_primary_key(&self) -> bool {
        self.is_primary_key
    }

    pub fn is_auto_increment(&self) -> bool {
        self.is_auto_increment
    }

    /// Whether the property's current value can be read.
    pub fn can_read(&self) -> bool {
        self.access.get().can_read()
    }

    /// Whether the property can be assigned.
    pub fn can_write(&self) -> bool {
        self.access.get().can_write()
    }

    /// Read the property's current value. `None` means absent.
    pub fn get_value(&self, entity: &E) -> Option<Value> {
        self.access.get().get_value(entity)
    }

    /// Assign the property. Fails with a mapping error naming the property
    /// when it has no writer.
    pub fn set_value(&self, entity: &mut E, value: Value) -> CommandResult<()> {
        let access = self.access.get();
        if !access.can_write() {
            return Err(CommandError::mapping(
                std::any::type_name::<E>(),
                format!("property '{}' has no writer", self.property_name),
            ));
        }
        access.set_value(entity, value)
    }
}

impl<E> Clone for PropertyMapping<E> {
    fn clone(&self) -> Self {
        Self {
            property_name: self.property_name.clone(),
            column_name: self.column_name.clone(),
            is_primary_key: self.is_primary_key,
            is_auto_increment: self.is_auto_increment,
            access: match &self.access {
                Access::Fn(access) => Access::Fn(access.clone()),
                Access::Custom(access) => Access::Custom(Arc::clone(access)),
            },
        }
    }
}

impl<E> fmt::Debug for PropertyMapping<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMapping")
            .field("property_name", &self.property_name)
            .field("column_name", &self.column_name())
            .field("is_primary_key", &self.is_primary_key)
            .field("is_auto_increment", &self.is_auto_increment)
            .field("can_read", &self.can_read())
            .field("can_write", &self.can_write())
            .finish()
    }
}

/// How an entity type maps to a table.
pub struct MappingDescriptor<E> {
    table_name: String,
    entity_name: String,
    properties: Vec<PropertyMapping<E>>,
}

impl<E: 'static> MappingDescriptor<E> {
    /// Start building a descriptor for `table_name`.
    pub fn builder(table_name: impl Into<String>) -> MappingDescriptorBuilder<E> {
        MappingDescriptorBuilder {
            table_name: table_name.into(),
            entity_name: None,
            properties: Vec::new(),
        }
    }
}

impl<E> MappingDescriptor<E> {
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Entity type name used in error messages.
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// All properties in declaration order.
    pub fn properties(&self) -> &[PropertyMapping<E>] {
        &self.properties
    }

    /// Look up a property by name.
    pub fn property(&self, property_name: &str) -> Option<&PropertyMapping<E>> {
        self.properties
            .iter()
            .find(|p| p.property_name == property_name)
    }

    /// Primary key properties in declaration order.
    pub fn key_properties(&self) -> impl Iterator<Item = &PropertyMapping<E>> {
        self.properties.iter().filter(|p| p.is_primary_key)
    }

    /// Non-key properties in declaration order.
    pub fn value_properties(&self) -> impl Iterator<Item = &PropertyMapping<E>> {
        self.properties.iter().filter(|p| !p.is_primary_key)
    }
}

impl<E> fmt::Debug for MappingDescriptor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingDescriptor")
            .field("table_name", &self.table_name)
            .field("entity_name", &self.entity_name)
            .field("properties", &self.properties)
            .finish()
    }
}

/// Builder for [`MappingDescriptor`].
pub struct MappingDescriptorBuilder<E> {
    table_name: String,
    entity_name: Option<String>,
    properties: Vec<PropertyMapping<E>>,
}

impl<E: 'static> MappingDescriptorBuilder<E> {
    /// Override the entity name reported in errors (defaults to the Rust type name).
    pub fn entity_name(mut self, name: impl Into<String>) -> Self {
        self.entity_name = Some(name.into());
        self
    }

    /// Append a property. Declaration order is preserved.
    pub fn property(mut self, property: PropertyMapping<E>) -> Self {
        self.properties.push(property);
        self
    }

    /// Validate identifiers and uniqueness, then build the descriptor.
    ///
    /// A descriptor without primary keys is valid; statements that need a key
    /// reject it when they are generated.
    pub fn build(self) -> CommandResult<MappingDescriptor<E>> {
        validate_sql_ident(&self.table_name)?;

        let mut seen = HashSet::with_capacity(self.properties.len());
        for property in &self.properties {
            validate_property_name(&property.property_name)?;
            validate_sql_ident(property.column_name())?;
            if !seen.insert(property.property_name.as_str()) {
                return Err(CommandError::invalid_identifier(format!(
                    "duplicate property '{}' in mapping for table {}",
                    property.property_name, self.table_name
                )));
            }
        }

        Ok(MappingDescriptor {
            table_name: self.table_name,
            entity_name: self
                .entity_name
                .unwrap_or_else(|| std::any::type_name::<E>().to_string()),
            properties: self.properties,
        })
    }
}
