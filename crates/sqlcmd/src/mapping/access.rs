//! Property value access.

use crate::error::{CommandError, CommandResult};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Reads and writes one property's runtime value on an entity instance.
///
/// Implemented by [`FnAccess`] for closure-based mappings; implement it
/// directly for accessors that need their own state.
pub trait ValueAccess<E>: Send + Sync {
    /// Read the current value. `None` means the value is absent.
    fn get_value(&self, entity: &E) -> Option<Value>;

    /// Assign a value.
    fn set_value(&self, entity: &mut E, value: Value) -> CommandResult<()>;

    /// Whether [`get_value`](Self::get_value) can produce a value.
    fn can_read(&self) -> bool {
        true
    }

    /// Whether [`set_value`](Self::set_value) can assign a value.
    fn can_write(&self) -> bool {
        true
    }
}

type Reader<E> = Arc<dyn Fn(&E) -> Option<Value> + Send + Sync>;
type Writer<E> = Arc<dyn Fn(&mut E, Value) -> CommandResult<()> + Send + Sync>;

/// Closure-backed [`ValueAccess`]. A missing reader makes the property
/// unreadable; a missing writer makes it read-only.
pub struct FnAccess<E> {
    reader: Option<Reader<E>>,
    writer: Option<Writer<E>>,
}

impl<E> FnAccess<E> {
    pub fn new() -> Self {
        Self {
            reader: None,
            writer: None,
        }
    }

    pub fn with_reader<F>(mut self, read: F) -> Self
    where
        F: Fn(&E) -> Option<Value> + Send + Sync + 'static,
    {
        self.reader = Some(Arc::new(read));
        self
    }

    pub fn with_writer<F>(mut self, write: F) -> Self
    where
        F: Fn(&mut E, Value) -> CommandResult<()> + Send + Sync + 'static,
    {
        self.writer = Some(Arc::new(write));
        self
    }
}

impl<E> Default for FnAccess<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for FnAccess<E> {
    fn clone(&self) -> Self {
        Self {
            reader: self.reader.clone(),
            writer: self.writer.clone(),
        }
    }
}

impl<E> fmt::Debug for FnAccess<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAccess")
            .field("reader", &self.reader.is_some())
            .field("writer", &self.writer.is_some())
            .finish()
    }
}

impl<E> ValueAccess<E> for FnAccess<E> {
    fn get_value(&self, entity: &E) -> Option<Value> {
        self.reader.as_ref().and_then(|read| read(entity))
    }

    fn set_value(&self, entity: &mut E, value: Value) -> CommandResult<()> {
        match &self.writer {
            Some(write) => write(entity, value),
            None => Err(CommandError::mapping(
                std::any::type_name::<E>(),
                "property has no writer",
            )),
        }
    }

    fn can_read(&self) -> bool {
        self.reader.is_some()
    }

    fn can_write(&self) -> bool {
        self.writer.is_some()
    }
}
