//! # sqlcmd
//!
//! Parameterized SQL command generation from declarative entity-to-table
//! mappings.
//!
//! ## Features
//!
//! - **Mapping first**: describe a table once with [`MappingDescriptor`], then
//!   generate statements for any number of entities
//! - **Parameterized**: every value is bound as a named parameter (`@Name`),
//!   never spliced into SQL text
//! - **Safe defaults**: UPDATE requires a SET column and every key, DELETE
//!   requires every key, INSERT must bind at least one column
//! - **Dialect seam**: parameter prefix and paging live behind [`Dialect`];
//!   the ANSI base dialect refuses to page
//! - **Driver ready**: [`SqlCommand::to_positional`] renders `$n` placeholders
//!   for `tokio-postgres`
//!
//! ## Example
//!
//! ```rust
//! use sqlcmd::{Command, CommandBuilder, MappingDescriptor, PropertyMapping, SqlCommand};
//!
//! struct User {
//!     id: i32,
//!     name: String,
//!     age: i32,
//! }
//!
//! let users = MappingDescriptor::<User>::builder("Users")
//!     .property(PropertyMapping::new("Id").primary_key().auto_increment().reader(|u: &User| u.id))
//!     .property(PropertyMapping::new("Name").reader(|u: &User| u.name.clone()))
//!     .property(PropertyMapping::new("Age").reader(|u: &User| u.age))
//!     .build()?;
//! let builder = CommandBuilder::new(users);
//!
//! let mut cmd = SqlCommand::new();
//! builder.insert_command(&mut cmd, &User { id: 0, name: "Ann".into(), age: 30 })?;
//! assert_eq!(cmd.command_text(), "INSERT INTO Users (Name, Age) VALUES (@Name, @Age)");
//!
//! builder.update_command(&mut cmd, &User { id: 5, name: "Ann".into(), age: 31 })?;
//! assert_eq!(cmd.command_text(), "UPDATE Users SET Name=@Name, Age=@Age WHERE Id=@Id");
//! assert_eq!(cmd.parameter_count(), 3);
//! # Ok::<(), sqlcmd::CommandError>(())
//! ```

pub mod builder;
pub mod command;
pub mod dialect;
pub mod error;
pub mod mapping;
pub mod options;
pub mod value;

mod log;

pub use builder::CommandBuilder;
pub use command::{Command, Parameter, PositionalCommand, SqlCommand};
pub use dialect::{AnsiDialect, Dialect, PagingTarget};
pub use error::{CommandError, CommandResult};
pub use mapping::{
    FnAccess, MappingDescriptor, MappingDescriptorBuilder, PropertyMapping, ValueAccess,
};
pub use options::BuilderOptions;
pub use value::Value;
