//! Command objects the builder writes statements into.
//!
//! [`Command`] is the contract the builder needs from a database command:
//! settable text plus named parameters. [`SqlCommand`] is the in-memory
//! implementation used by default; it can be rendered into a
//! [`PositionalCommand`] (`$1`, `$2`, ...) for `tokio-postgres`.

mod positional;


pub use positional::PositionalCommand;

use crate::value::Value;

/// A database command that accepts text and named parameters.
pub trait Command {
    /// Replace the command text.
    fn set_command_text(&mut self, text: String);

    /// Current command text.
    fn command_text(&self) -> &str;

    /// Bind a named parameter. `None` is an absent value and must reach the
    /// database as SQL NULL.
    fn add_parameter(&mut self, name: String, value: Option<Value>);

    /// Number of currently bound parameters.
    fn parameter_count(&self) -> usize;

    /// Remove every bound parameter.
    fn clear_parameters(&mut self);
}

/// A named parameter bound on a [`SqlCommand`].
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Placeholder name, including the dialect prefix (e.g. `@Name`).
    pub name: String,
    /// Bound value; `None` is absent.
    pub value: Option<Value>,
}

/// In-memory [`Command`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlCommand {
    text: String,
    parameters: Vec<Parameter>,
}

impl SqlCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound parameters in binding order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Look up a bound parameter by its placeholder name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Rewrite `prefix`-named placeholders into PostgreSQL positional form.
    pub fn to_positional(&self, prefix: char) -> crate::error::CommandResult<PositionalCommand> {
        PositionalCommand::from_named(self, prefix)
    }
}

impl Command for SqlCommand {
    fn set_command_text(&mut self, text: String) {
        self.text = text;
    }

    fn command_text(&self) -> &str {
        &self.text
    }

    fn add_parameter(&mut self, name: String, value: Option<Value>) {
        self.parameters.push(Parameter { name, value });
    }

    fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    fn clear_parameters(&mut self) {
        self.parameters.clear();
    }
}
