/// Configuration for a [`CommandBuilder`](crate::CommandBuilder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Treat a key whose value is zero as unset and leave it out of INSERT
    /// statements. Default is `true`.
    pub treat_zero_as_null_for_keys: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            treat_zero_as_null_for_keys: true,
        }
    }
}

impl BuilderOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether zero-valued keys are treated as unset on insert.
    pub fn with_treat_zero_as_null_for_keys(mut self, enabled: bool) -> Self {
        self.treat_zero_as_null_for_keys = enabled;
        self
    }
}
