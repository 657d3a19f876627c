//! Code generation options.

/// What to do with statements that follow a terminator in the same block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnreachablePolicy {
    /// Drop them and record a warning.
    #[default]
    Warn,
    /// Drop them and fail the function with `UnreachableCode`.
    Error,
}

/// Options for a [`Compiler`](crate::Compiler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerOptions {
    pub unreachable_code: UnreachablePolicy,
    /// Allow `int` arguments, initializers and return values where `float`
    /// is expected.
    pub implicit_conversions: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            unreachable_code: UnreachablePolicy::Warn,
            implicit_conversions: true,
        }
    }
}

impl CompilerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unreachable_code(mut self, policy: UnreachablePolicy) -> Self {
        self.unreachable_code = policy;
        self
    }

    pub fn with_implicit_conversions(mut self, enabled: bool) -> Self {
        self.implicit_conversions = enabled;
        self
    }
}
