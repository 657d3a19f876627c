//! Collected compiler messages.
//!
//! A failing function does not stop compilation of the rest of the unit: its
//! error is recorded here as a [`Diagnostic`] and the compiler moves on.
//! Warnings (such as dropped unreachable statements) land in the same list.

use std::fmt;

use crate::CompilationError;

/// The severity level of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Compilation of the enclosing function failed.
    Error,
    /// Code was accepted but is probably not what was meant.
    Warning,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Error => f.write_str("error"),
            DiagnosticKind::Warning => f.write_str("warning"),
        }
    }
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub kind: DiagnosticKind,
    /// The underlying error. Warnings reuse the error vocabulary.
    pub error: CompilationError,
    /// The function being compiled when the diagnostic was raised, if any.
    pub function: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(error: CompilationError) -> Self {
        Self {
            kind: DiagnosticKind::Error,
            error,
            function: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(error: CompilationError) -> Self {
        Self {
            kind: DiagnosticKind::Warning,
            error,
            function: None,
        }
    }

    /// Attach the name of the function being compiled.
    pub fn in_function(mut self, name: impl Into<String>) -> Self {
        self.function = Some(name.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.function {
            Some(func) => write!(f, "{} in '{}': {}", self.kind, func, self.error),
            None => write!(f, "{}: {}", self.kind, self.error),
        }
    }
}

/// A collection of diagnostics from one compilation unit, in the order raised.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl Diagnostics {
    /// Creates a new, empty diagnostics collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a diagnostic to the collection.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.kind == DiagnosticKind::Error {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Record an error.
    pub fn error(&mut self, error: CompilationError) {
        self.push(Diagnostic::error(error));
    }

    /// Record a warning.
    pub fn warning(&mut self, error: CompilationError) {
        self.push(Diagnostic::warning(error));
    }

    /// Returns `true` if the collection contains any error diagnostics.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Returns `true` if the collection contains any warning diagnostics.
    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    /// Returns `true` if the collection contains no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Removes all diagnostics from the collection.
    pub fn clear(&mut self) {
        self.diagnostics.clear();
        self.has_errors = false;
    }

    /// Move every diagnostic of `other` into this collection.
    pub fn extend(&mut self, other: Diagnostics) {
        for diagnostic in other.diagnostics {
            self.push(diagnostic);
        }
    }

    /// Returns an iterator over all diagnostics in the collection.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Returns an iterator over only the error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Error)
    }

    /// Returns an iterator over only the warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Warning)
    }

    /// Returns the total number of diagnostics in the collection.
    pub fn count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns the number of error diagnostics in the collection.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Returns the number of warning diagnostics in the collection.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
