//! Error types for gdsl.
//!
//! Every failure in the compiler is a value. Type hooks, symbol tables and the
//! code generator all return [`CompilationError`] through `Result`, and callers
//! propagate it with `?` without ever substituting a default.
//!
//! ## Error Hierarchy
//!
//! ```text
//! RegistrationError   - type table population
//! CompilationError    - semantic analysis and code generation
//! ├── Type            - operator / construction / conversion failures
//! ├── Resolution      - unknown names, overload failures
//! ├── Redeclaration   - conflicting prototypes, duplicate bodies or locals
//! ├── Control         - missing returns, unreachable code, misplaced break
//! └── Internal        - marker types at codegen, malformed IR
//! ```
//!
//! Type hooks do not know where in the source they were invoked, so they raise
//! errors with an unset span; the code generator fills it in with
//! [`CompilationError::with_span`].

use thiserror::Error;

use crate::Span;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors that occur while populating the type table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A referenced type was not found.
    #[error("type not found: {0}")]
    TypeNotFound(String),

    /// A type with this name already exists.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// Two types hash to the same identity or share a mangling token.
    #[error("type '{name}' collides with registered type '{existing}'")]
    Collision {
        /// The type being registered.
        name: String,
        /// The type already in the table.
        existing: String,
    },
}

// ============================================================================
// Compilation Errors
// ============================================================================

/// The broad category of a [`CompilationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Type errors: bad operands, bad construction, mismatched values.
    Type,
    /// Name resolution errors.
    Resolution,
    /// Conflicting declarations.
    Redeclaration,
    /// Control-flow errors.
    Control,
    /// Compiler invariants violated.
    Internal,
}

impl ErrorKind {
    /// Lowercase name used in diagnostics.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Type => "type error",
            ErrorKind::Resolution => "resolution error",
            ErrorKind::Redeclaration => "redeclaration error",
            ErrorKind::Control => "control error",
            ErrorKind::Internal => "internal error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that occur during semantic analysis and code generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompilationError {
    /// A value of the wrong type was supplied.
    #[error("at {span}: {message}")]
    TypeMismatch {
        /// Description of the mismatch.
        message: String,
        /// Where the mismatch occurred.
        span: Span,
    },

    /// No binary operator exists for the operand types.
    #[error("at {span}: no operator '{op}' for types '{left}' and '{right}'")]
    NoOperator {
        /// Operator symbol.
        op: &'static str,
        /// Left operand type.
        left: String,
        /// Right operand type.
        right: String,
        /// Where the operator was used.
        span: Span,
    },

    /// No unary operator exists for the operand type.
    #[error("at {span}: no operator '{op}' for type '{operand}'")]
    NoUnaryOperator {
        /// Operator symbol.
        op: &'static str,
        /// Operand type.
        operand: String,
        /// Where the operator was used.
        span: Span,
    },

    /// A type without a construct hook was constructed.
    #[error("at {span}: type '{name}' cannot be constructed")]
    NotConstructible {
        /// Type name.
        name: String,
        /// Where the construction occurred.
        span: Span,
    },

    /// An invalid operation was attempted.
    #[error("at {span}: {message}")]
    InvalidOperation {
        /// Description of what's invalid.
        message: String,
        /// Where the operation occurred.
        span: Span,
    },

    /// A referenced type could not be found.
    #[error("at {span}: unknown type '{name}'")]
    UnknownType {
        /// The type name that wasn't found.
        name: String,
        /// Where the type was referenced.
        span: Span,
    },

    /// A referenced function could not be found.
    #[error("at {span}: unknown function '{name}'")]
    UnknownFunction {
        /// The function name that wasn't found.
        name: String,
        /// Where the function was called.
        span: Span,
    },

    /// A referenced variable could not be found.
    #[error("at {span}: unknown variable '{name}'")]
    UnknownVariable {
        /// The variable name that wasn't found.
        name: String,
        /// Where the variable was referenced.
        span: Span,
    },

    /// No overload accepts the argument types.
    #[error("at {span}: no matching overload for '{name}({args})'")]
    NoMatchingOverload {
        /// Function name.
        name: String,
        /// Argument types, comma separated.
        args: String,
        /// Where the call occurred.
        span: Span,
    },

    /// More than one overload is equally good.
    #[error("at {span}: ambiguous call to '{name}': candidates are {candidates}")]
    AmbiguousOverload {
        /// Function name.
        name: String,
        /// Description of the tied candidates.
        candidates: String,
        /// Where the call occurred.
        span: Span,
    },

    /// A prototype conflicts with an earlier declaration of the same signature.
    #[error("at {span}: conflicting declaration of '{name}': {message}")]
    PrototypeConflict {
        /// Function name.
        name: String,
        /// What differs.
        message: String,
        /// Where the new declaration occurred.
        span: Span,
    },

    /// A function body was supplied twice.
    #[error("at {span}: function '{name}' already has a body")]
    FunctionRedefinition {
        /// Function name.
        name: String,
        /// Where the second body starts.
        span: Span,
    },

    /// A variable was redeclared in the same scope.
    #[error("at {new_span}: variable '{name}' redeclared (originally declared at {original_span})")]
    VariableRedeclaration {
        /// The variable name.
        name: String,
        /// Where the variable was originally declared.
        original_span: Span,
        /// Where the redeclaration occurred.
        new_span: Span,
    },

    /// A non-void function can reach its end without returning.
    #[error("at {span}: not all code paths of '{name}' return a value")]
    MissingReturn {
        /// Function name.
        name: String,
        /// Where the function is declared.
        span: Span,
    },

    /// A statement follows a terminator in the same block.
    #[error("at {span}: unreachable code")]
    UnreachableCode {
        /// Where the first unreachable statement starts.
        span: Span,
    },

    /// `break` or `continue` outside a loop.
    #[error("at {span}: '{keyword}' outside of a loop")]
    BreakOutsideLoop {
        /// `break` or `continue`.
        keyword: &'static str,
        /// Where the statement occurred.
        span: Span,
    },

    /// A compile-time marker type reached code generation.
    #[error("at {span}: type '{name}' has no runtime representation")]
    NoRepresentation {
        /// Type name.
        name: String,
        /// Where the value was required.
        span: Span,
    },

    /// A compiler invariant was violated.
    #[error("at {span}: internal error: {message}")]
    Internal {
        /// Description.
        message: String,
        /// Where the compiler was working.
        span: Span,
    },

    /// The IR builder rejected an instruction.
    #[error("internal error: {message}")]
    Ir {
        /// The builder's description of the malformed instruction.
        message: String,
    },
}

impl CompilationError {
    /// Get the span where this error occurred.
    ///
    /// IR errors carry no location and report the default span.
    pub fn span(&self) -> Span {
        match self {
            CompilationError::TypeMismatch { span, .. }
            | CompilationError::NoOperator { span, .. }
            | CompilationError::NoUnaryOperator { span, .. }
            | CompilationError::NotConstructible { span, .. }
            | CompilationError::InvalidOperation { span, .. }
            | CompilationError::UnknownType { span, .. }
            | CompilationError::UnknownFunction { span, .. }
            | CompilationError::UnknownVariable { span, .. }
            | CompilationError::NoMatchingOverload { span, .. }
            | CompilationError::AmbiguousOverload { span, .. }
            | CompilationError::PrototypeConflict { span, .. }
            | CompilationError::FunctionRedefinition { span, .. }
            | CompilationError::MissingReturn { span, .. }
            | CompilationError::UnreachableCode { span }
            | CompilationError::BreakOutsideLoop { span, .. }
            | CompilationError::NoRepresentation { span, .. }
            | CompilationError::Internal { span, .. } => *span,
            CompilationError::VariableRedeclaration { new_span, .. } => *new_span,
            CompilationError::Ir { .. } => Span::default(),
        }
    }

    /// Fill in the span if the producer left it unset (line 0).
    pub fn with_span(mut self, at: Span) -> Self {
        if !self.span().is_unknown() {
            return self;
        }
        match &mut self {
            CompilationError::TypeMismatch { span, .. }
            | CompilationError::NoOperator { span, .. }
            | CompilationError::NoUnaryOperator { span, .. }
            | CompilationError::NotConstructible { span, .. }
            | CompilationError::InvalidOperation { span, .. }
            | CompilationError::UnknownType { span, .. }
            | CompilationError::UnknownFunction { span, .. }
            | CompilationError::UnknownVariable { span, .. }
            | CompilationError::NoMatchingOverload { span, .. }
            | CompilationError::AmbiguousOverload { span, .. }
            | CompilationError::PrototypeConflict { span, .. }
            | CompilationError::FunctionRedefinition { span, .. }
            | CompilationError::MissingReturn { span, .. }
            | CompilationError::UnreachableCode { span }
            | CompilationError::BreakOutsideLoop { span, .. }
            | CompilationError::NoRepresentation { span, .. }
            | CompilationError::Internal { span, .. } => *span = at,
            CompilationError::VariableRedeclaration { new_span, .. } => *new_span = at,
            CompilationError::Ir { .. } => {}
        }
        self
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompilationError::TypeMismatch { .. }
            | CompilationError::NoOperator { .. }
            | CompilationError::NoUnaryOperator { .. }
            | CompilationError::NotConstructible { .. }
            | CompilationError::InvalidOperation { .. }
            | CompilationError::UnknownType { .. } => ErrorKind::Type,
            CompilationError::UnknownFunction { .. }
            | CompilationError::UnknownVariable { .. }
            | CompilationError::NoMatchingOverload { .. }
            | CompilationError::AmbiguousOverload { .. } => ErrorKind::Resolution,
            CompilationError::PrototypeConflict { .. }
            | CompilationError::FunctionRedefinition { .. }
            | CompilationError::VariableRedeclaration { .. } => ErrorKind::Redeclaration,
            CompilationError::MissingReturn { .. }
            | CompilationError::UnreachableCode { .. }
            | CompilationError::BreakOutsideLoop { .. } => ErrorKind::Control,
            CompilationError::NoRepresentation { .. }
            | CompilationError::Internal { .. }
            | CompilationError::Ir { .. } => ErrorKind::Internal,
        }
    }

    /// Shorthand for an [`CompilationError::Internal`] with an unset span.
    pub fn internal(message: impl Into<String>) -> Self {
        CompilationError::Internal {
            message: message.into(),
            span: Span::default(),
        }
    }

    /// Shorthand for a [`CompilationError::TypeMismatch`] with an unset span.
    pub fn mismatch(message: impl Into<String>) -> Self {
        CompilationError::TypeMismatch {
            message: message.into(),
            span: Span::default(),
        }
    }
}
