//! Function prototypes: in-language signatures and their IR declarations.
//!
//! Local functions are emitted under a mangled name built from the type
//! tokens of their parameters (`add$f.f`), so overloads never collide in the
//! IR module. External functions keep the name they link against.

use gdsl_core::{CompilationError, Result, Span, TypeHash, builtins};
use gdsl_ir::{FuncId, IrBuilder, IrError, Linkage, Signature};
use gdsl_registry::TypeTable;
use tracing::{debug, trace};

use crate::ast::PrototypeDecl;
use crate::state::ParserState;
use crate::symbols::{EntryId, FunctionTable};

/// A named, typed parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionArgument {
    pub name: String,
    pub ty: TypeHash,
    pub span: Span,
}

impl FunctionArgument {
    pub fn new(name: impl Into<String>, ty: TypeHash, span: Span) -> Self {
        Self {
            name: name.into(),
            ty,
            span,
        }
    }
}

/// A function signature as written in source.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    name: String,
    extern_name: Option<String>,
    return_type: TypeHash,
    args: Vec<FunctionArgument>,
    span: Span,
}

impl Prototype {
    /// A function defined in this unit.
    pub fn local(
        name: impl Into<String>,
        return_type: TypeHash,
        args: Vec<FunctionArgument>,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            extern_name: None,
            return_type,
            args,
            span,
        }
    }

    /// A function provided by the runtime under `extern_name`.
    pub fn external(
        name: impl Into<String>,
        extern_name: impl Into<String>,
        return_type: TypeHash,
        args: Vec<FunctionArgument>,
        span: Span,
    ) -> Self {
        Self {
            extern_name: Some(extern_name.into()),
            ..Self::local(name, return_type, args, span)
        }
    }

    /// Resolve the type names of a parsed prototype.
    pub fn from_decl(decl: &PrototypeDecl<'_>, types: &TypeTable) -> Result<Self> {
        let return_type = types.resolve_name(decl.return_type.name, decl.return_type.span)?;
        let args = decl
            .args
            .iter()
            .map(|arg| {
                let ty = types.resolve_name(arg.ty.name, arg.ty.span)?;
                Ok(FunctionArgument::new(arg.name.name, ty, arg.span))
            })
            .collect::<Result<Vec<_>>>()?;

        let prototype = Self::local(decl.name.name, return_type, args, decl.span);
        Ok(match decl.extern_name {
            Some(extern_name) => Self {
                extern_name: Some(extern_name.to_string()),
                ..prototype
            },
            None => prototype,
        })
    }

    /// Mark the prototype as external, linked as `extern_name`.
    pub fn set_external(&mut self, extern_name: impl Into<String>) {
        self.extern_name = Some(extern_name.into());
    }

    pub fn is_external(&self) -> bool {
        self.extern_name.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extern_name(&self) -> Option<&str> {
        self.extern_name.as_deref()
    }

    pub fn return_type(&self) -> TypeHash {
        self.return_type
    }

    pub fn args(&self) -> &[FunctionArgument] {
        &self.args
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn linkage(&self) -> Linkage {
        if self.is_external() {
            Linkage::External
        } else {
            Linkage::Local
        }
    }

    pub fn param_types(&self) -> Vec<TypeHash> {
        self.args.iter().map(|a| a.ty).collect()
    }

    /// Whether both prototypes take the same parameter types.
    pub fn args_match(&self, other: &Prototype) -> bool {
        self.args.len() == other.args.len()
            && self.args.iter().zip(&other.args).all(|(a, b)| a.ty == b.ty)
    }

    /// `name(float, float)` for diagnostics.
    pub fn describe(&self, types: &TypeTable) -> String {
        let params: Vec<_> = self
            .args
            .iter()
            .map(|a| types.name_of(a.ty).unwrap_or("?"))
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }

    /// `name$tok.tok` from the parameter type tokens.
    pub fn mangled_name(&self, types: &TypeTable) -> Result<String> {
        let tokens = self
            .args
            .iter()
            .map(|arg| {
                types.mangle_of(arg.ty).ok_or_else(|| {
                    CompilationError::internal(format!(
                        "argument '{}' of '{}' has an unregistered type",
                        arg.name, self.name
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("{}${}", self.name, tokens.join(".")))
    }

    /// Symbol of the IR function: the extern name, or the mangled name.
    pub fn ir_name(&self, types: &TypeTable) -> Result<String> {
        match &self.extern_name {
            Some(name) => Ok(name.clone()),
            None => self.mangled_name(types),
        }
    }

    /// IR signature from the argument and return representations.
    pub fn ir_signature(&self, types: &TypeTable) -> Result<Signature> {
        let params = self
            .args
            .iter()
            .map(|arg| {
                if arg.ty == builtins::VOID {
                    return Err(CompilationError::InvalidOperation {
                        message: format!("argument '{}' cannot have type 'void'", arg.name),
                        span: arg.span,
                    });
                }
                types
                    .representation(arg.ty)
                    .map_err(|e| e.with_span(arg.span))
            })
            .collect::<Result<Vec<_>>>()?;
        let ret = types
            .representation(self.return_type)
            .map_err(|e| e.with_span(self.span))?;
        Ok(Signature::new(params, ret))
    }

    /// Look up an existing declaration of this exact prototype.
    ///
    /// Fails with [`CompilationError::PrototypeConflict`] when a declaration
    /// with the same parameters disagrees on return type or linkage.
    pub fn check_for_entry(&self, functions: &FunctionTable) -> Result<Option<EntryId>> {
        functions.find(self)
    }

    /// Register the prototype and declare its IR function.
    ///
    /// Identical redeclarations return the existing entry without touching
    /// the module.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn declare(
        &self,
        state: &mut ParserState,
        builder: &mut IrBuilder<'_>,
        types: &TypeTable,
    ) -> Result<EntryId> {
        if let Some(id) = self.check_for_entry(&state.functions)? {
            trace!(name = %self.name, "reusing existing declaration");
            return Ok(id);
        }

        let ir_name = self.ir_name(types)?;
        let signature = self.ir_signature(types)?;
        let func = builder
            .declare_function(&ir_name, signature, self.linkage())
            .map_err(|e| match e {
                IrError::SignatureMismatch { .. } => CompilationError::PrototypeConflict {
                    name: self.name.clone(),
                    message: format!("symbol '{ir_name}' is already declared with another signature"),
                    span: self.span,
                },
                other => CompilationError::from(other).with_span(self.span),
            })?;

        debug!(name = %self.name, symbol = %ir_name, external = self.is_external(), "declared function");
        Ok(state.functions.insert(self.clone(), func))
    }

    /// Register the prototype and return its IR function.
    pub fn codegen(
        &self,
        state: &mut ParserState,
        builder: &mut IrBuilder<'_>,
        types: &TypeTable,
    ) -> Result<FuncId> {
        let id = self.declare(state, builder, types)?;
        Ok(state.functions.entry(id)?.func)
    }
}
