//! Rendering domain types: `ray`, `isect`, the opaque handles, and the
//! `module` marker.

use gdsl_core::{CompilationError, Span, TypeHash, builtins};
use gdsl_ir::IrType;

use crate::{HookContext, TypeDescriptor, TypedResult};

/// `ray`: origin, direction and the parametric interval `[min_t, max_t]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RayType;

impl TypeDescriptor for RayType {
    fn name(&self) -> &str {
        "ray"
    }

    fn mangle(&self) -> &str {
        "r"
    }

    fn representation(&self) -> Option<IrType> {
        Some(IrType::structure(
            "ray",
            vec![
                IrType::Vector(3),
                IrType::Vector(3),
                IrType::F32,
                IrType::F32,
            ],
        ))
    }
}

/// `isect`: hit point, surface normal and ray parameter of an intersection.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsectType;

impl TypeDescriptor for IsectType {
    fn name(&self) -> &str {
        "isect"
    }

    fn mangle(&self) -> &str {
        "is"
    }

    fn representation(&self) -> Option<IrType> {
        Some(IrType::structure(
            "isect",
            vec![IrType::Vector(3), IrType::Vector(3), IrType::F32],
        ))
    }
}

/// A pointer to a runtime object the language never looks inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleType {
    name: &'static str,
    mangle: &'static str,
    opaque: &'static str,
}

impl HandleType {
    /// `light`
    pub const LIGHT: Self = Self {
        name: "light",
        mangle: "lt",
        opaque: "light",
    };
    /// `shader_handle`: a compiled shader function.
    pub const SHADER_HANDLE: Self = Self {
        name: "shader_handle",
        mangle: "sh",
        opaque: "shader",
    };
    /// `context_ptr`: hidden `this` of shaders and distributions.
    pub const CONTEXT_PTR: Self = Self {
        name: "context_ptr",
        mangle: "ctx",
        opaque: "context",
    };
}

impl TypeDescriptor for HandleType {
    fn name(&self) -> &str {
        self.name
    }

    fn mangle(&self) -> &str {
        self.mangle
    }

    fn representation(&self) -> Option<IrType> {
        Some(IrType::opaque_ptr(self.opaque))
    }
}

/// `module`: names a compilation unit at compile time. Never a runtime value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleType;

impl TypeDescriptor for ModuleType {
    fn name(&self) -> &str {
        "module"
    }

    fn mangle(&self) -> &str {
        "mod"
    }

    fn type_hash(&self) -> TypeHash {
        builtins::MODULE
    }

    fn representation(&self) -> Option<IrType> {
        None
    }

    fn default_initialize(&self, _cx: &mut HookContext<'_, '_>) -> TypedResult {
        Err(CompilationError::NoRepresentation {
            name: "module".to_string(),
            span: Span::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::test_support::emit;
    use gdsl_ir::{Constant, Value};

    #[test]
    fn ray_layout() {
        let ty = RayType.representation().unwrap();
        assert_eq!(ty.size_in_bytes(), Some(48));
    }

    #[test]
    fn handles_are_opaque_pointers() {
        let ty = HandleType::LIGHT.representation().unwrap();
        assert!(ty.is_pointer());
        assert_eq!(ty.to_string(), "%light*");
        assert_eq!(HandleType::CONTEXT_PTR.type_hash(), builtins::CONTEXT_PTR);
    }

    #[test]
    fn handle_default_is_null() {
        emit(vec![], |cx| {
            let v = HandleType::SHADER_HANDLE.default_initialize(cx).unwrap();
            assert_eq!(
                v.value,
                Value::Const(Constant::Null(IrType::opaque_ptr("shader")))
            );
        });
    }

    #[test]
    fn module_fails_loudly() {
        assert!(ModuleType.representation().is_none());
        emit(vec![], |cx| {
            let err = ModuleType.default_initialize(cx).unwrap_err();
            assert!(matches!(err, CompilationError::NoRepresentation { .. }));
        });
    }

    #[test]
    fn isect_has_no_hooks() {
        emit(vec![], |cx| {
            let err = IsectType.construct(cx, &[]).unwrap_err();
            assert_eq!(err.to_string(), "at 0:0: type 'isect' cannot be constructed");
        });
    }
}
