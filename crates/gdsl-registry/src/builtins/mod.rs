//! Built-in type descriptors.
//!
//! | Type | Token | Module |
//! |---|---|---|
//! | `void` `bool` `int` `float` | `v` `b` `i` `f` | [`primitive`] |
//! | `float2` `float3` `float4` | `f2` `f3` `f4` | [`vector`] |
//! | `ray` `isect` `light` `shader_handle` `context_ptr` `module` | `r` `is` `lt` `sh` `ctx` `mod` | [`special`] |
//! | `dfunc` | `df` | [`distribution`] |

pub mod distribution;
pub mod primitive;
pub mod special;
pub mod vector;

use crate::TypeDescriptor;

pub use distribution::DFuncType;
pub use primitive::{BoolType, FloatType, IntType, VoidType};
pub use special::{HandleType, IsectType, ModuleType, RayType};
pub use vector::FloatVectorType;

/// One descriptor for every built-in type.
pub fn all() -> Vec<Box<dyn TypeDescriptor>> {
    vec![
        Box::new(VoidType),
        Box::new(BoolType),
        Box::new(IntType),
        Box::new(FloatType),
        Box::new(FloatVectorType::FLOAT2),
        Box::new(FloatVectorType::FLOAT3),
        Box::new(FloatVectorType::FLOAT4),
        Box::new(RayType),
        Box::new(IsectType),
        Box::new(HandleType::LIGHT),
        Box::new(HandleType::SHADER_HANDLE),
        Box::new(HandleType::CONTEXT_PTR),
        Box::new(ModuleType),
        Box::new(DFuncType),
    ]
}
