//! IR module: the container of function declarations and definitions.

use rustc_hash::FxHashMap;

use crate::{FuncId, IrError, IrFunction, Linkage, Signature};

/// A compilation unit's worth of IR functions.
///
/// Functions are looked up by symbol name. Declaring a name twice with the same
/// signature and linkage returns the existing function, so forward declarations
/// never duplicate a symbol.
#[derive(Debug, Clone, Default)]
pub struct IrModule {
    name: String,
    functions: Vec<IrFunction>,
    by_name: FxHashMap<String, FuncId>,
}

impl IrModule {
    /// Create an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    /// Module name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a function, or return the existing declaration of the same symbol.
    ///
    /// Fails if the symbol exists with a different signature or linkage.
    pub fn declare_function(
        &mut self,
        name: &str,
        signature: Signature,
        linkage: Linkage,
    ) -> Result<FuncId, IrError> {
        if let Some(&id) = self.by_name.get(name) {
            let existing = &self.functions[id.0 as usize];
            if existing.signature() != &signature || existing.linkage() != linkage {
                return Err(IrError::SignatureMismatch {
                    name: name.to_string(),
                });
            }
            return Ok(id);
        }

        let id = FuncId(self.functions.len() as u32);
        self.functions
            .push(IrFunction::new(name.to_string(), signature, linkage));
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Look up a function by symbol name.
    pub fn get_function(&self, name: &str) -> Option<FuncId> {
        self.by_name.get(name).copied()
    }

    /// A function by id.
    pub fn function(&self, id: FuncId) -> Result<&IrFunction, IrError> {
        self.functions
            .get(id.0 as usize)
            .ok_or(IrError::UnknownFunction { id: id.0 })
    }

    /// A function by id, mutably.
    pub fn function_mut(&mut self, id: FuncId) -> Result<&mut IrFunction, IrError> {
        self.functions
            .get_mut(id.0 as usize)
            .ok_or(IrError::UnknownFunction { id: id.0 })
    }

    /// All functions in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = (FuncId, &IrFunction)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(i, f)| (FuncId(i as u32), f))
    }

    /// Number of declared functions.
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// A function by symbol name.
    pub fn function_by_name(&self, name: &str) -> Option<&IrFunction> {
        self.get_function(name)
            .and_then(|id| self.functions.get(id.0 as usize))
    }

    /// Number of call instructions in `caller` targeting the symbol `callee`.
    ///
    /// Returns 0 if either function is unknown.
    pub fn count_calls(&self, caller: &str, callee: &str) -> usize {
        let (Some(caller), Some(callee)) =
            (self.function_by_name(caller), self.get_function(callee))
        else {
            return 0;
        };
        caller
            .instructions()
            .filter(|inst| inst.kind.calls(callee))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IrType;

    fn sig() -> Signature {
        Signature::new(vec![IrType::F32, IrType::F32], IrType::F32)
    }

    #[test]
    fn redeclaration_returns_same_id() {
        let mut module = IrModule::new("m");
        let a = module.declare_function("add", sig(), Linkage::Local).unwrap();
        let b = module.declare_function("add", sig(), Linkage::Local).unwrap();
        assert_eq!(a, b);
        assert_eq!(module.function_count(), 1);
    }

    #[test]
    fn redeclaration_with_other_signature_fails() {
        let mut module = IrModule::new("m");
        module.declare_function("add", sig(), Linkage::Local).unwrap();
        let result = module.declare_function(
            "add",
            Signature::new(vec![IrType::I32], IrType::I32),
            Linkage::Local,
        );
        assert!(matches!(result, Err(IrError::SignatureMismatch { .. })));
    }

    #[test]
    fn linkage_is_part_of_identity() {
        let mut module = IrModule::new("m");
        module.declare_function("sin", sig(), Linkage::External).unwrap();
        assert!(module.declare_function("sin", sig(), Linkage::Local).is_err());
    }

    #[test]
    fn lookup_by_name() {
        let mut module = IrModule::new("m");
        let id = module.declare_function("f", sig(), Linkage::Local).unwrap();
        assert_eq!(module.get_function("f"), Some(id));
        assert_eq!(module.get_function("g"), None);
        assert_eq!(module.function(id).unwrap().name(), "f");
    }
}
