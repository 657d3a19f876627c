use bitflags::bitflags;

bitflags! {
    /// Hooks a type descriptor implements beyond its representation.
    ///
    /// Code generation probes these before emitting lifecycle code, so a type
    /// without [`COPY`](Self::COPY) is copied as a plain value and a type without
    /// [`DESTROY`](Self::DESTROY) needs no cleanup at scope exit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeCapabilities: u8 {
        /// `T(args)` is supported.
        const CONSTRUCT = 1 << 0;
        /// Declaring `T x;` runs a custom initializer.
        const DEFAULT_INIT = 1 << 1;
        /// Copies go through a hook instead of a plain value copy.
        const COPY = 1 << 2;
        /// Values must be destroyed when they go out of scope.
        const DESTROY = 1 << 3;
        /// At least one of `+ - * /` is defined.
        const ARITHMETIC = 1 << 4;
        /// Comparison operators are defined.
        const COMPARE = 1 << 5;

        /// Owns a runtime resource.
        const LIFECYCLE = Self::COPY.bits() | Self::DESTROY.bits();
    }
}
