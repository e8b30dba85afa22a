/// Configuration options for the use-checker generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerOptions {
    /// Pass `undefined` instead of `null!` as generated call arguments
    /// When true, the external checker verifies that handler signatures
    /// tolerate possibly-undefined inputs
    pub undefined_check: bool,

    /// Emit assignment probes from binding expressions to the declared
    /// properties of their target elements
    pub check_property_bindings: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            undefined_check: false,
            check_property_bindings: false,
        }
    }
}

impl CheckerOptions {
    /// Create a new options instance with every check enabled
    pub fn full() -> Self {
        Self {
            undefined_check: true,
            check_property_bindings: true,
        }
    }

    /// Create a new options instance that only checks property bindings
    pub fn property_bindings() -> Self {
        Self {
            undefined_check: false,
            check_property_bindings: true,
        }
    }
}
