pub mod checker;
pub mod interface;

use crate::walker::Inference;

/// Renders one inferred template as type-checkable TypeScript source.
pub trait ShapeGenerator {
    fn generate(&self, inference: &Inference) -> String;
}
