//! Data-shape inference for binding templates.
//!
//! Walks a parsed template tree, observes every data path its binding
//! expressions touch, and merges the observations into a shape tree
//! describing the data context the template expects. The codegen module
//! renders that shape as type-checkable TypeScript source, either as an
//! interface declaration or as a class exercising every observed use.
//!
//! ## Example
//!
//! ```
//! use bindshape_common::{ElementNode, ProblemLog, TemplateNode};
//! use bindshape_inference::{infer_template, InterfaceGenerator};
//!
//! let nodes: Vec<TemplateNode> =
//!     vec![ElementNode::new("div").attr("title", "[[foo.bar]]").into()];
//! let mut problems = ProblemLog::new();
//! let inference = infer_template(&nodes, "demo.html", &mut problems).unwrap();
//!
//! let rendered = InterfaceGenerator::new("MyView").render(&inference.shape);
//! assert_eq!(
//!     rendered,
//!     "export interface MyView {\nfoo: null|undefined|{bar: any|null|undefined;};\n};"
//! );
//! ```

pub mod codegen;
pub mod error;
pub mod observe;
pub mod options;
pub mod scope;
pub mod shape;
pub mod walker;

// Re-export main types for convenience
pub use codegen::checker::UseCheckerGenerator;
pub use codegen::interface::InterfaceGenerator;
pub use codegen::ShapeGenerator;
pub use error::{InferenceError, InferenceResult};
pub use observe::{observe_expression, ObservationSet, PathObservation, PathSegment, TerminalKind};
pub use options::CheckerOptions;
pub use scope::{AliasScope, AliasTarget};
pub use shape::{ShapeKind, ShapeNode, ShapeTree, LIST_ELEMENT_KEY};
pub use walker::{infer_template, Inference, PropertyBinding};
