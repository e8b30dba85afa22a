//! Scope-correct statement generation for binding templates.
//!
//! Where the inference crate reconstructs the data shape a template
//! expects, this crate lowers the template itself: every element, binding,
//! repeat scope, and conditional branch becomes a TypeScript statement
//! placed in an equivalent lexical scope, so an ordinary type checker can
//! validate the template against the element class it renders.
//!
//! ## Example
//!
//! ```
//! use bindshape_common::{ElementMetadata, ElementNode, ProblemLog, TemplateNode};
//! use bindshape_transpiler::render_template_check;
//!
//! let nodes: Vec<TemplateNode> = vec![ElementNode::new("div")
//!     .child(TemplateNode::text("[[user.name]]"))
//!     .into()];
//! let mut problems = ProblemLog::new();
//! let code = render_template_check(
//!     "UserView",
//!     &nodes,
//!     &ElementMetadata::new(),
//!     "user-view.html",
//!     &mut problems,
//! )
//! .unwrap();
//! assert!(code.starts_with("export class UserViewCheck extends UserView"));
//! assert!(code.contains("setTextContent(`${__f(this.user)!.name}`);"));
//! assert!(problems.is_empty());
//! ```

mod attributes;
mod builder;
mod context;
mod error;
mod expr;
mod handlers;
mod output;
mod transpiler;

pub use attributes::is_html_attribute;
pub use builder::CodeBuilder;
pub use context::{ContextStack, TranspilerContext};
pub use error::{TranspileError, TranspileResult};
pub use expr::generate_expression;
pub use handlers::blacklist::BlacklistHandler;
pub use handlers::comment::CommentHandler;
pub use handlers::conditional::ConditionalHandler;
pub use handlers::element::ElementHandler;
pub use handlers::repeat::RepeatHandler;
pub use handlers::text::TextHandler;
pub use handlers::NodeHandler;
pub use output::{output_file_content, render_template_check, HELPER_PREAMBLE};
pub use transpiler::{AttributeValueType, TemplateTranspiler, TranspiledValue};
