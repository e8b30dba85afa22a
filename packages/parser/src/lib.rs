pub mod ast;
pub mod error;
pub mod extractor;
pub mod parser;
pub mod token;

pub use ast::Expression;
pub use error::{ParseError, ParseResult};
pub use extractor::{extract_binding_parts, BindingPart, BindingType, ExtractedValue, ValueKind};
pub use parser::{parse, parse_binding_expression, ExpressionParser, ParsedBinding};
pub use token::{tokenize, Token};
