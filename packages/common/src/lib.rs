pub mod metadata;
pub mod node;
pub mod problems;
pub mod text;

pub use metadata::*;
pub use node::*;
pub use problems::*;
pub use text::*;
