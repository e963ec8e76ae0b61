//! Filter expressions.
//!
//! The pipeline is:
//!
//! 1. **Building**: construct an [`Expression`] with the builder functions or
//!    parse it from text with [`parse_filter`].
//! 2. **Column options**: split each column token into a name and its inline
//!    option block.
//! 3. **Binding**: resolve named values against caller-supplied [`Bindings`].
//! 4. **Compiling**: emit the [`FilterNode`](tablestore_model::FilterNode)
//!    tree consumed by the transport.

pub mod ast;
pub mod binding;
pub mod column;
pub mod compiler;
pub mod parser;

pub use ast::{ColumnBuilder, Comparison, Expression, ValueRef, and, col, not, or, var};
pub use binding::{Bindings, bindings, resolve};
pub use column::{ColumnRef, parse as parse_column};
pub use compiler::compile;
pub use parser::parse_filter;
