//! The parsed statement model consumed by the translation phase,
//! and the lowering from the `sqlparser` AST into it.

pub mod ast;
pub mod error;
pub mod parse;
