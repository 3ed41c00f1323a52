//! Search request documents: the AST, helpers to build it, and its JSON rendering.

pub mod ast;
pub mod convert;
pub mod helpers;
pub mod plan;
