//! Code generation module for the uGo language.
//!
//! This module lowers the AST into textual LLVM IR in a single pass.

mod code_generator;
mod expr;
mod runtime;
mod stmt_codegen;
mod symbol_table;
mod types;

pub use code_generator::{CodeGenerator, CodegenOptions};
pub use runtime::BUILTINS;
pub use symbol_table::{Object, ObjectKind, Scope, ScopeManager};
pub use types::{IrType, Label, ValueRef};
