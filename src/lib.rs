//! uGo Language Compiler Library
//!
//! This library provides the code generator of the uGo compiler: it lowers a
//! parsed uGo file into LLVM IR text for an external toolchain.

pub mod ast;
pub mod codegen;
pub mod compiler;
pub mod error;

// Re-export commonly used types
pub use ast::{Expr, File, Stmt};
pub use codegen::{CodeGenerator, CodegenOptions};
pub use error::{CodegenError, UgoError, UgoResult};

/// Compiles `file` with default options.
pub fn compile(file: &File) -> UgoResult<String> {
    CodeGenerator::new().compile(file)
}
