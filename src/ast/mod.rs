//! Abstract Syntax Tree (AST) definitions for the uGo language.
//!
//! The tree is produced by an external parser (usually handed over as JSON)
//! and is never mutated by the code generator.

use serde::{Deserialize, Serialize};

mod expressions;
mod program;
mod statements;

pub use expressions::*;
pub use program::*;
pub use statements::*;

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Byte offset used to position-qualify generated names.
    pub fn pos(&self) -> usize {
        self.start
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}
