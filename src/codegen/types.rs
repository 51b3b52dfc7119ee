//! IR上の値と型

use std::fmt;

/// IRのスカラー型
///
/// 式の値は常に`Int`。比較命令が返す`Bool`は直後に`Int`へ拡張され、
/// 分岐の直前にだけ`Bool`へ戻される。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrType {
    Bool,
    Int,
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Bool => write!(f, "i1"),
            IrType::Int => write!(f, "i32"),
        }
    }
}

/// 1つの命令の結果に束縛される名前（`%t0`など）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueRef(String);

impl ValueRef {
    pub fn temp(id: usize) -> Self {
        ValueRef(format!("%t{}", id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 基本ブロックのラベル（`for.cond.pos12.3`など）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    pub fn new(tag: &str, id: usize) -> Self {
        Label(format!("{}.{}", tag, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
