//! 識別子とリテラルのコード生成

use crate::ast::*;
use crate::error::{SymbolKind, UgoResult};

use crate::codegen::code_generator::CodeGenerator;
use crate::codegen::types::{IrType, ValueRef};

impl CodeGenerator {
    /// 識別子をコンパイル（格納先からロードする）
    pub fn compile_identifier(&mut self, id: &Ident) -> UgoResult<ValueRef> {
        let slot = self.resolve(id, SymbolKind::Variable)?;
        let value = self.fresh_temp();
        self.emit_line(&format!(
            "{} = load {}, ptr {}, align 4",
            value,
            IrType::Int,
            slot
        ));
        Ok(value)
    }

    /// 整数リテラルをコンパイル
    ///
    /// リテラルも`0 + n`として命令を通し、必ず一時値を生成する。
    pub fn compile_number(&mut self, lit: &NumberLit) -> UgoResult<ValueRef> {
        let value = i32::try_from(lit.value).map_err(|_| {
            self.unsupported(format!("i32の範囲外の整数リテラル {}", lit.value), lit.span)
        })?;

        let result = self.fresh_temp();
        self.emit_line(&format!("{} = add {} 0, {}", result, IrType::Int, value));
        Ok(result)
    }
}
