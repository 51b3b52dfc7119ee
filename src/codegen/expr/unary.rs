//! 単項演算のコード生成

use crate::ast::*;
use crate::error::UgoResult;

use crate::codegen::code_generator::CodeGenerator;
use crate::codegen::types::{IrType, ValueRef};

impl CodeGenerator {
    /// 単項演算式をコンパイル
    pub fn compile_unary_expr(&mut self, unary: &UnaryExpr) -> UgoResult<ValueRef> {
        let operand = self.compile_expression(&unary.operand)?;

        match unary.op {
            UnaryOp::Neg => {
                let result = self.fresh_temp();
                self.emit_line(&format!("{} = sub {} 0, {}", result, IrType::Int, operand));
                Ok(result)
            }
            UnaryOp::Plus => Ok(operand),
        }
    }
}
