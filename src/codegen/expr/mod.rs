//! 式のコード生成モジュール
//!
//! どの式も新しい一時値を1つ返す（単項`+`と括弧式は内側の値をそのまま返す）。

mod basic;
mod binary;
mod call;
mod unary;

use crate::ast::*;
use crate::error::UgoResult;

use super::code_generator::CodeGenerator;
use super::types::{IrType, ValueRef};

impl CodeGenerator {
    /// 式をコンパイル
    pub fn compile_expression(&mut self, expr: &Expr) -> UgoResult<ValueRef> {
        match expr {
            Expr::Ident(id) => self.compile_identifier(id),
            Expr::Number(lit) => self.compile_number(lit),
            Expr::Binary(binary) => self.compile_binary_expr(binary),
            Expr::Unary(unary) => self.compile_unary_expr(unary),
            Expr::Paren(paren) => self.compile_expression(&paren.inner),
            Expr::Call(call) => self.compile_call_expr(call),
        }
    }

    /// 分岐条件として式をコンパイルし、`i1`の値を返す
    pub fn compile_condition(&mut self, expr: &Expr) -> UgoResult<ValueRef> {
        let value = self.compile_expression(expr)?;
        let flag = self.fresh_temp();
        self.emit_line(&format!("{} = icmp ne {} {}, 0", flag, IrType::Int, value));
        Ok(flag)
    }
}
