//! 二項演算のコード生成

use crate::ast::*;
use crate::error::UgoResult;

use crate::codegen::code_generator::CodeGenerator;
use crate::codegen::types::{IrType, ValueRef};

/// 二項演算子に対応する命令
pub(crate) fn binary_instruction(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "add",
        BinaryOp::Sub => "sub",
        BinaryOp::Mul => "mul",
        BinaryOp::Div => "sdiv",
        BinaryOp::Eq => "icmp eq",
        BinaryOp::Ne => "icmp ne",
        BinaryOp::Lt => "icmp slt",
        BinaryOp::Le => "icmp sle",
        BinaryOp::Gt => "icmp sgt",
        BinaryOp::Ge => "icmp sge",
    }
}

impl CodeGenerator {
    /// 二項演算式をコンパイル
    ///
    /// 左辺を副作用も含めて評価してから右辺を評価する。
    /// 比較の結果（`i1`）は`zext`で`i32`に拡張して返す。
    pub fn compile_binary_expr(&mut self, binary: &BinaryExpr) -> UgoResult<ValueRef> {
        let left = self.compile_expression(&binary.left)?;
        let right = self.compile_expression(&binary.right)?;

        let instruction = binary_instruction(binary.op);
        let result = self.fresh_temp();
        self.emit_line(&format!(
            "{} = {} {} {}, {}",
            result,
            instruction,
            IrType::Int,
            left,
            right
        ));

        if !binary.op.is_comparison() {
            return Ok(result);
        }

        let widened = self.fresh_temp();
        self.emit_line(&format!(
            "{} = zext {} {} to {}",
            widened,
            IrType::Bool,
            result,
            IrType::Int
        ));
        Ok(widened)
    }
}
