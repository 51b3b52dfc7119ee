//! 関数呼び出しのコード生成

use crate::ast::*;
use crate::error::{SymbolKind, UgoResult};

use crate::codegen::code_generator::CodeGenerator;
use crate::codegen::types::{IrType, ValueRef};

impl CodeGenerator {
    /// 関数呼び出し式をコンパイル
    ///
    /// 引数はちょうど1つでなければならない。
    pub fn compile_call_expr(&mut self, call: &CallExpr) -> UgoResult<ValueRef> {
        let callee = self.resolve(&call.callee, SymbolKind::Function)?;

        let [arg] = call.args.as_slice() else {
            return Err(self.unsupported(
                format!("{}引数の関数呼び出し {}", call.args.len(), call.callee.name),
                call.span,
            ));
        };

        let arg = self.compile_expression(arg)?;
        let result = self.fresh_temp();
        self.emit_line(&format!(
            "{0} = call {1} {2}({1} {3})",
            result,
            IrType::Int,
            callee,
            arg
        ));
        Ok(result)
    }
}
