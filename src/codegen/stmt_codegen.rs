//! 文のコード生成

use crate::ast::*;
use crate::error::{SymbolKind, UgoResult};

use super::code_generator::CodeGenerator;
use super::symbol_table::{Object, ObjectKind};
use super::types::IrType;

impl CodeGenerator {
    /// 文をコンパイル
    pub fn compile_statement(&mut self, stmt: &Stmt) -> UgoResult<()> {
        match stmt {
            Stmt::VarDecl(var) => self.compile_var_decl(var),
            Stmt::Assign(assign) => self.compile_assignment(assign),
            Stmt::For(for_stmt) => self.compile_for_statement(for_stmt),
            Stmt::Block(block) => self.compile_block(block),
            Stmt::Expr(expr) => {
                self.compile_expression(expr)?;
                Ok(())
            }
        }
    }

    /// ブロックをコンパイル
    pub fn compile_block(&mut self, block: &Block) -> UgoResult<()> {
        self.scope_manager.push_scope();
        for stmt in &block.stmts {
            self.compile_statement(stmt)?;
        }
        self.scope_manager.pop_scope();
        Ok(())
    }

    /// var宣言をコンパイル
    pub fn compile_var_decl(&mut self, var: &VarDecl) -> UgoResult<()> {
        let value = match &var.value {
            Some(expr) => self.compile_expression(expr)?.to_string(),
            None => "0".to_string(),
        };

        let slot = Self::local_slot_name(&var.name.name, var.span.pos());
        self.scope_manager.declare(Object::new(
            &var.name.name,
            slot.clone(),
            ObjectKind::Local,
            var.span,
        ));

        self.emit_alloca(&slot);
        self.emit_store(&value, &slot);
        Ok(())
    }

    /// 代入文をコンパイル
    ///
    /// `:=`は見えるスコープのどこにも無い名前だけを現在のスコープに宣言する。
    /// 外側で既に宣言されている名前は隠さずにその変数へ再代入する。
    pub fn compile_assignment(&mut self, assign: &AssignStmt) -> UgoResult<()> {
        if assign.targets.len() != assign.values.len() {
            return Err(self.unsupported(
                format!(
                    "左辺{}個と右辺{}個の代入",
                    assign.targets.len(),
                    assign.values.len()
                ),
                assign.span,
            ));
        }

        if assign.op == AssignOp::Define {
            for target in &assign.targets {
                if self.scope_manager.lookup(&target.name).is_none() {
                    let slot = Self::local_slot_name(&target.name, target.span.pos());
                    self.scope_manager.declare(Object::new(
                        &target.name,
                        slot.clone(),
                        ObjectKind::Local,
                        target.span,
                    ));
                    self.emit_alloca(&slot);
                }
            }
        }

        // すべての右辺を評価してから格納する
        let values = assign
            .values
            .iter()
            .map(|value| self.compile_expression(value))
            .collect::<UgoResult<Vec<_>>>()?;

        for (target, value) in assign.targets.iter().zip(values) {
            let slot = self.resolve(target, SymbolKind::Variable)?;
            self.emit_store(value.as_str(), &slot);
        }
        Ok(())
    }

    /// for文をコンパイル
    ///
    /// `init -> cond -> {body -> cond}* -> end`の4つの基本ブロックに展開する。
    pub fn compile_for_statement(&mut self, for_stmt: &ForStmt) -> UgoResult<()> {
        // init/cond/post用のスコープ
        self.scope_manager.push_scope();

        let pos = for_stmt.span.pos();
        let init_label = self.fresh_label(&format!("for.init.pos{}", pos));
        let cond_label = self.fresh_label(&format!("for.cond.pos{}", pos));
        let body_label = self.fresh_label(&format!("for.body.pos{}", pos));
        let end_label = self.fresh_label(&format!("for.end.pos{}", pos));

        // 直前のブロックを終端させる
        self.emit_line(&format!("br label %{}", init_label));

        self.emit_label(&init_label);
        if let Some(init) = &for_stmt.init {
            self.compile_statement(init)?;
        }
        self.emit_line(&format!("br label %{}", cond_label));

        self.emit_label(&cond_label);
        match &for_stmt.cond {
            Some(cond) => {
                let flag = self.compile_condition(cond)?;
                self.emit_line(&format!(
                    "br {} {}, label %{}, label %{}",
                    IrType::Bool,
                    flag,
                    body_label,
                    end_label
                ));
            }
            // 条件がない場合は無限ループ
            None => self.emit_line(&format!("br label %{}", body_label)),
        }

        self.emit_label(&body_label);
        self.scope_manager.push_scope();
        self.compile_statement(&for_stmt.body)?;
        self.scope_manager.pop_scope();

        if let Some(post) = &for_stmt.post {
            self.compile_statement(post)?;
        }
        self.emit_line(&format!("br label %{}", cond_label));

        self.emit_label(&end_label);

        self.scope_manager.pop_scope();
        Ok(())
    }
}
