//! メインコード生成器

use serde::{Deserialize, Serialize};

use crate::ast::*;
use crate::error::{CodegenError, SymbolKind, UgoError, UgoResult};

use super::runtime;
use super::symbol_table::{Object, ObjectKind, ScopeManager};
use super::types::{IrType, Label, ValueRef};

/// コード生成の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenOptions {
    /// エントリポイントを持つパッケージの名前
    pub entry_package: String,
    /// エントリポイントから呼ばれる関数の名前
    pub entry_function: String,
    /// 出力に埋め込むターゲットトリプル
    pub target_triple: Option<String>,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            entry_package: "main".to_string(),
            entry_function: "main".to_string(),
            target_triple: None,
        }
    }
}

/// メインコード生成器構造体
///
/// 1回の`compile`につき1つのファイルをIRテキストへ変換する。
/// 一時値とラベルは同じカウンタから採番されるため、出力全体で一意になる。
pub struct CodeGenerator {
    pub options: CodegenOptions,
    pub scope_manager: ScopeManager,

    output: String,
    // 現在の関数のalloca（関数の先頭にまとめて出力する）
    allocas: String,
    next_id: usize,

    // 現在コンパイル中のパッケージ
    package: String,
    // エラーメッセージ用の現在の宣言（`func main`など）
    current_decl: String,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::with_options(CodegenOptions::default())
    }

    pub fn with_options(options: CodegenOptions) -> Self {
        Self {
            options,
            scope_manager: ScopeManager::new(runtime::universe()),
            output: String::new(),
            allocas: String::new(),
            next_id: 0,
            package: String::new(),
            current_decl: String::new(),
        }
    }

    /// ファイル全体をコンパイルしてIRテキストを返す
    ///
    /// エラーが発生した場合、途中まで生成した出力は破棄される。
    pub fn compile(&mut self, file: &File) -> UgoResult<String> {
        self.reset(&file.package.name);
        log::debug!("compiling package {}", file.package.name);

        match self.compile_file(file) {
            Ok(()) => Ok(std::mem::take(&mut self.output)),
            Err(e) => {
                log::debug!("compilation of package {} failed: {}", file.package.name, e);
                self.output.clear();
                Err(e)
            }
        }
    }

    /// これまでに生成された出力
    pub fn output(&self) -> &str {
        &self.output
    }

    fn reset(&mut self, package: &str) {
        self.scope_manager = ScopeManager::new(runtime::universe());
        self.output.clear();
        self.allocas.clear();
        self.next_id = 0;
        self.package = package.to_string();
        self.current_decl = format!("package {}", package);
    }

    fn compile_file(&mut self, file: &File) -> UgoResult<()> {
        let header = runtime::header(&self.package, self.options.target_triple.as_deref());
        self.output.push_str(&header);

        self.scope_manager.push_scope();

        for global in &file.globals {
            let mangled_name = runtime::package_symbol_name(&self.package, &global.name.name);
            log::debug!("declaring global {} as {}", global.name.name, mangled_name);
            self.scope_manager.declare(Object::new(
                &global.name.name,
                mangled_name.clone(),
                ObjectKind::Global,
                global.name.span,
            ));
            self.emit_raw(&format!("{} = global {} 0\n", mangled_name, IrType::Int));
        }
        if !file.globals.is_empty() {
            self.emit_raw("\n");
        }

        for func in &file.funcs {
            self.compile_function(func)?;
        }

        self.compile_init(file)?;

        let has_entry = self.has_entry_function();
        self.scope_manager.pop_scope();

        if has_entry {
            let shim = runtime::entry_shim(&self.package, &self.options.entry_function);
            self.emit_raw(&shim);
        }

        Ok(())
    }

    /// エントリパッケージで、エントリ関数がファイルスコープに関数として束縛されているか
    fn has_entry_function(&self) -> bool {
        self.package == self.options.entry_package
            && self
                .scope_manager
                .lookup_in_current_scope(&self.options.entry_function)
                .is_some_and(|object| object.kind == ObjectKind::Func)
    }

    /// 関数をコンパイル
    fn compile_function(&mut self, func: &FuncDecl) -> UgoResult<()> {
        let mangled_name = runtime::package_symbol_name(&self.package, &func.name);

        // 同じ名前が既にファイルスコープにあれば最初の宣言が優先され、この関数は出力しない
        if let Some(existing) = self.scope_manager.lookup_in_current_scope(&func.name) {
            log::warn!(
                "func {} is already declared as {} {}, skipping",
                func.name,
                existing.kind,
                existing.mangled_name
            );
            return Ok(());
        }

        // 本体より先にファイルスコープへ登録し、再帰呼び出しを解決できるようにする
        self.scope_manager.declare(Object::new(
            &func.name,
            mangled_name.clone(),
            ObjectKind::Func,
            func.span,
        ));

        let Some(body) = &func.body else {
            log::debug!("declaring external func {}", func.name);
            self.emit_raw(&format!("declare {0} {1}({0})\n", IrType::Int, mangled_name));
            return Ok(());
        };

        log::debug!("compiling func {}", func.name);
        self.current_decl = format!("func {}", func.name);
        self.scope_manager.push_scope();

        self.emit_raw(&format!(
            "\ndefine {0} {1}({0} %arg) {{\nentry:\n",
            IrType::Int,
            mangled_name
        ));
        let body_start = self.output.len();
        for stmt in &body.stmts {
            self.compile_statement(stmt)?;
        }
        self.emit_line(&format!("ret {} 0", IrType::Int));
        self.emit_raw("}\n");

        // ローカル変数の格納先はループの中でも1回だけ確保されるよう、entryブロックの先頭に置く
        let allocas = std::mem::take(&mut self.allocas);
        self.output.insert_str(body_start, &allocas);

        self.scope_manager.pop_scope();
        Ok(())
    }

    /// パッケージ初期化関数をコンパイル
    fn compile_init(&mut self, file: &File) -> UgoResult<()> {
        self.current_decl = "package init".to_string();
        self.emit_raw(&format!(
            "\ndefine {} {}() {{\nentry:\n",
            IrType::Int,
            runtime::init_func_name(&self.package)
        ));

        for global in &file.globals {
            self.current_decl = format!("global {}", global.name.name);
            let value = match &global.value {
                Some(expr) => self.compile_expression(expr)?.to_string(),
                None => "0".to_string(),
            };
            let slot = self.resolve(&global.name, SymbolKind::Variable)?;
            self.emit_store(&value, &slot);
        }

        self.emit_line(&format!("ret {} 0", IrType::Int));
        self.emit_raw("}\n");
        Ok(())
    }

    /// 名前を解決してIR上の格納先を返す
    pub(crate) fn resolve(&self, ident: &Ident, kind: SymbolKind) -> UgoResult<String> {
        match self.scope_manager.lookup(&ident.name) {
            Some(object) => {
                log::trace!("resolved {} to {}", ident.name, object.mangled_name);
                Ok(object.mangled_name.clone())
            }
            None => Err(UgoError::Codegen(CodegenError::Undefined {
                name: ident.name.clone(),
                kind,
                decl: self.current_decl.clone(),
                span: ident.span,
            })),
        }
    }

    pub(crate) fn unsupported(&self, construct: String, span: Span) -> UgoError {
        UgoError::Codegen(CodegenError::Unsupported {
            construct,
            decl: self.current_decl.clone(),
            span,
        })
    }

    /// 新しい一時値の名前を生成
    pub(crate) fn fresh_temp(&mut self) -> ValueRef {
        let value = ValueRef::temp(self.next_id);
        self.next_id += 1;
        value
    }

    /// 新しいラベルを生成（一時値と同じカウンタを使う）
    pub(crate) fn fresh_label(&mut self, tag: &str) -> Label {
        let label = Label::new(tag, self.next_id);
        self.next_id += 1;
        log::trace!("new label {}", label);
        label
    }

    /// ローカル変数の格納先の名前
    pub(crate) fn local_slot_name(name: &str, pos: usize) -> String {
        format!("%local_{}.pos.{}", name, pos)
    }

    pub(crate) fn emit_line(&mut self, line: &str) {
        self.output.push('\t');
        self.output.push_str(line);
        self.output.push('\n');
    }

    pub(crate) fn emit_label(&mut self, label: &Label) {
        self.output.push('\n');
        self.output.push_str(label.as_str());
        self.output.push_str(":\n");
    }

    pub(crate) fn emit_raw(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// 格納先の確保は関数の先頭へ回すためにバッファへ積む
    pub(crate) fn emit_alloca(&mut self, slot: &str) {
        self.allocas
            .push_str(&format!("\t{} = alloca {}, align 4\n", slot, IrType::Int));
    }

    pub(crate) fn emit_store(&mut self, value: &str, slot: &str) {
        self.emit_line(&format!("store {} {}, ptr {}", IrType::Int, value, slot));
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
