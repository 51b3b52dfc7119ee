//! コンパイラのメイン処理モジュール
//!
//! このモジュールは、JSON形式のASTの読み込みからIRテキストの生成までの
//! パイプラインを管理し、エラーをcodespan-reportingで報告する機能を提供します。

use std::fs;
use std::path::Path;

use crate::ast::File;
use crate::codegen::{CodeGenerator, CodegenOptions};
use crate::error::{DiagnosticError, UgoError, UgoResult};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

/// コンパイル状態を管理する構造体
pub struct CompilationState {
    pub ast_file: String,
    pub ast_json: String,
    /// 診断表示用の元のソースコード
    pub source: Option<String>,
    pub files: SimpleFiles<String, String>,
    pub file_id: Option<usize>,
    errors: Vec<DiagnosticError>,
}

impl CompilationState {
    /// 新しいコンパイル状態を作成
    pub fn new<P: AsRef<Path>>(ast_file: P, source_file: Option<P>) -> UgoResult<Self> {
        let ast_file_str = ast_file.as_ref().display().to_string();
        let ast_json = fs::read_to_string(ast_file.as_ref())
            .map_err(|e| UgoError::Io(format!("Failed to read AST file {}: {}", ast_file_str, e)))?;

        let source = match source_file {
            Some(path) => Some(
                fs::read_to_string(path.as_ref()).map_err(|e| {
                    UgoError::Io(format!(
                        "Failed to read source file {}: {}",
                        path.as_ref().display(),
                        e
                    ))
                })?,
            ),
            None => None,
        };

        Ok(Self::new_from_string(&ast_file_str, ast_json, source))
    }

    /// 文字列からコンパイル状態を作成（テスト用）
    pub fn new_from_string(filename: &str, ast_json: String, source: Option<String>) -> Self {
        let mut files = SimpleFiles::new();
        let file_id = source
            .as_ref()
            .map(|source| files.add(filename.to_string(), source.clone()));

        Self {
            ast_file: filename.to_string(),
            ast_json,
            source,
            files,
            file_id,
            errors: Vec::new(),
        }
    }

    /// エラーを追加
    pub fn add_error(&mut self, error: UgoError) {
        self.errors.push(DiagnosticError::new(error, self.file_id.unwrap_or(0)));
    }

    /// エラーがあるかチェック
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// エラー数を取得
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[DiagnosticError] {
        &self.errors
    }

    /// 診断情報を報告
    ///
    /// 元のソースが無い場合は位置ラベルを付けずにメッセージだけを出す。
    pub fn report_diagnostics(&self) -> UgoResult<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();

        for error in &self.errors {
            let mut diagnostic = error.to_diagnostic();
            if self.file_id.is_none() {
                diagnostic.labels.clear();
            }
            codespan_reporting::term::emit(&mut writer.lock(), &config, &self.files, &diagnostic)
                .map_err(|e| UgoError::Io(format!("Failed to emit diagnostic: {}", e)))?;
        }

        Ok(())
    }
}

/// コンパイルパイプライン
pub struct CompilationPipeline {
    state: CompilationState,
    options: CodegenOptions,
}

impl CompilationPipeline {
    /// 新しいコンパイルパイプラインを作成
    pub fn new(state: CompilationState, options: CodegenOptions) -> Self {
        Self { state, options }
    }

    /// コンパイル状態への参照を取得
    pub fn state(&self) -> &CompilationState {
        &self.state
    }

    /// ASTを読み込む
    pub fn load_ast(&mut self) -> Option<File> {
        log::info!("loading AST from {}", self.state.ast_file);

        match serde_json::from_str::<File>(&self.state.ast_json) {
            Ok(file) => Some(file),
            Err(e) => {
                self.state.add_error(e.into());
                None
            }
        }
    }

    /// コード生成を実行
    pub fn codegen(&mut self, file: &File) -> Option<String> {
        log::info!("generating IR for package {}", file.package.name);

        let mut codegen = CodeGenerator::with_options(self.options.clone());
        match codegen.compile(file) {
            Ok(ir) => Some(ir),
            Err(e) => {
                self.state.add_error(e);
                None
            }
        }
    }

    /// パイプライン全体を実行
    ///
    /// エラーがあった場合は診断を出力して`None`を返す。
    pub fn run(&mut self) -> UgoResult<Option<String>> {
        let ir = match self.load_ast() {
            Some(file) => self.codegen(&file),
            None => None,
        };

        if self.state.has_errors() {
            self.state.report_diagnostics()?;
            return Ok(None);
        }

        Ok(ir)
    }
}
