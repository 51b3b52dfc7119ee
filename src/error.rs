//! 統一的なエラーハンドリングモジュール
//!
//! このモジュールは、uGoコンパイラ全体で使用されるエラー型と
//! codespan-reportingへの変換を提供します。

use std::fmt;

use crate::ast::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

/// uGoコンパイラの統一エラー型
#[derive(Error, Debug, Clone)]
pub enum UgoError {
    /// コード生成エラー
    #[error("コード生成エラー: {0}")]
    Codegen(#[from] CodegenError),

    /// AST入力の読み込みエラー
    #[error("AST読み込みエラー: {0}")]
    Ast(String),

    /// ファイルI/Oエラー
    #[error("ファイル操作エラー: {0}")]
    Io(String),
}

/// 未解決シンボルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Variable => write!(f, "変数"),
            SymbolKind::Function => write!(f, "関数"),
        }
    }
}

/// コード生成エラーの詳細
///
/// どのエラーもコンパイル全体を中断させる。`decl`は
/// エラーが発生した宣言（`func main`、`global x`、`package init`）。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    #[error("未定義の{kind}: {name} ({decl})")]
    Undefined {
        name: String,
        kind: SymbolKind,
        decl: String,
        span: Span,
    },

    #[error("未対応の構文: {construct} ({decl})")]
    Unsupported {
        construct: String,
        decl: String,
        span: Span,
    },
}

impl CodegenError {
    pub fn span(&self) -> Span {
        match self {
            CodegenError::Undefined { span, .. } | CodegenError::Unsupported { span, .. } => *span,
        }
    }
}

/// エラー情報とソースコードの位置情報を含むエラー
#[derive(Debug, Clone)]
pub struct DiagnosticError {
    pub error: UgoError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: UgoError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let (message, labels) = match &self.error {
            UgoError::Codegen(e) => match e {
                CodegenError::Undefined { name, kind, decl, span } => (
                    format!("未定義の{}: {}", kind, name),
                    vec![Label::primary(self.file_id, span.start..span.end)
                        .with_message(format!("{} の中で参照されています", decl))],
                ),
                CodegenError::Unsupported { construct, decl, span } => (
                    format!("未対応の構文: {}", construct),
                    vec![Label::primary(self.file_id, span.start..span.end)
                        .with_message(format!("{} の中にあります", decl))],
                ),
            },
            UgoError::Ast(message) => (format!("AST読み込みエラー: {}", message), vec![]),
            UgoError::Io(message) => (format!("ファイル操作エラー: {}", message), vec![]),
        };

        Diagnostic::error()
            .with_message(message)
            .with_labels(labels)
    }
}

/// Result型のエイリアス
pub type UgoResult<T> = Result<T, UgoError>;

impl From<serde_json::Error> for UgoError {
    fn from(e: serde_json::Error) -> Self {
        UgoError::Ast(e.to_string())
    }
}
