//! プログラム構造

use serde::{Deserialize, Serialize};

use super::{Expr, Ident, Span, Stmt};

/// ASTのルートノード（1つのパッケージファイルを表す）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub package: PackageDecl,
    pub globals: Vec<GlobalDecl>,
    pub funcs: Vec<FuncDecl>,
    #[serde(default)]
    pub span: Span,
}

impl File {
    pub fn new(package: &str, globals: Vec<GlobalDecl>, funcs: Vec<FuncDecl>) -> Self {
        Self {
            package: PackageDecl {
                name: package.to_string(),
                span: Span::dummy(),
            },
            globals,
            funcs,
            span: Span::dummy(),
        }
    }
}

/// パッケージ宣言
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDecl {
    pub name: String,
    #[serde(default)]
    pub span: Span,
}

/// グローバル変数宣言
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalDecl {
    pub name: Ident,
    pub value: Option<Expr>,
    #[serde(default)]
    pub span: Span,
}

impl GlobalDecl {
    pub fn new(name: &str, value: Option<Expr>) -> Self {
        Self {
            name: Ident::new(name),
            value,
            span: Span::dummy(),
        }
    }
}

/// 関数宣言
///
/// `body`が`None`の場合は外部で定義された関数の前方宣言になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    pub body: Option<Block>,
    #[serde(default)]
    pub span: Span,
}

impl FuncDecl {
    pub fn new(name: &str, body: Vec<Stmt>) -> Self {
        Self {
            name: name.to_string(),
            body: Some(Block::new(body)),
            span: Span::dummy(),
        }
    }

    pub fn external(name: &str) -> Self {
        Self {
            name: name.to_string(),
            body: None,
            span: Span::dummy(),
        }
    }
}

/// ブロック
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    #[serde(default)]
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self {
            stmts,
            span: Span::dummy(),
        }
    }
}
