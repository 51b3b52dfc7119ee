//! 文の定義

use serde::{Deserialize, Serialize};

use super::{Block, Expr, Ident, Span};

/// 文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    VarDecl(VarDecl),
    Assign(AssignStmt),
    For(ForStmt),
    Block(Block),
    Expr(Expr),
}

impl Stmt {
    /// `var name = value` （位置はローカル変数名の修飾に使われる）
    pub fn var(name: &str, value: Option<Expr>, pos: usize) -> Self {
        Stmt::VarDecl(VarDecl {
            name: Ident::new(name),
            value,
            span: Span::new(pos, pos),
        })
    }

    /// `a, b = x, y`
    pub fn assign(targets: Vec<Ident>, values: Vec<Expr>) -> Self {
        Stmt::Assign(AssignStmt {
            targets,
            values,
            op: AssignOp::Assign,
            span: Span::dummy(),
        })
    }

    /// `a, b := x, y`
    pub fn define(targets: Vec<Ident>, values: Vec<Expr>) -> Self {
        Stmt::Assign(AssignStmt {
            targets,
            values,
            op: AssignOp::Define,
            span: Span::dummy(),
        })
    }

    pub fn block(stmts: Vec<Stmt>) -> Self {
        Stmt::Block(Block::new(stmts))
    }

    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr(expr)
    }
}

/// var宣言
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub name: Ident,
    pub value: Option<Expr>,
    /// `span.start`が宣言位置
    pub span: Span,
}

/// 代入演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `:=`
    Define,
}

/// 代入文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignStmt {
    pub targets: Vec<Ident>,
    pub values: Vec<Expr>,
    pub op: AssignOp,
    #[serde(default)]
    pub span: Span,
}

/// for文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
    pub init: Option<Box<Stmt>>,
    pub cond: Option<Expr>,
    pub post: Option<Box<Stmt>>,
    pub body: Box<Stmt>,
    /// `span.start`が`for`キーワードの位置
    pub span: Span,
}

impl ForStmt {
    pub fn new(
        init: Option<Stmt>,
        cond: Option<Expr>,
        post: Option<Stmt>,
        body: Stmt,
        pos: usize,
    ) -> Self {
        Self {
            init: init.map(Box::new),
            cond,
            post: post.map(Box::new),
            body: Box::new(body),
            span: Span::new(pos, pos + 3),
        }
    }
}

impl From<ForStmt> for Stmt {
    fn from(for_stmt: ForStmt) -> Self {
        Stmt::For(for_stmt)
    }
}
