//! シンボルテーブルとスコープ管理

use std::fmt;

use indexmap::IndexMap;

use crate::ast::Span;

/// シンボルの宣言元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// ユニバーススコープの組み込み関数
    Builtin,
    Global,
    Func,
    Local,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectKind::Builtin => "builtin",
            ObjectKind::Global => "global",
            ObjectKind::Func => "func",
            ObjectKind::Local => "local",
        };
        write!(f, "{}", s)
    }
}

/// 名前解決の結果として束縛されるシンボル
///
/// 生成後に変更されることはない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub name: String,
    /// IR上の格納先の名前（`@ugo_main_x`、`%local_x.pos.12`など）
    pub mangled_name: String,
    pub kind: ObjectKind,
    /// 宣言ノードの位置
    pub span: Span,
}

impl Object {
    pub fn new(name: &str, mangled_name: String, kind: ObjectKind, span: Span) -> Self {
        Self {
            name: name.to_string(),
            mangled_name,
            kind,
            span,
        }
    }
}

/// 1段分のスコープ
#[derive(Debug, Default)]
pub struct Scope {
    pub symbols: IndexMap<String, Object>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// このスコープだけからシンボルを検索
    pub fn lookup(&self, name: &str) -> Option<&Object> {
        self.symbols.get(name)
    }

    /// シンボルを定義
    ///
    /// 同名のシンボルが既にある場合は何もせず、既存のものを返す。
    pub fn declare(&mut self, object: Object) -> &Object {
        let index = match self.symbols.get_index_of(&object.name) {
            Some(index) => index,
            None => self.symbols.insert_full(object.name.clone(), object).0,
        };
        &self.symbols[index]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope {{")?;
        if !self.symbols.is_empty() {
            writeln!(f)?;
            for object in self.symbols.values() {
                writeln!(f, "\t{} {}", object.kind, object.name)?;
            }
        }
        writeln!(f, "}}")
    }
}

/// スコープマネージャー
///
/// 現在のスコープからユニバーススコープまでのチェーンをスタックで持つ。
/// 一番下のユニバーススコープは取り除けない。
#[derive(Debug)]
pub struct ScopeManager {
    scopes: Vec<Scope>,
}

impl ScopeManager {
    /// ユニバーススコープだけを持つマネージャーを作成
    pub fn new(universe: Scope) -> Self {
        Self {
            scopes: vec![universe],
        }
    }

    /// 新しいスコープを開始
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
        log::trace!("enter scope (depth {})", self.scopes.len());
    }

    /// 現在のスコープを終了
    pub fn pop_scope(&mut self) -> Option<Scope> {
        if self.scopes.len() > 1 {
            log::trace!("leave scope (depth {})", self.scopes.len());
            self.scopes.pop()
        } else {
            None
        }
    }

    /// 現在のスコープにシンボルを定義
    pub fn declare(&mut self, object: Object) -> &Object {
        log::trace!("declare {} {} as {}", object.kind, object.name, object.mangled_name);
        let top = self.scopes.len() - 1;
        self.scopes[top].declare(object)
    }

    /// 変数を検索（内側のスコープから順に）
    pub fn lookup(&self, name: &str) -> Option<&Object> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup(name))
    }

    /// 現在のスコープから変数を検索
    pub fn lookup_in_current_scope(&self, name: &str) -> Option<&Object> {
        self.scopes.last()?.lookup(name)
    }

    /// ユニバーススコープを含むスコープの深さ
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn current(&self) -> &Scope {
        &self.scopes[self.scopes.len() - 1]
    }
}
