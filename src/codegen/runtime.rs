//! ランタイム支援コードと組み込み関数

use crate::ast::Span;

use super::symbol_table::{Object, ObjectKind, Scope};

/// 組み込み関数（uGo上の名前、IR上の名前）
pub const BUILTINS: &[(&str, &str)] = &[
    ("println", "@ugo_builtin_println"),
    ("exit", "@ugo_builtin_exit"),
];

const RUNTIME_SUPPORT: &str = r#"declare i32 @printf(ptr, ...)
declare void @exit(i32)

@ugo_builtin_fmt_int = private unnamed_addr constant [4 x i8] c"%d\0A\00"

define i32 @ugo_builtin_println(i32 %x) {
entry:
	%r = call i32 (ptr, ...) @printf(ptr @ugo_builtin_fmt_int, i32 %x)
	ret i32 0
}

define i32 @ugo_builtin_exit(i32 %x) {
entry:
	call void @exit(i32 %x)
	unreachable
}

"#;

/// ファイル先頭に出力する固定テキスト
pub fn header(package: &str, target_triple: Option<&str>) -> String {
    let mut out = format!("; package {}\n", package);
    if let Some(triple) = target_triple {
        out.push_str(&format!("target triple = \"{}\"\n", triple));
    }
    out.push('\n');
    out.push_str(RUNTIME_SUPPORT);
    out
}

/// 組み込み関数だけを持つユニバーススコープを作成
pub fn universe() -> Scope {
    let mut scope = Scope::new();
    for (name, mangled) in BUILTINS {
        scope.declare(Object::new(
            name,
            mangled.to_string(),
            ObjectKind::Builtin,
            Span::dummy(),
        ));
    }
    scope
}

/// パッケージ初期化関数の名前
pub fn init_func_name(package: &str) -> String {
    format!("@ugo_{}.init", package)
}

/// パッケージレベルのシンボル（グローバル変数・関数）の名前
pub fn package_symbol_name(package: &str, name: &str) -> String {
    format!("@ugo_{}_{}", package, name)
}

/// プログラムのエントリポイント
pub fn entry_shim(package: &str, entry_function: &str) -> String {
    format!(
        "\ndefine i32 @main() {{\nentry:\n\tcall i32 {}()\n\tcall i32 {}(i32 0)\n\tret i32 0\n}}\n",
        init_func_name(package),
        package_symbol_name(package, entry_function),
    )
}
