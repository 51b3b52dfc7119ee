//! 変数宣言と代入のコード生成テスト

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_var_decl_then_assign() {
    // var x = 1 + 2
    // x = x * 3
    let file = main_with(vec![
        Stmt::var(
            "x",
            Some(Expr::binary(BinaryOp::Add, Expr::number(1), Expr::number(2))),
            10,
        ),
        Stmt::assign(
            vec![Ident::new("x")],
            vec![Expr::binary(BinaryOp::Mul, Expr::ident("x"), Expr::number(3))],
        ),
    ]);
    let ir = assert_compile_success(&file);

    let expected = "\
\t%local_x.pos.10 = alloca i32, align 4
\t%t0 = add i32 0, 1
\t%t1 = add i32 0, 2
\t%t2 = add i32 %t0, %t1
\tstore i32 %t2, ptr %local_x.pos.10
\t%t3 = load i32, ptr %local_x.pos.10, align 4
\t%t4 = add i32 0, 3
\t%t5 = mul i32 %t3, %t4
\tstore i32 %t5, ptr %local_x.pos.10
\tret i32 0
";
    assert_eq!(function_body(&ir, "@ugo_main_main"), expected);
}

#[test]
fn test_var_without_value_stores_zero() {
    let ir = assert_compile_success(&main_with(vec![Stmt::var("n", None, 4)]));
    assert_eq!(
        function_body(&ir, "@ugo_main_main"),
        "\t%local_n.pos.4 = alloca i32, align 4\n\tstore i32 0, ptr %local_n.pos.4\n\tret i32 0\n"
    );
}

#[test]
fn test_define_allocates_before_evaluating() {
    let file = main_with(vec![Stmt::define(
        vec![Ident::at("y", 20)],
        vec![Expr::number(3)],
    )]);
    let ir = assert_compile_success(&file);

    let expected = "\
\t%local_y.pos.20 = alloca i32, align 4
\t%t0 = add i32 0, 3
\tstore i32 %t0, ptr %local_y.pos.20
\tret i32 0
";
    assert_eq!(function_body(&ir, "@ugo_main_main"), expected);
}

#[test]
fn test_define_rebinds_outer_variable() {
    // var x = 1
    // { x := 7 }
    let file = main_with(vec![
        Stmt::var("x", Some(Expr::number(1)), 5),
        Stmt::block(vec![Stmt::define(
            vec![Ident::at("x", 30)],
            vec![Expr::number(7)],
        )]),
    ]);
    let ir = assert_compile_success(&file);

    assert_eq!(alloca_count(&ir, "%local_x"), 1);
    assert!(ir.contains("\t%t1 = add i32 0, 7\n\tstore i32 %t1, ptr %local_x.pos.5\n"));
    assert!(!ir.contains("%local_x.pos.30"));
}

#[test]
fn test_define_declares_only_new_names() {
    // var a = 1
    // a, b := 2, 3
    let file = main_with(vec![
        Stmt::var("a", Some(Expr::number(1)), 1),
        Stmt::define(
            vec![Ident::at("a", 12), Ident::at("b", 15)],
            vec![Expr::number(2), Expr::number(3)],
        ),
    ]);
    let ir = assert_compile_success(&file);

    assert_eq!(alloca_count(&ir, "%local_a"), 1);
    assert_eq!(alloca_count(&ir, "%local_b"), 1);
    assert!(ir.contains("\tstore i32 %t1, ptr %local_a.pos.1\n\tstore i32 %t2, ptr %local_b.pos.15\n"));
}

#[test]
fn test_swap_evaluates_all_values_before_storing() {
    // a, b = b, a
    let file = main_with(vec![
        Stmt::var("a", Some(Expr::number(1)), 1),
        Stmt::var("b", Some(Expr::number(2)), 2),
        Stmt::assign(
            vec![Ident::new("a"), Ident::new("b")],
            vec![Expr::ident("b"), Expr::ident("a")],
        ),
    ]);
    let ir = assert_compile_success(&file);

    let expected_tail = "\
\t%t2 = load i32, ptr %local_b.pos.2, align 4
\t%t3 = load i32, ptr %local_a.pos.1, align 4
\tstore i32 %t2, ptr %local_a.pos.1
\tstore i32 %t3, ptr %local_b.pos.2
\tret i32 0
";
    assert!(function_body(&ir, "@ugo_main_main").ends_with(expected_tail));
}

#[test]
fn test_inner_var_shadows_outer_until_block_ends() {
    // var x = 1
    // { var x = 2; x = 3 }
    // x = 4
    let file = main_with(vec![
        Stmt::var("x", Some(Expr::number(1)), 1),
        Stmt::block(vec![
            Stmt::var("x", Some(Expr::number(2)), 8),
            Stmt::assign(vec![Ident::new("x")], vec![Expr::number(3)]),
        ]),
        Stmt::assign(vec![Ident::new("x")], vec![Expr::number(4)]),
    ]);
    let ir = assert_compile_success(&file);

    assert!(ir.contains("\t%t2 = add i32 0, 3\n\tstore i32 %t2, ptr %local_x.pos.8\n"));
    assert!(ir.contains("\t%t3 = add i32 0, 4\n\tstore i32 %t3, ptr %local_x.pos.1\n"));
}

#[test]
fn test_var_initializer_sees_outer_binding() {
    // var x = 1
    // { var x = x + 1 }
    let file = main_with(vec![
        Stmt::var("x", Some(Expr::number(1)), 1),
        Stmt::block(vec![Stmt::var(
            "x",
            Some(Expr::binary(BinaryOp::Add, Expr::ident("x"), Expr::number(1))),
            9,
        )]),
    ]);
    let ir = assert_compile_success(&file);
    assert!(ir.contains("\t%t1 = load i32, ptr %local_x.pos.1, align 4\n"));
}

#[test]
fn test_redeclaration_in_same_scope_keeps_first_binding() {
    let file = main_with(vec![
        Stmt::var("x", None, 1),
        Stmt::var("x", None, 9),
        Stmt::assign(vec![Ident::new("x")], vec![Expr::number(5)]),
    ]);
    let ir = assert_compile_success(&file);

    assert_eq!(alloca_count(&ir, "%local_x"), 2);
    assert!(ir.contains("\tstore i32 %t0, ptr %local_x.pos.1\n"));
}

#[test]
fn test_define_in_block_is_not_visible_after_it() {
    let file = main_with(vec![
        Stmt::block(vec![Stmt::define(
            vec![Ident::at("z", 3)],
            vec![Expr::number(1)],
        )]),
        Stmt::expr(Expr::ident("z")),
    ]);
    let err = expect_codegen_error(&file);
    assert!(matches!(err, CodegenError::Undefined { ref name, .. } if name == "z"));
}

#[test]
fn test_assign_to_global() {
    let file = File::new(
        "main",
        vec![GlobalDecl::new("g", None)],
        vec![FuncDecl::new(
            "main",
            vec![Stmt::assign(vec![Ident::new("g")], vec![Expr::number(2)])],
        )],
    );
    let ir = assert_compile_success(&file);
    assert_eq!(
        function_body(&ir, "@ugo_main_main"),
        "\t%t0 = add i32 0, 2\n\tstore i32 %t0, ptr @ugo_main_g\n\tret i32 0\n"
    );
}
