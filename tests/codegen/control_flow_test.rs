//! for文のコード生成テスト

use super::*;
use pretty_assertions::assert_eq;

fn counting_loop(pos: usize, body: Vec<Stmt>) -> Stmt {
    // for i := 0; i < 3; i = i + 1 { ... }
    ForStmt::new(
        Some(Stmt::define(vec![Ident::at("i", pos + 4)], vec![Expr::number(0)])),
        Some(Expr::binary(BinaryOp::Lt, Expr::ident("i"), Expr::number(3))),
        Some(Stmt::assign(
            vec![Ident::new("i")],
            vec![Expr::binary(BinaryOp::Add, Expr::ident("i"), Expr::number(1))],
        )),
        Stmt::block(body),
        pos,
    )
    .into()
}

#[test]
fn test_loop_without_init_or_condition() {
    let file = main_with(vec![ForStmt::new(
        None,
        None,
        None,
        Stmt::block(vec![Stmt::expr(Expr::number(1))]),
        20,
    )
    .into()]);
    let ir = assert_compile_success(&file);

    let expected = "\
\tbr label %for.init.pos20.0

for.init.pos20.0:
\tbr label %for.cond.pos20.1

for.cond.pos20.1:
\tbr label %for.body.pos20.2

for.body.pos20.2:
\t%t4 = add i32 0, 1
\tbr label %for.cond.pos20.1

for.end.pos20.3:
\tret i32 0
";
    assert_eq!(function_body(&ir, "@ugo_main_main"), expected);
}

#[test]
fn test_counting_loop() {
    let file = main_with(vec![counting_loop(
        30,
        vec![Stmt::expr(Expr::call("println", Expr::ident("i")))],
    )]);
    let ir = assert_compile_success(&file);

    let expected = "\
\t%local_i.pos.34 = alloca i32, align 4
\tbr label %for.init.pos30.0

for.init.pos30.0:
\t%t4 = add i32 0, 0
\tstore i32 %t4, ptr %local_i.pos.34
\tbr label %for.cond.pos30.1

for.cond.pos30.1:
\t%t5 = load i32, ptr %local_i.pos.34, align 4
\t%t6 = add i32 0, 3
\t%t7 = icmp slt i32 %t5, %t6
\t%t8 = zext i1 %t7 to i32
\t%t9 = icmp ne i32 %t8, 0
\tbr i1 %t9, label %for.body.pos30.2, label %for.end.pos30.3

for.body.pos30.2:
\t%t10 = load i32, ptr %local_i.pos.34, align 4
\t%t11 = call i32 @ugo_builtin_println(i32 %t10)
\t%t12 = load i32, ptr %local_i.pos.34, align 4
\t%t13 = add i32 0, 1
\t%t14 = add i32 %t12, %t13
\tstore i32 %t14, ptr %local_i.pos.34
\tbr label %for.cond.pos30.1

for.end.pos30.3:
\tret i32 0
";
    assert_eq!(function_body(&ir, "@ugo_main_main"), expected);
}

#[test]
fn test_integer_condition_is_compared_with_zero() {
    let file = File::new(
        "main",
        vec![GlobalDecl::new("running", Some(Expr::number(1)))],
        vec![FuncDecl::new(
            "main",
            vec![ForStmt::new(None, Some(Expr::ident("running")), None, Stmt::block(vec![]), 0)
                .into()],
        )],
    );
    let ir = assert_compile_success(&file);

    assert!(ir.contains(
        "\t%t4 = load i32, ptr @ugo_main_running, align 4\n\t%t5 = icmp ne i32 %t4, 0\n\tbr i1 %t5, label %for.body.pos0.2, label %for.end.pos0.3\n"
    ));
}

#[test]
fn test_nested_loops_get_distinct_labels() {
    let inner = counting_loop(50, vec![]);
    let file = main_with(vec![ForStmt::new(None, None, None, Stmt::block(vec![inner]), 40).into()]);
    let ir = assert_compile_success(&file);

    for label in [
        "for.init.pos40.0:",
        "for.cond.pos40.1:",
        "for.body.pos40.2:",
        "for.end.pos40.3:",
        "for.init.pos50.4:",
        "for.cond.pos50.5:",
        "for.body.pos50.6:",
        "for.end.pos50.7:",
    ] {
        assert!(ir.contains(label), "missing {} in:\n{}", label, ir);
    }

    // 内側のループの終了ブロックから外側の条件へ戻る
    assert!(ir.contains("for.end.pos50.7:\n\tbr label %for.cond.pos40.1\n"));
}

#[test]
fn test_same_position_loops_do_not_collide() {
    let file = main_with(vec![
        ForStmt::new(None, None, None, Stmt::block(vec![]), 7).into(),
        ForStmt::new(None, None, None, Stmt::block(vec![]), 7).into(),
    ]);
    let ir = assert_compile_success(&file);
    assert!(ir.contains("for.init.pos7.0:"));
    assert!(ir.contains("for.init.pos7.4:"));
}

#[test]
fn test_post_statement_runs_after_body() {
    let file = main_with(vec![counting_loop(
        0,
        vec![Stmt::expr(Expr::call("println", Expr::number(9)))],
    )]);
    let ir = assert_compile_success(&file);

    let body = function_body(&ir, "@ugo_main_main");
    let call = body.find("@ugo_builtin_println").unwrap();
    let post_store = body.rfind("store i32 %t").unwrap();
    let back_edge = body.rfind("br label %for.cond.pos0.1").unwrap();
    assert!(call < post_store && post_store < back_edge);
}

#[test]
fn test_loop_variable_is_scoped_to_loop() {
    let file = main_with(vec![
        counting_loop(0, vec![]),
        Stmt::expr(Expr::ident("i")),
    ]);
    let err = expect_codegen_error(&file);
    assert!(matches!(err, CodegenError::Undefined { ref name, .. } if name == "i"));
}

#[test]
fn test_body_locals_are_scoped_to_body() {
    let file = main_with(vec![ForStmt::new(
        None,
        None,
        Some(Stmt::expr(Expr::ident("tmp"))),
        Stmt::block(vec![Stmt::var("tmp", None, 12)]),
        0,
    )
    .into()]);
    let err = expect_codegen_error(&file);
    assert!(matches!(err, CodegenError::Undefined { ref name, .. } if name == "tmp"));
}

#[test]
fn test_loop_locals_are_allocated_in_entry_block() {
    // for i := 0; i < 3; i = i + 1 { var t = i; u := t }
    let file = main_with(vec![counting_loop(
        30,
        vec![
            Stmt::var("t", Some(Expr::ident("i")), 36),
            Stmt::define(vec![Ident::at("u", 46)], vec![Expr::ident("t")]),
        ],
    )]);
    let ir = assert_compile_success(&file);

    let body = function_body(&ir, "@ugo_main_main");
    let first_label = body.find("\nfor.").unwrap();
    assert!(
        !body[first_label..].contains("alloca"),
        "alloca after the first label:\n{}",
        body
    );
    assert!(body.starts_with(
        "\t%local_i.pos.34 = alloca i32, align 4\n\t%local_t.pos.36 = alloca i32, align 4\n\t%local_u.pos.46 = alloca i32, align 4\n\tbr label %for.init.pos30.0\n"
    ));
    assert_eq!(alloca_count(body, "%local_"), 3);
    assert!(body.contains("\tstore i32 %t10, ptr %local_t.pos.36\n"));
}

#[test]
fn test_allocas_stay_in_their_own_function() {
    let file = File::new(
        "main",
        vec![],
        vec![
            FuncDecl::new("first", vec![Stmt::var("a", None, 3)]),
            FuncDecl::new(
                "second",
                vec![ForStmt::new(None, None, None, Stmt::block(vec![Stmt::var("b", None, 30)]), 20)
                    .into()],
            ),
        ],
    );
    let ir = assert_compile_success(&file);

    assert_eq!(
        function_body(&ir, "@ugo_main_first"),
        "\t%local_a.pos.3 = alloca i32, align 4\n\tstore i32 0, ptr %local_a.pos.3\n\tret i32 0\n"
    );
    assert!(function_body(&ir, "@ugo_main_second")
        .starts_with("\t%local_b.pos.30 = alloca i32, align 4\n\tbr label %for.init.pos20.0\n"));
}
