use pretty_assertions::assert_eq;
use rstest::rstest;
use tern::{
    ast::{BinaryOperator, Block, Expr, LiteralValue, Statement},
    error::ParseError,
    interpreter::value::kind::ValueKind,
    parse, tokenize,
};

fn parse_src(src: &str) -> Result<Vec<Statement>, ParseError> {
    let tokens = tokenize(src).unwrap_or_else(|e| panic!("Tokenizing {src:?} failed: {e}"));
    parse(&tokens)
}

fn expression(src: &str) -> Expr {
    match parse_src(src).unwrap_or_else(|e| panic!("Parsing {src:?} failed: {e}")).as_slice() {
        [Statement::Expression { expr, .. }] => expr.clone(),
        other => panic!("Expected a single expression statement, got {other:?}"),
    }
}

fn int(n: i64) -> Expr {
    Expr::Literal { value: LiteralValue::Integer(n),
                    line:  1, }
}

fn string(s: &str) -> Expr {
    Expr::Literal { value: LiteralValue::String(s.to_string()),
                    line:  1, }
}

fn var(name: &str) -> Expr {
    Expr::Variable { name: name.to_string(),
                     line: 1, }
}

fn bin(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::BinaryOp { left: Box::new(left),
                     op,
                     right: Box::new(right),
                     line: 1 }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(expression("1 + 2 * 3;"),
               bin(int(1), BinaryOperator::Add, bin(int(2), BinaryOperator::Mul, int(3))));
}

#[test]
fn parentheses_override_precedence() {
    assert_eq!(expression("(1 + 2) * 3;"),
               bin(bin(int(1), BinaryOperator::Add, int(2)), BinaryOperator::Mul, int(3)));
}

#[test]
fn shift_binds_looser_than_addition() {
    assert_eq!(expression("2 << 1 + 1;"),
               bin(int(2), BinaryOperator::ShiftLeft, bin(int(1), BinaryOperator::Add, int(1))));
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(expression("a - b - c;"),
               bin(bin(var("a"), BinaryOperator::Sub, var("b")), BinaryOperator::Sub, var("c")));
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(expression("a = b = 1;"),
               bin(var("a"), BinaryOperator::Assign, bin(var("b"), BinaryOperator::Assign, int(1))));
}

#[test]
fn cast_binds_tighter_than_multiplication() {
    let cast = Expr::Cast { expr:   Box::new(var("b")),
                            target: Box::new(Expr::Literal { value: LiteralValue::Type(ValueKind::String),
                                                             line:  1, }),
                            line:   1, };
    assert_eq!(expression("a * b as string;"), bin(var("a"), BinaryOperator::Mul, cast));
}

#[test]
fn postfix_operations_fold_left() {
    let dot = Expr::Dot { object: Box::new(var("a")),
                          name:   "b".to_string(),
                          line:   1, };
    let call = Expr::Call { callee:    Box::new(dot),
                            arguments: vec![var("c"), int(2)],
                            line:      1, };
    let subscript = Expr::Subscript { object: Box::new(call),
                                      index:  Box::new(var("d")),
                                      line:   1, };
    assert_eq!(expression("a.b(c, 2,)[d];"), subscript);
}

#[test]
fn block_value_is_the_trailing_expression() {
    let let_x = Statement::Let { name:  "x".to_string(),
                                 value: Some(int(1)),
                                 line:  1, };
    let sum = bin(var("x"), BinaryOperator::Add, int(1));

    assert_eq!(expression("{ let x = 1; x + 1 }"),
               Expr::Block(Block { statements: vec![let_x.clone()],
                                   value:      Some(Box::new(sum.clone())),
                                   line:       1, }));

    assert_eq!(expression("{ let x = 1; x + 1; }"),
               Expr::Block(Block { statements: vec![let_x,
                                                    Statement::Expression { expr: sum,
                                                                            line: 1, }],
                                   value:      None,
                                   line:       1, }));
}

#[test]
fn table_literal_keys() {
    let expected = Expr::TableLiteral { entries: vec![(string("x"), int(1)),
                                                      (string("y"), int(2)),
                                                      (var("z"), int(3))],
                                        line:    1, };
    assert_eq!(expression("table{ x: 1, 'y': 2, (z): 3 };"), expected);
}

#[test]
fn bare_table_is_a_type_literal() {
    assert_eq!(expression("table;"),
               Expr::Literal { value: LiteralValue::Type(ValueKind::Table),
                               line:  1, });
}

#[test]
fn else_if_nests_in_the_else_block() {
    let Expr::IfExpr { else_branch: Some(else_branch), .. } =
        expression("if a { 1 } else if b { 2 } else { 3 }")
    else {
        panic!("Expected an if expression");
    };
    assert!(else_branch.statements.is_empty());
    assert!(matches!(else_branch.value.as_deref(), Some(Expr::IfExpr { else_branch: Some(_), .. })));
}

#[test]
fn statements_keep_their_lines() {
    let statements = parse_src("let a = 1;\n\nwhile a < 3 {\n  a += 1;\n}\nreturn;").unwrap();
    let lines: Vec<usize> = statements.iter()
                                      .map(|statement| match statement {
                                          Statement::Let { line, .. }
                                          | Statement::While { line, .. }
                                          | Statement::Return { line, .. } => *line,
                                          other => panic!("Unexpected statement {other:?}"),
                                      })
                                      .collect();
    assert_eq!(lines, vec![1, 3, 6]);
}

#[test]
fn named_functions_are_declarations() {
    let statements = parse_src("function square(x) { x * x } square(2);").unwrap();
    assert_eq!(statements.len(), 2);
    let Statement::Function(def) = &statements[0] else {
        panic!("Expected a function declaration");
    };
    assert_eq!(def.name.as_deref(), Some("square"));
    assert_eq!(def.params, vec!["x".to_string()]);
}

#[test]
fn for_loop_forms() {
    let statements = parse_src("for let i in 0..10 {} for t[k] in 3..1 {}").unwrap();
    let [Statement::For(first), Statement::For(second)] = statements.as_slice() else {
        panic!("Expected two for loops");
    };
    assert!(first.declare);
    assert_eq!(first.target, var("i"));
    assert!(!second.declare);
    assert!(matches!(second.target, Expr::Subscript { .. }));
}

#[rstest]
#[case("let x = 1")]
#[case("x + 1")]
#[case("{ let y = 2;")]
#[case("f(1, 2")]
fn unfinished_input_reports_the_last_line(#[case] src: &str) {
    assert_eq!(parse_src(src), Err(ParseError::UnexpectedEndOfInput { line: 1 }));
}

#[rstest]
#[case("1 < 2 < 3;")]
#[case("a == b == c;")]
#[case("let 1 = 2;")]
#[case("x = 1 y = 2;")]
#[case("return 1")]
fn malformed_statements(#[case] src: &str) {
    assert!(parse_src(src).is_err(), "{src:?} should not parse");
}

#[test]
fn anonymous_function_statement_is_rejected() {
    assert_eq!(parse_src("function(x) { x };"),
               Err(ParseError::AnonymousFunctionStatement { line: 1 }));
}

#[rstest]
#[case("for 1 in 0..3 {}")]
#[case("for f() in 0..3 {}")]
#[case("for let a.b in 0..3 {}")]
fn invalid_loop_targets(#[case] src: &str) {
    assert_eq!(parse_src(src), Err(ParseError::InvalidLoopTarget { line: 1 }));
}

#[test]
fn unexpected_token_names_the_line() {
    let error = parse_src("let a = 1;\nlet b = );").unwrap_err();
    assert!(matches!(error, ParseError::UnexpectedToken { line: 2, .. }));
    assert!(error.to_string().starts_with("Error on line 2:"));
}
