use std::rc::Rc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tern::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::value::{core::Value, function::Function, kind::ValueKind, table::Table},
};

fn table(entries: &[(Value, Value)]) -> Value {
    let mut table = Table::new();
    for (key, value) in entries {
        table.insert(key, value, 1).unwrap();
    }
    Value::from(table)
}

#[rstest]
#[case(Value::Integer(7), BinaryOperator::Add, Value::Integer(2), Value::Integer(9))]
#[case(Value::Integer(7), BinaryOperator::Sub, Value::Real(0.5), Value::Real(6.5))]
#[case(Value::Integer(7), BinaryOperator::Mul, Value::Integer(-2), Value::Integer(-14))]
#[case(Value::Integer(6), BinaryOperator::Div, Value::Integer(3), Value::Real(2.0))]
#[case(Value::Integer(-7), BinaryOperator::FloorDiv, Value::Integer(2), Value::Integer(-4))]
#[case(Value::Integer(7), BinaryOperator::FloorDiv, Value::Integer(-2), Value::Integer(-4))]
#[case(Value::Real(7.5), BinaryOperator::FloorDiv, Value::Integer(2), Value::Real(3.0))]
#[case(Value::Integer(-7), BinaryOperator::Mod, Value::Integer(3), Value::Integer(2))]
#[case(Value::Integer(7), BinaryOperator::Mod, Value::Integer(-3), Value::Integer(-2))]
#[case(Value::Real(-1.5), BinaryOperator::Mod, Value::Integer(1), Value::Real(0.5))]
#[case(Value::Integer(1), BinaryOperator::ShiftLeft, Value::Integer(4), Value::Integer(16))]
#[case(Value::Integer(-16), BinaryOperator::ShiftRight, Value::Integer(2), Value::Integer(-4))]
#[case(Value::Integer(5), BinaryOperator::ShiftRight, Value::Integer(100), Value::Integer(0))]
#[case(Value::Integer(0), BinaryOperator::ShiftLeft, Value::Integer(1000), Value::Integer(0))]
#[case(Value::from("ab"), BinaryOperator::Add, Value::from("cd"), Value::from("abcd"))]
fn arithmetic(#[case] lhs: Value, #[case] op: BinaryOperator, #[case] rhs: Value, #[case] expected: Value) {
    let result = lhs.binary_op(op, &rhs, 1).unwrap();
    assert_eq!(result.kind(), expected.kind());
    assert_eq!(result, expected);
    assert_eq!(matches!(result, Value::Real(_)), matches!(expected, Value::Real(_)));
}

#[rstest]
#[case(Value::Integer(1), BinaryOperator::Div, Value::Integer(0))]
#[case(Value::Real(1.0), BinaryOperator::FloorDiv, Value::Real(0.0))]
#[case(Value::Integer(1), BinaryOperator::Mod, Value::Integer(0))]
fn division_by_zero(#[case] lhs: Value, #[case] op: BinaryOperator, #[case] rhs: Value) {
    assert_eq!(lhs.binary_op(op, &rhs, 3), Err(RuntimeError::DivisionByZero { line: 3 }));
}

#[rstest]
#[case(Value::Integer(i64::MAX), BinaryOperator::Add, Value::Integer(1))]
#[case(Value::Integer(i64::MIN), BinaryOperator::Sub, Value::Integer(1))]
#[case(Value::Integer(i64::MAX), BinaryOperator::Mul, Value::Integer(2))]
#[case(Value::Integer(1), BinaryOperator::ShiftLeft, Value::Integer(64))]
#[case(Value::Integer(i64::MIN), BinaryOperator::FloorDiv, Value::Integer(-1))]
fn integer_overflow(#[case] lhs: Value, #[case] op: BinaryOperator, #[case] rhs: Value) {
    assert_eq!(lhs.binary_op(op, &rhs, 1), Err(RuntimeError::Overflow { line: 1 }));
}

#[test]
fn mixed_arithmetic_rejects_integers_beyond_exact_reals() {
    let big = Value::Integer(1 << 60);
    assert_eq!(big.add(&Value::Real(0.5), 1), Err(RuntimeError::LiteralTooLarge { line: 1 }));
}

#[rstest]
#[case(Value::from("a"), BinaryOperator::Sub, Value::Integer(1))]
#[case(Value::Integer(1), BinaryOperator::Add, Value::from("1"))]
#[case(Value::Null, BinaryOperator::Less, Value::Null)]
#[case(Value::Bool(true), BinaryOperator::Mul, Value::Bool(true))]
#[case(Value::Real(1.0), BinaryOperator::ShiftLeft, Value::Integer(1))]
fn unsupported_operands(#[case] lhs: Value, #[case] op: BinaryOperator, #[case] rhs: Value) {
    assert!(matches!(lhs.binary_op(op, &rhs, 1),
                     Err(RuntimeError::UnsupportedOperation { .. })));
}

#[test]
fn negative_shift_count_is_rejected() {
    assert!(matches!(Value::Integer(1).shl(&Value::Integer(-1), 1),
                     Err(RuntimeError::InvalidArgument { .. })));
}

#[test]
fn equality_across_kinds() {
    assert_eq!(Value::Integer(2), Value::Real(2.0));
    assert_ne!(Value::Integer(2), Value::Real(2.5));
    assert_ne!(Value::Integer(1), Value::Bool(true));
    assert_ne!(Value::Null, Value::Bool(false));
    assert_ne!(Value::from(""), Value::Null);
    assert_eq!(Value::Type(ValueKind::Number), Value::Type(ValueKind::Number));
    assert_ne!(Value::Type(ValueKind::Number), Value::Type(ValueKind::String));
}

#[test]
fn tables_compare_by_contents() {
    let a = table(&[(Value::from("x"), Value::Integer(1)), (Value::from("y"), Value::Integer(2))]);
    let b = table(&[(Value::from("y"), Value::Integer(2)), (Value::from("x"), Value::Real(1.0))]);
    let c = table(&[(Value::from("x"), Value::Integer(1))]);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn comparisons() {
    let one = Value::Integer(1);
    let one_and_a_half = Value::Real(1.5);
    assert!(one.less(&one_and_a_half, 1).unwrap());
    assert!(one_and_a_half.greater(&one, 1).unwrap());
    assert_eq!(one.binary_op(BinaryOperator::LessEqual, &Value::Real(1.0), 1),
               Ok(Value::Bool(true)));
    assert!(Value::from("apple").less(&Value::from("banana"), 1).unwrap());
    assert!(!Value::Real(f64::NAN).less(&one, 1).unwrap());
}

#[rstest]
#[case(Value::Integer(0), false)]
#[case(Value::Real(0.0), false)]
#[case(Value::from(""), false)]
#[case(Value::Null, false)]
#[case(table(&[]), false)]
#[case(Value::Integer(-1), true)]
#[case(Value::from("0"), true)]
#[case(table(&[(Value::Integer(1), Value::Null)]), true)]
#[case(Value::Type(ValueKind::Null), true)]
fn truthiness(#[case] value: Value, #[case] expected: bool) {
    assert_eq!(value.truthy(), expected);
    assert_eq!(value.cast(ValueKind::Bool, 1).unwrap(), Value::Bool(expected));
}

#[rstest]
#[case(Value::Bool(true), ValueKind::String, Value::from("true"))]
#[case(Value::Bool(true), ValueKind::Number, Value::Integer(1))]
#[case(Value::from(" -12 "), ValueKind::Number, Value::Integer(-12))]
#[case(Value::Integer(3), ValueKind::String, Value::from("3"))]
#[case(Value::Real(3.0), ValueKind::String, Value::from("3.0"))]
#[case(Value::Real(0.25), ValueKind::String, Value::from("0.25"))]
#[case(Value::Null, ValueKind::String, Value::from("null"))]
#[case(Value::Real(2.5), ValueKind::Number, Value::Real(2.5))]
fn casts(#[case] value: Value, #[case] kind: ValueKind, #[case] expected: Value) {
    assert_eq!(value.cast(kind, 1).unwrap(), expected);
}

#[rstest]
#[case(Value::from("abc"), ValueKind::Number)]
#[case(Value::from("1.5"), ValueKind::Number)]
#[case(Value::Null, ValueKind::Number)]
#[case(Value::Integer(1), ValueKind::Table)]
#[case(Value::Type(ValueKind::Bool), ValueKind::String)]
fn invalid_casts(#[case] value: Value, #[case] kind: ValueKind) {
    assert!(value.cast(kind, 1).is_err());
}

#[test]
fn table_keys_follow_equality() {
    let t = table(&[(Value::Integer(1), Value::from("int")), (Value::from("1"), Value::from("str"))]);
    let Value::Table(t) = t else { unreachable!() };
    let t = t.borrow();
    assert_eq!(t.len(), 2);
    assert_eq!(t.get(&Value::Real(1.0), 1).unwrap(), Some(Value::from("int")));
    assert_eq!(t.get(&Value::from("1"), 1).unwrap(), Some(Value::from("str")));
    assert_eq!(t.get(&Value::Bool(true), 1).unwrap(), None);
}

#[test]
fn tables_cannot_be_keys() {
    let mut t = Table::new();
    let key = table(&[]);
    assert_eq!(t.insert(&key, &Value::Null, 4), Err(RuntimeError::UnhashableKey { line: 4 }));
    assert_eq!(t.get(&key, 5), Err(RuntimeError::UnhashableKey { line: 5 }));
}

#[test]
fn table_keeps_insertion_order() {
    let mut t = Table::new();
    for key in ["c", "a", "b"] {
        t.insert(&Value::from(key), &Value::from(key), 1).unwrap();
    }
    t.insert(&Value::from("a"), &Value::Integer(0), 1).unwrap();
    assert_eq!(t.remove(&Value::from("c"), 1).unwrap(), Some(Value::from("c")));
    t.insert(&Value::from("c"), &Value::Integer(2), 1).unwrap();

    assert_eq!(Value::from(t).to_display(1).unwrap(), "{'a': 0, 'b': 'b', 'c': 2}");
}

#[test]
fn table_insert_copies_strings_and_shares_tables() {
    let inner = table(&[]);
    let text = Value::from("abc");

    let mut t = Table::new();
    t.insert(&Value::from("inner"), &inner, 1).unwrap();
    t.insert(&Value::from("text"), &text, 1).unwrap();

    let (Some(Value::Table(stored)), Value::Table(original)) = (t.get(&Value::from("inner"), 1).unwrap(), &inner)
    else {
        unreachable!()
    };
    assert!(Rc::ptr_eq(&stored, original));

    let (Some(Value::String(stored)), Value::String(original)) = (t.get(&Value::from("text"), 1).unwrap(), &text)
    else {
        unreachable!()
    };
    assert!(!Rc::ptr_eq(&stored, original));
}

#[test]
fn self_referencing_table_renders() {
    let t = table(&[(Value::Integer(1), Value::Integer(2))]);
    t.subscript_assign(&Value::from("me"), &t, 1).unwrap();
    assert_eq!(t.to_display(1).unwrap(), "{1: 2, 'me': {...}}");
}

#[test]
fn string_properties() {
    let s = Value::from("hello");
    let Value::Function(Function::Native(length)) = s.dot("length", 1).unwrap() else {
        panic!("length should be a native function");
    };
    assert_eq!(length.invoke(&[], 1).unwrap(), Value::Integer(5));

    assert!(matches!(s.dot("size", 2), Err(RuntimeError::NoSuchProperty { line: 2, .. })));
    assert!(matches!(Value::Integer(1).dot("length", 1),
                     Err(RuntimeError::NoSuchProperty { .. })));
}

#[test]
fn string_subscripts() {
    let s = Value::from("cat");
    assert_eq!(s.subscript(&Value::Integer(0), 1).unwrap(), Value::from("c"));
    assert_eq!(s.subscript(&Value::Integer(3), 1),
               Err(RuntimeError::IndexOutOfBounds { index:  3,
                                                    length: 3,
                                                    line:   1, }));
    assert!(s.subscript(&Value::from("0"), 1).is_err());

    s.subscript_assign(&Value::Integer(0), &Value::from("b"), 1).unwrap();
    s.subscript_assign(&Value::Integer(2), &Value::from(""), 1).unwrap();
    assert_eq!(s, Value::from("ba"));
    assert!(matches!(s.subscript_assign(&Value::Integer(0), &Value::from("xy"), 1),
                     Err(RuntimeError::InvalidArgument { .. })));
}

#[test]
fn missing_table_entries_read_as_null() {
    let t = table(&[]);
    assert_eq!(t.subscript(&Value::from("nope"), 1).unwrap(), Value::Null);
}

#[test]
fn function_equality_is_identity() {
    let f = Function::native("f", 0, |_, _| Ok(Value::Null));
    let g = Function::native("f", 0, |_, _| Ok(Value::Null));
    assert_eq!(Value::Function(f.clone()), Value::Function(f.clone()));
    assert_ne!(Value::Function(f), Value::Function(g));
}

#[test]
fn defaults_of_types() {
    assert_eq!(Value::default_of(ValueKind::Number, 1).unwrap(), Value::Integer(0));
    assert_eq!(Value::default_of(ValueKind::String, 1).unwrap(), Value::from(""));
    assert_eq!(Value::default_of(ValueKind::Bool, 1).unwrap(), Value::Bool(false));
    assert_eq!(Value::default_of(ValueKind::Null, 1).unwrap(), Value::Null);
    assert_eq!(Value::default_of(ValueKind::Table, 1).unwrap(), table(&[]));
    assert!(Value::default_of(ValueKind::Type, 1).is_err());
}
