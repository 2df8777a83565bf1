use std::rc::Rc;

use pretty_assertions::assert_eq;
use tern::{
    error::RuntimeError,
    interpreter::{
        environment::Scope,
        value::{core::Value, table::Table},
    },
};

#[test]
fn lookups_walk_outwards() {
    let root = Scope::root();
    root.declare("x", &Value::Integer(1), 1).unwrap();

    let middle = Scope::child(&root);
    let inner = Scope::child(&middle);
    assert_eq!(inner.read("x", 2).unwrap(), Value::Integer(1));
    assert!(!inner.binds("x"));
    assert!(root.binds("x"));
}

#[test]
fn unknown_names() {
    let root = Scope::root();
    assert_eq!(root.read("y", 3),
               Err(RuntimeError::UndefinedVariable { name: "y".to_string(),
                                                     line: 3, }));
    assert_eq!(root.write("y", &Value::Null, 4),
               Err(RuntimeError::ImplicitDeclaration { name: "y".to_string(),
                                                       line: 4, }));
}

#[test]
fn redeclaration_in_the_same_frame_fails() {
    let root = Scope::root();
    root.declare("x", &Value::Integer(1), 1).unwrap();
    assert_eq!(root.declare("x", &Value::Integer(2), 2),
               Err(RuntimeError::Redeclaration { name: "x".to_string(),
                                                 line: 2, }));
    assert_eq!(root.read("x", 3).unwrap(), Value::Integer(1));
}

#[test]
fn shadowing_leaves_the_outer_binding_alone() {
    let root = Scope::root();
    root.declare("x", &Value::Integer(1), 1).unwrap();

    let inner = Scope::child(&root);
    inner.declare("x", &Value::from("inner"), 2).unwrap();
    inner.write("x", &Value::from("changed"), 3).unwrap();

    assert_eq!(inner.read("x", 4).unwrap(), Value::from("changed"));
    assert_eq!(root.read("x", 4).unwrap(), Value::Integer(1));
}

#[test]
fn writes_reach_the_owning_frame() {
    let root = Scope::root();
    root.declare("count", &Value::Integer(0), 1).unwrap();

    let inner = Scope::child(&root);
    inner.write("count", &Value::Integer(5), 2).unwrap();

    assert!(!inner.binds("count"));
    assert_eq!(root.read("count", 3).unwrap(), Value::Integer(5));
}

#[test]
fn names_vanish_with_their_frame() {
    let root = Scope::root();
    {
        let inner = Scope::child(&root);
        inner.declare("temp", &Value::Bool(true), 1).unwrap();
    }
    assert!(root.read("temp", 2).is_err());
}

#[test]
fn strings_are_copied_on_binding() {
    let root = Scope::root();
    let original = Value::from("abc");
    root.declare("s", &original, 1).unwrap();

    original.subscript_assign(&Value::Integer(0), &Value::from("x"), 2).unwrap();
    assert_eq!(root.read("s", 3).unwrap(), Value::from("abc"));

    let alias = root.read("s", 4).unwrap();
    alias.subscript_assign(&Value::Integer(0), &Value::from("z"), 5).unwrap();
    assert_eq!(root.read("s", 6).unwrap(), Value::from("zbc"));
}

#[test]
fn tables_are_shared_on_binding() {
    let root = Scope::root();
    let table = Value::from(Table::new());
    root.declare("t", &table, 1).unwrap();
    root.declare("u", &root.read("t", 2).unwrap(), 2).unwrap();

    root.read("u", 3)
        .unwrap()
        .subscript_assign(&Value::from("k"), &Value::Integer(1), 3)
        .unwrap();

    let (Value::Table(t), Value::Table(u)) = (root.read("t", 4).unwrap(), root.read("u", 4).unwrap()) else {
        unreachable!()
    };
    assert!(Rc::ptr_eq(&t, &u));
    assert_eq!(t.borrow().get(&Value::from("k"), 5).unwrap(), Some(Value::Integer(1)));
}
