use pebble_lang::evaluator::{eval_program, Environment, Value};
use pebble_lang::parser::Parser;

fn eval(input: &str) -> Value {
    let mut parser = Parser::from_source(input);
    let program = parser.parse_program();
    assert!(
        parser.errors().is_empty(),
        "unexpected parser errors for {input:?}: {:?}",
        parser.errors()
    );
    let env = Environment::new();
    eval_program(&program, &env)
}

#[test]
fn integer_expression_honors_precedence() {
    assert!(matches!(eval("5 + 5 * 2"), Value::Integer(15)));
}

#[test]
fn function_application() {
    assert!(matches!(
        eval("let add = fn(x, y) { x + y }; add(5, 5)"),
        Value::Integer(10)
    ));
}

#[test]
fn closures_capture_their_defining_environment() {
    let input = "let newAdder = fn(x) { fn(y) { x + y } }; \
                  let addTwo = newAdder(2); addTwo(2)";
    assert!(matches!(eval(input), Value::Integer(4)));
}

#[test]
fn nested_return_stops_at_the_innermost_return() {
    let input = "if (10 > 1) { if (10 > 1) { return 10; } return 1; }";
    assert!(matches!(eval(input), Value::Integer(10)));
}

#[test]
fn type_mismatch_is_an_error_value() {
    match eval("5 + true") {
        Value::Error(msg) => assert_eq!(msg, "type mismatch: INTEGER + BOOLEAN"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn hash_literal_with_mixed_key_kinds_indexes_correctly() {
    let setup = r#"
        let two = "two";
        let h = {"one": 10 - 9, two: 1 + 1, "thr" + "ee": 6 / 2, 4: 4, true: 5, false: 6};
    "#;
    assert!(matches!(
        eval(&format!("{setup} h[true]")),
        Value::Integer(5)
    ));
    assert!(matches!(
        eval(&format!("{setup} h[\"three\"]")),
        Value::Integer(3)
    ));
    assert!(matches!(eval(&format!("{setup} h[4]")), Value::Integer(4)));
}

#[test]
fn unhashable_key_reports_function_type() {
    match eval(r#"{"name": "X"}[fn(x) { x }]"#) {
        Value::Error(msg) => assert_eq!(msg, "unhashable key: FUNCTION"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn builtin_rest_and_first_on_empty_array() {
    let Value::Array(elements) = eval("rest([1, 2, 3])") else {
        panic!("expected array")
    };
    assert_eq!(elements.len(), 2);
    assert!(matches!(eval("first([])"), Value::Null));
}

#[test]
fn float_promotion_happens_only_when_a_float_operand_is_present() {
    assert!(matches!(eval("1 + 2.5"), Value::Float(v) if v == 3.5));
    assert!(matches!(eval("3.0 / 2"), Value::Float(v) if v == 1.5));
    assert!(matches!(eval("3 / 2"), Value::Integer(1)));
}

#[test]
fn string_operator_support_is_limited_to_concatenation() {
    match eval(r#""foo" + "bar""#) {
        Value::Str(s) => assert_eq!(&*s, "foobar"),
        other => panic!("expected string, got {other:?}"),
    }
    match eval(r#""foo" - "bar""#) {
        Value::Error(msg) => assert_eq!(msg, "unknown operator: STRING - STRING"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn builtin_len_arity_and_type_errors() {
    assert!(matches!(eval(r#"len("hello")"#), Value::Integer(5)));
    match eval("len(5)") {
        Value::Error(msg) => assert_eq!(msg, "argument to `len` not supported, got INTEGER"),
        other => panic!("expected error, got {other:?}"),
    }
    match eval(r#"len("a", "b")"#) {
        Value::Error(msg) => assert_eq!(msg, "wrong number of arguments. got=2, want=1"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn push_does_not_mutate_the_original_array_binding() {
    let Value::Array(elements) = eval("let a = [1, 2]; push(a, 3); a") else {
        panic!("expected array")
    };
    assert_eq!(elements.len(), 2);
}

#[test]
fn array_index_out_of_range_or_negative_yields_null_not_error() {
    assert!(matches!(eval("[1, 2, 3][3]"), Value::Null));
    assert!(matches!(eval("[1, 2, 3][-1]"), Value::Null));
}

#[test]
fn unbound_function_parameter_fails_lazily_on_reference() {
    match eval("let f = fn(x, y) { y }; f(1)") {
        Value::Error(msg) => assert_eq!(msg, "identifier not found: y"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn extra_call_arguments_beyond_parameters_are_ignored() {
    assert!(matches!(
        eval("let f = fn(x) { x }; f(1, 2, 3)"),
        Value::Integer(1)
    ));
}
