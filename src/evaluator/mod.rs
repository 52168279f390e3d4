//! Tree-walking evaluator: `Program` + `Environment` -> `Value`.
pub mod builtins;
pub mod environment;
pub mod value;

use std::collections::HashMap;
use std::rc::Rc;

use crate::parser::ast::{
    BlockStatement, Expression, Program, Statement,
};

pub use environment::Environment;
pub use value::{Hashable, Value};

pub fn eval_program(program: &Program, env: &Environment) -> Value {
    let mut result = Value::Null;

    for statement in &program.statements {
        result = eval_statement(statement, env);

        match result {
            Value::ReturnValue(inner) => return *inner,
            Value::Error(_) => return result,
            _ => {}
        }
    }

    result
}

fn eval_block_statement(block: &BlockStatement, env: &Environment) -> Value {
    let mut result = Value::Null;

    for statement in &block.statements {
        result = eval_statement(statement, env);

        if matches!(result, Value::ReturnValue(_) | Value::Error(_)) {
            return result;
        }
    }

    result
}

fn eval_statement(statement: &Statement, env: &Environment) -> Value {
    match statement {
        Statement::Let(let_stmt) => {
            let value = eval_expression(&let_stmt.value, env);
            if value.is_error() {
                return value;
            }
            env.set(&let_stmt.name.value, value);
            Value::Null
        }
        Statement::Return(return_stmt) => {
            let value = eval_expression(&return_stmt.value, env);
            if value.is_error() {
                return value;
            }
            Value::ReturnValue(Box::new(value))
        }
        Statement::Expression(expr_stmt) => eval_expression(&expr_stmt.expression, env),
    }
}

fn eval_expression(expression: &Expression, env: &Environment) -> Value {
    match expression {
        Expression::IntegerLiteral { value, .. } => Value::Integer(*value),
        Expression::FloatLiteral { value, .. } => Value::Float(*value),
        Expression::BooleanLiteral { value, .. } => Value::Boolean(*value),
        Expression::StringLiteral { value, .. } => Value::Str(Rc::from(value.as_str())),
        Expression::Identifier(ident) => eval_identifier(&ident.value, env),
        Expression::Prefix {
            operator, right, ..
        } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(operator, right)
        }
        Expression::Infix {
            left,
            operator,
            right,
            ..
        } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => eval_if_expression(condition, consequence, alternative.as_ref(), env),
        Expression::FunctionLiteral {
            parameters, body, ..
        } => Value::Function {
            parameters: Rc::new(parameters.clone()),
            body: Rc::new(body.clone()),
            env: env.clone(),
        },
        Expression::Call {
            function,
            arguments,
            ..
        } => {
            let function = eval_expression(function, env);
            if function.is_error() {
                return function;
            }

            let arguments = match eval_expressions(arguments, env) {
                Ok(values) => values,
                Err(err) => return err,
            };

            apply_function(function, arguments)
        }
        Expression::ArrayLiteral { elements, .. } => match eval_expressions(elements, env) {
            Ok(values) => Value::Array(Rc::new(values)),
            Err(err) => err,
        },
        Expression::HashLiteral { pairs, .. } => eval_hash_literal(pairs, env),
        Expression::Index { left, index, .. } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(left, index)
        }
    }
}

fn eval_identifier(name: &str, env: &Environment) -> Value {
    if let Some(value) = env.get(name) {
        return value;
    }

    if let Some(builtin) = builtins::lookup(name) {
        return builtin;
    }

    Value::error(format!("identifier not found: {name}"))
}

fn eval_prefix_expression(operator: &str, right: Value) -> Value {
    match operator {
        "!" => Value::Boolean(!right.is_truthy()),
        "-" => match right {
            Value::Integer(value) => Value::Integer(-value),
            Value::Float(value) => Value::Float(-value),
            other => Value::error(format!("unknown operator: -{}", other.type_name())),
        },
        other => Value::error(format!("unknown operator: {other}{}", right.type_name())),
    }
}

fn eval_infix_expression(operator: &str, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::Float(_), _) | (_, Value::Float(_))
            if matches!(left, Value::Integer(_) | Value::Float(_))
                && matches!(right, Value::Integer(_) | Value::Float(_)) =>
        {
            let l = as_f64(&left);
            let r = as_f64(&right);
            eval_float_infix(operator, l, r)
        }
        (Value::Str(l), Value::Str(r)) => eval_string_infix(operator, l, r),
        (Value::Boolean(l), Value::Boolean(r)) => eval_boolean_infix(operator, *l, *r),
        _ => Value::error(format!(
            "type mismatch: {} {operator} {}",
            left.type_name(),
            right.type_name()
        )),
    }
}

fn as_f64(value: &Value) -> f64 {
    match value {
        Value::Integer(v) => *v as f64,
        Value::Float(v) => *v,
        _ => unreachable!("as_f64 called on a non-numeric value"),
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Value {
    match operator {
        "+" => Value::Integer(left + right),
        "-" => Value::Integer(left - right),
        "*" => Value::Integer(left * right),
        "/" => Value::Integer(left / right),
        "<" => Value::Boolean(left < right),
        ">" => Value::Boolean(left > right),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        other => Value::error(format!("unknown operator: INTEGER {other} INTEGER")),
    }
}

fn eval_float_infix(operator: &str, left: f64, right: f64) -> Value {
    match operator {
        "+" => Value::Float(left + right),
        "-" => Value::Float(left - right),
        "*" => Value::Float(left * right),
        "/" => Value::Float(left / right),
        "<" => Value::Boolean(left < right),
        ">" => Value::Boolean(left > right),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        other => Value::error(format!("unknown operator: FLOAT {other} FLOAT")),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Value {
    match operator {
        "+" => Value::Str(Rc::from(format!("{left}{right}"))),
        other => Value::error(format!("unknown operator: STRING {other} STRING")),
    }
}

fn eval_boolean_infix(operator: &str, left: bool, right: bool) -> Value {
    match operator {
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        other => Value::error(format!("unknown operator: BOOLEAN {other} BOOLEAN")),
    }
}

fn eval_if_expression(
    condition: &Expression,
    consequence: &BlockStatement,
    alternative: Option<&BlockStatement>,
    env: &Environment,
) -> Value {
    let condition = eval_expression(condition, env);
    if condition.is_error() {
        return condition;
    }

    if condition.is_truthy() {
        eval_block_statement(consequence, env)
    } else if let Some(alternative) = alternative {
        eval_block_statement(alternative, env)
    } else {
        Value::Null
    }
}

/// Evaluates `expressions` left-to-right, stopping at the first error.
fn eval_expressions(expressions: &[Expression], env: &Environment) -> Result<Vec<Value>, Value> {
    let mut values = Vec::with_capacity(expressions.len());

    for expression in expressions {
        let value = eval_expression(expression, env);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }

    Ok(values)
}

fn apply_function(function: Value, arguments: Vec<Value>) -> Value {
    match function {
        Value::Function {
            parameters, body, env,
        } => {
            let call_env = Environment::enclosed(&env);
            for (parameter, argument) in parameters.iter().zip(arguments) {
                call_env.set(&parameter.value, argument);
            }

            let evaluated = eval_block_statement(&body, &call_env);
            unwrap_return_value(evaluated)
        }
        Value::Builtin(builtin) => builtin(&arguments),
        other => Value::error(format!("not a function: {}", other.type_name())),
    }
}

fn unwrap_return_value(value: Value) -> Value {
    match value {
        Value::ReturnValue(inner) => *inner,
        other => other,
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Environment) -> Value {
    let mut map = HashMap::with_capacity(pairs.len());

    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env);
        if key.is_error() {
            return key;
        }

        let Some(hash_key) = key.hash_key() else {
            return Value::error(format!("unhashable key: {}", key.type_name()));
        };

        let value = eval_expression(value_expr, env);
        if value.is_error() {
            return value;
        }

        map.insert(hash_key, (key, value));
    }

    Value::Hash(Rc::new(map))
}

fn eval_index_expression(left: Value, index: Value) -> Value {
    match (&left, &index) {
        (Value::Array(elements), Value::Integer(i)) => {
            if *i < 0 || *i as usize >= elements.len() {
                Value::Null
            } else {
                elements[*i as usize].clone()
            }
        }
        (Value::Hash(pairs), _) => {
            let Some(hash_key) = index.hash_key() else {
                return Value::error(format!("unhashable key: {}", index.type_name()));
            };
            pairs
                .get(&hash_key)
                .map(|(_, v)| v.clone())
                .unwrap_or(Value::Null)
        }
        _ => Value::error(format!(
            "index operator not supported: {}",
            left.type_name()
        )),
    }
}
