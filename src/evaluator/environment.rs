//! Lexical scope: identifier-to-value mapping with an outer link.
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::evaluator::value::Value;

#[derive(Debug)]
struct EnvInner {
    store: HashMap<String, Value>,
    outer: Option<Environment>,
}

/// Cheaply cloneable handle onto a scope. Clones share the same underlying
/// bindings (an `Rc` clone), which is exactly what closures need: every
/// closure derived from the same `fn` sees writes to the captured scope.
#[derive(Debug, Clone)]
pub struct Environment(Rc<RefCell<EnvInner>>);

impl Environment {
    pub fn new() -> Self {
        Environment(Rc::new(RefCell::new(EnvInner {
            store: HashMap::new(),
            outer: None,
        })))
    }

    /// Build a fresh inner scope whose outer link is `outer` (an `Rc` clone,
    /// not the caller's own scope) — used to invoke a function with its
    /// closure environment as parent.
    pub fn enclosed(outer: &Environment) -> Self {
        Environment(Rc::new(RefCell::new(EnvInner {
            store: HashMap::new(),
            outer: Some(outer.clone()),
        })))
    }

    /// Walks the outer chain until `name` is found or the chain is exhausted.
    pub fn get(&self, name: &str) -> Option<Value> {
        let inner = self.0.borrow();
        if let Some(value) = inner.store.get(name) {
            Some(value.clone())
        } else {
            inner.outer.as_ref().and_then(|outer| outer.get(name))
        }
    }

    /// Always binds in the innermost (this) scope.
    pub fn set(&self, name: &str, value: Value) {
        self.0.borrow_mut().store.insert(name.to_owned(), value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_miss_returns_none() {
        let env = Environment::new();
        assert!(env.get("x").is_none());
    }

    #[test]
    fn set_then_get() {
        let env = Environment::new();
        env.set("x", Value::Integer(5));
        assert!(matches!(env.get("x"), Some(Value::Integer(5))));
    }

    #[test]
    fn enclosed_scope_sees_outer_binding() {
        let outer = Environment::new();
        outer.set("x", Value::Integer(5));

        let inner = Environment::enclosed(&outer);
        assert!(matches!(inner.get("x"), Some(Value::Integer(5))));
    }

    #[test]
    fn enclosed_scope_shadows_without_mutating_outer() {
        let outer = Environment::new();
        outer.set("x", Value::Integer(5));

        let inner = Environment::enclosed(&outer);
        inner.set("x", Value::Integer(10));

        assert!(matches!(inner.get("x"), Some(Value::Integer(10))));
        assert!(matches!(outer.get("x"), Some(Value::Integer(5))));
    }

    #[test]
    fn clone_shares_the_same_scope() {
        let env = Environment::new();
        let alias = env.clone();

        alias.set("x", Value::Integer(1));
        assert!(matches!(env.get("x"), Some(Value::Integer(1))));
    }
}
