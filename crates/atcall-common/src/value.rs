//! Arena-interned runtime values.
//!
//! The engine never executes Python code. For each argument observed at a
//! decorator call site it only needs to know which *facet* of the value
//! matters for disambiguation: is it callable, is it a class, and is it the
//! exact default object declared on the signature. [`ValueArena`] gives every
//! observed object a stable [`ValueId`]; comparing two ids is the Rust
//! rendition of CPython's `is` — identity, not structural equality.
//! Signature defaults are always compared by handle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to a value recorded in a [`ValueArena`].
///
/// Two handles compare equal exactly when they refer to the same recorded
/// object. Recording the integer `42` twice yields two distinct ids, the same
/// way two `42`s loaded from different sites may be distinct objects in a
/// Python runtime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueId(pub u32);

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// The facets of a Python value the engine distinguishes.
///
/// Anything not representable here can be recorded as the closest plain
/// variant; the rules only ever ask "callable?", "class?", and for a repr to
/// put in error messages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ValueKind {
    /// A plain function object (`def` or builtin).
    Function { name: String },
    /// A class object. Classes are callable.
    Class { name: String },
    /// A method bound to an instance.
    BoundMethod { name: String },
    /// An anonymous function.
    Lambda,
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    /// The `None` singleton.
    None,
}

impl ValueKind {
    /// Whether calling this value is well defined.
    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            ValueKind::Function { .. }
                | ValueKind::Class { .. }
                | ValueKind::BoundMethod { .. }
                | ValueKind::Lambda
        )
    }

    /// Whether this value is a class object.
    pub fn is_class(&self) -> bool {
        matches!(self, ValueKind::Class { .. })
    }

    /// Whether Python would accept this value as the operand of a
    /// decoration. A `False` here proves a with-parenthesis call: only
    /// functions and classes can stand after an `@`.
    pub fn can_be_decoration_target(&self) -> bool {
        self.is_callable() || self.is_class()
    }
}

/// Append-only store of the values observed during one decorator call.
///
/// Ids are never invalidated; the arena is dropped together with the call
/// machinery that produced it.
#[derive(Debug, Default)]
pub struct ValueArena {
    values: Vec<ValueKind>,
}

impl ValueArena {
    pub fn new() -> Self {
        ValueArena { values: Vec::new() }
    }

    /// Records a value and returns its handle.
    pub fn alloc(&mut self, kind: ValueKind) -> ValueId {
        let id = ValueId(self.values.len() as u32);
        self.values.push(kind);
        id
    }

    pub fn get(&self, id: ValueId) -> Option<&ValueKind> {
        self.values.get(id.0 as usize)
    }

    /// Direct access for ids handed out by this arena.
    pub fn kind(&self, id: ValueId) -> &ValueKind {
        &self.values[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Python-flavored rendering used in user-facing error messages.
    pub fn repr(&self, id: ValueId) -> String {
        match self.kind(id) {
            ValueKind::Function { name } => format!("<function {name}>"),
            ValueKind::Class { name } => format!("<class '{name}'>"),
            ValueKind::BoundMethod { name } => format!("<bound method {name}>"),
            ValueKind::Lambda => "<lambda>".to_string(),
            ValueKind::Int(v) => v.to_string(),
            ValueKind::Float(v) => v.to_string(),
            ValueKind::Str(v) => format!("'{v}'"),
            ValueKind::Bool(true) => "True".to_string(),
            ValueKind::Bool(false) => "False".to_string(),
            ValueKind::None => "None".to_string(),
        }
    }

    // Convenience constructors for the common facets.

    pub fn alloc_function(&mut self, name: &str) -> ValueId {
        self.alloc(ValueKind::Function {
            name: name.to_string(),
        })
    }

    pub fn alloc_class(&mut self, name: &str) -> ValueId {
        self.alloc(ValueKind::Class {
            name: name.to_string(),
        })
    }

    pub fn alloc_int(&mut self, v: i64) -> ValueId {
        self.alloc(ValueKind::Int(v))
    }

    pub fn alloc_str(&mut self, v: &str) -> ValueId {
        self.alloc(ValueKind::Str(v.to_string()))
    }

    pub fn alloc_none(&mut self) -> ValueId {
        self.alloc(ValueKind::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_yields_distinct_ids() {
        let mut arena = ValueArena::new();
        let a = arena.alloc_int(42);
        let b = arena.alloc_int(42);
        assert_ne!(a, b);
        assert_eq!(arena.kind(a), arena.kind(b));
    }

    #[test]
    fn test_callable_facets() {
        let mut arena = ValueArena::new();
        let f = arena.alloc_function("f");
        let c = arena.alloc_class("C");
        let m = arena.alloc(ValueKind::BoundMethod {
            name: "obj.m".to_string(),
        });
        let n = arena.alloc_int(1);

        assert!(arena.kind(f).is_callable());
        assert!(!arena.kind(f).is_class());
        assert!(arena.kind(c).is_callable());
        assert!(arena.kind(c).is_class());
        assert!(arena.kind(m).is_callable());
        assert!(!arena.kind(n).is_callable());

        assert!(arena.kind(f).can_be_decoration_target());
        assert!(arena.kind(c).can_be_decoration_target());
        assert!(!arena.kind(n).can_be_decoration_target());
    }

    #[test]
    fn test_repr() {
        let mut arena = ValueArena::new();
        let f = arena.alloc_function("foo");
        let c = arena.alloc_class("Bar");
        let s = arena.alloc_str("x");
        let t = arena.alloc(ValueKind::Bool(true));
        let n = arena.alloc_none();

        assert_eq!(arena.repr(f), "<function foo>");
        assert_eq!(arena.repr(c), "<class 'Bar'>");
        assert_eq!(arena.repr(s), "'x'");
        assert_eq!(arena.repr(t), "True");
        assert_eq!(arena.repr(n), "None");
    }
}
