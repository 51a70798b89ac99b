//! Argument binding against Python-shaped signatures.

use atcall_common::ValueArena;
use atcall_sig::{BindError, CallArguments, Param, ParamKind, Signature, bind};

fn sig_of(params: Vec<Param>) -> Signature {
    Signature::new(params).unwrap()
}

#[test]
fn test_positional_then_keyword() {
    let mut arena = ValueArena::new();
    let a = arena.alloc_int(1);
    let b = arena.alloc_int(2);
    let sig = sig_of(vec![
        Param::new("x", ParamKind::PositionalOnly),
        Param::new("y", ParamKind::PositionalOrKeyword),
    ]);

    let bound = bind(&sig, "deco", &CallArguments::new().arg(a).kwarg("y", b)).unwrap();
    assert_eq!(bound.get("x"), Some(a));
    assert_eq!(bound.get("y"), Some(b));
    assert!(bound.extra_positional().is_empty());
    assert!(bound.extra_keywords().is_empty());
}

#[test]
fn test_excess_positional_collected_by_var_positional() {
    let mut arena = ValueArena::new();
    let a = arena.alloc_int(1);
    let b = arena.alloc_int(2);
    let c = arena.alloc_int(3);
    let sig = sig_of(vec![
        Param::new("x", ParamKind::PositionalOnly),
        Param::new("args", ParamKind::VarPositional),
    ]);

    let bound = bind(&sig, "deco", &CallArguments::new().arg(a).arg(b).arg(c)).unwrap();
    assert_eq!(bound.get("x"), Some(a));
    assert_eq!(bound.extra_positional(), &[b, c]);
}

#[test]
fn test_too_many_positional_without_var_positional() {
    let mut arena = ValueArena::new();
    let a = arena.alloc_int(1);
    let b = arena.alloc_int(2);
    let sig = sig_of(vec![Param::new("x", ParamKind::PositionalOnly)]);

    let err = bind(&sig, "deco", &CallArguments::new().arg(a).arg(b)).unwrap_err();
    assert_eq!(
        err,
        BindError::TooManyPositional {
            func: "deco".to_string(),
            expected: 1,
            given: 2,
        }
    );
    assert_eq!(
        err.to_string(),
        "deco() takes 1 positional arguments but 2 were given"
    );
}

#[test]
fn test_unknown_keyword_collected_by_var_keyword() {
    let mut arena = ValueArena::new();
    let v = arena.alloc_str("x");
    let d = arena.alloc_none();
    let sig = sig_of(vec![
        Param::new("a", ParamKind::PositionalOrKeyword).with_default(d),
        Param::new("kwargs", ParamKind::VarKeyword),
    ]);

    let bound = bind(&sig, "deco", &CallArguments::new().kwarg("color", v)).unwrap();
    assert_eq!(bound.get("a"), Some(d));
    assert_eq!(bound.extra_keywords(), &[("color".to_string(), v)]);
}

#[test]
fn test_unexpected_keyword_without_var_keyword() {
    let mut arena = ValueArena::new();
    let v = arena.alloc_int(1);
    let sig = sig_of(vec![Param::new("a", ParamKind::PositionalOrKeyword)]);

    let err = bind(&sig, "deco", &CallArguments::new().kwarg("b", v)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "deco() got an unexpected keyword argument 'b'"
    );
}

#[test]
fn test_positional_only_name_is_not_addressable() {
    let mut arena = ValueArena::new();
    let v = arena.alloc_int(1);
    let sig = sig_of(vec![Param::new("x", ParamKind::PositionalOnly)]);

    // `x` exists but cannot be passed by name; without **kwargs the call fails.
    let err = bind(&sig, "deco", &CallArguments::new().kwarg("x", v)).unwrap_err();
    assert_eq!(
        err,
        BindError::UnexpectedKeyword {
            func: "deco".to_string(),
            keyword: "x".to_string(),
        }
    );
}

#[test]
fn test_duplicate_positional_and_keyword() {
    let mut arena = ValueArena::new();
    let a = arena.alloc_int(1);
    let b = arena.alloc_int(2);
    let sig = sig_of(vec![Param::new("x", ParamKind::PositionalOrKeyword)]);

    // Engine invariants keep keyword-capable params out of the positional
    // list, but the binder itself follows CPython for raw calls.
    let err = bind(&sig, "deco", &CallArguments::new().arg(a).kwarg("x", b)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "deco() got multiple values for argument 'x'"
    );
}

#[test]
fn test_missing_required_messages() {
    let mut arena = ValueArena::new();
    let v = arena.alloc_int(1);
    let sig = sig_of(vec![
        Param::new("a", ParamKind::PositionalOrKeyword),
        Param::new("k", ParamKind::KeywordOnly),
    ]);

    let err = bind(&sig, "deco", &CallArguments::new()).unwrap_err();
    assert!(err.is_missing_required());
    assert_eq!(
        err.to_string(),
        "deco() missing required positional argument: 'a'"
    );

    let err = bind(&sig, "deco", &CallArguments::new().kwarg("a", v)).unwrap_err();
    assert!(err.is_missing_required());
    assert_eq!(
        err.to_string(),
        "deco() missing required keyword-only argument: 'k'"
    );
}

#[test]
fn test_bind_is_pure() {
    let mut arena = ValueArena::new();
    let v = arena.alloc_int(1);
    let sig = sig_of(vec![Param::new("a", ParamKind::PositionalOrKeyword)]);
    let args = CallArguments::new().kwarg("a", v);

    let first = bind(&sig, "deco", &args).unwrap();
    let second = bind(&sig, "deco", &args).unwrap();
    assert_eq!(first, second);
}
