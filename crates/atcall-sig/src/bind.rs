//! Argument binding against a validated signature.
//!
//! Follows CPython's resolution order: positional arguments first, excess
//! collected by `*args` when declared; keyword arguments next, unmatched ones
//! collected by `**kwargs` when declared; defaults fill the rest; anything
//! still unfilled is a `TypeError` in Python, surfaced here as [`BindError`]
//! with the same message shape.

use crate::params::{ParamKind, Signature};
use atcall_common::{ValueId, limits};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;
use tracing::trace;

/// The arguments one call actually received.
///
/// `positional` holds only the *purely positional* arguments: those that,
/// per the exposed signature, could not have been passed as keywords. The
/// exposed-signature layer passes every keyword-capable argument by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CallArguments {
    positional: SmallVec<[ValueId; limits::INLINE_POSITIONAL_ARGS]>,
    keywords: Vec<(String, ValueId)>,
}

impl CallArguments {
    pub fn new() -> Self {
        CallArguments::default()
    }

    /// Appends a purely-positional argument; chainable for call-site brevity.
    pub fn arg(mut self, value: ValueId) -> Self {
        self.positional.push(value);
        self
    }

    /// Appends a keyword argument; chainable.
    pub fn kwarg(mut self, name: &str, value: ValueId) -> Self {
        self.keywords.push((name.to_string(), value));
        self
    }

    pub fn positional(&self) -> &[ValueId] {
        &self.positional
    }

    pub fn keywords(&self) -> &[(String, ValueId)] {
        &self.keywords
    }

    pub fn num_positional(&self) -> usize {
        self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }
}

/// Binding failures, phrased as CPython `TypeError` messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindError {
    /// Too many positional arguments and no `*args` to take them.
    TooManyPositional {
        func: String,
        expected: usize,
        given: usize,
    },
    /// Same parameter filled both positionally and by keyword.
    DuplicateArgument { func: String, param: String },
    /// Keyword matches no parameter and there is no `**kwargs`.
    UnexpectedKeyword { func: String, keyword: String },
    /// A mandatory positional-capable parameter was never filled.
    MissingPositional { func: String, param: String },
    /// A mandatory keyword-only parameter was never filled.
    MissingKeywordOnly { func: String, param: String },
}

impl BindError {
    /// Whether this is the expected "decorated without a target" failure
    /// (missing mandatory argument) rather than a malformed call.
    pub fn is_missing_required(&self) -> bool {
        matches!(
            self,
            BindError::MissingPositional { .. } | BindError::MissingKeywordOnly { .. }
        )
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::TooManyPositional {
                func,
                expected,
                given,
            } => write!(
                f,
                "{func}() takes {expected} positional arguments but {given} were given"
            ),
            BindError::DuplicateArgument { func, param } => {
                write!(f, "{func}() got multiple values for argument '{param}'")
            }
            BindError::UnexpectedKeyword { func, keyword } => {
                write!(f, "{func}() got an unexpected keyword argument '{keyword}'")
            }
            BindError::MissingPositional { func, param } => {
                write!(
                    f,
                    "{func}() missing required positional argument: '{param}'"
                )
            }
            BindError::MissingKeywordOnly { func, param } => {
                write!(
                    f,
                    "{func}() missing required keyword-only argument: '{param}'"
                )
            }
        }
    }
}

impl std::error::Error for BindError {}

/// The result of a successful bind.
///
/// `values` maps every non-variadic parameter to its value (supplied or
/// default) in declaration order. Arguments collected by `*args`/`**kwargs`
/// are kept aside; a non-empty collection means the caller supplied
/// configuration beyond the declared names.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundArguments {
    values: IndexMap<String, ValueId>,
    extra_positional: Vec<ValueId>,
    extra_keywords: Vec<(String, ValueId)>,
}

impl BoundArguments {
    pub fn get(&self, name: &str) -> Option<ValueId> {
        self.values.get(name).copied()
    }

    /// Declaration-ordered (name, value) pairs for non-variadic parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ValueId)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn extra_positional(&self) -> &[ValueId] {
        &self.extra_positional
    }

    pub fn extra_keywords(&self) -> &[(String, ValueId)] {
        &self.extra_keywords
    }
}

/// Binds `args` against `sig`, applying defaults.
///
/// `func` is the callable's name, used only in error messages.
pub fn bind(sig: &Signature, func: &str, args: &CallArguments) -> Result<BoundArguments, BindError> {
    let mut slots: FxHashMap<&str, ValueId> = FxHashMap::default();
    let mut extra_positional = Vec::new();
    let mut extra_keywords = Vec::new();

    // Positional arguments land on positional-capable parameters in order;
    // the rest go to *args or are an arity error.
    let mut pos_params = sig.params().iter().filter(|p| p.kind.accepts_positional());
    for &value in args.positional() {
        match pos_params.next() {
            Some(p) => {
                slots.insert(p.name.as_str(), value);
            }
            None => {
                if sig.var_positional().is_some() {
                    extra_positional.push(value);
                } else {
                    return Err(BindError::TooManyPositional {
                        func: func.to_string(),
                        expected: sig.positional_capacity(),
                        given: args.num_positional(),
                    });
                }
            }
        }
    }

    // Keyword arguments match by name; positional-only parameters are not
    // addressable by name, so their names fall through to **kwargs like any
    // unknown key.
    for (key, value) in args.keywords() {
        match sig.get(key) {
            Some(p) if p.kind.allows_keyword() => {
                if slots.insert(p.name.as_str(), *value).is_some() {
                    return Err(BindError::DuplicateArgument {
                        func: func.to_string(),
                        param: key.clone(),
                    });
                }
            }
            _ => {
                if sig.var_keyword().is_some() {
                    extra_keywords.push((key.clone(), *value));
                } else {
                    return Err(BindError::UnexpectedKeyword {
                        func: func.to_string(),
                        keyword: key.clone(),
                    });
                }
            }
        }
    }

    // Defaults, then the missing-argument check, in declaration order.
    let mut values = IndexMap::new();
    for p in sig.params() {
        if p.kind.is_variadic() {
            continue;
        }
        match slots.get(p.name.as_str()) {
            Some(&v) => {
                values.insert(p.name.clone(), v);
            }
            None => match p.default {
                Some(d) => {
                    values.insert(p.name.clone(), d);
                }
                None => {
                    return Err(if p.kind == ParamKind::KeywordOnly {
                        BindError::MissingKeywordOnly {
                            func: func.to_string(),
                            param: p.name.clone(),
                        }
                    } else {
                        BindError::MissingPositional {
                            func: func.to_string(),
                            param: p.name.clone(),
                        }
                    });
                }
            },
        }
    }

    trace!(
        func,
        bound = values.len(),
        extra_pos = extra_positional.len(),
        extra_kw = extra_keywords.len(),
        "bound call arguments"
    );

    Ok(BoundArguments {
        values,
        extra_positional,
        extra_keywords,
    })
}
