//! Declared parameters and signature validation.

use atcall_common::ValueId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five Python parameter kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Before a `/` marker. Can never be passed by keyword.
    PositionalOnly,
    /// Ordinary parameter, positional or keyword.
    PositionalOrKeyword,
    /// `*args`.
    VarPositional,
    /// After a `*` or `*args` marker.
    KeywordOnly,
    /// `**kwargs`.
    VarKeyword,
}

impl ParamKind {
    pub fn is_variadic(self) -> bool {
        matches!(self, ParamKind::VarPositional | ParamKind::VarKeyword)
    }

    /// Whether a caller can address this parameter by name.
    pub fn allows_keyword(self) -> bool {
        matches!(self, ParamKind::PositionalOrKeyword | ParamKind::KeywordOnly)
    }

    /// Whether a positional argument can land on this parameter.
    pub fn accepts_positional(self) -> bool {
        matches!(
            self,
            ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword
        )
    }

    /// Declaration-order rank; kinds must appear in non-decreasing rank.
    fn rank(self) -> u8 {
        match self {
            ParamKind::PositionalOnly => 0,
            ParamKind::PositionalOrKeyword => 1,
            ParamKind::VarPositional => 2,
            ParamKind::KeywordOnly => 3,
            ParamKind::VarKeyword => 4,
        }
    }
}

/// One declared parameter.
///
/// `default` is `None` for a parameter without a default. A present default
/// is an arena handle; all default comparisons downstream are by handle
/// identity, mirroring CPython's `is` check against the default object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub default: Option<ValueId>,
}

impl Param {
    pub fn new(name: &str, kind: ParamKind) -> Self {
        Param {
            name: name.to_string(),
            kind,
            default: None,
        }
    }

    pub fn with_default(mut self, default: ValueId) -> Self {
        self.default = Some(default);
        self
    }

    /// A parameter the caller must supply: non-variadic and without default.
    pub fn is_mandatory(&self) -> bool {
        !self.kind.is_variadic() && self.default.is_none()
    }
}

/// Rejected parameter lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignatureError {
    DuplicateParam(String),
    /// A kind appeared after one that must follow it.
    OrderViolation(String),
    MultipleVarPositional(String),
    MultipleVarKeyword(String),
    VariadicWithDefault(String),
    /// A positional parameter without a default followed one with a default.
    NonDefaultAfterDefault(String),
    /// A configuration function must declare at least one parameter.
    Empty,
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureError::DuplicateParam(name) => {
                write!(f, "duplicate parameter '{name}'")
            }
            SignatureError::OrderViolation(name) => {
                write!(f, "parameter '{name}' appears after a later-kind parameter")
            }
            SignatureError::MultipleVarPositional(name) => {
                write!(f, "second *args parameter '{name}'")
            }
            SignatureError::MultipleVarKeyword(name) => {
                write!(f, "second **kwargs parameter '{name}'")
            }
            SignatureError::VariadicWithDefault(name) => {
                write!(f, "variadic parameter '{name}' cannot have a default")
            }
            SignatureError::NonDefaultAfterDefault(name) => {
                write!(f, "non-default parameter '{name}' follows a default parameter")
            }
            SignatureError::Empty => {
                write!(f, "signature declares no parameters")
            }
        }
    }
}

impl std::error::Error for SignatureError {}

/// An ordered, validated parameter list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    /// Validates Python's declaration rules: kinds in order, at most one of
    /// each variadic, unique names, no defaults on variadics, and no
    /// non-default positional parameter after a defaulted one.
    pub fn new(params: Vec<Param>) -> Result<Self, SignatureError> {
        let mut last_rank = 0u8;
        let mut seen_var_positional = false;
        let mut seen_var_keyword = false;
        let mut seen_positional_default = false;

        for (i, p) in params.iter().enumerate() {
            if params[..i].iter().any(|q| q.name == p.name) {
                return Err(SignatureError::DuplicateParam(p.name.clone()));
            }
            let rank = p.kind.rank();
            if rank < last_rank {
                return Err(SignatureError::OrderViolation(p.name.clone()));
            }
            last_rank = rank;
            match p.kind {
                ParamKind::VarPositional => {
                    if seen_var_positional {
                        return Err(SignatureError::MultipleVarPositional(p.name.clone()));
                    }
                    seen_var_positional = true;
                }
                ParamKind::VarKeyword => {
                    if seen_var_keyword {
                        return Err(SignatureError::MultipleVarKeyword(p.name.clone()));
                    }
                    seen_var_keyword = true;
                }
                _ => {}
            }
            if p.kind.is_variadic() && p.default.is_some() {
                return Err(SignatureError::VariadicWithDefault(p.name.clone()));
            }
            if p.kind.accepts_positional() {
                if p.default.is_some() {
                    seen_positional_default = true;
                } else if seen_positional_default {
                    return Err(SignatureError::NonDefaultAfterDefault(p.name.clone()));
                }
            }
        }

        Ok(Signature { params })
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of parameters a positional argument can land on.
    pub fn positional_capacity(&self) -> usize {
        self.params
            .iter()
            .filter(|p| p.kind.accepts_positional())
            .count()
    }

    pub fn var_positional(&self) -> Option<&Param> {
        self.params
            .iter()
            .find(|p| p.kind == ParamKind::VarPositional)
    }

    pub fn var_keyword(&self) -> Option<&Param> {
        self.params.iter().find(|p| p.kind == ParamKind::VarKeyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atcall_common::ValueArena;

    #[test]
    fn test_kind_predicates() {
        assert!(ParamKind::VarPositional.is_variadic());
        assert!(ParamKind::VarKeyword.is_variadic());
        assert!(!ParamKind::PositionalOnly.is_variadic());
        assert!(ParamKind::PositionalOrKeyword.allows_keyword());
        assert!(ParamKind::KeywordOnly.allows_keyword());
        assert!(!ParamKind::PositionalOnly.allows_keyword());
        assert!(!ParamKind::VarPositional.allows_keyword());
        assert!(ParamKind::PositionalOnly.accepts_positional());
        assert!(!ParamKind::KeywordOnly.accepts_positional());
    }

    #[test]
    fn test_mandatory() {
        let mut arena = ValueArena::new();
        let d = arena.alloc_none();
        assert!(Param::new("a", ParamKind::PositionalOrKeyword).is_mandatory());
        assert!(
            !Param::new("a", ParamKind::PositionalOrKeyword)
                .with_default(d)
                .is_mandatory()
        );
        assert!(!Param::new("args", ParamKind::VarPositional).is_mandatory());
    }

    #[test]
    fn test_ordering_enforced() {
        let err = Signature::new(vec![
            Param::new("k", ParamKind::KeywordOnly),
            Param::new("a", ParamKind::PositionalOrKeyword),
        ])
        .unwrap_err();
        assert_eq!(err, SignatureError::OrderViolation("a".to_string()));
    }
}
