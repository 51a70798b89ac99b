//! Engine failures, distinct from an ordinary [`Verdict`](crate::Verdict).

use atcall_sig::BindError;
use std::fmt;

/// Failures the engine can surface.
///
/// `Unresolvable` and `Bind` describe caller usage and propagate to whoever
/// wrote the decorator call; `Internal` describes a defining-layer contract
/// violation and is meant to be caught by the defining layer's own tests.
#[derive(Clone, Debug, PartialEq)]
pub enum DisambigError {
    /// No static policy decides the call and the call-site source cannot be
    /// read in this execution context.
    Unresolvable {
        decorator: String,
        value_repr: String,
    },
    /// A state that a correctly configured defining layer can never reach.
    Internal(String),
    /// Argument binding failed. `MissingPositional`/`MissingKeywordOnly` is
    /// the expected, informative outcome of reading a target-less call as a
    /// decoration; the other variants are malformed calls. Never masked.
    Bind(BindError),
}

impl DisambigError {
    pub(crate) fn internal(msg: impl Into<String>) -> Self {
        DisambigError::Internal(msg.into())
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, DisambigError::Internal(_))
    }
}

impl fmt::Display for DisambigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisambigError::Unresolvable {
                decorator,
                value_repr,
            } => write!(
                f,
                "@{decorator}: cannot tell whether the decorator was used with or without \
                 parenthesis: call-site source is not available in this execution context. \
                 Use explicit parenthesis @{decorator}() for no-argument usage, or declare \
                 the decorator's first-argument policy explicitly. Ambiguous argument \
                 received: {value_repr}"
            ),
            DisambigError::Internal(msg) => write!(
                f,
                "internal error - {msg} - this should not happen, please file an issue on \
                 the project page"
            ),
            DisambigError::Bind(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for DisambigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DisambigError::Bind(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BindError> for DisambigError {
    fn from(err: BindError) -> Self {
        DisambigError::Bind(err)
    }
}
