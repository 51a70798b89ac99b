//! The three-way outcome of disambiguating one decorator call.

use serde::{Deserialize, Serialize};

/// What the first argument of a decorator call turned out to be.
///
/// `Ambiguous` is an ordinary value here, never an internal error; the layer
/// sitting between this engine and the end caller decides whether to turn an
/// unresolved `Ambiguous` into a user-facing failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Ordinary configuration; the call used parenthesis, as in `@deco(x)`.
    NormalArg,
    /// The object being decorated; the call used no parenthesis, as in
    /// `@deco`.
    DecoratedTarget,
    /// Cannot be resolved; the caller must disambiguate explicitly.
    Ambiguous,
}
