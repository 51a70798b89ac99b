//! The per-decorator facade tying signature, rules and policy together.

use atcall_common::ValueArena;
use atcall_sig::{CallArguments, SigInfo};
use tracing::debug;

use crate::context::CallContext;
use crate::error::DisambigError;
use crate::policy::{DecoratorPolicy, LastResort};
use crate::rules;
use crate::verdict::Verdict;

/// One decorator definition's disambiguator.
///
/// Built once when the decorator is defined; each invocation of the
/// decorator then costs one [`resolve_call`](Disambiguator::resolve_call).
/// Immutable after construction, so a definition can be shared freely.
#[derive(Debug)]
pub struct Disambiguator {
    decorator: String,
    sig: SigInfo,
    last_resort: LastResort,
}

impl Disambiguator {
    pub fn new(decorator: impl Into<String>, sig: SigInfo, policy: DecoratorPolicy) -> Self {
        let decorator = decorator.into();
        let last_resort = LastResort::new(decorator.clone(), policy, sig.is_first_arg_mandatory());
        Disambiguator {
            decorator,
            sig,
            last_resort,
        }
    }

    pub fn decorator(&self) -> &str {
        &self.decorator
    }

    pub fn sig_info(&self) -> &SigInfo {
        &self.sig
    }

    /// Decides one call. The wrapping machinery applies the decorator
    /// immediately on `DecoratedTarget`, returns a configured decorator on
    /// `NormalArg`, and converts `Ambiguous` into a caller-facing error.
    pub fn resolve_call(
        &self,
        arena: &ValueArena,
        args: &CallArguments,
    ) -> Result<Verdict, DisambigError> {
        let ctx = CallContext::new(&self.decorator, &self.sig, args, arena);
        let verdict = rules::disambiguate(&ctx, |first| self.last_resort.resolve(arena, first))?;
        debug!(
            decorator = self.decorator.as_str(),
            ?verdict,
            "resolved decorator call"
        );
        Ok(verdict)
    }
}
