//! Per-call context with one-shot memoized derived state.

use atcall_common::{ValueArena, ValueId};
use atcall_sig::{BoundArguments, CallArguments, SigInfo, bind};
use once_cell::unsync::OnceCell;

use crate::error::DisambigError;

/// Everything known about one decorator invocation.
///
/// Created once per call, consumed synchronously by the rule chain, then
/// dropped. The two derived pieces — the bound-arguments mapping and the
/// first argument's value — are computed at most once and stable thereafter;
/// unsync cells keep the context single-threaded by construction, which is
/// the only synchronization the engine needs.
pub struct CallContext<'a> {
    decorator: &'a str,
    sig: &'a SigInfo,
    args: &'a CallArguments,
    arena: &'a ValueArena,
    bound: OnceCell<BoundArguments>,
    first_arg: OnceCell<ValueId>,
}

impl<'a> CallContext<'a> {
    pub fn new(
        decorator: &'a str,
        sig: &'a SigInfo,
        args: &'a CallArguments,
        arena: &'a ValueArena,
    ) -> Self {
        CallContext {
            decorator,
            sig,
            args,
            arena,
            bound: OnceCell::new(),
            first_arg: OnceCell::new(),
        }
    }

    pub fn decorator(&self) -> &str {
        self.decorator
    }

    pub fn sig(&self) -> &SigInfo {
        self.sig
    }

    pub fn args(&self) -> &CallArguments {
        self.args
    }

    pub fn arena(&self) -> &ValueArena {
        self.arena
    }

    /// Full name→value mapping, bound on first use.
    pub fn bound(&self) -> Result<&BoundArguments, DisambigError> {
        self.bound
            .get_or_try_init(|| bind(self.sig.signature(), self.decorator, self.args))
            .map_err(DisambigError::from)
    }

    /// The first declared parameter's value, memoized. Falls back to the
    /// binder unless the value was primed from a positional argument.
    pub fn first_arg(&self) -> Result<ValueId, DisambigError> {
        if let Some(&value) = self.first_arg.get() {
            return Ok(value);
        }
        let name = self.sig.first_arg_name();
        let value = self.bound()?.get(name).ok_or_else(|| {
            DisambigError::internal(format!(
                "first parameter '{name}' missing from bound arguments"
            ))
        })?;
        Ok(*self.first_arg.get_or_init(|| value))
    }

    /// Seeds the first-argument cell when the value is already known
    /// positionally, skipping the binder. No effect once computed.
    pub fn prime_first_arg(&self, value: ValueId) {
        let _ = self.first_arg.set(value);
    }
}
