//! The elimination-rule chain.
//!
//! Cheap structural checks — argument counts, defaults, target plausibility —
//! resolve the overwhelming majority of calls without ever looking at
//! call-site source. Only the irreducible case (the first parameter is the
//! sole non-default argument and could itself be decorated) reaches the
//! fallback.

use atcall_common::ValueId;
use tracing::debug;

use crate::context::CallContext;
use crate::error::DisambigError;
use crate::verdict::Verdict;

/// Runs the rule chain over one call; `fallback` handles the irreducible
/// ambiguity (see [`LastResort`](crate::LastResort)).
pub fn disambiguate<F>(ctx: &CallContext<'_>, fallback: F) -> Result<Verdict, DisambigError>
where
    F: FnOnce(ValueId) -> Result<Verdict, DisambigError>,
{
    let sig = ctx.sig();
    let n_pos = ctx.args().num_positional();

    // (1) Positional counts decide when the first parameter can only arrive
    // positionally. Keyword counts never decide anything: the exposed layer
    // passes every keyword-capable argument by name on every call.
    if sig.is_first_arg_var_positional() || sig.is_first_arg_positional_only() {
        if n_pos == 0 {
            debug!(
                decorator = ctx.decorator(),
                "no positional arguments: with-parenthesis call"
            );
            return Ok(Verdict::NormalArg);
        }
        if n_pos >= 2 {
            debug!(
                decorator = ctx.decorator(),
                n_pos, "several positional arguments: with-parenthesis call"
            );
            return Ok(Verdict::NormalArg);
        }
        // Exactly one positional argument: still ambiguous, but its value is
        // known without invoking the binder.
        ctx.prime_first_arg(ctx.args().positional()[0]);
    } else if n_pos > 0 {
        return Err(DisambigError::internal(format!(
            "keyword-capable first parameter '{}' received {} positional argument(s)",
            sig.first_arg_name(),
            n_pos,
        )));
    }

    // (2) Value-based elimination.
    let first = ctx.first_arg()?;
    if !ctx.arena().kind(first).can_be_decoration_target() {
        debug!(
            decorator = ctx.decorator(),
            "first argument cannot be decorated: with-parenthesis call"
        );
        return Ok(Verdict::NormalArg);
    }
    if sig.first_arg_default() == Some(first) {
        debug!(
            decorator = ctx.decorator(),
            "first argument left at its default: with-parenthesis call"
        );
        return Ok(Verdict::NormalArg);
    }
    // Any other parameter carrying a non-default value proves configuration.
    let bound = ctx.bound()?;
    for param in sig.signature().params().iter().skip(1) {
        if param.kind.is_variadic() {
            continue;
        }
        if bound.get(&param.name) != param.default {
            debug!(
                decorator = ctx.decorator(),
                param = param.name.as_str(),
                "non-default configuration argument: with-parenthesis call"
            );
            return Ok(Verdict::NormalArg);
        }
    }
    // Keywords swallowed by **kwargs are configuration too. (Positionals
    // swallowed by a leading *args are not: with exactly one received, that
    // one is the candidate target itself.)
    if !bound.extra_keywords().is_empty() {
        debug!(
            decorator = ctx.decorator(),
            "extra keyword arguments: with-parenthesis call"
        );
        return Ok(Verdict::NormalArg);
    }

    // (3) The genuinely hard case: sole non-default argument, plausible
    // decoration target.
    fallback(first)
}
