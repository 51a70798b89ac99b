//! Decorator call-site disambiguation engine.
//!
//! A decorator's configuration function receiving a single argument cannot
//! always tell whether it was invoked as `@deco` (the argument is the thing
//! being decorated) or as `@deco(x)` (the argument is configuration and the
//! target arrives in a later call). This crate decides: a chain of cheap
//! elimination rules over argument counts, defaults and target plausibility,
//! then static policy, then — optionally — best-effort inspection of the
//! call-site source line.
//!
//! ```
//! use atcall_common::ValueArena;
//! use atcall_engine::{DecoratorPolicy, Disambiguator, TargetFlags, Verdict};
//! use atcall_sig::{CallArguments, Param, ParamKind, SigInfo, Signature};
//!
//! let mut arena = ValueArena::new();
//! let sig = SigInfo::new(
//!     Signature::new(vec![Param::new("func", ParamKind::PositionalOrKeyword)]).unwrap(),
//! )
//! .unwrap();
//! let deco = Disambiguator::new("mydeco", sig, DecoratorPolicy::new(TargetFlags::FUNCTION));
//!
//! // @mydeco applied bare: the single argument is the target itself.
//! let target = arena.alloc_function("payload");
//! let args = CallArguments::new().kwarg("func", target);
//! assert_eq!(deco.resolve_call(&arena, &args).unwrap(), Verdict::DecoratedTarget);
//!
//! // @mydeco(42): an integer can never be decorated.
//! let n = arena.alloc_int(42);
//! let args = CallArguments::new().kwarg("func", n);
//! assert_eq!(deco.resolve_call(&arena, &args).unwrap(), Verdict::NormalArg);
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod policy;
pub mod rules;
pub mod site;
pub mod verdict;

pub use context::CallContext;
pub use engine::Disambiguator;
pub use error::DisambigError;
pub use policy::{AmbiguityHint, CustomDisambiguator, DecoratorPolicy, LastResort, TargetFlags};
pub use rules::disambiguate;
pub use site::{FrameInfo, SiteError, SiteInspector, SourceSiteInspector, StackProvider};
pub use verdict::Verdict;
