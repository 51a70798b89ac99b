//! Signature model and argument binder.
//!
//! This crate models the declared parameter list of a decorator's
//! configuration function the way CPython's `inspect` module sees it, and
//! binds one call's positional/keyword arguments against it. The engine
//! crate consumes two capabilities from here:
//!
//! - [`SigInfo`] — normalized metadata about the first declared parameter
//!   (kind, default, mandatoriness), plus the ordered parameter list.
//! - [`bind`] — match actual arguments to parameters, apply defaults, and
//!   expose the result by name in declaration order.
//!
//! Binding errors carry CPython-style `TypeError` messages so a hosting
//! runtime can surface them verbatim.

pub mod bind;
pub mod info;
pub mod params;

pub use bind::{BindError, BoundArguments, CallArguments, bind};
pub use info::SigInfo;
pub use params::{Param, ParamKind, Signature, SignatureError};
