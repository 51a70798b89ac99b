//! Shared vocabulary for the atcall decorator call-site disambiguation engine.
//!
//! This crate holds the types every other `atcall` crate speaks in: the
//! arena-interned value model (`ValueId`, `ValueKind`, `ValueArena`) and the
//! centralized tunable limits. It has no knowledge of signatures or of the
//! disambiguation rules themselves.

pub mod limits;
pub mod value;

pub use value::{ValueArena, ValueId, ValueKind};
