//! Best-effort call-site source inspection.
//!
//! A host that can see its own call stack (an interpreter, a tracing
//! runtime) exposes frames through [`StackProvider`]; the engine reads one
//! line of source text and looks for the decoration marker. This is the
//! expensive last resort of the whole engine: a complete static-policy path
//! exists with inspection disabled, and nothing here is ever guaranteed —
//! every ordinary failure degrades to "inconclusive".

use atcall_common::{ValueArena, ValueId, limits};
use std::fmt;
use tracing::{debug, trace};

use crate::verdict::Verdict;

/// One frame of the host's call stack, as the host sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameInfo {
    /// Source file of the frame. Pseudo-files (`<stdin>`, `<ipython-...>`)
    /// are angle-bracketed, as in CPython.
    pub filename: String,
    pub lineno: u32,
    /// The frame's current source line, if the host can retrieve it.
    pub code_line: Option<String>,
}

/// Host capability: expose the active call stack. Depth 0 is the exposed
/// decorator entry point; greater depths walk toward the original call site.
pub trait StackProvider {
    fn frame(&self, depth: usize) -> Option<FrameInfo>;
}

/// Inspection failures that cannot degrade to "inconclusive".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SiteError {
    /// The decoration site lives in a pseudo-file with no retrievable
    /// source (interactive shell, `eval`). No static workaround exists in
    /// that execution context, so this fails loudly instead of guessing.
    NoSourceContext { filename: String },
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::NoSourceContext { filename } => {
                write!(f, "no retrievable source for call-site frame '{filename}'")
            }
        }
    }
}

impl std::error::Error for SiteError {}

/// Pluggable syntactic signal about the call site.
///
/// `Ok(None)` means "inconclusive": the caller falls through to static
/// policy unchanged.
pub trait SiteInspector {
    fn inspect(
        &self,
        decorator: &str,
        arena: &ValueArena,
        value: ValueId,
    ) -> Result<Option<Verdict>, SiteError>;
}

/// Reads the decoration line through a [`StackProvider`] and classifies it.
///
/// The frame depth at which the decoration site sits depends on how many
/// layers of wrapping the host puts between the user's `@deco` line and the
/// engine; it is a constructor parameter rather than a hardcoded offset.
pub struct SourceSiteInspector<P> {
    provider: P,
    frame_depth: usize,
}

impl<P: StackProvider> SourceSiteInspector<P> {
    pub fn new(provider: P) -> Self {
        SourceSiteInspector {
            provider,
            frame_depth: limits::DEFAULT_SITE_FRAME_DEPTH,
        }
    }

    pub fn with_frame_depth(provider: P, frame_depth: usize) -> Self {
        SourceSiteInspector {
            provider,
            frame_depth,
        }
    }

    pub fn frame_depth(&self) -> usize {
        self.frame_depth
    }
}

impl<P: StackProvider> SiteInspector for SourceSiteInspector<P> {
    fn inspect(
        &self,
        decorator: &str,
        arena: &ValueArena,
        value: ValueId,
    ) -> Result<Option<Verdict>, SiteError> {
        // Source text at the decoration site is unreliable for classes:
        // skip entirely rather than misread.
        if arena.kind(value).is_class() {
            trace!(decorator, "value is a class: skipping site inspection");
            return Ok(None);
        }

        let Some(frame) = self.provider.frame(self.frame_depth) else {
            trace!(
                decorator,
                depth = self.frame_depth,
                "stack too shallow: site inspection inconclusive"
            );
            return Ok(None);
        };

        if frame.filename.starts_with('<') {
            return Err(SiteError::NoSourceContext {
                filename: frame.filename,
            });
        }

        let Some(line) = frame.code_line else {
            trace!(
                decorator,
                file = frame.filename.as_str(),
                "no source line available: site inspection inconclusive"
            );
            return Ok(None);
        };

        let verdict = classify_line(&line);
        debug!(
            decorator,
            file = frame.filename.as_str(),
            lineno = frame.lineno,
            ?verdict,
            "classified decoration line"
        );
        Ok(Some(verdict))
    }
}

/// Classifies one trimmed source line.
///
/// A line starting with `@` and containing no `(` can only be a bare
/// decoration. A `@` with a `(` is a with-parenthesis decoration. Anything
/// else is an ordinary call expression, which always passes its argument
/// normally. The decorator may be renamed at the call site, so only the
/// marker and the delimiter are checked, never the name.
fn classify_line(line: &str) -> Verdict {
    let line = line.trim_start();
    if line.starts_with('@') {
        if line.contains('(') {
            Verdict::NormalArg
        } else {
            Verdict::DecoratedTarget
        }
    } else {
        Verdict::NormalArg
    }
}
