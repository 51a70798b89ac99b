//! Static policy captured once per decorator definition.

use atcall_common::{ValueArena, ValueId};
use bitflags::bitflags;
use std::fmt;
use tracing::debug;

use crate::error::DisambigError;
use crate::site::{SiteError, SiteInspector};
use crate::verdict::Verdict;

bitflags! {
    /// What the decorator implementation accepts as its target.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct TargetFlags: u8 {
        /// The implementation can decorate plain callables.
        const FUNCTION = 1 << 0;
        /// The implementation can decorate classes.
        const CLASS = 1 << 1;
    }
}

/// Defining-layer override for "can the first argument be ambiguous".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AmbiguityHint {
    /// No position taken; fall through to the mandatory-ness default.
    #[default]
    Unset,
    /// Treat the irreducible case as genuinely ambiguous and let the
    /// boundary fail it.
    ForceAmbiguous,
    /// Assume the irreducible case is the decorated target.
    ForceTarget,
}

/// User-supplied disambiguator for the irreducible case. Its verdict is
/// returned unchanged, never second-guessed.
pub type CustomDisambiguator = Box<dyn Fn(&ValueArena, ValueId) -> Verdict>;

/// The declared policy flags of one decorator definition.
pub struct DecoratorPolicy {
    pub(crate) targets: TargetFlags,
    pub(crate) hint: AmbiguityHint,
    pub(crate) custom: Option<CustomDisambiguator>,
    pub(crate) inspector: Option<Box<dyn SiteInspector>>,
}

impl DecoratorPolicy {
    pub fn new(targets: TargetFlags) -> Self {
        DecoratorPolicy {
            targets,
            hint: AmbiguityHint::Unset,
            custom: None,
            inspector: None,
        }
    }

    pub fn with_hint(mut self, hint: AmbiguityHint) -> Self {
        self.hint = hint;
        self
    }

    pub fn with_custom(
        mut self,
        custom: impl Fn(&ValueArena, ValueId) -> Verdict + 'static,
    ) -> Self {
        self.custom = Some(Box::new(custom));
        self
    }

    /// Installing an inspector is what "introspection enabled" means.
    pub fn with_inspector(mut self, inspector: impl SiteInspector + 'static) -> Self {
        self.inspector = Some(Box::new(inspector));
        self
    }

    pub fn targets(&self) -> TargetFlags {
        self.targets
    }

    pub fn hint(&self) -> AmbiguityHint {
        self.hint
    }
}

impl fmt::Debug for DecoratorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratorPolicy")
            .field("targets", &self.targets)
            .field("hint", &self.hint)
            .field("custom", &self.custom.is_some())
            .field("inspector", &self.inspector.is_some())
            .finish()
    }
}

/// Resolver for the single remaining truly ambiguous case: the first
/// parameter is the sole non-default argument and is itself a plausible
/// decoration target.
///
/// Constructed once per decorator definition, read-only afterwards.
#[derive(Debug)]
pub struct LastResort {
    decorator: String,
    policy: DecoratorPolicy,
    first_arg_mandatory: bool,
}

impl LastResort {
    pub fn new(
        decorator: impl Into<String>,
        policy: DecoratorPolicy,
        first_arg_mandatory: bool,
    ) -> Self {
        LastResort {
            decorator: decorator.into(),
            policy,
            first_arg_mandatory,
        }
    }

    pub fn resolve(&self, arena: &ValueArena, value: ValueId) -> Result<Verdict, DisambigError> {
        // (1) Call-site inspection wins whenever it is definitive.
        if let Some(inspector) = &self.policy.inspector {
            match inspector.inspect(&self.decorator, arena, value) {
                Ok(Some(verdict)) => {
                    debug!(
                        decorator = self.decorator.as_str(),
                        ?verdict,
                        "call-site inspection is definitive"
                    );
                    return Ok(verdict);
                }
                Ok(None) => {}
                Err(SiteError::NoSourceContext { .. }) => {
                    return Err(DisambigError::Unresolvable {
                        decorator: self.decorator.clone(),
                        value_repr: arena.repr(value),
                    });
                }
            }
        }

        // (2)/(3) Capability elimination: a value the implementation cannot
        // decorate has to be configuration.
        let kind = arena.kind(value);
        if kind.is_callable()
            && !kind.is_class()
            && !self.policy.targets.contains(TargetFlags::FUNCTION)
        {
            debug!(
                decorator = self.decorator.as_str(),
                "implementation does not decorate callables: with-parenthesis call"
            );
            return Ok(Verdict::NormalArg);
        }
        if kind.is_class() && !self.policy.targets.contains(TargetFlags::CLASS) {
            debug!(
                decorator = self.decorator.as_str(),
                "implementation does not decorate classes: with-parenthesis call"
            );
            return Ok(Verdict::NormalArg);
        }

        // (4) A custom disambiguator is trusted unmodified.
        if let Some(custom) = &self.policy.custom {
            return Ok(custom(arena, value));
        }

        // (5) Explicit override.
        match self.policy.hint {
            AmbiguityHint::ForceAmbiguous => return Ok(Verdict::Ambiguous),
            AmbiguityHint::ForceTarget => return Ok(Verdict::DecoratedTarget),
            AmbiguityHint::Unset => {}
        }

        // (6) Default position. A mandatory first parameter makes the
        // no-parenthesis reading safe: a target-less call fails later with a
        // clear missing-argument error. An optional-only first parameter
        // must have been given an explicit policy by the defining layer.
        if self.first_arg_mandatory {
            Ok(Verdict::DecoratedTarget)
        } else {
            Err(DisambigError::internal(format!(
                "decorator '{}' has an optional first parameter but no ambiguity policy or \
                 custom disambiguator",
                self.decorator
            )))
        }
    }
}
