//! First-parameter metadata over a validated signature.

use crate::params::{ParamKind, Signature, SignatureError};
use atcall_common::ValueId;

/// Normalized knowledge about a configuration function's declared signature,
/// centered on its first parameter.
///
/// The disambiguation rules only ever ask about the first parameter's kind,
/// default and mandatoriness; everything else goes through the ordered
/// parameter list.
#[derive(Clone, Debug, PartialEq)]
pub struct SigInfo {
    sig: Signature,
}

impl SigInfo {
    /// Rejects empty signatures: a configuration function with no parameters
    /// has nothing to disambiguate.
    pub fn new(sig: Signature) -> Result<Self, SignatureError> {
        if sig.is_empty() {
            return Err(SignatureError::Empty);
        }
        Ok(SigInfo { sig })
    }

    pub fn signature(&self) -> &Signature {
        &self.sig
    }

    fn first(&self) -> &crate::params::Param {
        &self.sig.params()[0]
    }

    pub fn first_arg_name(&self) -> &str {
        &self.first().name
    }

    pub fn first_arg_default(&self) -> Option<ValueId> {
        self.first().default
    }

    pub fn is_first_arg_positional_only(&self) -> bool {
        self.first().kind == ParamKind::PositionalOnly
    }

    pub fn is_first_arg_var_positional(&self) -> bool {
        self.first().kind == ParamKind::VarPositional
    }

    /// Whether the first parameter can arrive as a keyword. When it can, the
    /// exposed-signature layer is expected to pass it as one, so the engine
    /// must never see it positionally.
    pub fn is_first_arg_keyword_capable(&self) -> bool {
        self.first().kind.allows_keyword()
    }

    pub fn is_first_arg_mandatory(&self) -> bool {
        self.first().is_mandatory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Param;
    use atcall_common::ValueArena;

    #[test]
    fn test_empty_signature_rejected() {
        let sig = Signature::new(vec![]).unwrap();
        assert_eq!(SigInfo::new(sig).unwrap_err(), SignatureError::Empty);
    }

    #[test]
    fn test_first_arg_metadata() {
        let mut arena = ValueArena::new();
        let d = arena.alloc_none();
        let sig = Signature::new(vec![
            Param::new("func", ParamKind::PositionalOrKeyword).with_default(d),
            Param::new("level", ParamKind::KeywordOnly).with_default(d),
        ])
        .unwrap();
        let info = SigInfo::new(sig).unwrap();

        assert_eq!(info.first_arg_name(), "func");
        assert_eq!(info.first_arg_default(), Some(d));
        assert!(info.is_first_arg_keyword_capable());
        assert!(!info.is_first_arg_positional_only());
        assert!(!info.is_first_arg_var_positional());
        assert!(!info.is_first_arg_mandatory());
    }

    #[test]
    fn test_var_positional_first_is_never_mandatory() {
        let sig = Signature::new(vec![Param::new("args", ParamKind::VarPositional)]).unwrap();
        let info = SigInfo::new(sig).unwrap();
        assert!(info.is_first_arg_var_positional());
        assert!(!info.is_first_arg_mandatory());
        assert!(!info.is_first_arg_keyword_capable());
    }
}
