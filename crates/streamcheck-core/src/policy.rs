//! Strictness policy for a validation run.
//!
//! The policy is resolved once, before a [`Validator`](crate::Validator) is
//! built, and never changes afterwards. Judging harnesses conventionally pass
//! the flags as bare argv tokens, which [`Policy::from_args`] understands.

use serde::{Deserialize, Serialize};
use std::ffi::OsStr;

/// Argv token enabling case-sensitive literal comparison.
pub const CASE_SENSITIVE_FLAG: &str = "case_sensitive";

/// Argv token enabling whitespace-sensitive reading.
pub const SPACE_CHANGE_SENSITIVE_FLAG: &str = "space_change_sensitive";

/// The two independent strictness switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Policy {
    /// Compare literals exactly instead of ignoring ASCII case
    #[serde(default)]
    pub case_sensitive: bool,

    /// Match every whitespace byte explicitly instead of skipping runs
    #[serde(default)]
    pub whitespace_sensitive: bool,
}

impl Policy {
    /// Lenient for both whitespace and case.
    pub const fn lenient() -> Self {
        Self {
            case_sensitive: false,
            whitespace_sensitive: false,
        }
    }

    /// Strict for both whitespace and case. Used for `.in` and `.ans` files.
    pub const fn strict() -> Self {
        Self {
            case_sensitive: true,
            whitespace_sensitive: true,
        }
    }

    /// Resolve the policy from argv-style tokens.
    ///
    /// Tokens are matched exactly and may appear anywhere; anything else is
    /// ignored so harness-specific positional arguments pass through. Tokens
    /// need not be valid Unicode.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut policy = Self::lenient();
        for arg in args {
            let arg = arg.as_ref();
            if arg == OsStr::new(CASE_SENSITIVE_FLAG) {
                policy.case_sensitive = true;
            } else if arg == OsStr::new(SPACE_CHANGE_SENSITIVE_FLAG) {
                policy.whitespace_sensitive = true;
            }
        }
        policy
    }

    /// Combine two policies, keeping every switch either one enables.
    pub fn union(self, other: Self) -> Self {
        Self {
            case_sensitive: self.case_sensitive || other.case_sensitive,
            whitespace_sensitive: self.whitespace_sensitive || other.whitespace_sensitive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lenient() {
        assert_eq!(Policy::default(), Policy::lenient());
    }

    #[test]
    fn test_from_args_picks_up_flags_anywhere() {
        let policy = Policy::from_args(["validator", "data.in", "space_change_sensitive"]);
        assert!(policy.whitespace_sensitive);
        assert!(!policy.case_sensitive);

        let policy = Policy::from_args(["case_sensitive", "x", "space_change_sensitive"]);
        assert_eq!(policy, Policy::strict());
    }

    #[test]
    fn test_from_args_requires_exact_match() {
        let policy = Policy::from_args(["Case_Sensitive", "--space_change_sensitive"]);
        assert_eq!(policy, Policy::lenient());
    }

    #[cfg(unix)]
    #[test]
    fn test_from_args_tolerates_non_unicode_tokens() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let args = vec![
            OsString::from("validator"),
            OsString::from_vec(b"\xff.ans".to_vec()),
            OsString::from("case_sensitive"),
        ];
        let policy = Policy::from_args(&args);
        assert!(policy.case_sensitive);
        assert!(!policy.whitespace_sensitive);
    }

    #[test]
    fn test_union() {
        let a = Policy {
            case_sensitive: true,
            whitespace_sensitive: false,
        };
        let b = Policy {
            case_sensitive: false,
            whitespace_sensitive: true,
        };
        assert_eq!(a.union(b), Policy::strict());
        assert_eq!(Policy::lenient().union(Policy::lenient()), Policy::lenient());
    }
}
