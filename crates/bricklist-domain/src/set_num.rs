//! Set identifier with canonical and plain forms

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for one catalog set.
///
/// The canonical form carries a variant suffix (`10305-1`); user input often
/// arrives in the plain form without it (`10305`). The identifier is the join
/// key across every membership structure and never changes once assigned.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetNum(String);

impl SetNum {
    pub fn new(raw: impl Into<String>) -> Self {
        SetNum(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the variant dash: `10305-1` -> `10305`.
    pub fn plain(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Case-insensitive match against the canonical or plain form.
    pub fn matches(&self, input: &str) -> bool {
        let input = input.trim();
        if input.is_empty() {
            return false;
        }
        self.0.eq_ignore_ascii_case(input) || self.plain().eq_ignore_ascii_case(input)
    }
}

impl fmt::Display for SetNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SetNum {
    fn from(s: &str) -> Self {
        SetNum::new(s)
    }
}

impl From<String> for SetNum {
    fn from(s: String) -> Self {
        SetNum::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_strips_variant_suffix() {
        assert_eq!(SetNum::new("10305-1").plain(), "10305");
        assert_eq!(SetNum::new("10305").plain(), "10305");
    }

    #[test]
    fn test_matches_canonical_and_plain() {
        let sn = SetNum::new("10305-1");
        assert!(sn.matches("10305-1"));
        assert!(sn.matches("10305"));
        assert!(sn.matches(" 10305 "));
        assert!(!sn.matches("10306"));
        assert!(!sn.matches(""));
    }

    #[test]
    fn test_new_trims_whitespace() {
        assert_eq!(SetNum::new("  10305-1 ").as_str(), "10305-1");
    }

    #[test]
    fn test_serde_transparent() {
        let sn = SetNum::new("21318-1");
        let json = serde_json::to_string(&sn).unwrap();
        assert_eq!(json, "\"21318-1\"");
        let back: SetNum = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sn);
    }
}
