//! Clearance tiers for action invocation
//!
//! Tiers are ordered: a caller proven at tier N may run any action that
//! requires tier N or lower. Known tiers leave gaps so new ones can slot in

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered security tier required by an action or held by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecurityLevel(u8);

impl SecurityLevel {
    /// No restriction
    pub const NONE: Self = Self(0);

    /// Basic proof of possession (HOTP or TOTP code)
    pub const ONE_TIME_CODE: Self = Self(1);

    /// Strong credential (public/private key pair)
    pub const KEY_PAIR: Self = Self(2);

    /// Only the local machine may run it
    pub const LOCAL_ONLY: Self = Self(10);

    /// Create a tier from its raw value
    #[must_use]
    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    /// Raw tier value
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether a holder of this tier satisfies `required`
    #[must_use]
    pub const fn satisfies(self, required: Self) -> bool {
        self.0 >= required.0
    }

    /// Name of the tier, if it is one of the known ones
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("none"),
            1 => Some("one_time_code"),
            2 => Some("key_pair"),
            10 => Some("local_only"),
            _ => None,
        }
    }
}

impl From<u8> for SecurityLevel {
    fn from(level: u8) -> Self {
        Self(level)
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tiers_are_ordered() {
        assert!(SecurityLevel::NONE < SecurityLevel::ONE_TIME_CODE);
        assert!(SecurityLevel::ONE_TIME_CODE < SecurityLevel::KEY_PAIR);
        assert!(SecurityLevel::KEY_PAIR < SecurityLevel::LOCAL_ONLY);
    }

    #[test]
    fn higher_clearance_subsumes_lower() {
        let required = SecurityLevel::KEY_PAIR;
        assert!(!SecurityLevel::ONE_TIME_CODE.satisfies(required));
        for level in 2..=u8::MAX {
            assert!(SecurityLevel::new(level).satisfies(required), "level {level}");
        }
    }

    #[test]
    fn names_only_for_known_tiers() {
        assert_eq!(SecurityLevel::LOCAL_ONLY.name(), Some("local_only"));
        assert_eq!(SecurityLevel::new(5).name(), None);
    }

    #[test]
    fn deserializes_from_integer() {
        let level: SecurityLevel = serde_json::from_str("10").unwrap();
        assert_eq!(level, SecurityLevel::LOCAL_ONLY);
    }
}
