//! Strongly-typed ID wrappers for all record types
//!
//! Ids are opaque strings. New ones are random UUIDs, but anything read back
//! from storage or a backup file is kept verbatim, so ids minted elsewhere
//! survive an import untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Wrap an existing opaque id
            pub fn from_raw(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// The full id string
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Short form used in listings
            pub fn short(&self) -> String {
                let head: String = self.0.chars().take(8).collect();
                format!("{}{}", $display_prefix, head)
            }

            /// Whether a user-typed id (full, short, or prefixed short) refers to this id
            pub fn matches_prefix(&self, typed: &str) -> bool {
                let typed = typed.trim();
                let typed = typed.strip_prefix($display_prefix).unwrap_or(typed);
                !typed.is_empty() && self.0.starts_with(typed)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }
    };
}

define_id!(ExpenseId, "exp-");
define_id!(IncomeId, "inc-");
define_id!(BalanceId, "acc-");
define_id!(ReserveId, "res-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        let a = ExpenseId::new();
        let b = ExpenseId::new();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_short_display() {
        let id = ReserveId::from_raw("550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(id.short(), "res-550e8400");
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn test_opaque_ids_round_trip() {
        let id = IncomeId::from_raw("legacy-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"legacy-42\"");
        let back: IncomeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_matches_prefix() {
        let id = BalanceId::from_raw("abcdef12-0000");
        assert!(id.matches_prefix("abc"));
        assert!(id.matches_prefix("acc-abcdef12"));
        assert!(!id.matches_prefix("abd"));
        assert!(!id.matches_prefix(""));
        assert!(!id.matches_prefix("acc-"));
    }
}
