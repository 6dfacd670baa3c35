//! Strongly-typed ID wrappers and id sources
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time. Fresh ids come from an [`IdGenerator`] so
//! callers decide between random and deterministic ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Id for an identifier from the browser app
            ///
            /// UUID strings are kept as they are. Anything else (such as a
            /// millisecond timestamp) maps to a name-based UUID, so the same
            /// legacy id always yields the same id.
            pub fn from_legacy(legacy: &str) -> Self {
                let legacy = legacy.trim();
                match Uuid::parse_str(legacy) {
                    Ok(uuid) => Self(uuid),
                    Err(_) => Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, legacy.as_bytes())),
                }
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short display form without the prefix, as shown in listings
            pub fn short(&self) -> String {
                self.0.to_string()[..8].to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.short())
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(CategoryId, "cat-");
define_id!(SavingsGoalId, "goal-");

/// Source of fresh, unique identifiers
pub trait IdGenerator {
    /// Produce the next identifier. Must never repeat within a session.
    fn next_uuid(&mut self) -> Uuid;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_uuid(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Monotonic counter ids
///
/// The counter lives in the high 32 bits so the short display form
/// (`txn-00000001`) stays readable and distinct.
#[derive(Debug, Default, Clone)]
pub struct SequentialIdGenerator {
    next: u32,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_uuid(&mut self) -> Uuid {
        self.next = self.next.wrapping_add(1);
        Uuid::from_u128((self.next as u128) << 96)
    }
}
