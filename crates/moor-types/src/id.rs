use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of a collection: a named grouping of assets on the ledger.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CollectionId(pub u64);

/// Identifier of a single asset instance within a collection.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct InstanceId(pub u64);

macro_rules! id_impls {
    ($name:ident) => {
        impl $name {
            /// The raw numeric id.
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(v: u64) -> Self {
                Self(v)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            /// Parses a decimal id. Grouping commas (as produced by some
            /// ledger front-ends when rendering large numbers) are accepted
            /// and stripped.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let cleaned: String = s.chars().filter(|c| *c != ',').collect();
                cleaned
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| TypeError::InvalidId(s.to_string()))
            }
        }
    };
}

id_impls!(CollectionId);
id_impls!(InstanceId);
