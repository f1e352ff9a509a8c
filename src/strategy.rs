//! Allocation strategy tags
//!
//! Three classic strategies are modeled. `Linked` and `Indexed` share the
//! same scattered search: the simulation records "indexed" as a label on the
//! file only and builds no separate index-block structure.

use crate::error::AllocError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Allocation strategy selecting the block search policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Leftmost first-fit run of consecutive free blocks
    Contiguous,
    /// Free blocks collected in ascending index order, chained via `next`
    Linked,
    /// Same search as `Linked`; only the label differs
    Indexed,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Contiguous => "contiguous",
            Strategy::Linked => "linked",
            Strategy::Indexed => "indexed",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = AllocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contiguous" => Ok(Strategy::Contiguous),
            "linked" => Ok(Strategy::Linked),
            "indexed" => Ok(Strategy::Indexed),
            other => Err(AllocError::InvalidStrategy(other.to_string())),
        }
    }
}
