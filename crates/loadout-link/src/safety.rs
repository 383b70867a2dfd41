//! Risk tiers for optimizations and the share filter built on them.
//!
//! The filter runs on both sides of the wire: the encoder drops unshareable
//! keys before they are written, and the decoder drops them again so a
//! hand-crafted code cannot smuggle one in. Keys with no tier are treated as
//! unshareable.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::OptimizationKey;

/// Risk classification of an optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Safe,
    Caution,
    Risky,
    /// Never carried by a shared link.
    Ludicrous,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Safe => "safe",
            Tier::Caution => "caution",
            Tier::Risky => "risky",
            Tier::Ludicrous => "ludicrous",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimization key -> tier.
#[derive(Debug, Clone, Default)]
pub struct TierMap {
    tiers: FxHashMap<OptimizationKey, Tier>,
}

impl TierMap {
    /// Builds a tier map. A repeated key keeps its last tier.
    pub fn new(entries: &[(OptimizationKey, Tier)]) -> Self {
        Self {
            tiers: entries.iter().copied().collect(),
        }
    }

    /// Tier of a key, if classified.
    #[inline]
    pub fn tier(&self, key: OptimizationKey) -> Option<Tier> {
        self.tiers.get(&key).copied()
    }

    /// Returns true if the key may appear in a shared link.
    #[inline]
    pub fn is_shareable(&self, key: OptimizationKey) -> bool {
        matches!(self.tier(key), Some(tier) if tier != Tier::Ludicrous)
    }

    /// Splits keys into the shareable ones, in order, and the blocked ones.
    pub fn retain_shareable<I>(&self, keys: I) -> (Vec<OptimizationKey>, Vec<OptimizationKey>)
    where
        I: IntoIterator<Item = OptimizationKey>,
    {
        keys.into_iter().partition(|key| self.is_shareable(*key))
    }
}
