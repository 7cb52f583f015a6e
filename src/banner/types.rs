#![allow(dead_code)]
use crate::constants::{
    COMMON_ITEM_NAME, PRIMARY_EPIC_BASE_RATE, PRIMARY_FEATURED_RATIO, PRIMARY_HARD_PITY,
    PRIMARY_RARE_BASE_RATE, PRIMARY_SOFT_PITY_START, PRIMARY_SOFT_PITY_STEP,
    SECONDARY_EPIC_BASE_RATE, SECONDARY_FEATURED_RATIO, SECONDARY_HARD_PITY,
    SECONDARY_RARE_BASE_RATE, SECONDARY_SOFT_PITY_START, SECONDARY_SOFT_PITY_STEP,
    STANDARD_ITEM_NAME,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Rare = 1,
    Epic = 2,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
        }
    }
}

/// Which constant set applies to a banner: character pools and equipment
/// pools run on different rates, pity caps and tie-break ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolType {
    Primary,
    Secondary,
}

impl PoolType {
    /// Returns the display name for this pool type.
    pub fn name(&self) -> &'static str {
        match self {
            PoolType::Primary => "Primary",
            PoolType::Secondary => "Secondary",
        }
    }

    pub fn epic_base_rate(&self) -> f64 {
        match self {
            PoolType::Primary => PRIMARY_EPIC_BASE_RATE,
            PoolType::Secondary => SECONDARY_EPIC_BASE_RATE,
        }
    }

    pub fn rare_base_rate(&self) -> f64 {
        match self {
            PoolType::Primary => PRIMARY_RARE_BASE_RATE,
            PoolType::Secondary => SECONDARY_RARE_BASE_RATE,
        }
    }

    pub fn hard_pity(&self) -> u32 {
        match self {
            PoolType::Primary => PRIMARY_HARD_PITY,
            PoolType::Secondary => SECONDARY_HARD_PITY,
        }
    }

    pub fn soft_pity_start(&self) -> u32 {
        match self {
            PoolType::Primary => PRIMARY_SOFT_PITY_START,
            PoolType::Secondary => SECONDARY_SOFT_PITY_START,
        }
    }

    pub fn soft_pity_step(&self) -> f64 {
        match self {
            PoolType::Primary => PRIMARY_SOFT_PITY_STEP,
            PoolType::Secondary => SECONDARY_SOFT_PITY_STEP,
        }
    }

    /// Chance that an Epic or Rare award is the featured item rather than
    /// the standard one, when no guarantee is armed.
    pub fn featured_ratio(&self) -> f64 {
        match self {
            PoolType::Primary => PRIMARY_FEATURED_RATIO,
            PoolType::Secondary => SECONDARY_FEATURED_RATIO,
        }
    }
}

/// One entry in a banner's reward table. Identity is the name: the
/// standard-pool sentinels share the name "Standard" across rarities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub rarity: Rarity,
}

impl Item {
    pub fn new(name: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            name: name.into(),
            rarity,
        }
    }

    /// The non-featured ("standard pool") reward of the given rarity.
    pub fn standard(rarity: Rarity) -> Self {
        Self::new(STANDARD_ITEM_NAME, rarity)
    }

    /// The filler reward handed out when neither rarity band hits.
    pub fn common() -> Self {
        Self::new(COMMON_ITEM_NAME, Rarity::Common)
    }

    pub fn is_standard(&self) -> bool {
        self.name == STANDARD_ITEM_NAME
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rarity.name(), self.name)
    }
}

/// Immutable record of a single pull. Counters hold the values at the
/// moment of the draw, before any reset; `guarantee` holds the flag state
/// before the draw resolved it, and is `None` for Common awards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullOutcome {
    pub item: Item,
    pub pity: u32,
    pub rare_pity: u32,
    pub guarantee: Option<bool>,
}

impl fmt::Display for PullOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, pity {}", self.item, self.pity)?;
        if self.item.rarity == Rarity::Rare {
            write!(f, ", rare pity {}", self.rare_pity)?;
        }
        if let Some(guarantee) = self.guarantee {
            write!(f, ", guarantee {}", guarantee)?;
        }
        Ok(())
    }
}
