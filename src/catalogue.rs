//! Duplicate-ownership catalogue.
//!
//! Tracks how many copies of each Rare character the player owns, which
//! sizes the stardust reward when a duplicate is drawn on a Primary pool.
//! Copies two through six still advance the character's upgrade track and
//! pay the partial amount; from the seventh copy on the track is maxed and
//! duplicates pay the full conversion amount.

use crate::banner::{Item, PoolType};
use crate::constants::{
    STARDUST_DUPLICATE_COMPLETE, STARDUST_DUPLICATE_PARTIAL, STARDUST_DUPLICATE_SECONDARY,
    STARDUST_STANDARD_RARE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whether the ownership table is rebuilt for every trial or accumulates
/// across the whole batch.
///
/// `PerTrial` keeps trials statistically independent and is the default.
/// `SharedAcrossTrials` reproduces the behavior of letting one table live
/// for the whole run: later trials see the copies earlier trials pulled
/// and earn more stardust than they should.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogueMode {
    PerTrial,
    SharedAcrossTrials,
}

/// Item name -> owned copies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    owned: HashMap<String, u32>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalogue pre-populated with the player's existing roster.
    pub fn seeded(rows: &HashMap<String, u32>) -> Self {
        Self {
            owned: rows.clone(),
        }
    }

    pub fn owned_copies(&self, name: &str) -> Option<u32> {
        self.owned.get(name).copied()
    }

    /// Record a Rare award and return the stardust it converts to.
    ///
    /// Secondary-pool awards pay a flat amount and are not tracked.
    /// Primary-pool awards consult the table: the first copy of an unowned
    /// character pays nothing, copies drawn while the upgrade track is
    /// unfinished (owned count 1-5) pay the partial amount, and copies
    /// past a finished track (owned count 6+) pay the complete amount.
    /// The standard Rare sentinel always pays its fixed amount.
    pub fn record_award(&mut self, pool_type: PoolType, item: &Item) -> u32 {
        if pool_type == PoolType::Secondary {
            return STARDUST_DUPLICATE_SECONDARY;
        }

        if let Some(copies) = self.owned.get_mut(&item.name) {
            let existing = *copies;
            *copies += 1;
            return match existing {
                0 => 0,
                1..=5 => STARDUST_DUPLICATE_PARTIAL,
                _ => STARDUST_DUPLICATE_COMPLETE,
            };
        }

        if item.is_standard() {
            return STARDUST_STANDARD_RARE;
        }

        self.owned.insert(item.name.clone(), 1);
        0
    }
}
