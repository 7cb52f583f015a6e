use super::types::{Item, PoolType, PullOutcome, Rarity};
use crate::catalogue::Catalogue;
use crate::constants::RARE_HARD_PITY;
use rand::Rng;

/// One configured reward table plus its pity/guarantee state.
///
/// The probability space of a pull is partitioned into three bands: the
/// Epic band (base rate plus soft-pity escalation), the Rare band directly
/// above it, and the Common remainder. Hard-pity caps are checked before
/// the rolled value so a capped draw can never be lost to rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub pool_type: PoolType,
    pub featured_epic: Item,
    pub featured_rares: Vec<Item>,
    pub pity: u32,
    pub rare_pity: u32,
    pub guaranteed_epic: bool,
    pub guaranteed_rare: bool,
}

impl Banner {
    /// A banner with fresh pity state. `featured_rares` must be non-empty.
    pub fn new(pool_type: PoolType, featured_epic: Item, featured_rares: Vec<Item>) -> Self {
        Self::with_state(pool_type, featured_epic, featured_rares, 0, 0, false, false)
    }

    /// A banner representing a player mid-way through a pity cycle.
    #[allow(clippy::too_many_arguments)]
    pub fn with_state(
        pool_type: PoolType,
        featured_epic: Item,
        featured_rares: Vec<Item>,
        pity: u32,
        rare_pity: u32,
        guaranteed_epic: bool,
        guaranteed_rare: bool,
    ) -> Self {
        Self {
            pool_type,
            featured_epic,
            featured_rares,
            pity,
            rare_pity,
            guaranteed_epic,
            guaranteed_rare,
        }
    }

    /// Adopt another banner's pity counters and guarantee flags. Used when
    /// two banners in a campaign share a pity pool.
    pub fn carry_state_from(&mut self, other: &Banner) {
        self.pity = other.pity;
        self.rare_pity = other.rare_pity;
        self.guaranteed_epic = other.guaranteed_epic;
        self.guaranteed_rare = other.guaranteed_rare;
    }

    /// Execute one pull. Returns the outcome and any stardust earned from
    /// a duplicate Rare award.
    pub fn pull<R: Rng>(&mut self, catalogue: &mut Catalogue, rng: &mut R) -> (PullOutcome, u32) {
        self.pity += 1;
        self.rare_pity += 1;

        let roll: f64 = rng.gen();

        let mut epic_rate = self.pool_type.epic_base_rate();
        let soft_start = self.pool_type.soft_pity_start();
        if self.pity >= soft_start {
            // Linear ramp from the soft-pity threshold up to the hard cap.
            let steps = self.pity - soft_start + 1;
            epic_rate += steps as f64 * self.pool_type.soft_pity_step();
        }

        if self.pity == self.pool_type.hard_pity() || roll <= epic_rate {
            return (self.resolve_epic(rng), 0);
        }

        let rare_band_end = epic_rate + self.pool_type.rare_base_rate();
        if self.rare_pity == RARE_HARD_PITY || (roll > epic_rate && roll <= rare_band_end) {
            return self.resolve_rare(catalogue, rng);
        }

        let outcome = PullOutcome {
            item: Item::common(),
            pity: self.pity,
            rare_pity: self.rare_pity,
            guarantee: None,
        };
        (outcome, 0)
    }

    fn resolve_epic<R: Rng>(&mut self, rng: &mut R) -> PullOutcome {
        let tiebreak: f64 = rng.gen();
        let won = self.guaranteed_epic || tiebreak <= self.pool_type.featured_ratio();
        let item = if won {
            self.featured_epic.clone()
        } else {
            Item::standard(Rarity::Epic)
        };
        let outcome = PullOutcome {
            item,
            pity: self.pity,
            rare_pity: self.rare_pity,
            guarantee: Some(self.guaranteed_epic),
        };
        // Losing the tie-break arms the guarantee; any Epic award clears it.
        self.guaranteed_epic = !won;
        self.pity = 0;
        outcome
    }

    fn resolve_rare<R: Rng>(&mut self, catalogue: &mut Catalogue, rng: &mut R) -> (PullOutcome, u32) {
        let tiebreak: f64 = rng.gen();
        let won = self.guaranteed_rare || tiebreak <= self.pool_type.featured_ratio();
        let (item, stardust) = if won {
            let pick = self.featured_rares[rng.gen_range(0..self.featured_rares.len())].clone();
            let stardust = catalogue.record_award(self.pool_type, &pick);
            (pick, stardust)
        } else {
            (Item::standard(Rarity::Rare), 0)
        };
        let outcome = PullOutcome {
            item,
            pity: self.pity,
            rare_pity: self.rare_pity,
            guarantee: Some(self.guaranteed_rare),
        };
        self.guaranteed_rare = !won;
        self.rare_pity = 0;
        (outcome, stardust)
    }
}
