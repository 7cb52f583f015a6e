//! Banner pull engine: rarity bands, pity escalation, guarantee flags.

mod logic;
mod types;

pub use logic::Banner;
pub use types::{Item, PoolType, PullOutcome, Rarity};
