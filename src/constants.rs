// Primary (character) pool rates
pub const PRIMARY_EPIC_BASE_RATE: f64 = 0.006;
pub const PRIMARY_RARE_BASE_RATE: f64 = 0.051;
pub const PRIMARY_HARD_PITY: u32 = 90;
pub const PRIMARY_SOFT_PITY_START: u32 = 74;
pub const PRIMARY_SOFT_PITY_STEP: f64 = 0.06;
pub const PRIMARY_FEATURED_RATIO: f64 = 0.5;

// Secondary (equipment) pool rates
pub const SECONDARY_EPIC_BASE_RATE: f64 = 0.008;
pub const SECONDARY_RARE_BASE_RATE: f64 = 0.066;
pub const SECONDARY_HARD_PITY: u32 = 80;
pub const SECONDARY_SOFT_PITY_START: u32 = 63;
pub const SECONDARY_SOFT_PITY_STEP: f64 = 0.067;
pub const SECONDARY_FEATURED_RATIO: f64 = 0.75;

// Rare pity cap, shared by both pool types
pub const RARE_HARD_PITY: u32 = 10;

// Stardust economy
pub const STARDUST_STARTING_BALANCE: u32 = 16;
pub const STARDUST_PASS_COST: u32 = 20;
pub const STARDUST_DUPLICATE_PARTIAL: u32 = 8;
pub const STARDUST_DUPLICATE_COMPLETE: u32 = 20;
pub const STARDUST_DUPLICATE_SECONDARY: u32 = 8;
pub const STARDUST_STANDARD_RARE: u32 = 8;

// Sentinel item names
pub const STANDARD_ITEM_NAME: &str = "Standard";
pub const COMMON_ITEM_NAME: &str = "Common Relic";

// Simulation defaults
pub const DEFAULT_TRIAL_COUNT: u32 = 100_000;
pub const DEFAULT_PULL_BUDGET: u32 = 102;
