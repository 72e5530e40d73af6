//! Dungeon generation constants.

/// Default dungeon width
pub const DUNGEON_DEFAULT_WIDTH: i32 = 80;
/// Default dungeon height
pub const DUNGEON_DEFAULT_HEIGHT: i32 = 50;
/// Largest tile grid (width * height) a level may have
pub const DUNGEON_MAX_TILES: i64 = 1 << 24;
/// Default minimum size of a BSP leaf along either axis
pub const DUNGEON_DEFAULT_MIN_ROOM_SIZE: i32 = 8;
/// Default recursion bound for the partition tree
pub const DUNGEON_DEFAULT_MAX_DEPTH: u32 = 4;
/// Default split randomness (0 = always split in the middle)
pub const DUNGEON_DEFAULT_SPLIT_RANDOMNESS: f32 = 0.3;
/// Default margin between a leaf's edge and its room
pub const DUNGEON_DEFAULT_ROOM_PADDING: i32 = 1;

/// Seed value that asks the generator to draw a fresh random seed
pub const RANDOM_SEED: u64 = 0;

/// Aspect ratio above which a region is always split across its longer axis
pub const SPLIT_ASPECT_RATIO: f32 = 1.25;
/// Smallest fraction of a region given to either side of a split
pub const SPLIT_FRACTION_MIN: f32 = 0.4;
/// Largest fraction of a region given to either side of a split
pub const SPLIT_FRACTION_MAX: f32 = 0.6;
/// Upper bound accepted for split randomness
pub const SPLIT_RANDOMNESS_MAX: f32 = 1.0;

/// Smallest room (including its wall ring) along either axis
pub const ROOM_MIN_DIMENSION: i32 = 3;
/// Padding never exceeds this fraction (1/n) of a leaf's dimension
pub const ROOM_PADDING_DIVISOR: i32 = 4;

/// Chance that a non-entrance, non-exit room becomes a treasure room
pub const TREASURE_ROOM_CHANCE: f32 = 0.15;
/// Chance that a non-entrance, non-exit room becomes a shop
pub const SHOP_ROOM_CHANCE: f32 = 0.05;
/// Highest treasure level rolled for treasure rooms
pub const TREASURE_LEVEL_MAX: u32 = 3;
