//! Corridor routing and doorway constants.

/// Default corridor width in tiles
pub const CORRIDOR_DEFAULT_WIDTH: i32 = 1;
/// Probability that a corridor is L-shaped rather than a straight line
pub const CORRIDOR_L_SHAPE_CHANCE: f64 = 0.8;

/// Probability that a confirmed doorway gets a physical door
pub const DOOR_CHANCE: f64 = 0.4;
/// ChaCha stream used by the door pass, kept apart from the layout stream
pub const DOOR_RNG_STREAM: u64 = 0xD00D;
