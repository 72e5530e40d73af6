//! Generation settings and their JSON loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::DungeonError;

/// Everything the generator needs to lay out one level.
///
/// Missing fields fall back to their defaults when deserialized, so a
/// settings file only has to name the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub width: i32,
    pub height: i32,
    /// Smallest leaf a split may produce along either axis
    pub min_room_size: i32,
    /// Recursion bound for the partition tree
    pub max_depth: u32,
    /// 0 always splits in the middle, larger values move the split point around
    pub split_randomness: f32,
    pub room_padding: i32,
    pub corridor_width: i32,
    /// [`RANDOM_SEED`] draws a fresh seed for every generation
    pub seed: u64,
    /// Value of `has_doors` on every generated corridor
    pub corridor_doors: bool,
    /// Mark entrance, exit, treasure and shop rooms after corridors are laid
    pub assign_room_types: bool,
    pub treasure_room_chance: f32,
    pub shop_room_chance: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            width: DUNGEON_DEFAULT_WIDTH,
            height: DUNGEON_DEFAULT_HEIGHT,
            min_room_size: DUNGEON_DEFAULT_MIN_ROOM_SIZE,
            max_depth: DUNGEON_DEFAULT_MAX_DEPTH,
            split_randomness: DUNGEON_DEFAULT_SPLIT_RANDOMNESS,
            room_padding: DUNGEON_DEFAULT_ROOM_PADDING,
            corridor_width: CORRIDOR_DEFAULT_WIDTH,
            seed: RANDOM_SEED,
            corridor_doors: true,
            assign_room_types: true,
            treasure_room_chance: TREASURE_ROOM_CHANCE,
            shop_room_chance: SHOP_ROOM_CHANCE,
        }
    }
}

impl GenerationSettings {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_min_room_size(mut self, min_room_size: i32) -> Self {
        self.min_room_size = min_room_size;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_corridor_width(mut self, corridor_width: i32) -> Self {
        self.corridor_width = corridor_width;
        self
    }

    pub fn with_room_padding(mut self, room_padding: i32) -> Self {
        self.room_padding = room_padding;
        self
    }

    pub fn with_split_randomness(mut self, split_randomness: f32) -> Self {
        self.split_randomness = split_randomness;
        self
    }

    /// Reject settings the generator cannot interpret.
    ///
    /// Settings that merely prevent splitting (a minimum room size larger
    /// than half the level, for instance) are valid and yield a single room.
    pub fn validate(&self) -> Result<(), DungeonError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(DungeonError::InvalidSettings(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if i64::from(self.width) * i64::from(self.height) > DUNGEON_MAX_TILES {
            return Err(DungeonError::InvalidSettings(format!(
                "{}x{} exceeds the limit of {} tiles",
                self.width, self.height, DUNGEON_MAX_TILES
            )));
        }
        if self.min_room_size < 1 {
            return Err(DungeonError::InvalidSettings(format!(
                "min_room_size must be at least 1, got {}",
                self.min_room_size
            )));
        }
        if self.corridor_width < 1 {
            return Err(DungeonError::InvalidSettings(format!(
                "corridor_width must be at least 1, got {}",
                self.corridor_width
            )));
        }
        if self.corridor_width > self.width.max(self.height) {
            return Err(DungeonError::InvalidSettings(format!(
                "corridor_width {} exceeds the level's longer side {}",
                self.corridor_width,
                self.width.max(self.height)
            )));
        }
        if self.room_padding < 0 {
            return Err(DungeonError::InvalidSettings(format!(
                "room_padding must not be negative, got {}",
                self.room_padding
            )));
        }
        if !self.split_randomness.is_finite()
            || !(0.0..=SPLIT_RANDOMNESS_MAX).contains(&self.split_randomness)
        {
            return Err(DungeonError::InvalidSettings(format!(
                "split_randomness must be within 0..={}, got {}",
                SPLIT_RANDOMNESS_MAX, self.split_randomness
            )));
        }
        for (name, chance) in [
            ("treasure_room_chance", self.treasure_room_chance),
            ("shop_room_chance", self.shop_room_chance),
        ] {
            if !chance.is_finite() || !(0.0..=1.0).contains(&chance) {
                return Err(DungeonError::InvalidSettings(format!(
                    "{} must be a probability, got {}",
                    name, chance
                )));
            }
        }
        if self.treasure_room_chance + self.shop_room_chance > 1.0 {
            return Err(DungeonError::InvalidSettings(
                "treasure_room_chance + shop_room_chance must not exceed 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, DungeonError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DungeonError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DungeonError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
