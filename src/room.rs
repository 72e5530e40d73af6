use serde::{Deserialize, Serialize};

use crate::constants::ROOM_MIN_DIMENSION;
use crate::error::DungeonError;
use crate::rect::Rect;
use crate::tile::TileType;

/// Semantic role of a room within a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RoomType {
    #[default]
    Normal,
    Entrance,
    Exit,
    Treasure,
    Shop,
    Boss,
    Secret,
    Challenge,
}

/// Tile stamped on a room's center cell for room types that mark their center.
/// Types absent from this table leave the center as plain floor.
const CENTER_TILES: &[(RoomType, TileType)] = &[
    (RoomType::Entrance, TileType::Entrance),
    (RoomType::Exit, TileType::Exit),
    (RoomType::Shop, TileType::Shop),
];

impl RoomType {
    /// Special tile for the center of a room of this type, if any
    pub fn center_tile(&self) -> Option<TileType> {
        CENTER_TILES
            .iter()
            .find(|(room_type, _)| room_type == self)
            .map(|(_, tile)| *tile)
    }
}

/// A rectangular playable area. The bounds include the room's wall ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    bounds: Rect,
    room_type: RoomType,
    is_discovered: bool,
    custom_properties: String,
    enemy_count: u32,
    is_cleared: bool,
    treasure_level: u32,
}

impl Room {
    /// Caller guarantees the bounds are at least `ROOM_MIN_DIMENSION` on each axis.
    pub(crate) fn new(bounds: Rect) -> Self {
        debug_assert!(bounds.width >= ROOM_MIN_DIMENSION && bounds.height >= ROOM_MIN_DIMENSION);
        Self {
            bounds,
            room_type: RoomType::Normal,
            is_discovered: false,
            custom_properties: String::new(),
            enemy_count: 0,
            is_cleared: false,
            treasure_level: 0,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn center(&self) -> (i32, i32) {
        self.bounds.center()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(x, y)
    }

    /// Cells strictly inside the wall ring
    pub fn interior(&self) -> Rect {
        Rect::new(
            self.bounds.x + 1,
            self.bounds.y + 1,
            self.bounds.width - 2,
            self.bounds.height - 2,
        )
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn is_discovered(&self) -> bool {
        self.is_discovered
    }

    pub fn custom_properties(&self) -> &str {
        &self.custom_properties
    }

    pub fn enemy_count(&self) -> u32 {
        self.enemy_count
    }

    pub fn is_cleared(&self) -> bool {
        self.is_cleared
    }

    pub fn treasure_level(&self) -> u32 {
        self.treasure_level
    }

    pub(crate) fn set_room_type(&mut self, room_type: RoomType) {
        self.room_type = room_type;
    }

    pub(crate) fn set_treasure_level(&mut self, level: u32) {
        self.treasure_level = level;
    }

    pub(crate) fn discover(&mut self) {
        self.is_discovered = true;
    }

    /// Euclidean distance between two room centers, squared
    pub fn center_distance_sq(&self, other: &Room) -> i64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        let dx = (ax - bx) as i64;
        let dy = (ay - by) as i64;
        dx * dx + dy * dy
    }

    pub fn to_data(&self) -> RoomData {
        RoomData {
            x: self.bounds.x,
            y: self.bounds.y,
            width: self.bounds.width,
            height: self.bounds.height,
            room_type: self.room_type,
            is_discovered: self.is_discovered,
            custom_properties: self.custom_properties.clone(),
            enemy_count: self.enemy_count,
            is_cleared: self.is_cleared,
            treasure_level: self.treasure_level,
        }
    }

    /// Rebuild a live room from its persisted form, rejecting rooms below the
    /// minimum size or whose far edge does not fit in an `i32`.
    pub fn from_data(data: &RoomData) -> Result<Self, DungeonError> {
        if data.width < ROOM_MIN_DIMENSION || data.height < ROOM_MIN_DIMENSION {
            return Err(DungeonError::InvalidData(format!(
                "room at ({}, {}) is {}x{}, smaller than {}x{}",
                data.x, data.y, data.width, data.height, ROOM_MIN_DIMENSION, ROOM_MIN_DIMENSION
            )));
        }

        if data.x.checked_add(data.width).is_none() || data.y.checked_add(data.height).is_none() {
            return Err(DungeonError::InvalidData(format!(
                "room at ({}, {}) extends past the coordinate range",
                data.x, data.y
            )));
        }

        Ok(Self {
            bounds: Rect::new(data.x, data.y, data.width, data.height),
            room_type: data.room_type,
            is_discovered: data.is_discovered,
            custom_properties: data.custom_properties.clone(),
            enemy_count: data.enemy_count,
            is_cleared: data.is_cleared,
            treasure_level: data.treasure_level,
        })
    }
}

/// Flat, transport-shaped copy of a [`Room`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomData {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub room_type: RoomType,
    #[serde(default)]
    pub is_discovered: bool,
    #[serde(default)]
    pub custom_properties: String,
    #[serde(default)]
    pub enemy_count: u32,
    #[serde(default)]
    pub is_cleared: bool,
    #[serde(default)]
    pub treasure_level: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> RoomData {
        RoomData {
            x: 4,
            y: 6,
            width: 7,
            height: 5,
            room_type: RoomType::Treasure,
            is_discovered: true,
            custom_properties: "{\"theme\":\"crypt\"}".to_string(),
            enemy_count: 3,
            is_cleared: true,
            treasure_level: 2,
        }
    }

    #[test]
    fn test_center_tile_lookup() {
        assert_eq!(RoomType::Entrance.center_tile(), Some(TileType::Entrance));
        assert_eq!(RoomType::Exit.center_tile(), Some(TileType::Exit));
        assert_eq!(RoomType::Shop.center_tile(), Some(TileType::Shop));
        assert_eq!(RoomType::Normal.center_tile(), None);
        assert_eq!(RoomType::Treasure.center_tile(), None);
        assert_eq!(RoomType::Boss.center_tile(), None);
    }

    #[test]
    fn test_new_room_defaults() {
        let room = Room::new(Rect::new(0, 0, 5, 5));
        assert_eq!(room.room_type(), RoomType::Normal);
        assert!(!room.is_discovered());
        assert_eq!(room.enemy_count(), 0);
        assert_eq!(room.custom_properties(), "");
    }

    #[test]
    fn test_interior_excludes_walls() {
        let room = Room::new(Rect::new(2, 3, 5, 4));
        assert_eq!(room.interior(), Rect::new(3, 4, 3, 2));
    }

    #[test]
    fn test_data_keeps_metadata() {
        let data = sample_data();
        let room = Room::from_data(&data).unwrap();
        assert_eq!(room.bounds(), Rect::new(4, 6, 7, 5));
        assert_eq!(room.enemy_count(), 3);
        assert!(room.is_cleared());
        assert_eq!(room.to_data(), data);
    }

    #[test]
    fn test_from_data_rejects_tiny_room() {
        let mut data = sample_data();
        data.width = 2;
        assert!(matches!(Room::from_data(&data), Err(DungeonError::InvalidData(_))));
    }

    #[test]
    fn test_from_data_rejects_room_past_coordinate_range() {
        let mut data = sample_data();
        data.x = i32::MAX - 1;
        data.width = 3;
        assert!(matches!(Room::from_data(&data), Err(DungeonError::InvalidData(_))));

        let mut data = sample_data();
        data.y = i32::MAX - 5;
        assert!(Room::from_data(&data).is_ok());
        data.height = 6;
        assert!(Room::from_data(&data).is_err());
    }

    #[test]
    fn test_missing_metadata_uses_defaults() {
        let data: RoomData =
            serde_json::from_str(r#"{"x":1,"y":2,"width":3,"height":4}"#).unwrap();
        assert_eq!(data.room_type, RoomType::Normal);
        assert!(!data.is_discovered);
        assert_eq!(data.treasure_level, 0);
    }

    #[test]
    fn test_center_distance() {
        let a = Room::new(Rect::new(0, 0, 4, 4));
        let b = Room::new(Rect::new(6, 8, 4, 4));
        assert_eq!(a.center_distance_sq(&b), 6 * 6 + 8 * 8);
    }
}
