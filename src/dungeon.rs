//! A generated level: rooms, corridors and the tile grid derived from them.

use std::fmt;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::corridor::{Corridor, CorridorData};
use crate::error::DungeonError;
use crate::rect::Rect;
use crate::room::{Room, RoomData, RoomType};
use crate::tile::TileType;

/// Rooms and corridors of one level plus the tile grid rasterized from them.
///
/// The grid is computed once in [`Dungeon::new`]. Only the discovery flag of
/// a room may change afterwards, and it never affects the tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dungeon {
    width: i32,
    height: i32,
    seed: u64,
    rooms: Vec<Room>,
    corridors: Vec<Corridor>,
    tiles: Vec<TileType>,
}

impl Dungeon {
    /// Build a level from its rooms and corridors, rasterizing the tile grid.
    /// Non-positive dimensions produce an empty grid.
    pub fn new(
        width: i32,
        height: i32,
        seed: u64,
        rooms: Vec<Room>,
        corridors: Vec<Corridor>,
    ) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut dungeon = Self {
            width,
            height,
            seed,
            rooms,
            corridors,
            tiles: vec![TileType::Wall; width as usize * height as usize],
        };
        dungeon.create_tile_grid();
        dungeon
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    /// Row-major tile grid, `width * height` long
    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn get_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn set_tile(&mut self, x: i32, y: i32, tile_type: TileType) {
        if let Some(idx) = self.get_index(x, y) {
            self.tiles[idx] = tile_type;
        }
    }

    /// Tile at a position. Anything outside the grid reads as `Wall`.
    pub fn tile_at(&self, x: i32, y: i32) -> TileType {
        self.get_index(x, y)
            .map_or(TileType::Wall, |idx| self.tiles[idx])
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).is_walkable()
    }

    fn create_tile_grid(&mut self) {
        puffin::profile_function!();

        self.tiles.fill(TileType::Wall);

        {
            puffin::profile_scope!("carve_rooms");
            for i in 0..self.rooms.len() {
                self.carve_room(i);
            }
        }

        {
            puffin::profile_scope!("carve_corridors");
            for i in 0..self.corridors.len() {
                self.carve_corridor(i);
            }
        }

        {
            puffin::profile_scope!("place_doors");
            let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
            rng.set_stream(DOOR_RNG_STREAM);
            for i in 0..self.rooms.len() {
                self.place_doors(i, &mut rng);
            }
        }
    }

    /// Floor inside, wall on the outer ring, and the type's marker on the center cell.
    /// Parts of the room outside the grid are skipped.
    fn carve_room(&mut self, index: usize) {
        let bounds = self.rooms[index].bounds();
        for y in bounds.y.max(0)..bounds.bottom().min(self.height) {
            for x in bounds.x.max(0)..bounds.right().min(self.width) {
                let tile = if bounds.on_border(x, y) {
                    TileType::Wall
                } else {
                    TileType::Floor
                };
                self.set_tile(x, y, tile);
            }
        }

        if let Some(tile) = self.rooms[index].room_type().center_tile() {
            let (cx, cy) = bounds.center();
            self.set_tile(cx, cy, tile);
        }
    }

    /// Open every wall under the corridor's footprint. Room center markers are kept.
    fn carve_corridor(&mut self, index: usize) {
        let covered: Vec<(i32, i32)> = self.corridors[index].covered_tiles().collect();
        for (x, y) in covered {
            if self.tile_at(x, y) == TileType::Wall {
                self.set_tile(x, y, TileType::Floor);
            }
        }
    }

    /// Turn confirmed doorways on a room's perimeter into doors or open gaps.
    /// Corners are never doorways.
    fn place_doors(&mut self, index: usize, rng: &mut impl Rng) {
        let bounds = self.rooms[index].bounds();
        let last_x = bounds.right() - 1;
        let last_y = bounds.bottom() - 1;

        let mut candidates = Vec::new();
        for x in (bounds.x + 1).max(0)..last_x.min(self.width) {
            candidates.push(((x, bounds.y), (0, -1)));
            candidates.push(((x, last_y), (0, 1)));
        }
        for y in (bounds.y + 1).max(0)..last_y.min(self.height) {
            candidates.push(((bounds.x, y), (-1, 0)));
            candidates.push(((last_x, y), (1, 0)));
        }

        for ((x, y), (dx, dy)) in candidates {
            if self.get_index(x, y).is_none() || !self.is_doorway(x, y, dx, dy) {
                continue;
            }
            let tile = if rng.gen_bool(DOOR_CHANCE) {
                TileType::Door
            } else {
                TileType::Floor
            };
            self.set_tile(x, y, tile);
        }
    }

    /// A perimeter cell is a doorway when plain floor lies on both sides of it
    /// and the outer floor continues somewhere else in its 3x3 neighbourhood.
    fn is_doorway(&self, x: i32, y: i32, dx: i32, dy: i32) -> bool {
        if !matches!(self.tile_at(x, y), TileType::Wall | TileType::Floor) {
            return false;
        }

        // Center markers of 3-wide rooms sit right behind the wall
        if self.tile_at(x - dx, y - dy) != TileType::Floor {
            return false;
        }

        let (ox, oy) = (x + dx, y + dy);
        if self.tile_at(ox, oy) != TileType::Floor {
            return false;
        }

        (-1..=1).any(|ny| {
            (-1..=1).any(|nx| {
                let (cx, cy) = (ox + nx, oy + ny);
                (nx, ny) != (0, 0) && (cx, cy) != (x, y) && self.tile_at(cx, cy) == TileType::Floor
            })
        })
    }

    /// First room whose bounds contain the point
    pub fn room_at(&self, x: i32, y: i32) -> Option<&Room> {
        self.rooms.iter().find(|room| room.contains(x, y))
    }

    /// Index of the first room whose bounds contain the point
    pub fn room_index_at(&self, x: i32, y: i32) -> Option<usize> {
        self.rooms.iter().position(|room| room.contains(x, y))
    }

    pub fn room_by_type(&self, room_type: RoomType) -> Option<&Room> {
        self.rooms.iter().find(|room| room.room_type() == room_type)
    }

    pub fn rooms_by_type(&self, room_type: RoomType) -> Vec<&Room> {
        self.rooms
            .iter()
            .filter(|room| room.room_type() == room_type)
            .collect()
    }

    /// Pick a room uniformly, optionally restricted to one type
    pub fn random_room(
        &self,
        rng: &mut impl Rng,
        room_type: Option<RoomType>,
    ) -> Option<&Room> {
        let candidates: Vec<&Room> = self
            .rooms
            .iter()
            .filter(|room| room_type.map_or(true, |t| room.room_type() == t))
            .collect();
        candidates.choose(rng).copied()
    }

    /// Mark a room as discovered. Returns false if the index is out of range.
    pub fn discover_room(&mut self, index: usize) -> bool {
        match self.rooms.get_mut(index) {
            Some(room) => {
                room.discover();
                true
            }
            None => false,
        }
    }

    /// Mark the room containing a point as discovered, returning its index
    pub fn discover_room_at(&mut self, x: i32, y: i32) -> Option<usize> {
        let index = self.room_index_at(x, y)?;
        self.discover_room(index);
        Some(index)
    }

    pub fn to_data(&self) -> DungeonData {
        DungeonData {
            width: self.width,
            height: self.height,
            seed: self.seed,
            rooms: self.rooms.iter().map(Room::to_data).collect(),
            corridors: self.corridors.iter().map(Corridor::to_data).collect(),
        }
    }

    /// Rebuild a level from its persisted form and rasterize it again.
    ///
    /// Rooms must lie inside the grid, corridor points must be grid cells and
    /// corridors may be at most as wide as the grid's longer side.
    pub fn from_data(data: &DungeonData) -> Result<Self, DungeonError> {
        if data.width <= 0 || data.height <= 0 {
            return Err(DungeonError::InvalidData(format!(
                "dimensions must be positive, got {}x{}",
                data.width, data.height
            )));
        }
        if i64::from(data.width) * i64::from(data.height) > DUNGEON_MAX_TILES {
            return Err(DungeonError::InvalidData(format!(
                "{}x{} exceeds the limit of {} tiles",
                data.width, data.height, DUNGEON_MAX_TILES
            )));
        }
        let grid = Rect::new(0, 0, data.width, data.height);

        let rooms = data
            .rooms
            .iter()
            .map(Room::from_data)
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(room) = rooms.iter().find(|room| !grid.contains_rect(&room.bounds())) {
            return Err(DungeonError::InvalidData(format!(
                "room {:?} lies outside the {}x{} grid",
                room.bounds(),
                data.width,
                data.height
            )));
        }

        let corridors = data
            .corridors
            .iter()
            .map(Corridor::from_data)
            .collect::<Result<Vec<_>, _>>()?;
        let max_width = data.width.max(data.height);
        for corridor in &corridors {
            if corridor.width() > max_width {
                return Err(DungeonError::InvalidData(format!(
                    "corridor width {} exceeds the grid's longer side {}",
                    corridor.width(),
                    max_width
                )));
            }
            if let Some(&(x, y)) = corridor.path().iter().find(|&&(x, y)| !grid.contains(x, y)) {
                return Err(DungeonError::InvalidData(format!(
                    "corridor point ({}, {}) lies outside the {}x{} grid",
                    x, y, data.width, data.height
                )));
            }
        }

        Ok(Self::new(data.width, data.height, data.seed, rooms, corridors))
    }
}

impl fmt::Display for Dungeon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let row: String = (0..self.width).map(|x| self.tile_at(x, y).glyph()).collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Plain-data form of a [`Dungeon`] for saving and sending over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonData {
    pub width: i32,
    pub height: i32,
    pub seed: u64,
    #[serde(default)]
    pub rooms: Vec<RoomData>,
    #[serde(default)]
    pub corridors: Vec<CorridorData>,
}

impl DungeonData {
    pub fn to_json(&self) -> Result<String, DungeonError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DungeonError> {
        Ok(serde_json::from_str(json)?)
    }
}
