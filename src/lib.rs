//! Procedural dungeon layouts built by binary space partitioning.
//!
//! A [`DungeonGenerator`] splits the level rectangle into a BSP tree, carves
//! a room into each leaf, joins sibling subtrees with corridors and
//! rasterizes the result into a [`Dungeon`] tile grid. Generation is fully
//! determined by the settings and the seed.

pub mod bsp;
pub mod constants;
pub mod corridor;
pub mod dungeon;
pub mod dungeon_gen;
pub mod error;
pub mod pathfinding;
pub mod rect;
pub mod room;
pub mod settings;
pub mod tile;

pub use bsp::BspNode;
pub use corridor::{Corridor, CorridorData, CorridorShape, PointData};
pub use dungeon::{Dungeon, DungeonData};
pub use dungeon_gen::{DungeonGenerator, GeneratedLayout, GenerationStats};
pub use error::DungeonError;
pub use rect::Rect;
pub use room::{Room, RoomData, RoomType};
pub use settings::GenerationSettings;
pub use tile::TileType;
