use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::bsp::BspNode;
use crate::constants::*;
use crate::corridor::{Corridor, CorridorShape};
use crate::dungeon::Dungeon;
use crate::error::DungeonError;
use crate::rect::Rect;
use crate::room::{Room, RoomType};
use crate::settings::GenerationSettings;

/// Counters describing one generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub leaves: usize,
    pub rooms: usize,
    pub internal_nodes: usize,
    pub corridors: usize,
    /// Internal nodes skipped because one side produced no room
    pub skipped_connections: usize,
}

/// Result of a generation run that keeps the partition tree around
pub struct GeneratedLayout {
    pub dungeon: Dungeon,
    pub tree: BspNode,
    pub stats: GenerationStats,
}

/// Lays out levels from a fixed set of settings.
///
/// Each call to [`DungeonGenerator::generate`] owns its own random number
/// generator, so one generator may serve several threads at once.
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    settings: GenerationSettings,
}

impl DungeonGenerator {
    pub fn new(settings: GenerationSettings) -> Result<Self, DungeonError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Generate a level using the seed from the settings
    pub fn generate_from_settings(&self) -> Dungeon {
        self.generate(self.settings.seed)
    }

    /// Generate a level. [`RANDOM_SEED`] draws a fresh seed.
    pub fn generate(&self, seed: u64) -> Dungeon {
        self.generate_layout(seed).dungeon
    }

    /// Generate a level and keep the partition tree and run statistics.
    pub fn generate_layout(&self, seed: u64) -> GeneratedLayout {
        puffin::profile_function!();

        let seed = resolve_seed(seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let settings = &self.settings;
        debug!(
            "Generating {}x{} dungeon with seed {} (min room {}, depth {})",
            settings.width, settings.height, seed, settings.min_room_size, settings.max_depth
        );

        // Create the root BSP node covering the entire map
        let mut root = BspNode::new(Rect::new(0, 0, settings.width, settings.height));
        {
            puffin::profile_scope!("partition");
            root.split_recursive(
                0,
                settings.max_depth,
                settings.min_room_size,
                settings.split_randomness,
                &mut rng,
            );
        }

        let mut rooms = {
            puffin::profile_scope!("create_rooms");
            root.create_rooms(settings.room_padding, &mut rng)
        };

        let mut stats = GenerationStats {
            leaves: root.leaves().len(),
            rooms: rooms.len(),
            internal_nodes: root.internal_nodes().len(),
            ..GenerationStats::default()
        };

        let mut corridors = Vec::new();
        {
            puffin::profile_scope!("connect_rooms");
            self.connect_bsp(&root, &mut rng, &mut corridors, &mut stats);
        }
        stats.corridors = corridors.len();

        if settings.assign_room_types {
            puffin::profile_scope!("assign_room_types");
            self.assign_room_types(&mut rooms, &mut rng);
            root.sync_rooms(&mut rooms.iter());
        }

        let dungeon = Dungeon::new(settings.width, settings.height, seed, rooms, corridors);
        info!(
            "Generated dungeon (seed {}): {} rooms from {} leaves, {} corridors",
            seed, stats.rooms, stats.leaves, stats.corridors
        );

        GeneratedLayout {
            dungeon,
            tree: root,
            stats,
        }
    }

    /// Connect the left and right subtrees of every internal node, parents first.
    fn connect_bsp(
        &self,
        node: &BspNode,
        rng: &mut impl Rng,
        corridors: &mut Vec<Corridor>,
        stats: &mut GenerationStats,
    ) {
        let (Some(left), Some(right)) = (node.left(), node.right()) else {
            return;
        };

        let left_rooms = left.rooms();
        let right_rooms = right.rooms();
        match closest_pair(&left_rooms, &right_rooms) {
            Some((a, b)) => {
                let corridor = self.connect_rooms(a, b, rng);
                trace!(
                    "Corridor {:?} -> {:?} ({} tiles)",
                    corridor.start(),
                    corridor.end(),
                    corridor.path().len()
                );
                corridors.push(corridor);
            }
            None => {
                stats.skipped_connections += 1;
                debug!(
                    "Skipping connection at {:?}: {} rooms left, {} rooms right",
                    node.region(),
                    left_rooms.len(),
                    right_rooms.len()
                );
            }
        }

        self.connect_bsp(left, rng, corridors, stats);
        self.connect_bsp(right, rng, corridors, stats);
    }

    /// Join two room centers, usually with an L-shaped corridor and otherwise a straight line.
    fn connect_rooms(&self, room1: &Room, room2: &Room, rng: &mut impl Rng) -> Corridor {
        let shape = if rng.gen_bool(CORRIDOR_L_SHAPE_CHANCE) {
            if rng.gen_bool(0.5) {
                CorridorShape::HorizontalFirst
            } else {
                CorridorShape::VerticalFirst
            }
        } else {
            CorridorShape::Direct
        };

        Corridor::between(
            room1.center(),
            room2.center(),
            shape,
            self.settings.corridor_width,
            self.settings.corridor_doors,
        )
    }

    /// First room is the entrance, the room farthest from it the exit.
    /// Others may become treasure rooms or shops.
    fn assign_room_types(&self, rooms: &mut [Room], rng: &mut impl Rng) {
        let Some((entrance, others)) = rooms.split_first_mut() else {
            return;
        };
        entrance.set_room_type(RoomType::Entrance);
        let entrance: &Room = entrance;

        let exit = others
            .iter()
            .enumerate()
            .max_by_key(|(i, room)| (room.center_distance_sq(entrance), std::cmp::Reverse(*i)))
            .map(|(i, _)| i);

        for (i, room) in others.iter_mut().enumerate() {
            if Some(i) == exit {
                room.set_room_type(RoomType::Exit);
                continue;
            }

            let roll: f32 = rng.gen();
            if roll < self.settings.treasure_room_chance {
                room.set_room_type(RoomType::Treasure);
                room.set_treasure_level(rng.gen_range(1..=TREASURE_LEVEL_MAX));
            } else if roll < self.settings.treasure_room_chance + self.settings.shop_room_chance {
                room.set_room_type(RoomType::Shop);
            }
        }
    }
}

/// Pair of rooms, one from each side, with the smallest center distance.
/// Ties keep the first pair found.
fn closest_pair<'a>(left: &[&'a Room], right: &[&'a Room]) -> Option<(&'a Room, &'a Room)> {
    let mut best: Option<(i64, &Room, &Room)> = None;
    for &a in left {
        for &b in right {
            let distance = a.center_distance_sq(b);
            if best.map_or(true, |(d, _, _)| distance < d) {
                best = Some((distance, a, b));
            }
        }
    }
    best.map(|(_, a, b)| (a, b))
}

fn resolve_seed(seed: u64) -> u64 {
    if seed != RANDOM_SEED {
        return seed;
    }
    let mut rng = rand::thread_rng();
    loop {
        let drawn: u64 = rng.gen();
        if drawn != RANDOM_SEED {
            return drawn;
        }
    }
}
