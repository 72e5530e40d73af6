//! Binary space partition tree over the level rectangle.

use rand::Rng;

use crate::constants::*;
use crate::rect::Rect;
use crate::room::Room;

/// A node in the BSP tree. Either a leaf (may own a room) or an internal node (has two children).
#[derive(Debug, Clone)]
pub struct BspNode {
    /// The region this node covers
    region: Rect,
    /// The room carved in this region (only for leaves)
    room: Option<Room>,
    /// Left/top child after split
    left: Option<Box<BspNode>>,
    /// Right/bottom child after split
    right: Option<Box<BspNode>>,
}

impl BspNode {
    pub fn new(region: Rect) -> Self {
        Self {
            region,
            room: None,
            left: None,
            right: None,
        }
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    pub fn room(&self) -> Option<&Room> {
        self.room.as_ref()
    }

    pub fn left(&self) -> Option<&BspNode> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&BspNode> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Split this node once into two children that tile its region exactly.
    ///
    /// Returns false, leaving the node untouched, when it is already split,
    /// when either side is shorter than `2 * min_size`, or when the chosen
    /// split point would leave a child smaller than `min_size`.
    pub fn split(&mut self, min_size: i32, split_randomness: f32, rng: &mut impl Rng) -> bool {
        if !self.is_leaf() {
            return false;
        }
        let Rect { x, y, width, height } = self.region;
        if width / 2 < min_size || height / 2 < min_size {
            return false;
        }

        // Prefer cutting across the longer axis; coin flip when roughly square
        let split_vertical = if width as f32 > height as f32 * SPLIT_ASPECT_RATIO {
            true
        } else if height as f32 > width as f32 * SPLIT_ASPECT_RATIO {
            false
        } else {
            rng.gen_bool(0.5)
        };

        let roll: f32 = rng.gen();
        let fraction = (0.5 + (roll - 0.5) * split_randomness)
            .clamp(SPLIT_FRACTION_MIN, SPLIT_FRACTION_MAX);

        let (left, right) = if split_vertical {
            let split_x = (width as f32 * fraction) as i32;
            if split_x < min_size || width - split_x < min_size {
                return false;
            }
            (
                Rect::new(x, y, split_x, height),
                Rect::new(x + split_x, y, width - split_x, height),
            )
        } else {
            let split_y = (height as f32 * fraction) as i32;
            if split_y < min_size || height - split_y < min_size {
                return false;
            }
            (
                Rect::new(x, y, width, split_y),
                Rect::new(x, y + split_y, width, height - split_y),
            )
        };

        self.left = Some(Box::new(BspNode::new(left)));
        self.right = Some(Box::new(BspNode::new(right)));
        true
    }

    /// Split depth-first, descending only into children that were created,
    /// until `max_depth` levels below this node.
    pub fn split_recursive(
        &mut self,
        depth: u32,
        max_depth: u32,
        min_size: i32,
        split_randomness: f32,
        rng: &mut impl Rng,
    ) {
        if depth >= max_depth || !self.split(min_size, split_randomness, rng) {
            return;
        }

        if let Some(ref mut left) = self.left {
            left.split_recursive(depth + 1, max_depth, min_size, split_randomness, rng);
        }
        if let Some(ref mut right) = self.right {
            right.split_recursive(depth + 1, max_depth, min_size, split_randomness, rng);
        }
    }

    /// Carve a room inside this leaf, shrunk from every edge by a random inset.
    ///
    /// Returns `None` for internal nodes, for leaves that already own a room,
    /// and when the shrunk rectangle is thinner than the minimum room size.
    pub fn create_room(&mut self, padding: i32, rng: &mut impl Rng) -> Option<Room> {
        if !self.is_leaf() || self.room.is_some() {
            return None;
        }

        let Rect { x, y, width, height } = self.region;
        let pad_x = padding.min(width / ROOM_PADDING_DIVISOR).max(0);
        let pad_y = padding.min(height / ROOM_PADDING_DIVISOR).max(0);

        let near_x = random_inset(pad_x, rng);
        let far_x = random_inset(pad_x, rng);
        let near_y = random_inset(pad_y, rng);
        let far_y = random_inset(pad_y, rng);

        let bounds = Rect::new(
            x + near_x,
            y + near_y,
            width - near_x - far_x,
            height - near_y - far_y,
        );
        if bounds.width < ROOM_MIN_DIMENSION || bounds.height < ROOM_MIN_DIMENSION {
            return None;
        }

        let room = Room::new(bounds);
        self.room = Some(room.clone());
        Some(room)
    }

    /// Create a room in every leaf, in pre-order. Leaves too small for a room are skipped.
    pub fn create_rooms(&mut self, padding: i32, rng: &mut impl Rng) -> Vec<Room> {
        let mut rooms = Vec::new();
        self.create_rooms_into(padding, rng, &mut rooms);
        rooms
    }

    fn create_rooms_into(&mut self, padding: i32, rng: &mut impl Rng, rooms: &mut Vec<Room>) {
        if self.is_leaf() {
            if let Some(room) = self.create_room(padding, rng) {
                rooms.push(room);
            }
            return;
        }
        if let Some(ref mut left) = self.left {
            left.create_rooms_into(padding, rng, rooms);
        }
        if let Some(ref mut right) = self.right {
            right.create_rooms_into(padding, rng, rooms);
        }
    }

    /// Overwrite the rooms held by this subtree's leaves, in pre-order, with
    /// the next rooms from `rooms`. Keeps the tree in step with rooms that
    /// were typed after carving.
    pub(crate) fn sync_rooms<'a, I>(&mut self, rooms: &mut I)
    where
        I: Iterator<Item = &'a Room>,
    {
        if let Some(ref mut room) = self.room {
            if let Some(updated) = rooms.next() {
                *room = updated.clone();
            }
        }
        if let Some(ref mut left) = self.left {
            left.sync_rooms(rooms);
        }
        if let Some(ref mut right) = self.right {
            right.sync_rooms(rooms);
        }
    }

    /// Collect all rooms in this subtree (own room, then left, then right).
    pub fn rooms(&self) -> Vec<&Room> {
        let mut rooms = Vec::new();
        self.collect_rooms(&mut rooms);
        rooms
    }

    fn collect_rooms<'a>(&'a self, rooms: &mut Vec<&'a Room>) {
        if let Some(ref room) = self.room {
            rooms.push(room);
        }
        if let Some(ref left) = self.left {
            left.collect_rooms(rooms);
        }
        if let Some(ref right) = self.right {
            right.collect_rooms(rooms);
        }
    }

    /// Collect all leaves in this subtree, in pre-order
    pub fn leaves(&self) -> Vec<&BspNode> {
        let mut leaves = Vec::new();
        self.collect_nodes(&mut leaves, &|node| node.is_leaf());
        leaves
    }

    /// Collect all nodes with two children, in pre-order
    pub fn internal_nodes(&self) -> Vec<&BspNode> {
        let mut nodes = Vec::new();
        self.collect_nodes(&mut nodes, &|node| node.left.is_some() && node.right.is_some());
        nodes
    }

    fn collect_nodes<'a>(&'a self, out: &mut Vec<&'a BspNode>, keep: &dyn Fn(&BspNode) -> bool) {
        if keep(self) {
            out.push(self);
        }
        if let Some(ref left) = self.left {
            left.collect_nodes(out, keep);
        }
        if let Some(ref right) = self.right {
            right.collect_nodes(out, keep);
        }
    }

    /// Number of edges on the longest root-to-leaf path
    pub fn depth(&self) -> u32 {
        let left = self.left.as_ref().map_or(0, |n| n.depth() + 1);
        let right = self.right.as_ref().map_or(0, |n| n.depth() + 1);
        left.max(right)
    }
}

/// Uniform inset in `[pad, 2 * pad)`, or 0 when there is no padding
fn random_inset(pad: i32, rng: &mut impl Rng) -> i32 {
    if pad > 0 {
        rng.gen_range(pad..pad * 2)
    } else {
        0
    }
}
