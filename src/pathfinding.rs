use crate::dungeon::Dungeon;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct Node {
    x: i32,
    y: i32,
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct ScoredNode {
    node: Node,
    f_score: i32, // g_score + heuristic
}

// BinaryHeap is a max-heap, so we reverse the ordering for min-heap behavior
impl Ord for ScoredNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_score.cmp(&self.f_score)
    }
}

impl PartialOrd for ScoredNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Direct corridors are Bresenham lines, so diagonal steps must be allowed
const NEIGHBORS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Find a path from start to goal over walkable tiles using A* with 8-way moves.
/// Returns the path as a vector of (x, y) positions, excluding the start position.
/// Returns None if no path exists.
pub fn find_path(
    dungeon: &Dungeon,
    start: (i32, i32),
    goal: (i32, i32),
    blocked: &HashSet<(i32, i32)>,
) -> Option<Vec<(i32, i32)>> {
    let start_node = Node { x: start.0, y: start.1 };
    let goal_node = Node { x: goal.0, y: goal.1 };

    if !dungeon.is_walkable(goal.0, goal.1) {
        return None;
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<Node, Node> = HashMap::new();
    let mut g_score: HashMap<Node, i32> = HashMap::new();

    g_score.insert(start_node, 0);
    open_set.push(ScoredNode {
        node: start_node,
        f_score: heuristic(start, goal),
    });

    while let Some(current) = open_set.pop() {
        if current.node == goal_node {
            return Some(reconstruct_path(&came_from, current.node));
        }

        let current_g = *g_score.get(&current.node).unwrap_or(&i32::MAX);

        for (dx, dy) in NEIGHBORS {
            let nx = current.node.x + dx;
            let ny = current.node.y + dy;
            let neighbor = Node { x: nx, y: ny };

            if !dungeon.is_walkable(nx, ny) {
                continue;
            }

            // Blocked cells may still be the goal itself
            if blocked.contains(&(nx, ny)) && (nx, ny) != goal {
                continue;
            }

            let tentative_g = current_g + 1;
            let neighbor_g = *g_score.get(&neighbor).unwrap_or(&i32::MAX);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.node);
                g_score.insert(neighbor, tentative_g);
                open_set.push(ScoredNode {
                    node: neighbor,
                    f_score: tentative_g + heuristic((nx, ny), goal),
                });
            }
        }
    }

    None // No path found
}

/// Every walkable tile reachable from `start` by 8-way steps.
/// Empty when `start` itself is not walkable.
pub fn reachable_tiles(dungeon: &Dungeon, start: (i32, i32)) -> HashSet<(i32, i32)> {
    let mut seen = HashSet::new();
    if !dungeon.is_walkable(start.0, start.1) {
        return seen;
    }

    let mut queue = VecDeque::from([start]);
    seen.insert(start);
    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in NEIGHBORS {
            let next = (x + dx, y + dy);
            if dungeon.is_walkable(next.0, next.1) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

/// Chebyshev distance heuristic (every step costs 1, diagonals included)
fn heuristic(from: (i32, i32), to: (i32, i32)) -> i32 {
    (from.0 - to.0).abs().max((from.1 - to.1).abs())
}

/// Reconstruct the path from came_from map
fn reconstruct_path(came_from: &HashMap<Node, Node>, mut current: Node) -> Vec<(i32, i32)> {
    let mut path = vec![(current.x, current.y)];

    while let Some(&prev) = came_from.get(&current) {
        path.push((prev.x, prev.y));
        current = prev;
    }

    path.reverse();
    // Remove the start position
    if !path.is_empty() {
        path.remove(0);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corridor::{Corridor, CorridorShape};
    use crate::rect::Rect;
    use crate::room::Room;

    fn joined_rooms() -> Dungeon {
        let rooms = vec![
            Room::new(Rect::new(1, 1, 7, 7)),
            Room::new(Rect::new(14, 1, 7, 7)),
        ];
        let corridor = Corridor::between((4, 4), (17, 4), CorridorShape::HorizontalFirst, 1, true);
        Dungeon::new(24, 10, 11, rooms, vec![corridor])
    }

    #[test]
    fn test_path_between_joined_rooms() {
        let dungeon = joined_rooms();
        let path = find_path(&dungeon, (2, 2), (19, 6), &HashSet::new()).unwrap();
        assert_eq!(path.last(), Some(&(19, 6)));
        assert_eq!(path.len() as i32, heuristic((2, 2), (19, 6)));
        assert!(path.iter().all(|&(x, y)| dungeon.is_walkable(x, y)));
    }

    #[test]
    fn test_no_path_into_wall() {
        let dungeon = joined_rooms();
        assert!(find_path(&dungeon, (2, 2), (0, 0), &HashSet::new()).is_none());
    }

    #[test]
    fn test_blocked_corridor_has_no_path() {
        let dungeon = joined_rooms();
        let blocked = HashSet::from([(10, 4)]);
        assert!(find_path(&dungeon, (2, 2), (19, 6), &blocked).is_none());
        // The blocked cell itself is still a valid goal
        assert!(find_path(&dungeon, (2, 2), (10, 4), &blocked).is_some());
    }

    #[test]
    fn test_path_to_self_is_empty() {
        let dungeon = joined_rooms();
        assert_eq!(find_path(&dungeon, (3, 3), (3, 3), &HashSet::new()), Some(Vec::new()));
    }

    #[test]
    fn test_diagonal_corridor_is_passable() {
        let rooms = vec![
            Room::new(Rect::new(0, 0, 5, 5)),
            Room::new(Rect::new(10, 10, 5, 5)),
        ];
        let corridor = Corridor::between((2, 2), (12, 12), CorridorShape::Direct, 1, false);
        let dungeon = Dungeon::new(16, 16, 2, rooms, vec![corridor]);
        let path = find_path(&dungeon, (1, 1), (13, 13), &HashSet::new()).unwrap();
        assert_eq!(path.len(), 12);
        assert!(reachable_tiles(&dungeon, (1, 1)).contains(&(13, 13)));
    }

    #[test]
    fn test_reachable_tiles_cover_both_rooms() {
        let dungeon = joined_rooms();
        let reachable = reachable_tiles(&dungeon, (2, 2));
        // Two 5x5 interiors plus the corridor between the rooms
        assert_eq!(reachable.len(), 25 + 25 + 8);
        assert!(reachable.contains(&(19, 6)));
        assert!(reachable_tiles(&dungeon, (0, 0)).is_empty());
    }
}
