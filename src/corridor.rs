use serde::{Deserialize, Serialize};

use crate::error::DungeonError;

/// How a corridor travels between its two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorridorShape {
    /// Along x to the target column, then along y
    HorizontalFirst,
    /// Along y to the target row, then along x
    VerticalFirst,
    /// Straight Bresenham line
    Direct,
}

/// An ordered path of grid points joining two rooms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corridor {
    path: Vec<(i32, i32)>,
    width: i32,
    has_doors: bool,
}

impl Corridor {
    /// Route a corridor from `start` to `end` with the given shape.
    /// Widths below 1 are raised to 1.
    pub fn between(
        start: (i32, i32),
        end: (i32, i32),
        shape: CorridorShape,
        width: i32,
        has_doors: bool,
    ) -> Self {
        let path = match shape {
            CorridorShape::HorizontalFirst => l_path(start, end, true),
            CorridorShape::VerticalFirst => l_path(start, end, false),
            CorridorShape::Direct => line_path(start, end),
        };

        Self {
            path,
            width: width.max(1),
            has_doors,
        }
    }

    pub fn path(&self) -> &[(i32, i32)] {
        &self.path
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn has_doors(&self) -> bool {
        self.has_doors
    }

    pub fn start(&self) -> Option<(i32, i32)> {
        self.path.first().copied()
    }

    pub fn end(&self) -> Option<(i32, i32)> {
        self.path.last().copied()
    }

    /// Half-extent of the square footprint stamped around each path point
    pub fn radius(&self) -> i32 {
        self.width / 2
    }

    /// Every tile covered by the corridor: each path point dilated by
    /// [`Corridor::radius`] on both axes. Footprints of neighbouring points
    /// overlap, so tiles may be yielded more than once.
    pub fn covered_tiles(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let r = self.radius();
        self.path.iter().flat_map(move |&(px, py)| {
            (-r..=r).flat_map(move |dy| (-r..=r).map(move |dx| (px + dx, py + dy)))
        })
    }

    pub fn to_data(&self) -> CorridorData {
        CorridorData {
            path: self.path.iter().map(|&(x, y)| PointData { x, y }).collect(),
            width: self.width,
            has_doors: self.has_doors,
        }
    }

    pub fn from_data(data: &CorridorData) -> Result<Self, DungeonError> {
        if data.width < 1 {
            return Err(DungeonError::InvalidData(format!(
                "corridor width must be at least 1, got {}",
                data.width
            )));
        }
        if data.path.is_empty() {
            return Err(DungeonError::InvalidData("corridor has an empty path".to_string()));
        }
        let r = data.width / 2;
        if let Some(p) = data.path.iter().find(|p| {
            p.x.checked_sub(r).is_none()
                || p.x.checked_add(r).is_none()
                || p.y.checked_sub(r).is_none()
                || p.y.checked_add(r).is_none()
        }) {
            return Err(DungeonError::InvalidData(format!(
                "corridor footprint around ({}, {}) leaves the coordinate range",
                p.x, p.y
            )));
        }

        Ok(Self {
            path: data.path.iter().map(|p| (p.x, p.y)).collect(),
            width: data.width,
            has_doors: data.has_doors,
        })
    }
}

/// L-shaped path covering one axis fully before the other.
/// Both endpoints and the corner appear exactly once.
pub fn l_path(start: (i32, i32), end: (i32, i32), horizontal_first: bool) -> Vec<(i32, i32)> {
    let (x1, y1) = start;
    let (x2, y2) = end;
    let mut path = Vec::with_capacity(((x2 - x1).abs() + (y2 - y1).abs() + 1) as usize);
    path.push(start);

    if horizontal_first {
        walk_x(&mut path, x1, x2, y1);
        walk_y(&mut path, y1, y2, x2);
    } else {
        walk_y(&mut path, y1, y2, x1);
        walk_x(&mut path, x1, x2, y2);
    }

    path
}

/// Steps from `from` (exclusive) to `to` (inclusive) along x
fn walk_x(path: &mut Vec<(i32, i32)>, from: i32, to: i32, y: i32) {
    let step = (to - from).signum();
    let mut x = from;
    while x != to {
        x += step;
        path.push((x, y));
    }
}

/// Steps from `from` (exclusive) to `to` (inclusive) along y
fn walk_y(path: &mut Vec<(i32, i32)>, from: i32, to: i32, x: i32) {
    let step = (to - from).signum();
    let mut y = from;
    while y != to {
        y += step;
        path.push((x, y));
    }
}

/// Bresenham line between two points, endpoints included
pub fn line_path(start: (i32, i32), end: (i32, i32)) -> Vec<(i32, i32)> {
    let (mut x, mut y) = start;
    let (x2, y2) = end;
    let dx = (x2 - x).abs();
    let dy = -(y2 - y).abs();
    let sx = (x2 - x).signum();
    let sy = (y2 - y).signum();
    let mut err = dx + dy;

    let mut path = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    loop {
        path.push((x, y));
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    path
}

/// A single path point in persisted form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointData {
    pub x: i32,
    pub y: i32,
}

/// Flat, transport-shaped copy of a [`Corridor`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorData {
    pub path: Vec<PointData>,
    pub width: i32,
    #[serde(default)]
    pub has_doors: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn is_step_connected(path: &[(i32, i32)], diagonal: bool) -> bool {
        path.windows(2).all(|w| {
            let dx = (w[1].0 - w[0].0).abs();
            let dy = (w[1].1 - w[0].1).abs();
            if diagonal {
                dx <= 1 && dy <= 1 && (dx + dy) > 0
            } else {
                dx + dy == 1
            }
        })
    }

    #[test]
    fn test_l_path_horizontal_first() {
        let path = l_path((0, 0), (3, 2), true);
        assert_eq!(path, vec![(0, 0), (1, 0), (2, 0), (3, 0), (3, 1), (3, 2)]);
    }

    #[test]
    fn test_l_path_vertical_first() {
        let path = l_path((3, 2), (0, 0), false);
        assert_eq!(path, vec![(3, 2), (3, 1), (3, 0), (2, 0), (1, 0), (0, 0)]);
    }

    #[test]
    fn test_l_path_single_point() {
        assert_eq!(l_path((4, 4), (4, 4), true), vec![(4, 4)]);
    }

    #[rstest]
    #[case((0, 0), (10, 3))]
    #[case((10, 3), (0, 0))]
    #[case((2, 9), (5, -4))]
    #[case((7, 7), (7, 1))]
    fn test_l_paths_are_four_connected(#[case] start: (i32, i32), #[case] end: (i32, i32)) {
        for horizontal_first in [true, false] {
            let path = l_path(start, end, horizontal_first);
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&end));
            assert!(is_step_connected(&path, false));
            let manhattan = (end.0 - start.0).abs() + (end.1 - start.1).abs();
            assert_eq!(path.len() as i32, manhattan + 1);
        }
    }

    #[rstest]
    #[case((0, 0), (6, 2))]
    #[case((6, 2), (0, 0))]
    #[case((0, 0), (2, 7))]
    #[case((3, 3), (-4, 5))]
    #[case((5, 5), (5, 5))]
    fn test_line_path_is_eight_connected(#[case] start: (i32, i32), #[case] end: (i32, i32)) {
        let path = line_path(start, end);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        assert!(is_step_connected(&path, true));
        let chebyshev = (end.0 - start.0).abs().max((end.1 - start.1).abs());
        assert_eq!(path.len() as i32, chebyshev + 1);
    }

    #[test]
    fn test_line_path_diagonal() {
        assert_eq!(line_path((0, 0), (3, 3)), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_covered_tiles_width_one_is_path() {
        let corridor = Corridor::between((0, 0), (2, 0), CorridorShape::HorizontalFirst, 1, false);
        let tiles: Vec<_> = corridor.covered_tiles().collect();
        assert_eq!(tiles, vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_covered_tiles_keeps_duplicates() {
        let corridor = Corridor::between((0, 0), (1, 0), CorridorShape::HorizontalFirst, 3, false);
        let tiles: Vec<_> = corridor.covered_tiles().collect();
        // Two points, each with a 3x3 footprint
        assert_eq!(tiles.len(), 18);
        assert!(tiles.contains(&(-1, -1)));
        assert!(tiles.contains(&(2, 1)));
        assert_eq!(tiles.iter().filter(|&&t| t == (0, 0)).count(), 2);
    }

    #[test]
    fn test_width_two_dilates_by_one() {
        let corridor = Corridor::between((0, 0), (0, 0), CorridorShape::Direct, 2, false);
        assert_eq!(corridor.radius(), 1);
        assert_eq!(corridor.covered_tiles().count(), 9);
    }

    #[test]
    fn test_width_is_at_least_one() {
        let corridor = Corridor::between((0, 0), (3, 0), CorridorShape::Direct, 0, false);
        assert_eq!(corridor.width(), 1);
    }

    #[test]
    fn test_from_data_validates() {
        let empty = CorridorData {
            path: Vec::new(),
            width: 1,
            has_doors: false,
        };
        assert!(Corridor::from_data(&empty).is_err());

        let thin = CorridorData {
            path: vec![PointData { x: 0, y: 0 }],
            width: 0,
            has_doors: false,
        };
        assert!(Corridor::from_data(&thin).is_err());
    }

    #[test]
    fn test_from_data_rejects_footprint_past_coordinate_range() {
        let edge = CorridorData {
            path: vec![PointData { x: i32::MAX, y: 0 }],
            width: 3,
            has_doors: false,
        };
        assert!(matches!(Corridor::from_data(&edge), Err(DungeonError::InvalidData(_))));

        let thin_edge = CorridorData { width: 1, ..edge };
        assert!(Corridor::from_data(&thin_edge).is_ok());
    }

    #[test]
    fn test_data_conversion_preserves_path() {
        let corridor = Corridor::between((1, 2), (6, 9), CorridorShape::VerticalFirst, 3, true);
        let data = corridor.to_data();
        assert_eq!(data.path.len(), corridor.path().len());
        assert_eq!(Corridor::from_data(&data).unwrap(), corridor);
    }
}
