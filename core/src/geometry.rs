//! Pure coordinate math shared by the board and the path planner.
//!
//! The board uses a mathematical orientation: `(0, 0)` is the lower-left tile,
//! [`Direction::Up`] increases `y` and [`Direction::Right`] increases `x`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Location of a single board tile expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinates {
    /// Zero-based column, decreased by `left` and increased by `right`.
    pub x: u32,
    /// Zero-based row, decreased by `down` and increased by `up`.
    pub y: u32,
}

impl Coordinates {
    /// Creates a new coordinate pair.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}/{})", self.x, self.y)
    }
}

/// Edge length of the square board measured in tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapSize(u32);

impl MapSize {
    /// Creates a map size, returning `None` for an empty board.
    #[must_use]
    pub const fn new(tiles: u32) -> Option<Self> {
        if tiles == 0 {
            None
        } else {
            Some(Self(tiles))
        }
    }

    /// Number of tiles along each edge.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Largest valid index on either axis.
    #[must_use]
    pub const fn max_index(&self) -> u32 {
        self.0 - 1
    }

    /// Total number of tiles on the board.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        usize::try_from(u64::from(self.0) * u64::from(self.0)).unwrap_or(usize::MAX)
    }

    /// Reports whether the coordinates lie on the board.
    #[must_use]
    pub const fn contains(&self, coordinates: Coordinates) -> bool {
        coordinates.x < self.0 && coordinates.y < self.0
    }

    /// Row-major index of the coordinates, if they lie on the board.
    #[must_use]
    pub fn index(&self, coordinates: Coordinates) -> Option<usize> {
        if !self.contains(coordinates) {
            return None;
        }
        let width = usize::try_from(self.0).ok()?;
        let row = usize::try_from(coordinates.y).ok()?;
        let column = usize::try_from(coordinates.x).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Iterates every tile of the board in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Coordinates> {
        let size = self.0;
        (0..size).flat_map(move |y| (0..size).map(move |x| Coordinates::new(x, y)))
    }
}

/// Cardinal directions an actor may step in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward decreasing `x`.
    Left,
    /// Toward increasing `x`.
    Right,
    /// Toward increasing `y`.
    Up,
    /// Toward decreasing `y`.
    Down,
}

impl Direction {
    /// Every direction in neighbour-expansion order: the horizontal axis first,
    /// then the vertical one.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Down,
        Direction::Up,
    ];

    /// Unit offset applied by the direction as `(dx, dy)`.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, 1),
            Self::Down => (0, -1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        };
        f.write_str(name)
    }
}

/// Coordinates one step from `origin` in `direction`, clamped at the board edge.
///
/// Stepping into the boundary returns `origin` unchanged; callers detect the
/// absorbed move by comparing the result with the starting tile.
#[must_use]
pub fn compute_target(origin: Coordinates, direction: Direction, size: MapSize) -> Coordinates {
    let max = size.max_index();
    match direction {
        Direction::Left => Coordinates::new(origin.x.saturating_sub(1), origin.y),
        Direction::Right => Coordinates::new(origin.x.saturating_add(1).min(max), origin.y),
        Direction::Up => Coordinates::new(origin.x, origin.y.saturating_add(1).min(max)),
        Direction::Down => Coordinates::new(origin.x, origin.y.saturating_sub(1)),
    }
}

/// Offset from `origin` to `target` as `(dx, dy)`.
#[must_use]
pub fn distance_vector(origin: Coordinates, target: Coordinates) -> (i64, i64) {
    (
        i64::from(target.x) - i64::from(origin.x),
        i64::from(target.y) - i64::from(origin.y),
    )
}

/// Manhattan distance between two tiles.
#[must_use]
pub fn manhattan_distance(origin: Coordinates, target: Coordinates) -> u32 {
    origin.x.abs_diff(target.x) + origin.y.abs_diff(target.y)
}

/// Direction leading from `from` to an orthogonally adjacent `to`.
#[must_use]
pub fn direction_between(from: Coordinates, to: Coordinates) -> Option<Direction> {
    match distance_vector(from, to) {
        (-1, 0) => Some(Direction::Left),
        (1, 0) => Some(Direction::Right),
        (0, 1) => Some(Direction::Up),
        (0, -1) => Some(Direction::Down),
        _ => None,
    }
}

/// In-bounds neighbours of a tile in [`Direction::ALL`] order.
pub fn neighbors(
    origin: Coordinates,
    size: MapSize,
) -> impl Iterator<Item = (Direction, Coordinates)> {
    Direction::ALL.into_iter().filter_map(move |direction| {
        let target = compute_target(origin, direction, size);
        (target != origin).then_some((direction, target))
    })
}

/// Every in-bounds tile in the square of the given radius around `center`,
/// including `center` itself.
#[must_use]
pub fn area(center: Coordinates, radius: u32, size: MapSize) -> Vec<Coordinates> {
    let max = size.max_index();
    let min_x = center.x.saturating_sub(radius);
    let max_x = center.x.saturating_add(radius).min(max);
    let min_y = center.y.saturating_sub(radius);
    let max_y = center.y.saturating_add(radius).min(max);

    (min_y..=max_y)
        .flat_map(|y| (min_x..=max_x).map(move |x| Coordinates::new(x, y)))
        .collect()
}

/// Equally valid first steps toward a target.
///
/// When the horizontal and vertical offsets have the same magnitude both axes
/// make identical progress, so two candidates are reported instead of an
/// arbitrary pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionCandidates {
    /// One axis dominates.
    Single(Direction),
    /// Diagonal tie between two directions.
    Diagonal(Direction, Direction),
}

impl DirectionCandidates {
    /// Deterministic single choice: the first listed candidate.
    #[must_use]
    pub const fn first(&self) -> Direction {
        match self {
            Self::Single(direction) | Self::Diagonal(direction, _) => *direction,
        }
    }

    /// Reports whether `direction` is one of the candidates.
    #[must_use]
    pub fn contains(&self, direction: Direction) -> bool {
        match self {
            Self::Single(only) => *only == direction,
            Self::Diagonal(first, second) => *first == direction || *second == direction,
        }
    }

    /// Candidates in their listed order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Direction> {
        match self {
            Self::Single(direction) => vec![*direction],
            Self::Diagonal(first, second) => vec![*first, *second],
        }
    }
}

/// Classifies the offset from `origin` to `target` into candidate directions.
///
/// Returns `None` when both tiles coincide.
#[must_use]
pub fn direction_candidates(
    origin: Coordinates,
    target: Coordinates,
) -> Option<DirectionCandidates> {
    let (dx, dy) = distance_vector(origin, target);
    if dx == 0 && dy == 0 {
        return None;
    }

    let candidates = if dx.abs() == dy.abs() {
        match (dx > 0, dy > 0) {
            (true, true) => DirectionCandidates::Diagonal(Direction::Up, Direction::Right),
            (true, false) => DirectionCandidates::Diagonal(Direction::Right, Direction::Down),
            (false, true) => DirectionCandidates::Diagonal(Direction::Left, Direction::Up),
            (false, false) => DirectionCandidates::Diagonal(Direction::Down, Direction::Left),
        }
    } else if dy.abs() > dx.abs() {
        if dy > 0 {
            DirectionCandidates::Single(Direction::Up)
        } else {
            DirectionCandidates::Single(Direction::Down)
        }
    } else if dx > 0 {
        DirectionCandidates::Single(Direction::Right)
    } else {
        DirectionCandidates::Single(Direction::Left)
    };

    Some(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(tiles: u32) -> MapSize {
        MapSize::new(tiles).expect("non-empty map")
    }

    #[test]
    fn compute_target_clamps_at_edges() {
        let map = size(5);
        let corner = Coordinates::new(0, 0);
        assert_eq!(compute_target(corner, Direction::Left, map), corner);
        assert_eq!(compute_target(corner, Direction::Down, map), corner);
        assert_eq!(
            compute_target(corner, Direction::Up, map),
            Coordinates::new(0, 1)
        );

        let far = Coordinates::new(4, 4);
        assert_eq!(compute_target(far, Direction::Right, map), far);
        assert_eq!(compute_target(far, Direction::Up, map), far);
        assert_eq!(
            compute_target(far, Direction::Left, map),
            Coordinates::new(3, 4)
        );
    }

    #[test]
    fn zero_map_size_is_rejected() {
        assert!(MapSize::new(0).is_none());
        assert_eq!(size(3).tile_count(), 9);
    }

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = Coordinates::new(1, 1);
        let destination = Coordinates::new(4, 3);
        assert_eq!(manhattan_distance(origin, destination), 5);
        assert_eq!(manhattan_distance(destination, origin), 5);
        assert_eq!(distance_vector(destination, origin), (-3, -2));
    }

    #[test]
    fn diagonal_offsets_report_two_candidates() {
        let origin = Coordinates::new(2, 2);
        assert_eq!(
            direction_candidates(origin, Coordinates::new(4, 4)),
            Some(DirectionCandidates::Diagonal(
                Direction::Up,
                Direction::Right
            ))
        );
        assert_eq!(
            direction_candidates(origin, Coordinates::new(4, 0)),
            Some(DirectionCandidates::Diagonal(
                Direction::Right,
                Direction::Down
            ))
        );
        assert_eq!(
            direction_candidates(origin, Coordinates::new(0, 4)),
            Some(DirectionCandidates::Diagonal(
                Direction::Left,
                Direction::Up
            ))
        );
        assert_eq!(
            direction_candidates(origin, Coordinates::new(1, 1)),
            Some(DirectionCandidates::Diagonal(
                Direction::Down,
                Direction::Left
            ))
        );
    }

    #[test]
    fn dominant_axis_wins_when_offsets_differ() {
        let origin = Coordinates::new(2, 2);
        let candidates = direction_candidates(origin, Coordinates::new(3, 5)).expect("offset");
        assert_eq!(candidates, DirectionCandidates::Single(Direction::Up));
        assert_eq!(candidates.first(), Direction::Up);
        assert_eq!(
            direction_candidates(origin, Coordinates::new(0, 3)),
            Some(DirectionCandidates::Single(Direction::Left))
        );
        assert_eq!(direction_candidates(origin, origin), None);
    }

    #[test]
    fn area_is_clipped_to_the_board() {
        let map = size(6);
        let tiles = area(Coordinates::new(0, 0), 2, map);
        assert_eq!(tiles.len(), 9);
        assert!(tiles.iter().all(|tile| tile.x <= 2 && tile.y <= 2));

        let centered = area(Coordinates::new(3, 3), 1, map);
        assert_eq!(centered.len(), 9);
        assert!(centered.contains(&Coordinates::new(3, 3)));
    }

    #[test]
    fn neighbors_skip_out_of_bounds_tiles() {
        let map = size(3);
        let around_corner: Vec<_> = neighbors(Coordinates::new(0, 0), map).collect();
        assert_eq!(
            around_corner,
            vec![
                (Direction::Right, Coordinates::new(1, 0)),
                (Direction::Up, Coordinates::new(0, 1)),
            ]
        );
        assert_eq!(neighbors(Coordinates::new(1, 1), map).count(), 4);
    }

    #[test]
    fn direction_between_neighbors() {
        let origin = Coordinates::new(3, 3);
        assert_eq!(
            direction_between(origin, Coordinates::new(3, 4)),
            Some(Direction::Up)
        );
        assert_eq!(
            direction_between(origin, Coordinates::new(4, 3)),
            Some(Direction::Right)
        );
        assert_eq!(
            direction_between(origin, Coordinates::new(3, 2)),
            Some(Direction::Down)
        );
        assert_eq!(
            direction_between(origin, Coordinates::new(2, 3)),
            Some(Direction::Left)
        );
        assert_eq!(direction_between(origin, origin), None);
        assert_eq!(direction_between(origin, Coordinates::new(4, 4)), None);
    }
}
