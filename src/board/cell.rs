//! Board cells.
//!
//! A cell is one of the 24 valid lattice positions. It knows its up-to-six
//! directional neighbors (wired once from coordinate arithmetic; the
//! topology is static) and its current occupant. Links are values: the
//! neighbor table holds coordinates and the occupant is a player id, so a
//! cell never references another object.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Coord, Direction, PlayerId};

/// One lattice position with its occupant and neighbor table.
///
/// Equality and ordering are by coordinate only; occupancy is transient
/// state, the coordinate is identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cell {
    coord: Coord,
    occupant: Option<PlayerId>,
    neighbors: [Option<Coord>; 6],
}

impl Cell {
    /// Create an empty cell with its neighbor table wired.
    #[must_use]
    pub(crate) fn new(coord: Coord) -> Self {
        let mut neighbors = [None; 6];
        for direction in Direction::ALL {
            neighbors[direction.slot()] = coord.neighbor(direction);
        }
        Self {
            coord,
            occupant: None,
            neighbors,
        }
    }

    /// The cell's coordinate.
    #[must_use]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// The neighbor in a direction, absent directions return `None`.
    #[must_use]
    pub fn neighbor(&self, direction: Direction) -> Option<Coord> {
        self.neighbors[direction.slot()]
    }

    /// All present neighbors with their directions.
    #[must_use]
    pub fn neighbors(&self) -> SmallVec<[(Direction, Coord); 6]> {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.neighbor(direction).map(|coord| (direction, coord)))
            .collect()
    }

    /// Whether `coord` is adjacent to this cell.
    #[must_use]
    pub fn is_neighbor(&self, coord: Coord) -> bool {
        self.neighbors.iter().any(|n| *n == Some(coord))
    }

    /// The current occupant, if any.
    #[must_use]
    pub fn occupant(&self) -> Option<&PlayerId> {
        self.occupant.as_ref()
    }

    /// Set or clear the occupant.
    pub(crate) fn set_occupant(&mut self, occupant: Option<PlayerId>) {
        self.occupant = occupant;
    }

    /// Whether the cell holds no piece.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// Force the cell empty.
    pub(crate) fn reset(&mut self) {
        self.occupant = None;
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Cell {}

impl std::hash::Hash for Cell {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.coord.hash(hasher);
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.coord.cmp(&other.coord)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.coord)
    }
}
