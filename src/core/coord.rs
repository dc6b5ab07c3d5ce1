//! Board coordinates and directions.
//!
//! A cell is addressed by three indices `(square, vertical, horizontal)`,
//! each in `{0, 1, 2}`:
//! - `square`: which concentric square (0 = outer, 1 = middle, 2 = inner),
//! - `vertical`: position within the square (0 = top, 1 = middle, 2 = bottom),
//! - `horizontal`: position within the square (0 = left, 1 = middle, 2 = right).
//!
//! The center of a square, `(*, 1, 1)`, is never a cell; this leaves exactly
//! 24 valid coordinates across the three squares.
//!
//! ## Neighbors
//!
//! Adjacency is pure coordinate arithmetic: left/right vary `horizontal`,
//! upper/lower vary `vertical`, and outer/inner cross squares; the radial
//! spokes exist only at the midpoints of each square's edges (`vertical == 1`
//! or `horizontal == 1`).

use serde::{Deserialize, Serialize};

use super::error::BoardError;

/// A named neighbor relation between two cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward `horizontal - 1`.
    Left,
    /// Toward `horizontal + 1`.
    Right,
    /// Toward `vertical - 1`.
    Upper,
    /// Toward `vertical + 1`.
    Lower,
    /// Toward the enclosing square (`square - 1`).
    Outer,
    /// Toward the enclosed square (`square + 1`).
    Inner,
}

impl Direction {
    /// All six directions, in slot order.
    pub const ALL: [Direction; 6] = [
        Direction::Left,
        Direction::Right,
        Direction::Upper,
        Direction::Lower,
        Direction::Outer,
        Direction::Inner,
    ];

    /// The direction pointing back the other way.
    ///
    /// ```
    /// use morris_engine::core::Direction;
    ///
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// assert_eq!(Direction::Inner.opposite(), Direction::Outer);
    /// ```
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Upper => Direction::Lower,
            Direction::Lower => Direction::Upper,
            Direction::Outer => Direction::Inner,
            Direction::Inner => Direction::Outer,
        }
    }

    /// Slot index used by the per-cell neighbor table.
    #[must_use]
    pub(crate) const fn slot(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Upper => 2,
            Direction::Lower => 3,
            Direction::Outer => 4,
            Direction::Inner => 5,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Upper => "upper",
            Direction::Lower => "lower",
            Direction::Outer => "outer",
            Direction::Inner => "inner",
        };
        write!(f, "{}", name)
    }
}

/// A validated cell coordinate.
///
/// Only the 24 valid lattice positions can be constructed; the square
/// centers `(*, 1, 1)` are rejected with [`BoardError::InvalidCell`].
///
/// Ordering is lexicographic on `(square, vertical, horizontal)`, the
/// total order mills rely on to canonicalize their triples.
///
/// ```
/// use morris_engine::core::Coord;
///
/// let corner = Coord::new(0, 0, 0).unwrap();
/// let spoke = Coord::new(1, 1, 0).unwrap();
/// assert!(corner < spoke);
///
/// assert!(Coord::new(0, 1, 1).is_err()); // square center
/// assert!(Coord::new(3, 0, 0).is_err()); // out of bounds
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    square: u8,
    vertical: u8,
    horizontal: u8,
}

impl Coord {
    /// Create a coordinate, rejecting invalid positions.
    pub fn new(square: u8, vertical: u8, horizontal: u8) -> Result<Self, BoardError> {
        if Self::is_valid(square, vertical, horizontal) {
            Ok(Self {
                square,
                vertical,
                horizontal,
            })
        } else {
            Err(BoardError::InvalidCell {
                square,
                vertical,
                horizontal,
            })
        }
    }

    /// Check whether the three indices address a real cell.
    ///
    /// Valid iff each index is in `{0, 1, 2}` and the position is not a
    /// square center.
    #[must_use]
    pub const fn is_valid(square: u8, vertical: u8, horizontal: u8) -> bool {
        let within_bounds = square <= 2 && vertical <= 2 && horizontal <= 2;
        let uncentered = !(vertical == 1 && horizontal == 1);
        within_bounds && uncentered
    }

    /// The square index (0 = outer, 1 = middle, 2 = inner).
    #[must_use]
    pub const fn square(self) -> u8 {
        self.square
    }

    /// The vertical index within the square (0 = top, 2 = bottom).
    #[must_use]
    pub const fn vertical(self) -> u8 {
        self.vertical
    }

    /// The horizontal index within the square (0 = left, 2 = right).
    #[must_use]
    pub const fn horizontal(self) -> u8 {
        self.horizontal
    }

    /// Dense index in `0..24`, monotonic in the coordinate order.
    ///
    /// The board stores its cells in a flat array indexed by this offset.
    #[must_use]
    pub(crate) const fn offset(self) -> usize {
        let within = (self.vertical * 3 + self.horizontal) as usize;
        // The square center (index 4) is skipped, so later slots shift down.
        let within = if within > 4 { within - 1 } else { within };
        self.square as usize * 8 + within
    }

    /// Iterate over all 24 valid coordinates in ascending order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0u8..3).flat_map(|square| {
            (0u8..3).flat_map(move |vertical| {
                (0u8..3).filter_map(move |horizontal| {
                    Coord::new(square, vertical, horizontal).ok()
                })
            })
        })
    }

    /// The adjacent coordinate in a direction, if one exists.
    ///
    /// Left/right/upper/lower stay within the square; outer/inner cross
    /// squares and exist only for edge-midpoint cells (`vertical == 1` or
    /// `horizontal == 1`). Absent neighbors are `None`, never an error.
    ///
    /// ```
    /// use morris_engine::core::{Coord, Direction};
    ///
    /// let top_mid = Coord::new(0, 0, 1).unwrap();
    /// assert_eq!(
    ///     top_mid.neighbor(Direction::Inner),
    ///     Some(Coord::new(1, 0, 1).unwrap())
    /// );
    ///
    /// // A corner has no radial spoke.
    /// let corner = Coord::new(0, 0, 0).unwrap();
    /// assert_eq!(corner.neighbor(Direction::Inner), None);
    /// ```
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<Coord> {
        let (ds, dv, dh): (i8, i8, i8) = match direction {
            Direction::Left => (0, 0, -1),
            Direction::Right => (0, 0, 1),
            Direction::Upper => (0, -1, 0),
            Direction::Lower => (0, 1, 0),
            Direction::Outer => (-1, 0, 0),
            Direction::Inner => (1, 0, 0),
        };

        // Radial spokes exist only at the midpoints of each square's edges.
        if matches!(direction, Direction::Outer | Direction::Inner)
            && self.vertical != 1
            && self.horizontal != 1
        {
            return None;
        }

        let square = self.square as i8 + ds;
        let vertical = self.vertical as i8 + dv;
        let horizontal = self.horizontal as i8 + dh;
        if square < 0 || vertical < 0 || horizontal < 0 {
            return None;
        }
        Coord::new(square as u8, vertical as u8, horizontal as u8).ok()
    }
}

impl TryFrom<(u8, u8, u8)> for Coord {
    type Error = BoardError;

    fn try_from((square, vertical, horizontal): (u8, u8, u8)) -> Result<Self, Self::Error> {
        Coord::new(square, vertical, horizontal)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{},{}]", self.square, self.vertical, self.horizontal)
    }
}
