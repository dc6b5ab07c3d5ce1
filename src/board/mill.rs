//! Mills: three aligned, same-owner cells.
//!
//! A mill is recognized when three cells share one occupant and are
//! mutually aligned: in a row along a square's edge or along one of the
//! four radial spokes. The alignment predicate is a single symmetric
//! check: some cell of the triple has both members of one of its opposite
//! neighbor pairs (left/right, upper/lower, outer/inner) inside the triple.
//!
//! A mill's owner is captured once at construction and never re-derived.
//! The `utilized` flag is sticky: a mill grants exactly one capture, and a
//! second grant is an error. Cells may change hands afterwards; the board
//! purges mills whose predicate no longer holds.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use crate::core::{BoardError, Coord, Direction, PlayerId};

/// Detached mill identity: owner plus canonical (sorted) cell triple.
///
/// Two mills are the same mill iff their keys are equal; the `utilized`
/// flag never participates in identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MillKey {
    cells: [Coord; 3],
    owner: PlayerId,
}

impl MillKey {
    /// The canonical cell triple.
    #[must_use]
    pub fn cells(&self) -> &[Coord; 3] {
        &self.cells
    }

    /// The owning player.
    #[must_use]
    pub fn owner(&self) -> &PlayerId {
        &self.owner
    }
}

/// A recognized three-in-a-row with its one-shot capture grant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Mill {
    cells: [Coord; 3],
    owner: PlayerId,
    utilized: bool,
}

impl Mill {
    /// Recognize a mill from three cells.
    ///
    /// Fails with [`BoardError::InvalidMill`] unless the cells are three
    /// distinct, all occupied by the same player, and mutually aligned.
    /// On success the triple is stored sorted and the owner is captured
    /// from the cells' common occupant.
    pub fn new(cells: [&Cell; 3]) -> Result<Self, BoardError> {
        if !Self::is_mill(cells) {
            return Err(BoardError::InvalidMill);
        }

        let mut coords = [cells[0].coord(), cells[1].coord(), cells[2].coord()];
        coords.sort();
        let owner = cells[0]
            .occupant()
            .cloned()
            .ok_or(BoardError::InvalidMill)?;

        Ok(Self {
            cells: coords,
            owner,
            utilized: false,
        })
    }

    /// The mill predicate: do these three cells form a mill right now?
    ///
    /// Any one witnessing cell suffices; the check is intentionally
    /// permissive and symmetric, covering horizontal, vertical, and
    /// cross-square radial alignments alike.
    #[must_use]
    pub fn is_mill(cells: [&Cell; 3]) -> bool {
        let coords = [cells[0].coord(), cells[1].coord(), cells[2].coord()];
        if coords[0] == coords[1] || coords[0] == coords[2] || coords[1] == coords[2] {
            return false;
        }

        if cells.iter().any(|cell| cell.is_empty()) {
            return false;
        }

        let owner = cells[0].occupant();
        if !cells.iter().all(|cell| cell.occupant() == owner) {
            return false;
        }

        const PAIRS: [(Direction, Direction); 3] = [
            (Direction::Left, Direction::Right),
            (Direction::Upper, Direction::Lower),
            (Direction::Outer, Direction::Inner),
        ];

        cells.iter().any(|cell| {
            PAIRS.iter().any(|&(a, b)| {
                let has = |direction| {
                    cell.neighbor(direction)
                        .is_some_and(|n| coords.contains(&n))
                };
                has(a) && has(b)
            })
        })
    }

    /// Re-run the predicate against live occupancy.
    ///
    /// `cells` is the board's dense cell array (indexed by coordinate
    /// offset). A mill can stop being valid (a member cell vacated or
    /// taken by the opponent) without the `Mill` value being destroyed;
    /// the board purges such mills from its active set.
    #[must_use]
    pub(crate) fn still_valid(&self, cells: &[Cell]) -> bool {
        let [a, b, c] = self.cells;
        Self::is_mill([
            &cells[a.offset()],
            &cells[b.offset()],
            &cells[c.offset()],
        ]) && cells[a.offset()].occupant() == Some(&self.owner)
    }

    /// The canonical (sorted) cell triple.
    #[must_use]
    pub fn cells(&self) -> &[Coord; 3] {
        &self.cells
    }

    /// The owner captured at construction.
    #[must_use]
    pub fn owner(&self) -> &PlayerId {
        &self.owner
    }

    /// Whether this mill has already granted its capture.
    #[must_use]
    pub fn utilized(&self) -> bool {
        self.utilized
    }

    /// Mark the mill as having granted its capture.
    ///
    /// One-shot: a second call fails with [`BoardError::AlreadyUtilized`].
    pub fn set_utilized(&mut self) -> Result<(), BoardError> {
        if self.utilized {
            return Err(BoardError::AlreadyUtilized);
        }
        self.utilized = true;
        Ok(())
    }

    /// Containment test by coordinate.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// Iterate the triple in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().copied()
    }

    /// This mill's copyable identity.
    #[must_use]
    pub fn key(&self) -> MillKey {
        MillKey {
            cells: self.cells,
            owner: self.owner.clone(),
        }
    }
}

// Same owner, same cell set, regardless of `utilized`.
impl PartialEq for Mill {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells && self.owner == other.owner
    }
}

impl Eq for Mill {}

impl std::hash::Hash for Mill {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.cells.hash(hasher);
        self.owner.hash(hasher);
    }
}

impl std::ops::Index<usize> for Mill {
    type Output = Coord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

impl std::fmt::Display for Mill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}--{}--{} ({})",
            self.cells[0], self.cells[1], self.cells[2], self.owner
        )
    }
}
