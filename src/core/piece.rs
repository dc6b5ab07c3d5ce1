//! Game pieces and their lifecycle.
//!
//! Each player owns exactly nine pieces for the lifetime of a game. A piece
//! moves through three lifecycle buckets:
//! - `Ready`: waiting to be placed,
//! - `Placed`: on the board (its `cell` is bound),
//! - `Dead`: captured and out of the game (terminal).
//!
//! Identity is `(owner, id)`, never the occupied cell, so a piece keeps
//! its identity across boards and across moves.

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::player::PlayerId;

/// Lifecycle state of a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceState {
    /// Waiting to be placed on the board.
    Ready,
    /// Currently on the board.
    Placed,
    /// Captured; never returns to play.
    Dead,
}

impl std::fmt::Display for PieceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceState::Ready => "Ready",
            PieceState::Placed => "Placed",
            PieceState::Dead => "Dead",
        };
        write!(f, "{}", name)
    }
}

/// A single owned token.
///
/// The cell binding is a plain coordinate, not a reference, so a piece is
/// meaningful on any board that shares the same lattice. `cell` is `Some`
/// iff the piece is `Placed`; callers coordinate the two (setting the cell
/// does not change the state by itself).
///
/// ```
/// use morris_engine::core::{Piece, PieceState, PlayerId};
///
/// let piece = Piece::new(PlayerId::new("alice"), 1);
/// assert_eq!(piece.state(), PieceState::Ready);
/// assert_eq!(piece.cell(), None);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Piece {
    owner: PlayerId,
    id: u8,
    state: PieceState,
    cell: Option<Coord>,
}

impl Piece {
    /// Create a ready, unplaced piece.
    #[must_use]
    pub fn new(owner: PlayerId, id: u8) -> Self {
        Self {
            owner,
            id,
            state: PieceState::Ready,
            cell: None,
        }
    }

    /// The owning player.
    #[must_use]
    pub fn owner(&self) -> &PlayerId {
        &self.owner
    }

    /// Stable per-owner sequence id (identity, not user-visible).
    #[must_use]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PieceState {
        self.state
    }

    /// The occupied cell, bound iff the piece is `Placed`.
    #[must_use]
    pub fn cell(&self) -> Option<Coord> {
        self.cell
    }

    /// Set the lifecycle state.
    pub fn set_state(&mut self, state: PieceState) {
        self.state = state;
    }

    /// Bind or clear the cell. Does not touch the state.
    pub fn set_cell(&mut self, cell: Option<Coord>) {
        self.cell = cell;
    }

    /// Copy of this piece with the cell binding replaced.
    ///
    /// Owner, id, and state carry over; the cell is whatever the caller
    /// supplies (typically `None`, since a copy usually belongs to another
    /// board's lattice until re-bound).
    #[must_use]
    pub fn rebound(&self, cell: Option<Coord>) -> Piece {
        Piece {
            owner: self.owner.clone(),
            id: self.id,
            state: self.state,
            cell,
        }
    }
}

// Identity is (owner, id); state and cell are transient.
impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.id == other.id
    }
}

impl Eq for Piece {}

impl std::hash::Hash for Piece {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.owner.hash(hasher);
        self.id.hash(hasher);
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "piece {} of {} ({})", self.id, self.owner, self.state)?;
        if let Some(cell) = self.cell {
            write!(f, " at {}", cell)?;
        }
        Ok(())
    }
}
