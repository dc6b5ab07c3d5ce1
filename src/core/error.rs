//! Board-level error taxonomy.
//!
//! Every variant is a rejected precondition; there are no resource or IO
//! failures in the core. Identity errors (`InvalidCell`, `InvalidPlayers`,
//! `UnknownPlayer`) are caller bugs; legality errors (`CellOccupied`,
//! `CellEmpty`, `NotAdjacent`, `NoPiecesLeft`) are recoverable at the turn
//! layer; mill errors (`InvalidMill`, `AlreadyUtilized`) indicate a bug in
//! mill bookkeeping if they ever surface from board-internal calls.
//!
//! Validation always happens before mutation, so a rejected operation
//! leaves the board unchanged.

use thiserror::Error;

use super::coord::Coord;
use super::player::PlayerId;

/// Rejected precondition on a board operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The three indices do not address a real cell.
    #[error("invalid cell coordinates ({square},{vertical},{horizontal})")]
    InvalidCell {
        square: u8,
        vertical: u8,
        horizontal: u8,
    },

    /// Board construction needs two distinct, non-empty player names.
    #[error("a board requires two distinct, non-empty players")]
    InvalidPlayers,

    /// The player is not one of the registered pair.
    #[error("player '{0}' is not registered on this board")]
    UnknownPlayer(PlayerId),

    /// The target cell already holds a piece.
    #[error("cell {0} is already occupied")]
    CellOccupied(Coord),

    /// The cell holds no piece.
    #[error("cell {0} is empty")]
    CellEmpty(Coord),

    /// The destination is not a neighbor of the source.
    #[error("cell {to} is not adjacent to {from}")]
    NotAdjacent { from: Coord, to: Coord },

    /// The player has no ready pieces left to place.
    #[error("player '{0}' has no ready pieces left")]
    NoPiecesLeft(PlayerId),

    /// The given cells do not form a mill.
    #[error("cells do not form a mill")]
    InvalidMill,

    /// The mill has already granted its one capture.
    #[error("mill has already been utilized")]
    AlreadyUtilized,
}
