//! The board: cells, piece pools, and the active mill set.
//!
//! `Board` is the single owner of all game state. It holds the 24 cells in
//! a dense array (indexed by coordinate offset), both players' pieces
//! partitioned into ready/placed/dead buckets, and the currently recognized
//! mills. All links between the aggregates are values (coordinates and
//! player ids), so a clone is a fully independent deep copy.
//!
//! ## Invariants
//!
//! After every mutating call:
//! - each player's buckets sum to nine pieces,
//! - a cell's occupant matches the placed piece bound to it (or both empty),
//! - every mill in the active set satisfies the mill predicate.
//!
//! Mutators validate before touching any state, so a rejected call leaves
//! the board exactly as it was.
//!
//! ## Mill recomputation
//!
//! Every mutator marks the mill set dirty and recomputes it before
//! returning: invalid mills are purged, and all C(24,3) = 2024 cell triples
//! are scanned for new ones. The board is tiny; the straightforward scan is
//! well within budget.

pub mod cell;
mod display;
pub mod mill;

use smallvec::SmallVec;
use tracing::trace;

use crate::core::{BoardError, Coord, Piece, PieceState, PlayerId};
use crate::rules::{phase_for_counts, GameOutcome, PlayerPhase, WinRule};

pub use cell::Cell;
pub use mill::{Mill, MillKey};

/// One player's pieces, partitioned by lifecycle state.
#[derive(Clone, Debug, Default)]
struct PieceBuckets {
    ready: Vec<Piece>,
    placed: Vec<Piece>,
    dead: Vec<Piece>,
}

impl PieceBuckets {
    fn new(owner: &PlayerId) -> Self {
        Self {
            ready: (1..=9).map(|id| Piece::new(owner.clone(), id)).collect(),
            placed: Vec::new(),
            dead: Vec::new(),
        }
    }
}

/// The Nine Men's Morris board.
///
/// ```
/// use morris_engine::board::Board;
///
/// let mut board = Board::new("alice", "bob").unwrap();
/// let cell = board.cells()[0].coord();
/// let piece = board.place(cell, &"alice".into()).unwrap();
/// assert_eq!(piece.owner().name(), "alice");
/// assert_eq!(board.cell(cell).occupant(), Some(&"alice".into()));
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    players: [PlayerId; 2],
    /// The 24 cells, sorted by coordinate (dense offset order).
    cells: Vec<Cell>,
    /// Piece buckets, parallel to `players`.
    pieces: [PieceBuckets; 2],
    /// Currently recognized mills.
    mills: Vec<Mill>,
    /// Set by mutators, cleared by `check_mills`.
    dirty_mills: bool,
}

impl Board {
    /// Create a board for two players.
    ///
    /// Fails with [`BoardError::InvalidPlayers`] unless the two identifiers
    /// are distinct and non-empty. Allocates nine ready pieces per player
    /// and wires the (static) cell topology.
    pub fn new(
        first: impl Into<PlayerId>,
        second: impl Into<PlayerId>,
    ) -> Result<Self, BoardError> {
        let first = first.into();
        let second = second.into();
        if first.is_empty() || second.is_empty() || first == second {
            return Err(BoardError::InvalidPlayers);
        }

        let cells: Vec<Cell> = Coord::all().map(Cell::new).collect();
        let pieces = [PieceBuckets::new(&first), PieceBuckets::new(&second)];

        let mut board = Self {
            players: [first, second],
            cells,
            pieces,
            mills: Vec::new(),
            dirty_mills: true,
        };
        board.check_mills();
        Ok(board)
    }

    // === Players ===

    /// The registered pair, in registration order.
    #[must_use]
    pub fn players(&self) -> &[PlayerId; 2] {
        &self.players
    }

    /// The other member of the registered pair.
    pub fn opponent_of(&self, player: &PlayerId) -> Result<&PlayerId, BoardError> {
        let slot = self.slot(player)?;
        Ok(&self.players[1 - slot])
    }

    /// Bucket index for a registered player.
    fn slot(&self, player: &PlayerId) -> Result<usize, BoardError> {
        self.players
            .iter()
            .position(|p| p == player)
            .ok_or_else(|| BoardError::UnknownPlayer(player.clone()))
    }

    // === Cells ===

    /// All 24 cells in coordinate order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at a coordinate.
    #[must_use]
    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[coord.offset()]
    }

    fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        &mut self.cells[coord.offset()]
    }

    /// Resolve raw indices to a cell, validating the coordinate.
    ///
    /// Convenience for front ends holding unvalidated input; fails with
    /// [`BoardError::InvalidCell`].
    pub fn cell_at(&self, square: u8, vertical: u8, horizontal: u8) -> Result<&Cell, BoardError> {
        Ok(self.cell(Coord::new(square, vertical, horizontal)?))
    }

    /// Whether every cell is vacant.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    // === Mutators ===

    /// Place one of `player`'s ready pieces on an empty cell.
    ///
    /// Fails with [`BoardError::NoPiecesLeft`] when the ready bucket is
    /// empty and [`BoardError::CellOccupied`] when the target is taken.
    /// Returns a snapshot of the placed piece.
    pub fn place(&mut self, coord: Coord, player: &PlayerId) -> Result<Piece, BoardError> {
        let slot = self.slot(player)?;
        if self.pieces[slot].ready.is_empty() {
            return Err(BoardError::NoPiecesLeft(player.clone()));
        }
        self.ensure_empty(coord)?;

        self.dirty_mills = true;
        let mut piece = self.pieces[slot]
            .ready
            .pop()
            .expect("ready bucket checked non-empty");
        piece.set_state(PieceState::Placed);
        piece.set_cell(Some(coord));
        let snapshot = piece.clone();
        self.pieces[slot].placed.push(piece);
        self.cell_mut(coord).set_occupant(Some(player.clone()));

        trace!(cell = %coord, player = %player, "piece placed");
        self.check_mills();
        Ok(snapshot)
    }

    /// Take the piece off a cell and return it to its owner's ready bucket.
    ///
    /// Not a player-visible action; it exists as the inverse of `place`.
    /// Fails with [`BoardError::CellEmpty`].
    pub fn remove(&mut self, coord: Coord) -> Result<Piece, BoardError> {
        let owner = self.occupant_of(coord)?;
        let slot = self.slot(&owner)?;

        self.dirty_mills = true;
        let mut piece = self.take_placed(slot, coord);
        piece.set_state(PieceState::Ready);
        piece.set_cell(None);
        let snapshot = piece.clone();
        self.pieces[slot].ready.push(piece);
        self.cell_mut(coord).reset();

        trace!(cell = %coord, player = %owner, "piece removed");
        self.check_mills();
        Ok(snapshot)
    }

    /// Move a piece to an adjacent empty cell.
    ///
    /// Fails with [`BoardError::CellEmpty`] (source),
    /// [`BoardError::CellOccupied`] (destination), or
    /// [`BoardError::NotAdjacent`].
    pub fn slide(&mut self, from: Coord, to: Coord) -> Result<Piece, BoardError> {
        self.occupant_of(from)?;
        self.ensure_empty(to)?;
        if !self.cell(from).is_neighbor(to) {
            return Err(BoardError::NotAdjacent { from, to });
        }
        self.relocate(from, to)
    }

    /// Move a piece to any empty cell, ignoring adjacency.
    ///
    /// Used once a player is down to three pieces.
    pub fn fly(&mut self, from: Coord, to: Coord) -> Result<Piece, BoardError> {
        self.occupant_of(from)?;
        self.ensure_empty(to)?;
        self.relocate(from, to)
    }

    /// Validated relocation: direct cell reassignment, no ready bounce,
    /// so the bucket invariant holds at every step.
    fn relocate(&mut self, from: Coord, to: Coord) -> Result<Piece, BoardError> {
        let owner = self.occupant_of(from)?;
        let slot = self.slot(&owner)?;

        self.dirty_mills = true;
        let piece = self.pieces[slot]
            .placed
            .iter_mut()
            .find(|piece| piece.cell() == Some(from))
            .expect("occupied cell has a placed piece bound to it");
        piece.set_cell(Some(to));
        let snapshot = piece.clone();
        self.cell_mut(from).reset();
        self.cell_mut(to).set_occupant(Some(owner.clone()));

        trace!(from = %from, to = %to, player = %owner, "piece relocated");
        self.check_mills();
        Ok(snapshot)
    }

    /// Capture the piece on a cell: it leaves the board for good.
    ///
    /// Fails with [`BoardError::CellEmpty`]. When `mill` is given, that
    /// mill is marked utilized (its one capture spent); a missing key fails
    /// with [`BoardError::InvalidMill`], an already-spent one with
    /// [`BoardError::AlreadyUtilized`], both checked before any mutation.
    ///
    /// Capturing one's own piece is not prevented here; the turn driver
    /// restricts capture targets to the opponent.
    pub fn kill(&mut self, coord: Coord, mill: Option<&MillKey>) -> Result<Piece, BoardError> {
        let owner = self.occupant_of(coord)?;
        let mill_index = match mill {
            Some(key) => {
                let index = self
                    .mills
                    .iter()
                    .position(|m| m.key() == *key)
                    .ok_or(BoardError::InvalidMill)?;
                if self.mills[index].utilized() {
                    return Err(BoardError::AlreadyUtilized);
                }
                Some(index)
            }
            None => None,
        };
        let slot = self.slot(&owner)?;

        self.dirty_mills = true;
        let mut piece = self.take_placed(slot, coord);
        piece.set_state(PieceState::Dead);
        piece.set_cell(None);
        let snapshot = piece.clone();
        self.pieces[slot].dead.push(piece);
        self.cell_mut(coord).reset();
        if let Some(index) = mill_index {
            self.mills[index].set_utilized()?;
        }

        trace!(cell = %coord, player = %owner, "piece captured");
        self.check_mills();
        Ok(snapshot)
    }

    /// Clear the board back to its post-construction state.
    ///
    /// Cells empty, every piece ready again, no mills. The piece pools are
    /// the same eighteen pieces; identity survives a reset.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
        self.mills.clear();
        for bucket in &mut self.pieces {
            let mut all: Vec<Piece> = bucket
                .ready
                .drain(..)
                .chain(bucket.placed.drain(..))
                .chain(bucket.dead.drain(..))
                .collect();
            for piece in &mut all {
                piece.set_state(PieceState::Ready);
                piece.set_cell(None);
            }
            all.sort_by_key(Piece::id);
            bucket.ready = all;
        }
        self.dirty_mills = false;
    }

    fn occupant_of(&self, coord: Coord) -> Result<PlayerId, BoardError> {
        self.cell(coord)
            .occupant()
            .cloned()
            .ok_or(BoardError::CellEmpty(coord))
    }

    fn ensure_empty(&self, coord: Coord) -> Result<(), BoardError> {
        if self.cell(coord).is_empty() {
            Ok(())
        } else {
            Err(BoardError::CellOccupied(coord))
        }
    }

    fn take_placed(&mut self, slot: usize, coord: Coord) -> Piece {
        let index = self.pieces[slot]
            .placed
            .iter()
            .position(|piece| piece.cell() == Some(coord))
            .expect("occupied cell has a placed piece bound to it");
        self.pieces[slot].placed.remove(index)
    }

    // === Mills ===

    /// Recompute the active mill set against current occupancy.
    ///
    /// Drops mills whose predicate no longer holds, then scans every cell
    /// triple and adds newly qualifying mills not already present (by mill
    /// equality, which ignores the utilized flag, so a spent mill that still
    /// stands is not rediscovered as fresh).
    pub fn check_mills(&mut self) {
        let cells = &self.cells;
        self.mills.retain(|mill| mill.still_valid(cells));

        let mut found: Vec<Mill> = Vec::new();
        for i in 0..cells.len() {
            for j in (i + 1)..cells.len() {
                for k in (j + 1)..cells.len() {
                    if let Ok(mill) = Mill::new([&cells[i], &cells[j], &cells[k]]) {
                        if !self.mills.contains(&mill) && !found.contains(&mill) {
                            found.push(mill);
                        }
                    }
                }
            }
        }
        for mill in &found {
            trace!(%mill, "mill formed");
        }
        self.mills.append(&mut found);
        self.dirty_mills = false;
    }

    /// The active mill set.
    #[must_use]
    pub fn mills(&self) -> &[Mill] {
        debug_assert!(!self.dirty_mills, "mill set read while dirty");
        &self.mills
    }

    /// Active mills owned by a player.
    pub fn player_mills(&self, player: &PlayerId) -> Result<Vec<&Mill>, BoardError> {
        self.slot(player)?;
        Ok(self.mills().iter().filter(|m| m.owner() == player).collect())
    }

    /// Active mills owned by a player's opponent.
    pub fn opponent_mills(&self, player: &PlayerId) -> Result<Vec<&Mill>, BoardError> {
        let opponent = self.opponent_of(player)?.clone();
        self.player_mills(&opponent)
    }

    // === Cell queries ===

    /// All vacant cells.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<&Cell> {
        self.cells.iter().filter(|c| c.is_empty()).collect()
    }

    /// All occupied cells.
    #[must_use]
    pub fn occupied_cells(&self) -> Vec<&Cell> {
        self.cells.iter().filter(|c| !c.is_empty()).collect()
    }

    /// Cells occupied by a player.
    pub fn player_cells(&self, player: &PlayerId) -> Result<Vec<&Cell>, BoardError> {
        let slot = self.slot(player)?;
        Ok(self.cells_of(slot).collect())
    }

    /// Cells occupied by a player's opponent.
    pub fn opponent_cells(&self, player: &PlayerId) -> Result<Vec<&Cell>, BoardError> {
        let slot = self.slot(player)?;
        Ok(self.cells_of(1 - slot).collect())
    }

    fn cells_of(&self, slot: usize) -> impl Iterator<Item = &Cell> {
        let owner = &self.players[slot];
        self.cells.iter().filter(move |c| c.occupant() == Some(owner))
    }

    /// Empty neighbors of a cell: the legal slide destinations from it.
    #[must_use]
    pub fn destinations(&self, from: Coord) -> SmallVec<[Coord; 4]> {
        self.cell(from)
            .neighbors()
            .into_iter()
            .filter(|&(_, n)| self.cell(n).is_empty())
            .map(|(_, n)| n)
            .collect()
    }

    /// All legal `(from, to)` slide pairs for a player.
    pub fn possible_slides(&self, player: &PlayerId) -> Result<Vec<(Coord, Coord)>, BoardError> {
        let slot = self.slot(player)?;
        Ok(self
            .cells_of(slot)
            .flat_map(|cell| {
                let from = cell.coord();
                self.destinations(from).into_iter().map(move |to| (from, to))
            })
            .collect())
    }

    // === Piece queries ===

    /// A player's ready pieces.
    pub fn ready_pieces(&self, player: &PlayerId) -> Result<&[Piece], BoardError> {
        Ok(&self.pieces[self.slot(player)?].ready)
    }

    /// A player's placed pieces.
    pub fn placed_pieces(&self, player: &PlayerId) -> Result<&[Piece], BoardError> {
        Ok(&self.pieces[self.slot(player)?].placed)
    }

    /// A player's dead pieces.
    pub fn dead_pieces(&self, player: &PlayerId) -> Result<&[Piece], BoardError> {
        Ok(&self.pieces[self.slot(player)?].dead)
    }

    /// All nine of a player's pieces, across every bucket.
    pub fn pieces(&self, player: &PlayerId) -> Result<Vec<&Piece>, BoardError> {
        let bucket = &self.pieces[self.slot(player)?];
        Ok(bucket
            .ready
            .iter()
            .chain(&bucket.placed)
            .chain(&bucket.dead)
            .collect())
    }

    /// The opponent's ready pieces.
    pub fn opponent_ready_pieces(&self, player: &PlayerId) -> Result<&[Piece], BoardError> {
        Ok(&self.pieces[1 - self.slot(player)?].ready)
    }

    /// The opponent's placed pieces.
    pub fn opponent_placed_pieces(&self, player: &PlayerId) -> Result<&[Piece], BoardError> {
        Ok(&self.pieces[1 - self.slot(player)?].placed)
    }

    /// The opponent's dead pieces.
    pub fn opponent_dead_pieces(&self, player: &PlayerId) -> Result<&[Piece], BoardError> {
        Ok(&self.pieces[1 - self.slot(player)?].dead)
    }

    // === Derived state ===

    /// A player's current phase.
    ///
    /// Holding an active, not-yet-utilized mill puts a player in `Killing`
    /// regardless of bucket counts; otherwise the phase is the pure
    /// function of ready/placed counts (see [`phase_for_counts`]).
    ///
    /// A capture needs a target: with no opponent piece on the board the
    /// grant is unexercisable and the phase falls through to the table.
    pub fn player_phase(&self, player: &PlayerId) -> Result<PlayerPhase, BoardError> {
        let slot = self.slot(player)?;
        let pending_mill = self
            .mills()
            .iter()
            .any(|m| m.owner() == player && !m.utilized());
        if pending_mill && self.cells_of(1 - slot).next().is_some() {
            return Ok(PlayerPhase::Killing);
        }
        let bucket = &self.pieces[slot];
        Ok(phase_for_counts(bucket.ready.len(), bucket.placed.len()))
    }

    /// Evaluate the game-over condition under a rule variant.
    ///
    /// `None` while the game continues.
    #[must_use]
    pub fn game_over(&self, rule: WinRule) -> Option<GameOutcome> {
        let ready: [usize; 2] = [self.pieces[0].ready.len(), self.pieces[1].ready.len()];
        let placed: [usize; 2] = [self.pieces[0].placed.len(), self.pieces[1].placed.len()];

        // Every variant waits for placement to finish.
        if ready[0] + ready[1] > 0 {
            return None;
        }

        match rule {
            WinRule::Placement => Some(match placed[0].cmp(&placed[1]) {
                std::cmp::Ordering::Greater => GameOutcome::Winner(self.players[0].clone()),
                std::cmp::Ordering::Less => GameOutcome::Winner(self.players[1].clone()),
                std::cmp::Ordering::Equal => GameOutcome::Draw,
            }),
            WinRule::ThreePiece | WinRule::TwoPiece => {
                let threshold = rule
                    .piece_threshold()
                    .expect("threshold rules carry a piece threshold");
                for slot in 0..2 {
                    if placed[slot] <= threshold || self.is_stuck(slot) {
                        return Some(GameOutcome::Winner(self.players[1 - slot].clone()));
                    }
                }
                None
            }
        }
    }

    /// Whether the player in `slot` has no legal move left.
    ///
    /// A flying player (three placed pieces) can reach any empty cell; a
    /// moving player needs an empty neighbor somewhere.
    fn is_stuck(&self, slot: usize) -> bool {
        if self.pieces[slot].placed.len() == 3 {
            return self.cells.iter().all(|c| !c.is_empty());
        }
        self.cells_of(slot)
            .all(|cell| self.destinations(cell.coord()).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(s: u8, v: u8, h: u8) -> Coord {
        Coord::new(s, v, h).unwrap()
    }

    fn board() -> Board {
        Board::new("Easy", "Challenging").unwrap()
    }

    fn easy() -> PlayerId {
        PlayerId::new("Easy")
    }

    fn challenging() -> PlayerId {
        PlayerId::new("Challenging")
    }

    #[test]
    fn test_construction() {
        let board = board();
        assert_eq!(board.cells().len(), 24);
        assert_eq!(board.mills().len(), 0);
        assert!(board.is_empty());
        for player in [easy(), challenging()] {
            assert_eq!(board.ready_pieces(&player).unwrap().len(), 9);
            assert_eq!(board.placed_pieces(&player).unwrap().len(), 0);
            assert_eq!(board.dead_pieces(&player).unwrap().len(), 0);
            assert_eq!(board.pieces(&player).unwrap().len(), 9);
        }
    }

    #[test]
    fn test_invalid_players_rejected() {
        assert_eq!(Board::new("x", "x").unwrap_err(), BoardError::InvalidPlayers);
        assert_eq!(Board::new("", "y").unwrap_err(), BoardError::InvalidPlayers);
        assert_eq!(Board::new("x", "").unwrap_err(), BoardError::InvalidPlayers);
    }

    #[test]
    fn test_unknown_player_rejected() {
        let mut board = board();
        let ghost = PlayerId::new("ghost");
        assert_eq!(
            board.place(coord(0, 0, 0), &ghost).unwrap_err(),
            BoardError::UnknownPlayer(ghost.clone())
        );
        assert_eq!(
            board.player_cells(&ghost).unwrap_err(),
            BoardError::UnknownPlayer(ghost)
        );
    }

    #[test]
    fn test_place_round_trip() {
        let mut board = board();
        let target = coord(1, 0, 2);

        let piece = board.place(target, &easy()).unwrap();
        assert_eq!(piece.owner(), &easy());
        assert_eq!(piece.state(), PieceState::Placed);
        assert_eq!(piece.cell(), Some(target));
        assert_eq!(board.cell(target).occupant(), Some(&easy()));
        assert_eq!(board.ready_pieces(&easy()).unwrap().len(), 8);
        assert_eq!(board.placed_pieces(&easy()).unwrap().len(), 1);

        assert_eq!(
            board.place(target, &challenging()).unwrap_err(),
            BoardError::CellOccupied(target)
        );
    }

    #[test]
    fn test_place_out_of_pieces() {
        let mut board = board();
        let empties: Vec<Coord> = board.cells().iter().map(Cell::coord).collect();
        for &c in empties.iter().take(9) {
            board.place(c, &easy()).unwrap();
        }
        assert_eq!(
            board.place(empties[10], &easy()).unwrap_err(),
            BoardError::NoPiecesLeft(easy())
        );
    }

    #[test]
    fn test_remove_round_trip() {
        let mut board = board();
        let target = coord(2, 1, 0);
        board.place(target, &easy()).unwrap();

        let piece = board.remove(target).unwrap();
        assert_eq!(piece.state(), PieceState::Ready);
        assert_eq!(piece.cell(), None);
        assert!(board.cell(target).is_empty());
        assert_eq!(board.ready_pieces(&easy()).unwrap().len(), 9);

        assert_eq!(
            board.remove(target).unwrap_err(),
            BoardError::CellEmpty(target)
        );
    }

    #[test]
    fn test_slide_requires_adjacency() {
        let mut board = board();
        let from = coord(0, 0, 0);
        board.place(from, &easy()).unwrap();

        let far = coord(2, 2, 2);
        assert_eq!(
            board.slide(from, far).unwrap_err(),
            BoardError::NotAdjacent { from, to: far }
        );

        let next = coord(0, 0, 1);
        let piece = board.slide(from, next).unwrap();
        assert_eq!(piece.state(), PieceState::Placed);
        assert_eq!(piece.cell(), Some(next));
        assert!(board.cell(from).is_empty());
        assert_eq!(board.cell(next).occupant(), Some(&easy()));
    }

    #[test]
    fn test_slide_validates_ends() {
        let mut board = board();
        let from = coord(0, 0, 0);
        let to = coord(0, 0, 1);
        assert_eq!(
            board.slide(from, to).unwrap_err(),
            BoardError::CellEmpty(from)
        );

        board.place(from, &easy()).unwrap();
        board.place(to, &challenging()).unwrap();
        assert_eq!(
            board.slide(from, to).unwrap_err(),
            BoardError::CellOccupied(to)
        );
    }

    #[test]
    fn test_fly_ignores_adjacency() {
        let mut board = board();
        let from = coord(0, 0, 0);
        let to = coord(2, 2, 2);
        board.place(from, &easy()).unwrap();

        let piece = board.fly(from, to).unwrap();
        assert_eq!(piece.cell(), Some(to));
        assert!(board.cell(from).is_empty());
        assert_eq!(board.cell(to).occupant(), Some(&easy()));
    }

    #[test]
    fn test_kill_bookkeeping() {
        let mut board = board();
        let target = coord(1, 2, 1);
        let placed = board.place(target, &challenging()).unwrap();

        let killed = board.kill(target, None).unwrap();
        assert_eq!(killed, placed);
        assert_eq!(killed.state(), PieceState::Dead);
        assert_eq!(killed.cell(), None);
        assert!(board.cell(target).is_empty());
        assert_eq!(board.dead_pieces(&challenging()).unwrap().len(), 1);
        assert_eq!(board.placed_pieces(&challenging()).unwrap().len(), 0);
        assert_eq!(board.ready_pieces(&challenging()).unwrap().len(), 8);

        assert_eq!(
            board.kill(target, None).unwrap_err(),
            BoardError::CellEmpty(target)
        );
    }

    #[test]
    fn test_mill_recognition_and_capture() {
        let mut board = board();
        board.place(coord(0, 0, 0), &easy()).unwrap();
        board.place(coord(0, 1, 0), &easy()).unwrap();
        assert_eq!(board.mills().len(), 0);

        board.place(coord(0, 2, 0), &easy()).unwrap();
        assert_eq!(board.mills().len(), 1);
        assert_eq!(board.player_mills(&easy()).unwrap().len(), 1);
        assert_eq!(board.player_mills(&challenging()).unwrap().len(), 0);
        assert_eq!(board.opponent_mills(&challenging()).unwrap().len(), 1);

        let victim = coord(2, 0, 0);
        board.place(victim, &challenging()).unwrap();
        let key = board.mills()[0].key();
        board.kill(victim, Some(&key)).unwrap();
        assert!(board.mills()[0].utilized());

        // The same mill cannot grant a second capture.
        let victim2 = coord(2, 0, 1);
        board.place(victim2, &challenging()).unwrap();
        assert_eq!(
            board.kill(victim2, Some(&key)).unwrap_err(),
            BoardError::AlreadyUtilized
        );
        // And the rejected call left the board untouched.
        assert_eq!(board.cell(victim2).occupant(), Some(&challenging()));
    }

    #[test]
    fn test_broken_mill_is_purged_and_reforms_fresh() {
        let mut board = board();
        board.place(coord(0, 0, 0), &easy()).unwrap();
        board.place(coord(0, 1, 0), &easy()).unwrap();
        board.place(coord(0, 2, 0), &easy()).unwrap();
        let key = board.mills()[0].key();
        board.kill(coord(2, 2, 2), Some(&key)).unwrap_err(); // empty target
        assert_eq!(board.mills().len(), 1);

        // Sliding a member cell away destroys the mill.
        board.slide(coord(0, 1, 0), coord(1, 1, 0)).unwrap();
        assert_eq!(board.mills().len(), 0);

        // Sliding back re-forms it as a fresh, unutilized mill.
        board.slide(coord(1, 1, 0), coord(0, 1, 0)).unwrap();
        assert_eq!(board.mills().len(), 1);
        assert!(!board.mills()[0].utilized());
    }

    #[test]
    fn test_utilized_mill_not_rediscovered() {
        let mut board = board();
        board.place(coord(0, 0, 0), &easy()).unwrap();
        board.place(coord(0, 1, 0), &easy()).unwrap();
        board.place(coord(0, 2, 0), &easy()).unwrap();
        board.place(coord(2, 0, 0), &challenging()).unwrap();

        let key = board.mills()[0].key();
        board.kill(coord(2, 0, 0), Some(&key)).unwrap();

        // Recomputation keeps the standing mill utilized.
        board.place(coord(2, 0, 1), &challenging()).unwrap();
        assert_eq!(board.mills().len(), 1);
        assert!(board.mills()[0].utilized());
    }

    #[test]
    fn test_cell_queries() {
        let mut board = board();
        board.place(coord(0, 0, 0), &easy()).unwrap();
        board.place(coord(0, 0, 1), &challenging()).unwrap();

        assert_eq!(board.empty_cells().len(), 22);
        assert_eq!(board.occupied_cells().len(), 2);
        assert_eq!(board.player_cells(&easy()).unwrap().len(), 1);
        assert_eq!(board.opponent_cells(&easy()).unwrap().len(), 1);
        assert_eq!(
            board.player_cells(&easy()).unwrap()[0].coord(),
            coord(0, 0, 0)
        );
    }

    #[test]
    fn test_destinations_and_possible_slides() {
        let mut board = board();
        let from = coord(0, 0, 0);
        board.place(from, &easy()).unwrap();

        let mut destinations: Vec<Coord> = board.destinations(from).into_iter().collect();
        destinations.sort();
        assert_eq!(destinations, vec![coord(0, 0, 1), coord(0, 1, 0)]);

        board.place(coord(0, 0, 1), &challenging()).unwrap();
        assert_eq!(board.destinations(from).len(), 1);

        let slides = board.possible_slides(&easy()).unwrap();
        assert_eq!(slides, vec![(from, coord(0, 1, 0))]);
    }

    #[test]
    fn test_phase_progression() {
        let mut board = board();
        assert_eq!(board.player_phase(&easy()).unwrap(), PlayerPhase::Placing);

        // Place all nine pieces without forming a mill.
        let spots = [
            coord(0, 0, 0),
            coord(0, 0, 2),
            coord(0, 2, 1),
            coord(1, 0, 1),
            coord(1, 2, 0),
            coord(2, 0, 0),
            coord(2, 1, 2),
            coord(2, 2, 1),
            coord(0, 1, 2),
        ];
        for &c in &spots {
            board.place(c, &easy()).unwrap();
        }
        assert_eq!(board.mills().len(), 0);
        assert_eq!(board.player_phase(&easy()).unwrap(), PlayerPhase::Moving);

        // Capture down to three: flying.
        for &c in spots.iter().take(6) {
            board.kill(c, None).unwrap();
        }
        assert_eq!(board.player_phase(&easy()).unwrap(), PlayerPhase::Flying);

        // Below three: lost.
        board.kill(spots[6], None).unwrap();
        assert_eq!(board.player_phase(&easy()).unwrap(), PlayerPhase::Lost);
    }

    #[test]
    fn test_killing_phase_overrides() {
        let mut board = board();
        board.place(coord(2, 0, 0), &challenging()).unwrap();
        board.place(coord(0, 0, 0), &easy()).unwrap();
        board.place(coord(0, 1, 0), &easy()).unwrap();
        board.place(coord(0, 2, 0), &easy()).unwrap();

        assert_eq!(board.player_phase(&easy()).unwrap(), PlayerPhase::Killing);
        assert_eq!(
            board.player_phase(&challenging()).unwrap(),
            PlayerPhase::Placing
        );

        // Spending the mill ends the killing phase.
        let key = board.mills()[0].key();
        board.kill(coord(2, 0, 0), Some(&key)).unwrap();
        assert_eq!(board.player_phase(&easy()).unwrap(), PlayerPhase::Placing);
    }

    #[test]
    fn test_pending_mill_without_target_is_not_killing() {
        let mut board = board();
        board.place(coord(0, 0, 0), &easy()).unwrap();
        board.place(coord(0, 1, 0), &easy()).unwrap();
        board.place(coord(0, 2, 0), &easy()).unwrap();

        // The mill stands unspent, but there is nothing to capture.
        assert_eq!(board.mills().len(), 1);
        assert!(!board.mills()[0].utilized());
        assert_eq!(board.player_phase(&easy()).unwrap(), PlayerPhase::Placing);

        // A target appearing re-arms the grant.
        board.place(coord(2, 0, 0), &challenging()).unwrap();
        assert_eq!(board.player_phase(&easy()).unwrap(), PlayerPhase::Killing);
    }

    #[test]
    fn test_clone_isolation() {
        let mut board = board();
        board.place(coord(0, 0, 0), &easy()).unwrap();
        board.place(coord(0, 1, 0), &challenging()).unwrap();
        board.place(coord(0, 2, 0), &easy()).unwrap();

        let mut cloned = board.clone();
        cloned.place(coord(0, 0, 1), &easy()).unwrap();

        assert!(board.cell(coord(0, 0, 1)).is_empty());
        assert!(!cloned.cell(coord(0, 0, 1)).is_empty());
        assert_eq!(board.placed_pieces(&easy()).unwrap().len(), 2);
        assert_eq!(cloned.placed_pieces(&easy()).unwrap().len(), 3);

        // Mutating the original does not touch the clone either.
        board.kill(coord(0, 1, 0), None).unwrap();
        assert_eq!(cloned.dead_pieces(&challenging()).unwrap().len(), 0);
    }

    #[test]
    fn test_clone_preserves_utilized_flags() {
        let mut board = board();
        board.place(coord(0, 0, 0), &easy()).unwrap();
        board.place(coord(0, 1, 0), &easy()).unwrap();
        board.place(coord(0, 2, 0), &easy()).unwrap();
        board.place(coord(2, 0, 0), &challenging()).unwrap();
        let key = board.mills()[0].key();
        board.kill(coord(2, 0, 0), Some(&key)).unwrap();

        let cloned = board.clone();
        assert_eq!(cloned.mills().len(), 1);
        assert!(cloned.mills()[0].utilized());
    }

    #[test]
    fn test_reset() {
        let mut board = board();
        board.place(coord(0, 0, 0), &easy()).unwrap();
        board.place(coord(0, 1, 0), &easy()).unwrap();
        board.place(coord(0, 2, 0), &easy()).unwrap();
        board.place(coord(1, 0, 0), &challenging()).unwrap();
        board.kill(coord(1, 0, 0), None).unwrap();

        board.reset();
        assert!(board.is_empty());
        assert_eq!(board.mills().len(), 0);
        for player in [easy(), challenging()] {
            assert_eq!(board.ready_pieces(&player).unwrap().len(), 9);
            assert_eq!(board.placed_pieces(&player).unwrap().len(), 0);
            assert_eq!(board.dead_pieces(&player).unwrap().len(), 0);
        }
    }

    #[test]
    fn test_game_over_placement_tie() {
        let mut board = board();
        let coords: Vec<Coord> = board.cells().iter().map(Cell::coord).collect();
        let mut turn = 0;
        for &c in coords.iter().take(18) {
            assert!(board.game_over(WinRule::Placement).is_none());
            let player = if turn % 2 == 0 { easy() } else { challenging() };
            board.place(c, &player).unwrap();
            turn += 1;
        }
        assert_eq!(board.game_over(WinRule::Placement), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_game_over_placement_winner() {
        let mut board = board();
        let coords: Vec<Coord> = board.cells().iter().map(Cell::coord).collect();
        for (i, &c) in coords.iter().take(18).enumerate() {
            let player = if i % 2 == 0 { easy() } else { challenging() };
            board.place(c, &player).unwrap();
        }
        // One of Challenging's pieces falls: Easy leads on placed count.
        let victim = board.player_cells(&challenging()).unwrap()[0].coord();
        board.kill(victim, None).unwrap();
        assert_eq!(
            board.game_over(WinRule::Placement),
            Some(GameOutcome::Winner(easy()))
        );
    }

    #[test]
    fn test_game_over_three_piece_threshold() {
        let mut board = board();
        let coords: Vec<Coord> = board.cells().iter().map(Cell::coord).collect();
        for (i, &c) in coords.iter().take(18).enumerate() {
            let player = if i % 2 == 0 { easy() } else { challenging() };
            board.place(c, &player).unwrap();
        }
        assert!(board.game_over(WinRule::ThreePiece).is_none());

        // Capture Challenging down to four pieces: still on.
        for _ in 0..5 {
            let victim = board.player_cells(&challenging()).unwrap()[0].coord();
            board.kill(victim, None).unwrap();
            assert!(board.game_over(WinRule::TwoPiece).is_none());
        }
        // The sixth capture leaves three: the three-piece rule ends it.
        let victim = board.player_cells(&challenging()).unwrap()[0].coord();
        board.kill(victim, None).unwrap();
        assert_eq!(
            board.game_over(WinRule::ThreePiece),
            Some(GameOutcome::Winner(easy()))
        );
        // The two-piece rule keeps playing (flying phase).
        assert!(board.game_over(WinRule::TwoPiece).is_none());

        let victim = board.player_cells(&challenging()).unwrap()[0].coord();
        board.kill(victim, None).unwrap();
        assert_eq!(
            board.game_over(WinRule::TwoPiece),
            Some(GameOutcome::Winner(easy()))
        );
    }

    #[test]
    fn test_piece_conservation() {
        let mut board = board();
        board.place(coord(0, 0, 0), &easy()).unwrap();
        board.place(coord(0, 1, 0), &easy()).unwrap();
        board.place(coord(1, 0, 0), &challenging()).unwrap();
        board.slide(coord(0, 0, 0), coord(0, 0, 1)).unwrap();
        board.kill(coord(1, 0, 0), None).unwrap();
        board.remove(coord(0, 1, 0)).unwrap();

        for player in [easy(), challenging()] {
            let ready = board.ready_pieces(&player).unwrap().len();
            let placed = board.placed_pieces(&player).unwrap().len();
            let dead = board.dead_pieces(&player).unwrap().len();
            assert_eq!(ready + placed + dead, 9);
        }
    }
}
