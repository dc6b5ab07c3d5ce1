//! The collaborator contract and a trivial random agent.
//!
//! An agent is anything that, given a board snapshot and the action kind
//! currently requested of it, returns a move: a human front end, a search
//! algorithm, or the random agent below. The engine always hands agents a
//! clone of the board, so an agent may simulate on its copy, or mutate
//! it outright, without touching the authoritative state.

use crate::board::Board;
use crate::core::{GameRng, PlayerId};
use crate::engine::Move;
use crate::rules::PlayerPhase;

/// A move-producing collaborator.
///
/// Returning `None` or an illegal move surfaces as an
/// [`EngineError::InvalidMove`](crate::engine::EngineError::InvalidMove)
/// at the engine boundary, never a crash.
pub trait Agent {
    /// Produce a move for the requested phase.
    fn choose(&mut self, board: &Board, phase: PlayerPhase) -> Option<Move>;
}

/// Uniformly random legal play. Deterministic under a fixed seed.
///
/// ```
/// use morris_engine::agent::{Agent, RandomAgent};
/// use morris_engine::board::Board;
/// use morris_engine::engine::Move;
/// use morris_engine::rules::PlayerPhase;
///
/// let board = Board::new("alice", "bob").unwrap();
/// let mut agent = RandomAgent::new("alice", 42);
/// let mv = agent.choose(&board, PlayerPhase::Placing).unwrap();
/// assert!(matches!(mv, Move::Place(_)));
/// ```
pub struct RandomAgent {
    player: PlayerId,
    rng: GameRng,
}

impl RandomAgent {
    /// Create a random agent acting for `player`.
    #[must_use]
    pub fn new(player: impl Into<PlayerId>, seed: u64) -> Self {
        Self {
            player: player.into(),
            rng: GameRng::new(seed),
        }
    }

    /// The player this agent acts for.
    #[must_use]
    pub fn player(&self) -> &PlayerId {
        &self.player
    }
}

impl Agent for RandomAgent {
    fn choose(&mut self, board: &Board, phase: PlayerPhase) -> Option<Move> {
        match phase {
            PlayerPhase::Placing => {
                let empties = board.empty_cells();
                let cell = self.rng.choose(&empties)?;
                Some(Move::Place(cell.coord()))
            }
            PlayerPhase::Killing => {
                let targets = board.opponent_cells(&self.player).ok()?;
                let cell = self.rng.choose(&targets)?;
                Some(Move::Capture(cell.coord()))
            }
            PlayerPhase::Moving => {
                let slides = board.possible_slides(&self.player).ok()?;
                let &(from, to) = self.rng.choose(&slides)?;
                Some(Move::Shift { from, to })
            }
            PlayerPhase::Flying => {
                let mine = board.player_cells(&self.player).ok()?;
                let from = self.rng.choose(&mine)?.coord();
                let empties = board.empty_cells();
                let to = self.rng.choose(&empties)?.coord();
                Some(Move::Shift { from, to })
            }
            PlayerPhase::Lost => None,
        }
    }
}
