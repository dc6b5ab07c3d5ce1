//! Turn driver: whose turn it is, which action kind is legal, applying
//! moves, and detecting the winner.
//!
//! The engine owns the authoritative [`Board`]. Front ends and agents
//! interact through two surfaces:
//! - a move-submission interface ([`Engine::submit`]), which validates a
//!   [`Move`] against the acting player's current phase and applies it,
//! - the board query surface (via [`Engine::board`]), read-only.
//!
//! Data flows one way per turn: the engine derives the acting player's
//! phase, a collaborator produces a move for that phase (from a board
//! clone, never the authoritative state), the engine validates and
//! applies it, and the phase is re-derived before the turn advances so
//! capture chains resolve on the same player's turn.
//!
//! Rejected submissions leave engine and board untouched: every board
//! mutation validates before mutating.

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::agent::Agent;
use crate::board::Board;
use crate::core::{BoardError, Coord, GameRng, PlayerId};
use crate::rules::{GameOutcome, PlayerPhase, WinRule};

/// A move submitted by a collaborator.
///
/// `Shift` covers both sliding and flying; the engine applies the
/// adjacency requirement according to the acting player's phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Place a ready piece on a cell.
    Place(Coord),
    /// Capture the piece on an opponent's cell.
    Capture(Coord),
    /// Relocate an own piece.
    Shift { from: Coord, to: Coord },
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Place(cell) => write!(f, "place {}", cell),
            Move::Capture(cell) => write!(f, "capture {}", cell),
            Move::Shift { from, to } => write!(f, "shift {} -> {}", from, to),
        }
    }
}

/// A recorded, applied move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The player who took this move.
    pub player: PlayerId,
    /// The move taken.
    pub mv: Move,
    /// Turn number (starts at 1).
    pub turn: u32,
    /// Sequence within the turn (capture chains make multi-move turns).
    pub sequence: u32,
}

/// Turn-level failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The submitted move was rejected for the current phase.
    ///
    /// `mv` is `None` when the collaborator produced no move at all;
    /// `source` carries the board-level rejection when one occurred.
    #[error("illegal move in phase {phase}")]
    InvalidMove {
        mv: Option<Move>,
        phase: PlayerPhase,
        source: Option<BoardError>,
    },

    /// The game is over; the engine no longer accepts moves.
    #[error("the game is already finished")]
    GameFinished,
}

/// Configures and constructs an [`Engine`].
///
/// ```
/// use morris_engine::engine::EngineBuilder;
/// use morris_engine::rules::WinRule;
///
/// let engine = EngineBuilder::new("alice", "bob")
///     .win_rule(WinRule::Placement)
///     .starting_player("alice")
///     .build()
///     .unwrap();
/// assert_eq!(engine.current_player().name(), "alice");
/// ```
pub struct EngineBuilder {
    first: PlayerId,
    second: PlayerId,
    rule: WinRule,
    starting_player: Option<PlayerId>,
    seed: u64,
}

impl EngineBuilder {
    /// Start building an engine for two players.
    #[must_use]
    pub fn new(first: impl Into<PlayerId>, second: impl Into<PlayerId>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            rule: WinRule::ThreePiece,
            starting_player: None,
            seed: 0,
        }
    }

    /// Select the game-over rule variant (default: [`WinRule::ThreePiece`]).
    #[must_use]
    pub fn win_rule(mut self, rule: WinRule) -> Self {
        self.rule = rule;
        self
    }

    /// Fix the starting player instead of drawing one from the seed.
    #[must_use]
    pub fn starting_player(mut self, player: impl Into<PlayerId>) -> Self {
        self.starting_player = Some(player.into());
        self
    }

    /// Seed for the starting-player draw (default 0). Ignored when the
    /// starting player is explicit.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the engine and its board.
    ///
    /// Fails with [`BoardError::InvalidPlayers`] on a bad pair and
    /// [`BoardError::UnknownPlayer`] when the explicit starting player is
    /// not one of the two.
    pub fn build(self) -> Result<Engine, BoardError> {
        let board = Board::new(self.first, self.second)?;
        let current = match self.starting_player {
            Some(player) => {
                // Validate against the registered pair.
                board.opponent_of(&player)?;
                player
            }
            None => {
                let mut rng = GameRng::new(self.seed);
                board.players()[rng.gen_range_usize(0..2)].clone()
            }
        };
        debug!(player = %current, rule = ?self.rule, "game starts");
        Ok(Engine {
            board,
            rule: self.rule,
            current,
            turn: 1,
            sequence: 0,
            outcome: None,
            history: Vector::new(),
        })
    }
}

/// The turn state machine.
///
/// Placing ⇄ Killing on one side of the board's lifecycle, then
/// Moving/Flying ⇄ Killing once a player's pieces are all placed;
/// terminal once the selected [`WinRule`] reports game over, after which
/// the engine freezes and only reports the outcome.
#[derive(Debug)]
pub struct Engine {
    board: Board,
    rule: WinRule,
    current: PlayerId,
    turn: u32,
    sequence: u32,
    outcome: Option<GameOutcome>,
    history: Vector<MoveRecord>,
}

impl Engine {
    // === Queries ===

    /// The authoritative board, read-only.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player whose move is expected next.
    #[must_use]
    pub fn current_player(&self) -> &PlayerId {
        &self.current
    }

    /// The phase the current player must act in.
    #[must_use]
    pub fn current_phase(&self) -> PlayerPhase {
        self.phase_of_current()
    }

    /// The selected game-over rule.
    #[must_use]
    pub fn win_rule(&self) -> WinRule {
        self.rule
    }

    /// The outcome, once the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// The winner, once there is one.
    #[must_use]
    pub fn winner(&self) -> Option<&PlayerId> {
        self.outcome.as_ref().and_then(GameOutcome::winner)
    }

    /// Whether the engine has frozen on a finished game.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Current turn number (starts at 1, advances when the turn passes).
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Every applied move, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    // === Move submission ===

    /// Validate and apply a move for the current player.
    ///
    /// The move kind must match the player's phase: `Place` while
    /// Placing, `Capture` while Killing (targeting an opponent cell,
    /// backed by an unspent mill), `Shift` while Moving or Flying (from
    /// an own cell; adjacency enforced only when Moving). Anything else,
    /// including board-level rejections, fails with
    /// [`EngineError::InvalidMove`] and changes nothing.
    ///
    /// A capture that leaves another unspent mill keeps the same player
    /// in Killing; otherwise the turn passes once no capture is pending.
    pub fn submit(&mut self, mv: Move) -> Result<(), EngineError> {
        if self.outcome.is_some() {
            return Err(EngineError::GameFinished);
        }

        let phase = self.phase_of_current();
        match (phase, mv) {
            (PlayerPhase::Placing, Move::Place(cell)) => self.apply_place(cell),
            (PlayerPhase::Killing, Move::Capture(cell)) => self.apply_capture(cell),
            (PlayerPhase::Moving, Move::Shift { from, to }) => self.apply_shift(from, to, false),
            (PlayerPhase::Flying, Move::Shift { from, to }) => self.apply_shift(from, to, true),
            (phase, mv) => Err(EngineError::InvalidMove {
                mv: Some(mv),
                phase,
                source: None,
            }),
        }
    }

    /// Ask a collaborator for a move and submit it.
    ///
    /// The agent sees a clone of the board, so it can simulate on its copy
    /// without any risk to the authoritative state. An absent or illegal
    /// move surfaces as [`EngineError::InvalidMove`]; whether to re-prompt
    /// or forfeit is the caller's policy.
    pub fn step(&mut self, agent: &mut dyn Agent) -> Result<(), EngineError> {
        if self.outcome.is_some() {
            return Err(EngineError::GameFinished);
        }
        let phase = self.phase_of_current();
        let snapshot = self.board.clone();
        match agent.choose(&snapshot, phase) {
            Some(mv) => self.submit(mv),
            None => Err(EngineError::InvalidMove {
                mv: None,
                phase,
                source: None,
            }),
        }
    }

    /// Drive two agents to completion.
    ///
    /// The first agent acts for the first registered player. Errors
    /// propagate immediately; this loop applies no re-prompt policy.
    pub fn play(
        &mut self,
        first: &mut dyn Agent,
        second: &mut dyn Agent,
    ) -> Result<GameOutcome, EngineError> {
        loop {
            if let Some(outcome) = &self.outcome {
                return Ok(outcome.clone());
            }
            if self.current == self.board.players()[0] {
                self.step(first)?;
            } else {
                self.step(second)?;
            }
        }
    }

    // === Internals ===

    fn phase_of_current(&self) -> PlayerPhase {
        self.board
            .player_phase(&self.current)
            .expect("current player is registered")
    }

    fn apply_place(&mut self, cell: Coord) -> Result<(), EngineError> {
        let player = self.current.clone();
        self.board
            .place(cell, &player)
            .map_err(|source| EngineError::InvalidMove {
                mv: Some(Move::Place(cell)),
                phase: PlayerPhase::Placing,
                source: Some(source),
            })?;
        self.record(Move::Place(cell));
        self.after_move();
        Ok(())
    }

    fn apply_capture(&mut self, cell: Coord) -> Result<(), EngineError> {
        let rejected = |source: Option<BoardError>| EngineError::InvalidMove {
            mv: Some(Move::Capture(cell)),
            phase: PlayerPhase::Killing,
            source,
        };

        let opponent = self
            .board
            .opponent_of(&self.current)
            .expect("current player is registered")
            .clone();
        if self.board.cell(cell).occupant() != Some(&opponent) {
            return Err(rejected(None));
        }

        // Any unresolved mill backs the grant; the player chooses only
        // the target cell.
        let key = self
            .board
            .player_mills(&self.current)
            .expect("current player is registered")
            .iter()
            .find(|mill| !mill.utilized())
            .map(|mill| mill.key())
            .ok_or_else(|| rejected(None))?;

        self.board
            .kill(cell, Some(&key))
            .map_err(|source| rejected(Some(source)))?;
        self.record(Move::Capture(cell));
        self.after_move();
        Ok(())
    }

    fn apply_shift(&mut self, from: Coord, to: Coord, flying: bool) -> Result<(), EngineError> {
        let phase = if flying {
            PlayerPhase::Flying
        } else {
            PlayerPhase::Moving
        };
        let rejected = |source: Option<BoardError>| EngineError::InvalidMove {
            mv: Some(Move::Shift { from, to }),
            phase,
            source,
        };

        // Only the acting player's pieces move; an empty source falls
        // through to the board's own CellEmpty rejection.
        if let Some(owner) = self.board.cell(from).occupant() {
            if owner != &self.current {
                return Err(rejected(None));
            }
        }

        let applied = if flying {
            self.board.fly(from, to)
        } else {
            self.board.slide(from, to)
        };
        applied.map_err(|source| rejected(Some(source)))?;
        self.record(Move::Shift { from, to });
        self.after_move();
        Ok(())
    }

    fn record(&mut self, mv: Move) {
        let record = MoveRecord {
            player: self.current.clone(),
            mv,
            turn: self.turn,
            sequence: self.sequence,
        };
        debug!(player = %record.player, %mv, turn = record.turn, "move applied");
        self.sequence += 1;
        self.history.push_back(record);
    }

    /// Game-over check, then turn advancement unless a capture is pending.
    fn after_move(&mut self) {
        if let Some(outcome) = self.board.game_over(self.rule) {
            debug!(?outcome, "game over");
            self.outcome = Some(outcome);
            return;
        }
        if self.phase_of_current() != PlayerPhase::Killing {
            self.switch_player();
        }
    }

    fn switch_player(&mut self) {
        self.current = self
            .board
            .opponent_of(&self.current)
            .expect("current player is registered")
            .clone();
        self.turn += 1;
        self.sequence = 0;
    }
}
