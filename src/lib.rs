//! # morris-engine
//!
//! A Nine Men's Morris rules engine: the board/cell/piece/mill data model
//! and the turn/phase state machine enforcing legal placement, movement,
//! flying, and capture.
//!
//! ## Design Principles
//!
//! 1. **Values, Not References**: All links between game objects are
//!    coordinates and player ids. The board is the single owner of cells,
//!    pieces, and mills; a clone is a fully independent deep copy.
//!
//! 2. **Validate Before Mutating**: Every mutator checks its
//!    preconditions first, so a rejected move leaves the board unchanged;
//!    no rollback machinery exists or is needed.
//!
//! 3. **Derived, Not Stored**: A player's phase (placing, killing, moving,
//!    flying, lost) is computed from bucket counts and mill state on every
//!    read; the three game-over rules are selectable configuration.
//!
//! 4. **Reproducible Randomness**: The only random choice in the core,
//!    the starting player, draws from a seeded RNG, as does the bundled
//!    random agent. No process-global randomness anywhere.
//!
//! ## Modules
//!
//! - `core`: coordinates, players, pieces, RNG, error taxonomy
//! - `board`: cells, mills, and the owning board aggregate
//! - `rules`: phase derivation, win-rule variants, game outcomes
//! - `engine`: the turn driver and move-submission interface
//! - `agent`: the collaborator contract and a random agent
//!
//! ## Example
//!
//! ```
//! use morris_engine::{EngineBuilder, Move, Coord, WinRule};
//!
//! let mut engine = EngineBuilder::new("alice", "bob")
//!     .win_rule(WinRule::Placement)
//!     .starting_player("alice")
//!     .build()
//!     .unwrap();
//!
//! engine.submit(Move::Place(Coord::new(0, 0, 0).unwrap())).unwrap();
//! assert_eq!(engine.current_player().name(), "bob");
//! ```

pub mod agent;
pub mod board;
pub mod core;
pub mod engine;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    BoardError, Coord, Direction, GameRng, GameRngState, Piece, PieceState, PlayerId,
};

pub use crate::board::{Board, Cell, Mill, MillKey};

pub use crate::rules::{phase_for_counts, GameOutcome, PlayerPhase, WinRule};

pub use crate::engine::{Engine, EngineBuilder, EngineError, Move, MoveRecord};

pub use crate::agent::{Agent, RandomAgent};
