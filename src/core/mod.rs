//! Core value types: coordinates, players, pieces, RNG, errors.
//!
//! This module contains the fundamental building blocks the board and the
//! turn driver are assembled from. Everything here is a plain value: all
//! links between objects are coordinates or identifiers, never references,
//! so the board can own its aggregates without ownership cycles.

pub mod coord;
pub mod error;
pub mod piece;
pub mod player;
pub mod rng;

pub use coord::{Coord, Direction};
pub use error::BoardError;
pub use piece::{Piece, PieceState};
pub use player::PlayerId;
pub use rng::{GameRng, GameRngState};
