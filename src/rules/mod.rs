//! Rules: player phases, win-rule variants, and game outcomes.
//!
//! The phase a player is in is never stored; it is derived from the
//! player's bucket counts and the board's mill state. The win condition
//! comes in three selectable variants reflecting progressively complete
//! rule sets; none is canonical, and the board evaluates whichever the
//! caller selects.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// The action kind a player is currently entitled (and required) to take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerPhase {
    /// Ready pieces remain: the player places.
    Placing,
    /// An unspent mill stands: the player must capture before anything else.
    Killing,
    /// All pieces placed, more than three alive: adjacent moves only.
    Moving,
    /// Exactly three alive: moves may go anywhere.
    Flying,
    /// Fewer than three alive: no legal action remains.
    Lost,
}

impl std::fmt::Display for PlayerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlayerPhase::Placing => "Placing",
            PlayerPhase::Killing => "Killing",
            PlayerPhase::Moving => "Moving",
            PlayerPhase::Flying => "Flying",
            PlayerPhase::Lost => "Lost",
        };
        write!(f, "{}", name)
    }
}

/// Phase from bucket counts alone; the Killing override lives with the
/// board, since it depends on mill state rather than counts.
///
/// Pure: the same counts always yield the same phase.
///
/// ```
/// use morris_engine::rules::{phase_for_counts, PlayerPhase};
///
/// assert_eq!(phase_for_counts(9, 0), PlayerPhase::Placing);
/// assert_eq!(phase_for_counts(0, 7), PlayerPhase::Moving);
/// assert_eq!(phase_for_counts(0, 3), PlayerPhase::Flying);
/// assert_eq!(phase_for_counts(0, 2), PlayerPhase::Lost);
/// ```
#[must_use]
pub fn phase_for_counts(ready: usize, placed: usize) -> PlayerPhase {
    if ready > 0 {
        PlayerPhase::Placing
    } else if placed > 3 {
        PlayerPhase::Moving
    } else if placed == 3 {
        PlayerPhase::Flying
    } else {
        PlayerPhase::Lost
    }
}

/// Selectable game-over rule variant.
///
/// The three variants represent the three completeness stages the rules
/// were delivered in; all are first-class and tested independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinRule {
    /// The game ends when both players have placed all nine pieces; the
    /// player with strictly more placed pieces wins, equal counts tie.
    Placement,
    /// After placement, a player loses on dropping to three or fewer
    /// placed pieces, or on having no legal move.
    ThreePiece,
    /// After placement, a player loses on dropping to two or fewer placed
    /// pieces, or on having no legal move. Three pieces means flying.
    TwoPiece,
}

impl WinRule {
    /// The placed-count at or below which a player loses, for the
    /// threshold variants.
    #[must_use]
    pub fn piece_threshold(self) -> Option<usize> {
        match self {
            WinRule::Placement => None,
            WinRule::ThreePiece => Some(3),
            WinRule::TwoPiece => Some(2),
        }
    }
}

/// Result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Single winner.
    Winner(PlayerId),
    /// Neither player won.
    Draw,
}

impl GameOutcome {
    /// The winning player, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<&PlayerId> {
        match self {
            GameOutcome::Winner(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }

    /// Check whether a specific player won.
    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        self.winner() == Some(player)
    }
}
