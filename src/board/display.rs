//! Textual board rendering for terminal/debug display.
//!
//! Three concentric squares joined by four radial spokes. The first
//! registered player is drawn as `x`, the second as `o`; mark assignment
//! follows registration order so the rendering is deterministic.

use super::Board;
use crate::core::Coord;

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = |s: u8, v: u8, h: u8| -> char {
            let coord = Coord::new(s, v, h).expect("rendered positions are valid cells");
            match self.cell(coord).occupant() {
                None => ' ',
                Some(p) if p == &self.players()[0] => 'x',
                Some(_) => 'o',
            }
        };

        writeln!(
            f,
            "{}--------{}--------{}",
            mark(0, 0, 0),
            mark(0, 0, 1),
            mark(0, 0, 2)
        )?;
        writeln!(f, "|        |        |")?;
        writeln!(
            f,
            "|  {}-----{}-----{}  |",
            mark(1, 0, 0),
            mark(1, 0, 1),
            mark(1, 0, 2)
        )?;
        writeln!(f, "|  |     |     |  |")?;
        writeln!(
            f,
            "|  |  {}--{}--{}  |  |",
            mark(2, 0, 0),
            mark(2, 0, 1),
            mark(2, 0, 2)
        )?;
        writeln!(f, "|  |  |     |  |  |")?;
        writeln!(
            f,
            "{}--{}--{}     {}--{}--{}",
            mark(0, 1, 0),
            mark(1, 1, 0),
            mark(2, 1, 0),
            mark(2, 1, 2),
            mark(1, 1, 2),
            mark(0, 1, 2)
        )?;
        writeln!(f, "|  |  |     |  |  |")?;
        writeln!(
            f,
            "|  |  {}--{}--{}  |  |",
            mark(2, 2, 0),
            mark(2, 2, 1),
            mark(2, 2, 2)
        )?;
        writeln!(f, "|  |     |     |  |")?;
        writeln!(
            f,
            "|  {}-----{}-----{}  |",
            mark(1, 2, 0),
            mark(1, 2, 1),
            mark(1, 2, 2)
        )?;
        writeln!(f, "|        |        |")?;
        write!(
            f,
            "{}--------{}--------{}",
            mark(0, 2, 0),
            mark(0, 2, 1),
            mark(0, 2, 2)
        )
    }
}
