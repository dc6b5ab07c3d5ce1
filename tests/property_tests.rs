//! Property tests for the board invariants.
//!
//! The original suite drove these with randomized inputs; here proptest
//! generates coordinate and operation sequences and the invariants are
//! checked after every step:
//! - per-player piece conservation (ready + placed + dead == 9),
//! - cell/piece binding consistency (occupants and placed pieces agree),
//! - every active mill satisfies the mill predicate,
//! - rejected operations leave the board byte-for-byte observationally
//!   unchanged.

use proptest::prelude::*;

use morris_engine::{phase_for_counts, Board, Coord, PieceState, PlayerId};

fn valid_coord() -> impl Strategy<Value = Coord> {
    (0u8..3, 0u8..3, 0u8..3)
        .prop_filter("square centers are not cells", |&(s, v, h)| {
            Coord::is_valid(s, v, h)
        })
        .prop_map(|(s, v, h)| Coord::new(s, v, h).unwrap())
}

/// A board operation with arbitrary (frequently illegal) arguments.
#[derive(Clone, Debug)]
enum Op {
    Place(Coord, bool),
    Remove(Coord),
    Slide(Coord, Coord),
    Fly(Coord, Coord),
    Kill(Coord),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        // Placements dominate so boards actually fill up.
        4 => (valid_coord(), any::<bool>()).prop_map(|(c, first)| Op::Place(c, first)),
        1 => valid_coord().prop_map(Op::Remove),
        2 => (valid_coord(), valid_coord()).prop_map(|(a, b)| Op::Slide(a, b)),
        1 => (valid_coord(), valid_coord()).prop_map(|(a, b)| Op::Fly(a, b)),
        2 => valid_coord().prop_map(Op::Kill),
    ]
}

fn apply(board: &mut Board, op: &Op, players: &[PlayerId; 2]) -> bool {
    let result = match *op {
        Op::Place(c, first) => board.place(c, &players[usize::from(!first)]).map(drop),
        Op::Remove(c) => board.remove(c).map(drop),
        Op::Slide(from, to) => board.slide(from, to).map(drop),
        Op::Fly(from, to) => board.fly(from, to).map(drop),
        Op::Kill(c) => board.kill(c, None).map(drop),
    };
    result.is_ok()
}

/// Observable state: occupancy, bucket sizes, mill count.
fn snapshot(board: &Board, players: &[PlayerId; 2]) -> (Vec<Option<PlayerId>>, Vec<usize>, usize) {
    let occupancy = board
        .cells()
        .iter()
        .map(|c| c.occupant().cloned())
        .collect();
    let buckets = players
        .iter()
        .flat_map(|p| {
            [
                board.ready_pieces(p).unwrap().len(),
                board.placed_pieces(p).unwrap().len(),
                board.dead_pieces(p).unwrap().len(),
            ]
        })
        .collect();
    (occupancy, buckets, board.mills().len())
}

fn check_invariants(board: &Board, players: &[PlayerId; 2]) {
    let mut placed_total = 0;
    for player in players {
        let ready = board.ready_pieces(player).unwrap();
        let placed = board.placed_pieces(player).unwrap();
        let dead = board.dead_pieces(player).unwrap();
        assert_eq!(ready.len() + placed.len() + dead.len(), 9);
        placed_total += placed.len();

        for piece in ready.iter().chain(dead) {
            assert_eq!(piece.cell(), None);
        }
        for piece in placed {
            assert_eq!(piece.state(), PieceState::Placed);
            let cell = piece.cell().expect("placed pieces are bound to a cell");
            assert_eq!(board.cell(cell).occupant(), Some(player));
        }
    }
    assert_eq!(board.occupied_cells().len(), placed_total);

    for mill in board.mills() {
        let owner = mill.owner();
        for c in mill.iter() {
            assert_eq!(board.cell(c).occupant(), Some(owner));
        }
    }
}

proptest! {
    /// Conservation and binding consistency survive arbitrary operation
    /// sequences, legal or not.
    #[test]
    fn invariants_hold_under_arbitrary_ops(ops in prop::collection::vec(op(), 0..60)) {
        let players = [PlayerId::new("x"), PlayerId::new("y")];
        let mut board = Board::new("x", "y").unwrap();
        for op in &ops {
            apply(&mut board, op, &players);
            check_invariants(&board, &players);
        }
    }

    /// A rejected operation changes nothing observable.
    #[test]
    fn rejected_ops_leave_board_unchanged(
        setup in prop::collection::vec(op(), 0..25),
        probe in op(),
    ) {
        let players = [PlayerId::new("x"), PlayerId::new("y")];
        let mut board = Board::new("x", "y").unwrap();
        for op in &setup {
            apply(&mut board, op, &players);
        }

        let before = snapshot(&board, &players);
        let accepted = apply(&mut board, &probe, &players);
        if !accepted {
            prop_assert_eq!(before, snapshot(&board, &players));
        }
    }

    /// Placing on any empty cell round-trips through the occupant and
    /// the placed bucket.
    #[test]
    fn placement_round_trip(target in valid_coord()) {
        let player = PlayerId::new("x");
        let mut board = Board::new("x", "y").unwrap();

        let piece = board.place(target, &player).unwrap();
        prop_assert_eq!(board.cell(target).occupant(), Some(&player));
        prop_assert_eq!(piece.state(), PieceState::Placed);
        prop_assert_eq!(board.ready_pieces(&player).unwrap().len(), 8);
        prop_assert_eq!(board.placed_pieces(&player).unwrap().len(), 1);

        prop_assert!(board.place(target, &player).is_err());
    }

    /// The phase table is a pure function of the bucket counts.
    #[test]
    fn phase_is_deterministic(ready in 0usize..=9, dead in 0usize..=9) {
        prop_assume!(ready + dead <= 9);
        let placed = 9 - ready - dead;
        let first = phase_for_counts(ready, placed);
        let second = phase_for_counts(ready, placed);
        prop_assert_eq!(first, second);
    }

    /// Neighbor links are symmetric for every cell and direction.
    #[test]
    fn neighbor_symmetry(c in valid_coord()) {
        use morris_engine::Direction;
        for direction in Direction::ALL {
            if let Some(n) = c.neighbor(direction) {
                prop_assert_eq!(n.neighbor(direction.opposite()), Some(c));
            }
        }
    }
}
