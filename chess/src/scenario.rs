//! Preset positions for the challenge mode

use crate::board::Board;
use crate::types::{Color, PieceKind, Square};

use std::fmt;

/// Preset challenge position
///
/// Every preset starts from an empty board, so the positions need not be reachable from the
/// initial one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// White king already mated by a black queen and two rooks
    Checkmate,
    /// Kings and a white queen
    Endgame,
    /// Kings, a white rook and a black pawn
    Puzzle,
}

impl Scenario {
    pub fn iter() -> impl Iterator<Item = Self> {
        [Self::Checkmate, Self::Endgame, Self::Puzzle].into_iter()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Checkmate => "Checkmate",
            Self::Endgame => "Endgame",
            Self::Puzzle => "Puzzle",
        }
    }

    /// Builds the board for this scenario
    pub fn board(&self) -> Board {
        let mut b = Board::empty();
        let place: &[(Color, PieceKind, usize, usize)] = match self {
            Self::Checkmate => &[
                (Color::White, PieceKind::King, 7, 0),
                (Color::Black, PieceKind::Queen, 4, 2),
                (Color::Black, PieceKind::Rook, 6, 2),
                (Color::Black, PieceKind::Rook, 7, 2),
            ],
            Self::Endgame => &[
                (Color::White, PieceKind::King, 7, 4),
                (Color::Black, PieceKind::King, 0, 4),
                (Color::White, PieceKind::Queen, 3, 3),
            ],
            Self::Puzzle => &[
                (Color::White, PieceKind::King, 7, 4),
                (Color::Black, PieceKind::King, 0, 4),
                (Color::White, PieceKind::Rook, 5, 5),
                (Color::Black, PieceKind::Pawn, 1, 3),
            ],
        };
        for &(color, kind, row, col) in place {
            b.put(color, kind, Square::new(row, col));
        }
        b
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, Outcome};
    use crate::validator::MoveValidator;

    #[test]
    fn test_checkmate() {
        let mut b = Scenario::Checkmate.board();
        assert_eq!(b.as_placement(), "8/8/8/8/2q5/8/2r5/K1r5");
        assert_eq!(b.king_square(Color::Black), None);
        let mut v = MoveValidator::new(&mut b);
        assert!(v.is_king_in_check(Color::White));
        assert!(!v.can_escape_check(Color::White));
        assert!(!v.is_king_in_check(Color::Black));

        let g = Game::new(Scenario::Checkmate.board());
        assert_eq!(
            g.outcome(),
            Some(Outcome::Checkmate {
                winner: Color::Black
            })
        );
    }

    #[test]
    fn test_rooks_on_one_file_do_not_mate() {
        // with the second rook on c3 instead of c1, nothing attacks a1 and b1 stays free
        let mut b = Scenario::Checkmate.board();
        b.set_piece(Square::new(7, 2), None);
        b.put(Color::Black, PieceKind::Rook, Square::new(5, 2));
        assert_eq!(b.as_placement(), "8/8/8/8/2q5/2r5/2r5/K7");
        let mut v = MoveValidator::new(&mut b);
        assert!(!v.is_king_in_check(Color::White));
        assert_eq!(
            v.legal_destinations(Square::new(7, 0)).into_iter().collect::<Vec<_>>(),
            vec![Square::new(7, 1)]
        );
        assert!(v.can_escape_check(Color::White));
        assert!(!v.is_checkmate(Color::White));
    }

    #[test]
    fn test_endgame() {
        let mut b = Scenario::Endgame.board();
        assert_eq!(b.as_placement(), "4k3/8/8/3Q4/8/8/8/4K3");
        let mut v = MoveValidator::new(&mut b);
        assert!(!v.is_king_in_check(Color::White));
        assert!(v.can_escape_check(Color::White));
        assert!(v.process_move("d5 d6", true));
    }

    #[test]
    fn test_puzzle() {
        let b = Scenario::Puzzle.board();
        assert_eq!(b.as_placement(), "4k3/3p4/8/8/8/5R2/8/4K3");
        let mut g = Game::new(b);
        assert!(!g.is_finished());
        g.make_move("f3 f7").unwrap();
        g.make_move("e8 f7").unwrap();
        assert_eq!(g.material_balance(), -100);
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = Scenario::iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["Checkmate", "Endgame", "Puzzle"]);
    }
}
