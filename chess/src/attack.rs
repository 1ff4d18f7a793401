use crate::board::Board;
use crate::types::{Color, PieceKind, Square};

/// Returns `true` if some piece of color `by` attacks `sq`
///
/// A piece attacks `sq` if its movement rule accepts `sq` and, unless it is a knight, nothing
/// stands between the piece and `sq`. Because movement rules require the destination to be
/// empty or hold an opponent, a square occupied by a piece of color `by` is never attacked
/// by `by`.
pub fn is_square_attacked(b: &Board, sq: Square, by: Color) -> bool {
    b.iter()
        .filter(|p| p.color() == by)
        .any(|p| {
            p.valid_movement(b, sq)
                && (p.kind() == PieceKind::Knight || !b.has_obstacle(p.square(), sq))
        })
}

/// Returns `true` if the king of color `c` is attacked by the opponent
///
/// If there is no king of color `c`, it cannot be in check, so `false` is returned.
pub fn is_king_in_check(b: &Board, c: Color) -> bool {
    match b.king_square(c) {
        Some(king) => is_square_attacked(b, king, c.inv()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    #[test]
    fn test_attacked() {
        let b = Board::from_placement("4k3/8/8/8/8/8/3q4/R3K3").unwrap();
        assert!(is_square_attacked(&b, sq("e1"), Color::Black));
        assert!(is_square_attacked(&b, sq("a2"), Color::Black));
        assert!(is_square_attacked(&b, sq("d7"), Color::Black));
        assert!(!is_square_attacked(&b, sq("a1"), Color::Black));
        assert!(is_square_attacked(&b, sq("a8"), Color::White));
        assert!(is_square_attacked(&b, sq("d1"), Color::White));
        assert!(!is_square_attacked(&b, sq("b1"), Color::Black));
    }

    #[test]
    fn test_check() {
        let b = Board::initial();
        assert!(!is_king_in_check(&b, Color::White));
        assert!(!is_king_in_check(&b, Color::Black));

        // rook blocked by a pawn, then with a clear file
        let b = Board::from_placement("4r1k1/8/8/8/8/8/4P3/4K3").unwrap();
        assert!(!is_king_in_check(&b, Color::White));
        let b = Board::from_placement("4r1k1/8/8/8/8/8/8/4K3").unwrap();
        assert!(is_king_in_check(&b, Color::White));
        assert!(!is_king_in_check(&b, Color::Black));

        // knights jump over blockers, pawns attack only diagonally forward
        let b = Board::from_placement("4k3/8/8/8/8/3PPPn1/3PKP2/3PPP2").unwrap();
        assert!(is_king_in_check(&b, Color::White));
        let b = Board::from_placement("4k3/8/8/8/8/4p3/4K3/8").unwrap();
        assert!(!is_king_in_check(&b, Color::White));
        let b = Board::from_placement("4k3/8/8/8/8/3p4/4K3/8").unwrap();
        assert!(is_king_in_check(&b, Color::White));
        let b = Board::from_placement("4k3/8/8/8/8/4K3/3p4/8").unwrap();
        assert!(!is_king_in_check(&b, Color::White));
    }

    #[test]
    fn test_no_king() {
        let b = Board::from_placement("q6q/8/8/8/8/8/8/q6q").unwrap();
        assert!(!is_king_in_check(&b, Color::White));
        assert!(!is_king_in_check(&Board::empty(), Color::Black));
    }

    #[test]
    fn test_several_kings() {
        // only the king in the lowest row is considered
        let b = Board::from_placement("K7/8/8/8/4r3/8/8/4K3").unwrap();
        assert_eq!(b.king_square(Color::White), Some(sq("e1")));
        assert!(is_king_in_check(&b, Color::White));
        let b = Board::from_placement("K7/8/8/8/r7/8/8/4K3").unwrap();
        assert!(is_square_attacked(&b, sq("a8"), Color::Black));
        assert!(!is_king_in_check(&b, Color::White));

        // within that row, the leftmost king is considered
        let b = Board::from_placement("8/8/8/8/8/8/8/K3K2r").unwrap();
        assert_eq!(b.king_square(Color::White), Some(sq("a1")));
        assert!(is_square_attacked(&b, sq("e1"), Color::Black));
        assert!(!is_king_in_check(&b, Color::White));
        let b = Board::from_placement("r7/8/8/8/8/8/8/K3K3").unwrap();
        assert!(is_king_in_check(&b, Color::White));
    }
}
