//! Move legality validation
//!
//! [`MoveValidator`] composes the board and the movement rules to answer whether a king is in
//! check, whether a side can get out of check, and whether a move request is legal to execute.
//!
//! Trial moves are simulated on the validated board itself: each trial is made with
//! [`Board::make_unchecked()`] and reverted with [`Board::unmake()`] before anything else
//! happens, so a validator call always leaves the board exactly as it found it unless it
//! executes a move.

use crate::attack;
use crate::bitboard::Bitboard;
use crate::board::{Board, Piece};
use crate::moves::{MoveParseError, MoveText};
use crate::types::{Color, PieceKind, Square};

use std::str::FromStr;

use log::{debug, info, trace};
use thiserror::Error;

/// Reason why a move request was refused
///
/// Variants are listed in the order the checks are performed.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    /// Move text doesn't follow the `e2 e4` notation
    #[error("bad move format: {0}")]
    Parse(#[from] MoveParseError),
    /// No piece on the source square
    #[error("no piece found at {0}")]
    NoPiece(Square),
    /// The piece belongs to the side not to move
    #[error("it's {expected}'s turn, but the piece is {found}")]
    WrongTurn { expected: Color, found: Color },
    /// The movement rule of the piece rejects the destination
    #[error("{piece} on {src} cannot move to {dst}")]
    InvalidMovement {
        piece: PieceKind,
        src: Square,
        dst: Square,
    },
    /// The move would leave the own king in check
    #[error("move would put the own king in check")]
    LeavesKingInCheck,
    /// The board refused to relocate the piece
    #[error("board rejected the move")]
    Rejected,
}

/// Move executed by [`MoveValidator::try_process_move()`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// The moved piece, standing on its new square
    pub piece: Piece,
    /// Source square
    pub src: Square,
    /// Captured opponent piece, if any
    pub captured: Option<Piece>,
    /// Whether the opponent's king is in check after the move
    pub gives_check: bool,
}

/// Validator of move legality for a single board
///
/// The validator borrows the board mutably for its whole lifetime. It has no state of its own.
///
/// # Example
///
/// ```
/// # use chessrules::{Board, Color, MoveValidator};
/// #
/// let mut board = Board::initial();
/// let mut v = MoveValidator::new(&mut board);
/// assert!(v.process_move("e2 e4", true));
/// assert!(!v.process_move("e7 e4", false));
/// assert!(!v.is_king_in_check(Color::Black));
/// assert!(v.can_escape_check(Color::Black));
/// ```
#[derive(Debug)]
pub struct MoveValidator<'a> {
    board: &'a mut Board,
}

impl<'a> MoveValidator<'a> {
    #[inline]
    pub fn new(board: &'a mut Board) -> Self {
        Self { board }
    }

    /// Returns the board being validated
    #[inline]
    pub fn board(&self) -> &Board {
        self.board
    }

    /// Returns `true` if some piece of color `by` attacks `sq`
    ///
    /// A piece attacks `sq` if its movement rule accepts `sq` along a free path. In particular,
    /// a square occupied by a piece of color `by` is never attacked by `by`.
    #[inline]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        attack::is_square_attacked(self.board, sq, by)
    }

    /// Returns `true` if the king of color `c` is in check
    ///
    /// Returns `false` if the board has no king of color `c`.
    #[inline]
    pub fn is_king_in_check(&self, c: Color) -> bool {
        attack::is_king_in_check(self.board, c)
    }

    /// Simulates moving `piece` to `dst` and returns whether its own king is in check afterwards
    ///
    /// The move is not checked against the movement rules. The board is restored before
    /// returning, regardless of the result.
    pub fn move_leaves_king_in_check(&mut self, piece: Piece, dst: Square) -> bool {
        let undo = self.board.make_unchecked(piece, dst);
        let res = attack::is_king_in_check(self.board, piece.color());
        self.board.unmake(undo);
        trace!(
            "trial {} {}{}: king {}",
            piece.as_char(),
            piece.square(),
            dst,
            if res { "in check" } else { "safe" }
        );
        res
    }

    /// Returns `true` if side `c` has a move that leaves its king out of check
    ///
    /// Every piece of color `c` is tried on every destination accepted by its movement rule.
    ///
    /// If the king of `c` is not in check now, this is the same as asking whether `c` has any
    /// legal move at all. [`MoveValidator::is_stalemate()`] relies on this.
    pub fn can_escape_check(&mut self, c: Color) -> bool {
        for piece in self.board.pieces(c) {
            for dst in Square::iter() {
                if !piece.valid_movement(self.board, dst) {
                    continue;
                }
                if !self.move_leaves_king_in_check(piece, dst) {
                    return true;
                }
            }
        }
        false
    }

    /// Returns `true` if side `c` is in check and cannot escape it
    pub fn is_checkmate(&mut self, c: Color) -> bool {
        self.is_king_in_check(c) && !self.can_escape_check(c)
    }

    /// Returns `true` if side `c` is not in check, but has no legal move
    pub fn is_stalemate(&mut self, c: Color) -> bool {
        !self.is_king_in_check(c) && !self.can_escape_check(c)
    }

    /// Returns all the legal destinations for the piece on `src`
    ///
    /// Returns an empty set if `src` is empty.
    pub fn legal_destinations(&mut self, src: Square) -> Bitboard {
        let piece = match self.board.piece_at(src) {
            Some(p) => p,
            None => return Bitboard::EMPTY,
        };
        piece
            .destinations(self.board)
            .into_iter()
            .filter(|&dst| !self.move_leaves_king_in_check(piece, dst))
            .collect()
    }

    /// Validates the move request `text` for side `side` and executes it
    ///
    /// The checks are performed in this order, stopping at the first failure:
    ///
    /// 1. `text` follows the `e2 e4` notation;
    /// 2. there is a piece on the source square;
    /// 3. the piece belongs to `side`;
    /// 4. the movement rule of the piece accepts the destination;
    /// 5. the move doesn't leave the own king in check;
    /// 6. the board accepts the relocation.
    ///
    /// On failure, the board is left unchanged.
    pub fn try_process_move(&mut self, text: &str, side: Color) -> Result<MoveReport, MoveError> {
        let res = self.do_process_move(text, side);
        if let Err(e) = &res {
            debug!("rejected move {:?} for {}: {}", text, side, e);
        }
        res
    }

    fn do_process_move(&mut self, text: &str, side: Color) -> Result<MoveReport, MoveError> {
        let MoveText { src, dst } = MoveText::from_str(text)?;

        let piece = self.board.piece_at(src).ok_or(MoveError::NoPiece(src))?;
        if piece.color() != side {
            return Err(MoveError::WrongTurn {
                expected: side,
                found: piece.color(),
            });
        }
        if !piece.valid_movement(self.board, dst) {
            return Err(MoveError::InvalidMovement {
                piece: piece.kind(),
                src,
                dst,
            });
        }
        if self.move_leaves_king_in_check(piece, dst) {
            return Err(MoveError::LeavesKingInCheck);
        }

        let captured = self.board.piece_at(dst);
        if !self.board.move_piece(src, dst) {
            return Err(MoveError::Rejected);
        }

        let gives_check = self.is_king_in_check(side.inv());
        if gives_check {
            info!("the {} king is in check", side.inv());
        }
        Ok(MoveReport {
            piece: piece.with_square(dst),
            src,
            captured,
            gives_check,
        })
    }

    /// Validates and executes the move request `text`
    ///
    /// `is_white_turn` selects the side to move. Returns `true` if the move was executed. See
    /// [`MoveValidator::try_process_move()`] for the order of checks, and to obtain the reason
    /// of failure.
    #[inline]
    pub fn process_move(&mut self, text: &str, is_white_turn: bool) -> bool {
        self.try_process_move(text, Color::from_white_turn(is_white_turn))
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    #[test]
    fn test_opening_move() {
        let mut b = Board::initial();
        let mut v = MoveValidator::new(&mut b);
        let report = v.try_process_move("e2 e4", Color::White).unwrap();
        assert_eq!(report.src, sq("e2"));
        assert_eq!(report.piece.square(), sq("e4"));
        assert_eq!(report.piece.kind(), PieceKind::Pawn);
        assert_eq!(report.captured, None);
        assert!(!report.gives_check);
        assert_eq!(b.as_placement(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
    }

    #[test]
    fn test_rejections() {
        let mut b = Board::initial();
        let before = b;
        let mut v = MoveValidator::new(&mut b);

        assert_eq!(
            v.try_process_move("e2 e5", Color::White),
            Err(MoveError::InvalidMovement {
                piece: PieceKind::Pawn,
                src: sq("e2"),
                dst: sq("e5")
            })
        );
        assert_eq!(
            v.try_process_move("e2 e4", Color::Black),
            Err(MoveError::WrongTurn {
                expected: Color::Black,
                found: Color::White
            })
        );
        assert_eq!(
            v.try_process_move("e3 e4", Color::White),
            Err(MoveError::NoPiece(sq("e3")))
        );
        assert!(matches!(
            v.try_process_move("e2e4", Color::White),
            Err(MoveError::Parse(_))
        ));
        assert!(!v.process_move("E2 E4", true));
        assert!(!v.process_move("e2 e4", false));
        assert!(!v.process_move("", true));
        assert_eq!(b, before);
    }

    #[test]
    fn test_self_check() {
        // the bishop on e2 is pinned to the king
        let mut b = Board::from_placement("4r1k1/8/8/8/8/8/4B3/4K3").unwrap();
        let before = b;
        let mut v = MoveValidator::new(&mut b);
        assert_eq!(
            v.try_process_move("e2 d3", Color::White),
            Err(MoveError::LeavesKingInCheck)
        );
        // the king may not step onto an attacked square
        let mut b2 = Board::from_placement("4r1k1/8/8/8/8/8/8/3K4").unwrap();
        let mut v2 = MoveValidator::new(&mut b2);
        assert_eq!(
            v2.try_process_move("d1 e1", Color::White),
            Err(MoveError::LeavesKingInCheck)
        );
        assert!(v2.process_move("d1 c1", true));
        assert_eq!(b, before);
    }

    #[test]
    fn test_capture_and_check() {
        let mut b = Board::from_placement("4k3/8/8/3p4/8/8/8/3QK3").unwrap();
        let mut v = MoveValidator::new(&mut b);
        let report = v.try_process_move("d1 d5", Color::White).unwrap();
        assert_eq!(report.captured.map(|p| p.kind()), Some(PieceKind::Pawn));
        assert!(!report.gives_check);
        let report = v.try_process_move("e8 e7", Color::Black).unwrap();
        assert!(!report.gives_check);
        let report = v.try_process_move("d5 d7", Color::White).unwrap();
        assert!(report.gives_check);
        assert!(v.is_king_in_check(Color::Black));
        assert_eq!(b.pieces(Color::Black).len(), 1);
    }

    #[test]
    fn test_simulation_restores_board() {
        let mut b = Board::from_placement("r3k2r/ppp2ppp/2n5/3qp3/1b1P4/2N2Q2/PPP2PPP/R3K2R").unwrap();
        let before = b;
        let mut v = MoveValidator::new(&mut b);
        for piece in before.iter() {
            for dst in Square::iter() {
                let _ = v.move_leaves_king_in_check(piece, dst);
                assert_eq!(*v.board(), before);
            }
        }
        let _ = v.can_escape_check(Color::White);
        let _ = v.can_escape_check(Color::Black);
        let _ = v.legal_destinations(sq("c3"));
        assert_eq!(b, before);
    }

    #[test]
    fn test_checkmate() {
        let mut b = Board::empty();
        b.put(Color::White, PieceKind::King, Square::new(7, 0));
        b.put(Color::Black, PieceKind::Queen, Square::new(4, 2));
        b.put(Color::Black, PieceKind::Rook, Square::new(6, 2));
        b.put(Color::Black, PieceKind::Rook, Square::new(7, 2));
        let mut v = MoveValidator::new(&mut b);
        assert!(v.is_king_in_check(Color::White));
        assert!(!v.can_escape_check(Color::White));
        assert!(v.is_checkmate(Color::White));
        assert!(!v.is_stalemate(Color::White));
    }

    #[test]
    fn test_escape_by_capture_or_block() {
        // back rank check, the knight can either capture the rook or block
        let mut b = Board::from_placement("6k1/8/8/8/8/4N3/5PPP/3r2K1").unwrap();
        let mut v = MoveValidator::new(&mut b);
        assert!(v.is_king_in_check(Color::White));
        assert!(v.can_escape_check(Color::White));
        assert!(!v.is_checkmate(Color::White));
        assert_eq!(
            v.legal_destinations(sq("e3")).into_iter().collect::<Vec<_>>(),
            vec![sq("d1"), sq("f1")]
        );
        assert!(v.legal_destinations(sq("f2")).is_empty());
        assert!(v.legal_destinations(sq("g1")).is_empty());
        assert!(v.legal_destinations(sq("e4")).is_empty());
    }

    #[test]
    fn test_stalemate() {
        let mut b = Board::from_placement("7K/8/5n2/5n2/8/8/7k/8").unwrap();
        let mut v = MoveValidator::new(&mut b);
        assert!(!v.is_king_in_check(Color::White));
        assert!(!v.can_escape_check(Color::White));
        assert!(v.is_stalemate(Color::White));
        assert!(!v.is_checkmate(Color::White));
        assert!(v.can_escape_check(Color::Black));
    }

    #[test]
    fn test_endgame_has_moves() {
        let mut b = Board::empty();
        b.put(Color::White, PieceKind::King, Square::new(7, 4));
        b.put(Color::Black, PieceKind::King, Square::new(0, 4));
        b.put(Color::White, PieceKind::Queen, Square::new(3, 3));
        let mut v = MoveValidator::new(&mut b);
        assert!(!v.is_king_in_check(Color::White));
        assert!(v.can_escape_check(Color::White));
        assert!(!v.is_stalemate(Color::White));
    }

    #[test]
    fn test_no_kings() {
        let mut b = Board::from_placement("8/8/8/3q4/8/8/8/R7").unwrap();
        let mut v = MoveValidator::new(&mut b);
        assert!(!v.is_king_in_check(Color::White));
        assert!(v.can_escape_check(Color::White));
        assert!(v.process_move("a1 a8", true));
        assert!(v.process_move("d5 a8", false));
        assert!(!v.can_escape_check(Color::White));
        assert!(v.is_stalemate(Color::White));
    }
}
