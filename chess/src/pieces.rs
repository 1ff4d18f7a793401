//! Movement rules for each piece kind
//!
//! Every rule is a pure predicate over the piece and a read-only view of the board. The rules
//! know nothing about checks: a move accepted here may still expose the own king.

use crate::bitboard::Bitboard;
use crate::board::{Board, Piece};
use crate::geometry;
use crate::types::{PieceKind, Square};

impl Piece {
    /// Returns `true` if the movement rule of this piece accepts `dst`
    ///
    /// Sliding pieces (bishop, rook, queen) additionally require the path between the piece
    /// and `dst` to be free. For all pieces except pawns, `dst` must be empty or hold an
    /// opponent piece.
    pub fn valid_movement(&self, b: &Board, dst: Square) -> bool {
        match self.kind() {
            PieceKind::Pawn => pawn(self, b, dst),
            PieceKind::Knight => knight(self, b, dst),
            PieceKind::Bishop => bishop(self, b, dst),
            PieceKind::Rook => rook(self, b, dst),
            PieceKind::Queen => queen(self, b, dst),
            PieceKind::King => king(self, b, dst),
        }
    }

    /// Same as [`Piece::valid_movement()`], but takes raw coordinates
    ///
    /// Destinations outside the board are rejected.
    pub fn valid_movement_rc(&self, b: &Board, row: isize, col: isize) -> bool {
        match Square::try_new(row, col) {
            Some(dst) => self.valid_movement(b, dst),
            None => false,
        }
    }

    /// Returns all the squares accepted by the movement rule of this piece
    pub fn destinations(&self, b: &Board) -> Bitboard {
        Square::iter()
            .filter(|&dst| self.valid_movement(b, dst))
            .collect()
    }
}

#[inline]
fn is_free_or_opponent(p: &Piece, b: &Board, dst: Square) -> bool {
    !b.is_occupied(dst) || b.is_opponent(dst, p.color())
}

fn pawn(p: &Piece, b: &Board, dst: Square) -> bool {
    let src = p.square();
    let dir = geometry::pawn_forward_delta(p.color());
    let row_diff = dst.row() as isize - src.row() as isize;
    let col_diff = src.col().abs_diff(dst.col());

    if row_diff == dir && col_diff == 0 {
        return !b.is_occupied(dst);
    }
    if row_diff == 2 * dir && col_diff == 0 {
        if src.row() != geometry::pawn_start_row(p.color()) || b.is_occupied(dst) {
            return false;
        }
        return src
            .try_shift(dir, 0)
            .map_or(false, |mid| !b.is_occupied(mid));
    }
    if row_diff == dir && col_diff == 1 {
        // Pawns never move diagonally without capturing
        return b.is_opponent(dst, p.color());
    }
    false
}

fn knight(p: &Piece, b: &Board, dst: Square) -> bool {
    let (dr, dc) = geometry::deltas(p.square(), dst);
    matches!((dr, dc), (2, 1) | (1, 2)) && is_free_or_opponent(p, b, dst)
}

fn bishop(p: &Piece, b: &Board, dst: Square) -> bool {
    let src = p.square();
    geometry::is_diagonal(src, dst) && !b.has_obstacle(src, dst) && is_free_or_opponent(p, b, dst)
}

fn rook(p: &Piece, b: &Board, dst: Square) -> bool {
    let src = p.square();
    geometry::is_straight(src, dst) && !b.has_obstacle(src, dst) && is_free_or_opponent(p, b, dst)
}

fn queen(p: &Piece, b: &Board, dst: Square) -> bool {
    let src = p.square();
    (geometry::is_diagonal(src, dst) || geometry::is_straight(src, dst))
        && !b.has_obstacle(src, dst)
        && is_free_or_opponent(p, b, dst)
}

fn king(p: &Piece, b: &Board, dst: Square) -> bool {
    let (dr, dc) = geometry::deltas(p.square(), dst);
    dr <= 1 && dc <= 1 && (dr, dc) != (0, 0) && is_free_or_opponent(p, b, dst)
}
