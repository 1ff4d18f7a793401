//! Material evaluation
//!
//! The score is only meant for display. Nothing in the rule engine consults it.

use crate::board::Board;
use crate::types::{Color, PieceKind};

/// Returns the material value of a piece of kind `k`, in centipawns
#[inline]
pub const fn piece_value(k: PieceKind) -> i32 {
    match k {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20000,
    }
}

/// Returns the total value of White's pieces minus the total value of Black's pieces
///
/// Positive scores favor White, negative scores favor Black.
pub fn material_balance(b: &Board) -> i32 {
    b.iter()
        .map(|p| match p.color() {
            Color::White => piece_value(p.kind()),
            Color::Black => -piece_value(p.kind()),
        })
        .sum()
}
