use crate::types::{Color, Square};

/// Row delta of a single pawn step for color `c`
///
/// White moves towards row 0, Black towards row 7.
pub const fn pawn_forward_delta(c: Color) -> isize {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// Row from which the pawns of color `c` may make a double step
pub const fn pawn_start_row(c: Color) -> usize {
    match c {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Row holding the pieces of color `c` in the initial position
pub const fn home_row(c: Color) -> usize {
    match c {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Unit step from `src` towards `dst` along each axis
///
/// Every component is `-1`, `0` or `1`.
pub const fn unit_step(src: Square, dst: Square) -> (isize, isize) {
    (
        (dst.row() as isize - src.row() as isize).signum(),
        (dst.col() as isize - src.col() as isize).signum(),
    )
}

/// Returns `true` if `src` and `dst` are distinct and share a row or a column
pub const fn is_straight(src: Square, dst: Square) -> bool {
    (src.row() == dst.row()) != (src.col() == dst.col())
}

/// Returns `true` if `src` and `dst` are distinct and lie on one diagonal
pub const fn is_diagonal(src: Square, dst: Square) -> bool {
    let (dr, dc) = deltas(src, dst);
    dr == dc && dr != 0
}

/// Absolute row and column distances between `src` and `dst`
pub const fn deltas(src: Square, dst: Square) -> (usize, usize) {
    (src.row().abs_diff(dst.row()), src.col().abs_diff(dst.col()))
}
