//! Board and related things

use crate::attack;
use crate::bitboard::Bitboard;
use crate::geometry;
use crate::types::{Color, File, PieceKind, Rank, Square};

use std::fmt::{self, Display};
use std::str::FromStr;

use arrayvec::ArrayVec;
use thiserror::Error;

/// Error parsing the piece placement (i.e. the first part of FEN) into a [`Board`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PlacementParseError {
    /// Placement contains non-ASCII characters
    #[error("non-ASCII data in placement")]
    NonAscii,
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Chess piece standing on a board
///
/// A piece is a plain value: its color, its kind and the square it currently occupies. The
/// [`Board`] owns the pieces and keeps the stored square in sync with the cell holding it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    square: Square,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind, square: Square) -> Piece {
        Piece {
            color,
            kind,
            square,
        }
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Square the piece stands on
    #[inline]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[inline]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    #[inline]
    pub(crate) fn with_square(self, square: Square) -> Piece {
        Piece { square, ..self }
    }

    /// Returns the FEN letter for this piece (uppercase for White, lowercase for Black)
    pub fn as_char(&self) -> char {
        let c = self.kind.as_char();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    pub fn as_utf8_char(&self) -> char {
        const WHITE: [char; PieceKind::COUNT] = ['♙', '♘', '♗', '♖', '♕', '♔'];
        const BLACK: [char; PieceKind::COUNT] = ['♟', '♞', '♝', '♜', '♛', '♚'];
        match self.color {
            Color::White => WHITE[self.kind.index()],
            Color::Black => BLACK[self.kind.index()],
        }
    }

    fn parts_from_char(c: char) -> Option<(Color, PieceKind)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((color, kind))
    }
}

/// Record of a trial move, sufficient to restore the board exactly
///
/// Returned by [`Board::make_unchecked()`] and consumed by [`Board::unmake()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[must_use]
pub struct Undo {
    src: Square,
    src_prev: Option<Piece>,
    dst: Square,
    dst_prev: Option<Piece>,
}

impl Undo {
    /// Piece that stood on the destination before the trial move, if any
    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.dst_prev
    }
}

/// Chess board
///
/// An 8x8 grid where each cell holds at most one [`Piece`]. The board does not validate the
/// position as a whole: it may contain any number of pieces of each kind, including zero or
/// several kings of one color.
///
/// The board is mutated only by unconditional placement ([`Board::set_piece()`]) and by
/// rule-checked relocation ([`Board::move_piece()`]). Both keep the stored square of each
/// piece equal to the cell that holds it.
///
/// # Example
///
/// ```
/// # use chessrules::{Board, Color, PieceKind, Square};
/// #
/// let mut board = Board::initial();
/// assert!(board.move_piece(Square::new(6, 4), Square::new(4, 4)));
/// let pawn = board.piece_at(Square::new(4, 4)).unwrap();
/// assert_eq!(pawn.kind(), PieceKind::Pawn);
/// assert_eq!(pawn.color(), Color::White);
/// assert_eq!(board.as_placement(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Returns an empty board
    ///
    /// Does the same as [`Board::default()`], except that this function is `const`.
    #[inline]
    pub const fn empty() -> Board {
        Board {
            cells: [None; Square::COUNT],
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for file in File::iter() {
            res.put(Color::White, PieceKind::Pawn, Square::from_parts(file, Rank::R2));
            res.put(Color::Black, PieceKind::Pawn, Square::from_parts(file, Rank::R7));
        }
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for color in [Color::White, Color::Black] {
            let row = geometry::home_row(color);
            for (col, kind) in BACK_RANK.into_iter().enumerate() {
                res.put(color, kind, Square::new(row, col));
            }
        }
        res
    }

    /// Parses a board from the piece placement part of FEN
    ///
    /// Does the same as [`Board::from_str`]. It is recommended to use this function instead of
    /// `from_str()` for better readability.
    #[inline]
    pub fn from_placement(s: &str) -> Result<Board, PlacementParseError> {
        Board::from_str(s)
    }

    /// Returns the piece on square `sq`, if any
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    /// Returns the piece at row `row` and column `col`
    ///
    /// Coordinates outside the board yield `None` instead of failing.
    #[inline]
    pub fn piece_at_rc(&self, row: isize, col: isize) -> Option<Piece> {
        Square::try_new(row, col).and_then(|sq| self.piece_at(sq))
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.cells[sq.index()].is_some()
    }

    /// Returns `true` if `sq` holds a piece whose color differs from `color`
    #[inline]
    pub fn is_opponent(&self, sq: Square, color: Color) -> bool {
        matches!(self.piece_at(sq), Some(p) if p.color() != color)
    }

    /// Returns `true` if any square strictly between `src` and `dst` is occupied
    ///
    /// The path is walked one step at a time along the unit direction from `src` to `dst`.
    /// It is only meaningful if `src` and `dst` share a row, a column or a diagonal; for any
    /// other pair there is no path, and the function returns `false`.
    pub fn has_obstacle(&self, src: Square, dst: Square) -> bool {
        if !geometry::is_straight(src, dst) && !geometry::is_diagonal(src, dst) {
            return false;
        }
        let (row_step, col_step) = geometry::unit_step(src, dst);
        let mut cur = src;
        while let Some(next) = cur.try_shift(row_step, col_step) {
            if next == dst {
                return false;
            }
            if self.is_occupied(next) {
                return true;
            }
            cur = next;
        }
        false
    }

    /// Relocates the piece from `src` to `dst` if its movement rule allows it
    ///
    /// Fails without changing the board if `src` is empty, if the piece's movement rule rejects
    /// `dst`, or if `dst` holds a piece of the same color. Otherwise, any opponent piece on `dst`
    /// is captured.
    ///
    /// Note that this function doesn't verify whether the move exposes the own king. Use
    /// [`MoveValidator`](crate::validator::MoveValidator) for full legality checking.
    pub fn move_piece(&mut self, src: Square, dst: Square) -> bool {
        let piece = match self.piece_at(src) {
            Some(p) => p,
            None => return false,
        };
        if !piece.valid_movement(self, dst) {
            return false;
        }
        if self.is_occupied(dst) && !self.is_opponent(dst, piece.color()) {
            return false;
        }
        self.cells[src.index()] = None;
        self.cells[dst.index()] = Some(piece.with_square(dst));
        true
    }

    /// Puts `piece` on `sq` unconditionally, or clears `sq` if `piece` is `None`
    ///
    /// The stored square of the placed piece is updated to `sq`.
    #[inline]
    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.index()] = piece.map(|p| p.with_square(sq));
    }

    /// Shorthand for placing a new piece of `color` and `kind` on `sq`
    #[inline]
    pub fn put(&mut self, color: Color, kind: PieceKind, sq: Square) {
        self.set_piece(sq, Some(Piece::new(color, kind, sq)));
    }

    /// Removes all the pieces from the board
    #[inline]
    pub fn clear(&mut self) {
        self.cells = [None; Square::COUNT];
    }

    /// Moves `piece` to `dst` without any checks and returns the data to undo it
    ///
    /// The cell named by `piece.square()` is cleared and `piece` is placed on `dst`, replacing
    /// whatever stood there. The board must be restored with [`Board::unmake()`] before it is
    /// used for anything else than evaluating the trial.
    pub fn make_unchecked(&mut self, piece: Piece, dst: Square) -> Undo {
        let src = piece.square();
        let undo = Undo {
            src,
            src_prev: self.piece_at(src),
            dst,
            dst_prev: self.piece_at(dst),
        };
        self.cells[src.index()] = None;
        self.cells[dst.index()] = Some(piece.with_square(dst));
        undo
    }

    /// Restores the board to the state before the corresponding [`Board::make_unchecked()`]
    pub fn unmake(&mut self, u: Undo) {
        self.cells[u.dst.index()] = u.dst_prev;
        self.cells[u.src.index()] = u.src_prev;
    }

    /// Returns the square of the king of color `c`
    ///
    /// If there are several such kings, the one chosen is in the last row holding a king of
    /// color `c`, and is the leftmost king in that row. Returns `None` if there is no such
    /// king. Boards built from scenarios are allowed to have no king at all.
    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.iter()
            .filter(|p| p.is_king() && p.color() == c)
            .map(|p| p.square())
            .fold(None, |acc, sq| match acc {
                Some(prev) if prev.row() == sq.row() => Some(prev),
                _ => Some(sq),
            })
    }

    /// Iterates over all the pieces on the board in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells.iter().filter_map(|c| *c)
    }

    /// Returns a snapshot of all the pieces of color `c` in row-major order
    pub fn pieces(&self, c: Color) -> ArrayVec<Piece, { Square::COUNT }> {
        self.iter().filter(|p| p.color() == c).collect()
    }

    /// Returns the set of squares occupied by pieces of color `c`
    pub fn occupied_by(&self, c: Color) -> Bitboard {
        self.iter()
            .filter(|p| p.color() == c)
            .map(|p| p.square())
            .collect()
    }

    /// Returns `true` if king of color `c` is attacked
    ///
    /// Returns `false` if there is no king of color `c`.
    #[inline]
    pub fn is_king_in_check(&self, c: Color) -> bool {
        attack::is_king_in_check(self, c)
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use chessrules::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    ///  |abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }

    /// Converts the board into the piece placement part of FEN
    ///
    /// Does the same as `Board::to_string()`. It is recommended to use this function instead of
    /// `to_string()` for better readability.
    #[inline]
    pub fn as_placement(&self) -> String {
        self.to_string()
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

impl FromStr for Board {
    type Err = PlacementParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        type Error = PlacementParseError;

        if !s.is_ascii() {
            return Err(Error::NonAscii);
        }

        let mut col = 0_usize;
        let mut row = 0_usize;
        let mut res = Board::empty();
        for b in s.bytes() {
            match b {
                b'1'..=b'8' => {
                    let add = (b - b'0') as usize;
                    if col + add > 8 {
                        return Err(Error::RankOverflow(Rank::from_index(row)));
                    }
                    col += add;
                }
                b'/' => {
                    if col < 8 {
                        return Err(Error::RankUnderflow(Rank::from_index(row)));
                    }
                    row += 1;
                    col = 0;
                    if row >= 8 {
                        return Err(Error::Overflow);
                    }
                }
                _ => {
                    if col >= 8 {
                        return Err(Error::RankOverflow(Rank::from_index(row)));
                    }
                    let (color, kind) =
                        Piece::parts_from_char(b as char).ok_or(Error::UnexpectedChar(b as char))?;
                    res.put(color, kind, Square::new(row, col));
                    col += 1;
                }
            };
        }

        if col < 8 {
            return Err(Error::RankUnderflow(Rank::from_index(row)));
        }
        if row < 7 {
            return Err(Error::Underflow);
        }

        Ok(res)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in 0..8 {
            if row != 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for col in 0..8 {
                let piece = match self.piece_at(Square::new(row, col)) {
                    Some(p) => p,
                    None => {
                        empty += 1;
                        continue;
                    }
                };
                if empty != 0 {
                    write!(f, "{}", empty)?;
                    empty = 0;
                }
                write!(f, "{}", piece.as_char())?;
            }
            if empty != 0 {
                write!(f, "{}", empty)?;
            }
        }
        Ok(())
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;

    fn cell(c: Option<Piece>) -> char;

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                write!(f, "{}", Self::cell(b.piece_at(Square::from_parts(file, rank))))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, " {}", Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';

    fn cell(c: Option<Piece>) -> char {
        c.map_or('.', |p| p.as_char())
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';

    fn cell(c: Option<Piece>) -> char {
        c.map_or('.', |p| p.as_utf8_char())
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}
