//! # Chess rule engine
//!
//! `chessrules` keeps the board state of a two-player chess game and enforces the rules of
//! piece movement. It detects check, checkmate and stalemate, and validates moves given as
//! text like `e2 e4`, including whether a move exposes the own king.
//!
//! The rules are simplified: there is no castling, no en passant, no pawn promotion and no draw
//! by repetition or by the fifty-move rule.
//!
//! # Example
//!
//! ```
//! use chessrules::{Board, Color, Game, MoveValidator};
//!
//! // Low-level API: validate moves directly against a board
//! let mut board = Board::initial();
//! let mut v = MoveValidator::new(&mut board);
//! assert!(v.process_move("e2 e4", true));
//! assert!(!v.process_move("d7 d4", false));
//! assert!(!v.is_king_in_check(Color::Black));
//!
//! // Game session: tracks the side to move and the outcome
//! let mut game = Game::new_initial();
//! game.make_move("g1 f3").unwrap();
//! assert_eq!(game.side(), Color::Black);
//! assert!(game.make_move("g1 h3").is_err());
//! ```

mod attack;
mod pieces;

pub mod board;
pub mod eval;
pub mod game;
pub mod moves;
pub mod scenario;
pub mod validator;

pub use chessrules_base::{bitboard, geometry, types};

pub use bitboard::Bitboard;
pub use board::{Board, Piece};
pub use game::{Game, GameError, Outcome};
pub use moves::MoveText;
pub use scenario::Scenario;
pub use types::{Color, File, PieceKind, Rank, Square};
pub use validator::{MoveError, MoveReport, MoveValidator};
