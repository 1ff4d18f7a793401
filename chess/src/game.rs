//! Game session: a board with the side to move

use crate::board::Board;
use crate::eval;
use crate::types::Color;
use crate::validator::{MoveError, MoveReport, MoveValidator};

use std::fmt;

use log::info;
use thiserror::Error;

/// Result of a finished game
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The side to move is in check and cannot escape it
    Checkmate { winner: Color },
    /// The side to move is not in check, but has no legal move
    Stalemate,
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            Self::Checkmate { winner } => Some(*winner),
            Self::Stalemate => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            Self::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Error returned by [`Game::make_move()`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum GameError {
    #[error("illegal move: {0}")]
    Move(#[from] MoveError),
    #[error("game is finished: {0}")]
    Finished(Outcome),
}

/// Game session
///
/// Owns the board and tracks the side to move. The turn changes only when a move succeeds.
/// After each move, the session checks whether the side to move is mated or stalemated, and
/// refuses further moves once it is.
///
/// # Example
///
/// ```
/// # use chessrules::{Color, Game};
/// # use chessrules::game::Outcome;
/// #
/// let mut game = Game::new_initial();
/// for mv in ["f2 f3", "e7 e5", "g2 g4", "d8 h4"] {
///     game.make_move(mv).unwrap();
/// }
/// assert_eq!(game.outcome(), Some(Outcome::Checkmate { winner: Color::Black }));
/// assert!(game.make_move("a2 a3").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    side: Color,
    outcome: Option<Outcome>,
}

impl Game {
    /// Starts a game on `board` with White to move
    pub fn new(board: Board) -> Game {
        Game::with_side(board, Color::White)
    }

    /// Starts a game from the initial position
    pub fn new_initial() -> Game {
        Game::new(Board::initial())
    }

    /// Starts a game on `board` with `side` to move
    pub fn with_side(board: Board, side: Color) -> Game {
        let mut res = Game {
            board,
            side,
            outcome: None,
        };
        res.update_outcome();
        res
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn is_white_turn(&self) -> bool {
        self.side == Color::White
    }

    /// Returns the outcome if the game is finished
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Returns a validator for the board of this game
    ///
    /// Moves executed through the validator bypass the turn tracking of the session.
    #[inline]
    pub fn validator(&mut self) -> MoveValidator<'_> {
        MoveValidator::new(&mut self.board)
    }

    /// Returns `true` if the side to move is in check
    pub fn is_check(&self) -> bool {
        self.board.is_king_in_check(self.side)
    }

    /// Returns `true` if the side to move is checkmated
    pub fn is_checkmate(&mut self) -> bool {
        let side = self.side;
        self.validator().is_checkmate(side)
    }

    /// Returns `true` if the side to move is stalemated
    pub fn is_stalemate(&mut self) -> bool {
        let side = self.side;
        self.validator().is_stalemate(side)
    }

    /// Material balance of the current position, see [`eval::material_balance()`]
    #[inline]
    pub fn material_balance(&self) -> i32 {
        eval::material_balance(&self.board)
    }

    /// Validates and executes move `text` for the side to move
    ///
    /// On success, the turn passes to the opponent. On failure, neither the board nor the
    /// side to move change.
    pub fn make_move(&mut self, text: &str) -> Result<MoveReport, GameError> {
        if let Some(outcome) = self.outcome {
            return Err(GameError::Finished(outcome));
        }
        let side = self.side;
        let report = self.validator().try_process_move(text, side)?;
        self.side = side.inv();
        self.update_outcome();
        Ok(report)
    }

    /// Passes the turn to the opponent without making a move
    pub fn switch_side(&mut self) {
        self.side = self.side.inv();
        self.update_outcome();
    }

    fn update_outcome(&mut self) {
        let side = self.side;
        let in_check = self.is_check();
        let outcome = if self.validator().can_escape_check(side) {
            None
        } else if in_check {
            Some(Outcome::Checkmate { winner: side.inv() })
        } else {
            Some(Outcome::Stalemate)
        };
        if let Some(o) = outcome {
            info!("game finished: {}", o);
        }
        self.outcome = outcome;
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new_initial()
    }
}
