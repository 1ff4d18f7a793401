//! Move text in the `<file><rank> <file><rank>` notation
//!
//! The notation names the source and the destination squares separated by exactly one space,
//! for example `e2 e4`. Input is expected in lowercase; uppercase file letters are rejected.

use crate::types::{Square, SquareParseError};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing [`MoveText`] from string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveParseError {
    /// Move text contains non-ASCII characters
    #[error("non-ASCII data in move")]
    NonAscii,
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Squares are not separated by a single space
    #[error("expected a space between squares, found {0:?}")]
    NoSeparator(char),
    /// Bad source square
    #[error("bad source: {0}")]
    BadSrc(SquareParseError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    BadDst(SquareParseError),
}

/// Parsed move request
///
/// It only contains the two squares, and is not validated against any board.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MoveText {
    /// Source square
    pub src: Square,
    /// Destination square
    pub dst: Square,
}

impl MoveText {
    #[inline]
    pub const fn new(src: Square, dst: Square) -> MoveText {
        MoveText { src, dst }
    }
}

impl fmt::Display for MoveText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.src, self.dst)
    }
}

impl FromStr for MoveText {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<MoveText, Self::Err> {
        if !s.is_ascii() {
            return Err(MoveParseError::NonAscii);
        }
        if s.len() != 5 {
            return Err(MoveParseError::BadLength);
        }
        let sep = s.as_bytes()[2];
        if sep != b' ' {
            return Err(MoveParseError::NoSeparator(sep as char));
        }
        let src = Square::from_str(&s[0..2]).map_err(MoveParseError::BadSrc)?;
        let dst = Square::from_str(&s[3..5]).map_err(MoveParseError::BadDst)?;
        Ok(MoveText { src, dst })
    }
}
