use crate::types::Square;
use derive_more::{BitOr, BitOrAssign};
use std::fmt;
use std::iter::{FromIterator, IntoIterator};

/// Set of squares, one bit per square
///
/// Bit `i` corresponds to [`Square::from_index(i)`](Square::from_index), so iteration yields
/// squares in row-major order starting from `a8`. Sets are built by collecting squares and
/// combined with `|`.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, BitOr, BitOrAssign)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    const fn from_square(sq: Square) -> Bitboard {
        Bitboard(1_u64 << sq.index())
    }

    pub const fn has(&self, sq: Square) -> bool {
        ((self.0 >> sq.index()) & 1) != 0
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Bitboard {
        let mut res = Bitboard::EMPTY;
        for sq in iter {
            res |= Bitboard::from_square(sq);
        }
        res
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Bitboard({})", self)
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in 0..8 {
            if row != 0 {
                write!(f, "/")?;
            }
            for col in 0..8 {
                let bit = self.has(Square::new(row, col));
                write!(f, "{}", if bit { '1' } else { '0' })?;
            }
        }
        Ok(())
    }
}

pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros();
        self.0 &= self.0.wrapping_sub(1_u64);
        unsafe { Some(Square::from_index_unchecked(bit as usize)) }
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn squares(names: &[&str]) -> Bitboard {
        names.iter().map(|s| Square::from_str(s).unwrap()).collect()
    }

    #[test]
    fn test_collect_iter() {
        let bb = squares(&["e2", "a4", "f3", "e2"]);
        assert_eq!(bb.len(), 3);
        assert!(bb.has(Square::from_str("f3").unwrap()));
        assert!(!bb.has(Square::from_str("f2").unwrap()));
        let names: Vec<_> = bb.into_iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["a4", "f3", "e2"]);
        assert_eq!(bb.into_iter().collect::<Bitboard>(), bb);
    }

    #[test]
    fn test_union() {
        let mut bb = squares(&["a8", "h1"]);
        assert_eq!(bb | squares(&["h1", "d4"]), squares(&["a8", "d4", "h1"]));
        bb |= squares(&["b2"]);
        assert_eq!(bb.len(), 3);
        assert_eq!(bb | Bitboard::EMPTY, bb);
    }

    #[test]
    fn test_empty() {
        assert!(Bitboard::EMPTY.is_empty());
        assert!(Bitboard::default().is_empty());
        assert_eq!(Bitboard::EMPTY.into_iter().next(), None);
        assert_eq!(std::iter::empty::<Square>().collect::<Bitboard>(), Bitboard::EMPTY);
        assert!(!squares(&["c5"]).is_empty());
    }

    #[test]
    fn test_format() {
        let bb = squares(&["a4", "e2", "f3", "h8"]);
        assert_eq!(
            bb.to_string(),
            "00000001/00000000/00000000/00000000/10000000/00000100/00001000/00000000"
        );
        assert_eq!(
            format!("{:?}", squares(&["a8", "h1"])),
            "Bitboard(10000000/00000000/00000000/00000000/00000000/00000000/00000000/00000001)"
        );
    }
}
