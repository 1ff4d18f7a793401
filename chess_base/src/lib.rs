//! # Base types for chessrules
//!
//! This is an auxiliary crate for `chessrules`, which contains the leaf types: squares, colors, piece
//! kinds and square sets.
//!
//! Normally you don't want to use this crate directly. Use `chessrules` instead.

pub mod bitboard;
pub mod geometry;
pub mod types;
