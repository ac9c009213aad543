use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of columns and rows on a standard board.
pub const STANDARD_SIZE: u8 = 8;

/// Largest supported board. Rows are written as a single digit in the
/// partial-game text format, so nine is the ceiling.
pub const MAX_SIZE: u8 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a forward pawn step.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "WHITE",
            Color::Black => "BLACK",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("white") {
            Ok(Color::White)
        } else if s.eq_ignore_ascii_case("black") {
            Ok(Color::Black)
        } else {
            Err(())
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Uppercase letter used by the text format.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Inverse of [`PieceKind::letter`], case-insensitive.
    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PieceKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_letter(c).ok_or(()),
            _ => match s.to_ascii_lowercase().as_str() {
                "pawn" => Ok(PieceKind::Pawn),
                "knight" => Ok(PieceKind::Knight),
                "bishop" => Ok(PieceKind::Bishop),
                "rook" => Ok(PieceKind::Rook),
                "queen" => Ok(PieceKind::Queen),
                "king" => Ok(PieceKind::King),
                _ => Err(()),
            },
        }
    }
}

/// A board coordinate. `col` is a zero-based index into the column
/// alphabet (`0` is `A`), `row` is one-based like the printed rank.
///
/// A square knows nothing about the board it lives on; whether it is on
/// the board is a question for [`Square::on_board`] with the board's size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub col: u8,
    pub row: u8,
}

impl Square {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Square from a column letter (either case) and a one-based row.
    pub fn at(col: char, row: u8) -> Self {
        let col = (col.to_ascii_uppercase() as u8).wrapping_sub(b'A');
        Self { col, row }
    }

    pub fn column_letter(self) -> char {
        (b'A' + self.col) as char
    }

    pub fn on_board(self, size: u8) -> bool {
        self.col < size && (1..=size).contains(&self.row)
    }

    /// Step by `(dc, dr)`, returning `None` when the result leaves a board
    /// of the given size.
    pub fn offset(self, dc: i8, dr: i8, size: u8) -> Option<Square> {
        let col = self.col as i16 + dc as i16;
        let row = self.row as i16 + dr as i16;
        if col < 0 || row < 1 || col >= size as i16 || row > size as i16 {
            return None;
        }
        Some(Square::new(col as u8, row as u8))
    }

    /// Parse `"D4"` / `"d4"`. Only the shape is checked, not board bounds.
    pub fn parse(s: &str) -> Option<Square> {
        let b = s.as_bytes();
        if b.len() != 2 || !b[0].is_ascii_alphabetic() || !b[1].is_ascii_digit() {
            return None;
        }
        Some(Square::new(
            b[0].to_ascii_uppercase() - b'A',
            b[1] - b'0',
        ))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letter(), self.row)
    }
}

/// Status returned by a move or promotion command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResult {
    Invalid,
    Valid,
    /// The moved pawn reached its last row; the position is final only
    /// after a promotion is supplied.
    ValidPromotion,
    Draw,
    /// Carries the winning side.
    Checkmate(Color),
}

impl MoveResult {
    pub fn is_accepted(self) -> bool {
        self != MoveResult::Invalid
    }
}

/// Finished-game verdict reported by `winner()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    White,
    Black,
    Draw,
}

impl Outcome {
    pub fn winner(color: Color) -> Outcome {
        match color {
            Color::White => Outcome::White,
            Color::Black => Outcome::Black,
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
