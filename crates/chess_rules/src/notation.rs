//! Partial-game text format.
//!
//! ```text
//! WHITE,RA1*,NB1,PD4,kE8*,...
//! ```
//!
//! Field 0 is the side to move (`WHITE` or `BLACK`, any case). Every other
//! field is one piece: type letter (uppercase White, lowercase Black),
//! column letter, row digit, and a trailing `*` when a rook or king has not
//! moved yet. Pieces are written in board insertion order, which makes
//! export of an import of an export byte-identical.

use crate::board::{Board, MIN_SIZE};
use crate::error::NotationError;
use crate::piece::Piece;
use crate::types::*;

/// `SIDE,` followed by the board's normalized text.
pub fn format_game(side: Color, board: &Board) -> String {
    format!("{},{}", side, board.normalized_text())
}

/// Parse a whole game text onto an empty board of `size`.
pub fn parse_game(text: &str, size: u8) -> Result<(Color, Board), NotationError> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(NotationError::BoardSize(size));
    }
    let mut fields = text.trim().split(',').map(str::trim);
    let side = match fields.next() {
        Some("") | None => return Err(NotationError::Empty),
        Some(s) => s
            .parse::<Color>()
            .map_err(|_| NotationError::Side(s.to_string()))?,
    };

    let mut board = Board::new(size);
    for field in fields.filter(|f| !f.is_empty()) {
        let piece = parse_token(field, size)?;
        if board.piece_at(piece.square).is_some() {
            return Err(NotationError::Occupied(piece.square));
        }
        board.add(piece);
    }
    Ok((side, board))
}

/// Parse one piece token such as `rH8*` or `PD4`.
pub fn parse_token(token: &str, size: u8) -> Result<Piece, NotationError> {
    let bad = || NotationError::Token(token.to_string());
    let chars: Vec<char> = token.chars().collect();
    let (body, unmoved) = match chars.as_slice() {
        [body @ .., '*'] => (body, true),
        body => (body, false),
    };
    let &[letter, col, row] = body else {
        return Err(bad());
    };

    let kind = PieceKind::from_letter(letter).ok_or_else(bad)?;
    let color = if letter.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    if !col.is_ascii_alphabetic() {
        return Err(bad());
    }
    let row = row.to_digit(10).ok_or_else(bad)? as u8;
    let square = Square::at(col, row);
    if !square.on_board(size) {
        return Err(NotationError::OffBoard { square, size });
    }

    let mut piece = Piece::new(kind, color, square);
    piece.has_moved = !unmoved;
    Ok(piece)
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
