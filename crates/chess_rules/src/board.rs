use serde::{Deserialize, Serialize};

use crate::error::NotationError;
use crate::piece::Piece;
use crate::types::*;

/// Smallest board on which the two pawn start rows are separated by at
/// least one row, so a double step never starts from the last row.
pub const MIN_SIZE: u8 = 5;

/// Placed pieces in insertion order plus spatial queries over them.
///
/// Insertion order is observable: it is the order of the text export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: u8,
    pieces: Vec<Piece>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(STANDARD_SIZE)
    }
}

impl Board {
    /// Empty board of `size` columns by `size` rows.
    pub fn new(size: u8) -> Self {
        debug_assert!(
            (MIN_SIZE..=MAX_SIZE).contains(&size),
            "board size {size} out of range"
        );
        Self {
            size,
            pieces: Vec::with_capacity(32),
        }
    }

    /// Standard 8x8 starting position.
    pub fn startpos() -> Self {
        let mut b = Board::new(STANDARD_SIZE);
        for col in 0..STANDARD_SIZE {
            b.add(Piece::new(PieceKind::Pawn, Color::White, Square::new(col, 2)));
            b.add(Piece::new(PieceKind::Pawn, Color::Black, Square::new(col, 7)));
            let back = match col {
                0 | 7 => Some(PieceKind::Rook),
                1 | 6 => Some(PieceKind::Knight),
                2 | 5 => Some(PieceKind::Bishop),
                _ => None,
            };
            if let Some(kind) = back {
                b.add(Piece::new(kind, Color::White, Square::new(col, 1)));
                b.add(Piece::new(kind, Color::Black, Square::new(col, 8)));
            }
        }
        b.add(Piece::new(PieceKind::King, Color::White, Square::at('E', 1)));
        b.add(Piece::new(PieceKind::King, Color::Black, Square::at('E', 8)));
        b.add(Piece::new(PieceKind::Queen, Color::White, Square::at('D', 1)));
        b.add(Piece::new(PieceKind::Queen, Color::Black, Square::at('D', 8)));
        b
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    pub fn is_valid(&self, sq: Square) -> bool {
        sq.on_board(self.size)
    }

    /// On the board and unoccupied.
    pub fn is_empty(&self, sq: Square) -> bool {
        self.is_valid(sq) && self.piece_at(sq).is_none()
    }

    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square == sq)
    }

    fn index_of(&self, sq: Square) -> Option<usize> {
        self.pieces.iter().position(|p| p.square == sq)
    }

    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.color == color && p.kind == PieceKind::King)
    }

    pub fn add(&mut self, piece: Piece) {
        debug_assert!(
            self.piece_at(piece.square).is_none(),
            "two pieces on {}",
            piece.square
        );
        self.pieces.push(piece);
    }

    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        let idx = self.index_of(sq)?;
        Some(self.pieces.remove(idx))
    }

    /// Swap the piece on `piece.square` for `piece`, keeping its slot in
    /// insertion order. Returns the piece that was replaced.
    pub fn replace(&mut self, piece: Piece) -> Option<Piece> {
        let idx = self.index_of(piece.square)?;
        Some(std::mem::replace(&mut self.pieces[idx], piece))
    }

    /// Relocate the piece on `from` to the empty square `to` and mark it as
    /// moved. Returns `false` when `from` is empty.
    pub fn move_piece(&mut self, from: Square, to: Square) -> bool {
        debug_assert!(self.piece_at(to).is_none(), "move onto occupied {to}");
        match self.pieces.iter_mut().find(|p| p.square == from) {
            Some(pc) => {
                pc.square = to;
                pc.has_moved = true;
                true
            }
            None => false,
        }
    }

    /// Whether any piece of `by` threatens `sq`.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.pieces
            .iter()
            .filter(|p| p.color == by)
            .any(|p| p.threat_moves(self).contains(&sq))
    }

    /// The king of `color` exists and is attacked. A missing king is never
    /// in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king(color) {
            Some(k) => self.is_square_attacked(k.square, color.other()),
            None => false,
        }
    }

    /// Check the invariants every mutator keeps: supported size, every
    /// piece on the board, no shared squares. Used on data from outside.
    pub fn validate(&self) -> Result<(), NotationError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(NotationError::BoardSize(self.size));
        }
        for (i, pc) in self.pieces.iter().enumerate() {
            if !self.is_valid(pc.square) {
                return Err(NotationError::OffBoard {
                    square: pc.square,
                    size: self.size,
                });
            }
            if self.pieces[..i].iter().any(|p| p.square == pc.square) {
                return Err(NotationError::Occupied(pc.square));
            }
        }
        Ok(())
    }

    /// Comma-separated piece tokens in insertion order, e.g. `PC8,QG1`.
    pub fn normalized_text(&self) -> String {
        self.pieces
            .iter()
            .map(Piece::token)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
