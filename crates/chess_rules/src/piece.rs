//! Pieces and their move patterns.
//!
//! Every variant produces a *pseudo-legal* destination list from the
//! current occupancy of the board it stands on. Whether a destination
//! exposes the mover's own king is decided later by the game engine.
//!
//! Two generators cover most variants: ray casting for sliders and
//! single-step offsets for knights and kings. Pawns and castling have
//! their own rules. A separate threat generator answers "which squares
//! does this piece attack" without ever looking at castling, which is what
//! every attack query uses.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::*;

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const QUEEN_DIRS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    /// Only consulted for rooks and kings, where it gates castling.
    pub has_moved: bool,
}

impl Piece {
    /// A piece that has not moved yet.
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
            has_moved: false,
        }
    }

    pub fn moved(mut self) -> Self {
        self.has_moved = true;
        self
    }

    /// Type letter in the side's case: uppercase for White, lowercase for Black.
    pub fn letter(&self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    /// Whether the piece carries castling eligibility.
    pub fn can_castle(&self) -> bool {
        matches!(self.kind, PieceKind::Rook | PieceKind::King) && !self.has_moved
    }

    /// Text-format token, e.g. `PD2`, `kE8*`.
    pub fn token(&self) -> String {
        let mut s = format!("{}{}", self.letter(), self.square);
        if self.can_castle() {
            s.push('*');
        }
        s
    }

    /// A pawn standing on the farthest row for its side.
    pub fn is_promotable(&self, size: u8) -> bool {
        self.kind == PieceKind::Pawn && self.square.row == promotion_row(self.color, size)
    }

    /// Destinations permitted by the piece's movement pattern and the
    /// board's occupancy, castling included, en passant excluded.
    pub fn pseudo_legal_moves(&self, board: &Board) -> Vec<Square> {
        let mut out = Vec::with_capacity(16);
        if self.kind == PieceKind::Pawn {
            self.pawn_pushes(board, &mut out);
        }
        self.collect_threats(board, &mut out, false);
        if self.kind == PieceKind::King {
            self.castling_moves(board, &mut out);
        }
        out
    }

    /// Squares this piece attacks. Never includes castling or pawn pushes,
    /// so attack queries cannot recurse into another king's castling test.
    pub fn threat_moves(&self, board: &Board) -> Vec<Square> {
        let mut out = Vec::with_capacity(16);
        self.collect_threats(board, &mut out, true);
        out
    }

    /// `any_diagonal` selects pawn attack squares regardless of what stands
    /// on them; otherwise pawns only capture onto enemy-occupied squares.
    fn collect_threats(&self, board: &Board, out: &mut Vec<Square>, any_diagonal: bool) {
        match self.kind {
            PieceKind::Pawn => self.pawn_captures(board, out, any_diagonal),
            PieceKind::Knight => self.step_moves(board, &KNIGHT_DELTAS, out),
            PieceKind::Bishop => self.ray_moves(board, &BISHOP_DIRS, out),
            PieceKind::Rook => self.ray_moves(board, &ROOK_DIRS, out),
            PieceKind::Queen => self.ray_moves(board, &QUEEN_DIRS, out),
            PieceKind::King => self.step_moves(board, &KING_DELTAS, out),
        }
    }

    fn ray_moves(&self, board: &Board, dirs: &[(i8, i8)], out: &mut Vec<Square>) {
        let size = board.size();
        for &(dc, dr) in dirs {
            let mut cur = self.square;
            while let Some(to) = cur.offset(dc, dr, size) {
                match board.piece_at(to) {
                    None => out.push(to),
                    Some(pc) => {
                        if pc.color != self.color {
                            out.push(to);
                        }
                        break;
                    }
                }
                cur = to;
            }
        }
    }

    fn step_moves(&self, board: &Board, deltas: &[(i8, i8)], out: &mut Vec<Square>) {
        let size = board.size();
        for &(dc, dr) in deltas {
            if let Some(to) = self.square.offset(dc, dr, size) {
                match board.piece_at(to) {
                    Some(pc) if pc.color == self.color => {}
                    _ => out.push(to),
                }
            }
        }
    }

    fn pawn_pushes(&self, board: &Board, out: &mut Vec<Square>) {
        let size = board.size();
        let dir = self.color.forward();
        let Some(one) = self.square.offset(0, dir, size) else {
            return;
        };
        if !board.is_empty(one) {
            return;
        }
        out.push(one);

        if self.square.row == start_row(self.color, size)
            && let Some(two) = one.offset(0, dir, size)
            && board.is_empty(two)
        {
            out.push(two);
        }
    }

    fn pawn_captures(&self, board: &Board, out: &mut Vec<Square>, any_diagonal: bool) {
        let size = board.size();
        let dir = self.color.forward();
        for dc in [-1, 1] {
            let Some(to) = self.square.offset(dc, dir, size) else {
                continue;
            };
            if any_diagonal {
                out.push(to);
            } else if let Some(target) = board.piece_at(to)
                && target.color != self.color
            {
                out.push(to);
            }
        }
    }

    fn castling_moves(&self, board: &Board, out: &mut Vec<Square>) {
        if self.has_moved {
            return;
        }
        let size = board.size();
        let row = self.square.row;
        let enemy = self.color.other();

        // (rook column, step towards it)
        for (rook_col, step) in [(size - 1, 1i8), (0, -1i8)] {
            let Some(target) = self.square.offset(2 * step, 0, size) else {
                continue;
            };
            // The king must land strictly before the rook.
            let before_rook = if step > 0 {
                target.col < rook_col
            } else {
                target.col > rook_col
            };
            if !before_rook {
                continue;
            }

            let rook_sq = Square::new(rook_col, row);
            let rook_ok = matches!(
                board.piece_at(rook_sq),
                Some(r) if r.kind == PieceKind::Rook && r.color == self.color && !r.has_moved
            );
            if !rook_ok {
                continue;
            }

            let (lo, hi) = if step > 0 {
                (self.square.col + 1, rook_col)
            } else {
                (rook_col + 1, self.square.col)
            };
            if !(lo..hi).all(|c| board.is_empty(Square::new(c, row))) {
                continue;
            }

            let through = Square::new((self.square.col as i8 + step) as u8, row);
            if [self.square, through, target]
                .iter()
                .any(|&sq| board.is_square_attacked(sq, enemy))
            {
                continue;
            }
            out.push(target);
        }
    }
}

/// Row a pawn of `color` starts on (and may double-step from).
pub fn start_row(color: Color, size: u8) -> u8 {
    match color {
        Color::White => 2,
        Color::Black => size - 1,
    }
}

/// Farthest row for a pawn of `color`.
pub fn promotion_row(color: Color, size: u8) -> u8 {
    match color {
        Color::White => size,
        Color::Black => 1,
    }
}

/// Row a pawn of `color` must stand on to capture en passant: where an
/// enemy pawn lands after its double step. Row 5 for White and row 4 for
/// Black on the standard board.
pub fn en_passant_row(color: Color, size: u8) -> u8 {
    let enemy = color.other();
    (start_row(enemy, size) as i8 + 2 * enemy.forward()) as u8
}

#[cfg(test)]
#[path = "piece_tests.rs"]
mod piece_tests;
