//! Turn order, move legality and game status.
//!
//! Legality is decided by playing each candidate on a scratch copy of the
//! board and asking whether the mover's king is attacked there. The live
//! board is only touched by accepted commands.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::board::Board;
use crate::error::{NotationError, RuleError};
use crate::log::LogSink;
use crate::notation;
use crate::piece::{Piece, en_passant_row};
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    /// Square of the pawn that advanced two rows on the previous ply.
    en_passant: Option<Square>,
    /// Side most recently reported as in check, for edge-triggered logging.
    last_in_check: Option<Color>,
    player_white: String,
    player_black: String,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

/// What an applied move did besides relocating the mover.
#[derive(Debug, Default)]
struct Played {
    captured: Option<Piece>,
    rook_hop: Option<(Square, Square)>,
}

/// Apply `from -> to` to `board` without any legality checks: ordinary or
/// en-passant capture, relocation, and the rook hop of a castling king.
fn play_on(board: &mut Board, from: Square, to: Square, en_passant: Option<Square>) -> Played {
    let Some(mover) = board.piece_at(from).copied() else {
        return Played::default();
    };
    let mut played = Played {
        captured: board.remove(to),
        rook_hop: None,
    };

    if mover.kind == PieceKind::Pawn && from.col != to.col && played.captured.is_none() {
        // Diagonal onto an empty square: the victim sits beside the mover.
        let victim = Square::new(to.col, from.row);
        if en_passant == Some(victim) {
            played.captured = board.remove(victim);
        }
    }

    board.move_piece(from, to);

    if mover.kind == PieceKind::King && from.col.abs_diff(to.col) == 2 {
        let row = from.row;
        let (rook_from, rook_to) = if to.col > from.col {
            (Square::new(board.size() - 1, row), Square::new(to.col - 1, row))
        } else {
            (Square::new(0, row), Square::new(to.col + 1, row))
        };
        if board.move_piece(rook_from, rook_to) {
            played.rook_hop = Some((rook_from, rook_to));
        }
    }
    played
}

impl Game {
    /// A game on `board` with White to move.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            side_to_move: Color::White,
            en_passant: None,
            last_in_check: None,
            player_white: String::new(),
            player_black: String::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_size(&self) -> u8 {
        self.board.size()
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Square of the pawn that may currently be captured en passant.
    pub fn en_passant_pawn(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.board.piece_at(sq)
    }

    /// Lowercase type name of the piece on `sq`, e.g. `"knight"`.
    pub fn piece_kind_name(&self, sq: Square) -> Option<&'static str> {
        self.piece_at(sq).map(|p| p.kind.name())
    }

    pub fn player_name(&self, side: Color) -> &str {
        match side {
            Color::White => &self.player_white,
            Color::Black => &self.player_black,
        }
    }

    pub fn set_player_name(&mut self, side: Color, name: impl Into<String>) {
        match side {
            Color::White => self.player_white = name.into(),
            Color::Black => self.player_black = name.into(),
        }
    }

    /// Board tokens in insertion order, without the side to move.
    pub fn board_text(&self) -> String {
        self.board.normalized_text()
    }

    /// `SIDE,` plus the board tokens; see [`notation`].
    pub fn export_text(&self) -> String {
        notation::format_game(self.side_to_move, &self.board)
    }

    pub fn is_in_check(&self, side: Color) -> bool {
        self.board.is_in_check(side)
    }

    /// The side currently in check, if any.
    pub fn checked_side(&self) -> Option<Color> {
        [Color::White, Color::Black]
            .into_iter()
            .find(|&c| self.is_in_check(c))
    }

    pub fn is_promotable(&self, sq: Square) -> bool {
        self.piece_at(sq)
            .is_some_and(|p| p.is_promotable(self.board.size()))
    }

    /// Extra pawn destination granted by the en-passant marker.
    fn en_passant_target(&self, piece: &Piece) -> Option<Square> {
        if piece.kind != PieceKind::Pawn
            || piece.square.row != en_passant_row(piece.color, self.board.size())
        {
            return None;
        }
        let ep = self.en_passant?;
        let victim = self.board.piece_at(ep)?;
        if victim.kind != PieceKind::Pawn
            || victim.color == piece.color
            || ep.row != piece.square.row
            || ep.col.abs_diff(piece.square.col) != 1
        {
            return None;
        }
        let dest = ep.offset(0, piece.color.forward(), self.board.size())?;
        self.board.is_empty(dest).then_some(dest)
    }

    /// Pseudo-legal destinations plus en passant.
    fn candidate_moves(&self, piece: &Piece) -> Vec<Square> {
        let mut moves = piece.pseudo_legal_moves(&self.board);
        moves.extend(self.en_passant_target(piece));
        moves
    }

    /// Play the move on a scratch board and check the mover's king there.
    fn keeps_king_safe(&self, piece: &Piece, to: Square) -> bool {
        let mut scratch = self.board.clone();
        play_on(&mut scratch, piece.square, to, self.en_passant);
        !scratch.is_in_check(piece.color)
    }

    /// Destinations the piece on `sq` may legally move to, en passant and
    /// castling included. Empty when `sq` is empty.
    pub fn legal_destinations(&self, sq: Square) -> Vec<Square> {
        let Some(piece) = self.piece_at(sq).copied() else {
            return Vec::new();
        };
        let moves: Vec<Square> = self
            .candidate_moves(&piece)
            .into_iter()
            .filter(|&to| self.keeps_king_safe(&piece, to))
            .collect();
        trace!(from = %sq, count = moves.len(), "legal destinations");
        moves
    }

    pub fn has_legal_move(&self, side: Color) -> bool {
        self.board
            .pieces()
            .iter()
            .filter(|p| p.color == side)
            .any(|p| {
                self.candidate_moves(p)
                    .into_iter()
                    .any(|to| self.keeps_king_safe(p, to))
            })
    }

    /// Stalemate: both kings present, `side` not in check and without a
    /// legal move.
    pub fn is_draw(&self, side: Color) -> bool {
        self.board.king(Color::White).is_some()
            && self.board.king(Color::Black).is_some()
            && !self.is_in_check(side)
            && !self.has_legal_move(side)
    }

    pub fn is_checkmate(&self, side: Color) -> bool {
        self.board.king(side).is_some() && self.is_in_check(side) && !self.has_legal_move(side)
    }

    /// Finished-game verdict, `None` while play continues.
    pub fn winner(&self) -> Option<Outcome> {
        if self.is_draw(Color::White) || self.is_draw(Color::Black) {
            Some(Outcome::Draw)
        } else if self.is_checkmate(Color::White) {
            Some(Outcome::Black)
        } else if self.is_checkmate(Color::Black) {
            Some(Outcome::White)
        } else {
            None
        }
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Empty board of `size`, White to move. Player names are kept.
    pub fn reset(&mut self, size: u8) {
        self.board = Board::new(size);
        self.side_to_move = Color::White;
        self.en_passant = None;
        self.last_in_check = None;
    }

    /// Standard starting position.
    pub fn start(&mut self, log: &mut dyn LogSink) {
        self.reset(STANDARD_SIZE);
        self.board = Board::startpos();
        log.append("New game started.".to_string());
    }

    pub fn execute_move(&mut self, from: Square, to: Square, log: &mut dyn LogSink) -> MoveResult {
        let Some(mover) = self.piece_at(from).copied() else {
            log.append(format!("Invalid move: no piece on {from}."));
            return MoveResult::Invalid;
        };
        if mover.color != self.side_to_move {
            log.append(format!(
                "Invalid move: {from} holds a {} piece but {} is to move.",
                mover.color, self.side_to_move
            ));
            return MoveResult::Invalid;
        }
        if !self.candidate_moves(&mover).contains(&to) {
            log.append(format!(
                "Invalid move: the {} on {from} cannot reach {to}.",
                mover.kind
            ));
            return MoveResult::Invalid;
        }
        if !self.keeps_king_safe(&mover, to) {
            log.append(format!(
                "Invalid move: {from} to {to} leaves the {} king in check.",
                mover.color
            ));
            return MoveResult::Invalid;
        }

        let played = play_on(&mut self.board, from, to, self.en_passant);
        self.en_passant =
            (mover.kind == PieceKind::Pawn && from.row.abs_diff(to.row) == 2).then_some(to);

        let mut msg = format!("Move played: {} {} from {from} to {to}", mover.color, mover.kind);
        if let Some(victim) = played.captured {
            msg.push_str(&format!(", captures {} on {}", victim.kind, victim.square));
        }
        if let Some((rook_from, rook_to)) = played.rook_hop {
            msg.push_str(&format!(", castles with rook {rook_from} to {rook_to}"));
        }
        msg.push('.');
        log.append(msg);
        debug!(%from, %to, en_passant = ?self.en_passant, "move applied");

        self.side_to_move = self.side_to_move.other();
        self.note_check(log);

        if self.is_promotable(to) {
            log.append(format!("Pawn on {to} awaits promotion."));
            return MoveResult::ValidPromotion;
        }
        self.status(log)
    }

    /// Replace the promotable pawn on `sq` with a fresh `kind`, then settle
    /// the position the pawn move left open.
    pub fn promote(
        &mut self,
        sq: Square,
        kind: PieceKind,
        log: &mut dyn LogSink,
    ) -> Result<MoveResult, RuleError> {
        if matches!(kind, PieceKind::Pawn | PieceKind::King) {
            log.append(format!("Invalid promotion: cannot promote to {kind}."));
            return Err(RuleError::PromotionTarget(kind));
        }
        let Some(pawn) = self.piece_at(sq).copied().filter(|p| p.is_promotable(self.board.size()))
        else {
            log.append(format!("Invalid promotion: no promotable pawn on {sq}."));
            return Err(RuleError::NotPromotable(sq));
        };

        // Promoted pieces never carry castling rights.
        self.board.replace(Piece::new(kind, pawn.color, sq).moved());
        log.append(format!("Pawn on {sq} promoted to {kind}."));

        self.note_check(log);
        Ok(self.status(log))
    }

    /// Replace board and side to move with the parsed `text`. On error the
    /// game is left untouched.
    pub fn import_text(
        &mut self,
        text: &str,
        size: u8,
        log: &mut dyn LogSink,
    ) -> Result<(), NotationError> {
        match notation::parse_game(text, size) {
            Ok((side, board)) => {
                self.board = board;
                self.side_to_move = side;
                self.en_passant = None;
                self.last_in_check = None;
                log.append("Game imported.".to_string());
                Ok(())
            }
            Err(e) => {
                log.append(format!("Import failed: {e}."));
                Err(e)
            }
        }
    }

    /// Edge-triggered check notice for the side to move.
    fn note_check(&mut self, log: &mut dyn LogSink) {
        let side = self.side_to_move;
        let in_check = self.is_in_check(side);
        if in_check && self.last_in_check != Some(side) {
            log.append(format!("{side} is in check."));
            self.last_in_check = Some(side);
        } else if !in_check && self.last_in_check == Some(side) {
            self.last_in_check = None;
        }
    }

    /// Draw or checkmate for either side, otherwise `Valid`.
    fn status(&self, log: &mut dyn LogSink) -> MoveResult {
        for side in [Color::White, Color::Black] {
            if self.is_draw(side) {
                log.append(format!("Draw: {side} has no legal move."));
                return MoveResult::Draw;
            }
        }
        for side in [Color::White, Color::Black] {
            if self.is_checkmate(side) {
                log.append(format!("Checkmate! {side} loses."));
                return MoveResult::Checkmate(side.other());
            }
        }
        MoveResult::Valid
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
