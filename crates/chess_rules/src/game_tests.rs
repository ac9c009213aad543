use super::*;
use crate::log::{MoveLog, NullLog};

fn game_from(text: &str) -> Game {
    let mut game = Game::default();
    game.import_text(text, STANDARD_SIZE, &mut NullLog)
        .expect("test position should parse");
    game
}

fn sq(s: &str) -> Square {
    Square::parse(s).expect("test square")
}

fn play(game: &mut Game, from: &str, to: &str) -> MoveResult {
    game.execute_move(sq(from), sq(to), &mut NullLog)
}

fn started() -> Game {
    let mut game = Game::default();
    game.start(&mut NullLog);
    game
}

// Position used throughout: black king on H5 boxed in by three queens.
const QUEENS_VS_KING: &str = "WHITE,pD4,QD5,PC8,pA8,kH5*,QH1,QG1";

// =============================================================================
// Turn order and basic validation
// =============================================================================

#[test]
fn test_opening_moves_alternate_sides() {
    let mut game = started();
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(play(&mut game, "D2", "D4"), MoveResult::Valid);
    assert_eq!(game.side_to_move(), Color::Black);
    assert_eq!(play(&mut game, "D7", "D5"), MoveResult::Valid);
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn test_reject_empty_square_and_wrong_side() {
    let mut game = started();
    assert_eq!(play(&mut game, "D3", "D4"), MoveResult::Invalid);
    assert_eq!(play(&mut game, "D7", "D5"), MoveResult::Invalid);
    assert_eq!(game.side_to_move(), Color::White, "rejections keep the turn");
}

#[test]
fn test_reject_unreachable_destination_leaves_board_untouched() {
    let mut game = started();
    let before = game.export_text();
    assert_eq!(play(&mut game, "B1", "B3"), MoveResult::Invalid);
    assert_eq!(play(&mut game, "D2", "D5"), MoveResult::Invalid);
    assert_eq!(game.export_text(), before);
}

#[test]
fn test_rejections_are_logged() {
    let mut game = started();
    let mut log = MoveLog::new();
    game.execute_move(sq("E4"), sq("E5"), &mut log);
    game.execute_move(sq("E7"), sq("E5"), &mut log);
    assert_eq!(log.len(), 2);
    assert!(log.entries()[0].contains("no piece on E4"));
    assert!(log.entries()[1].contains("WHITE is to move"));
}

#[test]
fn test_capture_removes_victim() {
    let mut game = game_from(QUEENS_VS_KING);
    assert!(game.piece_at(sq("D4")).is_some());
    let result = play(&mut game, "D5", "D4");
    assert!(result.is_accepted());
    let piece = game.piece_at(sq("D4")).unwrap();
    assert_eq!((piece.kind, piece.color), (PieceKind::Queen, Color::White));
    assert_eq!(game.board().pieces().len(), 6);
}

// =============================================================================
// Check filtering
// =============================================================================

#[test]
fn test_pinned_piece_has_no_legal_moves() {
    let mut game = game_from("WHITE,KE1,BE2,kA8,rE8");
    assert!(game.legal_destinations(sq("E2")).is_empty());
    assert_eq!(play(&mut game, "E2", "D3"), MoveResult::Invalid);
}

#[test]
fn test_king_cannot_step_into_attack() {
    let game = game_from("WHITE,KE1,kA8,rD8");
    let dests = game.legal_destinations(sq("E1"));
    assert!(!dests.contains(&sq("D1")));
    assert!(!dests.contains(&sq("D2")));
    assert!(dests.contains(&sq("F2")));
}

#[test]
fn test_check_must_be_answered() {
    // Rook gives check along the E file; only blocking or stepping aside works.
    let game = game_from("WHITE,KE1,NC3,kA8,rE8");
    assert!(game.is_in_check(Color::White));
    let knight = game.legal_destinations(sq("C3"));
    assert_eq!(knight, vec![sq("E4"), sq("E2")]);
}

#[test]
fn test_legal_destinations_are_never_self_check() {
    let game = game_from("WHITE,KE1,QE2,BF1,NG1,PF2,kE8,rE7,bB5,qH4");
    for piece in game.board().pieces().iter().filter(|p| p.color == Color::White) {
        for to in game.legal_destinations(piece.square) {
            let mut copy = game.clone();
            assert!(play(&mut copy, &piece.square.to_string(), &to.to_string()).is_accepted());
            assert!(!copy.is_in_check(Color::White), "{} to {to}", piece.square);
        }
    }
}

#[test]
fn test_missing_king_degrades_to_false() {
    let game = game_from("WHITE,QD1,kE8");
    assert!(!game.is_in_check(Color::White));
    assert!(!game.is_checkmate(Color::White));
    assert!(!game.is_draw(Color::White));
    assert!(!game.is_draw(Color::Black));
    assert_eq!(game.winner(), None);
}

// =============================================================================
// En passant
// =============================================================================

#[test]
fn test_en_passant_available_right_after_double_step() {
    let mut game = started();
    for (from, to) in [("E2", "E4"), ("A7", "A6"), ("E4", "E5"), ("D7", "D5")] {
        assert_eq!(play(&mut game, from, to), MoveResult::Valid);
    }
    assert_eq!(game.en_passant_pawn(), Some(sq("D5")));
    assert!(game.legal_destinations(sq("E5")).contains(&sq("D6")));

    assert_eq!(play(&mut game, "E5", "D6"), MoveResult::Valid);
    assert!(game.piece_at(sq("D5")).is_none(), "captured pawn is removed");
    assert_eq!(game.piece_at(sq("D6")).unwrap().color, Color::White);
    assert_eq!(game.en_passant_pawn(), None);
}

#[test]
fn test_en_passant_expires_after_one_move() {
    let mut game = started();
    for (from, to) in [
        ("E2", "E4"),
        ("A7", "A6"),
        ("E4", "E5"),
        ("D7", "D5"),
        ("H2", "H3"),
        ("A6", "A5"),
    ] {
        assert_eq!(play(&mut game, from, to), MoveResult::Valid);
    }
    assert!(!game.legal_destinations(sq("E5")).contains(&sq("D6")));
    assert_eq!(play(&mut game, "E5", "D6"), MoveResult::Invalid);
}

#[test]
fn test_en_passant_refused_when_it_exposes_king() {
    // Both pawns leave the fifth row, opening the rook's line to the king.
    let mut game = game_from("BLACK,KA5,PB5,pC7,rH5,kH8");
    assert_eq!(play(&mut game, "C7", "C5"), MoveResult::Valid);
    let dests = game.legal_destinations(sq("B5"));
    assert_eq!(dests, vec![sq("B6")]);
}

#[test]
fn test_single_step_does_not_set_marker() {
    let mut game = started();
    play(&mut game, "E2", "E3");
    assert_eq!(game.en_passant_pawn(), None);
    play(&mut game, "D7", "D5");
    assert_eq!(game.en_passant_pawn(), Some(sq("D5")));
    play(&mut game, "G1", "F3");
    assert_eq!(game.en_passant_pawn(), None);
}

// =============================================================================
// Castling
// =============================================================================

#[test]
fn test_castling_destinations_offered() {
    let game = game_from("WHITE,RA1*,KE1*,RH1*,kE8*");
    let dests = game.legal_destinations(sq("E1"));
    assert!(dests.contains(&sq("G1")));
    assert!(dests.contains(&sq("C1")));
}

#[test]
fn test_kingside_castling_moves_both_pieces() {
    let mut game = game_from("WHITE,RA1*,KE1*,RH1*,kE8*");
    assert_eq!(play(&mut game, "E1", "G1"), MoveResult::Valid);
    assert_eq!(game.export_text(), "BLACK,RA1*,KG1,RF1,kE8*");
}

#[test]
fn test_queenside_castling_moves_both_pieces() {
    let mut game = game_from("BLACK,KE1*,rA8*,kE8*,rH8*");
    assert_eq!(play(&mut game, "E8", "C8"), MoveResult::Valid);
    assert_eq!(game.export_text(), "WHITE,KE1*,rD8,kC8,rH8*");
}

#[test]
fn test_no_castling_through_attacked_square() {
    let game = game_from("WHITE,KE1*,RH1*,kA8,rF8");
    assert!(!game.legal_destinations(sq("E1")).contains(&sq("G1")));
}

#[test]
fn test_no_castling_out_of_check() {
    let game = game_from("WHITE,RA1*,KE1*,RH1*,kA8,rE7");
    let dests = game.legal_destinations(sq("E1"));
    assert!(!dests.contains(&sq("G1")));
    assert!(!dests.contains(&sq("C1")));
}

#[test]
fn test_no_castling_with_moved_rook_or_blocked_path() {
    let game = game_from("WHITE,RA1*,NB1,KE1*,RH1,kE8*");
    let dests = game.legal_destinations(sq("E1"));
    assert!(!dests.contains(&sq("G1")), "kingside rook has moved");
    assert!(!dests.contains(&sq("C1")), "B1 is occupied");
}

#[test]
fn test_king_move_forfeits_castling() {
    let mut game = game_from("WHITE,RA1*,KE1*,RH1*,kE8*");
    play(&mut game, "E1", "F1");
    play(&mut game, "E8", "E7");
    play(&mut game, "F1", "E1");
    play(&mut game, "E7", "E8");
    assert_eq!(game.export_text(), "WHITE,RA1*,KE1,RH1*,kE8");
    assert!(!game.legal_destinations(sq("E1")).contains(&sq("G1")));
}

// =============================================================================
// Checkmate and stalemate
// =============================================================================

#[test]
fn test_queens_mate_lone_king() {
    let game = game_from(QUEENS_VS_KING);
    assert!(game.is_checkmate(Color::Black));
    assert!(!game.is_checkmate(Color::White));
    assert_eq!(game.winner(), Some(Outcome::White));
}

#[test]
fn test_move_delivering_mate_reports_winner() {
    let mut game = game_from("WHITE,kA8,QB1,KC6");
    let mut log = MoveLog::new();
    let result = game.execute_move(sq("B1"), sq("B7"), &mut log);
    assert_eq!(result, MoveResult::Checkmate(Color::White));
    assert_eq!(log.last(), Some("Checkmate! BLACK loses."));
}

#[test]
fn test_move_delivering_stalemate_reports_draw() {
    let mut game = game_from("WHITE,kA8,QB1,KC7");
    assert_eq!(play(&mut game, "B1", "B6"), MoveResult::Draw);
    assert!(game.is_draw(Color::Black));
    assert!(!game.is_checkmate(Color::Black));
    assert_eq!(game.winner(), Some(Outcome::Draw));
}

#[test]
fn test_check_is_logged_once_per_onset() {
    let mut game = game_from("WHITE,KA1,RB2,kH8");
    let mut log = MoveLog::new();
    game.execute_move(sq("B2"), sq("H2"), &mut log);
    assert_eq!(log.last(), Some("BLACK is in check."));
    game.execute_move(sq("H8"), sq("G8"), &mut log);
    let checks = log.entries().iter().filter(|e| e.ends_with("is in check.")).count();
    assert_eq!(checks, 1);
}

// =============================================================================
// Promotion
// =============================================================================

#[test]
fn test_promotable_squares() {
    let game = game_from(QUEENS_VS_KING);
    assert!(!game.is_promotable(sq("D4")));
    assert!(game.is_promotable(sq("C8")));
    assert!(!game.is_promotable(sq("A2")));
    assert!(!game.is_promotable(sq("A8")), "black pawns promote on row 1");
}

#[test]
fn test_pawn_reaching_last_row_waits_for_promotion() {
    let mut game = game_from("WHITE,KA1,PB7,kH8");
    assert_eq!(play(&mut game, "B7", "B8"), MoveResult::ValidPromotion);
    assert!(game.is_promotable(sq("B8")));

    let mut log = MoveLog::new();
    let result = game.promote(sq("B8"), PieceKind::Queen, &mut log);
    assert_eq!(result, Ok(MoveResult::Valid));
    assert_eq!(game.export_text(), "BLACK,KA1,QB8,kH8");
    assert!(game.is_in_check(Color::Black));
    assert!(log.entries().iter().any(|e| e == "BLACK is in check."));
}

#[test]
fn test_promoted_rook_cannot_castle() {
    let mut game = game_from("WHITE,KE1*,PH7,kA5");
    assert_eq!(play(&mut game, "H7", "H8"), MoveResult::ValidPromotion);
    game.promote(sq("H8"), PieceKind::Rook, &mut NullLog).unwrap();
    let rook = game.piece_at(sq("H8")).unwrap();
    assert!(rook.has_moved);
    assert_eq!(rook.token(), "RH8");
}

#[test]
fn test_promotion_rejections() {
    let mut game = game_from("BLACK,KA1,pB2,PC7,kH8");
    assert_eq!(
        game.promote(sq("C7"), PieceKind::Queen, &mut NullLog),
        Err(RuleError::NotPromotable(sq("C7")))
    );
    assert_eq!(play(&mut game, "B2", "B1"), MoveResult::ValidPromotion);
    assert_eq!(
        game.promote(sq("B1"), PieceKind::King, &mut NullLog),
        Err(RuleError::PromotionTarget(PieceKind::King))
    );
    assert_eq!(
        game.promote(sq("B1"), PieceKind::Knight, &mut NullLog),
        Ok(MoveResult::Valid)
    );
    assert_eq!(game.piece_kind_name(sq("B1")), Some("knight"));
}

#[test]
fn test_promotion_can_deliver_mate() {
    // Back-rank mate: the black king is walled in by its own pawns.
    let mut game = game_from("WHITE,KA1,PB7,kH8,pG7,pH7");
    assert_eq!(play(&mut game, "B7", "B8"), MoveResult::ValidPromotion);
    assert_eq!(
        game.promote(sq("B8"), PieceKind::Queen, &mut NullLog),
        Ok(MoveResult::Checkmate(Color::White))
    );
}

// =============================================================================
// Import / reset
// =============================================================================

#[test]
fn test_failed_import_keeps_game() {
    let mut game = started();
    let before = game.clone();
    let mut log = MoveLog::new();
    assert!(game.import_text("PURPLE,KE1", STANDARD_SIZE, &mut log).is_err());
    assert_eq!(game, before);
    assert!(log.last().unwrap().starts_with("Import failed"));
}

#[test]
fn test_reset_keeps_player_names() {
    let mut game = started();
    game.set_player_name(Color::White, "Alice");
    game.reset(6);
    assert_eq!(game.board_size(), 6);
    assert!(game.board().pieces().is_empty());
    assert_eq!(game.player_name(Color::White), "Alice");
}
