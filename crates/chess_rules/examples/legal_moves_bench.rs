//! Legal move generation benchmark for profiling with cargo-flamegraph.
//!
//! Runs `legal_destinations` for every piece of the side to move, many times
//! over, on positions covering the special-move paths.
//!
//! Usage:
//!   cargo flamegraph --example legal_moves_bench -p chess_rules

use chess_rules::{Game, NullLog, STANDARD_SIZE};
use std::time::Instant;

/// Positions in the partial-game text format. `None` means the standard
/// starting position.
const TEST_POSITIONS: &[(&str, Option<&str>)] = &[
    ("Start", None),
    (
        "Castling ready",
        Some("WHITE,RA1*,KE1*,RH1*,PA2,PB2,PC2,PF2,PG2,PH2,rA8*,kE8*,rH8*,pA7,pB7,pG7,pH7"),
    ),
    ("Queens vs king", Some("BLACK,pD4,QD5,PC8,pA8,kH5*,QH1,QG1")),
    (
        "Rook endgame",
        Some("WHITE,pC7,pD6,KA5,PB5,rH5,RB4,pF4,kH4,PE2,PG2"),
    ),
    ("Pinned pieces", Some("WHITE,KE1,BE2,NC3,kA8,rE8,bB4")),
];

const ITERATIONS: usize = 2_000;

fn load(text: Option<&str>) -> Game {
    let mut game = Game::default();
    match text {
        None => game.start(&mut NullLog),
        Some(text) => game
            .import_text(text, STANDARD_SIZE, &mut NullLog)
            .unwrap_or_else(|e| panic!("bad bench position '{text}': {e}")),
    }
    game
}

fn count_moves(game: &Game) -> usize {
    let side = game.side_to_move();
    game.board()
        .pieces()
        .iter()
        .filter(|p| p.color == side)
        .map(|p| game.legal_destinations(p.square).len())
        .sum()
}

fn main() {
    println!("=== Legal Move Benchmark ===");
    println!("Iterations per position: {ITERATIONS}");
    println!();

    let mut total_moves = 0usize;
    let mut total_time = std::time::Duration::ZERO;

    for (name, text) in TEST_POSITIONS {
        let game = load(*text);

        print!("{name:.<20}");

        let start = Instant::now();
        let mut moves_generated = 0usize;
        for _ in 0..ITERATIONS {
            moves_generated += count_moves(&game);
        }

        let elapsed = start.elapsed();
        total_moves += moves_generated;
        total_time += elapsed;

        let moves_per_pos = moves_generated as f64 / ITERATIONS as f64;
        let pps = if elapsed.as_secs_f64() > 0.0 {
            ITERATIONS as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        println!(" {moves_per_pos:>5.1} moves/pos, {pps:>10.0} pos/sec ({elapsed:>8.3?})");
    }

    println!();
    println!("{:=<70}", "");
    println!("TOTAL: {total_moves} moves in {total_time:.3?}");
}
