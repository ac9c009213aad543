//! Line-oriented driver for the rules engine.
//!
//! ```text
//! chess_console [config.toml]
//! ```
//!
//! Reads one command per line from stdin (`new`, `move E2 E4`, `promote E8 Q`,
//! `undo`, `export`, ...; `help` lists them) and prints what changed.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chess_rules::{
    Color, GameConfig, GameEvent, GameManager, MoveLog, MoveResult, Outcome, PieceKind, Square,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
commands:
  new                  standard starting position
  reset                empty board of the configured size
  move <from> <to>     e.g. move E2 E4
  promote <sq> <kind>  e.g. promote E8 Q
  moves <sq>           legal destinations of the piece on <sq>
  undo | redo
  export               print the game as text
  import <text>        e.g. import WHITE,KE1*,kE8*
  save <path> | load <path>
  board | status | help | quit";

fn load_config(arg: Option<String>) -> Result<GameConfig> {
    let Some(path) = arg.map(PathBuf::from) else {
        return Ok(GameConfig::default());
    };
    if !path.exists() {
        warn!(path = %path.display(), "config file not found, using defaults");
        return Ok(GameConfig::default());
    }
    GameConfig::load(&path).with_context(|| format!("loading config {}", path.display()))
}

fn square_arg(parts: &[&str], idx: usize) -> Result<Square> {
    let raw = parts.get(idx).context("missing square")?;
    Square::parse(raw).with_context(|| format!("'{raw}' is not a square"))
}

fn describe_event(event: GameEvent) -> String {
    match event {
        GameEvent::BoardChanged => "board changed".to_string(),
        GameEvent::TurnChanged(side) => format!("{side} to move"),
        GameEvent::CheckChanged(Some(side)) => format!("{side} in check"),
        GameEvent::CheckChanged(None) => "no check".to_string(),
    }
}

fn describe_result(result: MoveResult) -> &'static str {
    match result {
        MoveResult::Invalid => "invalid",
        MoveResult::Valid => "ok",
        MoveResult::ValidPromotion => "ok, choose a promotion",
        MoveResult::Draw => "draw",
        MoveResult::Checkmate(Color::White) => "checkmate, white wins",
        MoveResult::Checkmate(Color::Black) => "checkmate, black wins",
    }
}

fn render_board(manager: &GameManager) -> String {
    let size = manager.board_size();
    let mut out = String::new();
    for row in (1..=size).rev() {
        out.push_str(&format!("{row} "));
        for col in 0..size {
            let c = manager
                .piece_at(Square::new(col, row))
                .map_or('.', |p| p.letter());
            out.push(c);
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str("  ");
    for col in 0..size {
        out.push(Square::new(col, 1).column_letter());
        out.push(' ');
    }
    out
}

fn render_status(manager: &GameManager) -> String {
    let side = manager.side_to_move();
    let mut line = format!("{side} ({}) to move", manager.player_name(side));
    if manager.is_in_check(side) {
        line.push_str(", in check");
    }
    match manager.winner() {
        Some(Outcome::Draw) => line.push_str("; game drawn"),
        Some(Outcome::White) => line.push_str("; white has won"),
        Some(Outcome::Black) => line.push_str("; black has won"),
        None => {}
    }
    line
}

/// Run one command line. Returns `false` when the session should end.
fn run_command(manager: &mut GameManager, line: &str, out: &mut impl Write) -> Result<bool> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&cmd) = parts.first() else {
        return Ok(true);
    };

    let events = match cmd {
        "quit" | "exit" => return Ok(false),
        "help" => {
            writeln!(out, "{HELP}")?;
            Vec::new()
        }
        "new" => manager.start(),
        "reset" => manager.reset(),
        "move" => {
            let (from, to) = (square_arg(&parts, 1)?, square_arg(&parts, 2)?);
            let (result, events) = manager.execute_move(from, to);
            writeln!(out, "{}", describe_result(result))?;
            events
        }
        "promote" => {
            let sq = square_arg(&parts, 1)?;
            let raw = parts.get(2).context("missing piece kind")?;
            let Ok(kind) = raw.parse::<PieceKind>() else {
                bail!("'{raw}' is not a piece kind");
            };
            let (result, events) = manager.promote(sq, kind)?;
            writeln!(out, "{}", describe_result(result))?;
            events
        }
        "moves" => {
            let sq = square_arg(&parts, 1)?;
            let dests: Vec<String> = manager
                .legal_destinations(sq)
                .iter()
                .map(Square::to_string)
                .collect();
            writeln!(out, "{}", dests.join(" "))?;
            Vec::new()
        }
        "undo" => manager.undo(),
        "redo" => manager.redo(),
        "export" => {
            writeln!(out, "{}", manager.export_text())?;
            Vec::new()
        }
        "import" => {
            let text = line.trim_start()["import".len()..].trim();
            manager.import_text(text)?
        }
        "save" => {
            let path = parts.get(1).context("missing path")?;
            manager.save(Path::new(path))?;
            Vec::new()
        }
        "load" => {
            let path = parts.get(1).context("missing path")?;
            manager.load(Path::new(path))?
        }
        "board" => {
            writeln!(out, "{}", render_board(manager))?;
            Vec::new()
        }
        "status" => {
            writeln!(out, "{}", render_status(manager))?;
            Vec::new()
        }
        other => bail!("unknown command '{other}', try 'help'"),
    };

    for event in events {
        writeln!(out, "  [{}]", describe_event(event))?;
    }
    Ok(true)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = load_config(std::env::args().nth(1))?;
    debug!(?config, "configuration loaded");
    let echo_log = config.echo_log;
    let mut manager = GameManager::new(config, MoveLog::new())?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut echoed = 0;

    for line in stdin.lock().lines() {
        let line = line?;
        let keep_going = match run_command(&mut manager, &line, &mut stdout) {
            Ok(keep_going) => keep_going,
            Err(e) => {
                writeln!(stdout, "error: {e:#}")?;
                true
            }
        };

        if echo_log {
            for entry in &manager.log().entries()[echoed..] {
                writeln!(stdout, "log: {entry}")?;
            }
        }
        echoed = manager.log().len();
        stdout.flush()?;

        if !keep_going {
            break;
        }
    }
    Ok(())
}
