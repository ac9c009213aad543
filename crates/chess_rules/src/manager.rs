//! Front door for a session: a [`Game`], its undo/redo [`History`], the
//! configuration and the log sink.
//!
//! Every command reports what it changed as a list of [`GameEvent`]s so a
//! front end can refresh exactly what it needs without subscribing to
//! anything.

use std::path::Path;

use tracing::debug;

use crate::config::GameConfig;
use crate::error::{ConfigError, NotationError, RuleError, SnapshotError};
use crate::game::Game;
use crate::history::History;
use crate::log::{LogSink, MoveLog};
use crate::piece::Piece;
use crate::snapshot;
use crate::types::*;

/// Something a command changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    BoardChanged,
    /// Carries the new side to move.
    TurnChanged(Color),
    /// Carries the side now in check, if any.
    CheckChanged(Option<Color>),
}

/// The parts of a game a front end displays.
struct Observed {
    text: String,
    side: Color,
    check: Option<Color>,
}

impl Observed {
    fn of(game: &Game) -> Self {
        Self {
            text: game.board_text(),
            side: game.side_to_move(),
            check: game.checked_side(),
        }
    }

    fn events_to(&self, game: &Game) -> Vec<GameEvent> {
        let after = Observed::of(game);
        let mut events = Vec::new();
        if after.text != self.text {
            events.push(GameEvent::BoardChanged);
        }
        if after.side != self.side {
            events.push(GameEvent::TurnChanged(after.side));
        }
        if after.check != self.check {
            events.push(GameEvent::CheckChanged(after.check));
        }
        events
    }
}

pub struct GameManager<L: LogSink = MoveLog> {
    game: Game,
    history: History,
    config: GameConfig,
    log: L,
}

impl Default for GameManager {
    fn default() -> Self {
        Self::with_valid_config(GameConfig::default(), MoveLog::new())
    }
}

impl<L: LogSink> GameManager<L> {
    /// Empty board of the configured size, players named from the config.
    /// Fails when the config names an unsupported board size.
    pub fn new(config: GameConfig, log: L) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config, log))
    }

    fn with_valid_config(config: GameConfig, log: L) -> Self {
        let mut game = Game::default();
        game.reset(config.board_size);
        game.set_player_name(Color::White, config.player_white.clone());
        game.set_player_name(Color::Black, config.player_black.clone());
        Self {
            game,
            history: History::new(),
            config,
            log,
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.game.piece_at(sq)
    }

    pub fn piece_kind_name(&self, sq: Square) -> Option<&'static str> {
        self.game.piece_kind_name(sq)
    }

    pub fn legal_destinations(&self, sq: Square) -> Vec<Square> {
        self.game.legal_destinations(sq)
    }

    pub fn board_size(&self) -> u8 {
        self.game.board_size()
    }

    pub fn side_to_move(&self) -> Color {
        self.game.side_to_move()
    }

    pub fn is_in_check(&self, side: Color) -> bool {
        self.game.is_in_check(side)
    }

    pub fn is_any_side_in_check(&self) -> bool {
        self.game.checked_side().is_some()
    }

    pub fn winner(&self) -> Option<Outcome> {
        self.game.winner()
    }

    pub fn is_promotable(&self, sq: Square) -> bool {
        self.game.is_promotable(sq)
    }

    pub fn board_text(&self) -> String {
        self.game.board_text()
    }

    pub fn player_name(&self, side: Color) -> &str {
        self.game.player_name(side)
    }

    pub fn has_undo(&self) -> bool {
        self.history.has_undo()
    }

    pub fn has_redo(&self) -> bool {
        self.history.has_redo()
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    pub fn set_player_name(&mut self, side: Color, name: impl Into<String>) {
        self.game.set_player_name(side, name);
    }

    /// Standard setup; clears history.
    pub fn start(&mut self) -> Vec<GameEvent> {
        let before = Observed::of(&self.game);
        self.game.start(&mut self.log);
        self.history.reset();
        before.events_to(&self.game)
    }

    /// Empty board of the configured size; clears history.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        let before = Observed::of(&self.game);
        self.game.reset(self.config.board_size);
        self.history.reset();
        self.log.append("Board cleared.".to_string());
        before.events_to(&self.game)
    }

    /// Snapshot, delegate, and drop the snapshot again if the engine
    /// rejected the move.
    pub fn execute_move(&mut self, from: Square, to: Square) -> (MoveResult, Vec<GameEvent>) {
        let before = Observed::of(&self.game);
        self.history.save(&self.game);
        let result = self.game.execute_move(from, to, &mut self.log);
        if result == MoveResult::Invalid {
            self.history.discard_last_save();
        } else {
            self.history.commit();
        }
        debug!(%from, %to, ?result, "execute_move");
        (result, before.events_to(&self.game))
    }

    /// Promotion completes the pawn move it follows, so it shares that
    /// move's snapshot: one undo reverts both.
    pub fn promote(
        &mut self,
        sq: Square,
        kind: PieceKind,
    ) -> Result<(MoveResult, Vec<GameEvent>), RuleError> {
        let before = Observed::of(&self.game);
        let result = self.game.promote(sq, kind, &mut self.log)?;
        Ok((result, before.events_to(&self.game)))
    }

    /// Replace the game with `text` on a board of the configured size.
    /// History is cleared on success; on error nothing changes.
    pub fn import_text(&mut self, text: &str) -> Result<Vec<GameEvent>, NotationError> {
        let before = Observed::of(&self.game);
        self.game
            .import_text(text, self.config.board_size, &mut self.log)?;
        self.history.reset();
        Ok(before.events_to(&self.game))
    }

    pub fn export_text(&mut self) -> String {
        self.log.append("Game exported.".to_string());
        self.game.export_text()
    }

    pub fn undo(&mut self) -> Vec<GameEvent> {
        let before = Observed::of(&self.game);
        if !self.history.undo(&mut self.game) {
            return Vec::new();
        }
        self.log.append("Move undone.".to_string());
        before.events_to(&self.game)
    }

    pub fn redo(&mut self) -> Vec<GameEvent> {
        let before = Observed::of(&self.game);
        if !self.history.redo(&mut self.game) {
            return Vec::new();
        }
        self.log.append("Move redone.".to_string());
        before.events_to(&self.game)
    }

    pub fn save(&mut self, path: &Path) -> Result<(), SnapshotError> {
        match snapshot::save(path, &self.game) {
            Ok(()) => {
                self.log
                    .append(format!("Game saved to {}.", path.display()));
                Ok(())
            }
            Err(e) => {
                self.log.append(format!("Save failed: {e}."));
                Err(e)
            }
        }
    }

    /// Replace the game with a saved snapshot and clear history. On error
    /// the current game is kept.
    pub fn load(&mut self, path: &Path) -> Result<Vec<GameEvent>, SnapshotError> {
        let before = Observed::of(&self.game);
        match snapshot::load(path) {
            Ok(game) => {
                self.game = game;
                self.history.reset();
                self.log
                    .append(format!("Game loaded from {}.", path.display()));
                Ok(before.events_to(&self.game))
            }
            Err(e) => {
                self.log.append(format!("Load failed: {e}."));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod manager_tests;
