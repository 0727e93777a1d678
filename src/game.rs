use log::debug;

use crate::board::Board;
use crate::chess::moves::Move;
use crate::core::color::Color;
use crate::error::{ChessError, ChessResult};

/// A live board plus a linear, rewindable history of board snapshots.
///
/// `history[cursor]` always equals the live board. Rewinding with `previous`
/// and then playing a new move throws away every snapshot after the cursor.
#[derive(Debug, Clone, Default)]
pub struct Game {
    board: Board,
    history: Vec<Board>,
    cursor: Option<usize>,
}

impl Game {
    /// An empty board with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// A game on the standard starting position, already `init`ed.
    pub fn standard() -> Self {
        let mut game = Self::new();
        game.reset(true);
        game.init();
        game
    }

    /// Clears the board (setting up the start position when `setup`) and
    /// forgets all history. Call `init` before playing.
    pub fn reset(&mut self, setup: bool) {
        if setup {
            self.board.set_board();
        } else {
            self.board.clear();
        }
        self.history.clear();
        self.cursor = None;
    }

    /// Snapshots the current board as the first history entry.
    pub fn init(&mut self) {
        self.history = vec![self.board.clone()];
        self.cursor = Some(0);
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct access for setting up positions before `init`. Changes made here
    /// are not recorded until the next history move.
    #[inline]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[inline]
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    #[inline]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Side to move: White on even cursor positions.
    pub fn turn(&self) -> Color {
        match self.cursor {
            Some(i) if i % 2 == 1 => Color::Black,
            _ => Color::White,
        }
    }

    /// Plays `mv` on the live board and records the result.
    pub fn make_move(&mut self, mv: &Move) -> ChessResult<()> {
        self.play_with(|board| board.make_move(mv))
    }

    /// Applies an arbitrary board mutation as one history step.
    ///
    /// The mutation runs on a copy of the live board. If it fails, the copy is
    /// dropped and nothing changes, even when the closure had already touched
    /// the board. Otherwise the copy becomes the live board, any abandoned
    /// future is truncated, end-of-turn upkeep (promotion) runs, and a
    /// snapshot is appended.
    pub fn play_with<T>(
        &mut self,
        mutate: impl FnOnce(&mut Board) -> ChessResult<T>,
    ) -> ChessResult<T> {
        let cursor = self.cursor.ok_or(ChessError::HistoryNotInitialized)?;
        let mut next = self.board.clone();
        let out = mutate(&mut next)?;
        self.board = next;

        if cursor + 1 < self.history.len() {
            debug!(
                "discarding {} snapshot(s) after cursor {cursor}",
                self.history.len() - cursor - 1
            );
            self.history.truncate(cursor + 1);
        }

        self.board.maintain();
        self.history.push(self.board.clone());
        self.cursor = Some(cursor + 1);
        Ok(out)
    }

    /// Steps forward through existing history. `None` at the newest snapshot.
    pub fn next(&mut self) -> Option<&Board> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.history.len() {
            return None;
        }
        self.restore(cursor + 1)
    }

    /// Steps back through history. `None` at the first snapshot.
    pub fn previous(&mut self) -> Option<&Board> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.restore(cursor - 1)
    }

    /// Drops the newest snapshot and restores the one before it. `None` when
    /// only one snapshot is left.
    pub fn pop(&mut self) -> Option<&Board> {
        if self.history.len() <= 1 {
            return None;
        }
        self.history.pop();
        self.restore(self.history.len() - 1)
    }

    fn restore(&mut self, index: usize) -> Option<&Board> {
        self.board = self.history.get(index)?.clone();
        self.cursor = Some(index);
        Some(&self.board)
    }
}
