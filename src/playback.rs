//! Seeded random playback: both sides pick uniformly among their safe moves.
//!
//! This drives the engine purely through its public surface (legal move
//! lists, history moves, check queries), which makes it a handy end-to-end
//! exercise as well as a demo.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::chess::piece::PieceKind;
use crate::core::color::Color;
use crate::core::position::Position;
use crate::error::{ChessError, ChessResult};
use crate::game::Game;

#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    pub seed: u64,
    /// Stop after this many plies even if the game is still going.
    pub max_plies: usize,
    /// Start from the standard position (otherwise continue from the game's
    /// current board and history).
    pub setup: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_plies: 300,
            setup: true,
        }
    }
}

impl PlaybackConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_plies(mut self, max_plies: usize) -> Self {
        self.max_plies = max_plies;
        self
    }

    pub fn with_setup(mut self, setup: bool) -> Self {
        self.setup = setup;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Checkmate { winner: Color },
    /// The side to move has no safe move but is not in check.
    NoMoves { color: Color },
    PlyLimit,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Checkmate { winner: Color::White } => "white_win",
            Outcome::Checkmate { winner: Color::Black } => "black_win",
            Outcome::NoMoves { .. } => "no_moves",
            Outcome::PlyLimit => "ply_limit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlyRecord {
    pub ply: usize,
    pub color: Color,
    pub piece: PieceKind,
    pub from: Position,
    pub to: Position,
    pub captured: Option<PieceKind>,
    pub promoted: bool,
    /// The move left the opponent in check.
    pub check: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackReport {
    pub seed: u64,
    pub plies: Vec<PlyRecord>,
    pub outcome: Outcome,
}

/// Plays random safe moves until checkmate, a side without moves, or the ply
/// limit. Every ply goes through `Game::make_move`, so the history can be
/// rewound afterwards.
pub fn play_random(game: &mut Game, config: &PlaybackConfig) -> ChessResult<PlaybackReport> {
    if config.setup {
        game.reset(true);
        game.init();
    } else if game.cursor().is_none() {
        game.init();
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut plies: Vec<PlyRecord> = Vec::new();

    let outcome = loop {
        if plies.len() >= config.max_plies {
            break Outcome::PlyLimit;
        }

        let color = game.turn();
        let Some(moves) = game.board().legal_moves(color) else {
            break Outcome::Checkmate {
                winner: color.other(),
            };
        };
        let Some(&mv) = moves.choose(&mut rng) else {
            break Outcome::NoMoves { color };
        };

        let board = game.board();
        let piece = board
            .piece(mv.piece)
            .ok_or(ChessError::MissingPiece(mv.piece))?
            .kind();
        let captured = mv.captured.and_then(|id| board.piece(id)).map(|p| p.kind());

        game.make_move(&mv)?;

        // A promoted pawn is replaced, so its id no longer resolves.
        let promoted = game.board().piece(mv.piece).is_none();
        let check = game.board().is_in_check(color.other());
        debug!("ply {}: {color} {piece} {mv}", plies.len() + 1);

        plies.push(PlyRecord {
            ply: plies.len() + 1,
            color,
            piece,
            from: mv.from,
            to: mv.to,
            captured,
            promoted,
            check,
        });
    };

    info!(
        "playback seed={} finished after {} plies: {}",
        config.seed,
        plies.len(),
        outcome.label()
    );

    Ok(PlaybackReport {
        seed: config.seed,
        plies,
        outcome,
    })
}
