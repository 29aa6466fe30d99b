//! Opening book of short, optionally style-tagged lines.
//!
//! Lines are matched against the played from/to prefix of the game. The
//! embedded set ships with the crate as JSON; an external payload in the
//! same format can be merged in, and a malformed one is logged and ignored.
//! Every candidate is checked with a shallow search before it is played.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::errors::ChessResult;
use crate::game_state::chess_types::{Color, PlayStyle};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::ChessMove;
use crate::search::alpha_beta::{SearchContext, INFINITY};
use crate::utils::algebraic::algebraic_to_square;

const EMBEDDED_LINES: &str = include_str!("data/opening_lines.json");

/// Depth of the sanity search run on each candidate.
pub const BOOK_VALIDATION_DEPTH: u8 = 2;
/// Worst evaluation, from the book side's view, a candidate may lead to.
pub const BOOK_SCORE_FLOOR: i32 = -150;
const STYLE_MATCH_BONUS: u32 = 1_000;

#[derive(Debug, Deserialize)]
struct RawLineMove {
    from: String,
    to: String,
}

#[derive(Debug, Deserialize)]
struct RawLine {
    moves: Vec<RawLineMove>,
    #[serde(default)]
    side: Option<Color>,
    #[serde(default)]
    style: Option<PlayStyle>,
    #[serde(default = "default_weight")]
    weight: u32,
}

fn default_weight() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookLine {
    pub moves: Vec<ChessMove>,
    /// Colour the line is prepared for; `None` serves both.
    pub side: Option<Color>,
    /// Style the line belongs to; `None` suits every style.
    pub style: Option<PlayStyle>,
    pub weight: u32,
}

impl BookLine {
    fn next_after(&self, played: &[ChessMove]) -> Option<ChessMove> {
        if played.len() >= self.moves.len() {
            return None;
        }
        self.moves
            .iter()
            .zip(played)
            .all(|(line, game)| line.from == game.from && line.to == game.to)
            .then(|| self.moves[played.len()])
    }

    /// Weight for a computer playing `side` in `style`, or `None` when ineligible.
    fn weight_for(&self, side: Color, style: PlayStyle) -> Option<u32> {
        if self.side.is_some_and(|s| s != side) {
            return None;
        }
        match self.style {
            Some(s) if s != style => None,
            Some(_) => Some(self.weight + STYLE_MATCH_BONUS),
            None => Some(self.weight),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    lines: Vec<BookLine>,
}

impl OpeningBook {
    /// The lines bundled with the crate.
    pub fn embedded() -> Self {
        match Self::parse_lines(EMBEDDED_LINES) {
            Ok(lines) => Self { lines },
            Err(err) => {
                warn!(%err, "embedded opening lines failed to parse");
                Self::default()
            }
        }
    }

    pub fn lines(&self) -> &[BookLine] {
        &self.lines
    }

    pub fn parse_lines(json: &str) -> ChessResult<Vec<BookLine>> {
        let raw: Vec<RawLine> = serde_json::from_str(json)?;
        raw.into_iter()
            .map(|line| -> ChessResult<BookLine> {
                let moves = line
                    .moves
                    .iter()
                    .map(|m| -> ChessResult<ChessMove> {
                        Ok(ChessMove::new(
                            algebraic_to_square(&m.from)?,
                            algebraic_to_square(&m.to)?,
                        ))
                    })
                    .collect::<ChessResult<Vec<_>>>()?;
                Ok(BookLine {
                    moves,
                    side: line.side,
                    style: line.style,
                    weight: line.weight,
                })
            })
            .collect()
    }

    /// Merge externally supplied lines. Returns how many were added; a
    /// malformed payload adds nothing.
    pub fn augment_from_json(&mut self, json: &str) -> usize {
        match Self::parse_lines(json) {
            Ok(lines) => {
                let added = lines.len();
                self.lines.extend(lines);
                debug!(added, total = self.lines.len(), "opening lines merged");
                added
            }
            Err(err) => {
                warn!(%err, "ignoring malformed opening line payload");
                0
            }
        }
    }

    pub fn augment_from_path(&mut self, path: impl AsRef<Path>) -> usize {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => self.augment_from_json(&json),
            Err(err) => {
                warn!(path = %path.display(), %err, "opening line file unreadable");
                0
            }
        }
    }

    /// Book replies for the computer's side, highest weight first.
    pub fn candidates(&self, state: &GameState) -> Vec<(ChessMove, u32)> {
        let played: Vec<ChessMove> = state
            .move_history
            .iter()
            .map(|record| ChessMove::new(record.from(), record.to()))
            .collect();
        let to_move = if played.len() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        };
        let settings = state.ai_settings;
        if to_move != settings.ai_plays {
            return Vec::new();
        }

        let mut best: HashMap<ChessMove, (u32, usize)> = HashMap::new();
        for (order, line) in self.lines.iter().enumerate() {
            let (Some(mv), Some(weight)) = (
                line.next_after(&played),
                line.weight_for(settings.ai_plays, settings.style),
            ) else {
                continue;
            };
            let entry = best.entry(mv).or_insert((weight, order));
            if weight > entry.0 {
                *entry = (weight, entry.1);
            }
        }

        let mut ranked: Vec<(ChessMove, u32, usize)> =
            best.into_iter().map(|(mv, (w, order))| (mv, w, order)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked.into_iter().map(|(mv, w, _)| (mv, w)).collect()
    }

    /// First candidate that is legal and survives a shallow search.
    pub fn book_move(&self, state: &GameState, context: &mut SearchContext) -> Option<ChessMove> {
        let position = state.position();
        let legal = legal_moves(&position);

        for (mv, weight) in self.candidates(state) {
            if !legal.contains(&mv) {
                trace!(%mv, "book candidate is not legal here");
                continue;
            }
            let Some((next, _)) = position.apply(mv) else {
                continue;
            };
            let reply = context.search(&next, BOOK_VALIDATION_DEPTH, -INFINITY, INFINITY, 1);
            let score = -reply.score;
            if score >= BOOK_SCORE_FLOOR {
                debug!(%mv, weight, score, "book move");
                return Some(mv);
            }
            trace!(%mv, score, "book candidate fails validation");
        }
        debug!(plies = state.move_history.len(), "out of book");
        None
    }
}
