//! Per-move time budgeting for the computer opponent.
//!
//! The configured move time is scaled by game phase (shorter in the
//! opening, longer when in check) and by play style, then handed to the
//! iterative-deepening driver as a `SearchConfig`.

use crate::game_state::chess_types::PlayStyle;
use crate::game_state::game_state::{AiSettings, GameState};
use crate::search::iterative_deepening::SearchConfig;

/// Plies played before the opening discount stops applying.
pub const OPENING_PLIES: usize = 16;

const OPENING_FACTOR: f64 = 0.6;
const IN_CHECK_FACTOR: f64 = 1.5;

const fn style_factor(style: PlayStyle) -> f64 {
    match style {
        PlayStyle::Aggressive => 0.9,
        PlayStyle::Positional => 1.2,
        PlayStyle::Balanced => 1.0,
    }
}

pub fn move_time_budget_ms(game_state: &GameState, settings: &AiSettings) -> u64 {
    let mut budget = settings.move_time_ms as f64;
    if game_state.move_history.len() < OPENING_PLIES {
        budget *= OPENING_FACTOR;
    }
    if game_state.is_in_check {
        budget *= IN_CHECK_FACTOR;
    }
    budget *= style_factor(settings.style);
    (budget.round() as u64).max(1)
}

pub fn search_config_for(game_state: &GameState, settings: &AiSettings) -> SearchConfig {
    SearchConfig {
        max_depth: settings.depth.max(1),
        move_time_ms: move_time_budget_ms(game_state, settings),
        style: settings.style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn opening_moves_get_a_reduced_budget() {
        let state = GameState::new_game();
        let settings = AiSettings {
            move_time_ms: 1_000,
            ..AiSettings::default()
        };
        assert_eq!(move_time_budget_ms(&state, &settings), 600);
    }

    #[test]
    fn check_and_style_scale_the_budget() {
        let state = parse_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").expect("fixture FEN should parse");
        assert!(state.is_in_check);
        let positional = AiSettings {
            move_time_ms: 1_000,
            style: PlayStyle::Positional,
            ..AiSettings::default()
        };
        // Opening discount, check extension, positional style.
        assert_eq!(move_time_budget_ms(&state, &positional), 1_080);
    }

    #[test]
    fn config_never_asks_for_depth_zero() {
        let settings = AiSettings {
            depth: 0,
            move_time_ms: 0,
            ..AiSettings::default()
        };
        let config = search_config_for(&GameState::new_game(), &settings);
        assert_eq!(config.max_depth, 1);
        assert!(config.move_time_ms >= 1);
    }
}
