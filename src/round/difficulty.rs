// Difficulty presets for the built-in game modes.
// The original game shipped three script generations with diverging bounds
// and units; these constants are the unified configuration they collapse to.
use super::{ConfigError, Difficulty, RoundConfig, WordBank};
use crate::{NORMAL_WORDS, WIZARD_WORDS};

pub const ROPE_MIN: f64 = 0.0;
pub const ROPE_MAX: f64 = 650.0;
pub const ROPE_START: f64 = 325.0;

// Speed and pulls are identical across difficulties; only the word bank
// changes. Six words are visible per line (one in play, five upcoming).
pub const TICK_PERIOD_MS: u32 = 400;
pub const OPPONENT_PULL: f64 = 15.0;
pub const PLAYER_PULL: f64 = 20.0;
pub const LINE_LENGTH: usize = 6;

/// Resolve a preset by name: `"easy"` plays everyday words, `"hard"` the
/// wizard bank.
pub fn preset(name: &str) -> Result<RoundConfig, ConfigError> {
    let words = match name {
        "easy" => NORMAL_WORDS,
        "hard" => WIZARD_WORDS,
        other => return Err(ConfigError::UnknownDifficulty(other.to_string())),
    };
    Ok(RoundConfig {
        bank: WordBank::new(words, LINE_LENGTH)?,
        difficulty: Difficulty {
            opponent_pull: OPPONENT_PULL,
            tick_period_ms: TICK_PERIOD_MS,
        },
        player_pull: PLAYER_PULL,
        rope_min: ROPE_MIN,
        rope_max: ROPE_MAX,
        rope_start: ROPE_START,
    })
}
