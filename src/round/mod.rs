//! Round state machine: word lines, the typing cursor and the rope position.
//!
//! Everything in this module is pure Rust with no browser dependency, so it
//! runs under native `cargo test`. The wasm `session` layer owns one
//! `RoundController` per game session and forwards keystrokes and opponent
//! ticks into it; the host page re-renders from `Snapshot` each frame.
//!
//! Event model: the controller is single-threaded and processes each event to
//! completion. When a pull reaches a rope end the `game_over` latch is set and
//! the opponent timer handle is cancelled inside that same event, so a late
//! interval tick can never move a finished round.

use std::fmt;

pub mod difficulty;

// --- RNG ---------------------------------------------------------------------

/// Small linear congruential generator for word picks. Word selection only
/// needs to look random, not be unpredictable; hosts seed it from
/// `performance.now()` or `getrandom`, tests from a fixed value.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform index into `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize {
        // Low bits of an LCG cycle quickly; use the upper half.
        ((self.next() >> 16) as usize) % len
    }

    /// Split off an independent stream, e.g. for a fresh `LineBuffer`.
    fn fork(&mut self) -> Lcg {
        Lcg::new(self.next() ^ 0x9e37_79b9_7f4a_7c15)
    }
}

// --- Errors ------------------------------------------------------------------

/// Invalid setup parameters. Fatal at construction time, never recoverable.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyWordBank,
    EmptyWord,
    ZeroLineLength,
    InvalidBounds { min: f64, max: f64 },
    StartOutOfRange { start: f64, min: f64, max: f64 },
    NonPositivePull { pull: f64 },
    UnknownDifficulty(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyWordBank => write!(f, "word bank is empty"),
            ConfigError::EmptyWord => write!(f, "word bank contains an empty word"),
            ConfigError::ZeroLineLength => write!(f, "line length must be at least 1"),
            ConfigError::InvalidBounds { min, max } => {
                write!(f, "rope bounds are invalid: min {min} must be below max {max}")
            }
            ConfigError::StartOutOfRange { start, min, max } => {
                write!(f, "rope start {start} lies outside [{min}, {max}]")
            }
            ConfigError::NonPositivePull { pull } => {
                write!(f, "pull magnitude {pull} must be positive")
            }
            ConfigError::UnknownDifficulty(name) => write!(f, "unknown difficulty '{name}'"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Violation of the typing-cursor invariant: the cursor sat past the end of
/// the current line. Lines advance eagerly on commit, so observing this means
/// the orchestration layer misbehaved; callers log it and force a reset
/// instead of crashing the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundError {
    ExhaustedLine,
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundError::ExhaustedLine => write!(f, "typing cursor ran past the current line"),
        }
    }
}

impl std::error::Error for RoundError {}

// --- Word bank ---------------------------------------------------------------

/// Validated word list plus the fixed number of words per line.
#[derive(Debug, Clone)]
pub struct WordBank {
    words: Vec<String>,
    line_length: usize,
}

impl WordBank {
    pub fn new<S: AsRef<str>>(words: &[S], line_length: usize) -> Result<Self, ConfigError> {
        if words.is_empty() {
            return Err(ConfigError::EmptyWordBank);
        }
        if line_length == 0 {
            return Err(ConfigError::ZeroLineLength);
        }
        let words: Vec<String> = words.iter().map(|w| w.as_ref().to_string()).collect();
        if words.iter().any(|w| w.trim().is_empty()) {
            return Err(ConfigError::EmptyWord);
        }
        Ok(Self { words, line_length })
    }

    pub fn line_length(&self) -> usize {
        self.line_length
    }

    /// Uniform pick with replacement.
    fn random_word(&self, rng: &mut Lcg) -> &str {
        &self.words[rng.pick(self.words.len())]
    }

    fn fresh_line(&self, rng: &mut Lcg) -> Vec<String> {
        (0..self.line_length)
            .map(|_| self.random_word(rng).to_string())
            .collect()
    }
}

// --- Typing feedback ---------------------------------------------------------

/// Per-character classification of the in-progress text against the target
/// word. Rendering hint only; nothing in the round mutates on its account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum CharFeedback {
    Correct,
    Incorrect,
    Untyped,
}

/// What a keystroke did to the line buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeEvent {
    /// Partial text recorded, no delimiter yet.
    Pending,
    /// Exact word plus delimiter: cursor advanced, partial cleared.
    WordCommitted,
    /// Delimiter on a mismatched word: the whole attempt is discarded.
    /// No partial credit, no going back to a committed word.
    AttemptDiscarded,
}

// --- LineBuffer --------------------------------------------------------------

/// Owns the two visible word lines and the typing cursor.
///
/// Invariant: `typed_count <= line_length`, and equality is transient; a
/// commit that fills the line immediately shifts `next` into `current`,
/// generates a fresh `next` and resets the cursor.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    bank: WordBank,
    rng: Lcg,
    current: Vec<String>,
    next: Vec<String>,
    typed_count: usize,
    partial: String,
}

impl LineBuffer {
    pub fn new(bank: WordBank, mut rng: Lcg) -> Self {
        let current = bank.fresh_line(&mut rng);
        let next = bank.fresh_line(&mut rng);
        Self {
            bank,
            rng,
            current,
            next,
            typed_count: 0,
            partial: String::new(),
        }
    }

    pub fn current_line(&self) -> &[String] {
        &self.current
    }

    pub fn next_line(&self) -> &[String] {
        &self.next
    }

    pub fn typed_count(&self) -> usize {
        self.typed_count
    }

    pub fn partial_text(&self) -> &str {
        &self.partial
    }

    /// The word the cursor points at. Errors only if the eager line advance
    /// was bypassed and the cursor sits past the line end.
    pub fn current_word(&self) -> Result<&str, RoundError> {
        self.current
            .get(self.typed_count)
            .map(String::as_str)
            .ok_or(RoundError::ExhaustedLine)
    }

    /// Classify `text` character-by-character against the current word.
    /// Output is one entry per target character, plus one `Incorrect` entry
    /// per excess typed character.
    pub fn classify(&self, text: &str) -> Result<Vec<CharFeedback>, RoundError> {
        let word = self.current_word()?;
        let typed: Vec<char> = text.chars().collect();
        let mut feedback: Vec<CharFeedback> = word
            .chars()
            .enumerate()
            .map(|(i, expected)| match typed.get(i) {
                Some(&c) if c == expected => CharFeedback::Correct,
                Some(_) => CharFeedback::Incorrect,
                None => CharFeedback::Untyped,
            })
            .collect();
        for _ in word.chars().count()..typed.len() {
            feedback.push(CharFeedback::Incorrect);
        }
        Ok(feedback)
    }

    /// Handle the full input-field text after a keystroke.
    ///
    /// A trailing space is the commit delimiter: if the text (sans delimiter)
    /// equals the current word exactly the cursor advances, otherwise the
    /// attempt is thrown away. Without a delimiter the text is just recorded
    /// as the in-progress partial.
    pub fn submit_typed_text(&mut self, text: &str) -> Result<TypeEvent, RoundError> {
        let word = self.current_word()?.to_string();
        if text.ends_with(' ') {
            self.partial.clear();
            if text.trim() == word {
                self.typed_count += 1;
                self.advance_line_if_complete();
                Ok(TypeEvent::WordCommitted)
            } else {
                Ok(TypeEvent::AttemptDiscarded)
            }
        } else {
            self.partial.clear();
            self.partial.push_str(text);
            Ok(TypeEvent::Pending)
        }
    }

    /// Shift `next` into `current` once the line is fully typed, generating a
    /// fresh `next` and resetting the cursor. No-op (and `None`) while the
    /// line is incomplete. Returns the newly visible pair after a shift.
    pub fn advance_line_if_complete(&mut self) -> Option<(&[String], &[String])> {
        if self.typed_count < self.bank.line_length() {
            return None;
        }
        let fresh = self.bank.fresh_line(&mut self.rng);
        self.current = std::mem::replace(&mut self.next, fresh);
        self.typed_count = 0;
        Some((&self.current, &self.next))
    }
}

// --- TugOfWar ----------------------------------------------------------------

/// Result of a pull, and of the round once the latch is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Outcome {
    InProgress,
    PlayerWins,
    OpponentWins,
}

/// The rope: a scalar position clamped to `[min, max]`. Positive pulls move
/// toward the player end (`max`), negative toward the opponent end (`min`).
#[derive(Debug, Clone)]
pub struct TugOfWar {
    min: f64,
    max: f64,
    start: f64,
    position: f64,
}

impl TugOfWar {
    pub fn new(min: f64, max: f64, start: f64) -> Result<Self, ConfigError> {
        if !(min < max) {
            return Err(ConfigError::InvalidBounds { min, max });
        }
        if !(min..=max).contains(&start) {
            return Err(ConfigError::StartOutOfRange { start, min, max });
        }
        Ok(Self {
            min,
            max,
            start,
            position: start,
        })
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Apply a signed pull, clamping at the rope ends. Overshoot is absorbed
    /// by the clamp (no bounce); a pull at a bound in the same direction is a
    /// no-op.
    pub fn pull(&mut self, amount: f64) -> Outcome {
        self.position = (self.position + amount).clamp(self.min, self.max);
        self.outcome()
    }

    /// Terminal once the position sits exactly on a bound; the clamp makes
    /// these comparisons exact.
    pub fn outcome(&self) -> Outcome {
        if self.position == self.min {
            Outcome::OpponentWins
        } else if self.position == self.max {
            Outcome::PlayerWins
        } else {
            Outcome::InProgress
        }
    }

    pub fn reset(&mut self) {
        self.position = self.start;
    }
}

// --- Round configuration -----------------------------------------------------

/// Opponent behavior knobs. The tick period is consumed by the scheduler in
/// the session layer; the core only sees the discrete tick events.
#[derive(Debug, Clone)]
pub struct Difficulty {
    pub opponent_pull: f64,
    pub tick_period_ms: u32,
}

/// Full setup for one round. The three script generations of the original
/// game varied bounds, units and line lengths; all of that variance lives
/// here as data.
#[derive(Debug, Clone)]
pub struct RoundConfig {
    pub bank: WordBank,
    pub difficulty: Difficulty,
    pub player_pull: f64,
    pub rope_min: f64,
    pub rope_max: f64,
    pub rope_start: f64,
}

// --- RoundController ---------------------------------------------------------

/// Cancellable handle to the periodic opponent tick source. The controller
/// cancels it synchronously in the same event that detects a terminal
/// outcome, before any further tick can be processed.
pub trait OpponentTimer {
    fn cancel(&mut self);
}

/// What a forwarded keystroke did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Round already over; input ignored.
    Ignored,
    /// Partial text recorded.
    Pending,
    /// Mistyped word discarded on delimiter.
    AttemptDiscarded,
    /// Word committed and the rope pulled toward the player.
    WordCommitted { outcome: Outcome },
    /// Cursor invariant violation observed; the round was forcibly reset.
    ForcedReset,
}

/// Render-frame view of the round, pulled by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Snapshot {
    pub current_line: Vec<String>,
    pub next_line: Vec<String>,
    pub typed_count: usize,
    pub partial_text: String,
    pub position: f64,
    pub game_over: bool,
    pub outcome: Outcome,
}

/// Owns all mutable round state: the line buffer, the rope, the `game_over`
/// latch and the opponent timer handle. One instance per game session; there
/// is deliberately no process-wide state here.
pub struct RoundController {
    config: RoundConfig,
    rng: Lcg,
    line: LineBuffer,
    tug: TugOfWar,
    game_over: bool,
    timer: Option<Box<dyn OpponentTimer>>,
}

impl RoundController {
    pub fn new(config: RoundConfig, seed: u64) -> Result<Self, ConfigError> {
        for pull in [config.player_pull, config.difficulty.opponent_pull] {
            if !(pull > 0.0) {
                return Err(ConfigError::NonPositivePull { pull });
            }
        }
        let tug = TugOfWar::new(config.rope_min, config.rope_max, config.rope_start)?;
        let mut rng = Lcg::new(seed);
        let line = LineBuffer::new(config.bank.clone(), rng.fork());
        Ok(Self {
            config,
            rng,
            line,
            tug,
            game_over: false,
            timer: None,
        })
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Hand over the scheduled opponent tick source so terminal detection can
    /// cancel it. Replaces (and cancels) any previously attached handle.
    pub fn attach_timer(&mut self, timer: Box<dyn OpponentTimer>) {
        if let Some(mut old) = self.timer.replace(timer) {
            old.cancel();
        }
    }

    /// Forward the input-field text after a keystroke. A committed word pulls
    /// the rope toward the player; everything becomes a no-op once the round
    /// is over.
    pub fn on_keystroke(&mut self, text: &str) -> KeyEvent {
        if self.game_over {
            return KeyEvent::Ignored;
        }
        match self.line.submit_typed_text(text) {
            Ok(TypeEvent::Pending) => KeyEvent::Pending,
            Ok(TypeEvent::AttemptDiscarded) => KeyEvent::AttemptDiscarded,
            Ok(TypeEvent::WordCommitted) => {
                let outcome = self.tug.pull(self.config.player_pull);
                if outcome != Outcome::InProgress {
                    self.finish();
                }
                KeyEvent::WordCommitted { outcome }
            }
            Err(RoundError::ExhaustedLine) => {
                self.reset();
                KeyEvent::ForcedReset
            }
        }
    }

    /// One scheduled opponent pull. No-op after the round ends, which also
    /// covers a tick that was already in flight when the round ended.
    pub fn on_opponent_tick(&mut self) -> Outcome {
        if self.game_over {
            return self.outcome();
        }
        let outcome = self.tug.pull(-self.config.difficulty.opponent_pull);
        if outcome != Outcome::InProgress {
            self.finish();
        }
        outcome
    }

    fn finish(&mut self) {
        self.game_over = true;
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }

    /// Back to a fresh round: rope at start, cleared latch, newly generated
    /// lines, empty input. Any attached timer is cancelled; the host installs
    /// a new one when it restarts the opponent.
    pub fn reset(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
        self.line = LineBuffer::new(self.config.bank.clone(), self.rng.fork());
        self.tug.reset();
        self.game_over = false;
    }

    pub fn current_line(&self) -> &[String] {
        self.line.current_line()
    }

    pub fn next_line(&self) -> &[String] {
        self.line.next_line()
    }

    pub fn typed_count(&self) -> usize {
        self.line.typed_count()
    }

    pub fn partial_text(&self) -> &str {
        self.line.partial_text()
    }

    pub fn position(&self) -> f64 {
        self.tug.position()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn outcome(&self) -> Outcome {
        self.tug.outcome()
    }

    /// Per-character rendering feedback for the in-progress text.
    pub fn classify(&self, text: &str) -> Vec<CharFeedback> {
        self.line.classify(text).unwrap_or_default()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_line: self.line.current_line().to_vec(),
            next_line: self.line.next_line().to_vec(),
            typed_count: self.line.typed_count(),
            partial_text: self.line.partial_text().to_string(),
            position: self.tug.position(),
            game_over: self.game_over,
            outcome: self.outcome(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn bank(line_length: usize) -> WordBank {
        WordBank::new(&["apple", "banana", "chair"], line_length).unwrap()
    }

    fn buffer(line_length: usize) -> LineBuffer {
        LineBuffer::new(bank(line_length), Lcg::new(7))
    }

    fn controller() -> RoundController {
        RoundController::new(
            RoundConfig {
                bank: bank(3),
                difficulty: Difficulty {
                    opponent_pull: 15.0,
                    tick_period_ms: 400,
                },
                player_pull: 20.0,
                rope_min: 0.0,
                rope_max: 650.0,
                rope_start: 325.0,
            },
            7,
        )
        .unwrap()
    }

    /// Timer fake that records whether cancel() ran.
    struct RecordingTimer {
        cancelled: Rc<Cell<bool>>,
    }

    impl OpponentTimer for RecordingTimer {
        fn cancel(&mut self) {
            self.cancelled.set(true);
        }
    }

    #[test]
    fn word_bank_rejects_bad_config() {
        let empty: [&str; 0] = [];
        assert_eq!(
            WordBank::new(&empty, 3).unwrap_err(),
            ConfigError::EmptyWordBank
        );
        assert_eq!(
            WordBank::new(&["apple"], 0).unwrap_err(),
            ConfigError::ZeroLineLength
        );
        assert_eq!(
            WordBank::new(&["apple", "  "], 3).unwrap_err(),
            ConfigError::EmptyWord
        );
    }

    #[test]
    fn tug_rejects_bad_bounds() {
        assert!(matches!(
            TugOfWar::new(10.0, 10.0, 10.0),
            Err(ConfigError::InvalidBounds { .. })
        ));
        assert!(matches!(
            TugOfWar::new(0.0, 650.0, 700.0),
            Err(ConfigError::StartOutOfRange { .. })
        ));
    }

    #[test]
    fn pull_stays_clamped_under_any_sequence() {
        let mut tug = TugOfWar::new(0.0, 650.0, 325.0).unwrap();
        let pulls = [500.0, -1200.0, 30.0, -30.0, 9999.0, -9999.0, 1.0];
        for amount in pulls {
            tug.pull(amount);
            assert!((0.0..=650.0).contains(&tug.position()), "position escaped clamp");
        }
    }

    #[test]
    fn repeated_pulls_converge_and_idle_at_bound() {
        let mut tug = TugOfWar::new(0.0, 650.0, 325.0).unwrap();
        for _ in 0..100 {
            tug.pull(-15.0);
        }
        assert_eq!(tug.position(), 0.0);
        assert_eq!(tug.pull(-15.0), Outcome::OpponentWins);
        assert_eq!(tug.position(), 0.0);
    }

    #[test]
    fn exact_terminal_pulls() {
        let mut tug = TugOfWar::new(0.0, 650.0, 325.0).unwrap();
        assert_eq!(tug.pull(-325.0), Outcome::OpponentWins);
        assert_eq!(tug.position(), 0.0);

        let mut tug = TugOfWar::new(0.0, 650.0, 325.0).unwrap();
        assert_eq!(tug.pull(325.0), Outcome::PlayerWins);
        assert_eq!(tug.position(), 650.0);
    }

    #[test]
    fn tug_reset_restores_start() {
        let mut tug = TugOfWar::new(0.0, 650.0, 325.0).unwrap();
        tug.pull(-325.0);
        tug.reset();
        assert_eq!(tug.position(), 325.0);
        assert_eq!(tug.outcome(), Outcome::InProgress);
    }

    #[test]
    fn exact_word_plus_delimiter_commits() {
        let mut buf = buffer(3);
        let word = buf.current_word().unwrap().to_string();
        assert_eq!(
            buf.submit_typed_text(&format!("{word} ")).unwrap(),
            TypeEvent::WordCommitted
        );
        assert_eq!(buf.typed_count(), 1);
        assert_eq!(buf.partial_text(), "");
    }

    #[test]
    fn mismatch_plus_delimiter_discards_attempt() {
        let mut buf = buffer(3);
        buf.submit_typed_text("zzz").unwrap();
        assert_eq!(
            buf.submit_typed_text("zzz ").unwrap(),
            TypeEvent::AttemptDiscarded
        );
        assert_eq!(buf.typed_count(), 0);
        assert_eq!(buf.partial_text(), "");
    }

    #[test]
    fn no_delimiter_keeps_partial() {
        let mut buf = buffer(3);
        assert_eq!(buf.submit_typed_text("appl").unwrap(), TypeEvent::Pending);
        assert_eq!(buf.typed_count(), 0);
        assert_eq!(buf.partial_text(), "appl");
    }

    #[test]
    fn completed_line_shifts_and_resets_cursor() {
        let mut buf = buffer(3);
        let upcoming: Vec<String> = buf.next_line().to_vec();
        for _ in 0..3 {
            let word = buf.current_word().unwrap().to_string();
            buf.submit_typed_text(&format!("{word} ")).unwrap();
        }
        assert_eq!(buf.current_line(), upcoming.as_slice());
        assert_eq!(buf.next_line().len(), 3);
        assert_eq!(buf.typed_count(), 0);
    }

    #[test]
    fn advance_is_a_noop_while_incomplete() {
        let mut buf = buffer(3);
        let line: Vec<String> = buf.current_line().to_vec();
        assert!(buf.advance_line_if_complete().is_none());
        assert_eq!(buf.current_line(), line.as_slice());
        assert_eq!(buf.typed_count(), 0);
    }

    #[test]
    fn classify_marks_correct_incorrect_untyped() {
        let bank = WordBank::new(&["apple"], 1).unwrap();
        let buf = LineBuffer::new(bank, Lcg::new(1));
        assert_eq!(
            buf.classify("apxl").unwrap(),
            vec![
                CharFeedback::Correct,
                CharFeedback::Correct,
                CharFeedback::Incorrect,
                CharFeedback::Incorrect,
                CharFeedback::Untyped,
            ]
        );
        // Excess characters past the word length all count as incorrect.
        assert_eq!(buf.classify("apples").unwrap().len(), 6);
        assert_eq!(
            buf.classify("apples").unwrap()[5],
            CharFeedback::Incorrect
        );
    }

    #[test]
    fn controller_latches_after_opponent_win() {
        let mut ctl = controller();
        let cancelled = Rc::new(Cell::new(false));
        ctl.attach_timer(Box::new(RecordingTimer {
            cancelled: cancelled.clone(),
        }));

        // 325 / 15 per tick => 22 ticks to hit the opponent end.
        let mut outcome = Outcome::InProgress;
        for _ in 0..22 {
            outcome = ctl.on_opponent_tick();
        }
        assert_eq!(outcome, Outcome::OpponentWins);
        assert!(ctl.is_game_over());
        assert!(cancelled.get(), "timer must be cancelled with terminal detection");

        // Latched: neither source moves the rope any more.
        assert_eq!(ctl.on_opponent_tick(), Outcome::OpponentWins);
        let word = ctl.current_line()[0].clone();
        assert_eq!(ctl.on_keystroke(&format!("{word} ")), KeyEvent::Ignored);
        assert_eq!(ctl.position(), 0.0);
    }

    #[test]
    fn committed_words_pull_toward_player() {
        let mut ctl = controller();
        let word = ctl.current_line()[0].clone();
        let event = ctl.on_keystroke(&format!("{word} "));
        assert_eq!(
            event,
            KeyEvent::WordCommitted {
                outcome: Outcome::InProgress
            }
        );
        assert_eq!(ctl.position(), 345.0);
        assert_eq!(ctl.typed_count(), 1);
    }

    #[test]
    fn player_reaches_max_and_wins() {
        let mut ctl = controller();
        // 325 / 20 per word => 17 commits reach the player end.
        let mut last = KeyEvent::Ignored;
        for _ in 0..17 {
            let word = ctl.current_line()[ctl.typed_count()].clone();
            last = ctl.on_keystroke(&format!("{word} "));
        }
        assert_eq!(
            last,
            KeyEvent::WordCommitted {
                outcome: Outcome::PlayerWins
            }
        );
        assert!(ctl.is_game_over());
        assert_eq!(ctl.position(), 650.0);
    }

    #[test]
    fn reset_restores_a_fresh_round() {
        let mut ctl = controller();
        for _ in 0..22 {
            ctl.on_opponent_tick();
        }
        assert!(ctl.is_game_over());

        ctl.reset();
        assert!(!ctl.is_game_over());
        assert_eq!(ctl.position(), 325.0);
        assert_eq!(ctl.outcome(), Outcome::InProgress);
        assert_eq!(ctl.typed_count(), 0);
        assert_eq!(ctl.partial_text(), "");
        assert_eq!(ctl.current_line().len(), 3);
        assert_eq!(ctl.next_line().len(), 3);
    }

    #[test]
    fn snapshot_mirrors_controller_state() {
        let mut ctl = controller();
        ctl.on_keystroke("app");
        let snap = ctl.snapshot();
        assert_eq!(snap.partial_text, "app");
        assert_eq!(snap.position, 325.0);
        assert_eq!(snap.typed_count, 0);
        assert!(!snap.game_over);
        assert_eq!(snap.outcome, Outcome::InProgress);
        assert_eq!(snap.current_line, ctl.current_line());
    }
}
