//! wasm-bindgen session layer.
//!
//! Holds one `RoundController` per browser session in a thread-local slot and
//! exposes the boundary the host page drives: configuration, start/reset, the
//! keystroke feed and the per-frame state getters. The opponent is a
//! `setInterval` callback; its handle is also wrapped in an `OpponentTimer`
//! and attached to the controller, so the interval is cleared in the very
//! event that detects a finished round.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{console, window};

use crate::round::{
    CharFeedback, Difficulty, KeyEvent, OpponentTimer, Outcome, RoundConfig, RoundController,
    WordBank, difficulty,
};

struct Session {
    controller: RoundController,
    // Keep the interval closure alive while the opponent runs; dropped when
    // the interval is cleared.
    tick_closure: Option<Closure<dyn FnMut()>>,
    interval_id: Option<i32>,
}

// RefCell::new isn't const on this toolchain; allow Clippy lint until a const initializer is feasible.
thread_local! {
    static SESSION: RefCell<Option<Session>> = RefCell::new(None);
}

/// `setInterval` handle the controller cancels on terminal detection.
struct IntervalHandle {
    id: i32,
}

impl OpponentTimer for IntervalHandle {
    fn cancel(&mut self) {
        if let Some(win) = window() {
            win.clear_interval_with_handle(self.id);
        }
    }
}

fn err_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn seed() -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 8];
        if getrandom::getrandom(&mut buf).is_ok() {
            return u64::from_le_bytes(buf);
        }
    }
    let now = window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    ((now * 1000.0) as u64) ^ 0x517c_c1b7_2722_0a95
}

fn stop_interval(session: &mut Session) {
    if let Some(id) = session.interval_id.take() {
        if let Some(win) = window() {
            win.clear_interval_with_handle(id);
        }
    }
    session.tick_closure = None;
}

fn start_interval(session: &mut Session) -> Result<(), JsValue> {
    stop_interval(session);
    let closure = Closure::wrap(Box::new(|| {
        SESSION.with(|cell| {
            if let Some(s) = cell.borrow_mut().as_mut() {
                if s.controller.on_opponent_tick() != Outcome::InProgress {
                    // The controller already cleared the interval through its
                    // timer handle. Forget the stale id; the closure itself
                    // must outlive this call and is freed on the next
                    // start/stop.
                    s.interval_id = None;
                }
            }
        });
    }) as Box<dyn FnMut()>);
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let id = win.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        session.controller.config().difficulty.tick_period_ms as i32,
    )?;
    session.interval_id = Some(id);
    session.tick_closure = Some(closure);
    session
        .controller
        .attach_timer(Box::new(IntervalHandle { id }));
    Ok(())
}

fn install(controller: RoundController) {
    SESSION.with(|cell| {
        let mut slot = cell.borrow_mut();
        if let Some(old) = slot.as_mut() {
            stop_interval(old);
        }
        *slot = Some(Session {
            controller,
            tick_closure: None,
            interval_id: None,
        });
    });
}

// --- Inbound -----------------------------------------------------------------

/// Set up a round with a custom word bank and tuning. Does not start the
/// opponent; call `start()` (or `reset()`) for that.
#[wasm_bindgen]
pub fn configure(
    words: Vec<String>,
    line_length: usize,
    opponent_pull: f64,
    tick_period_ms: u32,
    player_pull: f64,
) -> Result<(), JsValue> {
    let config = RoundConfig {
        bank: WordBank::new(&words, line_length).map_err(err_js)?,
        difficulty: Difficulty {
            opponent_pull,
            tick_period_ms,
        },
        player_pull,
        rope_min: difficulty::ROPE_MIN,
        rope_max: difficulty::ROPE_MAX,
        rope_start: difficulty::ROPE_START,
    };
    install(RoundController::new(config, seed()).map_err(err_js)?);
    Ok(())
}

/// Begin (or resume) the opponent ticks for the configured round.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    SESSION.with(|cell| {
        let mut slot = cell.borrow_mut();
        let session = slot
            .as_mut()
            .ok_or_else(|| JsValue::from_str("game not configured"))?;
        start_interval(session)
    })
}

/// One-call entrypoint for the built-in modes: configure from the named
/// difficulty preset and start the opponent.
#[wasm_bindgen]
pub fn start_game(difficulty_name: &str) -> Result<(), JsValue> {
    let config = difficulty::preset(difficulty_name).map_err(err_js)?;
    install(RoundController::new(config, seed()).map_err(err_js)?);
    start()
}

/// Forward the full text of the input field after a keystroke.
#[wasm_bindgen]
pub fn on_keystroke(text: &str) {
    SESSION.with(|cell| {
        if let Some(session) = cell.borrow_mut().as_mut() {
            match session.controller.on_keystroke(text) {
                KeyEvent::ForcedReset => {
                    console::warn_1(
                        &"rope-rush: typing cursor ran past the line; round was reset".into(),
                    );
                    // The forced reset cancelled the interval; put the
                    // opponent back on the fresh round.
                    session.interval_id = None;
                    session.tick_closure = None;
                    let _ = start_interval(session);
                }
                KeyEvent::WordCommitted { outcome } if outcome != Outcome::InProgress => {
                    session.interval_id = None;
                    session.tick_closure = None;
                }
                _ => {}
            }
        }
    });
}

/// One opponent pull, for hosts that drive their own scheduler instead of
/// the built-in interval.
#[wasm_bindgen]
pub fn on_opponent_tick() {
    SESSION.with(|cell| {
        if let Some(session) = cell.borrow_mut().as_mut() {
            session.controller.on_opponent_tick();
        }
    });
}

/// Fresh round with the same configuration: rope back to start, new lines,
/// cleared input, opponent restarted.
#[wasm_bindgen]
pub fn reset() -> Result<(), JsValue> {
    SESSION.with(|cell| {
        let mut slot = cell.borrow_mut();
        let session = slot
            .as_mut()
            .ok_or_else(|| JsValue::from_str("game not configured"))?;
        stop_interval(session);
        session.controller.reset();
        start_interval(session)
    })
}

/// Stop the opponent ticks; state stays readable for the end-of-round view.
#[wasm_bindgen]
pub fn stop_game() {
    SESSION.with(|cell| {
        if let Some(session) = cell.borrow_mut().as_mut() {
            stop_interval(session);
        }
    });
}

// --- Outbound (read each render frame) ----------------------------------------

fn with_controller<R>(default: R, f: impl FnOnce(&RoundController) -> R) -> R {
    SESSION.with(|cell| match cell.borrow().as_ref() {
        Some(session) => f(&session.controller),
        None => default,
    })
}

#[wasm_bindgen]
pub fn get_current_line() -> String {
    with_controller(String::new(), |c| c.current_line().join(" "))
}

#[wasm_bindgen]
pub fn get_next_line() -> String {
    with_controller(String::new(), |c| c.next_line().join(" "))
}

#[wasm_bindgen]
pub fn get_typed_count() -> usize {
    with_controller(0, |c| c.typed_count())
}

#[wasm_bindgen]
pub fn get_partial_text() -> String {
    with_controller(String::new(), |c| c.partial_text().to_string())
}

#[wasm_bindgen]
pub fn get_position() -> f64 {
    with_controller(difficulty::ROPE_START, |c| c.position())
}

#[wasm_bindgen]
pub fn is_game_over() -> bool {
    with_controller(false, |c| c.is_game_over())
}

#[wasm_bindgen]
pub fn get_outcome() -> String {
    let outcome = with_controller(Outcome::InProgress, |c| c.outcome());
    match outcome {
        Outcome::InProgress => "inProgress",
        Outcome::PlayerWins => "playerWins",
        Outcome::OpponentWins => "opponentWins",
    }
    .to_string()
}

/// Per-character feedback for `text` against the current word, one char per
/// character: `c` correct, `x` incorrect, `_` untyped.
#[wasm_bindgen]
pub fn classify_input(text: &str) -> String {
    with_controller(String::new(), |c| {
        c.classify(text)
            .iter()
            .map(|f| match f {
                CharFeedback::Correct => 'c',
                CharFeedback::Incorrect => 'x',
                CharFeedback::Untyped => '_',
            })
            .collect()
    })
}

/// Whole round state as one JSON document, for hosts preferring a single
/// pull per frame.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn get_snapshot_json() -> Result<String, JsValue> {
    SESSION.with(|cell| match cell.borrow().as_ref() {
        Some(session) => serde_json::to_string(&session.controller.snapshot()).map_err(err_js),
        None => Err(JsValue::from_str("game not configured")),
    })
}
