//! Rope Rush core crate.
//!
//! A typing tug-of-war: the player types the displayed words to pull the rope
//! marker toward their end while a fixed-interval opponent pulls it back;
//! reaching either rope end finishes the round. This crate owns the game
//! state (word lines, typing cursor, rope position) plus the thin
//! wasm-bindgen session layer the browser host drives. Rendering, menus and
//! countdowns belong to the host page, which reads state back through the
//! `session` getters each frame.

use wasm_bindgen::prelude::*;

pub mod round;
pub mod session;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Built-in word banks. Selection is uniform-random with replacement; banks are
// flat lowercase ascii word lists, one per difficulty preset.
// -----------------------------------------------------------------------------

pub const NORMAL_WORDS: &[&str] = &[
    "apple", "banana", "chair", "window", "table",
    "school", "house", "car", "book", "forest",
    "river", "sun", "moon", "flower", "dog",
];

pub const WIZARD_WORDS: &[&str] = &[
    "quidditch", "horcrux", "muggle", "wand", "gryffindor",
    "slytherin", "hufflepuff", "ravenclaw", "diagon", "privet",
    "butterbeer", "patronus", "basilisk", "invisibility", "horntail", "ollivanders",
];
