//! Browser bridge for the table.
//!
//! One `TableRunner` lives in a `thread_local!`. The host calls `table_init`
//! once, pushes input between frames, calls `table_frame` once per rendered
//! frame and reads the packed buffers through the pointer/length exports.

pub mod runner;
pub mod score;

pub use runner::TableRunner;
pub use score::Scoreboard;

use std::cell::RefCell;

use cue_engine::InputEvent;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<TableRunner>> = RefCell::new(None);
}

/// Run `f` against the runner. Before `table_init` every export is a no-op
/// that returns `R::default()`.
fn with_runner<R: Default>(f: impl FnOnce(&mut TableRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => f(runner),
            None => {
                log::warn!("table not initialized; call table_init() first");
                R::default()
            }
        }
    })
}

/// Build the table from a JSON description (empty string = reference table).
#[wasm_bindgen]
pub fn table_init(config_json: &str) -> Result<(), JsError> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = TableRunner::from_json(config_json)?;
    let balls = runner.balls_len();
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("cue-web: initialized with {} balls", balls);
    Ok(())
}

/// Advance one frame. Returns `false` once the loop has quit.
#[wasm_bindgen]
pub fn table_frame() -> bool {
    with_runner(|r| r.frame())
}

#[wasm_bindgen]
pub fn table_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn table_shoot() {
    with_runner(|r| r.push_input(InputEvent::Shoot));
}

#[wasm_bindgen]
pub fn table_quit() {
    with_runner(|r| r.push_input(InputEvent::Quit));
}

// ---- Buffer accessors ----

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.events_ptr())
    })
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

#[wasm_bindgen]
pub fn get_balls_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.balls_ptr())
    })
}

#[wasm_bindgen]
pub fn get_balls_len() -> u32 {
    with_runner(|r| r.balls_len())
}

// ---- Score ----

#[wasm_bindgen]
pub fn get_score(team_code: u32) -> u32 {
    with_runner(|r| r.score_for(team_code))
}

#[wasm_bindgen]
pub fn get_captured_count() -> u32 {
    with_runner(|r| r.captured_count())
}
