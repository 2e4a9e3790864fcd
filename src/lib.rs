//! Picture Order Quiz core crate.
//!
//! Drag pictures from the options pool into the answer box until they match
//! the question's sequence. The pure quiz logic (hover-index resolution,
//! placement updates, the answer box, the session state machine and its
//! timer queue) is usable natively; the `quiz` module also carries the
//! browser front-end started from JS through `start_quiz()`.

use wasm_bindgen::prelude::*;

pub mod error;
pub mod quiz;

pub use error::{DatasetError, SessionError};

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
// Entrypoints
// -----------------------------------------------------------------------------

/// Starts the quiz on the bundled pages with default timings.
#[wasm_bindgen]
pub fn start_quiz() -> Result<(), JsValue> {
    quiz::start_quiz_with_dataset(quiz::builtin(), quiz::QuizConfig::default())
}

/// Starts the quiz on a `data.json`-shaped dataset. An empty `config_json`
/// keeps the default timings.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_quiz_with(dataset_json: &str, config_json: &str) -> Result<(), JsValue> {
    let (dataset, config) =
        parse_inputs(dataset_json, config_json).map_err(|e| JsValue::from_str(&e))?;
    quiz::start_quiz_with_dataset(dataset, config)
}

#[cfg(feature = "serde_json")]
fn parse_inputs(dataset_json: &str, config_json: &str) -> Result<(quiz::StaticDataset, quiz::QuizConfig), String> {
    let dataset = quiz::StaticDataset::from_json(dataset_json).map_err(|e| e.to_string())?;
    let config = if config_json.trim().is_empty() {
        quiz::QuizConfig::default()
    } else {
        serde_json::from_str(config_json).map_err(|e| format!("quiz config: {e}"))?
    };
    Ok((dataset, config))
}
