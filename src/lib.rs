//! Friend request page.
//!
//! A character asks a yes/no question; the "no" button runs away from the
//! pointer until it has been chased three times, after which clicking it
//! switches the page into a haunted theme. "Yes" shows a confetti
//! celebration. The interaction logic lives in [`controller`] and is plain
//! Rust; the `page` module is the thin web-sys shell around it.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod controller;
pub mod error;
pub mod view;

mod logging;
mod page;

pub use config::{EvadeSettings, PageConfig};
pub use controller::{InteractionState, Phase, ResponseController, SoundCue};
pub use error::{ConfigError, MediaPlaybackFailure};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

/// Mount the page with the default configuration.
#[wasm_bindgen]
pub fn start_page() -> Result<(), JsValue> {
    mount_page(PageConfig::default())
}

/// Mount the page with a JSON config; omitted fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_page_with_config(json: &str) -> Result<(), JsValue> {
    let config = PageConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    mount_page(config)
}

/// Rust-side entry point: mount a page into the current document.
pub fn mount_page(config: PageConfig) -> Result<(), JsValue> {
    log::set_max_level(config.log_level);
    page::mount(config)
}
