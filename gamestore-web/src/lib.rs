#![forbid(unsafe_code)]
//! Game Store storefront, rendered with Yew.
//!
//! Presentational pages live in [`pages`] and take plain state plus
//! callbacks, so they render under SSR in tests. The browser-only shell
//! (router, session guard, screen containers) lives in [`app`].
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod dom;
pub mod pages;
pub mod paths;
pub mod router;
pub mod state;
pub mod storage;
pub mod transport;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    dom::init_logging(log::LevelFilter::Info);
    yew::Renderer::<app::App>::new().render();
}
