//! # djinn
//!
//! WebAssembly entry point for the Djinn restaurant page effects.
//!
//! The behavior lives in the `effects` crate; this crate implements its
//! `Host` port over `web-sys` ([`dom::DomHost`]), drives its timers with a
//! `gloo` timeout ([`app::Page`]), and boots once the document is parsed.
//!
//! Page configuration is read from an optional
//! `<script type="application/json" id="djinn-config">` block. Missing keys
//! keep their defaults; an invalid block is logged and ignored.

pub mod app;
pub mod dom;
pub mod error;
pub mod registry;

use std::cell::RefCell;
use std::rc::Rc;

use effects::config::Config;
use effects::toast::ToastKind;
use log::{Level, error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{AddEventListenerOptions, Document, Window};

use crate::app::Page;
use crate::error::BootError;

/// Id of the optional JSON configuration block.
pub const CONFIG_ELEMENT_ID: &str = "djinn-config";

thread_local! {
    static PAGE: RefCell<Option<Rc<RefCell<Page>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { Level::Debug } else { Level::Info };
    if let Err(err) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("djinn: logger not installed: {err}").into());
    }

    if let Err(err) = boot() {
        error!("djinn: boot failed: {err}");
    }
}

/// Show a toast from page scripts. Unknown kinds fall back to `info`.
#[wasm_bindgen]
pub fn notify(message: &str, kind: &str) {
    let kind = ToastKind::from_name(kind).unwrap_or_default();
    with_running(|page| page.notify(message, kind));
}

/// Cancel every pending timer and remove all listeners.
#[wasm_bindgen]
pub fn shutdown() {
    let Some(page) = PAGE.with(|slot| slot.borrow_mut().take()) else {
        return;
    };
    match page.try_borrow_mut() {
        Ok(mut page) => info!("djinn: shut down, {} timers cancelled", page.shutdown()),
        Err(err) => warn!("djinn: shutdown while busy: {err}"),
    }
}

fn with_running(run: impl FnOnce(&mut Page)) {
    let page = PAGE.with(|slot| slot.borrow().clone());
    let Some(page) = page else {
        warn!("djinn: page effects not running");
        return;
    };
    match page.try_borrow_mut() {
        Ok(mut page) => run(&mut page),
        Err(err) => warn!("djinn: page busy: {err}"),
    }
}

fn boot() -> Result<(), BootError> {
    let window = web_sys::window().ok_or(BootError::NoWindow)?;
    let document = window.document().ok_or(BootError::NoDocument)?;
    if document.ready_state() != "loading" {
        return launch(window, document);
    }

    let target = document.clone();
    let ready = Closure::once(move || {
        if let Err(err) = launch(window, document) {
            error!("djinn: boot failed: {err}");
        }
    });
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        ready.as_ref().unchecked_ref(),
        &options,
    )?;
    ready.forget();
    Ok(())
}

fn launch(window: Window, document: Document) -> Result<(), BootError> {
    let config = page_config(&document);
    let page = Page::launch(window, document, config, random_seed())?;
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    Ok(())
}

fn page_config(document: &Document) -> Config {
    let Some(block) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Config::default();
    };
    let raw = block.text_content().unwrap_or_default();
    match Config::from_json(&raw) {
        Ok(config) => {
            info!("djinn: config loaded from #{CONFIG_ELEMENT_ID}");
            config
        }
        Err(err) => {
            warn!("djinn: {}; using defaults", BootError::from(err));
            Config::default()
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn random_seed() -> u64 {
    (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64
}
