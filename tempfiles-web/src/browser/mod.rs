use std::{cell::RefCell, fmt};

use gloo::{
    events::EventListener,
    timers::callback::Interval,
};
use tracing::info;
use wasm_bindgen::prelude::*;

use crate::config::{LOG_LEVEL_ATTR, PageConfig};

mod clipboard;
mod countdown;
mod dom;
mod logging;
mod storage;
mod theme;
mod upload;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Keeps every listener and timer alive for the life of the page.
struct App {
    _listeners: Vec<EventListener>,
    _countdown: Option<Interval>,
}

#[derive(Debug)]
enum MountError {
    NoWindow,
    NoDocument,
    NoBody,
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountError::NoWindow => write!(f, "no global window"),
            MountError::NoDocument => write!(f, "window has no document"),
            MountError::NoBody => write!(f, "document has no body"),
        }
    }
}

impl std::error::Error for MountError {}

#[wasm_bindgen(start)]
pub fn start() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        web_sys::console::error_1(&JsValue::from_str("tempfiles: no document to attach to"));
        return;
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| boot()).forget();
    } else {
        boot();
    }
}

fn boot() {
    match mount() {
        Ok(app) => APP.with(|slot| *slot.borrow_mut() = Some(app)),
        Err(err) => web_sys::console::error_1(&JsValue::from_str(&format!(
            "tempfiles: UI failed to start: {err}"
        ))),
    }
}

fn mount() -> Result<App, MountError> {
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoDocument)?;
    let body = document.body().ok_or(MountError::NoBody)?;

    let config =
        PageConfig::default().with_log_level(body.get_attribute(LOG_LEVEL_ATTR).as_deref());
    logging::init_logging(&config.log_filter);

    let mut listeners = Vec::new();
    upload::mount(&document, &body, &config, &mut listeners);
    theme::mount(&document, &body, &config, &mut listeners);
    clipboard::mount(&document, &config, &mut listeners);
    let countdown = countdown::mount(&document, &config);

    info!(
        listeners = listeners.len(),
        countdown = countdown.is_some(),
        "tempfiles UI mounted"
    );
    Ok(App {
        _listeners: listeners,
        _countdown: countdown,
    })
}
