use std::fmt;

use gloo::{events::EventListener, timers::callback::Timeout};
use tempfiles_core::{COPY_FEEDBACK_MS, CopyFeedback, copy_payload};
use tracing::{debug, error, warn};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element};

use super::dom::{event_target_element, has_class, js_error_text};
use crate::config::PageConfig;

/// Label stashed on a button while its confirmation text is showing.
const ORIGINAL_LABEL_ATTR: &str = "data-copy-original";

#[derive(Debug)]
enum ClipboardError {
    NoWindow,
    Unsupported,
    WriteRejected(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::NoWindow => write!(f, "no global window"),
            ClipboardError::Unsupported => write!(f, "clipboard API unavailable (insecure context?)"),
            ClipboardError::WriteRejected(e) => write!(f, "write rejected: {e}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

pub fn mount(document: &Document, config: &PageConfig, listeners: &mut Vec<EventListener>) {
    let copy_class = config.copy_button_class;
    listeners.push(EventListener::new(document, "click", move |event| {
        let Some(button) = event_target_element(event) else {
            return;
        };
        if !has_class(&button, copy_class) {
            return;
        }

        let Some(text) = copy_payload(button.get_attribute("data-text")) else {
            warn!("copy button has no data-text payload");
            return;
        };

        spawn_local(async move {
            match write_clipboard_text(&text).await {
                Ok(()) => {
                    debug!(bytes = text.len(), "copied to clipboard");
                    show_confirmation(&button);
                }
                Err(err) => error!("Failed to copy text: {err}"),
            }
        });
    }));
}

async fn write_clipboard_text(text: &str) -> Result<(), ClipboardError> {
    let window = web_sys::window().ok_or(ClipboardError::NoWindow)?;
    let clipboard = window.navigator().clipboard();
    if clipboard.is_undefined() {
        return Err(ClipboardError::Unsupported);
    }

    JsFuture::from(clipboard.write_text(text))
        .await
        .map_err(|err| ClipboardError::WriteRejected(js_error_text(&err)))?;
    Ok(())
}

fn show_confirmation(button: &Element) {
    let current = button.text_content().unwrap_or_default();
    let pending = button.get_attribute(ORIGINAL_LABEL_ATTR);
    let feedback = CopyFeedback::begin(&current, pending.as_deref());

    let _ = button.set_attribute(ORIGINAL_LABEL_ATTR, feedback.original_label());
    button.set_text_content(Some(feedback.confirmation_label()));

    let button = button.clone();
    Timeout::new(COPY_FEEDBACK_MS, move || {
        button.set_text_content(Some(feedback.original_label()));
        let _ = button.remove_attribute(ORIGINAL_LABEL_ATTR);
    })
    .forget();
}
