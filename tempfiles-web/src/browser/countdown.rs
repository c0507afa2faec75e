use gloo::timers::callback::Interval;
use tempfiles_core::{COUNTDOWN_TICK_MS, CountdownTimer, ExpiryTimestamp};
use tracing::{debug, warn};
use web_sys::{Document, Element};

use super::dom::{now_unix_ms, query};
use crate::config::PageConfig;

/// Starts the expiry countdown on pages that carry a `data-expiry` element.
///
/// The returned interval must be kept alive; it ticks until the page goes away.
pub fn mount(document: &Document, config: &PageConfig) -> Option<Interval> {
    let source = query::<Element>(document, config.expiry_selector)?;
    let raw = source.get_attribute(config.expiry_attr)?;

    let Some(expiry) = ExpiryTimestamp::from_js_millis(js_sys::Date::parse(&raw)) else {
        warn!(raw = %raw, "unparseable expiry timestamp; countdown disabled");
        return None;
    };
    let Some(display) = query::<Element>(document, config.countdown_selector) else {
        warn!("expiry present but no countdown element");
        return None;
    };

    debug!(expiry_ms = expiry.unix_ms(), "countdown started");
    let mut timer = CountdownTimer::new(expiry);
    display.set_text_content(Some(&timer.tick(now_unix_ms())));

    Some(Interval::new(COUNTDOWN_TICK_MS, move || {
        let label = timer.tick(now_unix_ms());
        display.set_text_content(Some(&label));
    }))
}
