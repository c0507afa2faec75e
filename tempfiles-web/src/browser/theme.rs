use std::{cell::RefCell, rc::Rc};

use gloo::events::EventListener;
use tempfiles_core::{MemoryStore, PreferenceStore, ThemeController, ThemeView};
use tracing::warn;
use web_sys::{Document, Element, HtmlElement};

use super::{
    dom::{event_target_element, has_class, query},
    storage::LocalStorageStore,
};
use crate::config::PageConfig;

pub fn mount(
    document: &Document,
    body: &HtmlElement,
    config: &PageConfig,
    listeners: &mut Vec<EventListener>,
) {
    let store: Box<dyn PreferenceStore> = match LocalStorageStore::open() {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("{err}; theme choice will not persist");
            Box::new(MemoryStore::default())
        }
    };

    let theme = ThemeController::load(store);
    let toggle_selector = config.theme_toggle_selector();
    apply_theme(document, body, &toggle_selector, theme.view());

    let theme = Rc::new(RefCell::new(theme));
    let toggle_class = config.theme_toggle_class;
    let doc = document.clone();
    let body = body.clone();
    listeners.push(EventListener::new(document, "click", move |event| {
        let Some(target) = event_target_element(event) else {
            return;
        };
        if !has_class(&target, toggle_class) {
            return;
        }

        let view = {
            let mut theme = theme.borrow_mut();
            theme.toggle();
            theme.view()
        };
        apply_theme(&doc, &body, &toggle_selector, view);
    }));
}

fn apply_theme(document: &Document, body: &HtmlElement, toggle_selector: &str, view: ThemeView) {
    if let Err(err) = body.set_attribute("data-theme", view.data_theme) {
        warn!("failed to set data-theme: {err:?}");
    }
    if let Some(toggle) = query::<Element>(document, toggle_selector) {
        toggle.set_inner_html(view.icon);
    }
}
