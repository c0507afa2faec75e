use std::{cell::RefCell, rc::Rc};

use gloo::{
    events::{EventListener, EventListenerOptions},
    timers::callback::Timeout,
};
use rand::{SeedableRng, rngs::SmallRng};
use tempfiles_core::{
    PROGRESS_TICK_MS, ProgressTick, SelectedFile, UploadController, UploadPhase, UploadView,
};
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    DataTransfer, Document, DragEvent, Element, Event, EventTarget, File, HtmlButtonElement,
    HtmlElement, HtmlFormElement, HtmlInputElement, PageTransitionEvent,
};

use super::dom::{by_id, js_error_text, query, query_in, set_style, set_visible};
use crate::config::PageConfig;

const DRAG_EVENTS: [&str; 4] = ["dragenter", "dragover", "dragleave", "drop"];

/// Page elements the controller draws into. Any of them may be missing from
/// a given template; rendering skips what is absent.
struct UploadElements {
    file_input: Option<HtmlInputElement>,
    upload_area: Option<HtmlElement>,
    form: Option<HtmlFormElement>,
    progress_container: Option<HtmlElement>,
    progress_fill: Option<HtmlElement>,
    progress_text: Option<Element>,
    file_info: Option<HtmlElement>,
    file_name: Option<Element>,
    file_size: Option<Element>,
    alert: Option<HtmlElement>,
    submit_button: Option<HtmlButtonElement>,
}

impl UploadElements {
    fn find(document: &Document, config: &PageConfig) -> Self {
        let file_info: Option<HtmlElement> = query(document, config.file_info_selector);
        let (file_name, file_size) = match &file_info {
            Some(panel) => (
                query_in(panel, config.file_name_selector),
                query_in(panel, config.file_size_selector),
            ),
            None => (None, None),
        };

        Self {
            file_input: by_id(document, config.file_input_id),
            upload_area: by_id(document, config.upload_area_id),
            form: by_id(document, config.upload_form_id),
            progress_container: query(document, config.progress_container_selector),
            progress_fill: query(document, config.progress_fill_selector),
            progress_text: query(document, config.progress_text_selector),
            file_info,
            file_name,
            file_size,
            alert: query(document, config.alert_selector),
            submit_button: query(document, config.submit_button_selector),
        }
    }
}

struct UploadPage {
    controller: UploadController,
    /// Browser handle for the staged file; the controller only knows name and size.
    staged: Option<File>,
    elements: UploadElements,
    rendered: UploadView,
    rng: SmallRng,
}

impl UploadPage {
    fn new(elements: UploadElements) -> Self {
        let controller = UploadController::new();
        let rendered = controller.view();
        let seed = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
        Self {
            controller,
            staged: None,
            elements,
            rendered,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn select(&mut self, file: Option<File>) {
        let selected = file.as_ref().map(|file| SelectedFile {
            name: file.name(),
            size_bytes: file.size() as u64,
        });

        match self.controller.select_file(selected) {
            Ok(()) => {
                if file.is_some() {
                    self.staged = file;
                }
            }
            Err(err) => debug!("selection rejected: {err}"),
        }
        self.render();
    }

    /// Returns the progress generation when the submission starts a new upload.
    fn submit(&mut self, event: &Event) -> Option<u64> {
        let was_idle = self.controller.phase() == UploadPhase::Idle;
        if let Err(err) = self.controller.submit().map(|_| ()) {
            event.prevent_default();
            warn!("upload blocked: {err}");
            self.render();
            return None;
        }

        if let Err(err) = self.attach_staged_file() {
            warn!("could not attach staged file to input: {}", js_error_text(&err));
        }
        self.render();
        was_idle.then(|| self.controller.generation())
    }

    /// Dropped files never reach the input on their own; copy the staged one
    /// in so the native multipart POST carries it.
    fn attach_staged_file(&self) -> Result<(), JsValue> {
        let (Some(input), Some(file)) = (&self.elements.file_input, &self.staged) else {
            return Ok(());
        };

        let transfer = DataTransfer::new()?;
        transfer.items().add_with_file(file)?;
        input.set_files(transfer.files().as_ref());
        Ok(())
    }

    /// Back-navigation can restore the page from the bfcache mid-upload;
    /// return it to a clean, usable form.
    fn restore(&mut self) {
        if self.controller.phase() != UploadPhase::Uploading {
            return;
        }
        self.controller.enable_upload_area();
        self.controller.reset();
        self.staged = None;
        if let Some(input) = &self.elements.file_input {
            input.set_value("");
        }
        self.render();
    }

    fn tick_progress(&mut self, generation: u64) -> ProgressTick {
        let tick = self.controller.tick_progress(generation, &mut self.rng);
        self.render();
        tick
    }

    fn render(&mut self) {
        let next = self.controller.view();
        if next == self.rendered {
            return;
        }
        let els = &self.elements;

        if next.file_info != self.rendered.file_info {
            if let Some(panel) = &els.file_info {
                match &next.file_info {
                    Some(info) => {
                        if let Some(name) = &els.file_name {
                            name.set_text_content(Some(&info.name));
                        }
                        if let Some(size) = &els.file_size {
                            size.set_text_content(Some(&info.size_label));
                        }
                        set_visible(panel, true);
                        let _ = panel.class_list().add_1("fade-in");
                    }
                    None => set_visible(panel, false),
                }
            }
        }

        if next.alert != self.rendered.alert {
            if let Some(banner) = &els.alert {
                match &next.alert {
                    Some(alert) => {
                        banner.set_class_name(&alert.kind.class_name());
                        banner.set_text_content(Some(&alert.message));
                        set_visible(banner, true);
                        let _ = banner.class_list().add_1("fade-in");
                    }
                    None => set_visible(banner, false),
                }
            }
        }

        if next.upload_area_enabled != self.rendered.upload_area_enabled {
            if let Some(area) = &els.upload_area {
                let (pointer_events, opacity) = if next.upload_area_enabled {
                    ("auto", "1")
                } else {
                    ("none", "0.7")
                };
                set_style(area, "pointer-events", pointer_events);
                set_style(area, "opacity", opacity);
            }
        }

        if next.submit_disabled != self.rendered.submit_disabled
            || next.submit_html != self.rendered.submit_html
        {
            if let Some(button) = &els.submit_button {
                button.set_disabled(next.submit_disabled);
                button.set_inner_html(next.submit_html);
            }
        }

        if next.progress != self.rendered.progress {
            if let Some(container) = &els.progress_container {
                match &next.progress {
                    Some(progress) => {
                        set_visible(container, true);
                        if let Some(fill) = &els.progress_fill {
                            set_style(fill, "width", &progress.width_css);
                        }
                        if let Some(text) = &els.progress_text {
                            text.set_text_content(Some(&progress.label));
                        }
                    }
                    None => {
                        set_visible(container, false);
                        if let Some(fill) = &els.progress_fill {
                            set_style(fill, "width", "0%");
                        }
                    }
                }
            }
        }

        self.rendered = next;
    }
}

pub fn mount(
    document: &Document,
    body: &HtmlElement,
    config: &PageConfig,
    listeners: &mut Vec<EventListener>,
) {
    let elements = UploadElements::find(document, config);
    let file_input = elements.file_input.clone();
    let upload_area = elements.upload_area.clone();
    let form = elements.form.clone();
    let page = Rc::new(RefCell::new(UploadPage::new(elements)));

    if let Some(input) = &file_input {
        let page = Rc::clone(&page);
        listeners.push(EventListener::new(input, "change", move |event| {
            let file = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            page.borrow_mut().select(file);
        }));
    }

    if let (Some(area), Some(input)) = (&upload_area, &file_input) {
        let input = input.clone();
        listeners.push(EventListener::new(area, "click", move |_| input.click()));
    }

    if let Some(form) = &form {
        let page = Rc::clone(&page);
        listeners.push(EventListener::new_with_options(
            form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let started = page.borrow_mut().submit(event);
                if let Some(generation) = started {
                    schedule_progress_tick(Rc::clone(&page), generation);
                }
            },
        ));
    }

    if let Some(area) = &upload_area {
        mount_drop_zone(area, body, config.dragover_class, &page, listeners);
    }

    if let Some(window) = document.default_view() {
        let page = Rc::clone(&page);
        listeners.push(EventListener::new(&window, "pageshow", move |event| {
            let restored = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(PageTransitionEvent::persisted);
            if restored {
                debug!("page restored from bfcache");
                page.borrow_mut().restore();
            }
        }));
    }
}

fn mount_drop_zone(
    area: &HtmlElement,
    body: &HtmlElement,
    dragover_class: &'static str,
    page: &Rc<RefCell<UploadPage>>,
    listeners: &mut Vec<EventListener>,
) {
    let body: &EventTarget = body.as_ref();
    for name in DRAG_EVENTS {
        listeners.push(EventListener::new_with_options(
            body,
            name,
            EventListenerOptions::enable_prevent_default(),
            suppress_default,
        ));

        let zone = area.clone();
        let page = Rc::clone(page);
        listeners.push(EventListener::new_with_options(
            area,
            name,
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                suppress_default(event);
                let class_list = zone.class_list();
                match name {
                    "dragenter" | "dragover" => {
                        let _ = class_list.add_1(dragover_class);
                    }
                    _ => {
                        let _ = class_list.remove_1(dragover_class);
                    }
                }

                if name == "drop" {
                    let file = event
                        .dyn_ref::<DragEvent>()
                        .and_then(DragEvent::data_transfer)
                        .and_then(|transfer| transfer.files())
                        .and_then(|files| files.get(0));
                    if file.is_some() {
                        page.borrow_mut().select(file);
                    }
                }
            },
        ));
    }
}

fn suppress_default(event: &Event) {
    event.prevent_default();
    event.stop_propagation();
}

/// Re-arms itself every tick until the synthetic progress reaches 100% or
/// its upload generation is superseded.
fn schedule_progress_tick(page: Rc<RefCell<UploadPage>>, generation: u64) {
    Timeout::new(PROGRESS_TICK_MS, move || {
        let tick = page.borrow_mut().tick_progress(generation);
        if tick == ProgressTick::Continue {
            schedule_progress_tick(page, generation);
        }
    })
    .forget();
}
