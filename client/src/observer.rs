use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use itinerary_shared::visibility::{BandEvaluator, ReportSink};
use itinerary_shared::{ActivationBand, VisibilityReport, VisibilitySource};

use crate::error::MountError;

pub fn intersection_observer_supported(window: &Window) -> bool {
    js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false)
}

/// Native `IntersectionObserver` over the section elements.
pub struct IntersectionSource {
    document: Document,
    observer: Option<IntersectionObserver>,
    _callback: Option<Closure<dyn Fn(js_sys::Array)>>,
}

impl IntersectionSource {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            observer: None,
            _callback: None,
        }
    }
}

impl VisibilitySource for IntersectionSource {
    type Error = MountError;

    fn observe(
        &mut self,
        section_ids: &[String],
        band: ActivationBand,
        on_report: ReportSink,
    ) -> Result<usize, MountError> {
        let callback = Closure::<dyn Fn(js_sys::Array)>::new(move |entries: js_sys::Array| {
            let batch: Vec<VisibilityReport> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| VisibilityReport {
                    id: entry.target().id(),
                    focused: entry.is_intersecting(),
                })
                .collect();
            if !batch.is_empty() {
                on_report(batch);
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&band.root_margin());
        init.set_threshold(&JsValue::from_f64(0.0));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|e| MountError::js("IntersectionObserver", e))?;

        let mut registered = 0;
        for id in section_ids {
            if let Some(section) = self.document.get_element_by_id(id) {
                observer.observe(&section);
                registered += 1;
            }
        }

        self.observer = Some(observer);
        self._callback = Some(callback);
        Ok(registered)
    }
}

impl Drop for IntersectionSource {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

/// Fallback for browsers without `IntersectionObserver`: re-reads section
/// geometry on every scroll and resize.
pub struct ScrollGeometrySource {
    window: Window,
    document: Document,
    handler: Option<Closure<dyn Fn()>>,
}

impl ScrollGeometrySource {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            handler: None,
        }
    }
}

impl VisibilitySource for ScrollGeometrySource {
    type Error = MountError;

    fn observe(
        &mut self,
        section_ids: &[String],
        band: ActivationBand,
        on_report: ReportSink,
    ) -> Result<usize, MountError> {
        let evaluator = Rc::new(RefCell::new(BandEvaluator::new(section_ids, band)));
        let window = self.window.clone();
        let document = self.document.clone();

        let evaluate = move || {
            let viewport_height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            let Ok(mut evaluator) = evaluator.try_borrow_mut() else {
                return;
            };
            let batch = evaluator.evaluate(viewport_height, |id| {
                document.get_element_by_id(id).map(|el| {
                    let rect = el.get_bounding_client_rect();
                    (rect.top(), rect.bottom())
                })
            });
            drop(evaluator);
            if !batch.is_empty() {
                on_report(batch);
            }
        };

        let handler = Closure::<dyn Fn()>::new(evaluate);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        for event in ["scroll", "resize"] {
            self.window
                .add_event_listener_with_callback_and_add_event_listener_options(
                    event,
                    handler.as_ref().unchecked_ref(),
                    &options,
                )
                .map_err(|e| MountError::js("scroll listener", e))?;
        }

        let initial: &js_sys::Function = handler.as_ref().unchecked_ref();
        let _ = initial.call0(&JsValue::NULL);

        self.handler = Some(handler);
        Ok(section_ids.len())
    }
}

impl Drop for ScrollGeometrySource {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            for event in ["scroll", "resize"] {
                let _ = self
                    .window
                    .remove_event_listener_with_callback(event, handler.as_ref().unchecked_ref());
            }
        }
    }
}

/// Whichever source the browser supports, kept alive for the page's lifetime.
pub enum PageVisibilitySource {
    Native(IntersectionSource),
    Polling(ScrollGeometrySource),
}

impl PageVisibilitySource {
    pub fn detect(window: Window, document: Document) -> Self {
        if intersection_observer_supported(&window) {
            Self::Native(IntersectionSource::new(document))
        } else {
            tracing::info!("IntersectionObserver unavailable; polling section geometry on scroll");
            Self::Polling(ScrollGeometrySource::new(window, document))
        }
    }
}

impl VisibilitySource for PageVisibilitySource {
    type Error = MountError;

    fn observe(
        &mut self,
        section_ids: &[String],
        band: ActivationBand,
        on_report: ReportSink,
    ) -> Result<usize, MountError> {
        match self {
            Self::Native(source) => source.observe(section_ids, band, on_report),
            Self::Polling(source) => source.observe(section_ids, band, on_report),
        }
    }
}
