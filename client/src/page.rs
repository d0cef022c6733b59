//! Page bootstrap: builds the sync coordinator over the DOM and Leaflet ports
//! and wires every event source into it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, Window};

use itinerary_shared::visibility::{self, ReportSink};
use itinerary_shared::{
    MapPresentation, NavigateSink, PageConfig, Registry, SyncCoordinator, VisibilityReport,
};

use crate::dom::{DomNavLinks, DomPanels, DomScroller, fragment_id, query_all};
use crate::error::MountError;
use crate::leaflet::LeafletBackend;
use crate::observer::PageVisibilitySource;

type PageCoordinator = SyncCoordinator<
    Option<MapPresentation<LeafletBackend>>,
    Option<DomNavLinks>,
    Option<DomPanels>,
    DomScroller,
>;

struct ListenerBinding {
    target: Element,
    event: &'static str,
    handler: Closure<dyn Fn(Event)>,
}

impl Drop for ListenerBinding {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.handler.as_ref().unchecked_ref());
    }
}

thread_local! {
    static COORDINATOR: RefCell<Option<PageCoordinator>> = const { RefCell::new(None) };
    static LISTENERS: RefCell<Vec<ListenerBinding>> = const { RefCell::new(Vec::new()) };
    static VISIBILITY: RefCell<Option<PageVisibilitySource>> = const { RefCell::new(None) };
}

/// Run `f` against the live coordinator. Events that arrive while another
/// handler holds it, or before boot finished, are dropped.
fn with_coordinator<R>(f: impl FnOnce(&mut PageCoordinator) -> R) -> Option<R> {
    COORDINATOR.with(|slot| match slot.try_borrow_mut() {
        Ok(mut guard) => guard.as_mut().map(f),
        Err(_) => {
            tracing::warn!("coordinator busy; event dropped");
            None
        }
    })
}

fn listen(target: Element, event: &'static str, handler: impl Fn(Event) + 'static) {
    let handler = Closure::<dyn Fn(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
    {
        tracing::warn!(error = %MountError::js("addEventListener", e), event, "listener not attached");
        return;
    }
    LISTENERS.with(|slot| {
        slot.borrow_mut().push(ListenerBinding {
            target,
            event,
            handler,
        });
    });
}

fn replace_location_hash(window: &Window, id: &str) {
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&format!("#{id}")));
    }
}

fn build_map(config: &PageConfig, registry: &Registry) -> Option<MapPresentation<LeafletBackend>> {
    let container_id = &config.selectors.map_container;
    let backend = match LeafletBackend::create(container_id, &config.map) {
        Ok(backend) => backend,
        Err(e) => {
            tracing::warn!(error = %e, "map disabled");
            return None;
        }
    };

    let on_navigate: NavigateSink = Rc::new(|id: &str| {
        with_coordinator(|c| c.on_user_navigate(id));
    });
    let mut map = MapPresentation::new(backend, config.map_options());
    map.render(registry, on_navigate);
    Some(map)
}

fn bind_navigation_links(window: &Window, document: &Document, selector: &str) {
    for link in query_all(document, selector) {
        let window = window.clone();
        let target = link.clone();
        listen(link, "click", move |event: Event| {
            let Some(href) = target.get_attribute("href") else {
                return;
            };
            let Some(id) = fragment_id(&href) else {
                return;
            };
            if with_coordinator(|c| c.on_user_navigate(id)).unwrap_or(false) {
                event.prevent_default();
                replace_location_hash(&window, id);
            }
        });
    }
}

fn bind_toggle_all(document: &Document, control_id: &str) {
    let Some(control) = document.get_element_by_id(control_id) else {
        tracing::info!(control_id, "no bulk expand control");
        return;
    };
    let label_target = control.clone();
    listen(control, "click", move |_event: Event| {
        if let Some(label) = with_coordinator(|c| c.toggle_all_panels()) {
            label_target.set_text_content(Some(label));
        }
    });
}

fn start_visibility(window: &Window, document: &Document, config: &PageConfig, sections: &[Element]) {
    let ids: Vec<String> = sections
        .iter()
        .map(|s| s.id())
        .filter(|id| !id.is_empty())
        .collect();

    let on_report: ReportSink = Rc::new(|batch: Vec<VisibilityReport>| {
        with_coordinator(|c| c.on_visibility_batch(&batch));
    });
    let mut source = PageVisibilitySource::detect(window.clone(), document.clone());
    match visibility::start(&mut source, &ids, config.band, on_report) {
        Ok(true) => VISIBILITY.with(|slot| *slot.borrow_mut() = Some(source)),
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, "scroll sync disabled"),
    }
}

/// Wire the scroll-synchronized waypoint views. Each missing collaborator
/// disables only its own feature.
pub fn boot(window: &Window, document: &Document, config: &PageConfig) {
    let registry = match config.registry() {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!(error = %e, "invalid waypoint list; map and scroll sync disabled");
            return;
        }
    };

    let sections = query_all(document, &config.selectors.sections);
    let map = if document
        .get_element_by_id(&config.selectors.map_container)
        .is_some()
    {
        build_map(config, &registry)
    } else {
        tracing::info!(container = %config.selectors.map_container, "no map container");
        None
    };
    let nav = DomNavLinks::collect(document, &config.selectors.nav_links, &config.selectors.active_class);
    let panels = DomPanels::collect(document, &sections, &config.selectors.detail_region);
    let scroller = DomScroller::new(document.clone());

    let coordinator = SyncCoordinator::new(registry, map, nav, panels, scroller);
    COORDINATOR.with(|slot| {
        // Dropping an old coordinator (re-entered main) releases its marker closures.
        *slot.borrow_mut() = Some(coordinator);
    });

    bind_navigation_links(window, document, &config.selectors.nav_links);
    bind_navigation_links(window, document, &config.selectors.glance_links);
    bind_toggle_all(document, &config.selectors.toggle_all);
    start_visibility(window, document, config, &sections);
}
