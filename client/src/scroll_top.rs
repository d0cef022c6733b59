use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Element, ScrollBehavior, ScrollToOptions, Window};

use itinerary_shared::PageConfig;
use itinerary_shared::scroll_top::is_visible;

use crate::error::MountError;

struct ScrollTopBinding {
    window: Window,
    control: Element,
    on_scroll: Closure<dyn Fn()>,
    on_click: Closure<dyn Fn()>,
}

impl Drop for ScrollTopBinding {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("scroll", self.on_scroll.as_ref().unchecked_ref());
        let _ = self
            .control
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
    }
}

thread_local! {
    static SCROLL_TOP_BINDING: RefCell<Option<ScrollTopBinding>> = const { RefCell::new(None) };
}

pub fn bind(window: &Window, document: &Document, config: &PageConfig) -> Result<(), MountError> {
    let control_id = &config.selectors.scroll_top;
    let control = document
        .get_element_by_id(control_id)
        .ok_or_else(|| MountError::MissingElement(control_id.clone()))?;

    let threshold = config.scroll_top_threshold;
    let visible_class = config.selectors.visible_class.clone();

    let on_scroll = {
        let window = window.clone();
        let control = control.clone();
        Closure::<dyn Fn()>::new(move || {
            let scroll_y = window.scroll_y().unwrap_or(0.0);
            let _ = control
                .class_list()
                .toggle_with_force(&visible_class, is_visible(scroll_y, threshold));
        })
    };
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    window
        .add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| MountError::js("scroll listener", e))?;

    let on_click = {
        let window = window.clone();
        Closure::<dyn Fn()>::new(move || {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        })
    };
    control
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|e| MountError::js("scroll-top click", e))?;

    // Reloads can restore a scrolled position before any scroll event fires.
    let initial: &js_sys::Function = on_scroll.as_ref().unchecked_ref();
    let _ = initial.call0(&wasm_bindgen::JsValue::NULL);

    SCROLL_TOP_BINDING.with(|slot| {
        *slot.borrow_mut() = Some(ScrollTopBinding {
            window: window.clone(),
            control,
            on_scroll,
            on_click,
        });
    });
    Ok(())
}
