//! DOM-backed presentation ports.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlDetailsElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use itinerary_shared::{NavPort, PanelPort, ScrollPort};

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        tracing::warn!(selector, "invalid selector");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// The waypoint id a link points at: `"#raglan"` → `Some("raglan")`.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Navigation links; highlighting toggles a class on every one of them.
pub struct DomNavLinks {
    links: Vec<Element>,
    active_class: String,
}

impl DomNavLinks {
    pub fn collect(document: &Document, selector: &str, active_class: &str) -> Option<Self> {
        let links = query_all(document, selector);
        if links.is_empty() {
            tracing::info!(selector, "no navigation links; link highlighting disabled");
            return None;
        }
        Some(Self {
            links,
            active_class: active_class.to_string(),
        })
    }
}

impl NavPort for DomNavLinks {
    fn highlight(&mut self, target: Option<&str>) {
        for link in &self.links {
            let href = link.get_attribute("href");
            let on = matches!(
                (href.as_deref().and_then(fragment_id), target),
                (Some(linked), Some(active)) if linked == active
            );
            let _ = link
                .class_list()
                .toggle_with_force(&self.active_class, on);
        }
    }
}

/// `<details>` disclosure regions, per section and page-wide for the bulk toggle.
pub struct DomPanels {
    by_section: HashMap<String, HtmlDetailsElement>,
    all: Vec<HtmlDetailsElement>,
}

impl DomPanels {
    pub fn collect(
        document: &Document,
        sections: &[Element],
        detail_selector: &str,
    ) -> Option<Self> {
        let by_section: HashMap<String, HtmlDetailsElement> = sections
            .iter()
            .filter_map(|section| {
                let details = section
                    .query_selector(detail_selector)
                    .ok()
                    .flatten()?
                    .dyn_into::<HtmlDetailsElement>()
                    .ok()?;
                Some((section.id(), details))
            })
            .collect();

        let all: Vec<HtmlDetailsElement> = query_all(document, detail_selector)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlDetailsElement>().ok())
            .collect();

        if all.is_empty() && by_section.is_empty() {
            tracing::info!(detail_selector, "no detail panels on page");
            return None;
        }
        Some(Self { by_section, all })
    }
}

impl PanelPort for DomPanels {
    fn is_open(&self, id: &str) -> bool {
        self.by_section.get(id).is_some_and(|d| d.open())
    }

    fn set_open(&mut self, id: &str, open: bool) {
        if let Some(details) = self.by_section.get(id) {
            details.set_open(open);
        }
    }

    fn set_all_open(&mut self, open: bool) {
        for details in &self.all {
            details.set_open(open);
        }
    }
}

pub struct DomScroller {
    document: Document,
}

impl DomScroller {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ScrollPort for DomScroller {
    fn scroll_to_section(&mut self, id: &str) {
        let Some(section) = self.document.get_element_by_id(id) else {
            tracing::debug!(id, "scroll target missing");
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        section.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

#[cfg(test)]
mod tests {
    use super::fragment_id;

    #[test]
    fn fragment_id_strips_hash() {
        assert_eq!(fragment_id("#raglan"), Some("raglan"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("raglan"), None);
        assert_eq!(fragment_id("/other#raglan"), None);
    }
}
