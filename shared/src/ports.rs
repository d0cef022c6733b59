//! Presentation ports the sync coordinator drives. The browser client
//! implements them over the DOM and Leaflet; `Option<T>` stands in for a view
//! whose page element is missing, turning every call into a no-op.

pub trait MarkerPort {
    /// Emphasize (`true`) or normalize marker `id`. Must be idempotent.
    fn set_active(&mut self, id: &str, active: bool);
}

pub trait NavPort {
    /// Highlight exactly the links targeting `#target` and clear every other
    /// link. `None` clears all of them.
    fn highlight(&mut self, target: Option<&str>);
}

pub trait PanelPort {
    fn is_open(&self, id: &str) -> bool;
    fn set_open(&mut self, id: &str, open: bool);
    fn set_all_open(&mut self, open: bool);
}

pub trait ScrollPort {
    /// Smoothly scroll so the top of section `id` aligns with the viewport top.
    fn scroll_to_section(&mut self, id: &str);
}

impl<T: MarkerPort> MarkerPort for Option<T> {
    fn set_active(&mut self, id: &str, active: bool) {
        if let Some(inner) = self {
            inner.set_active(id, active);
        }
    }
}

impl<T: NavPort> NavPort for Option<T> {
    fn highlight(&mut self, target: Option<&str>) {
        if let Some(inner) = self {
            inner.highlight(target);
        }
    }
}

impl<T: PanelPort> PanelPort for Option<T> {
    fn is_open(&self, id: &str) -> bool {
        self.as_ref().is_some_and(|inner| inner.is_open(id))
    }

    fn set_open(&mut self, id: &str, open: bool) {
        if let Some(inner) = self {
            inner.set_open(id, open);
        }
    }

    fn set_all_open(&mut self, open: bool) {
        if let Some(inner) = self {
            inner.set_all_open(open);
        }
    }
}

impl<T: ScrollPort> ScrollPort for Option<T> {
    fn scroll_to_section(&mut self, id: &str) {
        if let Some(inner) = self {
            inner.scroll_to_section(id);
        }
    }
}
