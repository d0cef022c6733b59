use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::bounds::LatLngBounds;
use crate::marker::{MarkerStyle, MarkerVisual, Tooltip, marker_visual, tooltip};
use crate::ports::MarkerPort;
use crate::waypoint::{Coordinate, Registry, Waypoint};

/// Called with a waypoint id when the user clicks its marker.
pub type NavigateSink = Rc<dyn Fn(&str)>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteStyle {
    pub color: String,
    pub weight: f64,
    pub dash_array: String,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            color: "rgba(200,169,110,0.55)".to_string(),
            weight: 2.0,
            dash_array: "4 8".to_string(),
        }
    }
}

/// Per-page presentation choices.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub marker_style: MarkerStyle,
    pub tooltip_offset: [i32; 2],
    pub fit_padding: [u32; 2],
    pub route: Option<RouteStyle>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            marker_style: MarkerStyle::Pin,
            tooltip_offset: MarkerStyle::Pin.tooltip_offset(),
            fit_padding: [30, 30],
            route: Some(RouteStyle::default()),
        }
    }
}

/// The interactive-map capability (Leaflet in the browser).
pub trait MapBackend {
    type Marker;

    fn add_route(&mut self, path: &[Coordinate], style: &RouteStyle);
    fn add_marker(
        &mut self,
        at: Coordinate,
        visual: &MarkerVisual,
        tooltip: &Tooltip,
        on_click: Box<dyn Fn()>,
    ) -> Self::Marker;
    fn set_marker_visual(&mut self, marker: &Self::Marker, visual: &MarkerVisual);
    fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: [u32; 2]);
}

#[derive(Debug)]
pub struct MarkerHandle<M> {
    pub marker: M,
    pub waypoint: Waypoint,
    pub active: bool,
}

/// One marker per waypoint, kept in registry order.
pub struct MapPresentation<B: MapBackend> {
    backend: B,
    options: MapOptions,
    handles: Vec<MarkerHandle<B::Marker>>,
}

impl<B: MapBackend> MapPresentation<B> {
    pub fn new(backend: B, options: MapOptions) -> Self {
        Self {
            backend,
            options,
            handles: Vec::new(),
        }
    }

    /// Draw the route, one marker per waypoint and fit the viewport around them.
    pub fn render(&mut self, registry: &Registry, on_navigate: NavigateSink) {
        let path = registry.coordinates();
        if let Some(route) = &self.options.route
            && path.len() > 1
        {
            self.backend.add_route(&path, route);
        }

        for waypoint in registry {
            let visual = marker_visual(self.options.marker_style, waypoint, false);
            let tip = tooltip(waypoint, self.options.tooltip_offset);
            let sink = on_navigate.clone();
            let id = waypoint.id.clone();
            let marker =
                self.backend
                    .add_marker(waypoint.coordinate, &visual, &tip, Box::new(move || sink(&id)));
            self.handles.push(MarkerHandle {
                marker,
                waypoint: waypoint.clone(),
                active: false,
            });
        }

        if let Some(bounds) = LatLngBounds::enclosing(&path) {
            self.backend.fit_bounds(&bounds, self.options.fit_padding);
        }
        tracing::debug!(markers = self.handles.len(), "map rendered");
    }

    pub fn handles(&self) -> &[MarkerHandle<B::Marker>] {
        &self.handles
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: MapBackend> MarkerPort for MapPresentation<B> {
    fn set_active(&mut self, id: &str, active: bool) {
        let Some(handle) = self.handles.iter_mut().find(|h| h.waypoint.id == id) else {
            return;
        };
        if handle.active == active {
            return;
        }
        handle.active = active;
        let visual = marker_visual(self.options.marker_style, &handle.waypoint, active);
        self.backend.set_marker_visual(&handle.marker, &visual);
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    pub struct FakeMap {
        pub routes: Vec<Vec<Coordinate>>,
        pub markers: Vec<(Coordinate, MarkerVisual, Tooltip)>,
        pub clicks: Vec<Box<dyn Fn()>>,
        pub icon_updates: Rc<RefCell<Vec<(usize, MarkerVisual)>>>,
        pub fitted: Option<(LatLngBounds, [u32; 2])>,
    }

    impl MapBackend for FakeMap {
        type Marker = usize;

        fn add_route(&mut self, path: &[Coordinate], _style: &RouteStyle) {
            self.routes.push(path.to_vec());
        }

        fn add_marker(
            &mut self,
            at: Coordinate,
            visual: &MarkerVisual,
            tooltip: &Tooltip,
            on_click: Box<dyn Fn()>,
        ) -> usize {
            self.markers.push((at, visual.clone(), tooltip.clone()));
            self.clicks.push(on_click);
            self.markers.len() - 1
        }

        fn set_marker_visual(&mut self, marker: &usize, visual: &MarkerVisual) {
            self.icon_updates.borrow_mut().push((*marker, visual.clone()));
        }

        fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: [u32; 2]) {
            self.fitted = Some((*bounds, padding));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::fake::FakeMap;
    use super::*;
    use crate::itinerary::default_stops;

    fn rendered() -> (MapPresentation<FakeMap>, Rc<RefCell<Vec<String>>>) {
        let registry = Registry::new(default_stops()).unwrap();
        let clicked = Rc::new(RefCell::new(Vec::new()));
        let clicked_sink = clicked.clone();
        let mut map = MapPresentation::new(FakeMap::default(), MapOptions::default());
        map.render(
            &registry,
            Rc::new(move |id: &str| clicked_sink.borrow_mut().push(id.to_string())),
        );
        (map, clicked)
    }

    #[test]
    fn renders_one_marker_per_waypoint_in_order() {
        let (map, _) = rendered();
        let backend = map.backend();
        assert_eq!(backend.markers.len(), 6);
        assert_eq!(map.handles().len(), 6);

        for (idx, handle) in map.handles().iter().enumerate() {
            assert_eq!(handle.marker, idx);
            assert_eq!(handle.waypoint.ordinal as usize, idx + 1);
            assert!(!handle.active);
            let (_, visual, tip) = &backend.markers[idx];
            assert!(visual.html.contains(&format!(">{}</text>", idx + 1)));
            assert!(tip.html.starts_with(&format!("<strong>{}. ", idx + 1)));
        }
    }

    #[test]
    fn draws_route_and_fits_bounds() {
        let (map, _) = rendered();
        let backend = map.backend();
        assert_eq!(backend.routes.len(), 1);
        assert_eq!(backend.routes[0].len(), 6);

        let (bounds, padding) = backend.fitted.unwrap();
        assert_eq!(padding, [30, 30]);
        for (at, _, _) in &backend.markers {
            assert!(bounds.contains(*at));
        }
    }

    #[test]
    fn marker_click_requests_navigation() {
        let (map, clicked) = rendered();
        (map.backend().clicks[3])();
        (map.backend().clicks[0])();
        assert_eq!(*clicked.borrow(), vec!["queenstown", "waiheke"]);
    }

    #[test]
    fn set_active_is_idempotent() {
        let (mut map, _) = rendered();
        let updates = map.backend().icon_updates.clone();

        map.set_active("raglan", true);
        map.set_active("raglan", true);
        assert_eq!(updates.borrow().len(), 1);
        assert_eq!(updates.borrow()[0].0, 1);
        assert_eq!(updates.borrow()[0].1.icon_size, [34, 51]);

        map.set_active("raglan", false);
        map.set_active("raglan", false);
        assert_eq!(updates.borrow().len(), 2);
        assert_eq!(updates.borrow()[1].1.icon_size, [28, 42]);
    }

    #[test]
    fn set_active_ignores_unknown_ids() {
        let (mut map, _) = rendered();
        map.set_active("atlantis", true);
        assert!(map.backend().icon_updates.borrow().is_empty());
    }

    #[test]
    fn empty_registry_draws_nothing() {
        let registry = Registry::default();
        let mut map = MapPresentation::new(FakeMap::default(), MapOptions::default());
        map.render(&registry, Rc::new(|_: &str| {}));
        assert!(map.backend().routes.is_empty());
        assert!(map.backend().fitted.is_none());
    }
}
