//! Leaflet bindings and the `MapBackend` built on them.

use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

use itinerary_shared::bounds::LatLngBounds;
use itinerary_shared::config::MapConfig;
use itinerary_shared::map::{MapBackend, RouteStyle};
use itinerary_shared::marker::{MarkerVisual, Tooltip};
use itinerary_shared::Coordinate;

use crate::error::MountError;

mod ffi {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        pub type Map;
        pub type Layer;
        #[wasm_bindgen(extends = Layer)]
        pub type Marker;
        pub type DivIcon;

        #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
        pub fn create_map(container_id: &str, options: &JsValue) -> Result<Map, JsValue>;

        #[wasm_bindgen(method, js_name = fitBounds)]
        pub fn fit_bounds(this: &Map, bounds: &JsValue, options: &JsValue);

        #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
        pub fn tile_layer(url_template: &str, options: &JsValue) -> Layer;

        #[wasm_bindgen(js_namespace = L)]
        pub fn polyline(latlngs: &JsValue, options: &JsValue) -> Layer;

        #[wasm_bindgen(method, js_name = addTo)]
        pub fn add_to(this: &Layer, map: &Map);

        #[wasm_bindgen(js_namespace = L)]
        pub fn marker(latlng: &JsValue, options: &JsValue) -> Marker;

        #[wasm_bindgen(method, js_name = setIcon)]
        pub fn set_icon(this: &Marker, icon: &DivIcon);

        #[wasm_bindgen(method, js_name = bindTooltip)]
        pub fn bind_tooltip(this: &Marker, content: &str, options: &JsValue);

        #[wasm_bindgen(method)]
        pub fn on(this: &Marker, event: &str, handler: &js_sys::Function);

        #[wasm_bindgen(js_namespace = L, js_name = divIcon)]
        pub fn div_icon(options: &JsValue) -> DivIcon;
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapInitOptions {
    scroll_wheel_zoom: bool,
    zoom_control: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileLayerOptions<'a> {
    attribution: &'a str,
    subdomains: &'a str,
    max_zoom: u8,
}

#[derive(Serialize)]
struct TooltipOptions<'a> {
    permanent: bool,
    direction: &'a str,
    offset: [i32; 2],
}

#[derive(Serialize)]
struct FitOptions {
    padding: [u32; 2],
}

fn js_options<T: Serialize>(what: &'static str, value: &T) -> JsValue {
    match serde_wasm_bindgen::to_value(value) {
        Ok(js) => js,
        Err(e) => {
            tracing::warn!(what, error = %e, "failed to serialize Leaflet options");
            JsValue::UNDEFINED
        }
    }
}

fn leaflet_loaded() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    js_sys::Reflect::get(window.as_ref(), &JsValue::from_str("L"))
        .map(|l| l.is_object())
        .unwrap_or(false)
}

/// A Leaflet map bound to a page container. Owns the click closures of every
/// marker it created.
pub struct LeafletBackend {
    map: ffi::Map,
    click_handlers: Vec<Closure<dyn Fn()>>,
}

impl LeafletBackend {
    pub fn create(container_id: &str, config: &MapConfig) -> Result<Self, MountError> {
        if !leaflet_loaded() {
            return Err(MountError::Js {
                context: "leaflet",
                message: "global `L` is not loaded".to_string(),
            });
        }

        let init = MapInitOptions {
            scroll_wheel_zoom: config.scroll_wheel_zoom,
            zoom_control: config.zoom_control,
        };
        let map = ffi::create_map(container_id, &js_options("map", &init))
            .map_err(|e| MountError::js("L.map", e))?;

        let tiles = TileLayerOptions {
            attribution: &config.tiles.attribution,
            subdomains: &config.tiles.subdomains,
            max_zoom: config.tiles.max_zoom,
        };
        ffi::tile_layer(&config.tiles.url_template, &js_options("tileLayer", &tiles)).add_to(&map);

        Ok(Self {
            map,
            click_handlers: Vec::new(),
        })
    }

    fn div_icon(visual: &MarkerVisual) -> ffi::DivIcon {
        ffi::div_icon(&js_options("divIcon", visual))
    }
}

fn latlng(c: Coordinate) -> JsValue {
    let pair = js_sys::Array::new();
    pair.push(&JsValue::from_f64(c.lat));
    pair.push(&JsValue::from_f64(c.lng));
    pair.into()
}

impl MapBackend for LeafletBackend {
    type Marker = ffi::Marker;

    fn add_route(&mut self, path: &[Coordinate], style: &RouteStyle) {
        let points: js_sys::Array = path.iter().map(|c| latlng(*c)).collect();
        ffi::polyline(&points, &js_options("polyline", style)).add_to(&self.map);
    }

    fn add_marker(
        &mut self,
        at: Coordinate,
        visual: &MarkerVisual,
        tooltip: &Tooltip,
        on_click: Box<dyn Fn()>,
    ) -> ffi::Marker {
        let options = js_sys::Object::new();
        if let Err(e) = js_sys::Reflect::set(
            &options,
            &JsValue::from_str("icon"),
            Self::div_icon(visual).as_ref(),
        ) {
            tracing::warn!(error = ?e, "failed to attach marker icon");
        }
        let marker = ffi::marker(&latlng(at), &options);
        marker.add_to(&self.map);

        let tip = TooltipOptions {
            permanent: tooltip.permanent,
            direction: tooltip.direction,
            offset: tooltip.offset,
        };
        marker.bind_tooltip(&tooltip.html, &js_options("tooltip", &tip));

        let handler = Closure::wrap(on_click);
        marker.on("click", handler.as_ref().unchecked_ref());
        self.click_handlers.push(handler);
        marker
    }

    fn set_marker_visual(&mut self, marker: &ffi::Marker, visual: &MarkerVisual) {
        marker.set_icon(&Self::div_icon(visual));
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: [u32; 2]) {
        let [sw, ne] = bounds.corners();
        let corners: js_sys::Array = [sw, ne]
            .into_iter()
            .map(|[lat, lng]| latlng(Coordinate::new(lat, lng)))
            .collect();
        self.map
            .fit_bounds(&corners, &js_options("fitBounds", &FitOptions { padding }));
    }
}
