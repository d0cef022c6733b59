use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::itinerary::{COMPLETION_MESSAGE, default_departure, default_stops};
use crate::map::{MapOptions, RouteStyle};
use crate::marker::MarkerStyle;
use crate::scroll_top::DEFAULT_THRESHOLD;
use crate::visibility::ActivationBand;
use crate::waypoint::{Registry, RegistryError, WaypointSpec};

/// Element id of the optional inline JSON block a page variant uses to override defaults.
pub const CONFIG_ELEMENT_ID: &str = "itinerary-config";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Stable identifiers the page markup provides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub map_container: String,
    pub sections: String,
    pub nav_links: String,
    pub glance_links: String,
    pub detail_region: String,
    pub toggle_all: String,
    pub scroll_top: String,
    pub countdown: String,
    pub active_class: String,
    pub visible_class: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            map_container: "nz-map".to_string(),
            sections: ".stop[id]".to_string(),
            nav_links: ".sn-link".to_string(),
            glance_links: "a.gr".to_string(),
            detail_region: ".stop-expand".to_string(),
            toggle_all: "toggle-all".to_string(),
            scroll_top: "scroll-top".to_string(),
            countdown: "countdown".to_string(),
            active_class: "is-active".to_string(),
            visible_class: "is-visible".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayerConfig {
    pub url_template: String,
    pub attribution: String,
    pub subdomains: String,
    pub max_zoom: u8,
}

impl Default for TileLayerConfig {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png"
                .to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>".to_string(),
            subdomains: "abcd".to_string(),
            max_zoom: 19,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub marker_style: MarkerStyle,
    /// Overrides the style's built-in tooltip offset.
    pub tooltip_offset: Option<[i32; 2]>,
    pub fit_padding: [u32; 2],
    pub scroll_wheel_zoom: bool,
    pub zoom_control: bool,
    pub tiles: TileLayerConfig,
    pub route: Option<RouteStyle>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            marker_style: MarkerStyle::Pin,
            tooltip_offset: None,
            fit_padding: [30, 30],
            scroll_wheel_zoom: false,
            zoom_control: true,
            tiles: TileLayerConfig::default(),
            route: Some(RouteStyle::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub selectors: Selectors,
    pub map: MapConfig,
    pub band: ActivationBand,
    pub scroll_top_threshold: f64,
    /// Wall-clock departure in the viewer's local time zone.
    pub departure: NaiveDateTime,
    pub completion_message: String,
    pub waypoints: Vec<WaypointSpec>,
    pub log_level: LogLevel,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            map: MapConfig::default(),
            band: ActivationBand::default(),
            scroll_top_threshold: DEFAULT_THRESHOLD,
            departure: default_departure(),
            completion_message: COMPLETION_MESSAGE.to_string(),
            waypoints: default_stops(),
            log_level: LogLevel::default(),
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn registry(&self) -> Result<Registry, RegistryError> {
        Registry::new(self.waypoints.iter().cloned())
    }

    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            marker_style: self.map.marker_style,
            tooltip_offset: self
                .map
                .tooltip_offset
                .unwrap_or_else(|| self.map.marker_style.tooltip_offset()),
            fit_padding: self.map.fit_padding,
            route: self.map.route.clone(),
        }
    }
}
