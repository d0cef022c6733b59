use serde::{Deserialize, Serialize};

use crate::waypoint::Waypoint;

const STROKE_NORMAL: &str = "rgba(255,255,255,0.7)";
const STROKE_ACTIVE: &str = "rgba(255,255,255,0.95)";

/// Marker look for a page variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    /// Numbered teardrop pin.
    #[default]
    Pin,
    /// Plain filled circle.
    Circle,
}

impl MarkerStyle {
    /// Tooltip offset `(x, y)` in pixels relative to the marker anchor.
    pub const fn tooltip_offset(self) -> [i32; 2] {
        match self {
            MarkerStyle::Pin => [0, -44],
            MarkerStyle::Circle => [0, -12],
        }
    }

    const fn size(self, active: bool) -> (u32, u32) {
        match (self, active) {
            (MarkerStyle::Pin, false) => (28, 42),
            (MarkerStyle::Pin, true) => (34, 51),
            (MarkerStyle::Circle, false) => (16, 16),
            (MarkerStyle::Circle, true) => (22, 22),
        }
    }
}

/// Everything needed to build a Leaflet `divIcon`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerVisual {
    pub class_name: &'static str,
    pub html: String,
    pub icon_size: [u32; 2],
    pub icon_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub html: String,
    pub direction: &'static str,
    pub offset: [i32; 2],
    pub permanent: bool,
}

pub fn marker_visual(style: MarkerStyle, waypoint: &Waypoint, active: bool) -> MarkerVisual {
    let (w, h) = style.size(active);
    let stroke = if active { STROKE_ACTIVE } else { STROKE_NORMAL };
    let color = escape_html(&waypoint.color);

    match style {
        MarkerStyle::Pin => MarkerVisual {
            class_name: "map-pin-icon",
            html: format!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 36" width="{w}" height="{h}"><path d="M12 0C7.3 0 0 5.4 0 12.2 0 19.5 12 36 12 36S24 19.5 24 12.2C24 5.4 16.7 0 12 0z" fill="{color}" stroke="{stroke}" stroke-width="1.5"/><circle cx="12" cy="12" r="4.8" fill="rgba(255,255,255,0.35)"/><text x="12" y="15.5" text-anchor="middle" font-size="8.5" font-weight="700" fill="white" font-family="system-ui,sans-serif" opacity="0.9">{num}</text></svg>"#,
                num = waypoint.ordinal,
            ),
            icon_size: [w, h],
            icon_anchor: [(w / 2) as i32, h as i32],
            popup_anchor: [0, -(h as i32 + 2)],
        },
        MarkerStyle::Circle => {
            let r = w as f64 / 2.0 - 1.0;
            let c = w as f64 / 2.0;
            MarkerVisual {
                class_name: "map-dot-icon",
                html: format!(
                    r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}"><circle cx="{c}" cy="{c}" r="{r}" fill="{color}" stroke="{stroke}" stroke-width="1.5"/></svg>"#,
                ),
                icon_size: [w, h],
                icon_anchor: [(w / 2) as i32, (h / 2) as i32],
                popup_anchor: [0, -((h / 2) as i32 + 2)],
            }
        }
    }
}

pub fn tooltip(waypoint: &Waypoint, offset: [i32; 2]) -> Tooltip {
    Tooltip {
        html: format!("<strong>{}</strong>", escape_html(&waypoint.label())),
        direction: "top",
        offset,
        permanent: false,
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
