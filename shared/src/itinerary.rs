use chrono::NaiveDateTime;

use crate::waypoint::{Coordinate, WaypointSpec};

/// Departure, in the viewer's local time zone.
pub const DEPARTURE: &str = "2026-11-06T00:00:00";

pub const COMPLETION_MESSAGE: &str = "Wheels up! Have an amazing trip!";

/// (id, name, [lat, lng], color, hotel, dates)
const STOPS: &[(&str, &str, [f64; 2], &str, &str, &str)] = &[
    (
        "waiheke",
        "Waiheke Island",
        [-36.788, 175.085],
        "#c4903a",
        "Waiheke Island Resort",
        "Nov 8 – 10",
    ),
    (
        "raglan",
        "Raglan",
        [-37.805, 174.874],
        "#2aa0c8",
        "Te Whaanga Retreat & Spa",
        "Nov 10 – 12",
    ),
    (
        "rotorua",
        "Rotorua / Lake Rotoiti",
        [-38.037, 176.370],
        "#58b458",
        "VR Rotorua Lake Resort",
        "Nov 12 – 13",
    ),
    (
        "queenstown",
        "Queenstown",
        [-45.031, 168.663],
        "#4088c8",
        "Kamana Lakehouse",
        "Nov 13 – 18",
    ),
    (
        "milford",
        "Milford Sound",
        [-44.655, 167.927],
        "#28a898",
        "Overnight Cruise",
        "Nov 18 – 19",
    ),
    (
        "manapouri",
        "Manapouri",
        [-45.543, 167.598],
        "#50b050",
        "Cabot Lodge",
        "Nov 19 – 21",
    ),
];

pub fn default_stops() -> Vec<WaypointSpec> {
    STOPS
        .iter()
        .map(|&(id, name, latlng, color, hotel, dates)| WaypointSpec {
            id: id.to_string(),
            name: name.to_string(),
            latlng: Coordinate::from(latlng),
            color: color.to_string(),
            hotel: Some(hotel.to_string()),
            dates: Some(dates.to_string()),
        })
        .collect()
}

pub fn default_departure() -> NaiveDateTime {
    NaiveDateTime::parse_from_str(DEPARTURE, "%Y-%m-%dT%H:%M:%S").unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::Registry;

    #[test]
    fn default_trip_builds_a_registry() {
        let registry = Registry::new(default_stops()).unwrap();
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.waypoints()[0].id, "waiheke");
        assert_eq!(registry.get("manapouri").map(|w| w.ordinal), Some(6));
    }

    #[test]
    fn departure_parses() {
        let departure = default_departure();
        assert_eq!(departure.to_string(), "2026-11-06 00:00:00");
    }
}
