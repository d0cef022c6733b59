use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in degrees. Serialized as `[lat, lng]` so it can be
/// handed straight to Leaflet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lng]
    }
}

/// A stop as written in trip data. Ordinals are assigned by [`Registry::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointSpec {
    pub id: String,
    pub name: String,
    pub latlng: Coordinate,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: String,
    /// 1-based travel order.
    pub ordinal: u32,
    pub name: String,
    pub coordinate: Coordinate,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
}

impl Waypoint {
    /// Label shown on the map marker, e.g. `"3. Rotorua"`.
    pub fn label(&self) -> String {
        format!("{}. {}", self.ordinal, self.name)
    }

    /// Fragment a navigation link uses to target this stop's section.
    pub fn anchor(&self) -> String {
        format!("#{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("waypoint id `{id}` appears more than once (positions {first} and {second})")]
    DuplicateId {
        id: String,
        first: u32,
        second: u32,
    },
}

/// Ordered, read-only set of trip stops.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Registry {
    waypoints: Vec<Waypoint>,
    by_id: HashMap<String, usize>,
}

impl Registry {
    pub fn new(specs: impl IntoIterator<Item = WaypointSpec>) -> Result<Self, RegistryError> {
        let mut waypoints = Vec::new();
        let mut by_id = HashMap::new();

        for (idx, spec) in specs.into_iter().enumerate() {
            let ordinal = idx as u32 + 1;
            if let Some(&prev) = by_id.get(&spec.id) {
                return Err(RegistryError::DuplicateId {
                    id: spec.id,
                    first: prev as u32 + 1,
                    second: ordinal,
                });
            }
            by_id.insert(spec.id.clone(), idx);
            waypoints.push(Waypoint {
                id: spec.id,
                ordinal,
                name: spec.name,
                coordinate: spec.latlng,
                color: spec.color,
                hotel: spec.hotel,
                dates: spec.dates,
            });
        }

        Ok(Self { waypoints, by_id })
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.waypoints.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Waypoint> {
        self.by_id.get(id).map(|&idx| &self.waypoints[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.waypoints.iter().map(|w| w.coordinate).collect()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.iter()
    }
}
