use crate::waypoint::Coordinate;

/// Axis-aligned bounding box in latitude/longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl LatLngBounds {
    /// Smallest box containing every coordinate, or `None` for an empty slice.
    pub fn enclosing(coords: &[Coordinate]) -> Option<Self> {
        let (first, rest) = coords.split_first()?;
        let mut bounds = Self {
            south_west: *first,
            north_east: *first,
        };
        for c in rest {
            bounds.extend(*c);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, c: Coordinate) {
        self.south_west.lat = self.south_west.lat.min(c.lat);
        self.south_west.lng = self.south_west.lng.min(c.lng);
        self.north_east.lat = self.north_east.lat.max(c.lat);
        self.north_east.lng = self.north_east.lng.max(c.lng);
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        c.lat >= self.south_west.lat
            && c.lat <= self.north_east.lat
            && c.lng >= self.south_west.lng
            && c.lng <= self.north_east.lng
    }

    /// `[[south, west], [north, east]]`, the shape Leaflet's `fitBounds` accepts.
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [self.south_west.into(), self.north_east.into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::default_stops;

    #[test]
    fn empty_has_no_bounds() {
        assert_eq!(LatLngBounds::enclosing(&[]), None);
    }

    #[test]
    fn single_point_is_degenerate_box() {
        let c = Coordinate::new(-36.0, 175.0);
        let bounds = LatLngBounds::enclosing(&[c]).unwrap();
        assert_eq!(bounds.south_west, c);
        assert_eq!(bounds.north_east, c);
    }

    #[test]
    fn encloses_every_stop() {
        let coords: Vec<Coordinate> = default_stops().into_iter().map(|s| s.latlng).collect();
        let bounds = LatLngBounds::enclosing(&coords).unwrap();

        for c in &coords {
            assert!(bounds.contains(*c));
        }
        assert_eq!(bounds.corners(), [[-45.543, 167.598], [-36.788, 176.370]]);
    }
}
