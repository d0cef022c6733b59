pub mod bounds;
pub mod config;
pub mod countdown;
pub mod itinerary;
pub mod map;
pub mod marker;
pub mod panels;
pub mod ports;
pub mod scroll_top;
pub mod sync;
pub mod visibility;
pub mod waypoint;

pub use config::{LogLevel, PageConfig};
pub use countdown::{Countdown, CountdownParts};
pub use map::{MapBackend, MapOptions, MapPresentation, NavigateSink};
pub use marker::MarkerStyle;
pub use ports::{MarkerPort, NavPort, PanelPort, ScrollPort};
pub use sync::{ActiveState, SyncCoordinator};
pub use visibility::{ActivationBand, VisibilityReport, VisibilitySource};
pub use waypoint::{Coordinate, Registry, RegistryError, Waypoint, WaypointSpec};
