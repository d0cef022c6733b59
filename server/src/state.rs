use itinerary_shared::{PageConfig, RegistryError};

#[derive(Debug, Clone)]
pub struct AppState {
    pub stops: usize,
}

impl AppState {
    /// Validates the trip the bundled page boots with.
    pub fn from_config(config: &PageConfig) -> Result<Self, RegistryError> {
        let registry = config.registry()?;
        Ok(Self {
            stops: registry.len(),
        })
    }
}
