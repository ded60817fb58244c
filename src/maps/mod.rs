// Superficies de mapa, una implementación por plataforma

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub mod recording;

pub mod traits;

pub use traits::{LatLngBounds, MapError, MapSurface, MapView};
