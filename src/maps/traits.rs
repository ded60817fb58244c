use serde_json::Value;

use crate::models::{LatLng, MapSettings};
use crate::utils::constants::*;
use crate::viewmodels::marker_viewmodel::IconSpec;

/// Superficie común sobre la que dibujan los viewmodels.
///
/// En el navegador envuelve un mapa Leaflet; los tests usan un grabador.
/// Los handles son referencias JS, así que todos los métodos toman `&self`.
pub trait MapSurface {
    type TileLayer: Clone;
    type Marker;

    /// Constructor de capa (`L.tileLayer`); independiente de cualquier mapa
    fn new_tile_layer(url: &str, options: &Value) -> Result<Self::TileLayer, MapError>;

    /// Añade una capa base al mapa
    fn add_tile_layer(&self, layer: &Self::TileLayer) -> Result<(), MapError>;

    /// Añade un selector de capas con entradas `(label, layer)`
    fn add_layer_control(&self, entries: &[(String, Self::TileLayer)]) -> Result<(), MapError>;

    /// Marcador emoji con popup asociado
    fn add_poi_marker(
        &self,
        position: LatLng,
        icon: &IconSpec,
        popup_html: &str,
    ) -> Result<Self::Marker, MapError>;

    /// Marcador simple mientras una colocación espera confirmación
    fn add_pending_marker(&self, position: LatLng) -> Result<Self::Marker, MapError>;

    fn remove_marker(&self, marker: &Self::Marker) -> Result<(), MapError>;

    fn close_popup(&self) -> Result<(), MapError>;

    /// Cursor en cruz sobre el contenedor mientras se coloca un POI
    fn set_crosshair(&self, active: bool) -> Result<(), MapError>;

    /// Registra el handler de click del mapa
    fn on_click(&self, handler: Box<dyn FnMut(LatLng)>) -> Result<(), MapError>;
}

/// Esquinas suroeste / noreste
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// `[[lat, lng], [lat, lng]]`, aceptado por Leaflet como `maxBounds`
    pub fn to_array(self) -> [[f64; 2]; 2] {
        [self.south_west.to_array(), self.north_east.to_array()]
    }
}

/// Configuración del mapa con todos los valores por defecto resueltos
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: f64,
    pub bounds: LatLngBounds,
    pub max_bounds_viscosity: f64,
    pub zoom_control: bool,
    pub dragging: bool,
    pub default_tile_layer: String,
    pub show_layer_control: bool,
}

impl MapView {
    pub fn from_settings(settings: &MapSettings) -> Self {
        let [lat, lng] = settings.center.unwrap_or(DEFAULT_CENTER);
        let bounds = match settings.bounds {
            Some(bounds) => LatLngBounds {
                south_west: LatLng::new(bounds.southwest[0], bounds.southwest[1]),
                north_east: LatLng::new(bounds.northeast[0], bounds.northeast[1]),
            },
            None => LatLngBounds {
                south_west: LatLng::new(DEFAULT_BOUNDS_SOUTHWEST[0], DEFAULT_BOUNDS_SOUTHWEST[1]),
                north_east: LatLng::new(DEFAULT_BOUNDS_NORTHEAST[0], DEFAULT_BOUNDS_NORTHEAST[1]),
            },
        };

        Self {
            center: LatLng::new(lat, lng),
            zoom: settings.zoom.unwrap_or(DEFAULT_ZOOM),
            bounds,
            max_bounds_viscosity: settings
                .max_bounds_viscosity
                .unwrap_or(DEFAULT_MAX_BOUNDS_VISCOSITY),
            zoom_control: settings.zoom_control.unwrap_or(false),
            dragging: settings.dragging.unwrap_or(true),
            default_tile_layer: settings
                .default_tile_layer
                .clone()
                .unwrap_or_else(|| DEFAULT_TILE_LAYER.to_string()),
            show_layer_control: settings.show_layer_control.unwrap_or(false),
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::from_settings(&MapSettings::default())
    }
}

/// Errores de mapa / bootstrap
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// La petición nunca obtuvo respuesta
    Network(String),
    /// El servidor respondió con un status de error
    Status { url: String, status: u16 },
    /// El cuerpo no es el documento esperado
    Decode(String),
    NoTileLayers,
    /// Excepción lanzada por la librería de mapas o el DOM
    Js(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::Network(msg) => write!(f, "Network error: {}", msg),
            MapError::Status { url, status } => write!(f, "HTTP {} while fetching {}", status, url),
            MapError::Decode(msg) => write!(f, "Invalid document: {}", msg),
            MapError::NoTileLayers => write!(f, "No tile layers available"),
            MapError::Js(msg) => write!(f, "JavaScript error: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}
