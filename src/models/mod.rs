pub mod poi;
pub mod settings;
pub mod form;

pub use poi::{Address, Coordinates, LatLng, PoiCollection, PoiFeature, PoiProperties};
pub use settings::{BoundsSettings, MapSettings, Settings, TileLayerConfig, TileLayerTable};
pub use form::{FormError, PoiForm};
