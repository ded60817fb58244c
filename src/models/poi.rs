use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::utils::constants::{DEFAULT_EMOJI, DEFAULT_MARKER_SIZE};

/// Posición geográfica en orden de renderizado (latitud primero)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `[lat, lng]` como lo espera la librería de mapas
    pub fn to_array(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// Posición GeoJSON, guardada `[lng, lat]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Coordinates(pub [f64; 2]);

impl Coordinates {
    pub fn lng(&self) -> f64 {
        self.0[0]
    }

    pub fn lat(&self) -> f64 {
        self.0[1]
    }

    pub fn to_lat_lng(&self) -> LatLng {
        LatLng::new(self.lat(), self.lng())
    }
}

impl From<LatLng> for Coordinates {
    fn from(position: LatLng) -> Self {
        Coordinates([position.lng, position.lat])
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub enum CollectionType {
    #[default]
    FeatureCollection,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub enum FeatureType {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub enum GeometryType {
    #[default]
    Point,
}

/// Dirección postal de un POI
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, deserialize_with = "lenient::text")]
    pub street: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub state: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub zip_code: Option<String>,
}

impl Address {
    /// Código postal si existe y no está vacío
    pub fn zip(&self) -> Option<&str> {
        self.zip_code.as_deref().filter(|zip| !zip.is_empty())
    }
}

fn default_emoji() -> String {
    DEFAULT_EMOJI.to_string()
}

fn default_marker_size() -> u32 {
    DEFAULT_MARKER_SIZE
}

/// Los documentos editados a mano traen nulls, vacíos y números donde se espera texto.
/// Un campo opcional malo toma su valor por defecto en vez de tumbar todo el documento.
mod lenient {
    use super::*;

    fn as_text(value: Option<Value>) -> Option<String> {
        match value? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(as_text(Option::deserialize(deserializer)?).unwrap_or_default())
    }

    pub fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(as_text(Option::deserialize(deserializer)?))
    }

    /// Emoji vacío o ausente = pin por defecto
    pub fn emoji<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(as_text(Option::deserialize(deserializer)?)
            .filter(|emoji| !emoji.trim().is_empty())
            .unwrap_or_else(default_emoji))
    }

    /// Número positivo (o string numérico), redondeado. Cero, negativos o basura: valor por defecto.
    pub fn marker_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let size = match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(size
            .map(f64::round)
            .filter(|size| size.is_finite() && *size >= 1.0)
            .map(|size| size.min(f64::from(u32::MAX)) as u32)
            .unwrap_or(DEFAULT_MARKER_SIZE))
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Bool(b)) => b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            _ => false,
        })
    }

    /// Objeto o nada; cualquier otra cosa es una dirección vacía
    pub fn address<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
            _ => Address::default(),
        })
    }
}

/// Propiedades de un POI. Los valores por defecto se aplican aquí, una vez, al leer el documento.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PoiProperties {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default = "default_emoji", deserialize_with = "lenient::emoji")]
    pub emoji: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub area: String,
    #[serde(default = "default_marker_size", deserialize_with = "lenient::marker_size")]
    pub marker_size: u32,
    #[serde(default, deserialize_with = "lenient::address")]
    pub address: Address,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub needs_coordinate_update: bool,
    /// Claves que la app no interpreta (description, id, ...), conservadas para exportar
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for PoiProperties {
    fn default() -> Self {
        Self {
            name: String::new(),
            emoji: default_emoji(),
            category: String::new(),
            area: String::new(),
            marker_size: DEFAULT_MARKER_SIZE,
            address: Address::default(),
            needs_coordinate_update: false,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointGeometry {
    #[serde(rename = "type", default)]
    pub kind: GeometryType,
    pub coordinates: Coordinates,
}

/// Un punto de interés
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PoiFeature {
    #[serde(rename = "type", default)]
    pub kind: FeatureType,
    pub geometry: PointGeometry,
    #[serde(default)]
    pub properties: PoiProperties,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PoiFeature {
    pub fn new(position: LatLng, properties: PoiProperties) -> Self {
        Self {
            kind: FeatureType::Feature,
            geometry: PointGeometry {
                kind: GeometryType::Point,
                coordinates: position.into(),
            },
            properties,
            extra: Map::new(),
        }
    }

    /// Posición del marcador, invertida a orden `[lat, lng]`
    pub fn position(&self) -> LatLng {
        self.geometry.coordinates.to_lat_lng()
    }
}

/// El documento de POIs (`pois.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PoiCollection {
    #[serde(rename = "type", default)]
    pub kind: CollectionType,
    #[serde(default)]
    pub features: Vec<PoiFeature>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PoiCollection {
    pub fn new(features: Vec<PoiFeature>) -> Self {
        Self {
            kind: CollectionType::FeatureCollection,
            features,
            extra: Map::new(),
        }
    }

    /// Documento nuevo con las features base primero y `drafts` al final.
    /// No se deduplica ni se reordena nada.
    pub fn merged_with(&self, drafts: &[PoiFeature]) -> PoiCollection {
        let mut features = Vec::with_capacity(self.features.len() + drafts.len());
        features.extend(self.features.iter().cloned());
        features.extend(drafts.iter().cloned());
        PoiCollection {
            kind: self.kind,
            features,
            extra: self.extra.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
