use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Sección de vista de `settings.json`. Todos los campos son opcionales; los valores
/// por defecto se resuelven una vez en un `MapView` al construir el mapa.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    /// [lat, lng]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundsSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bounds_viscosity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_control: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dragging: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_tile_layer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_layer_control: Option<bool>,
}

/// Esquinas como [lat, lng]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundsSettings {
    pub southwest: [f64; 2],
    pub northeast: [f64; 2],
}

/// Una entrada de la tabla `tileLayers`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TileLayerConfig {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// `tileLayers` por nombre, en orden del documento.
/// El orden importa: la primera entrada es la capa base de respaldo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileLayerTable(pub Vec<(String, TileLayerConfig)>);

impl TileLayerTable {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TileLayerConfig)> {
        self.0.iter().map(|(name, config)| (name.as_str(), config))
    }

    pub fn get(&self, name: &str) -> Option<&TileLayerConfig> {
        self.iter().find(|(key, _)| *key == name).map(|(_, config)| config)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for TileLayerTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, config) in &self.0 {
            map.serialize_entry(name, config)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TileLayerTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TileLayerTableVisitor;

        impl<'de> Visitor<'de> for TileLayerTableVisitor {
            type Value = TileLayerTable;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of tile layer definitions")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries: Vec<(String, TileLayerConfig)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, config)) = access.next_entry::<String, TileLayerConfig>()? {
                    // Los duplicados posteriores ganan, como en un literal de objeto JS
                    if let Some(slot) = entries.iter_mut().find(|(key, _)| *key == name) {
                        slot.1 = config;
                    } else {
                        entries.push((name, config));
                    }
                }
                Ok(TileLayerTable(entries))
            }
        }

        deserializer.deserialize_map(TileLayerTableVisitor)
    }
}

/// El documento de settings (`settings.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_layers: Option<TileLayerTable>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../assets/settings.json");

    #[test]
    fn test_fixture_loads_in_document_order() {
        let settings: Settings = serde_json::from_str(FIXTURE).unwrap();
        let table = settings.tile_layers.unwrap();
        let names: Vec<_> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["osm", "topo", "positron"]);
        assert_eq!(settings.map.zoom, Some(16.0));
        assert_eq!(settings.map.default_tile_layer.as_deref(), Some("osm"));
    }

    #[test]
    fn test_empty_document() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.map, MapSettings::default());
        assert!(settings.tile_layers.is_none());
    }

    #[test]
    fn test_order_is_not_alphabetical() {
        let raw = r#"{ "tileLayers": {
            "zeta": { "url": "https://z/{z}/{x}/{y}.png" },
            "alpha": { "url": "https://a/{z}/{x}/{y}.png" }
        } }"#;
        let settings: Settings = serde_json::from_str(raw).unwrap();
        let table = settings.tile_layers.unwrap();
        assert_eq!(table.0[0].0, "zeta");
        assert_eq!(table.get("alpha").unwrap().url, "https://a/{z}/{x}/{y}.png");
    }

    #[test]
    fn test_serialize_keeps_order() {
        let raw = r#"{"tileLayers":{"b":{"url":"u1"},"a":{"url":"u2","label":"A"}}}"#;
        let settings: Settings = serde_json::from_str(raw).unwrap();
        assert_eq!(
            serde_json::to_string(&settings).unwrap(),
            r#"{"map":{},"tileLayers":{"b":{"url":"u1"},"a":{"url":"u2","label":"A"}}}"#
        );
    }
}
