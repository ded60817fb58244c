// ============================================================================
// TILE LAYER VIEWMODEL - settings.tileLayers -> capas con nombre + etiquetas
// ============================================================================

use serde_json::{Map, Value};

use crate::models::Settings;

/// Capas construidas desde los settings, por nombre y en orden del documento,
/// con una tabla paralela de etiquetas.
#[derive(Debug, Clone)]
pub struct TileLayers<L> {
    layers: Vec<(String, L)>,
    labels: Vec<(String, String)>,
}

impl<L> Default for TileLayers<L> {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            labels: Vec::new(),
        }
    }
}

impl<L> TileLayers<L> {
    pub fn layer(&self, name: &str) -> Option<&L> {
        self.layers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, layer)| layer)
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, label)| label.as_str())
    }

    pub fn layers(&self) -> &[(String, L)] {
        &self.layers
    }

    pub fn labels(&self) -> &[(String, String)] {
        &self.labels
    }

    /// Primera capa en orden del documento
    pub fn first(&self) -> Option<(&str, &L)> {
        self.layers.first().map(|(name, layer)| (name.as_str(), layer))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl<L: Clone> TileLayers<L> {
    /// Pares `(label, layer)` para el selector de capas. Las capas sin etiqueta se omiten.
    pub fn switcher_entries(&self) -> Vec<(String, L)> {
        self.layers
            .iter()
            .filter_map(|(name, layer)| {
                self.label(name)
                    .map(|label| (label.to_string(), layer.clone()))
            })
            .collect()
    }
}

/// Construye una capa por entrada de `tileLayers` con `build(url, options)`.
///
/// Las opciones por defecto son un objeto vacío; la etiqueta, la clave de la entrada.
/// Una sección ausente o vacía da tablas vacías.
pub fn load_tile_layers<L, E, F>(settings: &Settings, mut build: F) -> Result<TileLayers<L>, E>
where
    F: FnMut(&str, &Value) -> Result<L, E>,
{
    let Some(table) = settings.tile_layers.as_ref() else {
        log::warn!("⚠️ [TILES] No hay sección tileLayers en los settings");
        return Ok(TileLayers::default());
    };

    let empty_options = Value::Object(Map::new());
    let mut tile_layers = TileLayers {
        layers: Vec::with_capacity(table.len()),
        labels: Vec::with_capacity(table.len()),
    };

    for (name, config) in table.iter() {
        let options = config.options.as_ref().unwrap_or(&empty_options);
        let layer = build(&config.url, options)?;
        let label = config
            .label
            .as_deref()
            .filter(|label| !label.is_empty())
            .unwrap_or(name);

        tile_layers.layers.push((name.to_string(), layer));
        tile_layers.labels.push((name.to_string(), label.to_string()));
    }

    log::info!("🗺️ [TILES] {} capas cargadas", tile_layers.len());
    Ok(tile_layers)
}
