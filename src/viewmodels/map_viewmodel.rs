// ============================================================================
// MAP VIEWMODEL - Bootstrap del mapa
// ============================================================================
// Documentos -> vista, capa base, selector de capas, un marcador por POI
// ============================================================================

use std::rc::Rc;

use crate::maps::{MapError, MapSurface, MapView};
use crate::models::{PoiCollection, PoiFeature, Settings};
use crate::services::{fetch_documents, DocumentSource};
use crate::state::MapReady;
use crate::viewmodels::marker_viewmodel::MarkerContent;
use crate::viewmodels::tile_layer_viewmodel::{load_tile_layers, TileLayers};

/// ViewModel del mapa
pub struct MapViewModel;

impl MapViewModel {
    /// Descarga ambos documentos y construye el mapa con `create`.
    ///
    /// Nunca falla hacia arriba: cada error se loguea y se convierte en `None`,
    /// el resto de la página sigue funcionando.
    pub async fn initialize<M, D, F>(source: &D, create: F) -> Option<MapReady<M>>
    where
        M: MapSurface,
        D: DocumentSource,
        F: FnOnce(&MapView) -> Result<M, MapError>,
    {
        match Self::bootstrap(source, create).await {
            Ok(ready) => {
                log::info!(
                    "✅ [BOOTSTRAP] Mapa listo con {} POIs",
                    ready.pois.len()
                );
                Some(ready)
            }
            Err(e) => {
                log::error!("❌ [BOOTSTRAP] Error inicializando el mapa: {}", e);
                None
            }
        }
    }

    pub async fn bootstrap<M, D, F>(source: &D, create: F) -> Result<MapReady<M>, MapError>
    where
        M: MapSurface,
        D: DocumentSource,
        F: FnOnce(&MapView) -> Result<M, MapError>,
    {
        let (pois, settings) = fetch_documents(source).await?;
        Self::build(pois, settings, create)
    }

    /// Construye el mapa a partir de documentos ya cargados
    pub fn build<M, F>(pois: PoiCollection, settings: Settings, create: F) -> Result<MapReady<M>, MapError>
    where
        M: MapSurface,
        F: FnOnce(&MapView) -> Result<M, MapError>,
    {
        let tile_layers = load_tile_layers(&settings, M::new_tile_layer)?;
        let view = MapView::from_settings(&settings.map);
        let base_layer = Self::select_base_layer(&tile_layers, &view.default_tile_layer)?;

        log::info!(
            "🗺️ [BOOTSTRAP] Creando mapa en ({}, {}) zoom {}",
            view.center.lat,
            view.center.lng,
            view.zoom
        );
        let map = create(&view)?;
        map.add_tile_layer(base_layer)?;

        if view.show_layer_control && tile_layers.len() > 1 {
            map.add_layer_control(&tile_layers.switcher_entries())?;
        }

        for feature in &pois.features {
            Self::add_marker(&map, feature)?;
        }
        log::info!("📍 [BOOTSTRAP] {} marcadores añadidos", pois.len());

        Ok(MapReady {
            map: Rc::new(map),
            pois: Rc::new(pois),
            settings: Rc::new(settings),
        })
    }

    /// Capa llamada `name`, si no la primera con un aviso
    pub fn select_base_layer<'a, L>(tile_layers: &'a TileLayers<L>, name: &str) -> Result<&'a L, MapError> {
        if let Some(layer) = tile_layers.layer(name) {
            return Ok(layer);
        }
        match tile_layers.first() {
            Some((fallback, layer)) => {
                log::warn!(
                    "⚠️ [BOOTSTRAP] Capa por defecto \"{}\" no encontrada, usando \"{}\"",
                    name,
                    fallback
                );
                Ok(layer)
            }
            None => Err(MapError::NoTileLayers),
        }
    }

    /// Marcador emoji con popup en el `[lat, lng]` de la feature
    pub fn add_marker<M: MapSurface>(map: &M, feature: &PoiFeature) -> Result<M::Marker, MapError> {
        let content = MarkerContent::for_feature(feature);
        map.add_poi_marker(feature.position(), &content.icon, &content.popup_html)
    }
}
