// Doble de test de `MapSurface`: registra cada llamada en vez de dibujar.

use std::cell::{Cell, RefCell};

use serde_json::Value;

use super::traits::{MapError, MapSurface, MapView};
use crate::models::LatLng;
use crate::viewmodels::marker_viewmodel::IconSpec;

#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    AddTileLayer(String),
    LayerControl(Vec<String>),
    PoiMarker {
        id: usize,
        position: LatLng,
        icon: IconSpec,
        popup_html: String,
    },
    PendingMarker {
        id: usize,
        position: LatLng,
    },
    RemoveMarker(usize),
    ClosePopup,
    Crosshair(bool),
}

#[derive(Default)]
pub struct RecordingMap {
    pub view: MapView,
    pub calls: RefCell<Vec<MapCall>>,
    next_marker: Cell<usize>,
    /// Hace fallar `remove_marker` y `close_popup` como Leaflet con handles obsoletos
    pub fail_cleanup: Cell<bool>,
    click_handler: RefCell<Option<Box<dyn FnMut(LatLng)>>>,
}

impl RecordingMap {
    pub fn new(view: &MapView) -> Self {
        Self {
            view: view.clone(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<MapCall> {
        self.calls.borrow().clone()
    }

    /// Ids de marcadores añadidos y no quitados, en orden de inserción
    pub fn live_markers(&self) -> Vec<usize> {
        let calls = self.calls.borrow();
        let removed: Vec<usize> = calls
            .iter()
            .filter_map(|call| match call {
                MapCall::RemoveMarker(id) => Some(*id),
                _ => None,
            })
            .collect();
        calls
            .iter()
            .filter_map(|call| match call {
                MapCall::PoiMarker { id, .. } | MapCall::PendingMarker { id, .. } => Some(*id),
                _ => None,
            })
            .filter(|id| !removed.contains(id))
            .collect()
    }

    pub fn poi_markers(&self) -> Vec<(LatLng, IconSpec, String)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                MapCall::PoiMarker {
                    position,
                    icon,
                    popup_html,
                    ..
                } => Some((*position, icon.clone(), popup_html.clone())),
                _ => None,
            })
            .collect()
    }

    /// Simula un click del usuario en el mapa
    pub fn click(&self, position: LatLng) {
        if let Some(handler) = self.click_handler.borrow_mut().as_mut() {
            handler(position);
        }
    }

    fn next_id(&self) -> usize {
        let id = self.next_marker.get();
        self.next_marker.set(id + 1);
        id
    }
}

impl MapSurface for RecordingMap {
    /// La capa es su plantilla de URL
    type TileLayer = String;
    type Marker = usize;

    fn new_tile_layer(url: &str, _options: &Value) -> Result<String, MapError> {
        Ok(url.to_string())
    }

    fn add_tile_layer(&self, layer: &String) -> Result<(), MapError> {
        self.calls.borrow_mut().push(MapCall::AddTileLayer(layer.clone()));
        Ok(())
    }

    fn add_layer_control(&self, entries: &[(String, String)]) -> Result<(), MapError> {
        let labels = entries.iter().map(|(label, _)| label.clone()).collect();
        self.calls.borrow_mut().push(MapCall::LayerControl(labels));
        Ok(())
    }

    fn add_poi_marker(
        &self,
        position: LatLng,
        icon: &IconSpec,
        popup_html: &str,
    ) -> Result<usize, MapError> {
        let id = self.next_id();
        self.calls.borrow_mut().push(MapCall::PoiMarker {
            id,
            position,
            icon: icon.clone(),
            popup_html: popup_html.to_string(),
        });
        Ok(id)
    }

    fn add_pending_marker(&self, position: LatLng) -> Result<usize, MapError> {
        let id = self.next_id();
        self.calls
            .borrow_mut()
            .push(MapCall::PendingMarker { id, position });
        Ok(id)
    }

    fn remove_marker(&self, marker: &usize) -> Result<(), MapError> {
        if self.fail_cleanup.get() {
            return Err(MapError::Js("layer not on map".to_string()));
        }
        self.calls.borrow_mut().push(MapCall::RemoveMarker(*marker));
        Ok(())
    }

    fn close_popup(&self) -> Result<(), MapError> {
        if self.fail_cleanup.get() {
            return Err(MapError::Js("no popup open".to_string()));
        }
        self.calls.borrow_mut().push(MapCall::ClosePopup);
        Ok(())
    }

    fn set_crosshair(&self, active: bool) -> Result<(), MapError> {
        self.calls.borrow_mut().push(MapCall::Crosshair(active));
        Ok(())
    }

    fn on_click(&self, handler: Box<dyn FnMut(LatLng)>) -> Result<(), MapError> {
        *self.click_handler.borrow_mut() = Some(handler);
        Ok(())
    }
}
