use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{MapError, MapSurface, MapView};
use crate::models::LatLng;
use crate::utils::leaflet_ffi::{self as ffi, LeafletMapHandle, MarkerHandle, TileLayerHandle};
use crate::viewmodels::marker_viewmodel::IconSpec;

/// Opciones del mapa Leaflet construidas desde un `MapView`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LeafletMapOptions {
    max_bounds: [[f64; 2]; 2],
    max_bounds_viscosity: f64,
    zoom_control: bool,
    dragging: bool,
}

/// Objeto JS plano (los mapas se vuelven objetos, no `Map`)
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, MapError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| MapError::Js(e.to_string()))
}

fn js_error(value: JsValue) -> MapError {
    MapError::Js(
        value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

fn lat_lng_js(position: LatLng) -> JsValue {
    js_sys::Array::of2(&position.lat.into(), &position.lng.into()).into()
}

/// Renderer basado en Leaflet (global `L`)
pub struct LeafletMap {
    handle: LeafletMapHandle,
}

impl LeafletMap {
    /// `L.map(container, options).setView(center, zoom)`
    pub fn create(container_id: &str, view: &MapView) -> Result<Self, MapError> {
        let options = to_js(&LeafletMapOptions {
            max_bounds: view.bounds.to_array(),
            max_bounds_viscosity: view.max_bounds_viscosity,
            zoom_control: view.zoom_control,
            dragging: view.dragging,
        })?;
        let handle = ffi::create_map(container_id, &options).map_err(js_error)?;
        handle.set_view(&lat_lng_js(view.center), view.zoom);
        Ok(Self { handle })
    }

    /// El objeto `L.Map` subyacente, para los scripts de la página
    pub fn handle(&self) -> &JsValue {
        AsRef::<JsValue>::as_ref(&self.handle)
    }
}

impl MapSurface for LeafletMap {
    type TileLayer = TileLayerHandle;
    type Marker = MarkerHandle;

    fn new_tile_layer(url: &str, options: &Value) -> Result<TileLayerHandle, MapError> {
        ffi::tile_layer(url, &to_js(options)?).map_err(js_error)
    }

    fn add_tile_layer(&self, layer: &TileLayerHandle) -> Result<(), MapError> {
        layer.add_tile_layer_to(&self.handle).map(|_| ()).map_err(js_error)
    }

    fn add_layer_control(&self, entries: &[(String, TileLayerHandle)]) -> Result<(), MapError> {
        let base_layers = js_sys::Object::new();
        for (label, layer) in entries {
            js_sys::Reflect::set(&base_layers, &JsValue::from_str(label), AsRef::<JsValue>::as_ref(layer))
                .map_err(js_error)?;
        }
        let control = ffi::layers_control(&base_layers).map_err(js_error)?;
        control.add_control_to(&self.handle).map(|_| ()).map_err(js_error)
    }

    fn add_poi_marker(
        &self,
        position: LatLng,
        icon: &IconSpec,
        popup_html: &str,
    ) -> Result<MarkerHandle, MapError> {
        let icon = ffi::div_icon(&to_js(icon)?).map_err(js_error)?;
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("icon"), &icon).map_err(js_error)?;

        let marker = ffi::marker(&lat_lng_js(position), &options).map_err(js_error)?;
        marker.add_marker_to(&self.handle).map_err(js_error)?;
        marker.bind_popup(popup_html);
        Ok(marker)
    }

    fn add_pending_marker(&self, position: LatLng) -> Result<MarkerHandle, MapError> {
        let marker = ffi::marker(&lat_lng_js(position), &JsValue::UNDEFINED).map_err(js_error)?;
        marker.add_marker_to(&self.handle).map_err(js_error)?;
        Ok(marker)
    }

    fn remove_marker(&self, marker: &MarkerHandle) -> Result<(), MapError> {
        self.handle
            .remove_layer(AsRef::<JsValue>::as_ref(marker))
            .map(|_| ())
            .map_err(js_error)
    }

    fn close_popup(&self) -> Result<(), MapError> {
        self.handle.close_popup().map(|_| ()).map_err(js_error)
    }

    fn set_crosshair(&self, active: bool) -> Result<(), MapError> {
        let cursor = if active { "crosshair" } else { "" };
        self.handle
            .get_container()
            .style()
            .set_property("cursor", cursor)
            .map_err(js_error)
    }

    fn on_click(&self, mut handler: Box<dyn FnMut(LatLng)>) -> Result<(), MapError> {
        let closure = Closure::wrap(Box::new(move |event: JsValue| {
            let lat_lng = js_sys::Reflect::get(&event, &JsValue::from_str("latlng"))
                .unwrap_or(JsValue::UNDEFINED);
            let coordinate = |key: &str| {
                js_sys::Reflect::get(&lat_lng, &JsValue::from_str(key))
                    .ok()
                    .and_then(|v| v.as_f64())
            };
            match (coordinate("lat"), coordinate("lng")) {
                (Some(lat), Some(lng)) => handler(LatLng::new(lat, lng)),
                _ => log::warn!("⚠️ [MAP] Evento click sin latlng"),
            }
        }) as Box<dyn FnMut(JsValue)>);

        self.handle.on("click", closure.as_ref().unchecked_ref());
        // El mapa vive lo mismo que la página, y el listener también
        closure.forget();
        Ok(())
    }
}
