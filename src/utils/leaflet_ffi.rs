// ============================================================================
// LEAFLET FFI - Bindings al namespace global `L`
// ============================================================================
// Solo wrappers finos: sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `L.Map`
    pub type LeafletMapHandle;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    pub fn create_map(container_id: &str, options: &JsValue) -> Result<LeafletMapHandle, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &LeafletMapHandle, center: &JsValue, zoom: f64) -> LeafletMapHandle;

    #[wasm_bindgen(method, catch, js_name = removeLayer)]
    pub fn remove_layer(this: &LeafletMapHandle, layer: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = closePopup)]
    pub fn close_popup(this: &LeafletMapHandle) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = getContainer)]
    pub fn get_container(this: &LeafletMapHandle) -> web_sys::HtmlElement;

    #[wasm_bindgen(method)]
    pub fn on(this: &LeafletMapHandle, event: &str, handler: &js_sys::Function) -> LeafletMapHandle;

    /// `L.TileLayer`
    #[derive(Clone)]
    pub type TileLayerHandle;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url: &str, options: &JsValue) -> Result<TileLayerHandle, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addTo)]
    pub fn add_tile_layer_to(this: &TileLayerHandle, map: &LeafletMapHandle) -> Result<JsValue, JsValue>;

    /// `L.Marker`
    #[derive(Clone)]
    pub type MarkerHandle;

    #[wasm_bindgen(catch, js_namespace = L, js_name = marker)]
    pub fn marker(lat_lng: &JsValue, options: &JsValue) -> Result<MarkerHandle, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addTo)]
    pub fn add_marker_to(this: &MarkerHandle, map: &LeafletMapHandle) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &MarkerHandle, html: &str) -> MarkerHandle;

    #[wasm_bindgen(catch, js_namespace = L, js_name = divIcon)]
    pub fn div_icon(options: &JsValue) -> Result<JsValue, JsValue>;

    /// `L.Control.Layers`
    pub type LayersControlHandle;

    #[wasm_bindgen(catch, js_namespace = ["L", "control"], js_name = layers)]
    pub fn layers_control(base_layers: &JsValue) -> Result<LayersControlHandle, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addTo)]
    pub fn add_control_to(this: &LayersControlHandle, map: &LeafletMapHandle) -> Result<JsValue, JsValue>;
}
