// ============================================================================
// MAP VIEW - Entrega el mapa listo a los scripts de la página
// ============================================================================
// window.__leafletMap / __poisData / __settings, luego un evento `map:ready`
// en document con los mismos tres valores en `detail`.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit};

use crate::dom;
use crate::maps::web::{to_js, LeafletMap};
use crate::state::MapReady;
use crate::utils::constants::MAP_READY_EVENT;

pub fn publish_map_ready(ready: &MapReady<LeafletMap>) -> Result<(), JsValue> {
    let pois = to_js(ready.pois.as_ref()).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let settings = to_js(ready.settings.as_ref()).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let map = ready.map.handle();

    let window = dom::window().ok_or_else(|| JsValue::from_str("No window"))?;
    js_sys::Reflect::set(&window, &JsValue::from_str("__leafletMap"), map)?;
    js_sys::Reflect::set(&window, &JsValue::from_str("__poisData"), &pois)?;
    js_sys::Reflect::set(&window, &JsValue::from_str("__settings"), &settings)?;

    let detail = js_sys::Object::new();
    js_sys::Reflect::set(&detail, &JsValue::from_str("map"), map)?;
    js_sys::Reflect::set(&detail, &JsValue::from_str("poisData"), &pois)?;
    js_sys::Reflect::set(&detail, &JsValue::from_str("settings"), &settings)?;

    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(MAP_READY_EVENT, &init)?;

    let document = dom::document().ok_or_else(|| JsValue::from_str("No document"))?;
    document.dispatch_event(&event)?;
    log::info!("📣 [MAP] {} despachado", MAP_READY_EVENT);
    Ok(())
}
