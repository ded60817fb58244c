// ============================================================================
// ELEMENT HELPERS - Acceso básico al DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

/// Window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Elemento por id, o un error con el id que falta
pub fn require_element(id: &str) -> Result<Element, JsValue> {
    get_element_by_id(id).ok_or_else(|| JsValue::from_str(&format!("No #{} element found", id)))
}

/// Elemento por id como `HtmlElement`
pub fn require_html_element(id: &str) -> Result<HtmlElement, JsValue> {
    require_element(id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("#{} is not an HtmlElement", id)))
}

/// Elemento por id como `<input>`
pub fn require_input(id: &str) -> Result<HtmlInputElement, JsValue> {
    require_element(id)?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| JsValue::from_str(&format!("#{} is not an input", id)))
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// `style.display`
pub fn set_display(element: &HtmlElement, display: &str) -> Result<(), JsValue> {
    element.style().set_property("display", display)
}
