// ============================================================================
// MANEJO DE EVENTOS
// ============================================================================
// Los listeners se registran una sola vez, al montar el overlay, y viven lo
// mismo que la página: closure.forget() los mantiene vivos.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, MouseEvent};

/// Handler de click sobre un elemento
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Listener para un evento que se dispara una vez por página (p. ej. `DOMContentLoaded`)
pub fn once<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    let closure = Closure::once(handler);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
