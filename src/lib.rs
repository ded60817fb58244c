// ============================================================================
// POI MAP - Mapa Leaflet de puntos de interés con overlay de borradores admin
// ============================================================================
// Arquitectura MVVM:
// - Models: documentos de POIs y settings, entrada del formulario
// - ViewModels: bootstrap del mapa, marcadores, capas, editor admin
// - Services: descarga de documentos, persistencia de borradores
// - Maps: trait de superficie de render + implementación Leaflet
// - Views: lado DOM (modal, descargas, eventos de página)
// ============================================================================

pub mod config;
pub mod maps;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(config::CONFIG.log_level()));
    log::info!("🚀 POI Map - Rust + Leaflet");

    let document = dom::document().ok_or_else(|| JsValue::from_str("No document"))?;
    if document.ready_state() == "loading" {
        dom::once(&document, "DOMContentLoaded", app::App::start)?;
    } else {
        app::App::start();
    }
    Ok(())
}
