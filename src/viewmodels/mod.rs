// ============================================================================
// VIEWMODELS - Lógica de UI, sin acceso al DOM
// ============================================================================

pub mod marker_viewmodel;
pub mod tile_layer_viewmodel;
pub mod map_viewmodel;
pub mod admin_viewmodel;

pub use marker_viewmodel::{popup_html, IconSpec, MarkerContent};
pub use tile_layer_viewmodel::{load_tile_layers, TileLayers};
pub use map_viewmodel::MapViewModel;
pub use admin_viewmodel::{AdminView, AdminViewModel, Placement, SaveOutcome};
