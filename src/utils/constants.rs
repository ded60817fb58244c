// ============================================================================
// CONSTANTS - Valores por defecto compartidos por el mapa y el overlay admin
// ============================================================================

/// Glifo del marcador cuando un POI no tiene emoji
pub const DEFAULT_EMOJI: &str = "📍";

/// Tamaño del marcador en píxeles cuando un POI no declara uno
pub const DEFAULT_MARKER_SIZE: u32 = 30;
pub const MIN_MARKER_SIZE: u32 = 16;
pub const MAX_MARKER_SIZE: u32 = 64;

/// Clase CSS de los div icons emoji
pub const EMOJI_MARKER_CLASS: &str = "emoji-marker";

/// Capa elegida cuando los settings no nombran ninguna
pub const DEFAULT_TILE_LAYER: &str = "osm";

/// [lat, lng]
pub const DEFAULT_CENTER: [f64; 2] = [33.47373, -81.96762];
pub const DEFAULT_ZOOM: f64 = 15.0;
pub const DEFAULT_BOUNDS_SOUTHWEST: [f64; 2] = [33.46041, -81.95071];
pub const DEFAULT_BOUNDS_NORTHEAST: [f64; 2] = [33.48457, -81.98371];

/// 1.0 hace los límites totalmente rígidos al desplazar
pub const DEFAULT_MAX_BOUNDS_VISCOSITY: f64 = 1.0;

/// Evento despachado en `document` cuando el mapa está usable
pub const MAP_READY_EVENT: &str = "map:ready";

pub const COORDINATE_WARNING: &str = "Coordinates need to be updated";

pub const MSG_NAME_REQUIRED: &str = "Please provide a name.";
pub const MSG_DRAFT_SAVED: &str = "POI added to draft. Use Export JSON to download updated pois.json.";
pub const MSG_DRAFTS_CLEARED: &str =
    "Draft POIs cleared. Previously exported pois.json files are unaffected.";

/// Ids de los controles de admin en la página
pub mod ids {
    pub const BTN_ENTER_ADD_POI: &str = "btnEnterAddPoi";
    pub const BTN_EXPORT_POIS: &str = "btnExportPois";
    pub const BTN_CLEAR_DRAFT: &str = "btnClearDraft";
    pub const BTN_CANCEL_POI: &str = "btnCancelPoi";
    pub const BTN_SAVE_POI: &str = "btnSavePoi";

    pub const MODAL_BACKDROP: &str = "poiModalBackdrop";
    pub const COORD_PREVIEW: &str = "poiCoordPreview";

    pub const INPUT_NAME: &str = "poiName";
    pub const INPUT_EMOJI: &str = "poiEmoji";
    pub const INPUT_CATEGORY: &str = "poiCategory";
    pub const INPUT_AREA: &str = "poiArea";
    pub const INPUT_MARKER_SIZE: &str = "poiMarkerSize";
    pub const INPUT_STREET: &str = "addrStreet";
    pub const INPUT_CITY: &str = "addrCity";
    pub const INPUT_STATE: &str = "addrState";
    pub const INPUT_ZIP: &str = "addrZip";
}
