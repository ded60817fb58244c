// ============================================================================
// DRAFT SERVICE - POIs borrador reflejados en el storage del navegador
// ============================================================================

use crate::models::PoiFeature;

/// Slot clave/valor con el conjunto de borradores serializado
pub trait DraftStore {
    fn read(&self) -> Result<Option<String>, String>;
    fn write(&self, raw: &str) -> Result<(), String>;
}

/// Codifica los borradores como un array JSON de features
pub struct DraftRepository<S> {
    store: S,
}

impl<S: DraftStore> DraftRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borradores guardados. Contenido ausente, ilegible o corrupto = conjunto vacío.
    pub fn load(&self) -> Vec<PoiFeature> {
        let raw = match self.store.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::error!("❌ [STORAGE] Error leyendo POIs borrador: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<PoiFeature>>(&raw) {
            Ok(drafts) => {
                log::info!("💾 [STORAGE] {} POIs borrador restaurados", drafts.len());
                drafts
            }
            Err(e) => {
                log::error!("❌ [STORAGE] Error cargando POIs borrador: {}", e);
                Vec::new()
            }
        }
    }

    /// Sobrescribe el conjunto guardado con `drafts`
    pub fn persist(&self, drafts: &[PoiFeature]) -> Result<(), String> {
        let raw = serde_json::to_string(drafts)
            .map_err(|e| format!("Error serializing draft POIs: {}", e))?;
        self.store.write(&raw)
    }
}

/// `localStorage` slot
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageDraftStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageDraftStore {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string() }
    }
}

#[cfg(target_arch = "wasm32")]
impl DraftStore for LocalStorageDraftStore {
    fn read(&self) -> Result<Option<String>, String> {
        crate::utils::storage::load_raw(&self.key)
    }

    fn write(&self, raw: &str) -> Result<(), String> {
        crate::utils::storage::save_raw(&self.key, raw)
    }
}
